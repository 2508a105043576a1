//! # Automaton — Transition Table
//!
//! An ordered collection of transitions. Order has no bearing on
//! correctness; it only decides which candidate the deterministic chooser
//! picks and the order candidates are offered to the others.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use gauto_core::{Edge, JumpLabel, State, Symbol, Variable};

use crate::run::Run;
use crate::transition::Transition;

/// Table of transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Automaton {
    #[serde(default)]
    transitions: Vec<Transition>,
}

impl Automaton {
    /// Create an empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition built from its parts.
    pub fn add_transition(
        &mut self,
        parent: State,
        symbol: Symbol,
        children: Vec<State>,
        vars: impl IntoIterator<Item = Variable>,
        forget: impl IntoIterator<Item = Variable>,
        jumps: impl IntoIterator<Item = JumpLabel>,
    ) {
        self.push(
            Transition::new(parent, symbol, children)
                .with_vars(vars)
                .with_forget(forget)
                .with_jumps(jumps),
        );
    }

    /// Append an already built transition.
    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// All transitions in table order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Every state mentioned as a parent or child state.
    pub fn states(&self) -> BTreeSet<&State> {
        self.transitions
            .iter()
            .flat_map(|t| std::iter::once(&t.parent).chain(t.children.iter()))
            .collect()
    }

    /// Every symbol mentioned.
    pub fn symbols(&self) -> BTreeSet<&Symbol> {
        self.transitions.iter().map(|t| &t.symbol).collect()
    }

    /// Transitions that match `edge` under the current `run`, in table order.
    pub fn applicable_transitions<'a>(&'a self, edge: &Edge, run: &Run) -> Vec<&'a Transition> {
        self.transitions
            .iter()
            .filter(|t| t.matches(edge, run))
            .collect()
    }
}

impl FromIterator<Transition> for Automaton {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        Self {
            transitions: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} transition(s), {} state(s), {} symbol(s)",
            self.len(),
            self.states().len(),
            self.symbols().len()
        )?;
        for transition in &self.transitions {
            writeln!(f, "  {transition}")?;
        }
        Ok(())
    }
}
