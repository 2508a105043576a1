//! # Transitions
//!
//! A transition labels the parent of an edge once every child already holds
//! the state the transition expects at its position. It also carries the
//! annotations the parent receives: variables introduced, variables
//! forgotten and jump labels emitted.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use gauto_core::{Edge, JumpLabel, State, Symbol, Variable};

use crate::run::{Labelling, Run};

/// One row of the transition table. Immutable once added to an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transition {
    /// State assigned to the edge's parent.
    pub parent: State,
    /// Symbol the edge must carry.
    pub symbol: Symbol,
    /// Expected child states, positionally.
    #[serde(default)]
    pub children: Vec<State>,
    /// Variables introduced at the parent.
    #[serde(default)]
    pub vars: BTreeSet<Variable>,
    /// Variables released at the parent.
    #[serde(default)]
    pub forget: BTreeSet<Variable>,
    /// Jump labels emitted at the parent.
    #[serde(default)]
    pub jumps: BTreeSet<JumpLabel>,
}

impl Transition {
    /// A transition with no annotations.
    pub fn new(parent: State, symbol: Symbol, children: Vec<State>) -> Self {
        Self {
            parent,
            symbol,
            children,
            vars: BTreeSet::new(),
            forget: BTreeSet::new(),
            jumps: BTreeSet::new(),
        }
    }

    /// Add introduced variables.
    pub fn with_vars(mut self, vars: impl IntoIterator<Item = Variable>) -> Self {
        self.vars.extend(vars);
        self
    }

    /// Add forgotten variables.
    pub fn with_forget(mut self, forget: impl IntoIterator<Item = Variable>) -> Self {
        self.forget.extend(forget);
        self
    }

    /// Add emitted jump labels.
    pub fn with_jumps(mut self, jumps: impl IntoIterator<Item = JumpLabel>) -> Self {
        self.jumps.extend(jumps);
        self
    }

    /// Whether the transition applies to `edge` under the current `run`.
    ///
    /// Symbol and arity must agree, and every child must already be mapped
    /// to the expected state. An unmapped child never matches, which forces
    /// bottom-up construction.
    pub fn matches(&self, edge: &Edge, run: &Run) -> bool {
        self.symbol == edge.symbol
            && self.children.len() == edge.children.len()
            && edge
                .children
                .iter()
                .zip(&self.children)
                .all(|(child, expected)| run.state(child) == Some(expected))
    }

    /// Project the transition onto the labelling its parent receives.
    pub fn labelling(&self) -> Labelling {
        Labelling {
            state: self.parent.clone(),
            vars: self.vars.clone(),
            forget: self.forget.clone(),
            jumps: self.jumps.clone(),
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let children: Vec<&str> = self.children.iter().map(State::as_str).collect();
        write!(f, "{}({}) -> {}", self.symbol, children.join(", "), self.parent)
    }
}
