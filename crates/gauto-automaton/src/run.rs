//! # Run — Write-Once Node Labelling
//!
//! A run maps nodes to the labelling a transition projected onto them:
//! a state plus the variables introduced, the variables forgotten, and the
//! jump labels emitted.
//!
//! ## Invariant
//!
//! A node, once mapped, is never remapped. `map` rejects a second write even
//! when the payload is identical. Looking up an unmapped node is an error,
//! not a default. Inside this crate the backtracking search may retract a
//! node it mapped itself; nothing outside can.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use gauto_core::{GautoError, JumpLabel, NodeId, State, Variable};

/// Payload attached to a node by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labelling {
    /// Automaton state.
    pub state: State,
    /// Variables introduced at the node.
    pub vars: BTreeSet<Variable>,
    /// Variables released at the node.
    pub forget: BTreeSet<Variable>,
    /// Jump labels emitted at the node.
    pub jumps: BTreeSet<JumpLabel>,
}

impl Labelling {
    /// A labelling with a state and no annotations.
    pub fn bare(state: State) -> Self {
        Self {
            state,
            vars: BTreeSet::new(),
            forget: BTreeSet::new(),
            jumps: BTreeSet::new(),
        }
    }
}

impl std::fmt::Display for Labelling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join<T: std::fmt::Display>(items: &BTreeSet<T>) -> String {
            items.iter().map(T::to_string).collect::<Vec<_>>().join(", ")
        }
        write!(
            f,
            "{} vars {{{}}} forget {{{}}} jumps {{{}}}",
            self.state,
            join(&self.vars),
            join(&self.forget),
            join(&self.jumps)
        )
    }
}

/// Partial, write-once mapping from node to labelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Run {
    mapping: BTreeMap<NodeId, Labelling>,
}

impl Run {
    /// Create an empty run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `labelling` to `node`.
    ///
    /// # Errors
    ///
    /// `AlreadyMapped` if the node already carries a labelling.
    pub fn map(&mut self, node: NodeId, labelling: Labelling) -> Result<(), GautoError> {
        if self.mapping.contains_key(&node) {
            return Err(GautoError::AlreadyMapped { node });
        }
        self.mapping.insert(node, labelling);
        Ok(())
    }

    /// Drop the labelling of `node`. Only the backtracking search undoes
    /// its own commits this way.
    pub(crate) fn retract(&mut self, node: &NodeId) -> Option<Labelling> {
        self.mapping.remove(node)
    }

    /// The labelling of `node`.
    ///
    /// # Errors
    ///
    /// `Unmapped` if the node carries no labelling.
    pub fn at(&self, node: &NodeId) -> Result<&Labelling, GautoError> {
        self.mapping
            .get(node)
            .ok_or_else(|| GautoError::Unmapped { node: node.clone() })
    }

    /// The state of `node`, failing if it is unmapped.
    pub fn get_state(&self, node: &NodeId) -> Result<&State, GautoError> {
        self.at(node).map(|labelling| &labelling.state)
    }

    /// The state of `node`, or `None` while it is unmapped.
    pub fn state(&self, node: &NodeId) -> Option<&State> {
        self.mapping.get(node).map(|labelling| &labelling.state)
    }

    /// Whether `node` is mapped.
    pub fn contains(&self, node: &NodeId) -> bool {
        self.mapping.contains_key(node)
    }

    /// Number of mapped nodes.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Whether no node is mapped.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Mapped nodes and their labellings, ordered by node.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Labelling)> {
        self.mapping.iter()
    }
}

impl std::fmt::Display for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (node, labelling) in &self.mapping {
            writeln!(f, "{node} -> {labelling}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> NodeId {
        NodeId::new(s)
    }

    #[test]
    fn map_then_lookup() {
        let mut run = Run::new();
        assert!(run.is_empty());
        run.map(n("a"), Labelling::bare(State::new("q"))).unwrap();
        assert!(run.contains(&n("a")));
        assert_eq!(run.len(), 1);
        assert_eq!(run.get_state(&n("a")).unwrap(), &State::new("q"));
        assert_eq!(run.state(&n("a")), Some(&State::new("q")));
    }

    #[test]
    fn map_is_write_once_even_for_equal_payload() {
        let mut run = Run::new();
        run.map(n("a"), Labelling::bare(State::new("q"))).unwrap();
        let err = run.map(n("a"), Labelling::bare(State::new("q"))).unwrap_err();
        assert_eq!(err, GautoError::AlreadyMapped { node: n("a") });
        // The first labelling survives.
        assert_eq!(run.get_state(&n("a")).unwrap(), &State::new("q"));
    }

    #[test]
    fn retract_frees_the_node_for_a_new_write() {
        let mut run = Run::new();
        run.map(n("a"), Labelling::bare(State::new("q"))).unwrap();
        assert_eq!(run.retract(&n("a")).map(|l| l.state), Some(State::new("q")));
        assert!(run.is_empty());
        assert_eq!(run.retract(&n("a")), None);
        run.map(n("a"), Labelling::bare(State::new("p"))).unwrap();
        assert_eq!(run.state(&n("a")), Some(&State::new("p")));
    }

    #[test]
    fn lookup_of_unmapped_node_fails() {
        let run = Run::new();
        assert_eq!(run.at(&n("x")), Err(GautoError::Unmapped { node: n("x") }));
        assert_eq!(run.get_state(&n("x")), Err(GautoError::Unmapped { node: n("x") }));
        assert_eq!(run.state(&n("x")), None);
    }

    #[test]
    fn display_lists_every_node() {
        let mut run = Run::new();
        let mut labelling = Labelling::bare(State::new("q1"));
        labelling.vars.insert(Variable::new("x"));
        labelling.jumps.insert(JumpLabel::plus("a"));
        run.map(n("mid"), labelling).unwrap();
        run.map(n("leaf"), Labelling::bare(State::new("q0"))).unwrap();
        let text = run.to_string();
        assert!(text.contains("leaf -> q0 vars {} forget {} jumps {}"));
        assert!(text.contains("mid -> q1 vars {x} forget {} jumps {a+}"));
    }

    #[test]
    fn serializes_as_node_map() {
        let mut run = Run::new();
        run.map(n("leaf"), Labelling::bare(State::new("q0"))).unwrap();
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["leaf"]["state"], "q0");
        assert!(json["leaf"]["jumps"].as_array().unwrap().is_empty());
    }
}
