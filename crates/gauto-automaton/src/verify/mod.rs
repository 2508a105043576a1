//! # Run Verification
//!
//! Local transition matching cannot see graph-wide constraints. Two passes
//! run over a complete run after construction:
//!
//! 1. [`connect`]: each introduced variable is owned until forgotten.
//! 2. [`jump`]: each jump label pairs with its reverse below it, and the
//!    recorded pairs do not cross.
//!
//! Both passes visit nodes in [`gauto_core::traversal_order`] and thread
//! their processed sets explicitly, so each can be run on its own.

pub mod connect;
pub mod jump;

use std::collections::BTreeSet;

use gauto_core::{GautoError, Graph, Variable};

use crate::run::Run;

pub use connect::{verify_connects, verify_node_connects};
pub use jump::{check_crossings, match_node_jumps, verify_jumps, JumpPair};

/// What a successful verification established.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verification {
    /// Variables whose ownership was checked.
    pub variables: BTreeSet<Variable>,
    /// Matched jump pairs, in discovery order.
    pub jump_pairs: Vec<JumpPair>,
}

/// Run both passes over a complete run.
///
/// # Errors
///
/// `NoRootFound` for a rootless graph, `Unmapped` if the run misses a node
/// reached by either pass, otherwise the first connect or jump violation.
pub fn verify_run(graph: &Graph, run: &Run) -> Result<Verification, GautoError> {
    graph.root()?;
    let variables = verify_connects(graph, run)?;
    let jump_pairs = verify_jumps(graph, run)?;
    Ok(Verification {
        variables,
        jump_pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::Labelling;
    use gauto_core::{JumpLabel, NodeId, State, Symbol};

    #[test]
    fn rootless_graph_is_rejected_before_any_pass() {
        let mut graph = Graph::new();
        graph.add_edge(NodeId::new("a"), Symbol::new("f"), vec![NodeId::new("b")]);
        graph.add_edge(NodeId::new("b"), Symbol::new("f"), vec![NodeId::new("a")]);
        assert_eq!(verify_run(&graph, &Run::new()), Err(GautoError::NoRootFound));
    }

    #[test]
    fn connect_pass_runs_before_jump_pass() {
        let mut graph = Graph::new();
        graph.add_edge(NodeId::new("r"), Symbol::new("f"), vec![NodeId::new("m")]);
        graph.add_edge(NodeId::new("m"), Symbol::new("f"), vec![NodeId::new("l")]);

        let x = Variable::new("x");
        let mut run = Run::new();
        let mut root = Labelling::bare(State::new("q"));
        root.vars.insert(x.clone());
        root.jumps.insert(JumpLabel::plus("unmatched"));
        let mut mid = Labelling::bare(State::new("q"));
        mid.vars.insert(x);
        run.map(NodeId::new("r"), root).unwrap();
        run.map(NodeId::new("m"), mid).unwrap();
        run.map(NodeId::new("l"), Labelling::bare(State::new("q"))).unwrap();

        assert!(matches!(
            verify_run(&graph, &run),
            Err(GautoError::ConnectViolation { .. })
        ));
    }

    #[test]
    fn summary_of_a_clean_run() {
        let mut graph = Graph::new();
        graph.add_edge(NodeId::new("r"), Symbol::new("f"), vec![NodeId::new("l")]);
        let mut run = Run::new();
        let mut root = Labelling::bare(State::new("q"));
        root.jumps.insert(JumpLabel::plus("a"));
        root.vars.insert(Variable::new("x"));
        let mut leaf = Labelling::bare(State::new("q"));
        leaf.jumps.insert(JumpLabel::minus("a"));
        run.map(NodeId::new("r"), root).unwrap();
        run.map(NodeId::new("l"), leaf).unwrap();

        let verification = verify_run(&graph, &run).unwrap();
        assert_eq!(verification.variables.len(), 1);
        assert_eq!(verification.jump_pairs.len(), 1);
    }
}
