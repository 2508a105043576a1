//! # Connect Verification
//!
//! An introduced variable is owned along every downstream path until it is
//! forgotten. A forward search runs from each introducing node:
//!
//! | Visited node                              | Decision  |
//! |-------------------------------------------|-----------|
//! | forgets the variable                      | `Prune`   |
//! | introduces it again and is not a leaf     | `Reject`  |
//! | anything else                             | `Descend` |
//!
//! Exhausting the search without a rejection means the variable connects.
//! Each variable is checked once: the set of processed variables is
//! threaded through the driver as an explicit accumulator.

use std::collections::BTreeSet;

use gauto_core::{
    forward_search, traversal_order, Decision, GautoError, Graph, NodeId, SearchOutcome, Variable,
};

use crate::run::Run;

/// Check every variable introduced anywhere in `run`.
///
/// Nodes are examined in [`traversal_order`]. Returns the set of variables
/// that were verified.
pub fn verify_connects(graph: &Graph, run: &Run) -> Result<BTreeSet<Variable>, GautoError> {
    let mut processed = BTreeSet::new();
    for node in traversal_order(graph) {
        verify_node_connects(graph, run, &node, &mut processed)?;
    }
    Ok(processed)
}

/// Check the variables `origin` introduces that are not yet in `processed`,
/// adding each one once it is verified.
pub fn verify_node_connects(
    graph: &Graph,
    run: &Run,
    origin: &NodeId,
    processed: &mut BTreeSet<Variable>,
) -> Result<(), GautoError> {
    for variable in &run.at(origin)?.vars {
        if processed.contains(variable) {
            continue;
        }

        let outcome = forward_search(graph, origin, |node| decide(graph, run, node, variable))?;
        if let SearchOutcome::Rejected(at) = outcome {
            return Err(GautoError::ConnectViolation {
                variable: variable.clone(),
                origin: origin.clone(),
                at,
            });
        }

        tracing::debug!(variable = %variable, origin = %origin, "variable connects");
        processed.insert(variable.clone());
    }
    Ok(())
}

fn decide(graph: &Graph, run: &Run, node: &NodeId, variable: &Variable) -> Result<Decision, GautoError> {
    let labelling = run.at(node)?;
    if labelling.forget.contains(variable) {
        return Ok(Decision::Prune);
    }
    if labelling.vars.contains(variable) && graph.has_nonempty_edge(node) {
        return Ok(Decision::Reject);
    }
    Ok(Decision::Descend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::Labelling;
    use gauto_core::{State, Symbol};

    fn n(s: &str) -> NodeId {
        NodeId::new(s)
    }

    fn x() -> Variable {
        Variable::new("x")
    }

    /// root -> a -> b -> leaf, plus a leaf edge on `leaf`.
    fn chain() -> Graph {
        let mut graph = Graph::new();
        graph.add_edge(n("root"), Symbol::new("f"), vec![n("a")]);
        graph.add_edge(n("a"), Symbol::new("f"), vec![n("b")]);
        graph.add_edge(n("b"), Symbol::new("f"), vec![n("leaf")]);
        graph.add_edge(n("leaf"), Symbol::new("e"), vec![]);
        graph
    }

    fn run(annotate: &[(&str, &[Variable], &[Variable])]) -> Run {
        let mut run = Run::new();
        for node in ["root", "a", "b", "leaf"] {
            let mut labelling = Labelling::bare(State::new("q"));
            if let Some((_, vars, forget)) = annotate.iter().find(|(name, _, _)| *name == node) {
                labelling.vars.extend(vars.iter().cloned());
                labelling.forget.extend(forget.iter().cloned());
            }
            run.map(n(node), labelling).unwrap();
        }
        run
    }

    // ── violations ──────────────────────────────────────────────────

    #[test]
    fn reintroduction_at_non_leaf_fails() {
        let graph = chain();
        let run = run(&[("root", &[x()], &[]), ("b", &[x()], &[])]);
        let err = verify_connects(&graph, &run).unwrap_err();
        assert_eq!(
            err,
            GautoError::ConnectViolation {
                variable: x(),
                origin: n("root"),
                at: n("b"),
            }
        );
    }

    // ── acceptance ──────────────────────────────────────────────────

    #[test]
    fn forget_before_reintroduction_prunes_the_branch() {
        let graph = chain();
        let run = run(&[("root", &[x()], &[]), ("a", &[], &[x()]), ("b", &[x()], &[])]);
        let verified = verify_connects(&graph, &run).unwrap();
        assert!(verified.contains(&x()));
    }

    #[test]
    fn reintroduction_at_leaf_is_consumption() {
        let graph = chain();
        let run = run(&[("root", &[x()], &[]), ("leaf", &[x()], &[])]);
        assert!(verify_connects(&graph, &run).is_ok());
    }

    #[test]
    fn no_variables_verifies_nothing() {
        let graph = chain();
        assert!(verify_connects(&graph, &run(&[])).unwrap().is_empty());
    }

    // ── accumulator ─────────────────────────────────────────────────

    #[test]
    fn processed_variables_are_skipped() {
        let graph = chain();
        let run = run(&[("root", &[x()], &[]), ("b", &[x()], &[])]);
        let mut processed = BTreeSet::from([x()]);
        verify_node_connects(&graph, &run, &n("root"), &mut processed).unwrap();
        assert_eq!(processed.len(), 1);
    }

    #[test]
    fn unmapped_node_is_reported() {
        let graph = chain();
        let mut partial = Run::new();
        let mut labelling = Labelling::bare(State::new("q"));
        labelling.vars.insert(x());
        partial.map(n("root"), labelling).unwrap();
        let err = verify_node_connects(&graph, &partial, &n("root"), &mut BTreeSet::new()).unwrap_err();
        assert_eq!(err, GautoError::Unmapped { node: n("a") });
    }
}
