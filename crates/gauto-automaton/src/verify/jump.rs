//! # Jump Verification and Crossing Check
//!
//! Every jump label must pair with its reverse somewhere below the node
//! that emits it. Matching is a forward search that accepts the first node
//! carrying the reversed label which is not already an end of a recorded
//! pair. Once a label is matched, the label and its reverse are both marked
//! processed and never searched for again.
//!
//! ## Crossing
//!
//! Recorded pairs behave like brackets: two pairs whose labels are related
//! through a shared label must not interleave. For each pair `(a, b)` the
//! check takes every other pair with one end carrying a label `a` carries
//! and the other end carrying its reverse. If the shortest path `a → b` and
//! the shortest path of that pair share a node, the pairs cross.

use std::collections::BTreeSet;

use serde::Serialize;

use gauto_core::{
    find_path, forward_search, traversal_order, Decision, GautoError, Graph, JumpLabel, NodeId,
    SearchOutcome,
};

use crate::run::Run;

/// A jump label matched to its reverse below the emitting node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpPair {
    /// Node emitting `label`.
    pub origin: NodeId,
    /// Node below `origin` emitting the reverse of `label`.
    pub target: NodeId,
    /// The label searched for from `origin`.
    pub label: JumpLabel,
}

impl JumpPair {
    /// Whether `node` is either end of the pair.
    pub fn involves(&self, node: &NodeId) -> bool {
        self.origin == *node || self.target == *node
    }

    /// The end opposite `node`, or `None` if `node` is not an end.
    pub fn other_end(&self, node: &NodeId) -> Option<&NodeId> {
        if self.origin == *node {
            Some(&self.target)
        } else if self.target == *node {
            Some(&self.origin)
        } else {
            None
        }
    }
}

impl std::fmt::Display for JumpPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ~ {} {}", self.origin, self.label, self.label.reversed(), self.target)
    }
}

/// Match every jump label in `run`, then check the pairs for crossings.
pub fn verify_jumps(graph: &Graph, run: &Run) -> Result<Vec<JumpPair>, GautoError> {
    let mut processed = BTreeSet::new();
    let mut pairs = Vec::new();
    for node in traversal_order(graph) {
        match_node_jumps(graph, run, &node, &mut processed, &mut pairs)?;
    }
    check_crossings(graph, run, &pairs)?;
    Ok(pairs)
}

/// Match the unprocessed labels of `origin`, appending one pair per label.
pub fn match_node_jumps(
    graph: &Graph,
    run: &Run,
    origin: &NodeId,
    processed: &mut BTreeSet<JumpLabel>,
    pairs: &mut Vec<JumpPair>,
) -> Result<(), GautoError> {
    for label in &run.at(origin)?.jumps {
        if processed.contains(label) {
            continue;
        }

        let wanted = label.reversed();
        let recorded = pairs.as_slice();
        let outcome = forward_search(graph, origin, |node| decide(run, node, &wanted, recorded))?;
        let SearchOutcome::Accepted(target) = outcome else {
            return Err(GautoError::JumpUnmatchedViolation {
                label: label.clone(),
                origin: origin.clone(),
            });
        };

        tracing::debug!(label = %label, origin = %origin, target = %target, "jump matched");
        pairs.push(JumpPair {
            origin: origin.clone(),
            target,
            label: label.clone(),
        });
        processed.insert(label.clone());
        processed.insert(wanted);
    }
    Ok(())
}

fn decide(run: &Run, node: &NodeId, wanted: &JumpLabel, recorded: &[JumpPair]) -> Result<Decision, GautoError> {
    let labelling = run.at(node)?;
    if labelling.jumps.contains(wanted) && !recorded.iter().any(|pair| pair.involves(node)) {
        return Ok(Decision::Accept);
    }
    Ok(Decision::Descend)
}

/// Fail if two recorded pairs related through a shared label interleave.
pub fn check_crossings(graph: &Graph, run: &Run, pairs: &[JumpPair]) -> Result<(), GautoError> {
    for (index, pair) in pairs.iter().enumerate() {
        let path = path_nodes(graph, &pair.origin, &pair.target);
        let origin_jumps = &run.at(&pair.origin)?.jumps;
        let target_jumps = &run.at(&pair.target)?.jumps;

        for label in origin_jumps
            .iter()
            .filter(|j| target_jumps.iter().any(|t| t.is_reverse_of(j)))
        {
            for node in graph.nodes() {
                if !run.at(node)?.jumps.contains(label) {
                    continue;
                }
                for (other_index, other) in pairs.iter().enumerate() {
                    if other_index == index {
                        continue;
                    }
                    let Some(far) = other.other_end(node) else {
                        continue;
                    };
                    if !run.at(far)?.jumps.iter().any(|k| k.is_reverse_of(label)) {
                        continue;
                    }
                    let other_path = path_nodes(graph, &other.origin, &other.target);
                    if let Some(shared) = path.iter().find(|n| other_path.contains(*n)) {
                        return Err(GautoError::JumpCrossingViolation {
                            first_origin: pair.origin.clone(),
                            first_target: pair.target.clone(),
                            second_origin: other.origin.clone(),
                            second_target: other.target.clone(),
                            shared: (*shared).clone(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

/// Nodes on the shortest path, or none when there is no path.
fn path_nodes(graph: &Graph, from: &NodeId, to: &NodeId) -> Vec<NodeId> {
    find_path(graph, from, to).unwrap_or_default()
}
