//! # Traversal Primitives
//!
//! Every graph walk used by run verification lives here:
//!
//! - [`forward_search`] — frontier traversal below a start node, driven by a
//!   per-node [`Decision`]. Shared by the connect and jump verifiers.
//! - [`find_path`] — breadth-first shortest successor path, reconstructed
//!   from recorded predecessors.
//! - [`traversal_order`] — the graph-wide visiting order of the verifier
//!   drivers.
//!
//! ## Termination
//!
//! Each walk keeps a discovered set and never enqueues a node twice. Cyclic
//! graphs are therefore safe even though runs are only built over acyclic
//! ones.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::graph::Graph;
use crate::identity::NodeId;

/// What a forward search does at a visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep going: enqueue the node's successors.
    Descend,
    /// This branch is settled: do not look past the node.
    Prune,
    /// Stop the whole search successfully at this node.
    Accept,
    /// Stop the whole search with a failure at this node.
    Reject,
}

/// How a forward search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A node returned [`Decision::Accept`].
    Accepted(NodeId),
    /// A node returned [`Decision::Reject`].
    Rejected(NodeId),
    /// Every reachable node was visited without a definitive decision.
    Exhausted,
}

/// Visit the nodes reachable below `start`, first-in first-out.
///
/// The start node itself is never visited. `decide` runs once per visited
/// node and may fail; its error aborts the search.
pub fn forward_search<E, F>(graph: &Graph, start: &NodeId, mut decide: F) -> Result<SearchOutcome, E>
where
    F: FnMut(&NodeId) -> Result<Decision, E>,
{
    let mut seen: HashSet<&NodeId> = HashSet::from([start]);
    let mut frontier: VecDeque<&NodeId> = VecDeque::new();
    enqueue(graph, start, &mut seen, &mut frontier);

    while let Some(node) = frontier.pop_front() {
        match decide(node)? {
            Decision::Descend => enqueue(graph, node, &mut seen, &mut frontier),
            Decision::Prune => {}
            Decision::Accept => return Ok(SearchOutcome::Accepted(node.clone())),
            Decision::Reject => return Ok(SearchOutcome::Rejected(node.clone())),
        }
    }

    Ok(SearchOutcome::Exhausted)
}

fn enqueue<'g>(
    graph: &'g Graph,
    node: &NodeId,
    seen: &mut HashSet<&'g NodeId>,
    frontier: &mut VecDeque<&'g NodeId>,
) {
    for succ in graph.successors(node) {
        if seen.insert(succ) {
            frontier.push_back(succ);
        }
    }
}

/// Shortest successor path from `from` to `to`, both ends included.
///
/// Returns `None` when `to` is not reachable through at least one edge.
pub fn find_path(graph: &Graph, from: &NodeId, to: &NodeId) -> Option<Vec<NodeId>> {
    let mut predecessor: HashMap<&NodeId, &NodeId> = HashMap::new();
    let mut seen: HashSet<&NodeId> = HashSet::from([from]);
    let mut frontier: VecDeque<&NodeId> = VecDeque::from([from]);
    let mut found = false;

    while let Some(node) = frontier.pop_front() {
        for succ in graph.successors(node) {
            if seen.insert(succ) {
                predecessor.insert(succ, node);
                if succ == to {
                    found = true;
                    break;
                }
                frontier.push_back(succ);
            }
        }
        if found {
            break;
        }
    }

    if !found {
        return None;
    }

    let mut path = vec![to.clone()];
    let mut current = to;
    while current != from {
        current = *predecessor.get(current)?;
        path.push(current.clone());
    }
    path.reverse();
    Some(path)
}

/// Order in which the verifiers examine nodes.
///
/// Depth-first from each root candidate, then from every node still
/// unvisited, so each registered node appears exactly once.
pub fn traversal_order(graph: &Graph) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(graph.node_count());
    let mut seen: HashSet<&NodeId> = HashSet::with_capacity(graph.node_count());
    let seeds = graph.roots().into_iter().chain(graph.nodes().iter());

    for seed in seeds {
        if !seen.insert(seed) {
            continue;
        }
        let mut stack = vec![seed];
        while let Some(node) = stack.pop() {
            order.push(node.clone());
            for succ in graph.successors(node) {
                if seen.insert(succ) {
                    stack.push(succ);
                }
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Symbol;

    fn n(s: &str) -> NodeId {
        NodeId::new(s)
    }

    fn edge(g: &mut Graph, parent: &str, children: &[&str]) {
        g.add_edge(n(parent), Symbol::new("s"), children.iter().map(|c| n(c)).collect());
    }

    /// ```text
    ///        r
    ///      /   \
    ///     a     b
    ///     |   /   \
    ///     c  d     e
    ///         \   /
    ///           f
    /// ```
    fn diamond() -> Graph {
        let mut g = Graph::new();
        edge(&mut g, "r", &["a", "b"]);
        edge(&mut g, "a", &["c"]);
        edge(&mut g, "b", &["d", "e"]);
        edge(&mut g, "d", &["f"]);
        edge(&mut g, "e", &["f"]);
        edge(&mut g, "c", &[]);
        edge(&mut g, "f", &[]);
        g
    }

    fn visit_all(graph: &Graph, start: &str) -> Vec<NodeId> {
        let mut visited = Vec::new();
        let outcome = forward_search::<(), _>(graph, &n(start), |node| {
            visited.push(node.clone());
            Ok(Decision::Descend)
        })
        .unwrap();
        assert_eq!(outcome, SearchOutcome::Exhausted);
        visited
    }

    // ── forward_search ───────────────────────────────────────────────

    #[test]
    fn search_is_breadth_first_and_excludes_start() {
        let visited = visit_all(&diamond(), "r");
        assert_eq!(visited, vec![n("a"), n("b"), n("c"), n("d"), n("e"), n("f")]);
    }

    #[test]
    fn search_visits_shared_node_once() {
        let visited = visit_all(&diamond(), "b");
        assert_eq!(visited.iter().filter(|v| **v == n("f")).count(), 1);
    }

    #[test]
    fn search_prune_stops_branch() {
        let g = diamond();
        let mut visited = Vec::new();
        forward_search::<(), _>(&g, &n("r"), |node| {
            visited.push(node.clone());
            Ok(if *node == n("b") { Decision::Prune } else { Decision::Descend })
        })
        .unwrap();
        assert_eq!(visited, vec![n("a"), n("b"), n("c")]);
    }

    #[test]
    fn search_accept_and_reject_stop_early() {
        let g = diamond();
        let accepted = forward_search::<(), _>(&g, &n("r"), |node| {
            Ok(if *node == n("d") { Decision::Accept } else { Decision::Descend })
        });
        assert_eq!(accepted, Ok(SearchOutcome::Accepted(n("d"))));

        let rejected = forward_search::<(), _>(&g, &n("r"), |node| {
            Ok(if *node == n("c") { Decision::Reject } else { Decision::Descend })
        });
        assert_eq!(rejected, Ok(SearchOutcome::Rejected(n("c"))));
    }

    #[test]
    fn search_propagates_decision_error() {
        let g = diamond();
        let result = forward_search(&g, &n("r"), |node| {
            if *node == n("e") {
                Err("boom")
            } else {
                Ok(Decision::Descend)
            }
        });
        assert_eq!(result, Err("boom"));
    }

    #[test]
    fn search_terminates_on_cycle() {
        let mut g = Graph::new();
        edge(&mut g, "x", &["y"]);
        edge(&mut g, "y", &["z"]);
        edge(&mut g, "z", &["x", "y"]);
        let visited = visit_all(&g, "x");
        assert_eq!(visited, vec![n("y"), n("z")]);
    }

    // ── find_path ────────────────────────────────────────────────────

    #[test]
    fn path_includes_both_ends() {
        let path = find_path(&diamond(), &n("r"), &n("f")).unwrap();
        assert_eq!(path, vec![n("r"), n("b"), n("d"), n("f")]);
    }

    #[test]
    fn path_to_direct_child() {
        let path = find_path(&diamond(), &n("b"), &n("e")).unwrap();
        assert_eq!(path, vec![n("b"), n("e")]);
    }

    #[test]
    fn path_absent_when_unreachable() {
        let g = diamond();
        assert_eq!(find_path(&g, &n("a"), &n("f")), None);
        assert_eq!(find_path(&g, &n("f"), &n("r")), None);
        assert_eq!(find_path(&g, &n("r"), &n("r")), None);
    }

    // ── traversal_order ──────────────────────────────────────────────

    #[test]
    fn order_covers_every_node_once() {
        let mut g = diamond();
        g.add_node(n("island"));
        let order = traversal_order(&g);
        assert_eq!(order.len(), g.node_count());
        assert_eq!(order[0], n("r"));
        let unique: HashSet<&NodeId> = order.iter().collect();
        assert_eq!(unique.len(), order.len());
    }

    #[test]
    fn order_is_depth_first() {
        let order = traversal_order(&diamond());
        // The last pushed successor of r (b) is explored before a.
        assert_eq!(order, vec![n("r"), n("b"), n("e"), n("f"), n("d"), n("a"), n("c")]);
    }

    #[test]
    fn order_reaches_nodes_on_rootless_cycle() {
        let mut g = Graph::new();
        edge(&mut g, "x", &["y"]);
        edge(&mut g, "y", &["x"]);
        assert_eq!(traversal_order(&g), vec![n("x"), n("y")]);
    }
}
