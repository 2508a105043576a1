//! # Graph — Rooted Edge Structure
//!
//! The structure a run labels: a set of nodes and a list of edges, each
//! edge carrying a parent, a symbol, and an ordered list of children.
//!
//! ## Invariants
//!
//! - Children order is significant. It is matched positionally against a
//!   transition's child-state pattern.
//! - Nodes may be shared as children of several edges (a DAG, not a tree).
//! - Exactly one node should never appear as a child: the root. Absence is
//!   an error; ambiguity is tolerated and the first candidate in insertion
//!   order wins (see [`Graph::root`]).
//!
//! Node insertion order is preserved so that every traversal is
//! reproducible.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::GautoError;
use crate::identity::{NodeId, Symbol};

/// A labelled edge from a parent to an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The node this edge hangs from.
    pub parent: NodeId,
    /// Symbol matched against transition symbols.
    pub symbol: Symbol,
    /// Ordered children. May be empty (a leaf edge).
    #[serde(default)]
    pub children: Vec<NodeId>,
}

impl Edge {
    /// Create an edge.
    pub fn new(parent: NodeId, symbol: Symbol, children: Vec<NodeId>) -> Self {
        Self {
            parent,
            symbol,
            children,
        }
    }

    /// Whether the edge has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Rooted graph of nodes and ordered-child edges.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeId>,
    node_set: HashSet<NodeId>,
    edges: Vec<Edge>,
    /// Edge indices keyed by parent, in insertion order.
    out_edges: HashMap<NodeId, Vec<usize>>,
    /// Every node that appears in some child list.
    child_set: HashSet<NodeId>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `parent` and every child as nodes and append the edge.
    pub fn add_edge(&mut self, parent: NodeId, symbol: Symbol, children: Vec<NodeId>) {
        self.add_node(parent.clone());
        for child in &children {
            self.add_node(child.clone());
            self.child_set.insert(child.clone());
        }
        self.out_edges
            .entry(parent.clone())
            .or_default()
            .push(self.edges.len());
        self.edges.push(Edge::new(parent, symbol, children));
    }

    /// Register an isolated node. Registering a known node is a no-op.
    pub fn add_node(&mut self, node: NodeId) {
        if self.node_set.insert(node.clone()) {
            self.nodes.push(node);
        }
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether `node` is registered.
    pub fn contains(&self, node: &NodeId) -> bool {
        self.node_set.contains(node)
    }

    /// Edges whose parent is `node`, in insertion order.
    pub fn edges_from<'a>(&'a self, node: &NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.out_edges
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.edges[idx])
    }

    /// Concatenated children of every edge whose parent is `node`.
    ///
    /// Edge order first, then child order. A child shared by two edges is
    /// listed twice.
    pub fn successors<'a>(&'a self, node: &NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.edges_from(node).flat_map(|edge| edge.children.iter())
    }

    /// Whether `node` has at least one outgoing edge with children.
    ///
    /// A node without such an edge counts as a leaf.
    pub fn has_nonempty_edge(&self, node: &NodeId) -> bool {
        self.edges_from(node).any(|edge| !edge.is_leaf())
    }

    /// Every node that never appears as a child, in insertion order.
    pub fn roots(&self) -> Vec<&NodeId> {
        self.nodes
            .iter()
            .filter(|node| !self.child_set.contains(*node))
            .collect()
    }

    /// The node absent from every child list.
    ///
    /// When several nodes qualify, the first in insertion order is returned
    /// and a warning is logged.
    pub fn root(&self) -> Result<&NodeId, GautoError> {
        let roots = self.roots();
        match roots.as_slice() {
            [] => Err(GautoError::NoRootFound),
            [root] => Ok(*root),
            [first, ..] => {
                tracing::warn!(
                    root = %first,
                    candidates = roots.len(),
                    "graph has several root candidates; using the first"
                );
                Ok(*first)
            }
        }
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "nodes: {}", self.nodes.len())?;
        for edge in &self.edges {
            let children: Vec<&str> = edge.children.iter().map(NodeId::as_str).collect();
            writeln!(f, "{} --{}--> [{}]", edge.parent, edge.symbol, children.join(", "))?;
        }
        Ok(())
    }
}
