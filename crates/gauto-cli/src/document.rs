//! # Input Documents
//!
//! A document carries a graph and the transition table to run over it:
//!
//! ```yaml
//! graph:
//!   nodes: [island]            # optional, isolated nodes
//!   edges:
//!     - { parent: root, symbol: g, children: [left, right] }
//!     - { parent: left, symbol: l }
//!     - { parent: right, symbol: r }
//! automaton:
//!   transitions:
//!     - { parent: pl, symbol: l }
//!     - { parent: pr, symbol: r, jumps: [a-] }
//!     - { parent: top, symbol: g, children: [pl, pr], jumps: [a+] }
//! ```
//!
//! Files ending in `.json` are read as JSON, everything else as YAML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use gauto_automaton::Automaton;
use gauto_core::{Edge, Graph, NodeId};

/// A graph and automaton loaded from disk.
#[derive(Debug, Clone)]
pub struct Document {
    /// The graph to label.
    pub graph: Graph,
    /// The transition table.
    pub automaton: Automaton,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentFile {
    graph: GraphFile,
    #[serde(default)]
    automaton: Automaton,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphFile {
    #[serde(default)]
    nodes: Vec<NodeId>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl GraphFile {
    fn into_graph(self) -> Graph {
        let mut graph = Graph::new();
        for node in self.nodes {
            graph.add_node(node);
        }
        for edge in self.edges {
            graph.add_edge(edge.parent, edge.symbol, edge.children);
        }
        graph
    }
}

/// Serialization of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML (also accepts JSON).
    Yaml,
    /// Strict JSON.
    Json,
}

impl DocumentFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Parse a document from text.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Document> {
    let file: DocumentFile = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(text).context("invalid YAML document")?,
        DocumentFormat::Json => serde_json::from_str(text).context("invalid JSON document")?,
    };
    Ok(Document {
        graph: file.graph.into_graph(),
        automaton: file.automaton,
    })
}

/// Read and parse a document file.
pub fn load_document(path: &Path) -> Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document: {}", path.display()))?;
    let document = parse_document(&text, DocumentFormat::from_path(path))
        .with_context(|| format!("failed to parse document: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        nodes = document.graph.node_count(),
        edges = document.graph.edge_count(),
        transitions = document.automaton.len(),
        "document loaded"
    );
    Ok(document)
}

/// Look up a node the user named on the command line.
pub fn require_node(graph: &Graph, name: &str) -> Result<NodeId> {
    let node = NodeId::new(name);
    anyhow::ensure!(graph.contains(&node), "node {name} is not in the graph");
    Ok(node)
}
