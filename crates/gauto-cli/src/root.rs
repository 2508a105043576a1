//! # Root — Report the root of a graph.
//!
//! ```bash
//! gauto root graph.yaml
//! ```
//!
//! Prints the node runs are anchored at. When several nodes are never a
//! child, every candidate is listed and the first one is used.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gauto_core::Graph;

use crate::document::load_document;

/// Arguments of `gauto root`.
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Document holding the graph (YAML or JSON).
    pub document: PathBuf,
}

/// Execute `gauto root`.
pub fn run_root(args: &RootArgs) -> Result<u8> {
    let document = load_document(&args.document)?;
    print!("{}", render_root(&document.graph)?);
    Ok(0)
}

fn render_root(graph: &Graph) -> Result<String> {
    let root = graph.root().context("graph has no root")?;
    let mut out = format!("root: {root}\n");
    let candidates = graph.roots();
    if candidates.len() > 1 {
        let names: Vec<&str> = candidates.iter().map(|node| node.as_str()).collect();
        out.push_str(&format!("candidates: {}\n", names.join(", ")));
    }
    Ok(out)
}
