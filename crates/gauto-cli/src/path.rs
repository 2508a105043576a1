//! # Path — Shortest successor path between two nodes.
//!
//! ```bash
//! gauto path graph.yaml --from root --to right
//! ```
//!
//! Exits with `2` when the target is not reachable from the source.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use gauto_core::{find_path, NodeId};

use crate::document::{load_document, require_node};
use crate::verify::EXIT_REJECTED;

/// Arguments of `gauto path`.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Document holding the graph (YAML or JSON).
    pub document: PathBuf,

    /// Node the path starts at.
    #[arg(long)]
    pub from: String,

    /// Node the path ends at.
    #[arg(long)]
    pub to: String,
}

/// Execute `gauto path`.
pub fn run_path(args: &PathArgs) -> Result<u8> {
    let document = load_document(&args.document)?;
    let from = require_node(&document.graph, &args.from)?;
    let to = require_node(&document.graph, &args.to)?;

    match find_path(&document.graph, &from, &to) {
        Some(path) => {
            println!("{}", render_path(&path));
            Ok(0)
        }
        None => {
            println!("no path from {from} to {to}");
            Ok(EXIT_REJECTED)
        }
    }
}

fn render_path(path: &[NodeId]) -> String {
    path.iter().map(NodeId::as_str).collect::<Vec<_>>().join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::fixtures;

    fn args(file: &tempfile::NamedTempFile, from: &str, to: &str) -> PathArgs {
        PathArgs {
            document: file.path().to_path_buf(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn reachable_target_exits_zero() {
        let file = fixtures::write(fixtures::JUMP_PAIR_YAML, ".yaml");
        assert_eq!(run_path(&args(&file, "root", "right")).unwrap(), 0);
    }

    #[test]
    fn unreachable_target_exits_two() {
        let file = fixtures::write(fixtures::JUMP_PAIR_YAML, ".yaml");
        assert_eq!(run_path(&args(&file, "left", "right")).unwrap(), EXIT_REJECTED);
    }

    #[test]
    fn unknown_node_is_an_error() {
        let file = fixtures::write(fixtures::JUMP_PAIR_YAML, ".yaml");
        assert!(run_path(&args(&file, "root", "nowhere")).is_err());
    }

    #[test]
    fn path_renders_with_arrows() {
        let path = vec![NodeId::new("a"), NodeId::new("b"), NodeId::new("c")];
        assert_eq!(render_path(&path), "a -> b -> c");
    }
}
