//! # gauto-cli — Graph Automaton Command-Line Interface
//!
//! Loads a graph and a transition table from a YAML or JSON document and
//! runs the automaton over it.
//!
//! ## Subcommands
//!
//! - `verify` — Build a run, verify it and print the verdict
//! - `root` — Report the root and every root candidate
//! - `path` — Print the shortest successor path between two nodes
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `gauto-automaton` and `gauto-core` and
//!   return the process exit code.

pub mod document;
pub mod path;
pub mod root;
pub mod verify;
