//! # gauto-core — Foundational Types for Graph Automaton Runs
//!
//! This crate is the leaf of the gauto workspace. It defines the structure a
//! run is built over and the vocabulary every other crate speaks. It depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `NodeId`, `Symbol`, `State` and
//!    `Variable` are distinct types. A state cannot be passed where a symbol
//!    is expected.
//!
//! 2. **Structured jump labels.** A `JumpLabel` is a base identifier plus an
//!    explicit `Polarity`. Reversal flips the polarity and nothing else. The
//!    `a+` / `a-` text form exists only at I/O boundaries.
//!
//! 3. **Immutable-after-construction graph.** `Graph` is built with
//!    `add_edge` / `add_node` and then only read. Edge children are ordered
//!    and matched positionally.
//!
//! 4. **One traversal, many policies.** `forward_search` is the single
//!    frontier traversal. Each verifier supplies a per-node `Decision`
//!    function instead of re-implementing the walk.
//!
//! 5. **One failure taxonomy.** Every way a run can be rejected is a variant
//!    of `GautoError`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gauto-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Traversals never revisit a processed node, so they terminate on cyclic
//!   graphs.

pub mod error;
pub mod graph;
pub mod identity;
pub mod jump;
pub mod traversal;

// Re-export primary types for ergonomic imports.
pub use error::{GautoError, JumpLabelError};
pub use graph::{Edge, Graph};
pub use identity::{NodeId, State, Symbol, Variable};
pub use jump::{JumpLabel, Polarity};
pub use traversal::{find_path, forward_search, traversal_order, Decision, SearchOutcome};
