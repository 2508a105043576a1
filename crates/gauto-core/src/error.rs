//! # Error Types — Run Failure Taxonomy
//!
//! Defines the failures an automaton run can end in. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! A run is a verifier: most failures are a *verdict* about the
//! graph/automaton pair, not a transient fault. None are retried
//! automatically. The remaining kinds (`AlreadyMapped`, `Unmapped`,
//! `NoRootFound`) signal a malformed input or a construction-order bug.
//!
//! Every variant carries the node, variable, or label that triggered it.

use thiserror::Error;

use crate::identity::{NodeId, Variable};
use crate::jump::JumpLabel;

/// Top-level error type for graph automaton runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GautoError {
    /// Every node appears as a child of some edge.
    #[error("no root found: every node is a child of some edge")]
    NoRootFound,

    /// A full construction pass committed no edge while edges remained.
    #[error("run construction stalled with {pending} unprocessed edge(s); stuck parents: {stalled:?}")]
    RunConstructionFailure {
        /// Number of edges left in the worklist.
        pending: usize,
        /// Parent nodes of the stuck edges, in worklist order.
        stalled: Vec<NodeId>,
    },

    /// A second labelling was written to an already mapped node.
    #[error("node {node} has already been mapped")]
    AlreadyMapped {
        /// The node that was mapped twice.
        node: NodeId,
    },

    /// A node was looked up in a run that does not map it.
    #[error("node {node} has not been mapped")]
    Unmapped {
        /// The missing node.
        node: NodeId,
    },

    /// A variable was reintroduced at a non-leaf before being forgotten.
    #[error("variable {variable} introduced at {origin} is reintroduced at non-leaf {at} without being forgotten")]
    ConnectViolation {
        /// The offending variable.
        variable: Variable,
        /// Node that introduced it first.
        origin: NodeId,
        /// Non-leaf node that introduced it again.
        at: NodeId,
    },

    /// No node below the origin carries the reverse of a jump label.
    #[error("jump {label} at {origin} has no reachable reverse counterpart")]
    JumpUnmatchedViolation {
        /// The unmatched label.
        label: JumpLabel,
        /// Node carrying the label.
        origin: NodeId,
    },

    /// Two recorded jump pairings interleave.
    #[error("jump pair ({first_origin}, {first_target}) crosses pair ({second_origin}, {second_target}) at {shared}")]
    JumpCrossingViolation {
        /// Origin of the pair under inspection.
        first_origin: NodeId,
        /// Target of the pair under inspection.
        first_target: NodeId,
        /// Origin of the conflicting pair.
        second_origin: NodeId,
        /// Target of the conflicting pair.
        second_target: NodeId,
        /// A node lying on both connecting paths.
        shared: NodeId,
    },

    /// The backtracking search explored its whole branch budget.
    #[error("backtracking search exceeded its budget of {limit} branch(es)")]
    SearchBudgetExceeded {
        /// The configured branch limit.
        limit: usize,
    },
}

impl GautoError {
    /// Whether this error is a rejection of the graph/automaton pair.
    ///
    /// Verdicts are the outcomes a different nondeterministic choice could
    /// avoid. The remaining kinds are structural and no choice fixes them.
    pub fn is_verdict(&self) -> bool {
        matches!(
            self,
            Self::RunConstructionFailure { .. }
                | Self::ConnectViolation { .. }
                | Self::JumpUnmatchedViolation { .. }
                | Self::JumpCrossingViolation { .. }
        )
    }
}

/// Error parsing the textual `<base><+|->` form of a jump label.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JumpLabelError {
    /// The label has no base identifier before the sign.
    #[error("jump label {0:?} has an empty base")]
    EmptyBase(String),

    /// The label does not end in `+` or `-`.
    #[error("jump label {0:?} must end with '+' or '-'")]
    MissingPolarity(String),
}
