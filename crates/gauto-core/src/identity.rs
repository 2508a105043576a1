//! # Identifier Newtypes
//!
//! Newtype wrappers for every identifier namespace a run touches. These
//! prevent accidental confusion: you cannot pass a `State` where a `Symbol`
//! is expected, or look up a `Variable` in a node map.
//!
//! All four are opaque strings. They serialize transparently, so a document
//! lists plain strings and the type is decided by the field it appears in.

use serde::{Deserialize, Serialize};

/// Identity of a node in the graph being labelled.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

/// Edge symbol. A transition only matches an edge carrying the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

/// Automaton state assigned to a node by a run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(pub String);

/// Name introduced (`vars`) or released (`forget`) by a transition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variable(pub String);

macro_rules! impl_string_newtype {
    ($name:ident) => {
        impl $name {
            /// Create the identifier from anything string-like.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Access the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

impl_string_newtype!(NodeId);
impl_string_newtype!(Symbol);
impl_string_newtype!(State);
impl_string_newtype!(Variable);
