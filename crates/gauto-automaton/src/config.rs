//! # Run Configuration
//!
//! Selects how the run constructor resolves competing transitions.
//!
//! ```yaml
//! strategy: backtracking   # random | first | backtracking
//! seed: 42                 # optional, random strategy only
//! backtrack_limit: 10000
//! ```
//!
//! Every field is optional; missing fields take the defaults of
//! [`RunConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default branch budget of the backtracking strategy.
pub const DEFAULT_BACKTRACK_LIMIT: usize = 10_000;

/// How competing transitions are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceStrategy {
    /// Uniform random pick, committed without backtracking.
    ///
    /// Sound but incomplete: an unlucky pick can strand construction even
    /// though another choice would succeed.
    #[default]
    Random,
    /// First applicable transition in table order, without backtracking.
    First,
    /// Depth-first search over every candidate, retracting on stall and on
    /// verification failure. Complete up to `backtrack_limit`.
    Backtracking,
}

impl ChoiceStrategy {
    /// Lowercase name, as written in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::First => "first",
            Self::Backtracking => "backtracking",
        }
    }
}

impl std::fmt::Display for ChoiceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration of a [`crate::Runner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Transition choice strategy.
    pub strategy: ChoiceStrategy,
    /// RNG seed for the random strategy. Entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Maximum number of search branches the backtracking strategy explores.
    pub backtrack_limit: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: ChoiceStrategy::default(),
            seed: None,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
        }
    }
}

/// Errors loading a [`RunConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML is malformed or names an unknown field.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl RunConfig {
    /// Parse a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Same configuration with another strategy.
    pub fn with_strategy(mut self, strategy: ChoiceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Same configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
