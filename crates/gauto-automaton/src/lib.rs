//! # gauto-automaton — Runs of Graph Automata
//!
//! Builds a run of a finite automaton over a [`gauto_core::Graph`] and
//! verifies the graph-wide constraints local matching cannot see.
//!
//! ## Pipeline
//!
//! - **Construction** (`construct.rs`): bottom-up labelling from the
//!   transition table. Greedy with a pluggable [`TransitionChooser`], or an
//!   exhaustive [`Backtracker`].
//!
//! - **Connect** (`verify/connect.rs`): each introduced variable is owned
//!   along every downstream path until forgotten.
//!
//! - **Jump** (`verify/jump.rs`): each jump label pairs with its reverse
//!   below it, and the recorded pairs do not cross.
//!
//! Any failure aborts the run with a [`GautoError`]. No partial run is
//! returned.
//!
//! ## Strategies
//!
//! [`RunConfig::strategy`] selects how competing transitions are resolved.
//! The default, `random`, commits a uniformly random candidate and never
//! revisits it, so it can reject a pair another choice would accept.
//! `backtracking` is complete up to its branch budget.

pub mod automaton;
pub mod choice;
pub mod config;
pub mod construct;
pub mod run;
pub mod transition;
pub mod verify;

use serde::Serialize;

use gauto_core::{GautoError, Graph};

// ─── Re-exports ─────────────────────────────────────────────────────

pub use automaton::Automaton;
pub use choice::{FirstChooser, RandomChooser, TransitionChooser};
pub use config::{ChoiceStrategy, ConfigError, RunConfig};
pub use construct::{construct_run, ensure_total, Backtracker};
pub use run::{Labelling, Run};
pub use transition::Transition;
pub use verify::{verify_run, JumpPair, Verification};

// ─── Runner ─────────────────────────────────────────────────────────

/// A verified run and what verification recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// Labelling of every graph node.
    pub run: Run,
    /// Matched jump pairs.
    pub jump_pairs: Vec<JumpPair>,
    /// Strategy that produced the run.
    pub strategy: ChoiceStrategy,
}

/// Constructs and verifies runs under a [`RunConfig`].
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    /// A runner with the given configuration.
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Build a run of `automaton` over `graph` and verify it.
    pub fn run(&self, automaton: &Automaton, graph: &Graph) -> Result<RunOutcome, GautoError> {
        let strategy = self.config.strategy;
        let (run, verification) = match strategy {
            ChoiceStrategy::Random => {
                greedy(automaton, graph, &mut RandomChooser::new(self.config.seed))?
            }
            ChoiceStrategy::First => greedy(automaton, graph, &mut FirstChooser)?,
            ChoiceStrategy::Backtracking => {
                let mut search = Backtracker::new(automaton, graph, self.config.backtrack_limit);
                let found = search.search();
                tracing::debug!(
                    branches = search.explored(),
                    limit = self.config.backtrack_limit,
                    "backtracking search finished"
                );
                found?
            }
        };

        tracing::info!(
            %strategy,
            nodes = run.len(),
            jump_pairs = verification.jump_pairs.len(),
            variables = verification.variables.len(),
            "run accepted"
        );
        Ok(RunOutcome {
            run,
            jump_pairs: verification.jump_pairs,
            strategy,
        })
    }
}

fn greedy<C: TransitionChooser>(
    automaton: &Automaton,
    graph: &Graph,
    chooser: &mut C,
) -> Result<(Run, Verification), GautoError> {
    let run = construct_run(automaton, graph, chooser)?;
    let verification = verify_run(graph, &run)?;
    Ok((run, verification))
}

/// Build and verify a run with the default configuration.
///
/// Returns a run mapping every graph node, or the first failure.
pub fn automaton_run(automaton: &Automaton, graph: &Graph) -> Result<Run, GautoError> {
    Runner::default().run(automaton, graph).map(|outcome| outcome.run)
}
