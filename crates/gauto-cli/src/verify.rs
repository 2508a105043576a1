//! # Verify — Build and verify a run.
//!
//! ```bash
//! gauto verify graph.yaml
//! gauto verify graph.yaml --strategy backtracking --format json
//! gauto --config run.yaml verify graph.json --seed 42
//! ```
//!
//! Exit code `0` means the automaton accepts the graph, `2` means it
//! rejects it. Unreadable input and structural failures exit with `1`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use gauto_automaton::{ChoiceStrategy, RunConfig, RunOutcome, Runner};

use crate::document::load_document;

/// Exit code of a rejected graph.
pub const EXIT_REJECTED: u8 = 2;

/// Arguments of `gauto verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Document holding the graph and the automaton (YAML or JSON).
    pub document: PathBuf,

    /// Transition choice strategy. Overrides the config file.
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// RNG seed for the random strategy. Overrides the config file.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Branch budget of the backtracking strategy. Overrides the config file.
    #[arg(long)]
    pub backtrack_limit: Option<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Strategy names accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    /// Uniform random choice, no backtracking.
    Random,
    /// First applicable transition, no backtracking.
    First,
    /// Exhaustive depth-first search.
    Backtracking,
}

impl From<StrategyArg> for ChoiceStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Random => Self::Random,
            StrategyArg::First => Self::First,
            StrategyArg::Backtracking => Self::Backtracking,
        }
    }
}

/// How the verdict is printed.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// Machine-readable report.
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a RunOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute `gauto verify`.
pub fn run_verify(args: &VerifyArgs, config_path: Option<&Path>) -> Result<u8> {
    let config = resolve_config(args, config_path)?;
    let document = load_document(&args.document)?;
    tracing::info!(strategy = %config.strategy, "verifying run");

    match Runner::new(config).run(&document.automaton, &document.graph) {
        Ok(outcome) => {
            print!("{}", render_accepted(&outcome, args.format)?);
            Ok(0)
        }
        Err(err) if err.is_verdict() => {
            print!("{}", render_rejected(&err.to_string(), args.format)?);
            Ok(EXIT_REJECTED)
        }
        Err(err) => Err(err).context("run could not be completed"),
    }
}

/// Load the config file, if any, and apply command-line overrides.
pub fn resolve_config(args: &VerifyArgs, config_path: Option<&Path>) -> Result<RunConfig> {
    let mut config = match config_path {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy.into();
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(limit) = args.backtrack_limit {
        config.backtrack_limit = limit;
    }
    Ok(config)
}

fn render_accepted(outcome: &RunOutcome, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&Report {
            accepted: true,
            outcome: Some(outcome),
            error: None,
        });
    }

    let mut out = String::new();
    writeln!(out, "accepted (strategy: {})", outcome.strategy)?;
    writeln!(out, "run:")?;
    for (node, labelling) in outcome.run.iter() {
        writeln!(out, "  {node} -> {labelling}")?;
    }
    if !outcome.jump_pairs.is_empty() {
        writeln!(out, "jump pairs:")?;
        for pair in &outcome.jump_pairs {
            writeln!(out, "  {pair}")?;
        }
    }
    Ok(out)
}

fn render_rejected(reason: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&Report {
            accepted: false,
            outcome: None,
            error: Some(reason.to_string()),
        }),
        OutputFormat::Text => Ok(format!("rejected: {reason}\n")),
    }
}

fn to_json(report: &Report<'_>) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    json.push('\n');
    Ok(json)
}
