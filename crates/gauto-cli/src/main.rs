//! # gauto CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gauto_cli::path::{run_path, PathArgs};
use gauto_cli::root::{run_root, RootArgs};
use gauto_cli::verify::{run_verify, VerifyArgs};

/// Graph automaton runner
///
/// Builds a run of a finite automaton over a rooted graph and verifies
/// variable ownership and jump pairing across the whole graph.
#[derive(Parser, Debug)]
#[command(name = "gauto", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML run configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build and verify a run over a graph.
    Verify(VerifyArgs),

    /// Print the root of a graph.
    Root(RootArgs),

    /// Print the shortest successor path between two nodes.
    Path(PathArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "gauto starting");

    let result = match &cli.command {
        Commands::Verify(args) => run_verify(args, cli.config.as_deref()),
        Commands::Root(args) => run_root(args),
        Commands::Path(args) => run_path(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauto_cli::verify::{OutputFormat, StrategyArg};

    #[test]
    fn cli_parse_verify_defaults() {
        let cli = Cli::try_parse_from(["gauto", "verify", "graph.yaml"]).unwrap();
        let Commands::Verify(args) = cli.command else {
            panic!("expected verify");
        };
        assert_eq!(args.document, PathBuf::from("graph.yaml"));
        assert!(args.strategy.is_none());
        assert!(args.seed.is_none());
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_parse_verify_with_overrides() {
        let cli = Cli::try_parse_from([
            "gauto",
            "-vv",
            "--config",
            "run.yaml",
            "verify",
            "graph.json",
            "--strategy",
            "backtracking",
            "--seed",
            "42",
            "--backtrack-limit",
            "50",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("run.yaml")));
        let Commands::Verify(args) = cli.command else {
            panic!("expected verify");
        };
        assert_eq!(args.strategy, Some(StrategyArg::Backtracking));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.backtrack_limit, Some(50));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gauto", "root", "graph.yaml", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Root(_)));
    }

    #[test]
    fn cli_parse_path() {
        let cli =
            Cli::try_parse_from(["gauto", "path", "g.yaml", "--from", "a", "--to", "b"]).unwrap();
        let Commands::Path(args) = cli.command else {
            panic!("expected path");
        };
        assert_eq!(args.from, "a");
        assert_eq!(args.to, "b");
    }

    #[test]
    fn cli_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["gauto", "verify", "g.yaml", "--strategy", "lucky"]).is_err());
    }

    #[test]
    fn cli_path_requires_endpoints() {
        assert!(Cli::try_parse_from(["gauto", "path", "g.yaml", "--from", "a"]).is_err());
    }
}
