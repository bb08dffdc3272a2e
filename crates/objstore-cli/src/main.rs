//! # objstore CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use objstore_cli::check::{run_check_schema, CheckSchemaArgs};
use objstore_cli::validate::{run_validate, ValidateArgs};

/// objstore schema tooling.
///
/// Checks Draft-4 schemas and validates payloads against them, offline.
#[derive(Parser, Debug)]
#[command(name = "objstore", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that a document is a valid Draft-4 JSON-Schema.
    CheckSchema(CheckSchemaArgs),

    /// Validate a payload document against a schema.
    Validate(ValidateArgs),
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

    let result = match cli.command {
        Commands::CheckSchema(args) => run_check_schema(&args),
        Commands::Validate(args) => run_validate(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_check_schema() {
        let cli = Cli::try_parse_from(["objstore", "check-schema", "s.json"]).unwrap();
        match cli.command {
            Commands::CheckSchema(args) => assert_eq!(args.schema.to_str(), Some("s.json")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_validate_with_repeated_ignore() {
        let cli = Cli::try_parse_from([
            "objstore", "validate", "--schema", "s.yaml", "--data", "d.json", "--ignore", "id",
            "--ignore", "last_modified",
        ])
        .unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.ignore, vec!["id", "last_modified"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_validate_requires_schema_and_data() {
        assert!(Cli::try_parse_from(["objstore", "validate", "--data", "d.json"]).is_err());
    }

    #[test]
    fn cli_verbose_counts() {
        let cli = Cli::try_parse_from(["objstore", "-vv", "check-schema", "s.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
