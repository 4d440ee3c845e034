//! # envguard CLI entry point
//!
//! Parses command-line arguments, initializes tracing, and dispatches to the
//! validate handler. Diagnostics and errors go to stderr; stdout carries only
//! per-profile report lines.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use envguard_cli::validate::{run_validate, ValidateArgs};

/// envguard: validate KEY=VALUE environment profiles against a schema.
///
/// Rejects malformed assignments, unclosed quotes and shell interpolation,
/// then checks each profile (plus its PROFILE_NAME) against the schema.
#[derive(Parser, Debug)]
#[command(name = "envguard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    validate: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
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

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let repo_root = envguard_cli::resolve_repo_root(&cwd).unwrap_or_else(|| {
        tracing::debug!("no schemas/ directory above the working directory; using it as root");
        cwd.clone()
    });

    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    match run_validate(&cli.validate, &repo_root) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("validation error: {e}");
            ExitCode::from(1)
        }
    }
}
