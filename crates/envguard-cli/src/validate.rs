//! # Validate Command
//!
//! Loads the schema, gathers profile files, and validates each one.
//!
//! By default the run stops at the first failing profile, matching the
//! deployment pipeline's expectation that any bad profile blocks the release.
//! `--keep-going` validates everything and prints a summary instead.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use envguard_schema::{ProfileValidationError, ProfileValidator};

use crate::{resolve_path, DEFAULT_PROFILE_DIR, DEFAULT_SCHEMA_PATH, PROFILE_EXTENSION};

/// Arguments for profile validation.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the profile schema (JSON).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SCHEMA_PATH)]
    pub schema: PathBuf,

    /// Validate every profile and print a summary instead of stopping at the
    /// first failure.
    #[arg(long)]
    pub keep_going: bool,

    /// Profile files to validate. Defaults to every env/*.env file.
    #[arg(value_name = "PROFILE")]
    pub profiles: Vec<PathBuf>,
}

/// Execute validation.
///
/// Returns exit code 0 when every profile passed, 1 when `--keep-going`
/// recorded failures. In fail-fast mode the first failure is returned as an
/// error.
pub fn run_validate(args: &ValidateArgs, repo_root: &Path) -> Result<u8> {
    let schema_path = resolve_path(&args.schema, repo_root);
    let validator = ProfileValidator::from_file(&schema_path)?;

    let profiles = collect_profiles(&args.profiles, repo_root);
    if profiles.is_empty() {
        return Err(ProfileValidationError::NoProfiles.into());
    }
    tracing::debug!(count = profiles.len(), "collected profiles");

    if args.keep_going {
        return Ok(validate_keep_going(&validator, &profiles));
    }

    for profile in &profiles {
        validator.validate_profile(profile)?;
        println!("validated {}", profile.display());
    }

    Ok(0)
}

/// Validate every profile, report each outcome, and print a summary.
fn validate_keep_going(validator: &ProfileValidator, profiles: &[PathBuf]) -> u8 {
    let report = validator.validate_all(profiles);

    for profile in profiles {
        if !report.failures.iter().any(|f| f.path == *profile) {
            println!("validated {}", profile.display());
        }
    }
    for failure in &report.failures {
        eprintln!("validation error: {}", failure.error);
    }

    println!("Profiles: {}/{} passed", report.passed, report.total);

    if report.is_success() {
        0
    } else {
        1
    }
}

/// Resolve explicit profile paths, or discover the default set.
fn collect_profiles(explicit: &[PathBuf], repo_root: &Path) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return explicit
            .iter()
            .map(|p| resolve_path(p, repo_root))
            .collect();
    }
    let dir = resolve_path(Path::new(DEFAULT_PROFILE_DIR), repo_root);
    find_profiles(&dir)
}

/// Find `*.env` files directly under `dir`, sorted by path.
fn find_profiles(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "profile directory not found");
        return Vec::new();
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read profile directory"
            );
            return Vec::new();
        }
    };

    let mut results = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_profile_name(&path) {
            results.push(path);
        }
    }
    results.sort();
    results
}

/// Whether the file name ends in `.env`, including a bare `.env`.
fn is_profile_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(PROFILE_EXTENSION))
        .is_some_and(|stem| stem.ends_with('.'))
}
