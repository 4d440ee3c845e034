//! # envguard-cli — Profile Validation CLI
//!
//! Provides the `envguard` command-line interface: it loads the profile
//! schema once, discovers or accepts profile files, validates each one, and
//! reports through stdout, stderr and the exit status.
//!
//! ## Usage
//!
//! ```bash
//! envguard                                  # every env/*.env against the default schema
//! envguard env/prod.env                     # a single profile
//! envguard --schema schemas/custom.json --keep-going env/*.env
//! ```
//!
//! ## Exit Status
//!
//! `0` when every profile parsed and validated, `1` on any parse failure,
//! validation failure, schema load failure, or when no profiles were found.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `envguard-schema`; no validation logic here.

pub mod validate;

use std::path::{Path, PathBuf};

/// Default schema location, relative to the repository root.
pub const DEFAULT_SCHEMA_PATH: &str = "schemas/env-profile.schema.json";

/// Directory scanned for profiles when none are given.
pub const DEFAULT_PROFILE_DIR: &str = "env";

/// File extension of profile files, without the dot.
pub const PROFILE_EXTENSION: &str = "env";

/// Resolve a path that may be relative to the repository root.
///
/// Absolute paths and relative paths that exist from the current directory
/// are returned as-is. Otherwise, if the path exists relative to `repo_root`,
/// that is used. Failing both, the path is returned unchanged so the caller
/// reports it as given.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

/// Walk up from `start` to find the repository root.
///
/// The repo root is the nearest ancestor (including `start`) that contains a
/// `schemas/` directory.
pub fn resolve_repo_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join("schemas").is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
