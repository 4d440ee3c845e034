//! # Profile Validation
//!
//! Ties the profile parser to the schema engine. A [`ProfileValidator`] holds
//! one schema, loaded once per run, and validates profile files against it.
//!
//! ## Per-file Pipeline
//!
//! 1. Read and parse the profile (fail-fast; a profile that does not parse is
//!    never validated).
//! 2. Set `PROFILE_NAME` to the file stem, overwriting any value from the file.
//! 3. Validate the resulting object and aggregate every violation into a
//!    single [`ProfileValidationError::ValidationFailed`].
//!
//! ## Security invariant
//!
//! Every detected issue is a hard failure. There is no warning severity.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use envguard_core::{parse_file, ProfileError};

use crate::engine::{validate_root, Violation};
use crate::schema::SchemaNode;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors returned by profile validation operations.
#[derive(Error, Debug)]
pub enum ProfileValidationError {
    /// The schema file could not be read or parsed.
    #[error("failed to load schema {path}: {reason}")]
    SchemaLoadError {
        /// Path of the schema that failed to load.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The profile could not be read or failed to parse.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The profile parsed but violates the schema.
    #[error("{path}: schema validation failed: {}", join_violations(.violations))]
    ValidationFailed {
        /// Path of the offending profile.
        path: String,
        /// Every violation found, in evaluation order.
        violations: Vec<Violation>,
    },

    /// Discovery found nothing to validate.
    #[error("no profile files found")]
    NoProfiles,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// ProfileValidator
// ---------------------------------------------------------------------------

/// Validates profile files against a single loaded schema.
///
/// The validator is immutable after construction and can be shared across
/// threads; validating one profile never affects another.
#[derive(Debug, Clone)]
pub struct ProfileValidator {
    schema: SchemaNode,
}

impl ProfileValidator {
    /// Create a validator from an already loaded schema.
    pub fn new(schema: SchemaNode) -> Self {
        Self { schema }
    }

    /// Load the schema document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileValidationError::SchemaLoadError`] if the schema cannot
    /// be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ProfileValidationError> {
        let schema = SchemaNode::load(path)?;
        tracing::info!(
            schema = %path.display(),
            properties = schema.properties.len(),
            required = schema.required.len(),
            "loaded profile schema"
        );
        Ok(Self::new(schema))
    }

    /// The schema this validator applies.
    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    /// Validate an arbitrary instance against the schema.
    pub fn validate_instance(&self, instance: &Value) -> Vec<Violation> {
        validate_root(instance, &self.schema)
    }

    /// Parse, augment and validate one profile file.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileValidationError::Profile`] if the file cannot be read or
    /// parsed, or [`ProfileValidationError::ValidationFailed`] carrying every
    /// violation if it does not conform.
    pub fn validate_profile(&self, path: &Path) -> Result<(), ProfileValidationError> {
        let mut profile = parse_file(path)?;
        profile.set_profile_name(profile_name(path));

        let violations = self.validate_instance(&profile.to_instance());
        tracing::debug!(
            path = %path.display(),
            violations = violations.len(),
            "validated profile"
        );

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ProfileValidationError::ValidationFailed {
                path: path.display().to_string(),
                violations,
            })
        }
    }

    /// Validate every profile in `paths`, continuing past failures.
    ///
    /// Profiles are processed in the given order.
    pub fn validate_all(&self, paths: &[PathBuf]) -> ProfileValidationReport {
        let mut passed = 0usize;
        let mut failures = Vec::new();

        for path in paths {
            match self.validate_profile(path) {
                Ok(()) => passed += 1,
                Err(error) => failures.push(ProfileFailure {
                    path: path.clone(),
                    error,
                }),
            }
        }

        ProfileValidationReport {
            total: paths.len(),
            passed,
            failed: failures.len(),
            failures,
        }
    }
}

/// The file stem used as `PROFILE_NAME`.
pub fn profile_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Validation report types
// ---------------------------------------------------------------------------

/// Result of validating a batch of profiles.
#[derive(Debug)]
pub struct ProfileValidationReport {
    /// Number of profiles examined.
    pub total: usize,
    /// Number that parsed and validated.
    pub passed: usize,
    /// Number that failed.
    pub failed: usize,
    /// Details of each failure, in processing order.
    pub failures: Vec<ProfileFailure>,
}

impl ProfileValidationReport {
    /// Whether every profile passed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// A single profile failure.
#[derive(Debug)]
pub struct ProfileFailure {
    /// Path of the profile that failed.
    pub path: PathBuf,
    /// Why it failed.
    pub error: ProfileValidationError,
}
