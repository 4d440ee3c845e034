//! # envguard-schema — Schema Engine & Profile Validation
//!
//! This crate interprets a JSON-Schema-like description against profile
//! instances and reports every violation.
//!
//! ## Responsibilities
//!
//! - **Schema model (`schema`):** typed [`SchemaNode`] tree deserialized with
//!   serde; patterns compiled once at load time.
//! - **Engine (`engine`):** the pure recursive [`validate`] function producing
//!   structured [`Violation`]s.
//! - **Profile validation (`validate`):** [`ProfileValidator`] parses a profile
//!   file, injects `PROFILE_NAME`, validates, and aggregates failures.
//!
//! ## Design
//!
//! The schema is loaded once and passed explicitly; there is no global state.
//! Only `object` and `string` types are enforced. Other declared types pass
//! through unchecked.

pub mod engine;
pub mod schema;
pub mod validate;

// Re-export primary types.
pub use engine::{is_valid, validate, validate_root, Violation, ViolationKind, ROOT_PATH};
pub use schema::{Pattern, Properties, SchemaNode, SchemaType};
pub use validate::{
    profile_name, ProfileFailure, ProfileValidationError, ProfileValidationReport,
    ProfileValidator,
};
