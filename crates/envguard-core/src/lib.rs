//! # envguard-core — Profile Parsing Primitives
//!
//! This crate turns `KEY=VALUE` profile files into an ordered
//! [`ConfigProfile`]. It is the leaf of the workspace DAG: the schema engine
//! and the CLI build on it, and it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Fail fast on syntax.** [`parse`] stops at the first offending line and
//!    reports its 1-based line number with a short reason.
//!
//! 2. **No interpolation, ever.** Values containing `${`, `$(` or a backtick are
//!    rejected whether quoted or not. Profiles feed deployment pipelines that
//!    may hand values to a shell.
//!
//! 3. **`ProfileKey` newtype.** Keys are uppercase identifiers
//!    (`^[A-Z][A-Z0-9_]*$`) checked at construction. No bare strings as keys.
//!
//! 4. **Last assignment wins.** A repeated key overwrites the earlier value and
//!    keeps its original position.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `envguard-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod key;
pub mod parser;
pub mod profile;

// Re-export primary types for ergonomic imports.
pub use error::{ParseError, ParseErrorKind, ProfileError};
pub use key::ProfileKey;
pub use parser::{parse, parse_file};
pub use profile::{ConfigProfile, PROFILE_NAME_KEY};
