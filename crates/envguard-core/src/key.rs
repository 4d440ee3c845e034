//! # Profile Keys
//!
//! [`ProfileKey`] is the only way a key enters a [`ConfigProfile`]. Keys are
//! uppercase shell-style identifiers: an ASCII uppercase letter followed by
//! any number of ASCII uppercase letters, digits, or underscores.
//!
//! [`ConfigProfile`]: crate::ConfigProfile

use crate::profile::PROFILE_NAME_KEY;

/// A validated profile key matching `^[A-Z][A-Z0-9_]*$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileKey(String);

impl ProfileKey {
    /// Create a key from a string, validating its format.
    ///
    /// Returns `None` if the string is not an uppercase identifier.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let s = value.into();
        if Self::is_valid(&s) {
            Some(Self(s))
        } else {
            None
        }
    }

    /// The synthetic `PROFILE_NAME` key.
    pub fn profile_name() -> Self {
        Self(PROFILE_NAME_KEY.to_string())
    }

    /// Check key format without constructing.
    pub fn is_valid(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => chars
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'),
            _ => false,
        }
    }

    /// Access the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
