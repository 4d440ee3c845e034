//! # ConfigProfile
//!
//! The ordered `KEY -> VALUE` mapping built from one profile file.
//!
//! Insertion order is preserved so that diagnostics which walk the profile
//! (for example "unexpected property" reports) come out in file order.
//! Re-inserting an existing key replaces the value in place.

use serde_json::{Map, Value};

use crate::key::ProfileKey;

/// Name of the synthetic key carrying the profile's file stem.
pub const PROFILE_NAME_KEY: &str = "PROFILE_NAME";

/// An ordered mapping of validated keys to string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigProfile {
    entries: Vec<(ProfileKey, String)>,
}

impl ConfigProfile {
    /// Create an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value if the key was present.
    pub fn insert(&mut self, key: ProfileKey, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Set the synthetic `PROFILE_NAME` entry.
    pub fn set_profile_name(&mut self, name: impl Into<String>) -> Option<String> {
        self.insert(ProfileKey::profile_name(), name)
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the profile has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProfileKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Convert to a JSON object instance for schema validation.
    pub fn to_instance(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), Value::String(v.to_string())))
            .collect();
        Value::Object(map)
    }
}
