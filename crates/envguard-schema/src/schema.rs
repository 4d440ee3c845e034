//! # Schema Model
//!
//! A typed representation of the JSON-Schema-like documents envguard
//! understands. A [`SchemaNode`] is one record with an optional field per
//! constraint; any subset may be combined on a single node.
//!
//! Keywords outside the supported set (`$schema`, `$id`, `title`,
//! `description`, `else`, ...) are ignored on load.
//!
//! ## Ownership
//!
//! Child nodes are owned (`Box`/`Vec`), so a loaded tree has no shared or
//! back references and cannot contain cycles. Nesting depth is bounded by the
//! `serde_json` recursion limit at load time.

use std::fmt;
use std::path::Path;

use regex::Regex;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use crate::validate::ProfileValidationError;

/// The `type` keyword.
///
/// Only `"object"` and `"string"` are enforced. Every other declared type is
/// kept for diagnostics but never checked.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    /// Requires a JSON object instance.
    Object,
    /// Requires a JSON string instance.
    String,
    /// Any other declared type; accepted without checking.
    Unchecked(Value),
}

impl SchemaType {
    /// Whether `instance` passes the type gate.
    pub fn admits(&self, instance: &Value) -> bool {
        match self {
            Self::Object => instance.is_object(),
            Self::String => instance.is_string(),
            Self::Unchecked(_) => true,
        }
    }
}

impl From<Value> for SchemaType {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("object") => Self::Object,
            Some("string") => Self::String,
            _ => Self::Unchecked(value),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => f.write_str("object"),
            Self::String => f.write_str("string"),
            Self::Unchecked(Value::String(s)) => f.write_str(s),
            Self::Unchecked(other) => write!(f, "{other}"),
        }
    }
}

/// A compiled `pattern` keyword.
///
/// Matching is an unanchored search: the pattern may match anywhere in the
/// value.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for invalid syntax.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    /// Whether the pattern occurs anywhere in `value`.
    pub fn is_found_in(&self, value: &str) -> bool {
        self.0.is_match(value)
    }

    /// The pattern source text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source)
            .map_err(|e| de::Error::custom(format!("invalid pattern /{source}/: {e}")))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `properties` keyword: child schemas in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(Vec<(String, SchemaNode)>);

impl Properties {
    /// Look up the schema declared for `name`.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate declared properties in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no properties are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, SchemaNode)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, SchemaNode)>>(iter: I) -> Self {
        let mut props = Self::default();
        for (name, node) in iter {
            match props.0.iter_mut().find(|(k, _)| *k == name) {
                Some((_, slot)) => *slot = node,
                None => props.0.push((name, node)),
            }
        }
        props
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property names to schemas")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Properties, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, node)) = map.next_entry::<String, SchemaNode>()? {
                    entries.push((name, node));
                }
                Ok(entries.into_iter().collect())
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

/// One node of a schema tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SchemaNode {
    /// `type`: structural gate, see [`SchemaType`].
    #[serde(rename = "type", default)]
    pub schema_type: Option<SchemaType>,

    /// `required`: names that must be present on an object instance.
    #[serde(default)]
    pub required: Vec<String>,

    /// `properties`: child schemas applied to keys present on the instance.
    #[serde(default)]
    pub properties: Properties,

    /// `additionalProperties`: only an explicit `false` restricts keys.
    #[serde(
        rename = "additionalProperties",
        default,
        deserialize_with = "deserialize_additional_properties"
    )]
    pub additional_properties: Option<bool>,

    /// `enum`: allowed values for a string instance.
    #[serde(rename = "enum", default)]
    pub allowed: Option<Vec<Value>>,

    /// `const`: the single allowed value for a string instance.
    #[serde(rename = "const", default)]
    pub constant: Option<Value>,

    /// `minLength`: minimum length of a string instance, in characters.
    #[serde(rename = "minLength", default, deserialize_with = "deserialize_min_length")]
    pub min_length: Option<u64>,

    /// `pattern`: regular expression searched for in a string instance.
    #[serde(default)]
    pub pattern: Option<Pattern>,

    /// `not`: the instance must not satisfy this schema.
    #[serde(default)]
    pub not: Option<Box<SchemaNode>>,

    /// `allOf`: every branch is applied.
    #[serde(rename = "allOf", default)]
    pub all_of: Vec<SchemaNode>,

    /// `if`: condition for [`then_schema`](Self::then_schema).
    #[serde(rename = "if", default)]
    pub if_schema: Option<Box<SchemaNode>>,

    /// `then`: applied only when the instance satisfies `if`.
    #[serde(rename = "then", default)]
    pub then_schema: Option<Box<SchemaNode>>,
}

/// `additionalProperties` accepts `true`, `false` or `null`.
///
/// A schema-valued `additionalProperties` is a load error that names the
/// unsupported form.
fn deserialize_additional_properties<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Bool(allowed) => Ok(Some(allowed)),
        Value::Null => Ok(None),
        Value::Object(_) => Err(de::Error::custom(
            "additionalProperties must be true or false; schema-valued additionalProperties is not supported",
        )),
        other => Err(de::Error::custom(format!(
            "additionalProperties must be true or false, got {other}"
        ))),
    }
}

/// `minLength` accepts a non-negative integer, written as `2` or `2.0`.
fn deserialize_min_length<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let length = match &value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        _ => None,
    };
    length.map(Some).ok_or_else(|| {
        de::Error::custom(format!(
            "minLength must be a non-negative integer, got {value}"
        ))
    })
}

impl SchemaNode {
    /// Build a schema from a parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error if a keyword has the wrong shape or
    /// a pattern fails to compile.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Parse a schema from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error for invalid JSON or keyword shapes.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load a schema document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileValidationError::SchemaLoadError`] if the file cannot be
    /// read or does not describe a valid schema.
    pub fn load(path: &Path) -> Result<Self, ProfileValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProfileValidationError::SchemaLoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        Self::from_json_str(&content).map_err(|e| ProfileValidationError::SchemaLoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
