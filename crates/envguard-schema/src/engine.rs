//! # Validation Engine
//!
//! Walks a [`SchemaNode`] against an instance value and collects every
//! violation. Validation is a pure function: no state survives a call, the
//! schema is never mutated, and the same input always yields the same list.
//!
//! ## Evaluation Order
//!
//! At every node, in order:
//!
//! 1. Type gate. A mismatch returns a single violation and skips the rest of
//!    the node, so no property or string checks run against the wrong shape.
//! 2. Object checks (`required`, `additionalProperties`, `properties`) when the
//!    instance is an object, whether or not `type` was declared.
//! 3. String checks (`enum`, `const`, `minLength`, `pattern`) when the instance
//!    is a string.
//! 4. `not`: only whether the child matched matters; its violations are dropped.
//! 5. `allOf`: all branch violations appended in declaration order.
//! 6. `if`/`then`: `then` applies only when `if` produced no violations.

use std::fmt;

use serde_json::{Map, Value};

use crate::schema::SchemaNode;

/// Path marker for the instance root.
pub const ROOT_PATH: &str = "$";

/// What went wrong at a given path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// The instance failed the `type` gate.
    TypeMismatch {
        /// The declared type.
        expected: String,
    },
    /// A `required` property is absent.
    MissingRequired {
        /// The missing property name.
        name: String,
    },
    /// A property is present that `additionalProperties: false` forbids.
    UnexpectedProperty {
        /// The unexpected property name.
        name: String,
    },
    /// A string is not in the `enum` set.
    NotInEnum {
        /// The offending value.
        value: String,
        /// The allowed set, rendered for display.
        allowed: String,
    },
    /// A string differs from `const`.
    ConstMismatch {
        /// The offending value.
        value: String,
        /// The required value.
        expected: String,
    },
    /// A string is shorter than `minLength`.
    TooShort {
        /// The declared minimum length.
        min_length: u64,
    },
    /// A string does not contain a match for `pattern`.
    PatternMismatch {
        /// The offending value.
        value: String,
        /// The pattern source.
        pattern: String,
    },
    /// The instance satisfies a `not` schema.
    ForbiddenMatch,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected } => write!(f, "expected {expected}"),
            Self::MissingRequired { name } => write!(f, "missing required property '{name}'"),
            Self::UnexpectedProperty { name } => write!(f, "unexpected property '{name}'"),
            Self::NotInEnum { value, allowed } => write!(f, "'{value}' is not one of {allowed}"),
            Self::ConstMismatch { value, expected } => {
                write!(f, "'{value}' must equal '{expected}'")
            }
            Self::TooShort { min_length } => write!(f, "length must be >= {min_length}"),
            Self::PatternMismatch { value, pattern } => {
                write!(f, "'{value}' does not match /{pattern}/")
            }
            Self::ForbiddenMatch => f.write_str("value matches a forbidden schema"),
        }
    }
}

/// A single violation: where it happened and what it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted instance path, rooted at [`ROOT_PATH`].
    pub path: String,
    /// The violation kind.
    pub kind: ViolationKind,
}

impl Violation {
    /// Create a violation at `path`.
    pub fn new(path: &str, kind: ViolationKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Validate `instance` against `schema`, starting at [`ROOT_PATH`].
pub fn validate_root(instance: &Value, schema: &SchemaNode) -> Vec<Violation> {
    validate(instance, schema, ROOT_PATH)
}

/// Whether `instance` satisfies `schema` with no violations.
pub fn is_valid(instance: &Value, schema: &SchemaNode) -> bool {
    validate_root(instance, schema).is_empty()
}

/// Validate `instance` against `schema` at `path`.
///
/// Returns every violation found, in evaluation order. An empty list means the
/// instance conforms.
pub fn validate(instance: &Value, schema: &SchemaNode, path: &str) -> Vec<Violation> {
    if let Some(expected) = &schema.schema_type {
        if !expected.admits(instance) {
            return vec![Violation::new(
                path,
                ViolationKind::TypeMismatch {
                    expected: expected.to_string(),
                },
            )];
        }
    }

    let mut violations = match instance {
        Value::Object(map) => check_object(map, schema, path),
        Value::String(value) => check_string(value, schema, path),
        _ => Vec::new(),
    };

    if let Some(forbidden) = &schema.not {
        if validate(instance, forbidden, path).is_empty() {
            violations.push(Violation::new(path, ViolationKind::ForbiddenMatch));
        }
    }

    for branch in &schema.all_of {
        violations.extend(validate(instance, branch, path));
    }

    if let (Some(condition), Some(consequence)) = (&schema.if_schema, &schema.then_schema) {
        if validate(instance, condition, path).is_empty() {
            violations.extend(validate(instance, consequence, path));
        }
    }

    violations
}

fn check_object(map: &Map<String, Value>, schema: &SchemaNode, path: &str) -> Vec<Violation> {
    let mut violations: Vec<Violation> = schema
        .required
        .iter()
        .filter(|name| !map.contains_key(name.as_str()))
        .map(|name| Violation::new(path, ViolationKind::MissingRequired { name: name.clone() }))
        .collect();

    if schema.additional_properties == Some(false) {
        violations.extend(
            map.keys()
                .filter(|key| !schema.properties.contains(key))
                .map(|key| {
                    Violation::new(path, ViolationKind::UnexpectedProperty { name: key.clone() })
                }),
        );
    }

    for (name, child) in schema.properties.iter() {
        if let Some(value) = map.get(name) {
            violations.extend(validate(value, child, &format!("{path}.{name}")));
        }
    }

    violations
}

fn check_string(value: &str, schema: &SchemaNode, path: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    let as_value = Value::String(value.to_string());

    if let Some(allowed) = &schema.allowed {
        if !allowed.contains(&as_value) {
            violations.push(Violation::new(
                path,
                ViolationKind::NotInEnum {
                    value: value.to_string(),
                    allowed: render_list(allowed),
                },
            ));
        }
    }

    if let Some(expected) = &schema.constant {
        if *expected != as_value {
            violations.push(Violation::new(
                path,
                ViolationKind::ConstMismatch {
                    value: value.to_string(),
                    expected: render_scalar(expected),
                },
            ));
        }
    }

    if let Some(min_length) = schema.min_length {
        let length = value.chars().count() as u64;
        if length < min_length {
            violations.push(Violation::new(path, ViolationKind::TooShort { min_length }));
        }
    }

    if let Some(pattern) = &schema.pattern {
        if !pattern.is_found_in(value) {
            violations.push(Violation::new(
                path,
                ViolationKind::PatternMismatch {
                    value: value.to_string(),
                    pattern: pattern.as_str().to_string(),
                },
            ));
        }
    }

    violations
}

/// Render an allowed set as `['a', 'b']`.
fn render_list(values: &[Value]) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| match v {
            Value::String(s) => format!("'{s}'"),
            other => other.to_string(),
        })
        .collect();
    format!("[{}]", items.join(", "))
}

/// Render a scalar without JSON quoting for strings.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> SchemaNode {
        SchemaNode::from_value(value).unwrap()
    }

    fn messages(instance: Value, schema_value: Value) -> Vec<String> {
        validate_root(&instance, &schema(schema_value))
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn missing_required_reports_only_absent_names() {
        let msgs = messages(json!({"A": "1"}), json!({"type": "object", "required": ["A", "B"]}));
        assert_eq!(msgs, vec!["$: missing required property 'B'"]);
    }

    #[test]
    fn additional_properties_false_flags_undeclared_keys() {
        let msgs = messages(
            json!({"A": "1", "Z": "2"}),
            json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {"A": {"type": "string"}}
            }),
        );
        assert_eq!(msgs, vec!["$: unexpected property 'Z'"]);
    }

    #[test]
    fn additional_properties_default_allows_extra_keys() {
        let msgs = messages(
            json!({"A": "1", "Z": "2"}),
            json!({"properties": {"A": {}}, "additionalProperties": true}),
        );
        assert!(msgs.is_empty());
    }

    #[test]
    fn unexpected_properties_follow_instance_order() {
        let msgs = messages(
            json!({"Z": "1", "B": "2", "M": "3"}),
            json!({"additionalProperties": false}),
        );
        assert_eq!(
            msgs,
            vec![
                "$: unexpected property 'Z'",
                "$: unexpected property 'B'",
                "$: unexpected property 'M'",
            ]
        );
    }

    #[test]
    fn enum_violation_names_value_and_allowed_set() {
        let msgs = messages(json!("z"), json!({"type": "string", "enum": ["x", "y"]}));
        assert_eq!(msgs, vec!["$: 'z' is not one of ['x', 'y']"]);
    }

    #[test]
    fn enum_match_passes() {
        assert!(messages(json!("y"), json!({"enum": ["x", "y"]})).is_empty());
    }

    #[test]
    fn const_mismatch() {
        let msgs = messages(json!("dev"), json!({"const": "prod"}));
        assert_eq!(msgs, vec!["$: 'dev' must equal 'prod'"]);
    }

    #[test]
    fn min_length_is_strict_lower_bound() {
        assert_eq!(
            messages(json!("ab"), json!({"minLength": 3})),
            vec!["$: length must be >= 3"]
        );
        assert!(messages(json!("abc"), json!({"minLength": 3})).is_empty());
    }

    #[test]
    fn min_length_counts_characters_not_bytes() {
        assert!(messages(json!("äöü"), json!({"minLength": 3})).is_empty());
    }

    #[test]
    fn pattern_is_searched_not_full_matched() {
        assert!(messages(json!("release-2024"), json!({"pattern": "[0-9]{4}"})).is_empty());
        assert_eq!(
            messages(json!("release"), json!({"pattern": "[0-9]{4}"})),
            vec!["$: 'release' does not match /[0-9]{4}/"]
        );
    }

    #[test]
    fn anchored_pattern_still_anchors() {
        assert!(!messages(json!("xhttps://a"), json!({"pattern": "^https://"})).is_empty());
    }

    #[test]
    fn string_checks_accumulate() {
        let msgs = messages(
            json!("a"),
            json!({"enum": ["bbb"], "const": "bbb", "minLength": 2, "pattern": "b"}),
        );
        assert_eq!(msgs.len(), 4);
    }

    #[test]
    fn type_gate_short_circuits() {
        let msgs = messages(
            json!("text"),
            json!({
                "type": "object",
                "required": ["A"],
                "not": {"type": "object"},
                "allOf": [{"minLength": 100}]
            }),
        );
        assert_eq!(msgs, vec!["$: expected object"]);
    }

    #[test]
    fn type_gate_string_on_object() {
        assert_eq!(
            messages(json!({}), json!({"type": "string"})),
            vec!["$: expected string"]
        );
    }

    #[test]
    fn undeclared_types_pass_through() {
        assert!(messages(json!("text"), json!({"type": "integer"})).is_empty());
        assert!(messages(json!({"A": "1"}), json!({"type": "array"})).is_empty());
        assert!(messages(json!(42), json!({"type": "boolean"})).is_empty());
    }

    #[test]
    fn object_checks_run_without_declared_type() {
        let msgs = messages(json!({}), json!({"required": ["A"]}));
        assert_eq!(msgs, vec!["$: missing required property 'A'"]);
    }

    #[test]
    fn object_keywords_ignored_for_strings() {
        assert!(messages(json!("x"), json!({"required": ["A"]})).is_empty());
    }

    #[test]
    fn string_keywords_ignored_for_objects() {
        assert!(messages(json!({}), json!({"minLength": 5, "enum": ["a"]})).is_empty());
    }

    #[test]
    fn non_string_scalars_skip_string_checks() {
        assert!(messages(json!(7), json!({"enum": ["a"], "pattern": "x"})).is_empty());
    }

    #[test]
    fn nested_properties_extend_path() {
        let msgs = messages(
            json!({"DB": {"HOST": ""}}),
            json!({"properties": {"DB": {"properties": {"HOST": {"minLength": 1}}}}}),
        );
        assert_eq!(msgs, vec!["$.DB.HOST: length must be >= 1"]);
    }

    #[test]
    fn absent_optional_properties_are_not_visited() {
        let msgs = messages(
            json!({"A": "ok"}),
            json!({"properties": {"B": {"type": "object"}}}),
        );
        assert!(msgs.is_empty());
    }

    #[test]
    fn not_flags_forbidden_match() {
        let s = json!({"not": {"const": "forbidden"}});
        assert_eq!(
            messages(json!("forbidden"), s.clone()),
            vec!["$: value matches a forbidden schema"]
        );
        assert!(messages(json!("ok"), s).is_empty());
    }

    #[test]
    fn not_reports_at_current_path() {
        let msgs = messages(
            json!({"MODE": "debug"}),
            json!({"properties": {"MODE": {"not": {"enum": ["debug", "trace"]}}}}),
        );
        assert_eq!(msgs, vec!["$.MODE: value matches a forbidden schema"]);
    }

    #[test]
    fn all_of_appends_every_branch_in_order() {
        let msgs = messages(
            json!({}),
            json!({"allOf": [{"required": ["A"]}, {"required": ["B"]}]}),
        );
        assert_eq!(
            msgs,
            vec![
                "$: missing required property 'A'",
                "$: missing required property 'B'",
            ]
        );
    }

    #[test]
    fn if_then_applies_only_when_condition_holds() {
        let s = json!({
            "if": {"properties": {"ENV": {"const": "prod"}}},
            "then": {"required": ["TLS_CERT"]}
        });
        assert_eq!(
            messages(json!({"ENV": "prod"}), s.clone()),
            vec!["$: missing required property 'TLS_CERT'"]
        );
        assert!(messages(json!({"ENV": "dev"}), s.clone()).is_empty());
        assert!(messages(json!({"ENV": "prod", "TLS_CERT": "/c.pem"}), s).is_empty());
    }

    #[test]
    fn if_without_then_is_ignored() {
        assert!(messages(json!({}), json!({"if": {}})).is_empty());
        assert!(messages(json!({}), json!({"then": {"required": ["A"]}})).is_empty());
    }

    #[test]
    fn if_with_absent_property_holds_vacuously() {
        let msgs = messages(
            json!({}),
            json!({
                "if": {"properties": {"ENV": {"const": "prod"}}},
                "then": {"required": ["TLS_CERT"]}
            }),
        );
        assert_eq!(msgs, vec!["$: missing required property 'TLS_CERT'"]);
    }

    #[test]
    fn evaluation_order_is_object_then_combinators() {
        let msgs = messages(
            json!({"X": "1"}),
            json!({
                "required": ["A"],
                "not": {"required": ["X"]},
                "allOf": [{"required": ["B"]}],
                "if": {},
                "then": {"required": ["C"]}
            }),
        );
        assert_eq!(
            msgs,
            vec![
                "$: missing required property 'A'",
                "$: value matches a forbidden schema",
                "$: missing required property 'B'",
                "$: missing required property 'C'",
            ]
        );
    }

    #[test]
    fn repeated_validation_is_identical() {
        let s = schema(json!({
            "type": "object",
            "required": ["A", "B"],
            "additionalProperties": false,
            "properties": {"A": {"enum": ["x"]}}
        }));
        let instance = json!({"A": "y", "Q": "1"});
        assert_eq!(validate_root(&instance, &s), validate_root(&instance, &s));
    }

    #[test]
    fn is_valid_helper() {
        let s = schema(json!({"required": ["A"]}));
        assert!(is_valid(&json!({"A": "1"}), &s));
        assert!(!is_valid(&json!({}), &s));
    }

    #[test]
    fn render_list_mixes_strings_and_scalars() {
        assert_eq!(render_list(&[json!("a"), json!(1), json!(null)]), "['a', 1, null]");
    }

    #[test]
    fn violation_structure_is_exposed() {
        let v = validate_root(&json!({}), &schema(json!({"required": ["A"]})));
        assert_eq!(
            v,
            vec![Violation {
                path: "$".to_string(),
                kind: ViolationKind::MissingRequired { name: "A".to_string() },
            }]
        );
    }
}
