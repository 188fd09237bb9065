//! Validation outcome

use crate::error::Failure;
use crate::value::{FieldValue, Values};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Outcome of validating one record. Built once per call, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    values: Values,
    failures: Vec<Failure>,
}

impl ValidationResult {
    pub(crate) fn new(values: Values, failures: Vec<Failure>) -> Self {
        Self { values, failures }
    }

    /// Whether the record passed every check
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether the record has at least one failure
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Coerced values of declared fields
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Failures in report order: field-level first, cross-field last
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Failures attached to one field
    pub fn failures_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Failure> + 'a {
        self.failures.iter().filter(move |f| f.field == field)
    }

    /// Whether the field has any failure
    pub fn has_failures_for(&self, field: &str) -> bool {
        self.failures_for(field).next().is_some()
    }

    /// Declared fields with a defined value. Absent optional fields are omitted.
    pub fn to_map(&self) -> HashMap<String, FieldValue> {
        self.values
            .iter()
            .map(|(field, value)| (field.to_string(), value.clone()))
            .collect()
    }

    /// Same as [`ValidationResult::to_map`], as a JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(field, value)| (field.to_string(), value.to_json()))
                .collect::<Map<String, Value>>(),
        )
    }

    /// Failure messages in report order, optionally prefixed with the field's display name
    pub fn error_messages(&self, full: bool) -> Vec<String> {
        self.failures
            .iter()
            .map(|failure| {
                if full {
                    failure.full_message()
                } else {
                    failure.message.clone()
                }
            })
            .collect()
    }

    /// Error payload for API responses
    pub fn errors_json(&self) -> Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "failures": self.failures,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    fn sample() -> ValidationResult {
        let values: Values = [
            ("name", FieldValue::from("Foo")),
            ("age", FieldValue::Null),
        ]
        .into_iter()
        .collect();
        let failures = vec![Failure::new(
            "name",
            "Name",
            FailureKind::PredicateFailed("min_size".into()),
            "is too short (minimum is 5 characters)",
        )];
        ValidationResult::new(values, failures)
    }

    #[test]
    fn test_error_messages() {
        let result = sample();

        assert!(result.is_failure());
        assert_eq!(
            result.error_messages(true),
            vec!["Name is too short (minimum is 5 characters)"]
        );
        assert_eq!(
            result.error_messages(false),
            vec!["is too short (minimum is 5 characters)"]
        );
        assert!(result.has_failures_for("name"));
        assert!(!result.has_failures_for("age"));
    }

    #[test]
    fn test_to_map_and_json() {
        let result = sample();

        let map = result.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["age"], FieldValue::Null);
        assert_eq!(result.to_json(), serde_json::json!({"name": "Foo", "age": null}));
    }

    #[test]
    fn test_errors_json() {
        let payload = sample().errors_json();
        assert_eq!(payload["error"]["code"], "validation_failed");
        assert_eq!(payload["error"]["failures"][0]["kind"], "predicate_failed:min_size");
    }
}
