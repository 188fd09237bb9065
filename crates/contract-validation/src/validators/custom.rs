//! Custom validation functions and closures

use crate::traits::Predicate;
use crate::value::{FieldType, FieldValue};
use serde_json::Value;
use std::sync::Arc;

/// Type alias for predicate check functions
pub type CheckFn = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;

/// Custom validator that accepts a user-defined check
#[derive(Clone)]
pub struct CustomValidator {
    /// Name reported in `predicate_failed:<name>`
    pub name: String,
    check: CheckFn,
    /// Error message used when the check fails
    pub message: String,
    /// Restrict the validator to one field type
    pub field_type: Option<FieldType>,
}

impl CustomValidator {
    /// Create a new custom validator; `check` returns true for acceptable values
    pub fn new<F>(name: impl Into<String>, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
            message: message.into(),
            field_type: None,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Only allow this validator on fields of the given type
    pub fn for_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("field_type", &self.field_type)
            .finish()
    }
}

impl Predicate for CustomValidator {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, value: &FieldValue) -> Result<(), String> {
        if (self.check)(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn applies_to(&self, field_type: FieldType) -> bool {
        self.field_type.map_or(true, |restricted| restricted == field_type)
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "name": self.name,
            "message": self.message,
        }))
    }
}

/// Helper constructors for common custom validations
impl CustomValidator {
    /// Value must be one of the allowed strings
    pub fn one_of(allowed_values: Vec<String>) -> Self {
        let message = format!("must be one of: {}", allowed_values.join(", "));
        Self::new("included_in", message, move |value| {
            value
                .as_str()
                .map_or(false, |s| allowed_values.iter().any(|allowed| allowed == s))
        })
        .for_type(FieldType::String)
    }

    /// Value must not be one of the forbidden strings
    pub fn not_one_of(forbidden_values: Vec<String>) -> Self {
        let message = format!("must not be one of: {}", forbidden_values.join(", "));
        Self::new("excluded_from", message, move |value| {
            value
                .as_str()
                .map_or(true, |s| !forbidden_values.iter().any(|forbidden| forbidden == s))
        })
        .for_type(FieldType::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_validator_closure() {
        let even = CustomValidator::new("even", "must be even", |value| {
            value.as_i64().map_or(false, |n| n % 2 == 0)
        });

        assert!(even.check(&FieldValue::Integer(4)).is_ok());
        assert_eq!(even.check(&FieldValue::Integer(7)), Err("must be even".to_string()));
        assert_eq!(even.name(), "even");
        assert!(even.applies_to(FieldType::Integer));
        assert!(even.applies_to(FieldType::String));
    }

    #[test]
    fn test_custom_validator_type_restriction() {
        let validator = CustomValidator::new("lowercase", "must be lowercase", |value| {
            value.as_str().map_or(false, |s| s == s.to_lowercase())
        })
        .for_type(FieldType::String);

        assert!(validator.applies_to(FieldType::String));
        assert!(!validator.applies_to(FieldType::Integer));
    }

    #[test]
    fn test_one_of() {
        let validator = CustomValidator::one_of(vec!["active".to_string(), "inactive".to_string()]);

        assert!(validator.check(&FieldValue::from("active")).is_ok());
        assert_eq!(
            validator.check(&FieldValue::from("unknown")),
            Err("must be one of: active, inactive".to_string())
        );
        assert_eq!(validator.name(), "included_in");
    }

    #[test]
    fn test_not_one_of() {
        let validator = CustomValidator::not_one_of(vec!["admin".to_string(), "root".to_string()]);

        assert!(validator.check(&FieldValue::from("alice")).is_ok());
        assert!(validator.check(&FieldValue::from("root")).is_err());
        assert_eq!(validator.name(), "excluded_from");
    }

    #[test]
    fn test_custom_message_override() {
        let validator =
            CustomValidator::one_of(vec!["a".to_string()]).message("is not included in the list");
        assert_eq!(
            validator.check(&FieldValue::from("b")),
            Err("is not included in the list".to_string())
        );
    }
}
