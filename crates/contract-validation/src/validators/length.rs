//! Length-based validators for string fields

use crate::traits::Predicate;
use crate::value::{FieldType, FieldValue};
use serde_json::Value;

/// Validator for string length constraints
#[derive(Debug, Clone)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Custom error message
    pub message: Option<String>,
}

impl LengthValidator {
    /// Require at least `min` characters
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
            message: None,
        }
    }

    /// Allow at most `max` characters
    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
            message: None,
        }
    }

    /// Require exactly `len` characters
    pub fn exact(len: usize) -> Self {
        Self::range(len, len)
    }

    /// Require between `min` and `max` characters, inclusive
    pub fn range(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            message: None,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn default_message(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => format!("length must be {}", min),
            (Some(min), Some(max)) => format!("size must be within {} - {}", min, max),
            (Some(min), None) => format!("size cannot be less than {}", min),
            (None, Some(max)) => format!("size cannot be greater than {}", max),
            (None, None) => "has invalid length".to_string(),
        }
    }
}

impl Predicate for LengthValidator {
    fn name(&self) -> &str {
        match (self.min, self.max) {
            (Some(_), None) => "min_size",
            (None, Some(_)) => "max_size",
            _ => "size",
        }
    }

    fn check(&self, value: &FieldValue) -> Result<(), String> {
        // Type is guaranteed by schema construction; anything else passes through
        let Some(text) = value.as_str() else {
            return Ok(());
        };
        let length = text.chars().count();

        let too_short = self.min.map_or(false, |min| length < min);
        let too_long = self.max.map_or(false, |max| length > max);

        if too_short || too_long {
            Err(self.message.clone().unwrap_or_else(|| self.default_message()))
        } else {
            Ok(())
        }
    }

    fn applies_to(&self, field_type: FieldType) -> bool {
        field_type == FieldType::String
    }

    fn check_declaration(&self) -> Result<(), String> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => {
                Err(format!("minimum length {} exceeds maximum length {}", min, max))
            }
            _ => Ok(()),
        }
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}
