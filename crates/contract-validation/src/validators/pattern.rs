//! Pattern-based validators using regular expressions

use crate::traits::Predicate;
use crate::value::{FieldType, FieldValue};
use regex::Regex;
use serde_json::Value;

/// Validator for regular expression formats.
///
/// By default the pattern may match anywhere in the value, so `@` accepts any
/// string containing an at sign. Use [`PatternValidator::full_match`] to
/// require the whole value to match.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    /// The regular expression pattern
    pattern: Regex,
    /// The same pattern anchored at both ends, used for full matches
    anchored: Regex,
    /// Custom error message
    pub message: Option<String>,
    /// Whether the whole value must match
    pub full_match: bool,
}

impl PatternValidator {
    /// Create a new pattern validator
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Self::from_regex(Regex::new(pattern)?)
    }

    /// Create a case-insensitive pattern validator
    pub fn new_case_insensitive(pattern: &str) -> Result<Self, regex::Error> {
        Self::new(&format!("(?i){}", pattern))
    }

    /// Create a validator from an existing Regex
    pub fn from_regex(regex: Regex) -> Result<Self, regex::Error> {
        let anchored = Regex::new(&format!(r"\A(?:{})\z", regex.as_str()))?;
        Ok(Self {
            pattern: regex,
            anchored,
            message: None,
            full_match: false,
        })
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set whether to match the full string or just find a match
    pub fn full_match(mut self, full_match: bool) -> Self {
        self.full_match = full_match;
        self
    }

    /// Get the pattern string
    pub fn pattern_string(&self) -> &str {
        self.pattern.as_str()
    }

    fn matches(&self, text: &str) -> bool {
        if self.full_match {
            self.anchored.is_match(text)
        } else {
            self.pattern.is_match(text)
        }
    }
}

impl Predicate for PatternValidator {
    fn name(&self) -> &str {
        "format"
    }

    fn check(&self, value: &FieldValue) -> Result<(), String> {
        let Some(text) = value.as_str() else {
            return Ok(());
        };

        if self.matches(text) {
            Ok(())
        } else {
            Err(self
                .message
                .clone()
                .unwrap_or_else(|| "is in invalid format".to_string()))
        }
    }

    fn applies_to(&self, field_type: FieldType) -> bool {
        field_type == FieldType::String
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        params.insert("pattern".to_string(), Value::String(self.pattern.as_str().to_string()));
        params.insert("full_match".to_string(), Value::Bool(self.full_match));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}
