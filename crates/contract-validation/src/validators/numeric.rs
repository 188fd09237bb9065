//! Numeric comparison validators for integer fields

use crate::traits::Predicate;
use crate::value::{FieldType, FieldValue};
use serde_json::Value;

/// Comparison applied against the bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Gteq,
    Lt,
    Lteq,
    Eq,
}

impl Comparison {
    fn name(self) -> &'static str {
        match self {
            Comparison::Gt => "gt",
            Comparison::Gteq => "gteq",
            Comparison::Lt => "lt",
            Comparison::Lteq => "lteq",
            Comparison::Eq => "eq",
        }
    }

    fn holds(self, value: i64, bound: i64) -> bool {
        match self {
            Comparison::Gt => value > bound,
            Comparison::Gteq => value >= bound,
            Comparison::Lt => value < bound,
            Comparison::Lteq => value <= bound,
            Comparison::Eq => value == bound,
        }
    }

    fn describe(self, bound: i64) -> String {
        match self {
            Comparison::Gt => format!("must be greater than {}", bound),
            Comparison::Gteq => format!("must be greater than or equal to {}", bound),
            Comparison::Lt => format!("must be less than {}", bound),
            Comparison::Lteq => format!("must be less than or equal to {}", bound),
            Comparison::Eq => format!("must be equal to {}", bound),
        }
    }
}

/// Validator comparing an integer field against a fixed bound
#[derive(Debug, Clone)]
pub struct NumericValidator {
    pub comparison: Comparison,
    pub bound: i64,
    /// Custom error message
    pub message: Option<String>,
}

impl NumericValidator {
    /// Create a new numeric validator
    pub fn new(comparison: Comparison, bound: i64) -> Self {
        Self {
            comparison,
            bound,
            message: None,
        }
    }

    /// Require a value greater than `bound`
    pub fn gt(bound: i64) -> Self {
        Self::new(Comparison::Gt, bound)
    }

    /// Require a value greater than or equal to `bound`
    pub fn gteq(bound: i64) -> Self {
        Self::new(Comparison::Gteq, bound)
    }

    /// Require a value less than `bound`
    pub fn lt(bound: i64) -> Self {
        Self::new(Comparison::Lt, bound)
    }

    /// Require a value less than or equal to `bound`
    pub fn lteq(bound: i64) -> Self {
        Self::new(Comparison::Lteq, bound)
    }

    /// Require a value equal to `bound`
    pub fn eq(bound: i64) -> Self {
        Self::new(Comparison::Eq, bound)
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Predicate for NumericValidator {
    fn name(&self) -> &str {
        self.comparison.name()
    }

    fn check(&self, value: &FieldValue) -> Result<(), String> {
        let Some(number) = value.as_i64() else {
            return Ok(());
        };

        if self.comparison.holds(number, self.bound) {
            Ok(())
        } else {
            Err(self
                .message
                .clone()
                .unwrap_or_else(|| self.comparison.describe(self.bound)))
        }
    }

    fn applies_to(&self, field_type: FieldType) -> bool {
        field_type == FieldType::Integer
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "comparison": self.comparison.name(),
            "bound": self.bound,
        }))
    }
}
