//! Failure and schema error types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// What went wrong with a single field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Required key absent from the record
    Missing,
    /// Key present but empty or null on a field that must be filled
    Blank,
    /// Value could not be coerced into the declared type
    InvalidType,
    /// A field predicate rejected the coerced value
    PredicateFailed(String),
    /// A cross-field rule rejected the record
    CrossFieldFailed(String),
}

impl FailureKind {
    /// Parse the tag produced by `Display`
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "missing" => Some(Self::Missing),
            "blank" => Some(Self::Blank),
            "invalid_type" => Some(Self::InvalidType),
            _ => {
                if let Some(name) = tag.strip_prefix("predicate_failed:") {
                    Some(Self::PredicateFailed(name.to_string()))
                } else {
                    tag.strip_prefix("cross_field_failed:")
                        .map(|name| Self::CrossFieldFailed(name.to_string()))
                }
            }
        }
    }

    /// Whether the failure came from a cross-field rule
    pub fn is_cross_field(&self) -> bool {
        matches!(self, Self::CrossFieldFailed(_))
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing"),
            Self::Blank => f.write_str("blank"),
            Self::InvalidType => f.write_str("invalid_type"),
            Self::PredicateFailed(name) => write!(f, "predicate_failed:{}", name),
            Self::CrossFieldFailed(name) => write!(f, "cross_field_failed:{}", name),
        }
    }
}

impl Serialize for FailureKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FailureKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Self::parse(&tag)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown failure kind `{}`", tag)))
    }
}

/// A single field-scoped validation failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Failure {
    /// The declared field the failure is attached to
    pub field: String,
    /// Failure classification
    pub kind: FailureKind,
    /// Message without the field prefix, e.g. "must be filled"
    pub message: String,
    /// Human-readable field name used for full messages
    pub label: String,
}

impl Failure {
    /// Create a new failure
    pub fn new(
        field: impl Into<String>,
        label: impl Into<String>,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
            label: label.into(),
        }
    }

    /// Message prefixed with the field's display name
    pub fn full_message(&self) -> String {
        format!("{} {}", self.label, self.message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Schema construction errors. A schema that builds is always safe to validate against.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),

    #[error("rule `{0}` is declared more than once")]
    DuplicateRule(String),

    #[error("rule `{rule}` reads undeclared field `{field}`")]
    UnknownRuleField { rule: String, field: String },

    #[error("rule `{0}` does not read any field")]
    EmptyRule(String),

    #[error("rule `{rule}` attaches its failure to `{field}`, which it does not read")]
    RuleTargetNotRead { rule: String, field: String },

    #[error("predicate `{predicate}` cannot be applied to {field_type} field `{field}`")]
    IncompatiblePredicate {
        field: String,
        predicate: String,
        field_type: String,
    },

    #[error("predicate `{predicate}` on field `{field}` can never pass: {reason}")]
    UnsatisfiablePredicate {
        field: String,
        predicate: String,
        reason: String,
    },

    #[error("invalid pattern for field `{field}`: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid schema config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid schema config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
