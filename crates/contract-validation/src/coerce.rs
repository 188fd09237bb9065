//! Raw value classification and type coercion

use crate::error::{Failure, FailureKind};
use crate::schema::FieldSpec;
use crate::value::{FieldType, FieldValue};
use serde_json::Value;

/// Result of coercing one declared field
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// Optional key absent from the record; the field has no value at all
    Undefined,
    /// Present, typed value (possibly `Null` for nullable blanks)
    Value(FieldValue),
    /// Coercion failed; the field has no value
    Failed(Failure),
}

/// Coerce the raw value for `field`. `raw` is `None` when the key is absent.
pub fn coerce(field: &FieldSpec, raw: Option<&Value>) -> Coerced {
    let Some(raw) = raw else {
        return if field.is_required() {
            Coerced::Failed(failure(field, FailureKind::Missing, "is required"))
        } else {
            Coerced::Undefined
        };
    };

    if is_blank(raw) {
        return if field.is_nullable() {
            Coerced::Value(FieldValue::Null)
        } else {
            Coerced::Failed(failure(field, FailureKind::Blank, "must be filled"))
        };
    }

    match field.field_type() {
        FieldType::String => match raw {
            Value::String(s) => Coerced::Value(FieldValue::String(s.clone())),
            _ => Coerced::Failed(failure(field, FailureKind::InvalidType, "must be a string")),
        },
        FieldType::Integer => match parse_integer(raw) {
            Some(n) => Coerced::Value(FieldValue::Integer(n)),
            None => Coerced::Failed(failure(field, FailureKind::InvalidType, "must be an integer")),
        },
    }
}

/// Empty string or null. Whitespace is not blank.
fn is_blank(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn parse_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            s.parse::<i64>().ok()
        }
        _ => None,
    }
}

fn failure(field: &FieldSpec, kind: FailureKind, message: &str) -> Failure {
    Failure::new(field.name(), field.label(), kind, message)
}
