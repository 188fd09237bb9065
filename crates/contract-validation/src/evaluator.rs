//! Rule evaluation: coercion, field predicates, then cross-field rules

use crate::coerce::{coerce, Coerced};
use crate::error::{Failure, FailureKind};
use crate::result::ValidationResult;
use crate::schema::Schema;
use crate::traits::RecordSource;
use crate::value::Values;
use std::collections::HashSet;

/// Validate `record` against `schema`.
///
/// Every field is checked and every failing predicate is reported. A
/// cross-field rule runs only when none of the fields it reads failed on
/// its own. Only declared field names are looked up in the record.
pub fn validate<R: RecordSource + ?Sized>(schema: &Schema, record: &R) -> ValidationResult {
    let mut values = Values::new();
    let mut failures = Vec::new();
    let mut failed_fields: HashSet<&str> = HashSet::new();

    for field in schema.fields() {
        match coerce(field, record.lookup(field.name())) {
            Coerced::Undefined => {}
            Coerced::Failed(failure) => {
                failed_fields.insert(field.name());
                failures.push(failure);
            }
            Coerced::Value(value) => {
                if !value.is_null() {
                    for predicate in field.predicates() {
                        if let Err(message) = predicate.check(&value) {
                            failed_fields.insert(field.name());
                            failures.push(Failure::new(
                                field.name(),
                                field.label(),
                                FailureKind::PredicateFailed(predicate.name().to_string()),
                                message,
                            ));
                        }
                    }
                }
                values.insert(field.name(), value);
            }
        }
    }

    for rule in schema.rules() {
        if rule.fields().iter().any(|f| failed_fields.contains(f.as_str())) {
            tracing::trace!(rule = rule.name(), "skipping cross-field rule over failed fields");
            continue;
        }
        if !rule.holds(&values) {
            let target = rule.target();
            let label = schema.field(target).map_or(target, |f| f.label());
            failures.push(Failure::new(
                target,
                label,
                FailureKind::CrossFieldFailed(rule.name().to_string()),
                rule.message(),
            ));
        }
    }

    tracing::debug!(
        fields = schema.fields().len(),
        failures = failures.len(),
        "record validated"
    );

    ValidationResult::new(values, failures)
}
