//! Core validation traits

use crate::value::{FieldType, FieldValue};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// A field-level check run against a coerced, non-null value
pub trait Predicate: Send + Sync {
    /// Name reported in `predicate_failed:<name>`
    fn name(&self) -> &str;

    /// Check the value, returning the failure message when it is rejected
    fn check(&self, value: &FieldValue) -> Result<(), String>;

    /// Whether this predicate makes sense for fields of the given type
    fn applies_to(&self, field_type: FieldType) -> bool;

    /// Reject parameters no value could ever satisfy, e.g. `min > max`
    fn check_declaration(&self) -> Result<(), String> {
        Ok(())
    }

    /// Predicate parameters as JSON, for introspection
    fn parameters(&self) -> Option<Value> {
        None
    }
}

/// Read-only access to an input record.
///
/// The engine only ever looks up declared field names; it never walks the
/// record's keys, so undeclared keys are not copied, logged or retained.
pub trait RecordSource {
    /// Look up a key. `None` means the key is absent.
    fn lookup(&self, key: &str) -> Option<&Value>;
}

impl RecordSource for HashMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl RecordSource for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl RecordSource for Map<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<R: RecordSource + ?Sized> RecordSource for &R {
    fn lookup(&self, key: &str) -> Option<&Value> {
        (**self).lookup(key)
    }
}

/// Build a record of string values from already-decoded key/value pairs,
/// as produced by query-string or CSV readers. Later pairs win.
pub fn form_record<I, K, V>(pairs: I) -> HashMap<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), Value::String(value.into())))
        .collect()
}
