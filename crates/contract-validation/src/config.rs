//! Declarative schema configuration loaded from JSON or YAML

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{FieldSpec, SchemaBuilder};
use crate::validators::{
    Comparison, CustomValidator, LengthValidator, NumericValidator, PatternValidator,
};
use crate::value::FieldType;
use serde::{Deserialize, Serialize};

/// Field declarations for a schema. Cross-field rules are code and are
/// added to the builder returned by [`SchemaConfig::into_builder`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaConfig {
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub predicates: Vec<PredicateConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredicateConfig {
    #[serde(flatten)]
    pub kind: PredicateKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredicateKind {
    MinSize { value: usize },
    MaxSize { value: usize },
    Size { min: usize, max: usize },
    Gt { value: i64 },
    Gteq { value: i64 },
    Lt { value: i64 },
    Lteq { value: i64 },
    Eq { value: i64 },
    Format {
        pattern: String,
        #[serde(default)]
        full_match: bool,
    },
    IncludedIn { values: Vec<String> },
    ExcludedFrom { values: Vec<String> },
}

impl SchemaConfig {
    /// Parse a config from JSON
    pub fn from_json_str(source: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(source: &str) -> SchemaResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Compile the field declarations into a builder
    pub fn into_builder(self) -> SchemaResult<SchemaBuilder> {
        self.fields
            .into_iter()
            .try_fold(SchemaBuilder::new(), |builder, field| -> SchemaResult<SchemaBuilder> {
                Ok(builder.field(field.into_spec()?))
            })
    }
}

impl FieldConfig {
    fn into_spec(self) -> SchemaResult<FieldSpec> {
        let mut spec = FieldSpec::new(self.name.clone(), self.field_type);
        if self.required {
            spec = spec.required();
        }
        if self.nullable {
            spec = spec.nullable();
        }
        if let Some(display_name) = self.display_name {
            spec = spec.display_name(display_name);
        }

        for predicate in self.predicates {
            let message = predicate.message;
            spec = match predicate.kind {
                PredicateKind::MinSize { value } => {
                    spec.predicate(with_message(LengthValidator::min(value), message))
                }
                PredicateKind::MaxSize { value } => {
                    spec.predicate(with_message(LengthValidator::max(value), message))
                }
                PredicateKind::Size { min, max } => {
                    spec.predicate(with_message(LengthValidator::range(min, max), message))
                }
                PredicateKind::Gt { value } => {
                    spec.predicate(numeric(Comparison::Gt, value, message))
                }
                PredicateKind::Gteq { value } => {
                    spec.predicate(numeric(Comparison::Gteq, value, message))
                }
                PredicateKind::Lt { value } => {
                    spec.predicate(numeric(Comparison::Lt, value, message))
                }
                PredicateKind::Lteq { value } => {
                    spec.predicate(numeric(Comparison::Lteq, value, message))
                }
                PredicateKind::Eq { value } => {
                    spec.predicate(numeric(Comparison::Eq, value, message))
                }
                PredicateKind::Format { pattern, full_match } => {
                    let validator = PatternValidator::new(&pattern)
                        .map_err(|source| SchemaError::InvalidPattern {
                            field: self.name.clone(),
                            source,
                        })?
                        .full_match(full_match);
                    let validator = match message {
                        Some(message) => validator.message(message),
                        None => validator,
                    };
                    spec.predicate(validator)
                }
                PredicateKind::IncludedIn { values } => {
                    let validator = CustomValidator::one_of(values);
                    spec.predicate(match message {
                        Some(message) => validator.message(message),
                        None => validator,
                    })
                }
                PredicateKind::ExcludedFrom { values } => {
                    let validator = CustomValidator::not_one_of(values);
                    spec.predicate(match message {
                        Some(message) => validator.message(message),
                        None => validator,
                    })
                }
            };
        }

        Ok(spec)
    }
}

fn with_message(validator: LengthValidator, message: Option<String>) -> LengthValidator {
    match message {
        Some(message) => validator.message(message),
        None => validator,
    }
}

fn numeric(comparison: Comparison, bound: i64, message: Option<String>) -> NumericValidator {
    let validator = NumericValidator::new(comparison, bound);
    match message {
        Some(message) => validator.message(message),
        None => validator,
    }
}
