//! Schema declaration: fields, predicates and cross-field rules

use crate::error::{SchemaError, SchemaResult};
use crate::evaluator;
use crate::result::ValidationResult;
use crate::traits::{Predicate, RecordSource};
use crate::value::{FieldType, Values};
use std::collections::HashSet;
use std::sync::Arc;

/// One declared field
#[derive(Clone)]
pub struct FieldSpec {
    pub(crate) name: String,
    pub(crate) display_name: Option<String>,
    pub(crate) field_type: FieldType,
    pub(crate) required: bool,
    pub(crate) nullable: bool,
    pub(crate) predicates: Vec<Arc<dyn Predicate>>,
}

impl FieldSpec {
    /// Declare an optional, non-nullable field of the given type
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            field_type,
            required: false,
            nullable: false,
            predicates: Vec::new(),
        }
    }

    /// Create a new string field
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Create a new integer field
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// The key must be present in the record
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accept an explicit null or empty value, skipping predicates
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Human-readable name used to prefix full messages
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Append a predicate; predicates run in the order they are added
    pub fn predicate<P>(mut self, predicate: P) -> Self
    where
        P: Predicate + 'static,
    {
        self.predicates.push(Arc::new(predicate));
        self
    }

    /// Get the field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the name used in full messages, falling back to the field name
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Get the declared type
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the key must be present
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether an explicit null is accepted
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Get the predicates in declaration order
    pub fn predicates(&self) -> &[Arc<dyn Predicate>] {
        &self.predicates
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("required", &self.required)
            .field("nullable", &self.nullable)
            .field(
                "predicates",
                &self.predicates.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Type alias for cross-field rule checks
pub type RuleFn = Arc<dyn Fn(&Values) -> bool + Send + Sync>;

/// A rule reading several coerced fields and producing at most one failure
#[derive(Clone)]
pub struct CrossFieldRule {
    pub(crate) name: String,
    pub(crate) fields: Vec<String>,
    pub(crate) target: Option<String>,
    pub(crate) message: String,
    pub(crate) check: RuleFn,
}

impl CrossFieldRule {
    /// Create a rule over `fields`; `check` returns true when the record is acceptable.
    /// The failure is attached to the first field unless [`CrossFieldRule::attach_to`]
    /// says otherwise.
    pub fn new<I, S, F>(
        name: impl Into<String>,
        fields: I,
        message: impl Into<String>,
        check: F,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Values) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            target: None,
            message: message.into(),
            check: Arc::new(check),
        }
    }

    /// Attach the failure to a specific field the rule reads
    pub fn attach_to(mut self, field: impl Into<String>) -> Self {
        self.target = Some(field.into());
        self
    }

    /// Get the rule name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the fields the rule reads
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field the failure is reported against
    pub fn target(&self) -> &str {
        match &self.target {
            Some(target) => target,
            None => self.fields.first().map(String::as_str).unwrap_or_default(),
        }
    }

    /// Get the failure message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn holds(&self, values: &Values) -> bool {
        (self.check)(values)
    }
}

impl std::fmt::Debug for CrossFieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossFieldRule")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("target", &self.target())
            .finish()
    }
}

/// An immutable, validated schema.
///
/// Cloning is cheap enough to hand out per request, but the usual pattern is
/// to build once and share behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    rules: Vec<CrossFieldRule>,
}

impl Schema {
    /// Create a new schema builder
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Get the declared fields in order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Get a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get the cross-field rules in order
    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    /// Iterate over the declared field names
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Validate a record against this schema
    pub fn validate<R: RecordSource + ?Sized>(&self, record: &R) -> ValidationResult {
        evaluator::validate(self, record)
    }
}

/// Builder collecting fields and rules, checked when [`SchemaBuilder::build`] runs
#[derive(Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSpec>,
    rules: Vec<CrossFieldRule>,
}

impl SchemaBuilder {
    /// Create a new, empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a cross-field rule
    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Required string field with optional length bounds
    pub fn required_string(
        self,
        name: impl Into<String>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Self {
        use crate::validators::LengthValidator;

        let mut field = FieldSpec::string(name).required();
        if let Some(min) = min_length {
            field = field.predicate(LengthValidator::min(min));
        }
        if let Some(max) = max_length {
            field = field.predicate(LengthValidator::max(max));
        }
        self.field(field)
    }

    /// Optional, nullable integer field with optional inclusive bounds
    pub fn optional_integer(
        self,
        name: impl Into<String>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Self {
        use crate::validators::NumericValidator;

        let mut field = FieldSpec::integer(name).nullable();
        if let Some(min) = min {
            field = field.predicate(NumericValidator::gteq(min));
        }
        if let Some(max) = max {
            field = field.predicate(NumericValidator::lteq(max));
        }
        self.field(field)
    }

    /// Check the declaration and freeze it into a [`Schema`]
    pub fn build(self) -> SchemaResult<Schema> {
        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            for predicate in &field.predicates {
                if !predicate.applies_to(field.field_type) {
                    return Err(SchemaError::IncompatiblePredicate {
                        field: field.name.clone(),
                        predicate: predicate.name().to_string(),
                        field_type: field.field_type.to_string(),
                    });
                }
                if let Err(reason) = predicate.check_declaration() {
                    return Err(SchemaError::UnsatisfiablePredicate {
                        field: field.name.clone(),
                        predicate: predicate.name().to_string(),
                        reason,
                    });
                }
            }
        }

        let mut rule_names = HashSet::new();
        for rule in &self.rules {
            if !rule_names.insert(rule.name.as_str()) {
                return Err(SchemaError::DuplicateRule(rule.name.clone()));
            }
            if rule.fields.is_empty() {
                return Err(SchemaError::EmptyRule(rule.name.clone()));
            }
            if let Some(unknown) = rule.fields.iter().find(|f| !names.contains(f.as_str())) {
                return Err(SchemaError::UnknownRuleField {
                    rule: rule.name.clone(),
                    field: unknown.clone(),
                });
            }
            if let Some(target) = &rule.target {
                if !rule.fields.contains(target) {
                    return Err(SchemaError::RuleTargetNotRead {
                        rule: rule.name.clone(),
                        field: target.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            fields = self.fields.len(),
            rules = self.rules.len(),
            "schema built"
        );

        Ok(Schema {
            fields: self.fields,
            rules: self.rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{LengthValidator, NumericValidator, PatternValidator};

    fn name_field() -> FieldSpec {
        FieldSpec::string("name").required().predicate(LengthValidator::min(5))
    }

    #[test]
    fn test_build_valid_schema() {
        let schema = Schema::builder()
            .field(name_field())
            .field(FieldSpec::string("email").required())
            .rule(
                CrossFieldRule::new("same", ["name", "email"], "differs", |_| true)
                    .attach_to("email"),
            )
            .build()
            .unwrap();

        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["name", "email"]);
        assert_eq!(schema.rules()[0].target(), "email");
        assert!(schema.field("name").unwrap().is_required());
        assert!(schema.field("age").is_none());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Schema::builder()
            .field(name_field())
            .field(FieldSpec::string("name"))
            .build()
            .unwrap_err();

        assert!(matches!(err, SchemaError::DuplicateField(name) if name == "name"));
    }

    #[test]
    fn test_rule_reading_undeclared_field_rejected() {
        let err = Schema::builder()
            .field(name_field())
            .rule(CrossFieldRule::new("legit", ["name", "nickname"], "no", |_| true))
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            SchemaError::UnknownRuleField { ref field, .. } if field == "nickname"
        ));
    }

    #[test]
    fn test_rule_target_must_be_read() {
        let err = Schema::builder()
            .field(name_field())
            .field(FieldSpec::string("email"))
            .rule(CrossFieldRule::new("legit", ["name"], "no", |_| true).attach_to("email"))
            .build()
            .unwrap_err();

        assert!(matches!(err, SchemaError::RuleTargetNotRead { .. }));
    }

    #[test]
    fn test_empty_and_duplicate_rules_rejected() {
        let empty = Schema::builder()
            .field(name_field())
            .rule(CrossFieldRule::new("nothing", Vec::<String>::new(), "no", |_| true))
            .build()
            .unwrap_err();
        assert!(matches!(empty, SchemaError::EmptyRule(_)));

        let duplicate = Schema::builder()
            .field(name_field())
            .rule(CrossFieldRule::new("r", ["name"], "no", |_| true))
            .rule(CrossFieldRule::new("r", ["name"], "no", |_| true))
            .build()
            .unwrap_err();
        assert!(matches!(duplicate, SchemaError::DuplicateRule(_)));
    }

    #[test]
    fn test_incompatible_predicate_rejected() {
        let err = Schema::builder()
            .field(FieldSpec::integer("age").predicate(LengthValidator::min(2)))
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "predicate `min_size` cannot be applied to integer field `age`"
        );

        let err = Schema::builder()
            .field(FieldSpec::string("email").predicate(NumericValidator::gt(1)))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::IncompatiblePredicate { .. }));
    }

    #[test]
    fn test_inverted_length_range_rejected() {
        let err = Schema::builder()
            .field(FieldSpec::string("code").predicate(LengthValidator::range(10, 2)))
            .build()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "predicate `size` on field `code` can never pass: \
             minimum length 10 exceeds maximum length 2"
        );
    }

    #[test]
    fn test_convenience_builders() {
        let schema = Schema::builder()
            .required_string("name", Some(2), Some(50))
            .optional_integer("age", Some(0), Some(120))
            .build()
            .unwrap();

        let name = schema.field("name").unwrap();
        let names: Vec<_> = name.predicates().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["min_size", "max_size"]);

        let age = schema.field("age").unwrap();
        assert!(!age.is_required());
        assert!(age.is_nullable());
        assert_eq!(age.predicates().len(), 2);
    }

    #[test]
    fn test_label_defaults_to_name() {
        let plain = FieldSpec::string("email").predicate(PatternValidator::new("@").unwrap());
        assert_eq!(plain.label(), "email");
        assert_eq!(plain.display_name("Email").label(), "Email");
    }

    #[test]
    fn test_schema_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Schema>();
    }
}
