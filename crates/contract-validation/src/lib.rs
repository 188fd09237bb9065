//! # contract-validation
//!
//! Declarative schema validation for flat input records.
//!
//! A [`Schema`] lists fields (type, required, nullable, predicates) and
//! cross-field rules. [`validate`] coerces a record against it and returns a
//! [`ValidationResult`] holding the typed values of declared fields plus every
//! failure, in a stable order. Undeclared input keys are never touched.
//!
//! ```
//! use contract_validation::{form_record, SimpleContract};
//!
//! let schema = SimpleContract::strict().unwrap();
//! let result = schema.validate(&form_record([("name", "Foo"), ("email", "foo-without-at-sign")]));
//!
//! assert_eq!(
//!     result.error_messages(true),
//!     vec!["name size cannot be less than 5", "email is in invalid format"]
//! );
//! ```

pub mod coerce;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod result;
pub mod schema;
pub mod simple_contract;
pub mod traits;
pub mod validators;
pub mod value;

// Re-exports for easy access
pub use config::{FieldConfig, PredicateConfig, PredicateKind, SchemaConfig};
pub use error::{Failure, FailureKind, SchemaError, SchemaResult};
pub use evaluator::validate;
pub use result::ValidationResult;
pub use schema::{CrossFieldRule, FieldSpec, Schema, SchemaBuilder};
pub use simple_contract::SimpleContract;
pub use traits::{form_record, Predicate, RecordSource};
pub use value::{FieldType, FieldValue, Values};

// Built-in predicates
pub use validators::{
    custom::CustomValidator,
    length::LengthValidator,
    numeric::{Comparison, NumericValidator},
    pattern::PatternValidator,
};
