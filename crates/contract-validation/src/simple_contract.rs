//! The sign-up contract: name, email, optional age and fingers.
//!
//! Two presets share the same fields and business rule and differ in message
//! style and in whether an explicitly empty `fingers` is accepted.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{CrossFieldRule, FieldSpec, Schema};
use crate::validators::{LengthValidator, NumericValidator, PatternValidator};
use regex::Regex;

pub const NAME_MIN_LENGTH: usize = 5;
pub const AGE_LOWER_BOUND: i64 = 10;

/// Rule name for the name/email consistency check
pub const LEGIT_NAME_RULE: &str = "legit_name";

pub struct SimpleContract;

impl SimpleContract {
    /// Terse messages labelled with raw field names; `fingers` must be filled when given.
    pub fn strict() -> SchemaResult<Schema> {
        Schema::builder()
            .field(
                FieldSpec::string("name")
                    .required()
                    .predicate(LengthValidator::min(NAME_MIN_LENGTH)),
            )
            .field(FieldSpec::string("email").required().predicate(email_format()?))
            .field(
                FieldSpec::integer("age")
                    .nullable()
                    .predicate(NumericValidator::gt(AGE_LOWER_BOUND)),
            )
            .field(FieldSpec::integer("fingers"))
            .rule(legit_name_rule()?)
            .build()
    }

    /// Humanized labels and messages; an empty `fingers` is accepted as null.
    pub fn lenient() -> SchemaResult<Schema> {
        Schema::builder()
            .field(
                FieldSpec::string("name")
                    .required()
                    .display_name("Name")
                    .predicate(
                        LengthValidator::min(NAME_MIN_LENGTH).message(format!(
                            "is too short (minimum is {} characters)",
                            NAME_MIN_LENGTH
                        )),
                    ),
            )
            .field(
                FieldSpec::string("email")
                    .required()
                    .display_name("Email")
                    .predicate(email_format()?.message("is invalid")),
            )
            .field(
                FieldSpec::integer("age")
                    .nullable()
                    .display_name("Age")
                    .predicate(NumericValidator::gt(AGE_LOWER_BOUND)),
            )
            .field(FieldSpec::integer("fingers").nullable().display_name("Fingers"))
            .rule(legit_name_rule()?)
            .build()
    }
}

fn email_format() -> SchemaResult<PatternValidator> {
    PatternValidator::new("@").map_err(|source| SchemaError::InvalidPattern {
        field: "email".to_string(),
        source,
    })
}

/// The email's local part must equal the lower-cased name
fn legit_name_rule() -> SchemaResult<CrossFieldRule> {
    let local_part = Regex::new("(.+)@").map_err(|source| SchemaError::InvalidPattern {
        field: "email".to_string(),
        source,
    })?;

    Ok(CrossFieldRule::new(
        LEGIT_NAME_RULE,
        ["name", "email"],
        "seems not legit",
        move |values| {
            let name = values.get_str("name").unwrap_or_default();
            values
                .get_str("email")
                .and_then(|email| local_part.captures(email))
                .and_then(|captures| captures.get(1))
                .map_or(false, |local| local.as_str() == name.to_lowercase())
        },
    ))
}
