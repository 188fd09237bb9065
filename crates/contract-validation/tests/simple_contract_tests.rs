//! Sign-up contract scenarios fed from the input formats callers typically decode

use contract_validation::{
    form_record, FailureKind, FieldValue, Schema, SimpleContract, ValidationResult,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

fn strict() -> Schema {
    SimpleContract::strict().expect("strict preset builds")
}

fn lenient() -> Schema {
    SimpleContract::lenient().expect("lenient preset builds")
}

fn plain(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

fn from_json(body: &str) -> Map<String, Value> {
    serde_json::from_str(body).expect("valid JSON")
}

/// Minimal `a=b&c=d` reader; the fixtures need no percent-decoding.
fn from_query(query: &str) -> HashMap<String, Value> {
    form_record(query.split('&').map(|pair| match pair.split_once('=') {
        Some((key, value)) => (key, value),
        None => (pair, ""),
    }))
}

/// Header row plus first data row, comma separated without quoting.
fn from_csv(csv: &str) -> HashMap<String, Value> {
    let mut lines = csv.lines();
    let headers = lines.next().expect("header row").split(',');
    let row = lines.next().expect("data row").split(',');
    form_record(headers.zip(row))
}

fn messages(result: &ValidationResult) -> Vec<String> {
    result.error_messages(true)
}

mod strict_contract {
    use super::*;

    #[test]
    fn name_too_short() {
        let result = strict().validate(&plain(json!({"name": "Foo", "email": "foo@bar.com"})));

        assert!(result.is_failure());
        assert_eq!(messages(&result), vec!["name size cannot be less than 5"]);
    }

    #[test]
    fn email_invalid() {
        let input = plain(json!({"name": "FooBar", "email": "foo-without-at-sign"}));
        let result = strict().validate(&input);

        assert_eq!(messages(&result), vec!["email is in invalid format"]);
    }

    #[test]
    fn business_rule() {
        let input = plain(json!({"name": "FooBar", "email": "bazquz@quz.com"}));
        let result = strict().validate(&input);

        assert_eq!(messages(&result), vec!["name seems not legit"]);
        assert_eq!(
            result.failures()[0].kind,
            FailureKind::CrossFieldFailed("legit_name".into())
        );
    }

    #[test]
    fn all_issues_in_declaration_order() {
        let input = plain(json!({"name": "Foo", "email": "foo-without-at-sign"}));
        let result = strict().validate(&input);

        assert_eq!(
            messages(&result),
            vec!["name size cannot be less than 5", "email is in invalid format"]
        );
        let kinds: Vec<String> = result.failures().iter().map(|f| f.kind.to_string()).collect();
        assert_eq!(kinds, vec!["predicate_failed:min_size", "predicate_failed:format"]);
    }

    #[test]
    fn business_rule_suppressed_by_field_failures() {
        let result = strict().validate(&plain(json!({"name": "Foo", "email": "x"})));

        assert_eq!(result.failures().len(), 2);
        assert!(!result.failures().iter().any(|f| f.kind.is_cross_field()));
    }

    #[test]
    fn optional_field_passed() {
        let input = plain(json!({"name": "FooBar", "email": "foobar@example.com", "age": 9}));
        let result = strict().validate(&input);

        assert_eq!(messages(&result), vec!["age must be greater than 10"]);
    }

    #[test]
    fn optional_field_unfilled() {
        let input = plain(json!({
            "name": "FooBar",
            "email": "foobar@example.com",
            "fingers": null
        }));
        let result = strict().validate(&input);

        assert_eq!(messages(&result), vec!["fingers must be filled"]);
        assert_eq!(result.failures()[0].kind, FailureKind::Blank);
    }

    #[test]
    fn unfilled_fields_in_query_string() {
        let result =
            strict().validate(&from_query("name=FooBar&email=foobar@example.com&fingers="));

        assert_eq!(messages(&result), vec!["fingers must be filled"]);
    }

    #[test]
    fn missing_required_fields() {
        let result = strict().validate(&plain(json!({"age": 11})));

        assert_eq!(messages(&result), vec!["name is required", "email is required"]);
        assert!(result.failures().iter().all(|f| f.kind == FailureKind::Missing));
    }

    #[test]
    fn wrong_types() {
        let result = strict().validate(&plain(json!({
            "name": ["FooBar"],
            "email": "foobar@example.com",
            "age": "eleven",
        })));

        assert_eq!(messages(&result), vec!["name must be a string", "age must be an integer"]);
    }
}

mod lenient_contract {
    use super::*;

    #[test]
    fn name_too_short() {
        let result = lenient().validate(&plain(json!({"name": "Foo", "email": "foo@bar.com"})));

        assert_eq!(messages(&result), vec!["Name is too short (minimum is 5 characters)"]);
    }

    #[test]
    fn email_invalid() {
        let input = plain(json!({"name": "FooBar", "email": "foo-without-at-sign"}));
        let result = lenient().validate(&input);

        assert_eq!(messages(&result), vec!["Email is invalid"]);
    }

    #[test]
    fn business_rule() {
        let input = plain(json!({"name": "FooBar", "email": "bazquz@quz.com"}));
        let result = lenient().validate(&input);

        assert_eq!(messages(&result), vec!["Name seems not legit"]);
    }

    #[test]
    fn all_issues() {
        let input = plain(json!({"name": "Foo", "email": "foo-without-at-sign"}));
        let result = lenient().validate(&input);

        assert_eq!(
            messages(&result),
            vec!["Name is too short (minimum is 5 characters)", "Email is invalid"]
        );
    }

    #[test]
    fn optional_field_passed() {
        let input = plain(json!({"name": "FooBar", "email": "foobar@example.com", "age": 9}));
        let result = lenient().validate(&input);

        assert_eq!(messages(&result), vec!["Age must be greater than 10"]);
    }

    #[test]
    fn optional_field_unfilled_is_accepted() {
        let input = plain(json!({
            "name": "FooBar",
            "email": "foobar@example.com",
            "fingers": null
        }));
        let result = lenient().validate(&input);

        assert!(result.is_success());
        assert_eq!(result.values().get("fingers"), Some(&FieldValue::Null));
    }

    #[test]
    fn unfilled_fields_in_query_string_are_accepted() {
        let result =
            lenient().validate(&from_query("name=FooBar&email=foobar@example.com&fingers="));

        assert!(result.is_success());
    }

    #[test]
    fn short_messages_have_no_label() {
        let result = lenient().validate(&plain(json!({"name": "FooBar", "email": "nope"})));

        assert_eq!(result.error_messages(false), vec!["is invalid"]);
    }
}

mod valid_data {
    use super::*;

    fn both() -> [Schema; 2] {
        [strict(), lenient()]
    }

    #[test]
    fn plain_data() {
        for schema in both() {
            let input = plain(json!({"name": "FooBar", "email": "foobar@example.com"}));
            assert!(schema.validate(&input).is_success());
        }
    }

    #[test]
    fn string_keyed_data() {
        let mut record = HashMap::new();
        record.insert("name".to_string(), json!("FooBar"));
        record.insert("email".to_string(), json!("foobar@example.com"));

        for schema in both() {
            assert!(schema.validate(&record).is_success());
        }
    }

    #[test]
    fn json_data() {
        let record = from_json(r#"{"name":"FooBar","email":"foobar@example.com"}"#);
        for schema in both() {
            assert!(schema.validate(&record).is_success());
        }
    }

    #[test]
    fn form_encoded_data() {
        let record = from_query("name=FooBar&email=foobar@example.com&age=11&fingers=7");
        for schema in both() {
            let result = schema.validate(&record);
            assert!(result.is_success(), "{:?}", result.failures());
            assert_eq!(result.values().get_i64("age"), Some(11));
        }
    }

    #[test]
    fn csv_data() {
        let record = from_csv("name,email,age,fingers\nFooBar,foobar@example.com,11,7\n");
        for schema in both() {
            let result = schema.validate(&record);
            assert!(result.is_success());

            let map = result.to_map();
            assert_eq!(map["age"], FieldValue::Integer(11));
            assert_eq!(map["fingers"], FieldValue::Integer(7));
        }
    }

    #[test]
    fn end_to_end_native_values() {
        let result = strict().validate(&plain(json!({
            "name": "FooBar",
            "email": "foobar@example.com",
            "age": 11,
            "fingers": 7,
        })));

        assert!(result.is_success());
        assert_eq!(
            result.to_json(),
            json!({"name": "FooBar", "email": "foobar@example.com", "age": 11, "fingers": 7})
        );
    }

    #[test]
    fn optional_field_left_empty() {
        let record = from_query("name=FooBar&email=foobar@example.com&age=&fingers=7");
        for schema in both() {
            let result = schema.validate(&record);
            assert!(result.is_success());

            let map = result.to_map();
            assert_eq!(map["age"], FieldValue::Null);
            assert_eq!(map["fingers"], FieldValue::Integer(7));
        }
    }

    #[test]
    fn absent_optional_field_is_omitted() {
        let result = strict().validate(&from_query("name=FooBar&email=foobar@example.com"));

        assert!(result.is_success());
        assert!(!result.to_map().contains_key("age"));
        assert!(!result.to_map().contains_key("fingers"));
    }

    #[test]
    fn undeclared_keys_are_dropped() {
        let record = plain(json!({
            "name": "FooBar",
            "email": "foobar@example.com",
            "some_very_long_denial_of_service": "PWNED",
        }));

        for schema in both() {
            let result = schema.validate(&record);
            assert_eq!(result.to_json(), json!({"name": "FooBar", "email": "foobar@example.com"}));
            assert!(!result.to_map().contains_key("some_very_long_denial_of_service"));
        }
    }
}
