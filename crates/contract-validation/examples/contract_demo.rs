//! Walkthrough of the sign-up contract and a config-driven schema

use contract_validation::{
    form_record, CrossFieldRule, SchemaConfig, SimpleContract, ValidationResult,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const PROFILE_SCHEMA: &str = r#"
fields:
  - name: username
    type: string
    required: true
    predicates:
      - kind: size
        min: 3
        max: 16
  - name: password
    type: string
    required: true
    predicates:
      - kind: min_size
        value: 8
  - name: password_confirmation
    type: string
    required: true
  - name: role
    type: string
    nullable: true
    predicates:
      - kind: included_in
        values: [admin, editor, viewer]
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🦀 contract-validation Demo");
    println!("===========================\n");

    demo_presets()?;
    demo_config_schema()?;

    println!("✅ All validation demos completed successfully!");
    Ok(())
}

fn report(label: &str, result: &ValidationResult) {
    if result.is_success() {
        println!("  ✅ {} → {}", label, result.to_json());
    } else {
        println!("  ❌ {}", label);
        for message in result.error_messages(true) {
            println!("     - {}", message);
        }
    }
}

fn demo_presets() -> Result<(), Box<dyn std::error::Error>> {
    println!("📝 Demo 1: Sign-up contract presets");
    println!("------------------------------------");

    let strict = SimpleContract::strict()?;
    let lenient = SimpleContract::lenient()?;

    let all_issues = json!({"name": "Foo", "email": "foo-without-at-sign"});
    let all_issues = all_issues.as_object().ok_or("object expected")?;
    report("strict, all issues", &strict.validate(all_issues));
    report("lenient, all issues", &lenient.validate(all_issues));

    let query = form_record([
        ("name", "FooBar"),
        ("email", "foobar@example.com"),
        ("age", ""),
        ("fingers", ""),
    ]);
    report("strict, empty fingers", &strict.validate(&query));
    report("lenient, empty fingers", &lenient.validate(&query));

    println!();
    Ok(())
}

fn demo_config_schema() -> Result<(), Box<dyn std::error::Error>> {
    println!("📝 Demo 2: Schema from YAML config");
    println!("-----------------------------------");

    let schema = SchemaConfig::from_yaml_str(PROFILE_SCHEMA)?
        .into_builder()?
        .rule(
            CrossFieldRule::new(
                "password_match",
                ["password", "password_confirmation"],
                "does not match password",
                |values| values.get_str("password") == values.get_str("password_confirmation"),
            )
            .attach_to("password_confirmation"),
        )
        .build()?;

    report(
        "matching passwords",
        &schema.validate(&form_record([
            ("username", "ferris"),
            ("password", "crabby-secret"),
            ("password_confirmation", "crabby-secret"),
            ("role", "editor"),
        ])),
    );
    report(
        "mismatched passwords, unknown role",
        &schema.validate(&form_record([
            ("username", "ferris"),
            ("password", "crabby-secret"),
            ("password_confirmation", "crabby-secrет"),
            ("role", "owner"),
        ])),
    );

    println!();
    Ok(())
}
