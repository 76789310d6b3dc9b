use agentbuilder::cli::schema_exports;
use agentbuilder::{register_schema, validate_schema, Schema, SchemaKind, SchemaRegistry};
use serde_json::json;

#[test]
fn schema_registry_registers_and_validates() {
    let mut registry = SchemaRegistry::new();
    registry.register(
        "analytic",
        Schema::object([
            ("key", Schema::string(), true),
            (
                "type",
                Schema::enumeration(["free_text", "enum_list", "numeric_range"]),
                true,
            ),
            ("prompt", Schema::string(), false),
        ])
        .closed(),
    );

    let value = json!({ "key": "outcome", "type": "free_text" });
    assert!(registry.validate("analytic", &value).is_ok());

    let missing = json!({ "type": "free_text" });
    assert!(registry.validate("analytic", &missing).is_err());

    let wrong_enum = json!({ "key": "outcome", "type": "yes_no" });
    assert!(registry.validate("analytic", &wrong_enum).is_err());

    let extra = json!({ "key": "outcome", "type": "free_text", "weight": 2 });
    assert!(registry.validate("analytic", &extra).is_err());
}

#[test]
fn global_registry_helpers_work() {
    register_schema(
        "test.nullable_string",
        Schema::new(SchemaKind::String)
            .nullable()
            .with_name("test.nullable_string"),
    );
    assert!(validate_schema("test.nullable_string", &json!("ok")).is_ok());
    assert!(validate_schema("test.nullable_string", &json!(null)).is_ok());
    assert!(validate_schema("test.nullable_string", &json!(123)).is_err());
}

#[test]
fn non_empty_arrays_are_enforced() {
    let mut registry = SchemaRegistry::new();
    registry.register("tasks", Schema::non_empty_array(Schema::any()));
    assert!(registry.validate("tasks", &json!([])).is_err());
    assert!(registry.validate("tasks", &json!([{}])).is_ok());
}

#[test]
fn schema_definitions_round_trip_through_json() {
    let schema = Schema::map(Schema::object([("system_prompt", Schema::string(), true)]));
    let text = serde_json::to_string(&schema).unwrap();
    let parsed: Schema = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, schema);
}

#[test]
fn export_lists_builtin_schemas() {
    let names: Vec<String> = schema_exports().into_iter().map(|entry| entry.name).collect();
    assert!(names.iter().any(|name| name == "agent_payload"));
    assert!(names.iter().any(|name| name == "draft_limits"));
}
