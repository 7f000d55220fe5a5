//! Validate call arguments against a registered JSON Schema.

/// Check arguments against a JSON Schema before execution.
///
/// Top-level validation only: root type, required-field presence, and
/// property types. Returns the first violation found.
pub fn validate_arguments(
    args: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<(), String> {
    if schema.get("type").and_then(|t| t.as_str()) == Some("object") && !args.is_object() {
        return Err(format!("expected object arguments, got {}", type_name(args)));
    }

    let Some(obj) = args.as_object() else {
        return Ok(());
    };

    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for field in required.iter().filter_map(|f| f.as_str()) {
            if !obj.contains_key(field) {
                return Err(format!("missing required field '{field}'"));
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(|p| p.as_object()) else {
        return Ok(());
    };

    for (key, value) in obj {
        let Some(expected) = properties
            .get(key)
            .and_then(|p| p.get("type"))
            .and_then(|t| t.as_str())
        else {
            continue;
        };
        if !matches_type(value, expected) {
            return Err(format!(
                "field '{key}' expected type '{expected}', got {}",
                type_name(value)
            ));
        }
    }

    Ok(())
}

fn matches_type(value: &serde_json::Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object_args_when_schema_expects_object() {
        let schema = json!({ "type": "object", "properties": {}, "required": [] });
        let err = validate_arguments(&json!("text"), &schema).unwrap_err();
        assert!(err.contains("expected object"));
    }

    #[test]
    fn rejects_missing_required_field() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "integer" } },
            "required": ["a"],
        });
        let err = validate_arguments(&json!({}), &schema).unwrap_err();
        assert!(err.contains("missing required field 'a'"));
    }

    #[test]
    fn rejects_field_with_wrong_type() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "integer" } },
            "required": ["a"],
        });
        let err = validate_arguments(&json!({ "a": "one" }), &schema).unwrap_err();
        assert!(err.contains("expected type 'integer'"));
    }

    #[test]
    fn accepts_valid_args() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "integer" }, "b": { "type": "string" } },
            "required": ["a"],
        });
        assert!(validate_arguments(&json!({ "a": 1 }), &schema).is_ok());
        assert!(validate_arguments(&json!({ "a": 1, "b": "x" }), &schema).is_ok());
    }

    #[test]
    fn accepts_extra_fields_not_in_properties() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "integer" } },
            "required": [],
        });
        assert!(validate_arguments(&json!({ "other": true }), &schema).is_ok());
    }

    #[test]
    fn empty_schema_accepts_anything() {
        assert!(validate_arguments(&json!({ "x": 42 }), &json!({})).is_ok());
        assert!(validate_arguments(&serde_json::Value::Null, &json!({})).is_ok());
    }
}
