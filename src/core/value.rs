//! Value helpers shared by every node of the tree
//!
//! The emptiness predicate lives here and only here: inputs, array inputs and
//! collections all decide "is this value empty?" through [`is_empty_value`].

use serde_json::Value;

/// Returns `true` when a value counts as empty.
///
/// Absent values, `null`, the empty string, the empty array and the empty
/// object are empty. Numbers (including `0`) and booleans (including `false`)
/// never are.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => false,
    }
}

/// Human readable JSON type name, used in error messages and logs
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === is_empty_value() ===

    #[test]
    fn test_absent_is_empty() {
        assert!(is_empty_value(None));
    }

    #[test]
    fn test_null_is_empty() {
        assert!(is_empty_value(Some(&json!(null))));
    }

    #[test]
    fn test_empty_string_is_empty() {
        assert!(is_empty_value(Some(&json!(""))));
    }

    #[test]
    fn test_whitespace_string_is_not_empty() {
        assert!(!is_empty_value(Some(&json!(" "))));
    }

    #[test]
    fn test_empty_containers_are_empty() {
        assert!(is_empty_value(Some(&json!([]))));
        assert!(is_empty_value(Some(&json!({}))));
    }

    #[test]
    fn test_zero_and_false_are_not_empty() {
        assert!(!is_empty_value(Some(&json!(0))));
        assert!(!is_empty_value(Some(&json!(0.0))));
        assert!(!is_empty_value(Some(&json!(false))));
    }

    #[test]
    fn test_filled_containers_are_not_empty() {
        assert!(!is_empty_value(Some(&json!([null]))));
        assert!(!is_empty_value(Some(&json!({"a": null}))));
    }

    // === type_name() ===

    #[test]
    fn test_type_name_covers_all_variants() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(true)), "boolean");
        assert_eq!(type_name(&json!(1)), "number");
        assert_eq!(type_name(&json!("x")), "string");
        assert_eq!(type_name(&json!([])), "array");
        assert_eq!(type_name(&json!({})), "object");
    }
}
