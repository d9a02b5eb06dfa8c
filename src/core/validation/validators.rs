//! Reusable value validators
//!
//! Each factory returns a closure usable anywhere a
//! [`Validator`](crate::chain::Validator) is expected. Validators that only
//! make sense for one JSON type let other types through, so a type check such
//! as [`is_string`] should run first (as a breaking validator) when the type
//! matters.

use crate::core::messages::{Messages, violation};
use serde_json::Value;

pub const IS_EMPTY: &str = "isEmpty";
pub const NOT_STRING: &str = "notString";
pub const STRING_LENGTH_TOO_SHORT: &str = "stringLengthTooShort";
pub const STRING_LENGTH_TOO_LONG: &str = "stringLengthTooLong";
pub const NOT_GREATER_THAN: &str = "notGreaterThan";
pub const NOT_LESS_THAN_INCLUSIVE: &str = "notLessThanInclusive";
pub const NOT_IN_ARRAY: &str = "notInArray";
pub const INVALID_DATE: &str = "dateInvalidDate";
pub const REGEX_NOT_MATCH: &str = "regexNotMatch";
pub const NOT_SAME: &str = "notSame";
pub const MISSING_TOKEN: &str = "missingToken";

/// Validator: value is not empty (`null`, `""`, `[]` or `{}`)
pub fn not_empty() -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone
{
    |value: &Value, _: Option<&Value>| {
        if crate::core::value::is_empty_value(Some(value)) {
            Err(violation(IS_EMPTY, "Value is required and can't be empty"))
        } else {
            Ok(())
        }
    }
}

/// Validator: value is a string
pub fn is_string() -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone
{
    |value: &Value, _: Option<&Value>| {
        if value.is_string() {
            Ok(())
        } else {
            Err(violation(NOT_STRING, "Invalid type given. String expected"))
        }
    }
}

/// Validator: string length (in characters) must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone {
    move |value: &Value, _: Option<&Value>| {
        if let Some(s) = value.as_str() {
            let len = s.chars().count();
            if len < min {
                Err(violation(
                    STRING_LENGTH_TOO_SHORT,
                    format!("The input is less than {} characters long", min),
                ))
            } else if len > max {
                Err(violation(
                    STRING_LENGTH_TOO_LONG,
                    format!("The input is more than {} characters long", max),
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string must be at least `min` characters long
pub fn min_length(
    min: usize,
) -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone {
    string_length(min, usize::MAX)
}

/// Validator: number must be strictly positive
pub fn positive() -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone
{
    |value: &Value, _: Option<&Value>| match value.as_f64() {
        Some(num) if num <= 0.0 => Err(violation(
            NOT_GREATER_THAN,
            format!("The input is not greater than 0 (value: {})", num),
        )),
        _ => Ok(()),
    }
}

/// Validator: number must not exceed maximum
pub fn max_value(
    max: f64,
) -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone {
    move |value: &Value, _: Option<&Value>| match value.as_f64() {
        Some(num) if num > max => Err(violation(
            NOT_LESS_THAN_INCLUSIVE,
            format!("The input is not less or equal than {} (value: {})", max, num),
        )),
        _ => Ok(()),
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone {
    move |value: &Value, _: Option<&Value>| {
        if let Some(s) = value.as_str() {
            if allowed.iter().any(|candidate| candidate == s) {
                Ok(())
            } else {
                Err(violation(
                    NOT_IN_ARRAY,
                    format!("The input '{}' was not found in the haystack {:?}", s, allowed),
                ))
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: date must match format
pub fn date_format(
    format: &'static str,
) -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone {
    move |value: &Value, _: Option<&Value>| {
        if let Some(s) = value.as_str() {
            match chrono::NaiveDate::parse_from_str(s, format) {
                Ok(_) => Ok(()),
                Err(_) => Err(violation(
                    INVALID_DATE,
                    format!("The input does not fit the date format '{}'", format),
                )),
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string must match the regular expression
pub fn regex(
    pattern: &str,
) -> Result<
    impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone,
    regex::Error,
> {
    let compiled = regex::Regex::new(pattern)?;
    Ok(move |value: &Value, _: Option<&Value>| {
        if let Some(s) = value.as_str() {
            if compiled.is_match(s) {
                Ok(())
            } else {
                Err(violation(
                    REGEX_NOT_MATCH,
                    format!("The input does not match against pattern '{}'", compiled.as_str()),
                ))
            }
        } else {
            Ok(())
        }
    })
}

/// Validator: value must equal the context entry named `token`
///
/// Typical use is a password confirmation compared against the `password`
/// field of the payload, which input filters pass as the default context.
pub fn identical(
    token: impl Into<String>,
) -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone {
    let token = token.into();
    move |value: &Value, context: Option<&Value>| match context.and_then(|ctx| ctx.get(&token)) {
        Some(expected) if expected == value => Ok(()),
        Some(_) => Err(violation(NOT_SAME, "The two given tokens do not match")),
        None => Err(violation(
            MISSING_TOKEN,
            format!("No token '{}' was provided to match against", token),
        )),
    }
}

/// Validator: arbitrary predicate reporting `message` under `key` on failure
pub fn callback<F>(
    key: impl Into<String>,
    message: impl Into<String>,
    predicate: F,
) -> impl Fn(&Value, Option<&Value>) -> Result<(), Messages> + Send + Sync + Clone
where
    F: Fn(&Value, Option<&Value>) -> bool + Send + Sync + Clone,
{
    let key = key.into();
    let message = message.into();
    move |value: &Value, context: Option<&Value>| {
        if predicate(value, context) {
            Ok(())
        } else {
            Err(violation(key.clone(), message.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === not_empty() ===

    #[test]
    fn test_not_empty_rejects_empty_values() {
        let v = not_empty();
        assert!(v(&json!(null), None).is_err());
        assert!(v(&json!(""), None).is_err());
        assert!(v(&json!([]), None).is_err());
        let err = v(&json!({}), None).unwrap_err();
        assert!(err.contains_key(IS_EMPTY));
    }

    #[test]
    fn test_not_empty_accepts_zero() {
        let v = not_empty();
        assert!(v(&json!(0), None).is_ok());
        assert!(v(&json!(false), None).is_ok());
    }

    // === is_string() ===

    #[test]
    fn test_is_string() {
        let v = is_string();
        assert!(v(&json!("x"), None).is_ok());
        assert!(v(&json!(1), None).unwrap_err().contains_key(NOT_STRING));
    }

    // === string_length() ===

    #[test]
    fn test_string_length_too_short_returns_error() {
        let v = string_length(3, 50);
        let err = v(&json!("ab"), None).unwrap_err();
        assert!(err[STRING_LENGTH_TOO_SHORT].contains("less than 3"));
    }

    #[test]
    fn test_string_length_too_long_returns_error() {
        let v = string_length(1, 5);
        let err = v(&json!("abcdef"), None).unwrap_err();
        assert!(err[STRING_LENGTH_TOO_LONG].contains("more than 5"));
    }

    #[test]
    fn test_string_length_bounds_are_inclusive() {
        let v = string_length(3, 5);
        assert!(v(&json!("abc"), None).is_ok());
        assert!(v(&json!("abcde"), None).is_ok());
    }

    #[test]
    fn test_string_length_counts_characters() {
        let v = string_length(1, 2);
        assert!(v(&json!("éé"), None).is_ok());
    }

    #[test]
    fn test_string_length_non_string_passthrough() {
        let v = string_length(5, 10);
        assert!(v(&json!(42), None).is_ok());
    }

    #[test]
    fn test_min_length() {
        let v = min_length(3);
        assert!(v(&json!("ab"), None).is_err());
        assert!(v(&json!("abcd"), None).is_ok());
    }

    // === positive() ===

    #[test]
    fn test_positive() {
        let v = positive();
        assert!(v(&json!(-5.0), None).is_err());
        assert!(v(&json!(0), None).is_err());
        assert!(v(&json!(42.5), None).is_ok());
        assert!(v(&json!("hello"), None).is_ok());
    }

    // === max_value() ===

    #[test]
    fn test_max_value() {
        let v = max_value(100.0);
        assert!(v(&json!(101.0), None).unwrap_err().contains_key(NOT_LESS_THAN_INCLUSIVE));
        assert!(v(&json!(100), None).is_ok());
        assert!(v(&json!("name"), None).is_ok());
    }

    // === in_list() ===

    #[test]
    fn test_in_list() {
        let v = in_list(vec!["active".into(), "inactive".into()]);
        assert!(v(&json!("active"), None).is_ok());
        assert!(v(&json!("deleted"), None).unwrap_err().contains_key(NOT_IN_ARRAY));
        assert!(v(&json!(42), None).is_ok());
    }

    // === date_format() ===

    #[test]
    fn test_date_format() {
        let v = date_format("%Y-%m-%d");
        assert!(v(&json!("2024-01-15"), None).is_ok());
        assert!(v(&json!("not-a-date"), None).unwrap_err().contains_key(INVALID_DATE));
        assert!(v(&json!(12345), None).is_ok());
    }

    // === regex() ===

    #[test]
    fn test_regex() {
        let v = regex(r"^[a-z]+$").expect("valid pattern");
        assert!(v(&json!("abc"), None).is_ok());
        assert!(v(&json!("ABC"), None).unwrap_err().contains_key(REGEX_NOT_MATCH));
    }

    #[test]
    fn test_regex_invalid_pattern() {
        assert!(regex("(unclosed").is_err());
    }

    // === identical() ===

    #[test]
    fn test_identical_uses_context() {
        let v = identical("password");
        let ctx = json!({"password": "secret"});
        assert!(v(&json!("secret"), Some(&ctx)).is_ok());
        assert!(v(&json!("other"), Some(&ctx)).unwrap_err().contains_key(NOT_SAME));
        assert!(v(&json!("secret"), None).unwrap_err().contains_key(MISSING_TOKEN));
    }

    // === callback() ===

    #[test]
    fn test_callback() {
        let v = callback("notEven", "The value must be even", |value: &Value, _: Option<&Value>| {
            value.as_i64().is_some_and(|n| n % 2 == 0)
        });
        assert!(v(&json!(4), None).is_ok());
        assert_eq!(
            v(&json!(3), None).unwrap_err().get("notEven").map(String::as_str),
            Some("The value must be even")
        );
    }
}
