//! Reusable value filters
//!
//! These filters transform input values before validation. A filter that does
//! not apply to the value it receives returns it unchanged.

use crate::core::value::is_empty_value;
use serde_json::{Value, json};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| {
        if let Some(s) = value.as_str() {
            Value::String(s.trim().to_string())
        } else {
            value
        }
    }
}

/// Filter: convert string to uppercase
pub fn uppercase() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| {
        if let Some(s) = value.as_str() {
            Value::String(s.to_uppercase())
        } else {
            value
        }
    }
}

/// Filter: convert string to lowercase
pub fn lowercase() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| {
        if let Some(s) = value.as_str() {
            Value::String(s.to_lowercase())
        } else {
            value
        }
    }
}

/// Filter: round number to specified decimal places
pub fn round_decimals(decimals: u32) -> impl Fn(Value) -> Value + Send + Sync + Clone {
    move |value: Value| {
        if let Some(num) = value.as_f64() {
            let factor = 10_f64.powi(decimals as i32);
            let rounded = (num * factor).round() / factor;
            json!(rounded)
        } else {
            value
        }
    }
}

/// Filter: parse integer strings and truncate floats to integers
pub fn to_int() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| {
        let converted = match &value {
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            Value::Number(n) if !n.is_i64() && !n.is_u64() => {
                n.as_f64().map(|f| Value::from(f.trunc() as i64))
            }
            _ => None,
        };
        converted.unwrap_or(value)
    }
}

/// Filter: turn empty strings, empty arrays and empty objects into `null`
pub fn to_null() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| {
        if is_empty_value(Some(&value)) {
            Value::Null
        } else {
            value
        }
    }
}
