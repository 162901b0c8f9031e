//! Override value coercion
//!
//! Level 4 - Utilities
//!
//! CLOP hands every parameter over as text. The engine config is typed, so
//! each value is stored as the narrowest JSON scalar it parses as.

use serde_json::{Number, Value};

/// Coerce a raw parameter value into a JSON scalar
///
/// First match wins:
/// 1. parses as a float but not as an integer -> float (`"3.5"`, `"3.0"`, `"1e3"`)
/// 2. parses as an integer -> integer (`"3"`, `"-7"`)
/// 3. anything else -> the original string
///
/// Non-finite floats (`inf`, `NaN`) have no JSON form and stay strings.
pub fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();

    if let Some(int) = parse_integer(trimmed) {
        return int;
    }

    match trimmed.parse::<f64>() {
        Ok(float) => Number::from_f64(float)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        Err(_) => Value::String(raw.to_string()),
    }
}

/// Integer parse with no size limit
///
/// Literals beyond 64 bits are kept digit-for-digit as arbitrary-precision
/// JSON numbers.
fn parse_integer(text: &str) -> Option<Value> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Value::from(int));
    }
    if let Ok(int) = text.parse::<u64>() {
        return Some(Value::from(int));
    }

    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // JSON forbids leading zeros
    let digits = digits.trim_start_matches('0');
    let literal = if digits.is_empty() {
        "0".to_string()
    } else {
        format!("{}{}", sign, digits)
    };

    serde_json::from_str::<Number>(&literal).ok().map(Value::Number)
}

/// Short name of a coerced value's type, for logging
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Bool(_) => "bool",
        Value::Null => "null",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
