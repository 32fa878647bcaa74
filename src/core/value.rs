//! Coercion rules for dynamic element values.
//!
//! Collection elements are plain `serde_json::Value`s. Queries compare them
//! with a loose, type-coercing equality that treats numeric strings and
//! numbers as equivalent. The rules live here as free functions so each one
//! can be tested on its own.

use serde_json::Value;

/// Returns a short name for the JSON type of `value`.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Truthiness as used by positional lookups (`first`, `where_row`).
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads `column` from a structured element.
///
/// Objects are looked up by name, arrays by a decimal index. Every other
/// value has no fields, so the lookup yields `None`.
pub fn field<'a>(element: &'a Value, column: &str) -> Option<&'a Value> {
    match element {
        Value::Object(map) => map.get(column),
        Value::Array(items) => column.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }
}

/// Numeric coercion: null is 0, booleans are 0/1, strings are parsed after
/// trimming (empty is 0, garbage is NaN), arrays go through their string form
/// and objects are NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        Value::Array(_) => parse_number(&primitive_string(value)),
        Value::Object(_) => f64::NAN,
    }
}

fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust accepts "inf"/"nan" spellings that must not coerce.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

fn number_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        format_number(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// String form of a value when it is used where a primitive is expected.
fn primitive_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => primitive_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Converts a field value into a mapping key, the way `list` keys entries.
/// An absent value becomes `"undefined"`.
pub fn property_key(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), primitive_string)
}

/// Type-coercing equality.
///
/// - null only equals null (absent fields are read as null by callers);
/// - values of the same JSON type compare by value, composites structurally;
/// - a number and a string compare numerically;
/// - a boolean is replaced by 0/1 and the comparison retried;
/// - an array or object against a primitive is replaced by its string form
///   and the comparison retried.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,

        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(_), Value::Number(_)) => to_number(left) == to_number(right),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => a == b,
        (Value::Object(a), Value::Object(b)) => a == b,
        (Value::Array(_), Value::Object(_)) | (Value::Object(_), Value::Array(_)) => false,

        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            to_number(left) == to_number(right)
        }

        (Value::Bool(b), other) | (other, Value::Bool(b)) => {
            loose_eq(&Value::from(u8::from(*b)), other)
        }

        (composite @ (Value::Array(_) | Value::Object(_)), primitive)
        | (primitive, composite @ (Value::Array(_) | Value::Object(_))) => {
            loose_eq(&Value::String(primitive_string(composite)), primitive)
        }
    }
}
