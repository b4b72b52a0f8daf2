//! Numeric coercion for loosely typed record fields
//!
//! Loaders hand us JSON values that may be numbers, numeric strings or
//! booleans. These helpers normalize them to the canonical types used by
//! the metrics calculator and reject everything else.

use serde_json::Value;

/// Largest float magnitude that still truncates into an `i64`
const I64_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_807.0;

/// Coerce a value to an integer
///
/// Floats are truncated toward zero, booleans map to 1/0 and strings must
/// hold a base-10 integer (surrounding whitespace is ignored).
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Some(int);
            }
            if let Some(unsigned) = number.as_u64() {
                return i64::try_from(unsigned).ok();
            }
            number.as_f64().and_then(truncate_float)
        }
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Coerce a value to a finite float
pub fn coerce_float(value: &Value) -> Option<f64> {
    let float = match value {
        Value::Number(number) => number.as_f64()?,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    float.is_finite().then_some(float)
}

/// Render an identifier value for display
pub fn display_identifier(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn truncate_float(float: f64) -> Option<i64> {
    if !float.is_finite() || float.abs() >= I64_FLOAT_LIMIT {
        return None;
    }
    Some(float.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_from_numeric_string() {
        assert_eq!(coerce_integer(&json!("45")), Some(45));
        assert_eq!(coerce_integer(&json!("  -7 ")), Some(-7));
    }

    #[test]
    fn test_integer_rejects_decimal_string() {
        assert_eq!(coerce_integer(&json!("12.5")), None);
        assert_eq!(coerce_integer(&json!("abc")), None);
        assert_eq!(coerce_integer(&json!("")), None);
    }

    #[test]
    fn test_integer_truncates_floats() {
        assert_eq!(coerce_integer(&json!(12.9)), Some(12));
        assert_eq!(coerce_integer(&json!(-0.5)), Some(0));
    }

    #[test]
    fn test_integer_from_bool() {
        assert_eq!(coerce_integer(&json!(true)), Some(1));
        assert_eq!(coerce_integer(&json!(false)), Some(0));
    }

    #[test]
    fn test_integer_rejects_containers() {
        assert_eq!(coerce_integer(&json!([1])), None);
        assert_eq!(coerce_integer(&json!({"value": 1})), None);
    }

    #[test]
    fn test_float_parsing() {
        assert_eq!(coerce_float(&json!("1.15")), Some(1.15));
        assert_eq!(coerce_float(&json!(75)), Some(75.0));
        assert_eq!(coerce_float(&json!(" 0.95\n")), Some(0.95));
    }

    #[test]
    fn test_float_rejects_non_finite() {
        assert_eq!(coerce_float(&json!("inf")), None);
        assert_eq!(coerce_float(&json!("NaN")), None);
        assert_eq!(coerce_float(&json!("fast")), None);
    }

    #[test]
    fn test_display_identifier() {
        assert_eq!(display_identifier(&json!("AppAlpha")), "AppAlpha");
        assert_eq!(display_identifier(&json!(42)), "42");
    }
}
