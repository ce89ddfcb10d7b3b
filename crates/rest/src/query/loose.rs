//! Loose value comparisons.
//!
//! Query operands often arrive as strings (form bodies) while documents hold
//! numbers, so comparisons coerce scalars to numbers where that makes sense.

use std::cmp::Ordering;

use serde_json::Value;

/// Coerces a scalar to a finite number.
///
/// Numbers map to themselves, booleans to 0/1 and strings are parsed after
/// trimming. Everything else, including blank strings, has no numeric value.
pub fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse().ok()?
        }
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Loose equality.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => a == b,
        (
            Value::Number(_) | Value::String(_) | Value::Bool(_),
            Value::Number(_) | Value::String(_) | Value::Bool(_),
        ) => match (to_number(a), to_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        _ => false,
    }
}

/// Ordering used by `>`, `<`, `>=` and `<=`.
///
/// Two strings compare lexicographically; otherwise both sides must coerce
/// to numbers. `None` makes every ordered comparator false.
pub fn loose_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Value::String(x), Value::String(y)) = (a, b) {
        return Some(x.cmp(y));
    }
    to_number(a)?.partial_cmp(&to_number(b)?)
}

/// `a % b == c` with numeric coercion. A zero divisor is never a match.
pub fn loose_mod_eq(a: &Value, b: &Value, c: &Value) -> bool {
    match (to_number(a), to_number(b), to_number(c)) {
        (Some(_), Some(divisor), Some(_)) if divisor == 0.0 => false,
        (Some(x), Some(divisor), Some(expected)) => x % divisor == expected,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&json!(3)), Some(3.0));
        assert_eq!(to_number(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(to_number(&json!(true)), Some(1.0));
        assert_eq!(to_number(&json!("")), None);
        assert_eq!(to_number(&json!("NaN")), None);
        assert_eq!(to_number(&json!(null)), None);
        assert_eq!(to_number(&json!([1])), None);
    }

    #[test]
    fn test_loose_eq() {
        assert!(loose_eq(&json!(1), &json!(1.0)));
        assert!(loose_eq(&json!(5), &json!("5")));
        assert!(loose_eq(&json!(true), &json!(1)));
        assert!(loose_eq(&json!(null), &json!(null)));
        assert!(loose_eq(&json!({"a": [1]}), &json!({"a": [1]})));

        assert!(!loose_eq(&json!("a"), &json!("b")));
        assert!(!loose_eq(&json!(null), &json!(0)));
        assert!(!loose_eq(&json!("abc"), &json!(0)));
        assert!(!loose_eq(&json!([1]), &json!(1)));
    }

    #[test]
    fn test_loose_cmp() {
        assert_eq!(loose_cmp(&json!(2), &json!("10")), Some(Ordering::Less));
        assert_eq!(loose_cmp(&json!("b"), &json!("a")), Some(Ordering::Greater));
        assert_eq!(loose_cmp(&json!("10"), &json!("9")), Some(Ordering::Less));
        assert_eq!(loose_cmp(&json!(null), &json!(1)), None);
        assert_eq!(loose_cmp(&json!("x"), &json!(1)), None);
    }

    #[test]
    fn test_loose_mod_eq() {
        assert!(loose_mod_eq(&json!(4), &json!(2), &json!(0)));
        assert!(!loose_mod_eq(&json!(5), &json!(2), &json!(0)));
        assert!(loose_mod_eq(&json!(-5), &json!(2), &json!(-1)));
        assert!(loose_mod_eq(&json!("7"), &json!("3"), &json!("1")));
        assert!(!loose_mod_eq(&json!(4), &json!(0), &json!(0)));
        assert!(!loose_mod_eq(&json!("four"), &json!(2), &json!(0)));
    }
}
