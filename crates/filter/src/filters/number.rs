//! Integer coercion.

use serde_json::Value;

use crate::Filter;

/// Casts scalars to integers.
///
/// - strings: the leading (optionally signed) digit run, `0` when there is none
/// - floats: truncated toward zero
/// - booleans: `0` / `1`
///
/// `null`, arrays and objects pass through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToInt;

impl ToInt {
    fn parse_leading(s: &str) -> i64 {
        let s = s.trim_start();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let magnitude = digits[..end].parse::<i64>().unwrap_or(0);
        if negative { -magnitude } else { magnitude }
    }
}

impl Filter for ToInt {
    fn filter(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::from(Self::parse_leading(&s)),
            Value::Number(n) if n.is_f64() => Value::from(n.as_f64().unwrap_or(0.0).trunc() as i64),
            Value::Bool(b) => Value::from(i64::from(b)),
            other => other,
        }
    }
}
