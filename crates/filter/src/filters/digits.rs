//! Digit extraction.

use serde_json::Value;

use crate::Filter;

/// Strips everything but ASCII digits from strings and numbers.
///
/// Integers pass through; floats are rendered and stripped (so `12.5`
/// becomes `"125"`). Other values pass through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Digits;

impl Filter for Digits {
    fn filter(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.chars().filter(char::is_ascii_digit).collect()),
            Value::Number(n) if n.is_f64() => Value::String(
                n.to_string().chars().filter(char::is_ascii_digit).collect(),
            ),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_non_digits() {
        assert_eq!(Digits.filter(json!("+1 (555) 010-99")), json!("155501099"));
        assert_eq!(Digits.filter(json!(12.5)), json!("125"));
        assert_eq!(Digits.filter(json!(7)), json!(7));
        assert_eq!(Digits.filter(json!(true)), json!(true));
    }
}
