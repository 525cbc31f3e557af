//! String case and whitespace filters.
//!
//! Non-string values pass through unchanged.

use serde_json::Value;

use crate::Filter;

/// Trims leading and trailing characters from strings.
///
/// Trims Unicode whitespace by default; [`StringTrim::chars`] trims a
/// custom character set instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTrim {
    chars: Option<Vec<char>>,
}

impl StringTrim {
    /// Trims whitespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims any character contained in `chars`.
    #[must_use]
    pub fn chars(chars: &str) -> Self {
        Self {
            chars: Some(chars.chars().collect()),
        }
    }
}

impl Filter for StringTrim {
    fn filter(&self, value: Value) -> Value {
        match value {
            Value::String(s) => {
                let trimmed = match &self.chars {
                    Some(set) => s.trim_matches(|c| set.contains(&c)),
                    None => s.trim(),
                };
                if trimmed.len() == s.len() {
                    Value::String(s)
                } else {
                    Value::String(trimmed.to_owned())
                }
            }
            other => other,
        }
    }
}

/// Lowercases strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StringToLower;

impl Filter for StringToLower {
    fn filter(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.to_lowercase()),
            other => other,
        }
    }
}

/// Uppercases strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StringToUpper;

impl Filter for StringToUpper {
    fn filter(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trim_whitespace() {
        assert_eq!(StringTrim::new().filter(json!("  a b \n")), json!("a b"));
    }

    #[test]
    fn trim_custom_chars() {
        assert_eq!(StringTrim::chars("-_").filter(json!("--a_b__")), json!("a_b"));
    }

    #[test]
    fn non_strings_pass_through() {
        assert_eq!(StringTrim::new().filter(json!(42)), json!(42));
        assert_eq!(StringToLower.filter(json!(null)), json!(null));
        assert_eq!(StringToUpper.filter(json!([" a "])), json!([" a "]));
    }

    #[test]
    fn case_filters() {
        assert_eq!(StringToLower.filter(json!("ÀbC")), json!("àbc"));
        assert_eq!(StringToUpper.filter(json!("abc")), json!("ABC"));
    }
}
