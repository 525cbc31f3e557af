//! Digits-only validator.

use serde_json::Value;

use crate::foundation::{MessageTemplates, Validate, ValidationError, display_value};

/// Accepts strings and numbers made of ASCII digits only.
///
/// Integers are checked through their decimal representation, so negative
/// numbers and floats with a fractional part fail.
#[derive(Debug, Clone)]
pub struct Digits {
    templates: MessageTemplates,
}

impl Digits {
    /// The input contains characters other than digits.
    pub const NOT_DIGITS: &'static str = "notDigits";
    /// The input is an empty string.
    pub const STRING_EMPTY: &'static str = "digitsStringEmpty";
    /// The input is neither a string nor a number.
    pub const INVALID: &'static str = "digitsInvalid";

    /// Creates the validator with default messages.
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: MessageTemplates::new(&[
                (Self::NOT_DIGITS, "The input must contain only digits"),
                (Self::STRING_EMPTY, "The input is an empty string"),
                (Self::INVALID, "Invalid type given. String, integer or float expected"),
            ]),
        }
    }
}

impl Default for Digits {
    fn default() -> Self {
        Self::new()
    }
}

impl_templated!(Digits);

impl Validate for Digits {
    fn validate(&self, value: &Value, _context: Option<&Value>) -> Result<(), ValidationError> {
        let text = match value {
            Value::String(_) | Value::Number(_) => display_value(value),
            _ => return Err(self.templates.render(Self::INVALID, &[])),
        };

        if text.is_empty() {
            return Err(self.templates.render(Self::STRING_EMPTY, &[]));
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.templates.render(Self::NOT_DIGITS, &[("value", text)]));
        }
        Ok(())
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        self.templates.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("0123"))]
    #[case(json!(42))]
    fn accepts_digits(#[case] value: Value) {
        assert!(Digits::new().validate(&value, None).is_ok());
    }

    #[rstest]
    #[case(json!("12a"), Digits::NOT_DIGITS)]
    #[case(json!(-5), Digits::NOT_DIGITS)]
    #[case(json!(1.5), Digits::NOT_DIGITS)]
    #[case(json!(""), Digits::STRING_EMPTY)]
    #[case(json!(null), Digits::INVALID)]
    #[case(json!(["1"]), Digits::INVALID)]
    fn rejects(#[case] value: Value, #[case] code: &str) {
        assert_eq!(Digits::new().validate(&value, None).unwrap_err().code, code);
    }
}
