//! String content validators
//!
//! Validators for checking string content against patterns.

use std::sync::LazyLock;

use serde_json::Value;

use crate::foundation::{MessageTemplates, Validate, ValidationError, display_value};

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).expect("email pattern is valid")
});

// ============================================================================
// REGEX VALIDATOR
// ============================================================================

/// Validates that a string (or number, via its decimal form) matches a
/// regular expression.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: regex::Regex,
    templates: MessageTemplates,
}

impl Regex {
    /// The input is neither a string nor a number.
    pub const INVALID: &'static str = "regexInvalid";
    /// The input does not match.
    pub const NOT_MATCH: &'static str = "regexNotMatch";

    /// Compiles `pattern`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: regex::Regex::new(pattern)?,
            templates: MessageTemplates::new(&[
                (Self::INVALID, "Invalid type given. String, integer or float expected"),
                (Self::NOT_MATCH, "The input does not match against pattern '%pattern%'"),
            ]),
        })
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl_templated!(Regex);

impl Validate for Regex {
    fn validate(&self, value: &Value, _context: Option<&Value>) -> Result<(), ValidationError> {
        let text = match value {
            Value::String(_) | Value::Number(_) => display_value(value),
            _ => return Err(self.templates.render(Self::INVALID, &[])),
        };

        if self.pattern.is_match(&text) {
            return Ok(());
        }
        Err(self.templates.render(
            Self::NOT_MATCH,
            &[("pattern", self.pattern.as_str().to_owned()), ("value", text)],
        ))
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        self.templates.get(code)
    }
}

// ============================================================================
// EMAIL VALIDATOR
// ============================================================================

/// Validates the `local-part@hostname` email format.
///
/// The hostname must have at least two labels; no DNS lookups are made.
#[derive(Debug, Clone)]
pub struct EmailAddress {
    templates: MessageTemplates,
}

impl EmailAddress {
    /// The input is not a string.
    pub const INVALID: &'static str = "emailAddressInvalid";
    /// The input is not a well-formed address.
    pub const INVALID_FORMAT: &'static str = "emailAddressInvalidFormat";

    /// Creates the validator with default messages.
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: MessageTemplates::new(&[
                (Self::INVALID, "Invalid type given. String expected"),
                (
                    Self::INVALID_FORMAT,
                    "The input is not a valid email address. Use the basic format local-part@hostname",
                ),
            ]),
        }
    }
}

impl Default for EmailAddress {
    fn default() -> Self {
        Self::new()
    }
}

impl_templated!(EmailAddress);

impl Validate for EmailAddress {
    fn validate(&self, value: &Value, _context: Option<&Value>) -> Result<(), ValidationError> {
        let Some(text) = value.as_str() else {
            return Err(self.templates.render(Self::INVALID, &[]));
        };

        if EMAIL_REGEX.is_match(text) {
            return Ok(());
        }
        Err(self
            .templates
            .render(Self::INVALID_FORMAT, &[("value", text.to_owned())]))
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        self.templates.get(code)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn regex_matches_strings_and_numbers() {
        let v = Regex::new(r"^\d{3}$").unwrap();
        assert!(v.validate(&json!("123"), None).is_ok());
        assert!(v.validate(&json!(123), None).is_ok());

        let err = v.validate(&json!("12"), None).unwrap_err();
        assert_eq!(err.code, Regex::NOT_MATCH);
        assert_eq!(err.message, r"The input does not match against pattern '^\d{3}$'");
    }

    #[test]
    fn regex_rejects_other_types() {
        let v = Regex::new(".*").unwrap();
        assert_eq!(v.validate(&json!(null), None).unwrap_err().code, Regex::INVALID);
    }

    #[test]
    fn regex_invalid_pattern_errors() {
        assert!(Regex::new("(unclosed").is_err());
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last+tag@mail.example.org", true)]
    #[case("user@localhost", false)]
    #[case("no-at-sign.example.com", false)]
    #[case("@example.com", false)]
    fn email_format(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(EmailAddress::new().validate(&json!(input), None).is_ok(), ok);
    }

    #[test]
    fn email_rejects_non_strings() {
        let err = EmailAddress::new().validate(&json!(5), None).unwrap_err();
        assert_eq!(err.code, EmailAddress::INVALID);
    }
}
