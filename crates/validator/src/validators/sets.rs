//! Set membership validator.

use serde_json::Value;

use crate::foundation::{MessageTemplates, Validate, ValidationError, display_value};

/// Validates that the input is one of a fixed set of values.
///
/// Non-strict comparison (the default) also matches scalars with the same
/// textual form, so `"1"` is found in `[1, 2]`.
#[derive(Debug, Clone)]
pub struct InArray {
    haystack: Vec<Value>,
    strict: bool,
    templates: MessageTemplates,
}

impl InArray {
    /// The input is not in the haystack.
    pub const NOT_IN_ARRAY: &'static str = "notInArray";

    /// Creates the validator over `haystack`.
    #[must_use]
    pub fn new(haystack: impl IntoIterator<Item = Value>) -> Self {
        Self {
            haystack: haystack.into_iter().collect(),
            strict: false,
            templates: MessageTemplates::new(&[(
                Self::NOT_IN_ARRAY,
                "The input was not found in the haystack",
            )]),
        }
    }

    /// Requires exact (type and value) equality.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn matches(&self, candidate: &Value, value: &Value) -> bool {
        if candidate == value {
            return true;
        }
        if self.strict {
            return false;
        }
        let scalar = |v: &Value| matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_));
        scalar(candidate) && scalar(value) && display_value(candidate) == display_value(value)
    }
}

impl_templated!(InArray);

impl Validate for InArray {
    fn validate(&self, value: &Value, _context: Option<&Value>) -> Result<(), ValidationError> {
        if self.haystack.iter().any(|candidate| self.matches(candidate, value)) {
            return Ok(());
        }
        Err(self
            .templates
            .render(Self::NOT_IN_ARRAY, &[("value", display_value(value))]))
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        self.templates.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loose_matches_textual_form() {
        let v = InArray::new([json!(1), json!("two")]);
        assert!(v.validate(&json!("1"), None).is_ok());
        assert!(v.validate(&json!("two"), None).is_ok());
        assert_eq!(
            v.validate(&json!(3), None).unwrap_err().code,
            InArray::NOT_IN_ARRAY
        );
    }

    #[test]
    fn strict_requires_same_type() {
        let v = InArray::new([json!(1)]).strict(true);
        assert!(v.validate(&json!(1), None).is_ok());
        assert!(v.validate(&json!("1"), None).is_err());
    }
}
