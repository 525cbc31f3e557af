//! Presence validator.

use serde_json::Value;

use crate::foundation::{MessageTemplates, Validate, ValidationError};

/// Fails for values that carry no content: `null`, `false`, a string that
/// is empty or only whitespace, an empty array, an empty object.
///
/// Chains treat `NotEmpty` as their presence check: see
/// [`ValidatorChain::ensure_not_empty`](crate::chain::ValidatorChain::ensure_not_empty).
#[derive(Debug, Clone)]
pub struct NotEmpty {
    templates: MessageTemplates,
}

impl NotEmpty {
    /// Reported for empty values.
    pub const IS_EMPTY: &'static str = "isEmpty";

    /// The default message for [`Self::IS_EMPTY`].
    pub const DEFAULT_MESSAGE: &'static str = "Value is required and can't be empty";

    /// Creates the validator with default messages.
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: MessageTemplates::new(&[(Self::IS_EMPTY, Self::DEFAULT_MESSAGE)]),
        }
    }

    /// Whether `value` counts as empty.
    #[must_use]
    pub fn is_empty_value(value: &Value) -> bool {
        match value {
            Value::Null | Value::Bool(false) => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Bool(true) | Value::Number(_) => false,
        }
    }
}

impl Default for NotEmpty {
    fn default() -> Self {
        Self::new()
    }
}

impl_templated!(NotEmpty);

impl Validate for NotEmpty {
    fn validate(&self, value: &Value, _context: Option<&Value>) -> Result<(), ValidationError> {
        if Self::is_empty_value(value) {
            return Err(self.templates.render(Self::IS_EMPTY, &[]));
        }
        Ok(())
    }

    fn is_presence_check(&self) -> bool {
        true
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        self.templates.get(code)
    }
}
