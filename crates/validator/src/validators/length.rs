//! String length validator
//!
//! Length is measured in Unicode scalar values (chars).

use serde_json::Value;

use crate::foundation::{MessageTemplates, Validate, ValidationError};

/// Validates the length of a string against optional bounds.
#[derive(Debug, Clone)]
pub struct StringLength {
    min: usize,
    max: Option<usize>,
    templates: MessageTemplates,
}

impl StringLength {
    /// The input is not a string.
    pub const INVALID: &'static str = "stringLengthInvalid";
    /// The input is shorter than the minimum.
    pub const TOO_SHORT: &'static str = "stringLengthTooShort";
    /// The input is longer than the maximum.
    pub const TOO_LONG: &'static str = "stringLengthTooLong";

    fn with_bounds(min: usize, max: Option<usize>) -> Self {
        Self {
            min,
            max,
            templates: MessageTemplates::new(&[
                (Self::INVALID, "Invalid type given. String expected"),
                (Self::TOO_SHORT, "The input is less than %min% characters long"),
                (Self::TOO_LONG, "The input is more than %max% characters long"),
            ]),
        }
    }

    /// Length within `min..=max`.
    #[must_use]
    pub fn between(min: usize, max: usize) -> Self {
        Self::with_bounds(min, Some(max))
    }

    /// Length of at least `min`.
    #[must_use]
    pub fn at_least(min: usize) -> Self {
        Self::with_bounds(min, None)
    }

    /// Length of at most `max`.
    #[must_use]
    pub fn at_most(max: usize) -> Self {
        Self::with_bounds(0, Some(max))
    }

    /// The lower bound.
    pub fn min(&self) -> usize {
        self.min
    }

    /// The upper bound, if any.
    pub fn max(&self) -> Option<usize> {
        self.max
    }
}

impl_templated!(StringLength);

impl Validate for StringLength {
    fn validate(&self, value: &Value, _context: Option<&Value>) -> Result<(), ValidationError> {
        let Some(text) = value.as_str() else {
            return Err(self.templates.render(Self::INVALID, &[]));
        };

        let length = text.chars().count();
        let max = self.max.map_or_else(String::new, |m| m.to_string());
        let params = [
            ("min", self.min.to_string()),
            ("max", max),
            ("length", length.to_string()),
        ];

        if length < self.min {
            return Err(self.templates.render(Self::TOO_SHORT, &params));
        }
        if self.max.is_some_and(|max| length > max) {
            return Err(self.templates.render(Self::TOO_LONG, &params));
        }
        Ok(())
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        self.templates.get(code)
    }
}
