//! Numeric range validator.

use serde_json::Value;

use crate::foundation::{MessageTemplates, Validate, ValidationError, display_value};

/// Validates that a number (or numeric string) lies between two bounds.
#[derive(Debug, Clone)]
pub struct Between {
    min: f64,
    max: f64,
    inclusive: bool,
    templates: MessageTemplates,
}

impl Between {
    /// Outside the inclusive range.
    pub const NOT_BETWEEN: &'static str = "notBetween";
    /// Outside the exclusive range.
    pub const NOT_BETWEEN_STRICT: &'static str = "notBetweenStrict";
    /// The input is not numeric.
    pub const VALUE_NOT_NUMERIC: &'static str = "valueNotNumeric";

    /// Inclusive range `min..=max`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            inclusive: true,
            templates: MessageTemplates::new(&[
                (
                    Self::NOT_BETWEEN,
                    "The input is not between '%min%' and '%max%', inclusively",
                ),
                (
                    Self::NOT_BETWEEN_STRICT,
                    "The input is not strictly between '%min%' and '%max%'",
                ),
                (
                    Self::VALUE_NOT_NUMERIC,
                    "The min ('%min%') and max ('%max%') values are numeric, but the input is not",
                ),
            ]),
        }
    }

    /// Sets whether the bounds themselves are accepted.
    #[must_use]
    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    fn numeric(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl_templated!(Between);

impl Validate for Between {
    fn validate(&self, value: &Value, _context: Option<&Value>) -> Result<(), ValidationError> {
        let params = [
            ("min", self.min.to_string()),
            ("max", self.max.to_string()),
            ("value", display_value(value)),
        ];

        let Some(n) = Self::numeric(value) else {
            return Err(self.templates.render(Self::VALUE_NOT_NUMERIC, &params));
        };

        if self.inclusive {
            if n < self.min || n > self.max {
                return Err(self.templates.render(Self::NOT_BETWEEN, &params));
            }
        } else if n <= self.min || n >= self.max {
            return Err(self.templates.render(Self::NOT_BETWEEN_STRICT, &params));
        }
        Ok(())
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        self.templates.get(code)
    }
}
