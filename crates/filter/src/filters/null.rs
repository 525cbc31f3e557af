//! Nullish normalization.

use serde_json::Value;

use crate::Filter;

/// Turns "nothing" values into `null`.
///
/// Empty strings, empty arrays and empty objects always become `null`.
/// [`ToNull::with_false`] and [`ToNull::with_zero`] widen the set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToNull {
    false_is_null: bool,
    zero_is_null: bool,
}

impl ToNull {
    /// Nulls empty strings, arrays and objects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also nulls `false`.
    #[must_use]
    pub fn with_false(mut self) -> Self {
        self.false_is_null = true;
        self
    }

    /// Also nulls `0`, `0.0` and `"0"`.
    #[must_use]
    pub fn with_zero(mut self) -> Self {
        self.zero_is_null = true;
        self
    }

    fn is_nullish(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => s.is_empty() || (self.zero_is_null && s == "0"),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            Value::Bool(b) => self.false_is_null && !b,
            Value::Number(n) => self.zero_is_null && n.as_f64() == Some(0.0),
            Value::Null => false,
        }
    }
}

impl Filter for ToNull {
    fn filter(&self, value: Value) -> Value {
        if self.is_nullish(&value) {
            Value::Null
        } else {
            value
        }
    }
}
