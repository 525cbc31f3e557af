//! Closure-backed validator.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::foundation::{MessageTemplates, Validate, ValidationError};

type Predicate = dyn Fn(&Value, Option<&Value>) -> bool + Send + Sync;

/// Validates with a predicate over `(value, context)`.
///
/// ```rust
/// use serde_json::json;
/// use sift_validator::foundation::Validate;
/// use sift_validator::validators::Callback;
///
/// let even = Callback::new(|v, _| v.as_i64().is_some_and(|n| n % 2 == 0));
/// assert!(even.validate(&json!(4), None).is_ok());
/// assert!(even.validate(&json!(3), None).is_err());
/// ```
#[derive(Clone)]
pub struct Callback {
    predicate: Arc<Predicate>,
    templates: MessageTemplates,
}

impl Callback {
    /// The predicate returned false.
    pub const INVALID: &'static str = "callbackValue";

    /// Wraps `predicate`.
    pub fn new(predicate: impl Fn(&Value, Option<&Value>) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
            templates: MessageTemplates::new(&[(Self::INVALID, "The input is not valid")]),
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}

impl_templated!(Callback);

impl Validate for Callback {
    fn validate(&self, value: &Value, context: Option<&Value>) -> Result<(), ValidationError> {
        if (self.predicate)(value, context) {
            return Ok(());
        }
        Err(self.templates.render(Self::INVALID, &[]))
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        self.templates.get(code)
    }
}
