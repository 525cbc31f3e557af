//! Core traits for the validation system

use std::sync::Arc;

use serde_json::Value;

use crate::foundation::ValidationError;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The trait all validators implement.
///
/// `context` is the data set the value came from (the enclosing group's
/// data, unless the caller supplied its own). Most validators ignore it.
///
/// # Examples
///
/// ```rust
/// use serde_json::Value;
/// use sift_validator::foundation::{Validate, ValidationError};
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl Validate for Even {
///     fn validate(&self, value: &Value, _context: Option<&Value>) -> Result<(), ValidationError> {
///         match value.as_i64() {
///             Some(n) if n % 2 == 0 => Ok(()),
///             _ => Err(ValidationError::new("notEven", "The input is not an even number")),
///         }
///     }
/// }
///
/// assert!(Even.validate(&serde_json::json!(4), None).is_ok());
/// ```
pub trait Validate: std::fmt::Debug + Send + Sync {
    /// Validates `value`.
    fn validate(&self, value: &Value, context: Option<&Value>) -> Result<(), ValidationError>;

    /// Whether this validator is the chain's not-empty check.
    ///
    /// A chain holds at most one automatically injected presence check;
    /// validators answering `true` here count as that check.
    fn is_presence_check(&self) -> bool {
        false
    }

    /// The (possibly overridden) message template for `code`, if this
    /// validator owns that code.
    fn message_template(&self, code: &str) -> Option<&str> {
        let _ = code;
        None
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    fn validate(&self, value: &Value, context: Option<&Value>) -> Result<(), ValidationError> {
        (**self).validate(value, context)
    }

    fn is_presence_check(&self) -> bool {
        (**self).is_presence_check()
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        (**self).message_template(code)
    }
}

impl<V: Validate + ?Sized> Validate for Arc<V> {
    fn validate(&self, value: &Value, context: Option<&Value>) -> Result<(), ValidationError> {
        (**self).validate(value, context)
    }

    fn is_presence_check(&self) -> bool {
        (**self).is_presence_check()
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        (**self).message_template(code)
    }
}

// ============================================================================
// TESTS
// ============================================================================
