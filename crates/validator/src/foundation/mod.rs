//! Core validation types and traits
//!
//! - **Traits**: [`Validate`], [`Templated`]
//! - **Errors**: [`ValidationError`]
//! - **Messages**: [`MessageTemplates`]
//!
//! # Architecture
//!
//! Validators work on untyped `serde_json::Value` input because the data
//! they see comes straight from a submission: a field may hold a string,
//! a number, `null` or a nested structure, and the validator decides what
//! it accepts. Every failure carries a stable code (`"notDigits"`,
//! `"isEmpty"`, ...) and a human readable message rendered from a template
//! that callers can override per code:
//!
//! ```rust
//! use serde_json::json;
//! use sift_validator::foundation::{Templated, Validate};
//! use sift_validator::validators::Digits;
//!
//! let digits = Digits::new().with_message(Digits::NOT_DIGITS, "'%value%' is not a number");
//! let err = digits.validate(&json!("12a"), None).unwrap_err();
//! assert_eq!(err.message, "'12a' is not a number");
//! ```

pub mod error;
pub mod templates;
pub mod traits;

pub use error::ValidationError;
pub use templates::{MessageTemplates, Templated};
pub use traits::Validate;

use serde_json::Value;

/// Renders a value for use inside a message (strings without quotes).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A validation result using the standard `ValidationError`.
pub type ValidationResult<T> = Result<T, ValidationError>;
