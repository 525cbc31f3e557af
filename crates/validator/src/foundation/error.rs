//! Error types for validation failures
//!
//! All string fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static error codes.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation failure.
///
/// `code` is stable and meant for programs (it is the key of the message
/// map an input reports); `message` is the rendered, human readable text.
/// A validator that detects several problems at once reports them as
/// `nested` errors under a summary error.
///
/// # Examples
///
/// ```rust
/// use sift_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("stringLengthTooShort", "The input is less than 5 characters long")
///     .with_param("min", "5");
/// assert_eq!(error.param("min"), Some("5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling and message lookup.
    pub code: Cow<'static, str>,

    /// Rendered message.
    pub message: Cow<'static, str>,

    /// The `%param%` template `message` was rendered from, when there was one.
    pub template: Option<Cow<'static, str>>,

    /// Parameters the message was rendered with, in insertion order.
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// Nested validation errors.
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            template: None,
            params: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Records the template the message was rendered from.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_template(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Adds a single nested error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested_error(mut self, error: ValidationError) -> Self {
        self.nested.push(error);
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Re-renders the message with `translate` applied to the template
    /// before parameter substitution. Errors without a template translate
    /// the message itself.
    pub fn localize(&self, translate: impl Fn(&str) -> String) -> String {
        match &self.template {
            Some(template) => interpolate(&translate(template), self.params.as_slice()),
            None => translate(&self.message),
        }
    }

    /// Returns true if this error has nested errors.
    #[must_use]
    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }

    /// The errors that carry actual failures: `self` when it has no nested
    /// errors, otherwise the leaves of the nested tree (depth-first).
    #[must_use]
    pub fn leaves(&self) -> Vec<&ValidationError> {
        if self.nested.is_empty() {
            return vec![self];
        }
        self.nested.iter().flat_map(ValidationError::leaves).collect()
    }
}

/// Replaces every `%key%` in `template` with its value.
pub fn interpolate<K, V>(template: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    params.iter().fold(template.to_owned(), |message, (key, value)| {
        message.replace(&format!("%{}%", key.as_ref()), value.as_ref())
    })
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;

        if !self.nested.is_empty() {
            write!(f, "\n  Nested errors:")?;
            for (i, error) in self.nested.iter().enumerate() {
                write!(f, "\n    {}. {}", i + 1, error)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let error = ValidationError::new("test", "Test error");
        assert_eq!(error.code, "test");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.to_string(), "test: Test error");
    }

    #[test]
    fn test_leaves_without_nesting() {
        let error = ValidationError::new("notDigits", "nope");
        let leaves = error.leaves();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].code, "notDigits");
    }

    #[test]
    fn test_leaves_skip_summary() {
        let error = ValidationError::new("summary", "Several problems")
            .with_nested_error(
                ValidationError::new("a", "A").with_nested_error(ValidationError::new("a1", "A1")),
            )
            .with_nested_error(ValidationError::new("b", "B"));

        let codes: Vec<&str> = error.leaves().iter().map(|e| e.code.as_ref()).collect();
        assert_eq!(codes, vec!["a1", "b"]);
    }

    #[test]
    fn test_localize_translates_template_before_params() {
        let error = ValidationError::new("tooShort", "at least 3")
            .with_template("at least %min%")
            .with_param("min", "3");

        let localized = error.localize(|t| t.replace("at least", "mindestens"));
        assert_eq!(localized, "mindestens 3");

        let plain = ValidationError::new("x", "plain");
        assert_eq!(plain.localize(str::to_uppercase), "PLAIN");
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let error = ValidationError::new("isEmpty", "Value is required and can't be empty");
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }
}
