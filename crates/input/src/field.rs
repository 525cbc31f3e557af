//! The leaf input: one named value with its filters, validators and
//! presence policy.

use indexmap::IndexMap;
use serde_json::Value;
use sift_filter::{Filter, FilterChain};
use sift_validator::chain::ValidatorChain;
use sift_validator::foundation::Validate;

use crate::error::{InputError, type_name};

/// Whether a field holds a single value or a list of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueShape {
    /// One value, filtered and validated as a whole.
    #[default]
    Scalar,
    /// An array; filters and validators apply to each element.
    List,
}

/// Whether `value` counts as empty for the presence policy: `null`, `""`
/// or `[]`.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// A named value slot.
///
/// A field starts without a value. Its *raw* value is whatever was last
/// set; its *value* is the raw value run through the filter chain.
/// [`Field::is_valid`] decides validity from the presence flags, the
/// fallback value and the validator chain.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use sift_filter::filters::StringTrim;
/// use sift_input::Field;
/// use sift_validator::validators::Digits;
///
/// let mut zip = Field::new("zip")
///     .with_filter(StringTrim::new())
///     .with_validator(Digits::new());
///
/// zip.set_value(json!(" 12345 ")).unwrap();
/// assert!(zip.is_valid(None));
/// assert_eq!(zip.value(), json!("12345"));
/// assert_eq!(zip.raw_value(), &json!(" 12345 "));
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    name: Option<String>,
    shape: ValueShape,
    required: bool,
    allow_empty: bool,
    continue_if_empty: bool,
    break_on_failure: bool,
    error_message: Option<String>,
    raw: Value,
    has_value: bool,
    fallback: Value,
    has_fallback: bool,
    fallback_applied: bool,
    filters: FilterChain,
    validators: ValidatorChain,
    messages: IndexMap<String, String>,
    failed: bool,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            name: None,
            shape: ValueShape::Scalar,
            required: true,
            allow_empty: false,
            continue_if_empty: false,
            break_on_failure: false,
            error_message: None,
            raw: Value::Null,
            has_value: false,
            fallback: Value::Null,
            has_fallback: false,
            fallback_applied: false,
            filters: FilterChain::new(),
            validators: ValidatorChain::new(),
            messages: IndexMap::new(),
            failed: false,
        }
    }
}

impl Field {
    /// Key under which an explicit error message is reported.
    pub const CUSTOM_MESSAGE_KEY: &'static str = "custom";

    /// Creates a required scalar field.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Creates a required list field. Its value starts as `[]`.
    #[must_use]
    pub fn list(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            shape: ValueShape::List,
            raw: Value::Array(Vec::new()),
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    /// Sets whether a value must be present.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets whether an empty value passes without validation.
    #[must_use]
    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Sets whether empty values are still run through the validators.
    #[must_use]
    pub fn with_continue_if_empty(mut self, continue_if_empty: bool) -> Self {
        self.continue_if_empty = continue_if_empty;
        self
    }

    /// Sets whether a failure of this field stops the enclosing group.
    #[must_use]
    pub fn with_break_on_failure(mut self, break_on_failure: bool) -> Self {
        self.break_on_failure = break_on_failure;
        self
    }

    /// Replaces every failure message with `message`.
    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Attaches a filter at the default priority.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.attach(filter);
        self
    }

    /// Attaches a validator that does not break the chain.
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validate + 'static) -> Self {
        self.validators.attach(validator, false);
        self
    }

    /// Sets the fallback value (builder-style).
    pub fn with_fallback_value(mut self, fallback: Value) -> Result<Self, InputError> {
        self.set_fallback_value(fallback)?;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    /// Sets the field name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Sets whether a value must be present.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Sets whether an empty value passes without validation.
    pub fn set_allow_empty(&mut self, allow_empty: bool) -> &mut Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Sets whether empty values are still run through the validators.
    pub fn set_continue_if_empty(&mut self, continue_if_empty: bool) -> &mut Self {
        self.continue_if_empty = continue_if_empty;
        self
    }

    /// Sets whether a failure of this field stops the enclosing group.
    pub fn set_break_on_failure(&mut self, break_on_failure: bool) -> &mut Self {
        self.break_on_failure = break_on_failure;
        self
    }

    /// Sets or clears the message that replaces every failure message.
    pub fn set_error_message(&mut self, message: Option<String>) -> &mut Self {
        self.error_message = message;
        self
    }

    /// Replaces the filter chain.
    pub fn set_filters(&mut self, filters: FilterChain) -> &mut Self {
        self.filters = filters;
        self
    }

    /// Replaces the validator chain.
    pub fn set_validators(&mut self, validators: ValidatorChain) -> &mut Self {
        self.validators = validators;
        self
    }

    /// Sets the raw value.
    ///
    /// List fields only accept arrays.
    pub fn set_value(&mut self, value: Value) -> Result<&mut Self, InputError> {
        self.ensure_shape(&value)?;
        self.raw = value;
        self.has_value = true;
        self.fallback_applied = false;
        Ok(self)
    }

    /// Forgets the value: the field is back to "no value provided".
    pub fn reset_value(&mut self) -> &mut Self {
        self.raw = match self.shape {
            ValueShape::Scalar => Value::Null,
            ValueShape::List => Value::Array(Vec::new()),
        };
        self.has_value = false;
        self.fallback_applied = false;
        self
    }

    /// Sets the value surfaced when the field is absent or invalid.
    ///
    /// List fields only accept arrays.
    pub fn set_fallback_value(&mut self, fallback: Value) -> Result<&mut Self, InputError> {
        self.ensure_shape(&fallback)?;
        self.fallback = fallback;
        self.has_fallback = true;
        Ok(self)
    }

    /// Removes the fallback value.
    pub fn clear_fallback_value(&mut self) -> &mut Self {
        self.fallback = Value::Null;
        self.has_fallback = false;
        self.fallback_applied = false;
        self
    }

    fn ensure_shape(&self, value: &Value) -> Result<(), InputError> {
        if self.shape == ValueShape::List && !value.is_array() {
            return Err(InputError::NotAList {
                name: self.name.clone().unwrap_or_default(),
                actual: type_name(value),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The field name, once assigned.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Scalar or list.
    pub fn shape(&self) -> ValueShape {
        self.shape
    }

    /// Whether a value must be present.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether an empty value passes without validation.
    pub fn allows_empty(&self) -> bool {
        self.allow_empty
    }

    /// Whether empty values are still run through the validators.
    pub fn continues_if_empty(&self) -> bool {
        self.continue_if_empty
    }

    /// Whether a failure of this field stops the enclosing group.
    pub fn breaks_on_failure(&self) -> bool {
        self.break_on_failure
    }

    /// The message replacing every failure message.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Whether a value was set since construction or the last reset.
    pub fn has_value(&self) -> bool {
        self.has_value
    }

    /// Whether a fallback value is configured.
    pub fn has_fallback(&self) -> bool {
        self.has_fallback
    }

    /// The fallback value, if configured.
    pub fn fallback_value(&self) -> Option<&Value> {
        self.has_fallback.then_some(&self.fallback)
    }

    /// The filter chain.
    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    /// Mutable access to the filter chain.
    pub fn filters_mut(&mut self) -> &mut FilterChain {
        &mut self.filters
    }

    /// The validator chain.
    pub fn validators(&self) -> &ValidatorChain {
        &self.validators
    }

    /// Mutable access to the validator chain.
    pub fn validators_mut(&mut self) -> &mut ValidatorChain {
        &mut self.validators
    }

    /// The unfiltered value, or the fallback once it replaced the value.
    pub fn raw_value(&self) -> &Value {
        if self.fallback_applied {
            &self.fallback
        } else {
            &self.raw
        }
    }

    /// The filtered value, or the fallback once it replaced the value.
    ///
    /// List fields filter each element.
    pub fn value(&self) -> Value {
        if self.fallback_applied {
            return self.fallback.clone();
        }
        match (&self.shape, &self.raw) {
            (ValueShape::List, Value::Array(items)) => {
                Value::Array(items.iter().map(|item| self.filters.apply(item)).collect())
            }
            _ => self.filters.apply(&self.raw),
        }
    }

    /// `code -> message` of the last failed validation.
    ///
    /// Empty unless the last [`Field::is_valid`] returned `false`. An explicit
    /// error message then always wins, as a single `{"custom": message}`.
    /// Fields with a fallback never report messages.
    pub fn messages(&self) -> IndexMap<String, String> {
        if self.has_fallback || !self.failed {
            return IndexMap::new();
        }
        match &self.error_message {
            Some(message) => IndexMap::from([(Self::CUSTOM_MESSAGE_KEY.to_owned(), message.clone())]),
            None => self.messages.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Validates the current value.
    ///
    /// `context` is handed to every validator; groups pass their whole data
    /// set. A configured fallback turns every failure (and a missing value)
    /// into success, surfacing the fallback as the value.
    pub fn is_valid(&mut self, context: Option<&Value>) -> bool {
        let valid = self.resolve(context);
        self.failed = !valid;
        valid
    }

    fn resolve(&mut self, context: Option<&Value>) -> bool {
        self.messages.clear();
        self.fallback_applied = false;

        if !self.has_value {
            if self.has_fallback {
                tracing::trace!(field = ?self.name, "no value, using fallback");
                self.fallback_applied = true;
                return true;
            }
            if !self.required {
                return true;
            }
            let (code, message) = self.validators.required_message();
            self.messages.insert(code, message);
            tracing::trace!(field = ?self.name, "required value missing");
            return false;
        }

        match self.shape {
            ValueShape::Scalar => {
                let value = self.value();
                self.check(&value, context)
            }
            ValueShape::List => {
                let items = match self.value() {
                    Value::Array(items) => items,
                    other => vec![other],
                };
                items.iter().all(|item| self.check(item, context))
            }
        }
    }

    fn check(&mut self, value: &Value, context: Option<&Value>) -> bool {
        let empty = is_empty_value(value);
        if empty && !self.continue_if_empty && (!self.required || self.allow_empty) {
            tracing::trace!(field = ?self.name, "empty value accepted without validation");
            return true;
        }

        if !self.allow_empty && !self.continue_if_empty {
            self.validators.ensure_not_empty();
        }

        let outcome = self.validators.check(value, context);
        if outcome.is_valid() {
            self.messages.clear();
            return true;
        }

        if self.has_fallback {
            tracing::trace!(field = ?self.name, "validation failed, using fallback");
            self.fallback_applied = true;
            self.messages.clear();
            return true;
        }

        self.messages = outcome.into_messages();
        false
    }

    /// Takes over `other`'s configuration: flags, name, error message,
    /// fallback and value (when set); filters and validators are appended.
    pub fn merge(&mut self, other: &Field) -> &mut Self {
        if other.name.is_some() {
            self.name.clone_from(&other.name);
        }
        self.shape = other.shape;
        self.required = other.required;
        self.allow_empty = other.allow_empty;
        self.continue_if_empty = other.continue_if_empty;
        self.break_on_failure = other.break_on_failure;
        if other.error_message.is_some() {
            self.error_message.clone_from(&other.error_message);
        }
        if other.has_fallback {
            self.fallback = other.fallback.clone();
            self.has_fallback = true;
        }
        if other.has_value {
            self.raw = other.raw.clone();
            self.has_value = true;
        } else if self.shape == ValueShape::List && !self.raw.is_array() {
            self.reset_value();
        }
        self.filters.merge(&other.filters);
        self.validators.merge(&other.validators);
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use sift_filter::filters::{StringToUpper, StringTrim};
    use sift_validator::foundation::Templated;
    use sift_validator::validators::{Digits, NotEmpty, StringLength};

    fn codes(field: &Field) -> Vec<String> {
        field.messages().keys().cloned().collect()
    }

    #[test]
    fn new_field_has_no_value() {
        let field = Field::new("a");
        assert!(!field.has_value());
        assert_eq!(field.raw_value(), &Value::Null);
        assert!(field.is_required());
    }

    #[test]
    fn required_without_value_reports_is_empty() {
        let mut field = Field::new("a");
        assert!(!field.is_valid(None));
        assert_eq!(
            field.messages(),
            IndexMap::from([(
                "isEmpty".to_owned(),
                "Value is required and can't be empty".to_owned()
            )])
        );
    }

    #[test]
    fn required_message_follows_not_empty_override() {
        let mut field = Field::new("a").with_validator(
            NotEmpty::new().with_message(NotEmpty::IS_EMPTY, "Please fill in a"),
        );
        assert!(!field.is_valid(None));
        assert_eq!(field.messages()["isEmpty"], "Please fill in a");
    }

    #[test]
    fn optional_without_value_is_valid() {
        let mut field = Field::new("a").with_required(false).with_validator(Digits::new());
        assert!(field.is_valid(None));
        assert!(field.messages().is_empty());
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(""))]
    #[case(json!([]))]
    fn optional_empty_value_skips_validators(#[case] value: Value) {
        let mut field = Field::new("a").with_required(false).with_validator(Digits::new());
        field.set_value(value).unwrap();
        assert!(field.is_valid(None));
    }

    #[test]
    fn allow_empty_skips_validators() {
        let mut field = Field::new("a").with_allow_empty(true).with_validator(Digits::new());
        field.set_value(json!("")).unwrap();
        assert!(field.is_valid(None));
        assert!(field.validators().len() == 1, "no presence check injected");
    }

    #[test]
    fn empty_required_value_fails_presence_check() {
        let mut field = Field::new("a").with_validator(Digits::new());
        field.set_value(json!("")).unwrap();
        assert!(!field.is_valid(None));
        assert_eq!(codes(&field), vec!["isEmpty"]);
    }

    #[test]
    fn presence_check_is_injected_once() {
        let mut field = Field::new("a").with_validator(Digits::new());
        field.set_value(json!("1")).unwrap();
        for _ in 0..3 {
            assert!(field.is_valid(None));
        }
        assert_eq!(field.validators().len(), 2);
    }

    #[test]
    fn continue_if_empty_runs_validators() {
        let mut field = Field::new("a")
            .with_required(false)
            .with_continue_if_empty(true)
            .with_validator(Digits::new());
        field.set_value(json!("")).unwrap();

        assert!(!field.is_valid(None));
        assert_eq!(codes(&field), vec![Digits::STRING_EMPTY]);
        assert_eq!(field.validators().len(), 1);
    }

    #[test]
    fn failing_validator_reports_messages() {
        let mut field = Field::new("a").with_validator(StringLength::at_least(3));
        field.set_value(json!("ab")).unwrap();
        assert!(!field.is_valid(None));
        assert_eq!(codes(&field), vec![StringLength::TOO_SHORT]);
    }

    #[test]
    fn error_message_collapses_messages() {
        let mut field = Field::new("a")
            .with_error_message("Bad a")
            .with_validator(Digits::new())
            .with_validator(StringLength::at_least(5));
        field.set_value(json!("x")).unwrap();

        assert!(!field.is_valid(None));
        assert_eq!(
            field.messages(),
            IndexMap::from([("custom".to_owned(), "Bad a".to_owned())])
        );

        field.set_value(json!("12345")).unwrap();
        assert!(field.is_valid(None));
        assert!(field.messages().is_empty());
    }

    #[test]
    fn error_message_wins_for_missing_required_value() {
        let mut field = Field::new("a").with_error_message("Tell us a");

        assert!(!field.is_valid(None));
        assert_eq!(
            field.messages(),
            IndexMap::from([("custom".to_owned(), "Tell us a".to_owned())])
        );

        field.set_value(json!("x")).unwrap();
        assert!(field.is_valid(None));
        assert!(field.messages().is_empty());
    }

    #[test]
    fn fallback_replaces_missing_value() {
        let mut field = Field::new("a").with_fallback_value(json!("Y")).unwrap();
        assert!(field.is_valid(None));
        assert_eq!(field.value(), json!("Y"));
        assert_eq!(field.raw_value(), &json!("Y"));
        assert!(field.messages().is_empty());
    }

    #[test]
    fn fallback_replaces_invalid_value() {
        let mut field = Field::new("a")
            .with_filter(StringToUpper)
            .with_validator(Digits::new())
            .with_fallback_value(json!("0"))
            .unwrap();
        field.set_value(json!("abc")).unwrap();

        assert!(field.is_valid(None));
        assert_eq!(field.value(), json!("0"));
        assert!(field.messages().is_empty());

        field.set_value(json!("42")).unwrap();
        assert!(field.is_valid(None));
        assert_eq!(field.value(), json!("42"));
    }

    #[test]
    fn reset_value_restores_pristine_state() {
        let mut field = Field::new("a");
        field.set_value(json!("x")).unwrap();
        field.reset_value();
        assert!(!field.has_value());
        assert_eq!(field.raw_value(), &Value::Null);
        field.reset_value();
        assert!(!field.has_value());
    }

    #[test]
    fn validators_receive_filtered_value() {
        let mut field = Field::new("a")
            .with_filter(StringTrim::new())
            .with_validator(StringLength::at_most(3));
        field.set_value(json!("  abc  ")).unwrap();
        assert!(field.is_valid(None));
    }

    // ------------------------------------------------------------------
    // List shape
    // ------------------------------------------------------------------

    #[test]
    fn list_rejects_scalars() {
        let mut field = Field::list("tags");
        let err = field.set_value(json!("x")).unwrap_err();
        assert_eq!(
            err,
            InputError::NotAList {
                name: "tags".into(),
                actual: "string"
            }
        );
        assert!(field.set_fallback_value(json!(1)).is_err());
    }

    #[test]
    fn list_without_value_is_empty_list() {
        let mut field = Field::list("tags");
        assert_eq!(field.value(), json!([]));
        field.set_value(json!(["a"])).unwrap();
        field.reset_value();
        assert_eq!(field.value(), json!([]));
    }

    #[test]
    fn list_filters_each_element() {
        let mut field = Field::list("tags").with_filter(StringTrim::new());
        field.set_value(json!([" a ", "b "])).unwrap();
        assert_eq!(field.value(), json!(["a", "b"]));
    }

    #[test]
    fn list_validates_each_element_and_stops_at_first_failure() {
        let mut field = Field::list("ids").with_validator(Digits::new());
        field.set_value(json!(["1", "x", ""])).unwrap();

        assert!(!field.is_valid(None));
        assert_eq!(codes(&field), vec![Digits::NOT_DIGITS]);

        field.set_value(json!(["1", "2"])).unwrap();
        assert!(field.is_valid(None));
    }

    #[test]
    fn empty_list_with_value_is_valid() {
        let mut field = Field::list("ids").with_validator(Digits::new());
        field.set_value(json!([])).unwrap();
        assert!(field.is_valid(None));
    }

    #[test]
    fn list_fallback_masks_element_failure() {
        let mut field = Field::list("ids")
            .with_validator(Digits::new())
            .with_fallback_value(json!(["0"]))
            .unwrap();
        field.set_value(json!(["1", "x"])).unwrap();
        assert!(field.is_valid(None));
        assert_eq!(field.value(), json!(["0"]));
    }

    // ------------------------------------------------------------------
    // Merge
    // ------------------------------------------------------------------

    #[test]
    fn merge_takes_flags_and_appends_chains() {
        let mut base = Field::new("a").with_validator(Digits::new());
        let other = Field::new("a")
            .with_required(false)
            .with_error_message("nope")
            .with_filter(StringTrim::new())
            .with_validator(StringLength::at_most(2));

        base.merge(&other);

        assert!(!base.is_required());
        assert_eq!(base.error_message(), Some("nope"));
        assert_eq!(base.filters().len(), 1);
        assert_eq!(base.validators().len(), 2);
        assert!(!base.has_value());
    }
}
