//! Named filter and validator constructors.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use sift_filter::Filter;
use sift_filter::filters::{Digits, StringToLower, StringToUpper, StringTrim, ToInt, ToNull};
use sift_validator::foundation::{Templated, Validate};
use sift_validator::validators::{
    Between, Digits as DigitsValidator, EmailAddress, Identical, InArray, NotEmpty, Regex,
    StringLength,
};

use crate::error::FactoryError;
use crate::spec::Options;

/// Constructor of a named filter.
pub type FilterConstructor =
    Arc<dyn Fn(&Options) -> Result<Arc<dyn Filter>, FactoryError> + Send + Sync>;

/// Constructor of a named validator.
pub type ValidatorConstructor =
    Arc<dyn Fn(&Options) -> Result<Arc<dyn Validate>, FactoryError> + Send + Sync>;

/// Maps the names used in specs to filter and validator constructors.
///
/// [`Registry::default`] holds the built-ins; custom entries are added with
/// [`Registry::register_filter`] and [`Registry::register_validator`].
///
/// ```rust
/// use std::sync::Arc;
/// use serde_json::json;
/// use sift_factory::Registry;
/// use sift_validator::validators::Callback;
///
/// let mut registry = Registry::default();
/// registry.register_validator("even", |_options| {
///     Ok(Arc::new(Callback::new(|v, _| v.as_i64().is_some_and(|n| n % 2 == 0))))
/// });
///
/// let even = registry.validator("even", &Default::default()).unwrap();
/// assert!(even.validate(&json!(2), None).is_ok());
/// ```
#[derive(Clone)]
pub struct Registry {
    filters: IndexMap<String, FilterConstructor>,
    validators: IndexMap<String, ValidatorConstructor>,
}

impl Registry {
    /// A registry without any entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            filters: IndexMap::new(),
            validators: IndexMap::new(),
        }
    }

    /// Registers a filter constructor, replacing any previous one.
    pub fn register_filter<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&Options) -> Result<Arc<dyn Filter>, FactoryError> + Send + Sync + 'static,
    {
        self.filters.insert(name.into(), Arc::new(constructor));
        self
    }

    /// Registers a validator constructor, replacing any previous one.
    pub fn register_validator<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&Options) -> Result<Arc<dyn Validate>, FactoryError> + Send + Sync + 'static,
    {
        self.validators.insert(name.into(), Arc::new(constructor));
        self
    }

    /// Builds the filter registered as `name`.
    pub fn filter(&self, name: &str, options: &Options) -> Result<Arc<dyn Filter>, FactoryError> {
        let constructor = self
            .filters
            .get(name)
            .ok_or_else(|| FactoryError::UnknownFilter { name: name.to_owned() })?;
        constructor(options)
    }

    /// Builds the validator registered as `name`.
    pub fn validator(&self, name: &str, options: &Options) -> Result<Arc<dyn Validate>, FactoryError> {
        let constructor = self
            .validators
            .get(name)
            .ok_or_else(|| FactoryError::UnknownValidator { name: name.to_owned() })?;
        constructor(options)
    }

    /// Whether a filter is registered as `name`.
    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Whether a validator is registered as `name`.
    pub fn has_validator(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered filter names.
    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Registered validator names.
    pub fn validator_names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    // Registration of the built-ins

    fn register_builtin_filters(&mut self) {
        self.register_filter("string_trim", |options| {
            let trim = match opt_str(options, "string_trim", "charlist")? {
                Some(chars) => StringTrim::chars(chars),
                None => StringTrim::new(),
            };
            Ok(Arc::new(trim))
        });
        self.register_filter("string_to_lower", |_| Ok(Arc::new(StringToLower)));
        self.register_filter("string_to_upper", |_| Ok(Arc::new(StringToUpper)));
        self.register_filter("to_int", |_| Ok(Arc::new(ToInt)));
        self.register_filter("digits", |_| Ok(Arc::new(Digits)));
        self.register_filter("to_null", |options| {
            let mut filter = ToNull::new();
            if opt_bool(options, "to_null", "false")?.unwrap_or(false) {
                filter = filter.with_false();
            }
            if opt_bool(options, "to_null", "zero")?.unwrap_or(false) {
                filter = filter.with_zero();
            }
            Ok(Arc::new(filter))
        });
    }

    fn register_builtin_validators(&mut self) {
        self.register_validator("not_empty", |options| templated(NotEmpty::new(), "not_empty", options));
        self.register_validator("digits", |options| {
            templated(DigitsValidator::new(), "digits", options)
        });
        self.register_validator("email_address", |options| {
            templated(EmailAddress::new(), "email_address", options)
        });
        self.register_validator("string_length", |options| {
            let min = opt_usize(options, "string_length", "min")?;
            let max = opt_usize(options, "string_length", "max")?;
            let validator = match (min, max) {
                (min, Some(max)) => StringLength::between(min.unwrap_or(0), max),
                (min, None) => StringLength::at_least(min.unwrap_or(0)),
            };
            templated(validator, "string_length", options)
        });
        self.register_validator("regex", |options| {
            let pattern = opt_str(options, "regex", "pattern")?
                .ok_or_else(|| FactoryError::invalid_option("regex", "pattern", "is required"))?;
            templated(Regex::new(pattern)?, "regex", options)
        });
        self.register_validator("between", |options| {
            let min = opt_f64(options, "between", "min")?
                .ok_or_else(|| FactoryError::invalid_option("between", "min", "is required"))?;
            let max = opt_f64(options, "between", "max")?
                .ok_or_else(|| FactoryError::invalid_option("between", "max", "is required"))?;
            let inclusive = opt_bool(options, "between", "inclusive")?.unwrap_or(true);
            templated(Between::new(min, max).inclusive(inclusive), "between", options)
        });
        self.register_validator("in_array", |options| {
            let haystack = match options.get("haystack") {
                Some(Value::Array(items)) => items.clone(),
                Some(_) => {
                    return Err(FactoryError::invalid_option("in_array", "haystack", "expected an array"));
                }
                None => return Err(FactoryError::invalid_option("in_array", "haystack", "is required")),
            };
            let strict = opt_bool(options, "in_array", "strict")?.unwrap_or(false);
            templated(InArray::new(haystack).strict(strict), "in_array", options)
        });
        self.register_validator("identical", |options| {
            let validator = match (options.get("token"), options.get("literal")) {
                (Some(Value::String(key)), _) => Identical::field(key.clone()),
                (Some(_), _) => {
                    return Err(FactoryError::invalid_option("identical", "token", "expected a string"));
                }
                (None, Some(literal)) => Identical::literal(literal.clone()),
                (None, None) => {
                    return Err(FactoryError::invalid_option(
                        "identical",
                        "token",
                        "either `token` or `literal` is required",
                    ));
                }
            };
            templated(validator, "identical", options)
        });
    }
}

impl Default for Registry {
    /// A registry holding the built-in filters and validators.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_builtin_filters();
        registry.register_builtin_validators();
        registry
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// OPTION HELPERS
// ============================================================================

/// Applies the `messages` option (`code -> template`) and shares the validator.
fn templated<V>(mut validator: V, name: &str, options: &Options) -> Result<Arc<dyn Validate>, FactoryError>
where
    V: Validate + Templated + 'static,
{
    match options.get("messages") {
        None => {}
        Some(Value::Object(messages)) => {
            for (code, template) in messages {
                let Value::String(template) = template else {
                    return Err(FactoryError::invalid_option(name, "messages", "templates must be strings"));
                };
                validator.templates_mut().set(code.clone(), template.clone());
            }
        }
        Some(_) => {
            return Err(FactoryError::invalid_option(name, "messages", "expected an object"));
        }
    }
    Ok(Arc::new(validator))
}

fn opt_str<'a>(options: &'a Options, name: &str, key: &str) -> Result<Option<&'a str>, FactoryError> {
    match options.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(FactoryError::invalid_option(name, key, "expected a string")),
    }
}

fn opt_bool(options: &Options, name: &str, key: &str) -> Result<Option<bool>, FactoryError> {
    match options.get(key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(FactoryError::invalid_option(name, key, "expected a boolean")),
    }
}

fn opt_f64(options: &Options, name: &str, key: &str) -> Result<Option<f64>, FactoryError> {
    match options.get(key) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(_) => Err(FactoryError::invalid_option(name, key, "expected a number")),
    }
}

fn opt_usize(options: &Options, name: &str, key: &str) -> Result<Option<usize>, FactoryError> {
    match options.get(key) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| FactoryError::invalid_option(name, key, "expected a non-negative integer")),
        Some(_) => Err(FactoryError::invalid_option(name, key, "expected a non-negative integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn options(value: Value) -> Options {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn builtins_are_registered() {
        let registry = Registry::default();
        assert_eq!(
            registry.filter_names().collect::<Vec<_>>(),
            vec!["string_trim", "string_to_lower", "string_to_upper", "to_int", "digits", "to_null"]
        );
        for name in [
            "not_empty",
            "digits",
            "string_length",
            "regex",
            "email_address",
            "between",
            "in_array",
            "identical",
        ] {
            assert!(registry.has_validator(name), "{name} missing");
        }
        assert!(Registry::empty().validator_names().next().is_none());
    }

    #[test]
    fn unknown_names() {
        let registry = Registry::default();
        assert!(matches!(
            registry.filter("rot13", &Options::new()),
            Err(FactoryError::UnknownFilter { .. })
        ));
        assert!(matches!(
            registry.validator("uuid", &Options::new()),
            Err(FactoryError::UnknownValidator { .. })
        ));
    }

    #[test]
    fn filter_options() {
        let registry = Registry::default();
        let trim = registry.filter("string_trim", &options(json!({"charlist": "-"}))).unwrap();
        assert_eq!(trim.filter(json!("--a--")), json!("a"));

        let to_null = registry.filter("to_null", &options(json!({"zero": true}))).unwrap();
        assert_eq!(to_null.filter(json!(0)), Value::Null);
    }

    #[rstest]
    #[case("string_length", json!({"min": "3"}))]
    #[case("string_length", json!({"max": -1}))]
    #[case("regex", json!({}))]
    #[case("between", json!({"min": 1}))]
    #[case("in_array", json!({"haystack": "abc"}))]
    #[case("identical", json!({}))]
    #[case("digits", json!({"messages": ["x"]}))]
    fn invalid_options(#[case] name: &str, #[case] opts: Value) {
        let err = Registry::default().validator(name, &options(opts)).unwrap_err();
        assert!(matches!(err, FactoryError::InvalidOption { .. }), "{name}: {err}");
    }

    #[test]
    fn bad_pattern_is_reported() {
        let err = Registry::default()
            .validator("regex", &options(json!({"pattern": "("})))
            .unwrap_err();
        assert_eq!(err.code(), "FACTORY_INVALID_PATTERN");
    }

    #[test]
    fn messages_override_templates() {
        let digits = Registry::default()
            .validator("digits", &options(json!({"messages": {"notDigits": "Numbers only"}})))
            .unwrap();
        assert_eq!(digits.validate(&json!("x"), None).unwrap_err().message, "Numbers only");
    }

    #[test]
    fn validator_options() {
        let registry = Registry::default();

        let length = registry
            .validator("string_length", &options(json!({"min": 2, "max": 3})))
            .unwrap();
        assert!(length.validate(&json!("abcd"), None).is_err());

        let between = registry
            .validator("between", &options(json!({"min": 0, "max": 1, "inclusive": false})))
            .unwrap();
        assert!(between.validate(&json!(1), None).is_err());

        let in_array = registry
            .validator("in_array", &options(json!({"haystack": [1, 2], "strict": true})))
            .unwrap();
        assert!(in_array.validate(&json!("1"), None).is_err());

        let identical = registry
            .validator("identical", &options(json!({"token": "password"})))
            .unwrap();
        assert!(identical.validate(&json!("a"), Some(&json!({"password": "a"}))).is_ok());
    }
}
