//! Message templates with `%param%` placeholders.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::foundation::ValidationError;
use crate::foundation::error::interpolate;

/// Per-code message templates of one validator.
///
/// Templates may reference parameters as `%name%`; [`MessageTemplates::render`]
/// substitutes them and attaches the parameters to the produced error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTemplates {
    templates: IndexMap<Cow<'static, str>, Cow<'static, str>>,
}

impl MessageTemplates {
    /// Creates templates from static defaults.
    #[must_use]
    pub fn new(defaults: &[(&'static str, &'static str)]) -> Self {
        Self {
            templates: defaults
                .iter()
                .map(|&(code, template)| (Cow::Borrowed(code), Cow::Borrowed(template)))
                .collect(),
        }
    }

    /// Overrides (or adds) the template for `code`.
    pub fn set(
        &mut self,
        code: impl Into<Cow<'static, str>>,
        template: impl Into<Cow<'static, str>>,
    ) -> &mut Self {
        self.templates.insert(code.into(), template.into());
        self
    }

    /// The template for `code`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        self.templates.get(code).map(AsRef::as_ref)
    }

    /// Iterates `(code, template)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates.iter().map(|(c, t)| (c.as_ref(), t.as_ref()))
    }

    /// Builds the error for `code`, substituting `params` into its template.
    ///
    /// An unknown code renders as the code itself.
    #[must_use]
    pub fn render(&self, code: &'static str, params: &[(&'static str, String)]) -> ValidationError {
        let template = self.get(code).unwrap_or(code);
        let error = ValidationError::new(code, interpolate(template, params))
            .with_template(template.to_owned());

        params.iter().fold(error, |error, (key, value)| {
            error.with_param(*key, value.clone())
        })
    }
}

/// Validators whose messages come from [`MessageTemplates`].
pub trait Templated {
    /// The validator's templates.
    fn templates(&self) -> &MessageTemplates;

    /// Mutable access to the validator's templates.
    fn templates_mut(&mut self) -> &mut MessageTemplates;

    /// Overrides the message for `code` (builder-style).
    #[must_use = "builder methods must be chained or built"]
    fn with_message(
        mut self,
        code: impl Into<Cow<'static, str>>,
        template: impl Into<Cow<'static, str>>,
    ) -> Self
    where
        Self: Sized,
    {
        self.templates_mut().set(code, template);
        self
    }
}
