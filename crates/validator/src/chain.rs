//! Ordered validator pipelines.
//!
//! A [`ValidatorChain`] runs its validators in attach order against one
//! value and reports the run as a [`ChainOutcome`]. Each entry carries its
//! own break-on-failure flag: when a validator flagged that way fails, the
//! validators after it are not run.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::foundation::Validate;
use crate::translate::Translator;
use crate::validators::NotEmpty;

#[derive(Debug, Clone)]
struct ChainEntry {
    validator: Arc<dyn Validate>,
    break_on_failure: bool,
}

// ============================================================================
// CHAIN OUTCOME
// ============================================================================

/// The result of one [`ValidatorChain::check`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    valid: bool,
    messages: IndexMap<String, String>,
}

impl ChainOutcome {
    /// A passing outcome without messages.
    #[must_use]
    pub fn success() -> Self {
        Self {
            valid: true,
            messages: IndexMap::new(),
        }
    }

    /// Whether every validator that ran passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// `code -> message` for every failure of the run, in failure order.
    #[must_use]
    pub fn messages(&self) -> &IndexMap<String, String> {
        &self.messages
    }

    /// Consumes the outcome, returning its messages.
    #[must_use]
    pub fn into_messages(self) -> IndexMap<String, String> {
        self.messages
    }
}

// ============================================================================
// VALIDATOR CHAIN
// ============================================================================

/// An ordered sequence of validators with per-entry break-on-failure.
#[derive(Debug, Clone, Default)]
pub struct ValidatorChain {
    entries: Vec<ChainEntry>,
    translator: Option<Arc<dyn Translator>>,
}

impl ValidatorChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validator that does not break the chain (builder-style).
    #[must_use]
    pub fn with(mut self, validator: impl Validate + 'static) -> Self {
        self.attach(validator, false);
        self
    }

    /// Sets the translator used for every reported message (builder-style).
    #[must_use]
    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.set_translator(Arc::new(translator));
        self
    }

    /// Appends a validator.
    pub fn attach(&mut self, validator: impl Validate + 'static, break_on_failure: bool) -> &mut Self {
        self.attach_shared(Arc::new(validator), break_on_failure)
    }

    /// Appends an already shared validator.
    pub fn attach_shared(&mut self, validator: Arc<dyn Validate>, break_on_failure: bool) -> &mut Self {
        self.entries.push(ChainEntry {
            validator,
            break_on_failure,
        });
        self
    }

    /// Inserts a validator in front of all others.
    pub fn prepend(&mut self, validator: impl Validate + 'static, break_on_failure: bool) -> &mut Self {
        self.entries.insert(
            0,
            ChainEntry {
                validator: Arc::new(validator),
                break_on_failure,
            },
        );
        self
    }

    /// Appends every entry of `other`. `other`'s translator is adopted when
    /// this chain has none.
    pub fn merge(&mut self, other: &ValidatorChain) -> &mut Self {
        self.entries.extend(other.entries.iter().cloned());
        if self.translator.is_none() {
            self.translator.clone_from(&other.translator);
        }
        self
    }

    /// Sets the translator used for every reported message.
    pub fn set_translator(&mut self, translator: Arc<dyn Translator>) -> &mut Self {
        self.translator = Some(translator);
        self
    }

    /// The configured translator.
    pub fn translator(&self) -> Option<&Arc<dyn Translator>> {
        self.translator.as_ref()
    }

    /// Whether a presence check ([`NotEmpty`] or equivalent) is attached.
    #[must_use]
    pub fn has_presence_check(&self) -> bool {
        self.entries.iter().any(|e| e.validator.is_presence_check())
    }

    /// Prepends a break-on-failure [`NotEmpty`] unless a presence check is
    /// already attached. Returns whether one was added.
    ///
    /// Calling this any number of times leaves at most one injected check.
    pub fn ensure_not_empty(&mut self) -> bool {
        if self.has_presence_check() {
            return false;
        }
        self.prepend(NotEmpty::new(), true);
        true
    }

    /// The `(code, message)` reported for a required value that was never
    /// provided.
    ///
    /// Uses the template of an attached presence check when there is one,
    /// so an overridden [`NotEmpty`] message also covers missing values.
    #[must_use]
    pub fn required_message(&self) -> (String, String) {
        let template = self
            .entries
            .iter()
            .filter(|e| e.validator.is_presence_check())
            .find_map(|e| e.validator.message_template(NotEmpty::IS_EMPTY))
            .unwrap_or(NotEmpty::DEFAULT_MESSAGE);

        (NotEmpty::IS_EMPTY.to_owned(), self.translate(template))
    }

    /// Runs the chain against `value`.
    pub fn check(&self, value: &Value, context: Option<&Value>) -> ChainOutcome {
        let mut outcome = ChainOutcome::success();

        for entry in &self.entries {
            let Err(error) = entry.validator.validate(value, context) else {
                continue;
            };

            outcome.valid = false;
            for leaf in error.leaves() {
                outcome
                    .messages
                    .insert(leaf.code.to_string(), leaf.localize(|text| self.translate(text)));
            }

            if entry.break_on_failure {
                break;
            }
        }

        tracing::trace!(
            validators = self.entries.len(),
            valid = outcome.valid,
            "validator chain evaluated"
        );
        outcome
    }

    fn translate(&self, message: &str) -> String {
        match &self.translator {
            Some(translator) => translator.translate(message),
            None => message.to_owned(),
        }
    }

    /// Number of attached validators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no validators are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Templated;
    use crate::translate::Catalog;
    use crate::validators::{Digits, StringLength};
    use serde_json::json;

    #[test]
    fn empty_chain_passes() {
        let outcome = ValidatorChain::new().check(&json!(null), None);
        assert!(outcome.is_valid());
        assert!(outcome.messages().is_empty());
    }

    #[test]
    fn collects_messages_from_every_failure() {
        let chain = ValidatorChain::new()
            .with(Digits::new())
            .with(StringLength::at_least(5));

        let outcome = chain.check(&json!("ab"), None);
        assert!(!outcome.is_valid());
        let codes: Vec<&str> = outcome.messages().keys().map(String::as_str).collect();
        assert_eq!(codes, vec![Digits::NOT_DIGITS, StringLength::TOO_SHORT]);
    }

    #[test]
    fn break_on_failure_stops_chain() {
        let mut chain = ValidatorChain::new();
        chain.attach(Digits::new(), true);
        chain.attach(StringLength::at_least(5), false);

        let outcome = chain.check(&json!("ab"), None);
        assert_eq!(outcome.messages().len(), 1);
        assert!(outcome.messages().contains_key(Digits::NOT_DIGITS));
    }

    #[test]
    fn ensure_not_empty_is_idempotent() {
        let mut chain = ValidatorChain::new().with(Digits::new());
        assert!(chain.ensure_not_empty());
        assert!(!chain.ensure_not_empty());
        assert!(!chain.ensure_not_empty());
        assert_eq!(chain.len(), 2);

        let outcome = chain.check(&json!(""), None);
        let codes: Vec<&str> = outcome.messages().keys().map(String::as_str).collect();
        assert_eq!(codes, vec![NotEmpty::IS_EMPTY]);
    }

    #[test]
    fn ensure_not_empty_respects_existing_check() {
        let mut chain = ValidatorChain::new().with(Digits::new()).with(NotEmpty::new());
        assert!(!chain.ensure_not_empty());
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn required_message_uses_attached_template() {
        let chain = ValidatorChain::new().with(NotEmpty::new().with_message(NotEmpty::IS_EMPTY, "fill me"));
        assert_eq!(chain.required_message(), ("isEmpty".to_owned(), "fill me".to_owned()));

        let chain = ValidatorChain::new();
        assert_eq!(chain.required_message().1, "Value is required and can't be empty");
    }

    #[test]
    fn translator_applies_to_messages() {
        let chain = ValidatorChain::new()
            .with(Digits::new())
            .with_translator(Catalog::new().with("The input must contain only digits", "nur Ziffern"));

        let outcome = chain.check(&json!("x"), None);
        assert_eq!(outcome.messages()[Digits::NOT_DIGITS], "nur Ziffern");
        assert_eq!(
            chain.required_message().1,
            "Value is required and can't be empty"
        );
    }

    #[test]
    fn translator_sees_templates_before_substitution() {
        let chain = ValidatorChain::new()
            .with(StringLength::at_least(5))
            .with_translator(Catalog::new().with(
                "The input is less than %min% characters long",
                "Mindestens %min% Zeichen",
            ));

        let outcome = chain.check(&json!("ab"), None);
        assert_eq!(outcome.messages()[StringLength::TOO_SHORT], "Mindestens 5 Zeichen");
    }

    #[test]
    fn merge_appends_entries() {
        let mut chain = ValidatorChain::new().with(Digits::new());
        chain.merge(&ValidatorChain::new().with(StringLength::at_most(2)));
        assert_eq!(chain.len(), 2);
        assert!(!chain.check(&json!("123"), None).is_valid());
    }
}
