//! Message translation.
//!
//! A [`ValidatorChain`](crate::chain::ValidatorChain) can carry a
//! [`Translator`]; every message the chain reports is passed through it.

use std::fmt;

use indexmap::IndexMap;

/// Translates validation messages.
///
/// Templated messages are translated in template form (`"... %min% ..."`)
/// and rendered afterwards, so catalogs are keyed by template.
pub trait Translator: fmt::Debug + Send + Sync {
    /// Returns the translation of `message`, or `message` itself.
    fn translate(&self, message: &str) -> String;
}

/// A fixed lookup table of translations.
///
/// ```rust
/// use sift_validator::translate::{Catalog, Translator};
///
/// let catalog = Catalog::new().with("Value is required and can't be empty", "Pflichtfeld");
/// assert_eq!(catalog.translate("Value is required and can't be empty"), "Pflichtfeld");
/// assert_eq!(catalog.translate("untranslated"), "untranslated");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: IndexMap<String, String>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a translation.
    #[must_use]
    pub fn with(mut self, message: impl Into<String>, translation: impl Into<String>) -> Self {
        self.insert(message, translation);
        self
    }

    /// Adds a translation.
    pub fn insert(&mut self, message: impl Into<String>, translation: impl Into<String>) {
        self.entries.insert(message.into(), translation.into());
    }

    /// Number of translations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for Catalog {
    fn translate(&self, message: &str) -> String {
        self.entries
            .get(message)
            .cloned()
            .unwrap_or_else(|| message.to_owned())
    }
}

impl FromIterator<(String, String)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
