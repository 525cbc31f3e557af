//! Ordered filter pipelines.

use std::sync::Arc;

use serde_json::Value;

use crate::Filter;

/// Priority given to filters attached without an explicit priority.
pub const DEFAULT_PRIORITY: i32 = 1000;

#[derive(Debug, Clone)]
struct Entry {
    filter: Arc<dyn Filter>,
    priority: i32,
}

/// An ordered sequence of filters.
///
/// Filters run from highest to lowest priority; filters sharing a priority
/// run in the order they were attached. An empty chain is the identity.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    entries: Vec<Entry>,
}

impl FilterChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a filter at [`DEFAULT_PRIORITY`] (builder-style, consuming).
    #[must_use]
    pub fn with(mut self, filter: impl Filter + 'static) -> Self {
        self.attach(filter);
        self
    }

    /// Attaches a filter at [`DEFAULT_PRIORITY`].
    pub fn attach(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.attach_shared(Arc::new(filter), DEFAULT_PRIORITY)
    }

    /// Attaches a filter with an explicit priority.
    pub fn attach_with_priority(
        &mut self,
        filter: impl Filter + 'static,
        priority: i32,
    ) -> &mut Self {
        self.attach_shared(Arc::new(filter), priority)
    }

    /// Attaches an already shared filter.
    pub fn attach_shared(&mut self, filter: Arc<dyn Filter>, priority: i32) -> &mut Self {
        // Stable insertion keeps attach order among equal priorities.
        let at = self
            .entries
            .iter()
            .position(|e| e.priority < priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, Entry { filter, priority });
        self
    }

    /// Appends every filter of `other`, keeping their priorities.
    pub fn merge(&mut self, other: &FilterChain) -> &mut Self {
        for entry in &other.entries {
            self.attach_shared(Arc::clone(&entry.filter), entry.priority);
        }
        self
    }

    /// Runs `value` through every filter.
    pub fn apply(&self, value: &Value) -> Value {
        self.entries
            .iter()
            .fold(value.clone(), |acc, entry| entry.filter.filter(acc))
    }

    /// Number of attached filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no filters are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Callback, StringToUpper, StringTrim};
    use serde_json::json;

    #[test]
    fn empty_chain_is_identity() {
        let chain = FilterChain::new();
        assert_eq!(chain.apply(&json!({"a": [1, 2]})), json!({"a": [1, 2]}));
        assert!(chain.is_empty());
    }

    fn suffix(tag: &'static str) -> Callback {
        Callback::new(move |v| json!(format!("{}{tag}", v.as_str().unwrap_or_default())))
    }

    #[test]
    fn higher_priority_runs_first() {
        let mut chain = FilterChain::new();
        chain.attach_with_priority(suffix("-low"), 1);
        chain.attach_with_priority(suffix("-high"), 10);

        assert_eq!(chain.apply(&json!("x")), json!("x-high-low"));
    }

    #[test]
    fn equal_priority_keeps_attach_order() {
        let chain = FilterChain::new().with(suffix("a")).with(suffix("b"));

        assert_eq!(chain.apply(&json!("")), json!("ab"));
    }

    #[test]
    fn merge_appends_filters() {
        let mut chain = FilterChain::new().with(StringTrim::new());
        let other = FilterChain::new().with(StringToUpper);
        chain.merge(&other);

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.apply(&json!("  abc  ")), json!("ABC"));
    }
}
