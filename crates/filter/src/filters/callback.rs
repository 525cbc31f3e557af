//! Closure-backed filters.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::Filter;

type FilterFn = dyn Fn(Value) -> Value + Send + Sync;

/// Wraps a closure as a [`Filter`].
///
/// ```rust
/// use serde_json::json;
/// use sift_filter::Filter;
/// use sift_filter::filters::Callback;
///
/// let double = Callback::new(|v| json!(v.as_i64().unwrap_or(0) * 2));
/// assert_eq!(double.filter(json!(21)), json!(42));
/// ```
#[derive(Clone)]
pub struct Callback {
    func: Arc<FilterFn>,
}

impl Callback {
    /// Creates a filter from `func`.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}

impl Filter for Callback {
    fn filter(&self, value: Value) -> Value {
        (self.func)(value)
    }
}
