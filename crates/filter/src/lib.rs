//! # sift-filter
//!
//! Value normalization for sift inputs.
//!
//! A [`Filter`] is a total function `Value -> Value`. Filters never fail:
//! a filter that does not understand its input hands it back untouched.
//! A [`FilterChain`] runs filters in priority order (highest first, ties in
//! attach order) and is what an input uses to derive its filtered value
//! from the raw one.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use sift_filter::FilterChain;
//! use sift_filter::filters::{StringToLower, StringTrim};
//!
//! let chain = FilterChain::new()
//!     .with(StringTrim::new())
//!     .with(StringToLower);
//!
//! assert_eq!(chain.apply(&json!("  Hello ")), json!("hello"));
//! ```

pub mod chain;
pub mod filters;

pub use chain::{DEFAULT_PRIORITY, FilterChain};

use std::fmt;

use serde_json::Value;

/// A value transformation.
///
/// Implementations must be total: any input yields an output, and inputs
/// of a type the filter does not handle are returned unchanged.
pub trait Filter: fmt::Debug + Send + Sync {
    /// Transforms `value`.
    fn filter(&self, value: Value) -> Value;
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn filter(&self, value: Value) -> Value {
        (**self).filter(value)
    }
}

impl<F: Filter + ?Sized> Filter for std::sync::Arc<F> {
    fn filter(&self, value: Value) -> Value {
        (**self).filter(value)
    }
}
