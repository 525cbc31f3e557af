//! # sift-validator
//!
//! Validators for untyped (`serde_json::Value`) input, and the ordered
//! [`ValidatorChain`](chain::ValidatorChain) an input runs them through.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use sift_validator::prelude::*;
//!
//! let mut chain = ValidatorChain::new();
//! chain.attach(Digits::new(), false);
//! chain.attach(StringLength::between(3, 5), false);
//!
//! assert!(chain.check(&json!("1234"), None).is_valid());
//!
//! let outcome = chain.check(&json!("12ab"), None);
//! assert!(!outcome.is_valid());
//! assert!(outcome.messages().contains_key(Digits::NOT_DIGITS));
//! ```
//!
//! ## Creating Validators
//!
//! Implement [`Validate`](foundation::Validate). The optional `context`
//! argument is the data set the value was taken from, which lets a
//! validator compare against sibling fields (see
//! [`Identical`](validators::Identical)).
//!
//! ## Built-in Validators
//!
//! - **Presence**: [`NotEmpty`](validators::NotEmpty)
//! - **String**: [`StringLength`](validators::StringLength),
//!   [`Regex`](validators::Regex), [`EmailAddress`](validators::EmailAddress),
//!   [`Digits`](validators::Digits)
//! - **Numeric**: [`Between`](validators::Between)
//! - **Sets**: [`InArray`](validators::InArray)
//! - **Cross-field**: [`Identical`](validators::Identical)
//! - **Custom**: [`Callback`](validators::Callback)

#[macro_use]
mod macros;

pub mod chain;
pub mod foundation;
pub mod prelude;
pub mod translate;
pub mod validators;
