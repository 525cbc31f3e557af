//! # sift-input
//!
//! Nested input filtering and validation.
//!
//! A tree of inputs receives an untyped data set (a form submission, an
//! API payload), filters each value, validates it, and reports the
//! filtered values together with structured failure messages.
//!
//! - [`Field`]: one named value with a [`FilterChain`](sift_filter::FilterChain)
//!   and a [`ValidatorChain`](sift_validator::chain::ValidatorChain);
//!   [`Field::list`] validates every element of an array.
//! - [`FieldGroup`]: named children, data distributed by key.
//! - [`RepeatingGroup`]: one template group applied to each record of a list.
//! - [`OptionalGroup`]: a group that is valid when left out.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use sift_filter::filters::{StringTrim, ToInt};
//! use sift_input::prelude::*;
//! use sift_validator::validators::{Between, EmailAddress};
//!
//! let mut form = FieldGroup::new()
//!     .with("email", Field::new("email").with_filter(StringTrim::new()).with_validator(EmailAddress::new()))?
//!     .with("age", Field::new("age").with_filter(ToInt).with_validator(Between::new(18.0, 130.0)))?;
//!
//! form.set_data(json!({"email": " ada@example.com ", "age": "36"}))?;
//! assert!(form.is_valid(None)?);
//! assert_eq!(form.values(), json!({"email": "ada@example.com", "age": 36}));
//!
//! form.set_data(json!({"email": "nope", "age": "12"}))?;
//! assert!(!form.is_valid(None)?);
//! assert_eq!(form.invalid_input(), vec!["email", "age"]);
//! # Ok::<(), sift_input::InputError>(())
//! ```
//!
//! ## Errors
//!
//! Invalid data is not an error: `is_valid` returns `Ok(false)` and the
//! details are in [`Group::messages`]. [`InputError`] is returned for
//! misuse only, such as validating before data was set or restricting
//! validation to an input that does not exist.

pub mod error;
pub mod field;
pub mod field_group;
pub mod group;
pub mod messages;
pub mod optional;
pub mod repeating;
pub mod validation_group;

pub use error::InputError;
pub use field::{Field, ValueShape, is_empty_value};
pub use field_group::FieldGroup;
pub use group::{Group, Node};
pub use messages::Messages;
pub use optional::OptionalGroup;
pub use repeating::RepeatingGroup;
pub use validation_group::ValidationGroup;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Field, FieldGroup, Group, InputError, Messages, Node, OptionalGroup, RepeatingGroup,
        ValidationGroup, ValueShape,
    };
}
