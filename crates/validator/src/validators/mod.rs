//! Built-in validators
//!
//! Every validator reports failures under stable codes exposed as
//! associated constants (for example [`Digits::NOT_DIGITS`]); the messages
//! behind those codes can be replaced through
//! [`Templated::with_message`](crate::foundation::Templated::with_message).

pub mod callback;
pub mod content;
pub mod digits;
pub mod identical;
pub mod length;
pub mod not_empty;
pub mod range;
pub mod sets;

pub use callback::Callback;
pub use content::{EmailAddress, Regex};
pub use digits::Digits;
pub use identical::{Identical, Token};
pub use length::StringLength;
pub use not_empty::NotEmpty;
pub use range::Between;
pub use sets::InArray;
