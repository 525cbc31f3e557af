//! Built-in filters
//!
//! - **String**: [`StringTrim`], [`StringToLower`], [`StringToUpper`]
//! - **Numeric**: [`ToInt`], [`Digits`]
//! - **Nullish**: [`ToNull`]
//! - **Custom**: [`Callback`]

pub mod callback;
pub mod digits;
pub mod null;
pub mod number;
pub mod string;

pub use callback::Callback;
pub use digits::Digits;
pub use null::ToNull;
pub use number::ToInt;
pub use string::{StringToLower, StringToUpper, StringTrim};
