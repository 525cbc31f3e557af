//! # sift-factory
//!
//! Declarative construction of [`sift_input`] trees.
//!
//! A [`GroupSpec`] (JSON or YAML) names the inputs of a group, their
//! presence flags, and the filters and validators to attach by name. The
//! [`Factory`] resolves those names through a [`Registry`] and returns a
//! ready [`FieldGroup`](sift_input::FieldGroup).
//!
//! ## Built-in names
//!
//! | filters | validators |
//! |---|---|
//! | `string_trim` (`charlist`) | `not_empty` |
//! | `string_to_lower` | `digits` |
//! | `string_to_upper` | `string_length` (`min`, `max`) |
//! | `to_int` | `regex` (`pattern`) |
//! | `to_null` (`false`, `zero`) | `email_address` |
//! | `digits` | `between` (`min`, `max`, `inclusive`) |
//! | | `in_array` (`haystack`, `strict`) |
//! | | `identical` (`token` or `literal`) |
//!
//! Every validator also accepts `messages`: a map of failure code to
//! message template.

pub mod error;
pub mod factory;
pub mod registry;
pub mod spec;

pub use error::FactoryError;
pub use factory::Factory;
pub use registry::Registry;
pub use spec::{CollectionSpec, FilterSpec, GroupSpec, InputSpec, NodeSpec, Options, ValidatorSpec};
