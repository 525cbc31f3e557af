//! Prelude module for convenient imports.
//!
//! ```rust
//! use sift_validator::prelude::*;
//!
//! let chain = ValidatorChain::new().with(NotEmpty::new()).with(Digits::new());
//! assert_eq!(chain.len(), 2);
//! ```

pub use crate::chain::{ChainOutcome, ValidatorChain};
pub use crate::foundation::{MessageTemplates, Templated, Validate, ValidationError};
pub use crate::translate::{Catalog, Translator};

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;
