//! Cross-field equality validator.

use serde_json::Value;

use crate::foundation::{MessageTemplates, Validate, ValidationError};

/// What an [`Identical`] validator compares against.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// The value stored under this key of the validation context.
    Field(String),
    /// A fixed value.
    Literal(Value),
}

/// Validates that the input equals another field of the same data set
/// (password confirmation and the like) or a fixed token.
#[derive(Debug, Clone)]
pub struct Identical {
    token: Token,
    templates: MessageTemplates,
}

impl Identical {
    /// The values differ.
    pub const NOT_SAME: &'static str = "notSame";
    /// The token could not be resolved.
    pub const MISSING_TOKEN: &'static str = "missingToken";

    /// Compares against the context value under `key`.
    #[must_use]
    pub fn field(key: impl Into<String>) -> Self {
        Self::new(Token::Field(key.into()))
    }

    /// Compares against a fixed value.
    #[must_use]
    pub fn literal(value: Value) -> Self {
        Self::new(Token::Literal(value))
    }

    fn new(token: Token) -> Self {
        Self {
            token,
            templates: MessageTemplates::new(&[
                (Self::NOT_SAME, "The two given tokens do not match"),
                (Self::MISSING_TOKEN, "No token was provided to match against"),
            ]),
        }
    }

    /// The comparison token.
    pub fn token(&self) -> &Token {
        &self.token
    }
}

impl_templated!(Identical);

impl Validate for Identical {
    fn validate(&self, value: &Value, context: Option<&Value>) -> Result<(), ValidationError> {
        let expected = match &self.token {
            Token::Literal(v) => Some(v),
            Token::Field(key) => context.and_then(|c| c.get(key)),
        };

        match expected {
            None => Err(self.templates.render(Self::MISSING_TOKEN, &[])),
            Some(expected) if expected == value => Ok(()),
            Some(_) => Err(self.templates.render(Self::NOT_SAME, &[])),
        }
    }

    fn message_template(&self, code: &str) -> Option<&str> {
        self.templates.get(code)
    }
}
