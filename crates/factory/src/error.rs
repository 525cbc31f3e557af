use sift_input::InputError;

/// Error type for building input trees from specs.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// No filter is registered under the name.
    #[error("unknown filter `{name}`")]
    UnknownFilter { name: String },

    /// No validator is registered under the name.
    #[error("unknown validator `{name}`")]
    UnknownValidator { name: String },

    /// An option is missing or has the wrong type.
    #[error("invalid option `{option}` for `{name}`: {reason}")]
    InvalidOption {
        name: String,
        option: String,
        reason: String,
    },

    /// A `regex` validator pattern does not compile.
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// The spec is not valid JSON or does not match the spec schema.
    #[error("invalid spec: {0}")]
    Spec(#[from] serde_json::Error),

    /// The spec is not valid YAML or does not match the spec schema.
    #[error("invalid spec: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Assembling the tree failed.
    #[error(transparent)]
    Input(#[from] InputError),
}

impl FactoryError {
    pub(crate) fn invalid_option(
        name: &str,
        option: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            name: name.to_owned(),
            option: option.to_owned(),
            reason: reason.into(),
        }
    }

    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::UnknownFilter { .. } | Self::UnknownValidator { .. } => "lookup",
            Self::InvalidOption { .. } | Self::Regex(_) => "options",
            Self::Spec(_) | Self::Yaml(_) => "spec",
            Self::Input(err) => err.category(),
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownFilter { .. } => "FACTORY_UNKNOWN_FILTER",
            Self::UnknownValidator { .. } => "FACTORY_UNKNOWN_VALIDATOR",
            Self::InvalidOption { .. } => "FACTORY_INVALID_OPTION",
            Self::Regex(_) => "FACTORY_INVALID_PATTERN",
            Self::Spec(_) | Self::Yaml(_) => "FACTORY_INVALID_SPEC",
            Self::Input(err) => err.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = FactoryError::UnknownFilter { name: "rot13".into() };
        assert_eq!(err.to_string(), "unknown filter `rot13`");

        let err = FactoryError::invalid_option("between", "min", "expected a number");
        assert_eq!(
            err.to_string(),
            "invalid option `min` for `between`: expected a number"
        );

        let err = FactoryError::from(InputError::MissingName);
        assert_eq!(err.to_string(), "cannot add an input without a name");
        assert_eq!(err.code(), "INPUT_MISSING_NAME");
        assert_eq!(err.category(), "composition");
    }
}
