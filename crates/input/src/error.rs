use serde_json::Value;

/// Error type for misuse of the input tree.
///
/// These are programming or configuration errors (validating before data
/// was set, naming an input that does not exist, ...). A value that fails
/// validation is never an error: it is reported through `is_valid` and the
/// message maps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// `is_valid` or `unknown` was called before any data was set.
    #[error("no data has been set")]
    DataNotSet,

    /// Data handed to a group has the wrong shape.
    #[error("invalid data: expected {expected}, got {actual}")]
    InvalidData {
        expected: &'static str,
        actual: &'static str,
    },

    /// A record of a repeating group is not an object.
    #[error("record {index} must be an object, got {actual}")]
    InvalidRecord { index: usize, actual: &'static str },

    /// A list field was given something other than an array.
    #[error("list input `{name}` expects an array, got {actual}")]
    NotAList { name: String, actual: &'static str },

    /// An input was added without a name.
    #[error("cannot add an input without a name")]
    MissingName,

    /// No input with the given name exists.
    #[error("no input named `{name}`")]
    UnknownInput { name: String },

    /// A nested validation group targets a plain field.
    #[error("input `{name}` is not a group")]
    NotAGroup { name: String },

    /// Per-record validation groups are configured but not for this record.
    #[error("no validation group configured for record {index}")]
    MissingRecordGroup { index: usize },

    /// A validation group does not fit the group it was applied to.
    #[error("invalid validation group: {reason}")]
    InvalidValidationGroup { reason: &'static str },
}

impl InputError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::DataNotSet => "state",
            Self::InvalidData { .. } | Self::InvalidRecord { .. } | Self::NotAList { .. } => "data",
            Self::MissingName | Self::UnknownInput { .. } | Self::NotAGroup { .. } => "composition",
            Self::MissingRecordGroup { .. } | Self::InvalidValidationGroup { .. } => {
                "validation_group"
            }
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::DataNotSet => "INPUT_DATA_NOT_SET",
            Self::InvalidData { .. } => "INPUT_INVALID_DATA",
            Self::InvalidRecord { .. } => "INPUT_INVALID_RECORD",
            Self::NotAList { .. } => "INPUT_NOT_A_LIST",
            Self::MissingName => "INPUT_MISSING_NAME",
            Self::UnknownInput { .. } => "INPUT_UNKNOWN",
            Self::NotAGroup { .. } => "INPUT_NOT_A_GROUP",
            Self::MissingRecordGroup { .. } => "INPUT_MISSING_RECORD_GROUP",
            Self::InvalidValidationGroup { .. } => "INPUT_INVALID_VALIDATION_GROUP",
        }
    }
}

/// JSON type name of `value`, for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
