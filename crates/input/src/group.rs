//! The interface shared by every composite input.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::InputError;
use crate::field::Field;
use crate::messages::Messages;
use crate::validation_group::ValidationGroup;

/// A composite input: receives a data set, validates it, and reports
/// values, messages and unexpected keys.
///
/// Implemented by [`FieldGroup`](crate::FieldGroup),
/// [`RepeatingGroup`](crate::RepeatingGroup) and
/// [`OptionalGroup`](crate::OptionalGroup). Groups nest through
/// [`Node::Group`].
pub trait Group: fmt::Debug + Send + Sync {
    /// Replaces the data set and clears the previous validation results.
    fn set_data(&mut self, data: Value) -> Result<(), InputError>;

    /// Validates the current data set.
    ///
    /// `Ok(false)` means the data is invalid; `Err` is reserved for misuse
    /// such as validating before any data was set.
    fn is_valid(&mut self, context: Option<&Value>) -> Result<bool, InputError>;

    /// Filtered values of the validated inputs.
    fn values(&self) -> Value;

    /// Unfiltered values of the validated inputs.
    fn raw_values(&self) -> Value;

    /// Messages of the invalid inputs.
    fn messages(&self) -> Messages;

    /// Names of the inputs that passed the last validation.
    fn valid_input(&self) -> Vec<String>;

    /// Names of the inputs that failed the last validation.
    fn invalid_input(&self) -> Vec<String>;

    /// Data keys (recursively) that no input consumes.
    fn unknown(&self) -> Result<Map<String, Value>, InputError>;

    /// Whether [`Group::unknown`] would report anything.
    fn has_unknown(&self) -> Result<bool, InputError> {
        Ok(!self.unknown()?.is_empty())
    }

    /// Restricts which inputs take part in validation.
    fn set_validation_group(&mut self, group: ValidationGroup) -> Result<(), InputError>;

    /// The data a parent assigns when its own data lacks this group's key
    /// or holds `null` there.
    fn empty_data(&self) -> Value;

    /// Clones into a box.
    fn clone_box(&self) -> Box<dyn Group>;
}

impl Clone for Box<dyn Group> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================================================
// NODE
// ============================================================================

/// A child of a [`FieldGroup`](crate::FieldGroup).
#[derive(Debug, Clone)]
pub enum Node {
    /// A leaf input.
    Field(Field),
    /// A nested group.
    Group(Box<dyn Group>),
}

impl Node {
    /// The field, if this is one.
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(field) => Some(field),
            Self::Group(_) => None,
        }
    }

    /// Mutable access to the field, if this is one.
    pub fn as_field_mut(&mut self) -> Option<&mut Field> {
        match self {
            Self::Field(field) => Some(field),
            Self::Group(_) => None,
        }
    }

    /// The group, if this is one.
    pub fn as_group(&self) -> Option<&dyn Group> {
        match self {
            Self::Group(group) => Some(group.as_ref()),
            Self::Field(_) => None,
        }
    }

    /// Mutable access to the group, if this is one.
    pub fn as_group_mut(&mut self) -> Option<&mut dyn Group> {
        match self {
            Self::Group(group) => Some(group.as_mut()),
            Self::Field(_) => None,
        }
    }

    pub(crate) fn values(&self) -> Value {
        match self {
            Self::Field(field) => field.value(),
            Self::Group(group) => group.values(),
        }
    }

    pub(crate) fn raw_values(&self) -> Value {
        match self {
            Self::Field(field) => field.raw_value().clone(),
            Self::Group(group) => group.raw_values(),
        }
    }

    pub(crate) fn messages(&self) -> Messages {
        match self {
            Self::Field(field) => Messages::Field(field.messages()),
            Self::Group(group) => group.messages(),
        }
    }
}

impl From<Field> for Node {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<Box<dyn Group>> for Node {
    fn from(group: Box<dyn Group>) -> Self {
        Self::Group(group)
    }
}
