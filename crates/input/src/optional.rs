//! A group that may be left out entirely.

use serde_json::{Map, Value};

use crate::error::{InputError, type_name};
use crate::field_group::FieldGroup;
use crate::group::{Group, Node};
use crate::messages::Messages;
use crate::validation_group::ValidationGroup;

/// A [`FieldGroup`] that is valid when it receives no data.
///
/// Blankness is judged on the children's raw values, so keys no child
/// claims do not count. When every raw value is blank (`null`, `false`, `0`,
/// `""`, `"0"`, `[]`, or an object of blank values), the group is valid and
/// [`Group::values`] is `null`. Any other data is validated like a plain
/// [`FieldGroup`], required children included.
///
/// ```rust
/// use serde_json::json;
/// use sift_input::{Field, FieldGroup, Group, OptionalGroup};
/// use sift_validator::validators::Digits;
///
/// let address = FieldGroup::new()
///     .with("city", Field::new("city"))?
///     .with("zip", Field::new("zip").with_validator(Digits::new()))?;
/// let mut optional = OptionalGroup::new(address);
///
/// optional.set_data(json!({}))?;
/// assert!(optional.is_valid(None)?);
/// assert_eq!(optional.values(), json!(null));
///
/// optional.set_data(json!({"street": "Main St"}))?;
/// assert!(optional.is_valid(None)?);
///
/// optional.set_data(json!({"city": "Springfield", "zip": "x1"}))?;
/// assert!(!optional.is_valid(None)?);
/// # Ok::<(), sift_input::InputError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionalGroup {
    inner: FieldGroup,
}

impl OptionalGroup {
    /// Wraps `group`.
    #[must_use]
    pub fn new(group: FieldGroup) -> Self {
        Self { inner: group }
    }

    /// The wrapped group.
    pub fn group(&self) -> &FieldGroup {
        &self.inner
    }

    /// Mutable access to the wrapped group.
    pub fn group_mut(&mut self) -> &mut FieldGroup {
        &mut self.inner
    }

    /// Unwraps the group.
    #[must_use]
    pub fn into_inner(self) -> FieldGroup {
        self.inner
    }

    /// Whether the current data counts as "not provided".
    pub fn is_blank(&self) -> bool {
        self.inner.unfiltered_data().is_none() || is_blank_value(&self.inner.raw_values())
    }
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.values().all(is_blank_value),
        Value::Bool(true) => false,
    }
}

impl Group for OptionalGroup {
    fn set_data(&mut self, data: Value) -> Result<(), InputError> {
        match data {
            Value::Null => self.inner.set_data(Value::Object(Map::new())),
            Value::Object(_) => self.inner.set_data(data),
            other => Err(InputError::InvalidData {
                expected: "object",
                actual: type_name(&other),
            }),
        }
    }

    fn is_valid(&mut self, context: Option<&Value>) -> Result<bool, InputError> {
        if self.is_blank() {
            tracing::debug!("optional group left out");
            return Ok(true);
        }
        self.inner.is_valid(context)
    }

    fn values(&self) -> Value {
        if self.is_blank() {
            return Value::Null;
        }
        self.inner.values()
    }

    fn raw_values(&self) -> Value {
        if self.is_blank() {
            return Value::Null;
        }
        self.inner.raw_values()
    }

    fn messages(&self) -> Messages {
        self.inner.messages()
    }

    fn valid_input(&self) -> Vec<String> {
        self.inner.valid_input()
    }

    fn invalid_input(&self) -> Vec<String> {
        self.inner.invalid_input()
    }

    fn unknown(&self) -> Result<Map<String, Value>, InputError> {
        if self.inner.unfiltered_data().is_none() {
            return Ok(Map::new());
        }
        self.inner.unknown()
    }

    fn set_validation_group(&mut self, group: ValidationGroup) -> Result<(), InputError> {
        self.inner.set_validation_group(group)
    }

    fn empty_data(&self) -> Value {
        Value::Object(Map::new())
    }

    fn clone_box(&self) -> Box<dyn Group> {
        Box::new(self.clone())
    }
}

impl From<FieldGroup> for OptionalGroup {
    fn from(group: FieldGroup) -> Self {
        Self::new(group)
    }
}

impl From<OptionalGroup> for Node {
    fn from(group: OptionalGroup) -> Self {
        Self::Group(Box::new(group))
    }
}
