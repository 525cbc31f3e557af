//! Named collections of inputs.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{InputError, type_name};
use crate::field::{Field, ValueShape};
use crate::group::{Group, Node};
use crate::messages::Messages;
use crate::validation_group::ValidationGroup;

/// A named, ordered collection of fields and nested groups.
///
/// Data assigned with [`Group::set_data`] is distributed to the children by
/// key; validation walks the children in insertion order.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use sift_input::{Field, FieldGroup, Group};
/// use sift_validator::validators::EmailAddress;
///
/// let mut signup = FieldGroup::new()
///     .with("email", Field::new("email").with_validator(EmailAddress::new()))?
///     .with("nickname", Field::new("nickname").with_required(false))?;
///
/// signup.set_data(json!({"email": "ada@example.com", "extra": 1}))?;
/// assert!(signup.is_valid(None)?);
/// assert_eq!(signup.values(), json!({"email": "ada@example.com", "nickname": null}));
/// assert_eq!(signup.unknown()?, json!({"extra": 1}).as_object().cloned().unwrap());
/// # Ok::<(), sift_input::InputError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldGroup {
    inputs: IndexMap<String, Node>,
    data: Option<Map<String, Value>>,
    validation_group: Option<Vec<String>>,
    valid: Vec<String>,
    invalid: Vec<String>,
}

impl FieldGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Composition
    // ------------------------------------------------------------------

    /// Adds `node` under `name` (builder-style, consuming).
    pub fn with(mut self, name: impl Into<String>, node: impl Into<Node>) -> Result<Self, InputError> {
        self.add(name, node)?;
        Ok(self)
    }

    /// Adds `node` under `name`.
    ///
    /// A field added under the name of an existing field is merged into it
    /// (see [`Field::merge`]); anything else replaces the existing child.
    /// Unnamed fields take `name`.
    pub fn add(&mut self, name: impl Into<String>, node: impl Into<Node>) -> Result<&mut Self, InputError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InputError::MissingName);
        }

        let mut node = node.into();
        if let Node::Field(field) = &mut node
            && field.name().is_none()
        {
            field.set_name(name.clone());
        }

        if let (Some(Node::Field(existing)), Node::Field(incoming)) = (self.inputs.get_mut(&name), &node) {
            existing.merge(incoming);
            return Ok(self);
        }

        self.inputs.insert(name, node);
        Ok(self)
    }

    /// Adds a field under its own name.
    pub fn add_field(&mut self, field: Field) -> Result<&mut Self, InputError> {
        let name = field.name().map(str::to_owned).ok_or(InputError::MissingName)?;
        self.add(name, field)
    }

    /// Replaces the child `name`, keeping its position. Returns the old child.
    pub fn replace(&mut self, name: &str, node: impl Into<Node>) -> Result<Node, InputError> {
        let slot = self
            .inputs
            .get_mut(name)
            .ok_or_else(|| InputError::UnknownInput { name: name.to_owned() })?;
        Ok(std::mem::replace(slot, node.into()))
    }

    /// Removes and returns the child `name`.
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        self.inputs.shift_remove(name)
    }

    /// Adds every child of `other` (see [`FieldGroup::add`]).
    pub fn merge(&mut self, other: &FieldGroup) -> Result<&mut Self, InputError> {
        for (name, node) in &other.inputs {
            self.add(name.clone(), node.clone())?;
        }
        Ok(self)
    }

    /// The child `name`.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.inputs.get(name)
    }

    /// Mutable access to the child `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.inputs.get_mut(name)
    }

    /// The field `name`, if that child is a field.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.get(name).and_then(Node::as_field)
    }

    /// Whether a child `name` exists.
    pub fn has(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether the group has no children.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Child names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    /// The data exactly as last assigned.
    pub fn unfiltered_data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn effective_names(&self) -> Vec<String> {
        match &self.validation_group {
            Some(names) => names.clone(),
            None => self.inputs.keys().cloned().collect(),
        }
    }

    fn collect(&self, value_of: impl Fn(&Node) -> Value) -> Value {
        let mut values = Map::new();
        for name in self.effective_names() {
            if let Some(node) = self.inputs.get(&name) {
                values.insert(name, value_of(node));
            }
        }
        Value::Object(values)
    }

    fn populate(&mut self, data: &Map<String, Value>) -> Result<(), InputError> {
        for (name, node) in &mut self.inputs {
            match (node, data.get(name)) {
                (Node::Field(field), None | Some(Value::Null)) if field.shape() == ValueShape::List => {
                    field.set_value(Value::Array(Vec::new()))?;
                }
                (Node::Field(field), None) => {
                    field.reset_value();
                }
                (Node::Field(field), Some(value)) => {
                    field.set_value(value.clone())?;
                }
                (Node::Group(group), None | Some(Value::Null)) => {
                    let empty = group.empty_data();
                    group.set_data(empty)?;
                }
                (Node::Group(group), Some(value)) => {
                    group.set_data(value.clone())?;
                }
            }
        }
        Ok(())
    }
}

impl Group for FieldGroup {
    fn set_data(&mut self, data: Value) -> Result<(), InputError> {
        let Value::Object(data) = data else {
            return Err(InputError::InvalidData {
                expected: "object",
                actual: type_name(&data),
            });
        };

        self.valid.clear();
        self.invalid.clear();
        self.populate(&data)?;
        self.data = Some(data);
        Ok(())
    }

    fn is_valid(&mut self, context: Option<&Value>) -> Result<bool, InputError> {
        let Some(data) = &self.data else {
            return Err(InputError::DataNotSet);
        };
        let own_context;
        let field_context = match context {
            Some(context) => context,
            None => {
                own_context = Value::Object(data.clone());
                &own_context
            }
        };

        self.valid.clear();
        self.invalid.clear();

        let mut valid = true;
        for name in self.effective_names() {
            let Some(node) = self.inputs.get_mut(&name) else {
                continue;
            };

            let (passed, stop) = match node {
                Node::Group(group) => (group.is_valid(context)?, false),
                Node::Field(field) => {
                    let passed = field.is_valid(Some(field_context));
                    (passed, !passed && field.breaks_on_failure())
                }
            };

            if stop {
                tracing::debug!(input = %name, "break on failure");
            }

            if passed {
                self.valid.push(name);
            } else {
                valid = false;
                self.invalid.push(name);
            }

            if stop {
                break;
            }
        }

        tracing::debug!(
            valid,
            passed = self.valid.len(),
            failed = self.invalid.len(),
            "field group validated"
        );
        Ok(valid)
    }

    fn values(&self) -> Value {
        self.collect(Node::values)
    }

    fn raw_values(&self) -> Value {
        self.collect(Node::raw_values)
    }

    fn messages(&self) -> Messages {
        Messages::Group(
            self.invalid
                .iter()
                .filter_map(|name| Some((name.clone(), self.inputs.get(name)?.messages())))
                .collect(),
        )
    }

    fn valid_input(&self) -> Vec<String> {
        self.valid.clone()
    }

    fn invalid_input(&self) -> Vec<String> {
        self.invalid.clone()
    }

    fn unknown(&self) -> Result<Map<String, Value>, InputError> {
        let data = self.data.as_ref().ok_or(InputError::DataNotSet)?;

        let mut unknown: Map<String, Value> = data
            .iter()
            .filter(|(key, _)| !self.inputs.contains_key(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        for (name, node) in &self.inputs {
            if let Node::Group(group) = node {
                let nested = group.unknown()?;
                if !nested.is_empty() {
                    unknown.insert(name.clone(), Value::Object(nested));
                }
            }
        }

        Ok(unknown)
    }

    fn set_validation_group(&mut self, group: ValidationGroup) -> Result<(), InputError> {
        let names = match group {
            ValidationGroup::All => {
                for node in self.inputs.values_mut() {
                    if let Node::Group(group) = node {
                        group.set_validation_group(ValidationGroup::All)?;
                    }
                }
                self.validation_group = None;
                return Ok(());
            }
            ValidationGroup::Select(names) => names,
            ValidationGroup::PerRecord(_) => {
                return Err(InputError::InvalidValidationGroup {
                    reason: "per-record validation groups apply to repeating groups only",
                });
            }
        };

        for (name, nested) in &names {
            match (self.inputs.get(name), nested) {
                (None, _) => return Err(InputError::UnknownInput { name: name.clone() }),
                (Some(Node::Field(_)), Some(_)) => {
                    return Err(InputError::NotAGroup { name: name.clone() });
                }
                _ => {}
            }
        }

        for (name, nested) in &names {
            if let (Some(nested), Some(Node::Group(group))) = (nested, self.inputs.get_mut(name)) {
                group.set_validation_group(nested.clone())?;
            }
        }

        self.validation_group = Some(names.into_keys().collect());
        Ok(())
    }

    fn empty_data(&self) -> Value {
        Value::Object(Map::new())
    }

    fn clone_box(&self) -> Box<dyn Group> {
        Box::new(self.clone())
    }
}

impl From<FieldGroup> for Node {
    fn from(group: FieldGroup) -> Self {
        Self::Group(Box::new(group))
    }
}

impl FromIterator<Field> for FieldGroup {
    /// Collects named fields; unnamed fields are skipped.
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut group = Self::new();
        for field in iter {
            if let Some(name) = field.name().map(str::to_owned) {
                group.inputs.insert(name, Node::Field(field));
            }
        }
        group
    }
}

// ============================================================================
// TESTS
// ============================================================================
