//! One template group applied to every record of a list.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use sift_validator::validators::NotEmpty;

use crate::error::{InputError, type_name};
use crate::field_group::FieldGroup;
use crate::group::{Group, Node};
use crate::messages::Messages;
use crate::validation_group::ValidationGroup;

/// Validates a list of records against one template group.
///
/// Each record is validated independently: the template receives the
/// record, is validated, and its values, messages and partitions are
/// stored under the record's index before the next record is processed.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use sift_input::{Field, FieldGroup, Group, RepeatingGroup};
/// use sift_validator::validators::Digits;
///
/// let phone = FieldGroup::new().with("number", Field::new("number").with_validator(Digits::new()))?;
/// let mut phones = RepeatingGroup::new(phone);
///
/// phones.set_data(json!([{"number": "555"}, {"number": "call me"}]))?;
/// assert!(!phones.is_valid(None)?);
/// assert!(phones.messages().record(0).is_none());
/// assert!(phones.messages().record(1).is_some());
/// # Ok::<(), sift_input::InputError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RepeatingGroup {
    template: Box<dyn Group>,
    required: bool,
    count: Option<usize>,
    data: Option<Vec<Value>>,
    values: Vec<Value>,
    raw_values: Vec<Value>,
    messages: BTreeMap<usize, Messages>,
    valid_records: BTreeMap<usize, Vec<String>>,
    invalid_records: BTreeMap<usize, Vec<String>>,
    record_groups: Option<BTreeMap<usize, ValidationGroup>>,
    not_empty_message: Option<String>,
    empty_failure: bool,
}

impl RepeatingGroup {
    /// Creates an optional repeating group over `template`.
    pub fn new(template: impl Group + 'static) -> Self {
        Self::from_template(Box::new(template))
    }

    /// Creates an optional repeating group over a boxed template.
    pub fn from_template(template: Box<dyn Group>) -> Self {
        Self {
            template,
            required: false,
            count: None,
            data: None,
            values: Vec::new(),
            raw_values: Vec::new(),
            messages: BTreeMap::new(),
            valid_records: BTreeMap::new(),
            invalid_records: BTreeMap::new(),
            record_groups: None,
            not_empty_message: None,
            empty_failure: false,
        }
    }

    /// Sets whether at least one record is required (builder-style).
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the expected number of records (builder-style).
    #[must_use]
    pub fn with_count(mut self, count: i64) -> Self {
        self.set_count(count);
        self
    }

    /// Replaces the template group.
    pub fn set_template(&mut self, template: impl Group + 'static) -> &mut Self {
        self.template = Box::new(template);
        self
    }

    /// The template group.
    pub fn template(&self) -> &dyn Group {
        self.template.as_ref()
    }

    /// Mutable access to the template group.
    pub fn template_mut(&mut self) -> &mut dyn Group {
        self.template.as_mut()
    }

    /// Sets whether at least one record is required.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Whether at least one record is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Sets the expected number of records. Negative counts become 0.
    pub fn set_count(&mut self, count: i64) -> &mut Self {
        self.count = Some(usize::try_from(count).unwrap_or(0));
        self
    }

    /// Forgets an explicit count; the count follows the data again.
    pub fn clear_count(&mut self) -> &mut Self {
        self.count = None;
        self
    }

    /// The explicit count, else the number of records, else 0.
    pub fn count(&self) -> usize {
        self.count
            .unwrap_or_else(|| self.data.as_ref().map_or(0, Vec::len))
    }

    /// Overrides the message reported when records are required but none
    /// are expected.
    pub fn set_not_empty_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.not_empty_message = Some(message.into());
        self
    }

    /// The message reported when records are required but none are
    /// expected.
    pub fn not_empty_message(&self) -> &str {
        self.not_empty_message
            .as_deref()
            .unwrap_or(NotEmpty::DEFAULT_MESSAGE)
    }

    /// Names of the valid inputs of each valid record.
    pub fn valid_records(&self) -> &BTreeMap<usize, Vec<String>> {
        &self.valid_records
    }

    /// Names of the invalid inputs of each invalid record.
    pub fn invalid_records(&self) -> &BTreeMap<usize, Vec<String>> {
        &self.invalid_records
    }

    fn clear_results(&mut self) {
        self.values.clear();
        self.raw_values.clear();
        self.messages.clear();
        self.valid_records.clear();
        self.invalid_records.clear();
        self.empty_failure = false;
    }
}

impl Group for RepeatingGroup {
    fn set_data(&mut self, data: Value) -> Result<(), InputError> {
        let Value::Array(records) = data else {
            return Err(InputError::InvalidData {
                expected: "array",
                actual: type_name(&data),
            });
        };

        if let Some((index, record)) = records.iter().enumerate().find(|(_, r)| !r.is_object()) {
            return Err(InputError::InvalidRecord {
                index,
                actual: type_name(record),
            });
        }

        self.clear_results();
        self.data = Some(records);
        Ok(())
    }

    fn is_valid(&mut self, context: Option<&Value>) -> Result<bool, InputError> {
        if self.data.is_none() {
            return Err(InputError::DataNotSet);
        }
        self.clear_results();

        let count = self.count();
        if self.required && count < 1 {
            tracing::debug!("required repeating group has no records");
            self.empty_failure = true;
            return Ok(false);
        }

        let Some(records) = &self.data else {
            return Err(InputError::DataNotSet);
        };

        let mut valid = records.len() >= count;
        for (index, record) in records.iter().enumerate() {
            if let Some(groups) = &self.record_groups {
                let group = groups
                    .get(&index)
                    .ok_or(InputError::MissingRecordGroup { index })?;
                self.template.set_validation_group(group.clone())?;
            }

            self.template.set_data(record.clone())?;
            let record_valid = self.template.is_valid(context)?;

            self.values.push(self.template.values());
            self.raw_values.push(self.template.raw_values());
            if record_valid {
                self.valid_records.insert(index, self.template.valid_input());
            } else {
                valid = false;
                self.messages.insert(index, self.template.messages());
                self.invalid_records.insert(index, self.template.invalid_input());
            }
        }

        tracing::debug!(
            valid,
            records = records.len(),
            count,
            invalid = self.invalid_records.len(),
            "repeating group validated"
        );
        Ok(valid)
    }

    fn values(&self) -> Value {
        Value::Array(self.values.clone())
    }

    fn raw_values(&self) -> Value {
        Value::Array(self.raw_values.clone())
    }

    fn messages(&self) -> Messages {
        if self.empty_failure {
            return Messages::Field(IndexMap::from([(
                NotEmpty::IS_EMPTY.to_owned(),
                self.not_empty_message().to_owned(),
            )]));
        }
        Messages::Records(self.messages.clone())
    }

    fn valid_input(&self) -> Vec<String> {
        self.valid_records.keys().map(ToString::to_string).collect()
    }

    fn invalid_input(&self) -> Vec<String> {
        self.invalid_records.keys().map(ToString::to_string).collect()
    }

    fn unknown(&self) -> Result<Map<String, Value>, InputError> {
        let records = self.data.as_ref().ok_or(InputError::DataNotSet)?;

        let mut unknown = Map::new();
        for (index, record) in records.iter().enumerate() {
            let mut probe = self.template.clone_box();
            probe.set_data(record.clone())?;
            let found = probe.unknown()?;
            if !found.is_empty() {
                unknown.insert(index.to_string(), Value::Object(found));
            }
        }
        Ok(unknown)
    }

    fn set_validation_group(&mut self, group: ValidationGroup) -> Result<(), InputError> {
        match group {
            ValidationGroup::PerRecord(groups) => {
                self.record_groups = Some(groups);
                Ok(())
            }
            ValidationGroup::All => {
                self.record_groups = None;
                self.template.set_validation_group(ValidationGroup::All)
            }
            select @ ValidationGroup::Select(_) => {
                self.record_groups = None;
                self.template.set_validation_group(select)
            }
        }
    }

    fn empty_data(&self) -> Value {
        Value::Array(Vec::new())
    }

    fn clone_box(&self) -> Box<dyn Group> {
        Box::new(self.clone())
    }
}

impl From<RepeatingGroup> for Node {
    fn from(group: RepeatingGroup) -> Self {
        Self::Group(Box::new(group))
    }
}

impl Default for RepeatingGroup {
    fn default() -> Self {
        Self::new(FieldGroup::new())
    }
}

// ============================================================================
// TESTS
// ============================================================================
