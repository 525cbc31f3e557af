//! Turning specs into input trees.

use serde_json::Value;
use sift_filter::DEFAULT_PRIORITY;
use sift_input::{Field, FieldGroup, Node, OptionalGroup, RepeatingGroup};

use crate::error::FactoryError;
use crate::registry::Registry;
use crate::spec::{CollectionSpec, GroupSpec, InputSpec, NodeSpec};

/// Builds [`FieldGroup`] trees from [`GroupSpec`]s.
///
/// ```rust
/// use serde_json::json;
/// use sift_factory::Factory;
/// use sift_input::Group;
///
/// let mut form = Factory::default().from_json(r#"{
///     "zip": {
///         "filters": [{"name": "string_trim"}],
///         "validators": [{"name": "digits"}, {"name": "string_length", "options": {"min": 5, "max": 5}}]
///     }
/// }"#)?;
///
/// form.set_data(json!({"zip": " 12345 "}))?;
/// assert!(form.is_valid(None)?);
/// assert_eq!(form.values(), json!({"zip": "12345"}));
/// # Ok::<(), sift_factory::FactoryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Factory {
    registry: Registry,
}

impl Factory {
    /// A factory resolving names through `registry`.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// The registry used to resolve filter and validator names.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Parses a JSON spec and builds it.
    pub fn from_json(&self, json: &str) -> Result<FieldGroup, FactoryError> {
        self.build(&GroupSpec::from_json(json)?)
    }

    /// Parses a YAML spec and builds it.
    pub fn from_yaml(&self, yaml: &str) -> Result<FieldGroup, FactoryError> {
        self.build(&GroupSpec::from_yaml(yaml)?)
    }

    /// Builds a spec given as a JSON value.
    pub fn from_value(&self, spec: Value) -> Result<FieldGroup, FactoryError> {
        self.build(&serde_json::from_value(spec)?)
    }

    /// Builds the group described by `spec`.
    pub fn build(&self, spec: &GroupSpec) -> Result<FieldGroup, FactoryError> {
        let mut group = FieldGroup::new();
        for (name, node) in &spec.inputs {
            let node = self.build_node(name, node).inspect_err(|err| {
                tracing::warn!(input = %name, error = %err, "failed to build input");
            })?;
            group.add(name.clone(), node)?;
        }
        tracing::debug!(inputs = group.len(), "built field group");
        Ok(group)
    }

    /// Builds one node.
    pub fn build_node(&self, name: &str, spec: &NodeSpec) -> Result<Node, FactoryError> {
        Ok(match spec {
            NodeSpec::Input(input) => self.build_field(Field::new(name), input)?.into(),
            NodeSpec::List(input) => self.build_field(Field::list(name), input)?.into(),
            NodeSpec::Group { inputs } => self.build(inputs)?.into(),
            NodeSpec::OptionalGroup { inputs } => OptionalGroup::new(self.build(inputs)?).into(),
            NodeSpec::Collection(collection) => self.build_collection(collection)?.into(),
        })
    }

    fn build_field(&self, mut field: Field, spec: &InputSpec) -> Result<Field, FactoryError> {
        field
            .set_required(spec.required)
            .set_allow_empty(spec.allow_empty)
            .set_continue_if_empty(spec.continue_if_empty)
            .set_break_on_failure(spec.break_on_failure)
            .set_error_message(spec.error_message.clone());

        if let Some(fallback) = &spec.fallback_value {
            field.set_fallback_value(fallback.clone())?;
        }

        for filter in &spec.filters {
            let built = self.registry.filter(&filter.name, &filter.options)?;
            field
                .filters_mut()
                .attach_shared(built, filter.priority.unwrap_or(DEFAULT_PRIORITY));
        }

        for validator in &spec.validators {
            let built = self.registry.validator(&validator.name, &validator.options)?;
            field
                .validators_mut()
                .attach_shared(built, validator.break_chain_on_failure);
        }

        Ok(field)
    }

    fn build_collection(&self, spec: &CollectionSpec) -> Result<RepeatingGroup, FactoryError> {
        let mut group = RepeatingGroup::new(self.build(&spec.input_filter)?);
        group.set_required(spec.required);
        if let Some(count) = spec.count {
            group.set_count(count);
        }
        if let Some(message) = &spec.not_empty_message {
            group.set_not_empty_message(message.clone());
        }
        Ok(group)
    }
}
