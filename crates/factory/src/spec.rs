//! Declarative description of an input tree.
//!
//! A spec is a map of input name to node. Nodes are tagged by `type`;
//! a node without `type` is a plain input:
//!
//! ```yaml
//! email:
//!   filters: [{ name: string_trim }]
//!   validators: [{ name: email_address }]
//! tags:
//!   type: list
//!   required: false
//! address:
//!   type: optional_group
//!   inputs:
//!     city: {}
//! phones:
//!   type: collection
//!   required: true
//!   input_filter:
//!     number:
//!       validators: [{ name: digits }]
//! ```

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Options passed to a filter or validator constructor.
pub type Options = Map<String, Value>;

/// The children of a group, by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupSpec {
    pub inputs: IndexMap<String, NodeSpec>,
}

impl<'de> Deserialize<'de> for GroupSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;

        let mut inputs = IndexMap::with_capacity(raw.len());
        for (name, mut node) in raw {
            if let Value::Object(fields) = &mut node {
                fields
                    .entry("type")
                    .or_insert_with(|| Value::from("input"));
            }
            let node = NodeSpec::deserialize(node)
                .map_err(|e| D::Error::custom(format_args!("input `{name}`: {e}")))?;
            inputs.insert(name, node);
        }

        Ok(Self { inputs })
    }
}

/// One node of a spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeSpec {
    /// A scalar field.
    Input(InputSpec),
    /// A list field.
    List(InputSpec),
    /// A nested group.
    Group { inputs: GroupSpec },
    /// A nested group that may be left out.
    OptionalGroup { inputs: GroupSpec },
    /// A template group applied to every record of a list.
    Collection(CollectionSpec),
}

/// Configuration of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSpec {
    pub required: bool,
    pub allow_empty: bool,
    pub continue_if_empty: bool,
    pub break_on_failure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// A `null` fallback is indistinguishable from no fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_value: Option<Value>,
    pub filters: Vec<FilterSpec>,
    pub validators: Vec<ValidatorSpec>,
}

impl Default for InputSpec {
    fn default() -> Self {
        Self {
            required: true,
            allow_empty: false,
            continue_if_empty: false,
            break_on_failure: false,
            error_message: None,
            fallback_value: None,
            filters: Vec::new(),
            validators: Vec::new(),
        }
    }
}

/// A filter reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    pub name: String,
    #[serde(default)]
    pub options: Options,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

/// A validator reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorSpec {
    pub name: String,
    #[serde(default)]
    pub options: Options,
    #[serde(default)]
    pub break_chain_on_failure: bool,
}

/// Configuration of a repeating group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionSpec {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_empty_message: Option<String>,
    pub input_filter: GroupSpec,
}

impl GroupSpec {
    /// Parses a JSON spec.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a YAML spec.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn type_defaults_to_input() {
        let spec: GroupSpec = serde_json::from_value(json!({"name": {}})).unwrap();
        assert_eq!(spec.inputs["name"], NodeSpec::Input(InputSpec::default()));
    }

    #[test]
    fn parses_every_node_type() {
        let spec = GroupSpec::from_json(
            r#"{
                "email": {"validators": [{"name": "email_address", "break_chain_on_failure": true}]},
                "tags": {"type": "list", "required": false},
                "address": {"type": "group", "inputs": {"city": {}}},
                "billing": {"type": "optional_group", "inputs": {}},
                "phones": {"type": "collection", "count": 2, "input_filter": {"number": {}}}
            }"#,
        )
        .unwrap();

        let NodeSpec::Input(email) = &spec.inputs["email"] else {
            panic!("expected an input");
        };
        assert!(email.validators[0].break_chain_on_failure);
        assert!(matches!(&spec.inputs["tags"], NodeSpec::List(s) if !s.required));
        assert!(matches!(&spec.inputs["address"], NodeSpec::Group { inputs } if inputs.inputs.len() == 1));
        assert!(matches!(&spec.inputs["billing"], NodeSpec::OptionalGroup { .. }));
        assert!(matches!(&spec.inputs["phones"], NodeSpec::Collection(c) if c.count == Some(2)));
    }

    #[test]
    fn unknown_keys_are_rejected_with_input_name() {
        let err = GroupSpec::from_json(r#"{"email": {"requird": false}}"#).unwrap_err();
        assert!(err.to_string().contains("input `email`"), "{err}");
    }

    #[test]
    fn parses_yaml() {
        let spec = GroupSpec::from_yaml(
            "zip:\n  filters:\n    - name: digits\n  validators:\n    - name: string_length\n      options: { min: 5, max: 5 }\n",
        )
        .unwrap();
        let NodeSpec::Input(zip) = &spec.inputs["zip"] else {
            panic!("expected an input");
        };
        assert_eq!(zip.filters[0].name, "digits");
        assert_eq!(zip.validators[0].options["min"], json!(5));
    }
}
