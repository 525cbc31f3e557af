//! Structured failure messages.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

/// Failure messages of an input tree, mirroring its shape.
///
/// Serializes to plain JSON: a field's map as an object of
/// `code -> message`, a group as an object of `name -> messages`, and a
/// repeating group as an object of `index -> messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Messages {
    /// `code -> message` of one field, or of a repeating group's own
    /// presence failure.
    Field(IndexMap<String, String>),
    /// Messages of a group's invalid children, by name.
    Group(IndexMap<String, Messages>),
    /// Messages of a repeating group's invalid records, by index.
    Records(BTreeMap<usize, Messages>),
}

impl Messages {
    /// Whether no message is recorded anywhere in the tree.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Field(map) => map.is_empty(),
            Self::Group(map) => map.values().all(Messages::is_empty),
            Self::Records(map) => map.values().all(Messages::is_empty),
        }
    }

    /// Messages of the child `name` of a group.
    pub fn get(&self, name: &str) -> Option<&Messages> {
        match self {
            Self::Group(map) => map.get(name),
            _ => None,
        }
    }

    /// Messages of record `index` of a repeating group.
    pub fn record(&self, index: usize) -> Option<&Messages> {
        match self {
            Self::Records(map) => map.get(&index),
            _ => None,
        }
    }

    /// The message reported under `code` by a field.
    pub fn code(&self, code: &str) -> Option<&str> {
        match self {
            Self::Field(map) => map.get(code).map(String::as_str),
            _ => None,
        }
    }

    /// Whether a field reported `code`.
    pub fn contains_code(&self, code: &str) -> bool {
        self.code(code).is_some()
    }

    /// Number of direct entries (codes, children or records).
    pub fn len(&self) -> usize {
        match self {
            Self::Field(map) => map.len(),
            Self::Group(map) => map.len(),
            Self::Records(map) => map.len(),
        }
    }
}
