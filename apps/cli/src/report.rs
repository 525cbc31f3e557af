//! The `check` report.

use serde::Serialize;
use serde_json::{Map, Value};
use sift_input::{FieldGroup, Group, InputError, Messages};

/// Outcome of validating one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub valid: bool,
    pub values: Value,
    pub raw_values: Value,
    pub messages: Messages,
    pub unknown: Map<String, Value>,
}

impl Report {
    /// Feeds `data` to `group`, validates it and collects the results.
    ///
    /// With `reject_unknown`, keys no input claims make the report invalid.
    pub fn collect(
        group: &mut FieldGroup,
        data: Value,
        reject_unknown: bool,
    ) -> Result<Self, InputError> {
        group.set_data(data)?;
        let valid = group.is_valid(None)?;
        let unknown = group.unknown()?;

        if reject_unknown && !unknown.is_empty() {
            tracing::debug!(keys = unknown.len(), "rejecting unknown keys");
        }

        Ok(Self {
            valid: valid && !(reject_unknown && !unknown.is_empty()),
            values: group.values(),
            raw_values: group.raw_values(),
            messages: group.messages(),
            unknown,
        })
    }

    /// Renders the report as JSON.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
