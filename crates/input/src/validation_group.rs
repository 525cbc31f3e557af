//! Restricting which inputs of a group take part in validation.

use std::collections::BTreeMap;

use indexmap::IndexMap;

/// Which inputs a group validates and reports values for.
///
/// ```rust
/// use sift_input::ValidationGroup;
///
/// // Validate `name` everywhere, and only `city` inside `address`.
/// let group = ValidationGroup::names(["name"])
///     .nest("address", ValidationGroup::names(["city"]));
/// assert!(matches!(group, ValidationGroup::Select(ref names) if names.len() == 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationGroup {
    /// No restriction; clears restrictions of nested groups as well.
    #[default]
    All,
    /// Only the listed inputs, each optionally with a restriction for the
    /// nested group of that name.
    Select(IndexMap<String, Option<ValidationGroup>>),
    /// A separate restriction per record of a repeating group.
    PerRecord(BTreeMap<usize, ValidationGroup>),
}

impl ValidationGroup {
    /// Restricts to `names`, without nested restrictions.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Select(names.into_iter().map(|name| (name.into(), None)).collect())
    }

    /// Adds `name` with a nested restriction.
    ///
    /// `All` and `PerRecord` become a selection holding only `name`.
    #[must_use]
    pub fn nest(self, name: impl Into<String>, nested: ValidationGroup) -> Self {
        let mut names = match self {
            Self::Select(names) => names,
            Self::All | Self::PerRecord(_) => IndexMap::new(),
        };
        names.insert(name.into(), Some(nested));
        Self::Select(names)
    }

    /// One restriction per record index.
    pub fn per_record(groups: impl IntoIterator<Item = (usize, ValidationGroup)>) -> Self {
        Self::PerRecord(groups.into_iter().collect())
    }
}
