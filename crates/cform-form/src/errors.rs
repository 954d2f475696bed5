#![forbid(unsafe_code)]

//! The set of currently failing validation rules.

use std::collections::BTreeMap;

use crate::field::FieldId;

/// Mapping from field to its current error message.
///
/// An absent key means the field has no error. The set is rebuilt from
/// scratch on every evaluation and iterates in field display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorSet {
    entries: BTreeMap<FieldId, String>,
}

impl ErrorSet {
    /// An empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field: FieldId, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    /// Error message for `field`, if it is failing.
    #[must_use]
    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    /// Returns `true` if `field` is failing.
    #[must_use]
    pub fn contains(&self, field: FieldId) -> bool {
        self.entries.contains_key(&field)
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is failing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Messages in field order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.entries.values().map(String::as_str).collect()
    }
}
