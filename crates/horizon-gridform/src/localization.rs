//! Localized text lookup.
//!
//! The controller never reads a global locale. A [`Localizer`] is injected at
//! construction and asked for header labels and action captions by key.
//! A missing key is not an error; callers fall back to the key itself.

use std::collections::HashMap;

use horizon_gridform_core::logging::targets;
use serde::{Deserialize, Serialize};

/// Standard text keys used by the controller.
pub mod keys {
    /// Caption of the add button.
    pub const ADD: &str = "Add";
    /// Header of the edit action column.
    pub const EDIT: &str = "Edit";
    /// Header of the remove action column.
    pub const REMOVE: &str = "Remove";
    /// Caption of the dialog submit action.
    pub const SUBMIT: &str = "Submit";
    /// Caption of the dialog cancel action.
    pub const CANCEL: &str = "Cancel";
}

/// Source of localized text.
pub trait Localizer: Send + Sync {
    /// Returns the localized text for `key`, if any.
    fn text(&self, key: &str) -> Option<String>;

    /// Returns the localized text for `key`, or `key` itself on a miss.
    fn text_or_key(&self, key: &str) -> String {
        self.text(key).unwrap_or_else(|| {
            tracing::trace!(target: targets::LOCALIZATION, key, "no localized text");
            key.to_owned()
        })
    }
}

/// A map-backed [`Localizer`].
///
/// # Example
///
/// ```
/// use horizon_gridform::localization::{LocalTextTable, Localizer};
///
/// let table: LocalTextTable = [("status", "Status"), ("Add", "Ajouter")].into_iter().collect();
/// assert_eq!(table.text_or_key("Add"), "Ajouter");
/// assert_eq!(table.text_or_key("missing"), "missing");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalTextTable {
    entries: HashMap<String, String>,
}

impl LocalTextTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, builder style.
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Localizer for LocalTextTable {
    fn text(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalTextTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, text) in iter {
            table.insert(key, text);
        }
        table
    }
}

/// A [`Localizer`] with no entries; every lookup falls back to the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalization;

impl Localizer for NoLocalization {
    fn text(&self, _key: &str) -> Option<String> {
        None
    }
}
