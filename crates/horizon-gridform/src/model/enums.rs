//! Enumeration registry and value formatting.
//!
//! An enumeration maps raw stored values to display labels, e.g. a `status`
//! column storing `1` and showing `"Active"`. The registry is owned by the
//! surrounding configuration layer and injected read-only.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_gridform::model::{EnumFormatter, EnumRegistry, Enumeration};
//! use serde_json::json;
//!
//! let registry = EnumRegistry::new().with_enum(
//!     "statusEnum",
//!     Enumeration::new().with_entry(1, "Active").with_entry(2, "Closed"),
//! );
//! let formatter = EnumFormatter::new(Arc::new(registry));
//!
//! assert_eq!(formatter.format("statusEnum", &json!(1)), json!("Active"));
//! assert_eq!(formatter.format("missingKey", &json!("X")), json!("X"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use horizon_gridform_core::logging::targets;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One raw value → label entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumEntry {
    /// The raw stored value.
    #[serde(alias = "id")]
    pub value: Value,
    /// The display label.
    #[serde(alias = "title")]
    pub label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnumerationRepr {
    List(Vec<EnumEntry>),
    Map(serde_json::Map<String, Value>),
}

/// An ordered raw value → label mapping.
///
/// Deserializes from either an object (`{"1": "Active"}`) or a list of
/// entries (`[{"id": 1, "title": "Active"}]`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "EnumerationRepr")]
pub struct Enumeration {
    entries: Vec<EnumEntry>,
}

impl Serialize for Enumeration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl From<EnumerationRepr> for Enumeration {
    fn from(repr: EnumerationRepr) -> Self {
        match repr {
            EnumerationRepr::List(entries) => Self { entries },
            EnumerationRepr::Map(map) => map
                .into_iter()
                .map(|(key, label)| (Value::String(key), value_text(&label)))
                .collect(),
        }
    }
}

impl Enumeration {
    /// Creates an empty enumeration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, builder style.
    pub fn with_entry(mut self, value: impl Into<Value>, label: impl Into<String>) -> Self {
        self.push(value, label);
        self
    }

    /// Appends an entry.
    pub fn push(&mut self, value: impl Into<Value>, label: impl Into<String>) {
        self.entries.push(EnumEntry {
            value: value.into(),
            label: label.into(),
        });
    }

    /// Returns the label of the first entry matching `raw`.
    pub fn label_for(&self, raw: &Value) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| values_match(&entry.value, raw))
            .map(|entry| entry.label.as_str())
    }

    /// Returns the entries in registration order.
    pub fn entries(&self) -> &[EnumEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Into<Value>, L: Into<String>> FromIterator<(V, L)> for Enumeration {
    fn from_iter<I: IntoIterator<Item = (V, L)>>(iter: I) -> Self {
        let mut enumeration = Self::new();
        for (value, label) in iter {
            enumeration.push(value, label);
        }
        enumeration
    }
}

/// Enumerations keyed by enumeration id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumRegistry {
    enums: HashMap<String, Enumeration>,
}

impl EnumRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enumeration, builder style.
    pub fn with_enum(mut self, id: impl Into<String>, enumeration: Enumeration) -> Self {
        self.insert(id, enumeration);
        self
    }

    /// Registers an enumeration, replacing any previous one under `id`.
    pub fn insert(&mut self, id: impl Into<String>, enumeration: Enumeration) {
        self.enums.insert(id.into(), enumeration);
    }

    /// Returns the enumeration registered under `id`.
    pub fn get(&self, id: &str) -> Option<&Enumeration> {
        self.enums.get(id)
    }

    /// Returns `true` if an enumeration is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.enums.contains_key(id)
    }

    /// Returns the number of registered enumerations.
    pub fn len(&self) -> usize {
        self.enums.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

/// Resolves raw values to display labels through an [`EnumRegistry`].
///
/// Lookup misses are never errors: the raw value comes back unchanged.
#[derive(Debug, Clone, Default)]
pub struct EnumFormatter {
    registry: Arc<EnumRegistry>,
}

impl EnumFormatter {
    /// Creates a formatter over `registry`.
    pub fn new(registry: Arc<EnumRegistry>) -> Self {
        Self { registry }
    }

    /// Formats `raw` using the enumeration registered under `lookup_key`.
    pub fn format(&self, lookup_key: &str, raw: &Value) -> Value {
        let Some(enumeration) = self.registry.get(lookup_key) else {
            tracing::trace!(target: targets::ENUMS, lookup_key, "no enumeration registered");
            return raw.clone();
        };
        match enumeration.label_for(raw) {
            Some(label) => Value::String(label.to_owned()),
            None => {
                tracing::trace!(target: targets::ENUMS, lookup_key, %raw, "no enumeration entry for value");
                raw.clone()
            }
        }
    }

    /// Formats `raw` and renders the result as display text.
    pub fn display_text(&self, lookup_key: &str, raw: &Value) -> String {
        value_text(&self.format(lookup_key, raw))
    }
}

/// Renders a value as display text. `null` renders empty, strings unquoted.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// `1` and `"1"` name the same entry; form inputs and object keys report text.
fn values_match(entry: &Value, raw: &Value) -> bool {
    if entry == raw {
        return true;
    }
    match (scalar_text(entry), scalar_text(raw)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_formatter() -> EnumFormatter {
        let registry = EnumRegistry::new().with_enum(
            "statusEnum",
            Enumeration::new().with_entry(1, "Active").with_entry(2, "Closed"),
        );
        EnumFormatter::new(Arc::new(registry))
    }

    #[test]
    fn test_format_hit() {
        let formatter = status_formatter();
        assert_eq!(formatter.format("statusEnum", &json!(1)), json!("Active"));
        assert_eq!(formatter.format("statusEnum", &json!(2)), json!("Closed"));
    }

    #[test]
    fn test_format_missing_enumeration_returns_raw() {
        let formatter = status_formatter();
        assert_eq!(formatter.format("missingKey", &json!("X")), json!("X"));
    }

    #[test]
    fn test_format_missing_entry_returns_raw() {
        let formatter = status_formatter();
        assert_eq!(formatter.format("statusEnum", &json!(9)), json!(9));
        assert_eq!(formatter.format("statusEnum", &Value::Null), Value::Null);
    }

    #[test]
    fn test_text_and_number_match() {
        let formatter = status_formatter();
        assert_eq!(formatter.format("statusEnum", &json!("1")), json!("Active"));
    }

    #[test]
    fn test_display_text() {
        let formatter = status_formatter();
        assert_eq!(formatter.display_text("statusEnum", &json!(2)), "Closed");
        assert_eq!(formatter.display_text("statusEnum", &Value::Null), "");
        assert_eq!(formatter.display_text("other", &json!(true)), "true");
    }

    #[test]
    fn test_registry_from_json_object_and_list() {
        let registry: EnumRegistry = serde_json::from_value(json!({
            "statusEnum": { "1": "Active", "2": "Closed" },
            "kindEnum": [ { "id": "a", "title": "Alpha" }, { "value": "b", "label": "Beta" } ]
        }))
        .unwrap();

        assert_eq!(registry.len(), 2);
        let status = registry.get("statusEnum").unwrap();
        assert_eq!(status.label_for(&json!(1)), Some("Active"));
        assert_eq!(status.label_for(&json!("2")), Some("Closed"));

        let kind = registry.get("kindEnum").unwrap();
        assert_eq!(kind.entries()[0].label, "Alpha");
        assert_eq!(kind.label_for(&json!("b")), Some("Beta"));
    }

    #[test]
    fn test_enumeration_from_iter_preserves_order() {
        let enumeration: Enumeration = vec![(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
        let labels: Vec<&str> = enumeration.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["c", "a", "b"]);
    }
}
