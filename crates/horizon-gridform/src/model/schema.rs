//! Field schema: the declarative description of one editable attribute.

use serde::{Deserialize, Serialize};

use super::row::FieldValues;

/// Describes one editable attribute of a row.
///
/// Besides the typed core (`name`, `display_label`, `enum_id`) a schema entry
/// carries an open bag of extra attributes (width, sortable, ...) that pass
/// through unchanged onto the projected column.
///
/// # Example
///
/// ```
/// use horizon_gridform::model::FieldSchema;
/// use serde_json::json;
///
/// let field: FieldSchema = serde_json::from_value(json!({
///     "name": "status",
///     "enumId": "statusEnum",
///     "width": 120
/// }))
/// .unwrap();
///
/// assert_eq!(field.lookup_key(), "statusEnum");
/// assert_eq!(field.extra["width"], json!(120));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// The field name; also the key of the value within a row.
    #[serde(alias = "id", alias = "field")]
    pub name: String,
    /// Explicit header label. When absent the label is localized from `name`.
    #[serde(default, alias = "label", skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    /// Enumeration used to format this field's values.
    #[serde(default, alias = "enumID", skip_serializing_if = "Option::is_none")]
    pub enum_id: Option<String>,
    /// Additional attributes passed through to the column.
    #[serde(flatten)]
    pub extra: FieldValues,
}

impl FieldSchema {
    /// Creates a schema entry with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_label: None,
            enum_id: None,
            extra: FieldValues::new(),
        }
    }

    /// Sets the explicit header label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = Some(label.into());
        self
    }

    /// Sets the enumeration id.
    pub fn with_enum_id(mut self, enum_id: impl Into<String>) -> Self {
        self.enum_id = Some(enum_id.into());
        self
    }

    /// Adds an extra pass-through attribute.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The key used to look up this field's enumeration: `enum_id`, falling
    /// back to the field name.
    pub fn lookup_key(&self) -> &str {
        self.enum_id.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_key_falls_back_to_name() {
        assert_eq!(FieldSchema::new("status").lookup_key(), "status");
        assert_eq!(
            FieldSchema::new("status").with_enum_id("statusEnum").lookup_key(),
            "statusEnum"
        );
    }

    #[test]
    fn test_deserialize_aliases() {
        let field: FieldSchema = serde_json::from_value(json!({
            "id": "kind",
            "label": "Kind",
            "enumID": "kindEnum",
            "sortable": true
        }))
        .unwrap();

        assert_eq!(field.name, "kind");
        assert_eq!(field.display_label.as_deref(), Some("Kind"));
        assert_eq!(field.enum_id.as_deref(), Some("kindEnum"));
        assert_eq!(field.extra.len(), 1);
        assert_eq!(field.extra["sortable"], json!(true));
    }

    #[test]
    fn test_serialize_flattens_extra() {
        let field = FieldSchema::new("amount").with_extra("width", 80);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value, json!({ "name": "amount", "width": 80 }));
    }
}
