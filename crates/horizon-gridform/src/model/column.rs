//! Column definitions and schema projection.
//!
//! [`ColumnProjector`] turns a field schema into display columns. Each field
//! column carries a formatter that resolves enumeration labels at display
//! time; the controller then appends the edit and remove action columns.
//!
//! # Precedence
//!
//! A column's typed core (`field`, `header_name`, `formatter`) is never
//! overridden by same-named keys in the schema's extra attributes; those stay
//! in [`ColumnDefinition::extra`]. An explicit schema label beats the
//! localized label, which beats the bare field name.

use std::fmt;
use std::sync::Arc;

use horizon_gridform_core::logging::targets;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{value_text, EnumFormatter, EnumRegistry};
use super::row::FieldValues;
use super::schema::FieldSchema;
use crate::localization::{keys, Localizer};

/// Type alias for a cell value formatter: raw value -> display value.
pub type ValueFormatter = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Extra attribute that pins a field column (`"left"` or `"right"`).
pub const PINNED_KEY: &str = "pinned";

/// The edge a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pinned {
    /// Leading edge.
    Left,
    /// Trailing edge.
    Right,
}

impl Pinned {
    fn from_value(value: &Value) -> Option<Self> {
        match value.as_str()? {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Where the action columns are pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPlacement {
    /// Pinned to the leading edge: `[edit, remove, fields...]`.
    #[default]
    Leading,
    /// Pinned to the trailing edge: `[fields..., edit, remove]`.
    Trailing,
}

impl ActionPlacement {
    fn pinned(self) -> Pinned {
        match self {
            Self::Leading => Pinned::Left,
            Self::Trailing => Pinned::Right,
        }
    }
}

/// A row action offered by an action column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Opens the edit dialog for the row.
    Edit,
    /// Removes the row.
    Remove,
}

impl ActionKind {
    /// The synthetic field name of this action's column.
    pub fn field(self) -> &'static str {
        match self {
            Self::Edit => "__edit",
            Self::Remove => "__remove",
        }
    }

    fn text_key(self) -> &'static str {
        match self {
            Self::Edit => keys::EDIT,
            Self::Remove => keys::REMOVE,
        }
    }
}

/// Whether a column shows a field or offers an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Shows a schema field.
    Field,
    /// Offers a row action.
    Action(ActionKind),
}

/// A display column derived from the schema.
#[derive(Clone)]
pub struct ColumnDefinition {
    field: String,
    header_name: String,
    formatter: Option<ValueFormatter>,
    kind: ColumnKind,
    pinned: Option<Pinned>,
    extra: FieldValues,
}

impl fmt::Debug for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDefinition")
            .field("field", &self.field)
            .field("header_name", &self.header_name)
            .field("has_formatter", &self.formatter.is_some())
            .field("kind", &self.kind)
            .field("pinned", &self.pinned)
            .field("extra", &self.extra)
            .finish()
    }
}

impl ColumnDefinition {
    /// Creates a field column without a formatter.
    pub fn new(field: impl Into<String>, header_name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header_name: header_name.into(),
            formatter: None,
            kind: ColumnKind::Field,
            pinned: None,
            extra: FieldValues::new(),
        }
    }

    /// Creates an action column.
    pub fn action(kind: ActionKind, header_name: impl Into<String>, pinned: Option<Pinned>) -> Self {
        Self {
            field: kind.field().to_owned(),
            header_name: header_name.into(),
            formatter: None,
            kind: ColumnKind::Action(kind),
            pinned,
            extra: FieldValues::new(),
        }
    }

    /// Sets the formatter, builder style.
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Returns the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the header label.
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Sets the header label.
    pub fn set_header_name(&mut self, header_name: impl Into<String>) {
        self.header_name = header_name.into();
    }

    /// Returns the column kind.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Returns `true` for action columns.
    pub fn is_action(&self) -> bool {
        matches!(self.kind, ColumnKind::Action(_))
    }

    /// Returns the pinned edge, if any.
    pub fn pinned(&self) -> Option<Pinned> {
        self.pinned
    }

    /// Sets the pinned edge.
    pub fn set_pinned(&mut self, pinned: Option<Pinned>) {
        self.pinned = pinned;
    }

    /// Replaces the formatter.
    pub fn set_formatter(&mut self, formatter: ValueFormatter) {
        self.formatter = Some(formatter);
    }

    /// Returns the pass-through attributes.
    pub fn extra(&self) -> &FieldValues {
        &self.extra
    }

    /// Returns the pass-through attributes for modification.
    pub fn extra_mut(&mut self) -> &mut FieldValues {
        &mut self.extra
    }

    /// Formats a raw cell value. Columns without a formatter return it as is.
    pub fn format(&self, raw: &Value) -> Value {
        match &self.formatter {
            Some(formatter) => formatter(raw),
            None => raw.clone(),
        }
    }

    /// Formats a raw cell value and renders it as display text.
    pub fn format_text(&self, raw: &Value) -> String {
        value_text(&self.format(raw))
    }
}

/// Derives column definitions from a field schema.
///
/// The enumeration registry and localizer are injected at construction;
/// projection itself is deterministic and side-effect-free.
#[derive(Clone)]
pub struct ColumnProjector {
    formatter: EnumFormatter,
    localizer: Arc<dyn Localizer>,
}

impl fmt::Debug for ColumnProjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnProjector")
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

impl ColumnProjector {
    /// Creates a projector.
    pub fn new(registry: Arc<EnumRegistry>, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            formatter: EnumFormatter::new(registry),
            localizer,
        }
    }

    /// Projects each schema entry into a field column, preserving order.
    pub fn project(&self, schema: &[FieldSchema]) -> Vec<ColumnDefinition> {
        let columns: Vec<_> = schema.iter().map(|field| self.project_field(field)).collect();
        tracing::debug!(target: targets::COLUMNS, count = columns.len(), "projected field columns");
        columns
    }

    /// Projects a single schema entry.
    pub fn project_field(&self, field: &FieldSchema) -> ColumnDefinition {
        let header_name = match &field.display_label {
            Some(label) => label.clone(),
            None => self.localizer.text_or_key(&field.name),
        };

        let mut extra = field.extra.clone();
        let pinned = extra.remove(PINNED_KEY).as_ref().and_then(Pinned::from_value);

        let formatter = self.formatter.clone();
        let lookup_key = field.lookup_key().to_owned();

        ColumnDefinition {
            field: field.name.clone(),
            header_name,
            formatter: Some(Arc::new(move |raw: &Value| formatter.format(&lookup_key, raw))),
            kind: ColumnKind::Field,
            pinned,
            extra,
        }
    }

    /// Builds the column for a row action, pinned per `placement`.
    pub fn action_column(&self, kind: ActionKind, placement: ActionPlacement) -> ColumnDefinition {
        ColumnDefinition::action(
            kind,
            self.localizer.text_or_key(kind.text_key()),
            Some(placement.pinned()),
        )
    }

    /// Appends the edit and remove action columns, in that order.
    pub fn with_actions(
        &self,
        mut columns: Vec<ColumnDefinition>,
        placement: ActionPlacement,
    ) -> Vec<ColumnDefinition> {
        columns.push(self.action_column(ActionKind::Edit, placement));
        columns.push(self.action_column(ActionKind::Remove, placement));
        columns
    }
}

/// Orders columns for display: left-pinned, unpinned, then right-pinned.
/// Order within each group is preserved.
pub fn display_order(columns: &[ColumnDefinition]) -> Vec<ColumnDefinition> {
    let group = |pinned: Option<Pinned>| {
        columns
            .iter()
            .filter(move |column| column.pinned == pinned)
            .cloned()
    };
    group(Some(Pinned::Left))
        .chain(group(None))
        .chain(group(Some(Pinned::Right)))
        .collect()
}
