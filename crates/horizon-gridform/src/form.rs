//! Form and dialog state held by the controller.
//!
//! The form widgets themselves live outside this crate. They report their
//! current values through [`FormChange`]; the controller keeps the last report
//! in a [`FormValueCache`] and reads it synchronously when an intent arrives.

use crate::model::{FieldValues, GridRow};

/// A form's report of its current values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormChange {
    /// Field name → current raw value.
    pub values: FieldValues,
}

impl FormChange {
    /// Creates a change report.
    pub fn new(values: FieldValues) -> Self {
        Self { values }
    }
}

impl From<FieldValues> for FormChange {
    fn from(values: FieldValues) -> Self {
        Self::new(values)
    }
}

/// The last values reported by one form.
///
/// Single writer: only the form's change hook calls [`record`](Self::record).
#[derive(Debug, Clone, Default)]
pub struct FormValueCache {
    last: Option<FieldValues>,
}

impl FormValueCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the latest report, replacing the previous one.
    pub fn record(&mut self, change: FormChange) {
        self.last = Some(change.values);
    }

    /// Returns the last reported values, if the form has reported yet.
    pub fn current(&self) -> Option<&FieldValues> {
        self.last.as_ref()
    }

    /// Forgets the last report.
    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Visibility and purpose of the record dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogState {
    /// Whether the dialog is shown.
    pub visible: bool,
    /// `true` when the dialog edits `target_row`, `false` when it adds a row.
    pub edit_mode: bool,
    /// The row being edited.
    pub target_row: Option<GridRow>,
}

impl DialogState {
    /// The closed dialog.
    pub fn idle() -> Self {
        Self::default()
    }

    /// The dialog opened to add a row.
    pub fn adding() -> Self {
        Self {
            visible: true,
            edit_mode: false,
            target_row: None,
        }
    }

    /// The dialog opened to edit `row`.
    pub fn editing(row: GridRow) -> Self {
        Self {
            visible: true,
            edit_mode: true,
            target_row: Some(row),
        }
    }

    /// Returns `true` when the dialog is closed.
    pub fn is_idle(&self) -> bool {
        !self.visible
    }

    /// Values the dialog's form starts with: the edited row's values, or
    /// nothing when adding.
    pub fn default_values(&self) -> Option<&FieldValues> {
        self.target_row.as_ref().map(GridRow::values)
    }
}
