//! Row identity and row records.
//!
//! Rows held by the grid carry a [`RowId`] next to their field values. The
//! identity never lives inside the values map, so handing the values back to
//! the caller can never leak it.

use std::fmt;
use std::sync::Arc;

use horizon_gridform_core::logging::targets;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name → raw value. The externally visible record shape.
pub type FieldValues = serde_json::Map<String, Value>;

/// Reserved attribute under which records may carry a previously assigned
/// identity. It is lifted out of the values on first sight.
pub const ROW_ID_KEY: &str = "JSONID";

/// Type alias for a row identity extraction function.
pub type RowIdExtractor = Arc<dyn Fn(&GridRow) -> RowId + Send + Sync>;

/// Internal-only row key, unique within one controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    /// Wraps a raw identity value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identity value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row as held by the grid: identity plus field values.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    id: RowId,
    values: FieldValues,
}

impl GridRow {
    /// Creates a row. A stray reserved identity attribute in `values` is
    /// dropped; `id` is authoritative.
    pub fn new(id: RowId, mut values: FieldValues) -> Self {
        values.remove(ROW_ID_KEY);
        Self { id, values }
    }

    /// Returns the row identity.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns the field values.
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Returns the raw value of a single field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Consumes the row, returning its field values without the identity.
    pub fn into_values(self) -> FieldValues {
        self.values
    }

    /// Returns a row with the same identity whose values are these values
    /// overlaid onto the current ones. New values win.
    pub fn merged_with(&self, values: FieldValues) -> Self {
        let mut merged = self.values.clone();
        for (key, value) in values {
            merged.insert(key, value);
        }
        Self::new(self.id, merged)
    }
}

/// The default identity extractor: reads [`GridRow::id`].
pub fn default_row_id_extractor() -> RowIdExtractor {
    Arc::new(|row: &GridRow| row.id())
}

/// Largest identity accepted from external records: the largest integer a
/// JSON number holds exactly. Larger values are treated as absent, which
/// leaves the allocator room for every later allocation.
pub const MAX_EXTERNAL_ROW_ID: u64 = (1 << 53) - 1;

/// Removes the reserved identity attribute from `values`, returning it when
/// it holds an integer in `1..=MAX_EXTERNAL_ROW_ID` (or the text of one).
pub fn take_row_id(values: &mut FieldValues) -> Option<RowId> {
    let raw = values.remove(ROW_ID_KEY)?;
    let id = match raw {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    (1..=MAX_EXTERNAL_ROW_ID).contains(&id).then_some(RowId(id))
}

/// Issues unique, monotonically increasing row identities.
///
/// The counter starts at 0 and is incremented before each value is returned,
/// so the first identity issued is 1. Identities are never reissued.
#[derive(Debug, Default)]
pub struct RowIdAllocator {
    counter: u64,
}

impl RowIdAllocator {
    /// Creates an allocator whose first identity will be 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next identity.
    ///
    /// The counter saturates at `u64::MAX`; past that point the last
    /// identity is repeated and an error is logged.
    pub fn allocate(&mut self) -> RowId {
        match self.counter.checked_add(1) {
            Some(next) => self.counter = next,
            None => {
                tracing::error!(target: targets::CONTROLLER, "row identity space exhausted");
            }
        }
        RowId(self.counter)
    }

    /// Records an identity issued elsewhere so later allocations stay above it.
    /// Identities above [`MAX_EXTERNAL_ROW_ID`] are ignored.
    pub fn observe(&mut self, id: RowId) {
        if id.0 > self.counter && id.0 <= MAX_EXTERNAL_ROW_ID {
            self.counter = id.0;
        }
    }

    /// Keeps an externally supplied identity when it is above everything
    /// issued or observed so far, otherwise issues a fresh one.
    ///
    /// An identity is never handed out twice, even when the row that held it
    /// has since been removed.
    pub fn adopt(&mut self, id: RowId) -> RowId {
        if id.0 > self.counter && id.0 <= MAX_EXTERNAL_ROW_ID {
            self.observe(id);
            id
        } else {
            self.allocate()
        }
    }

    /// Returns the most recently issued or observed identity.
    pub fn last(&self) -> Option<RowId> {
        (self.counter > 0).then_some(RowId(self.counter))
    }
}
