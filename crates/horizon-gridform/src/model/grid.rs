//! The grid collaborator boundary and an in-memory implementation.
//!
//! The controller owns no row storage. It issues discrete transactions
//! against a [`GridApi`] and reads the collection back through
//! [`GridApi::for_each_row`]. [`RowGrid`] is the in-memory grid that ships
//! with the crate; rendering layers wrap it or provide their own `GridApi`.

use std::fmt;
use std::sync::Arc;

use horizon_gridform_core::logging::targets;
use horizon_gridform_core::Signal;
use parking_lot::RwLock;

use super::row::{default_row_id_extractor, GridRow, RowId, RowIdExtractor};

/// A batch of row changes applied atomically.
///
/// Rows are matched by identity. Removals are applied first, then updates,
/// then additions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowTransaction {
    /// Rows to append.
    pub add: Vec<GridRow>,
    /// Rows whose stored counterpart is replaced.
    pub update: Vec<GridRow>,
    /// Rows to remove.
    pub remove: Vec<GridRow>,
}

impl RowTransaction {
    /// A transaction appending one row.
    pub fn add(row: GridRow) -> Self {
        Self {
            add: vec![row],
            ..Default::default()
        }
    }

    /// A transaction updating one row.
    pub fn update(row: GridRow) -> Self {
        Self {
            update: vec![row],
            ..Default::default()
        }
    }

    /// A transaction removing one row.
    pub fn remove(row: GridRow) -> Self {
        Self {
            remove: vec![row],
            ..Default::default()
        }
    }

    /// Returns `true` if the transaction carries no rows.
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.update.is_empty() && self.remove.is_empty()
    }
}

/// What a transaction actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionResult {
    /// Identities of appended rows.
    pub added: Vec<RowId>,
    /// Identities of replaced rows.
    pub updated: Vec<RowId>,
    /// Identities of removed rows.
    pub removed: Vec<RowId>,
    /// Identities that matched nothing (or, for additions, were already held).
    pub missed: Vec<RowId>,
}

impl TransactionResult {
    /// Returns `true` if nothing changed.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// The grid collaborator contract.
///
/// Implementations own the row collection. Each call is atomic from the
/// controller's point of view: its effects are visible once it returns.
pub trait GridApi: Send + Sync {
    /// Replaces all rows.
    fn set_rows(&self, rows: Vec<GridRow>);

    /// Applies a batch of additions, updates and removals.
    fn apply_transaction(&self, transaction: RowTransaction) -> TransactionResult;

    /// Visits every row in display order.
    fn for_each_row(&self, f: &mut dyn FnMut(&GridRow));

    /// Returns the number of rows.
    fn row_count(&self) -> usize {
        let mut count = 0;
        self.for_each_row(&mut |_| count += 1);
        count
    }

    /// Returns a copy of all rows in display order.
    fn rows(&self) -> Vec<GridRow> {
        let mut rows = Vec::new();
        self.for_each_row(&mut |row| rows.push(row.clone()));
        rows
    }
}

/// Signals emitted by [`RowGrid`].
pub struct GridSignals {
    /// Emitted after rows were appended. Args: their identities.
    pub rows_inserted: Signal<Vec<RowId>>,
    /// Emitted after rows were replaced. Args: their identities.
    pub rows_updated: Signal<Vec<RowId>>,
    /// Emitted after rows were removed. Args: their identities.
    pub rows_removed: Signal<Vec<RowId>>,
    /// Emitted before all rows are replaced.
    pub model_about_to_reset: Signal<()>,
    /// Emitted after all rows were replaced.
    pub model_reset: Signal<()>,
}

impl Default for GridSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSignals {
    /// Creates a new set of grid signals.
    pub fn new() -> Self {
        Self {
            rows_inserted: Signal::new(),
            rows_updated: Signal::new(),
            rows_removed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
        }
    }

    /// Emits signals for a reset, calling `reset_fn` between them.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }

    fn emit_result(&self, result: &TransactionResult) {
        if !result.removed.is_empty() {
            self.rows_removed.emit(result.removed.clone());
        }
        if !result.updated.is_empty() {
            self.rows_updated.emit(result.updated.clone());
        }
        if !result.added.is_empty() {
            self.rows_inserted.emit(result.added.clone());
        }
    }
}

/// An in-memory grid holding rows in insertion order.
///
/// Rows are matched by the configured [`RowIdExtractor`], which defaults to
/// reading [`GridRow::id`].
///
/// # Example
///
/// ```
/// use horizon_gridform::model::{FieldValues, GridApi, GridRow, RowGrid, RowId, RowTransaction};
///
/// let grid = RowGrid::new();
/// grid.apply_transaction(RowTransaction::add(GridRow::new(RowId::new(1), FieldValues::new())));
/// assert_eq!(grid.row_count(), 1);
///
/// let result = grid.apply_transaction(RowTransaction::remove(GridRow::new(RowId::new(9), FieldValues::new())));
/// assert_eq!(result.missed, vec![RowId::new(9)]);
/// ```
pub struct RowGrid {
    rows: RwLock<Vec<GridRow>>,
    row_id: RwLock<RowIdExtractor>,
    signals: GridSignals,
}

impl Default for RowGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RowGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowGrid")
            .field("rows", &*self.rows.read())
            .finish_non_exhaustive()
    }
}

impl RowGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            row_id: RwLock::new(default_row_id_extractor()),
            signals: GridSignals::new(),
        }
    }

    /// Replaces the identity extraction strategy.
    pub fn set_row_id_extractor<F>(&self, extractor: F)
    where
        F: Fn(&GridRow) -> RowId + Send + Sync + 'static,
    {
        *self.row_id.write() = Arc::new(extractor);
    }

    /// Returns the identity of `row` under the configured strategy.
    pub fn row_id(&self, row: &GridRow) -> RowId {
        let extract = self.row_id.read().clone();
        extract(row)
    }

    /// Returns the grid's signals.
    pub fn signals(&self) -> &GridSignals {
        &self.signals
    }

    /// Returns `true` if the grid holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Returns the row with the given identity.
    pub fn find(&self, id: RowId) -> Option<GridRow> {
        let extract = self.row_id.read().clone();
        self.rows.read().iter().find(|row| extract(row) == id).cloned()
    }
}

impl GridApi for RowGrid {
    fn set_rows(&self, rows: Vec<GridRow>) {
        tracing::debug!(target: targets::GRID, count = rows.len(), "replacing rows");
        self.signals.emit_reset(|| {
            *self.rows.write() = rows;
        });
    }

    fn apply_transaction(&self, transaction: RowTransaction) -> TransactionResult {
        if transaction.is_empty() {
            return TransactionResult::default();
        }
        let extract = self.row_id.read().clone();
        let mut result = TransactionResult::default();

        {
            let mut rows = self.rows.write();

            for target in &transaction.remove {
                let id = extract(target);
                match rows.iter().position(|row| extract(row) == id) {
                    Some(pos) => {
                        rows.remove(pos);
                        result.removed.push(id);
                    }
                    None => result.missed.push(id),
                }
            }

            for replacement in transaction.update {
                let id = extract(&replacement);
                match rows.iter_mut().find(|row| extract(row) == id) {
                    Some(slot) => {
                        *slot = replacement;
                        result.updated.push(id);
                    }
                    None => result.missed.push(id),
                }
            }

            for row in transaction.add {
                let id = extract(&row);
                if rows.iter().any(|held| extract(held) == id) {
                    tracing::warn!(target: targets::GRID, %id, "duplicate row identity, row not added");
                    result.missed.push(id);
                } else {
                    rows.push(row);
                    result.added.push(id);
                }
            }
        }

        if !result.missed.is_empty() {
            tracing::debug!(target: targets::GRID, missed = ?result.missed, "transaction targets not held");
        }

        self.signals.emit_result(&result);
        result
    }

    fn for_each_row(&self, f: &mut dyn FnMut(&GridRow)) {
        for row in self.rows.read().iter() {
            f(row);
        }
    }

    fn row_count(&self) -> usize {
        self.rows.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::FieldValues;
    use parking_lot::Mutex;
    use serde_json::json;

    fn row(id: u64, name: &str) -> GridRow {
        let mut values = FieldValues::new();
        values.insert("name".into(), json!(name));
        GridRow::new(RowId::new(id), values)
    }

    fn names(grid: &RowGrid) -> Vec<String> {
        grid.rows()
            .iter()
            .map(|r| r.get("name").and_then(|v| v.as_str()).unwrap_or_default().to_owned())
            .collect()
    }

    #[test]
    fn test_add_update_remove() {
        let grid = RowGrid::new();
        grid.apply_transaction(RowTransaction {
            add: vec![row(1, "a"), row(2, "b"), row(3, "c")],
            ..Default::default()
        });
        assert_eq!(names(&grid), vec!["a", "b", "c"]);

        let result = grid.apply_transaction(RowTransaction::update(row(2, "B")));
        assert_eq!(result.updated, vec![RowId::new(2)]);
        assert_eq!(names(&grid), vec!["a", "B", "c"]);

        let result = grid.apply_transaction(RowTransaction::remove(row(1, "ignored")));
        assert_eq!(result.removed, vec![RowId::new(1)]);
        assert_eq!(names(&grid), vec!["B", "c"]);
    }

    #[test]
    fn test_stale_targets_are_missed() {
        let grid = RowGrid::new();
        grid.set_rows(vec![row(1, "a")]);

        let result = grid.apply_transaction(RowTransaction {
            update: vec![row(5, "x")],
            remove: vec![row(6, "y")],
            ..Default::default()
        });

        assert!(result.is_noop());
        assert_eq!(result.missed, vec![RowId::new(6), RowId::new(5)]);
        assert_eq!(names(&grid), vec!["a"]);
    }

    #[test]
    fn test_empty_transaction_emits_nothing() {
        let grid = RowGrid::new();
        let fired = Arc::new(Mutex::new(0));
        let f = fired.clone();
        grid.signals().rows_inserted.connect(move |_| *f.lock() += 1);

        let transaction = RowTransaction::default();
        assert!(transaction.is_empty());
        assert!(grid.apply_transaction(transaction).is_noop());
        assert_eq!(*fired.lock(), 0);
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let grid = RowGrid::new();
        grid.apply_transaction(RowTransaction::add(row(1, "a")));
        let result = grid.apply_transaction(RowTransaction::add(row(1, "dup")));

        assert_eq!(result.missed, vec![RowId::new(1)]);
        assert_eq!(grid.row_count(), 1);
    }

    #[test]
    fn test_signals() {
        let grid = RowGrid::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        let e = events.clone();
        grid.signals().rows_inserted.connect(move |ids| e.lock().push(("inserted", ids.len())));
        let e = events.clone();
        grid.signals().rows_removed.connect(move |ids| e.lock().push(("removed", ids.len())));
        let e = events.clone();
        grid.signals().model_reset.connect(move |_| e.lock().push(("reset", 0)));

        grid.set_rows(vec![row(1, "a")]);
        grid.apply_transaction(RowTransaction::add(row(2, "b")));
        grid.apply_transaction(RowTransaction::remove(row(1, "a")));
        grid.apply_transaction(RowTransaction::remove(row(1, "a")));

        assert_eq!(
            *events.lock(),
            vec![("reset", 0), ("inserted", 1), ("removed", 1)]
        );
    }

    #[test]
    fn test_custom_row_id_extractor() {
        let grid = RowGrid::new();
        grid.set_row_id_extractor(|row| {
            RowId::new(row.get("code").and_then(|v| v.as_u64()).unwrap_or_default())
        });

        let mut values = FieldValues::new();
        values.insert("code".into(), json!(77));
        grid.set_rows(vec![GridRow::new(RowId::new(1), values.clone())]);

        let probe = GridRow::new(RowId::new(999), values);
        assert_eq!(grid.row_id(&probe), RowId::new(77));
        assert!(grid.find(RowId::new(77)).is_some());

        grid.apply_transaction(RowTransaction::remove(probe));
        assert!(grid.is_empty());
    }
}
