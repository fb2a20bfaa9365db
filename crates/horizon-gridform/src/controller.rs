//! The grid/form CRUD controller.
//!
//! [`CrudController`] keeps a grid of records in sync with an inline form or
//! a modal record dialog. It owns no row storage: rows live in a [`GridApi`]
//! collaborator and every mutation is a discrete transaction against it.
//! After each mutation the whole collection, with row identities stripped,
//! is emitted on [`CrudController::value_changed`].
//!
//! # Example
//!
//! ```
//! use horizon_gridform::prelude::*;
//! use serde_json::json;
//!
//! let enums = EnumRegistry::new().with_enum(
//!     "statusEnum",
//!     Enumeration::new().with_entry(1, "Active").with_entry(2, "Closed"),
//! );
//! let mut controller = CrudController::builder(vec![
//!     FieldSchema::new("status").with_enum_id("statusEnum"),
//! ])
//! .enums(enums)
//! .build();
//!
//! let mut values = FieldValues::new();
//! values.insert("status".into(), json!(1));
//! controller.add_row(values);
//!
//! let snapshot = controller.value();
//! assert_eq!(snapshot[0]["status"], json!(1));
//!
//! let rows = controller.rows();
//! let status = &controller.columns()[2];
//! assert_eq!(controller.cell_text(&rows[0], status), "Active");
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_gridform_core::logging::targets;
use horizon_gridform_core::{ConnectionId, PerfSpan, Signal};
use serde_json::Value;

use crate::config::{ControllerConfig, InteractionMode};
use crate::form::{DialogState, FormChange, FormValueCache};
use crate::localization::{keys, Localizer, NoLocalization};
use crate::model::{
    display_order, take_row_id, ColumnDefinition, ColumnProjector, EnumRegistry, FieldSchema,
    FieldValues, GridApi, GridRow, RowGrid, RowId, RowIdAllocator, RowTransaction,
};

/// Hook applied to the projected field columns before the action columns
/// are appended.
pub type ColumnCustomizer =
    Arc<dyn Fn(Vec<ColumnDefinition>) -> Vec<ColumnDefinition> + Send + Sync>;

/// The externally visible record collection after a mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeEvent {
    /// Every held row's field values, in grid order, without identities.
    pub value: Vec<FieldValues>,
}

/// Synchronizes a record grid with an inline form or a record dialog.
///
/// Mutating operations take `&mut self` and deliver their change
/// notification before returning.
pub struct CrudController {
    config: ControllerConfig,
    schema: Vec<FieldSchema>,
    localizer: Arc<dyn Localizer>,
    projector: ColumnProjector,
    column_customizer: Option<ColumnCustomizer>,
    columns: Vec<ColumnDefinition>,
    grid: Arc<dyn GridApi>,
    ids: RowIdAllocator,
    inline_form: FormValueCache,
    dialog_form: FormValueCache,
    dialog: DialogState,
    value_changed: Signal<ChangeEvent>,
    dialog_changed: Signal<DialogState>,
}

impl fmt::Debug for CrudController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudController")
            .field("config", &self.config)
            .field("schema", &self.schema)
            .field("columns", &self.columns)
            .field("ids", &self.ids)
            .field("dialog", &self.dialog)
            .finish_non_exhaustive()
    }
}

impl CrudController {
    /// Starts building a controller for the given schema.
    pub fn builder(schema: Vec<FieldSchema>) -> CrudControllerBuilder {
        CrudControllerBuilder::new(schema)
    }

    /// Creates a controller with default collaborators: an in-memory
    /// [`RowGrid`], an empty enumeration registry and no localization.
    pub fn new(schema: Vec<FieldSchema>, config: ControllerConfig) -> Self {
        CrudControllerBuilder::new(schema).config(config).build()
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Handles the add button.
    ///
    /// Opens the add dialog in dialog mode, or appends the inline form's last
    /// reported values in inline mode.
    pub fn on_add_intent(&mut self) {
        let mode = self.config.interaction_mode.clone();
        match mode {
            InteractionMode::ModalDialog => self.open_dialog(DialogState::adding()),
            InteractionMode::InlineForm => match self.inline_form.current().cloned() {
                Some(values) => {
                    self.add_row(values);
                }
                None => {
                    tracing::warn!(
                        target: targets::CONTROLLER,
                        "add requested before the inline form reported any values"
                    );
                }
            },
            InteractionMode::Unrecognized(name) => {
                tracing::error!(
                    target: targets::CONTROLLER,
                    mode = %name,
                    "invalid interaction mode, expected \"form\" or \"formDialog\""
                );
            }
        }
    }

    /// Handles a row's edit action by opening the edit dialog for `row`.
    pub fn on_edit_intent(&mut self, row: &GridRow) {
        tracing::debug!(target: targets::CONTROLLER, id = %row.id(), "edit requested");
        self.open_dialog(DialogState::editing(row.clone()));
    }

    /// Handles a row's remove action. There is no confirmation step.
    pub fn on_remove_intent(&mut self, row: &GridRow) {
        let result = self.grid.apply_transaction(RowTransaction::remove(row.clone()));
        if result.removed.is_empty() {
            tracing::debug!(target: targets::CONTROLLER, id = %row.id(), "remove target no longer held");
        }
        self.notify();
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends a row with a freshly allocated identity and returns it.
    pub fn add_row(&mut self, values: FieldValues) -> RowId {
        let id = self.ids.allocate();
        self.grid.apply_transaction(RowTransaction::add(GridRow::new(id, values)));
        tracing::debug!(target: targets::CONTROLLER, %id, "row added");
        self.notify();
        id
    }

    /// Replaces `original` with `values` overlaid on its values. The row
    /// keeps its identity.
    pub fn edit_row(&mut self, original: &GridRow, values: FieldValues) {
        let result = self
            .grid
            .apply_transaction(RowTransaction::update(original.merged_with(values)));
        if result.updated.is_empty() {
            tracing::debug!(target: targets::CONTROLLER, id = %original.id(), "edit target no longer held");
        }
        self.notify();
    }

    /// Replaces the grid contents with externally supplied records.
    ///
    /// A record carrying a [`ROW_ID_KEY`](crate::model::ROW_ID_KEY) keeps that
    /// identity when it is above every identity this controller has issued or
    /// adopted so far. All other records get a fresh one, so an identity is
    /// never reused even after its row was removed. No change notification is
    /// fired.
    pub fn set_value(&mut self, records: Vec<FieldValues>) {
        let _span = PerfSpan::new("set_value");

        let rows: Vec<GridRow> = records
            .into_iter()
            .map(|mut values| {
                let id = match take_row_id(&mut values) {
                    Some(external) => self.ids.adopt(external),
                    None => self.ids.allocate(),
                };
                GridRow::new(id, values)
            })
            .collect();

        tracing::debug!(
            target: targets::CONTROLLER,
            count = rows.len(),
            last_id = ?self.ids.last(),
            "value replaced"
        );
        self.grid.set_rows(rows);
    }

    // =========================================================================
    // Forms and dialog
    // =========================================================================

    /// Records the inline form's latest values.
    pub fn on_form_change(&mut self, change: FormChange) {
        self.inline_form.record(change);
    }

    /// Records the dialog form's latest values.
    pub fn on_dialog_form_change(&mut self, change: FormChange) {
        self.dialog_form.record(change);
    }

    /// Submits the open dialog with `values`: edits the target row in edit
    /// mode, adds a row otherwise, then closes the dialog.
    ///
    /// Returns the identity of the affected row, or `None` when no dialog
    /// was open.
    pub fn on_dialog_submit(&mut self, values: FieldValues) -> Option<RowId> {
        if self.dialog.is_idle() {
            tracing::warn!(target: targets::CONTROLLER, "dialog submitted while closed");
            return None;
        }

        let DialogState {
            edit_mode,
            target_row,
            ..
        } = std::mem::take(&mut self.dialog);
        let id = match target_row.filter(|_| edit_mode) {
            Some(target) => {
                self.edit_row(&target, values);
                target.id()
            }
            None => self.add_row(values),
        };

        self.close_dialog();
        Some(id)
    }

    /// Submits the open dialog with the dialog form's last reported values.
    pub fn submit_dialog(&mut self) -> Option<RowId> {
        match self.dialog_form.current().cloned() {
            Some(values) => self.on_dialog_submit(values),
            None => {
                tracing::warn!(
                    target: targets::CONTROLLER,
                    "dialog submitted before its form reported any values"
                );
                None
            }
        }
    }

    /// Closes the dialog without touching the grid.
    pub fn on_dialog_cancel(&mut self) {
        self.close_dialog();
    }

    /// Returns the dialog state.
    pub fn dialog_state(&self) -> &DialogState {
        &self.dialog
    }

    /// Values the dialog's form starts with.
    pub fn dialog_default_values(&self) -> Option<&FieldValues> {
        self.dialog.default_values()
    }

    fn open_dialog(&mut self, state: DialogState) {
        self.dialog_form.clear();
        self.dialog = state;
        self.dialog_changed.emit(self.dialog.clone());
    }

    fn close_dialog(&mut self) {
        self.dialog_form.clear();
        self.dialog = DialogState::idle();
        self.dialog_changed.emit(self.dialog.clone());
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Returns the externally visible collection: every row's values without
    /// its identity.
    pub fn value(&self) -> Vec<FieldValues> {
        self.grid.rows().into_iter().map(GridRow::into_values).collect()
    }

    /// Returns the held rows, identities included.
    pub fn rows(&self) -> Vec<GridRow> {
        self.grid.rows()
    }

    /// Returns the grid collaborator.
    pub fn grid(&self) -> &Arc<dyn GridApi> {
        &self.grid
    }

    /// Signal emitted after every mutation.
    pub fn value_changed(&self) -> &Signal<ChangeEvent> {
        &self.value_changed
    }

    /// Signal emitted whenever the dialog opens or closes.
    pub fn dialog_changed(&self) -> &Signal<DialogState> {
        &self.dialog_changed
    }

    /// Connects a change notification handler.
    pub fn on_change<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.value_changed.connect(slot)
    }

    fn notify(&self) {
        let event = ChangeEvent { value: self.value() };
        tracing::trace!(target: targets::CONTROLLER, rows = event.value.len(), "value changed");
        self.value_changed.emit(event);
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Returns the columns in display order.
    pub fn columns(&self) -> Vec<ColumnDefinition> {
        display_order(&self.columns)
    }

    /// Returns the columns in projection order: field columns, then edit and
    /// remove.
    pub fn column_definitions(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Returns the field schema.
    pub fn schema(&self) -> &[FieldSchema] {
        &self.schema
    }

    /// Replaces the field schema and recomputes the columns.
    pub fn set_schema(&mut self, schema: Vec<FieldSchema>) {
        self.schema = schema;
        self.rebuild_columns();
    }

    /// Replaces the enumeration registry and recomputes the columns.
    pub fn set_enums(&mut self, registry: EnumRegistry) {
        self.projector = ColumnProjector::new(Arc::new(registry), self.localizer.clone());
        self.rebuild_columns();
    }

    /// Returns the display text of `row`'s cell in `column`. Action columns
    /// render their caption.
    pub fn cell_text(&self, row: &GridRow, column: &ColumnDefinition) -> String {
        if column.is_action() {
            return column.header_name().to_owned();
        }
        column.format_text(row.get(column.field()).unwrap_or(&Value::Null))
    }

    fn rebuild_columns(&mut self) {
        let mut fields = self.projector.project(&self.schema);
        if let Some(customize) = &self.column_customizer {
            fields = customize(fields);
        }
        self.columns = self
            .projector
            .with_actions(fields, self.config.action_placement);
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Returns the configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Caption of the add button.
    pub fn add_label(&self) -> String {
        self.localizer.text_or_key(keys::ADD)
    }

    /// Caption of the dialog's submit action.
    pub fn submit_label(&self) -> String {
        self.localizer.text_or_key(keys::SUBMIT)
    }

    /// Caption of the dialog's cancel action.
    pub fn cancel_label(&self) -> String {
        self.localizer.text_or_key(keys::CANCEL)
    }
}

/// Builder for [`CrudController`].
pub struct CrudControllerBuilder {
    schema: Vec<FieldSchema>,
    config: ControllerConfig,
    enums: EnumRegistry,
    localizer: Arc<dyn Localizer>,
    grid: Option<Arc<dyn GridApi>>,
    column_customizer: Option<ColumnCustomizer>,
    initial_value: Option<Vec<FieldValues>>,
}

impl CrudControllerBuilder {
    /// Creates a builder for the given schema.
    pub fn new(schema: Vec<FieldSchema>) -> Self {
        Self {
            schema,
            config: ControllerConfig::default(),
            enums: EnumRegistry::new(),
            localizer: Arc::new(NoLocalization),
            grid: None,
            column_customizer: None,
            initial_value: None,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the enumeration registry used to format cells.
    pub fn enums(mut self, enums: EnumRegistry) -> Self {
        self.enums = enums;
        self
    }

    /// Sets the source of localized text.
    pub fn localizer(mut self, localizer: impl Localizer + 'static) -> Self {
        self.localizer = Arc::new(localizer);
        self
    }

    /// Sets the grid collaborator. Defaults to a fresh [`RowGrid`].
    pub fn grid(mut self, grid: Arc<dyn GridApi>) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Sets a hook that adjusts the projected field columns.
    pub fn column_customizer<F>(mut self, customize: F) -> Self
    where
        F: Fn(Vec<ColumnDefinition>) -> Vec<ColumnDefinition> + Send + Sync + 'static,
    {
        self.column_customizer = Some(Arc::new(customize));
        self
    }

    /// Sets the records the grid starts with.
    pub fn initial_value(mut self, records: Vec<FieldValues>) -> Self {
        self.initial_value = Some(records);
        self
    }

    /// Builds the controller.
    pub fn build(self) -> CrudController {
        if let Err(err) = self.config.validate() {
            tracing::error!(target: targets::CONTROLLER, error = %err, "controller misconfigured");
        }
        if self.config.edit_only {
            tracing::debug!(target: targets::CONTROLLER, "editOnly is set but has no effect");
        }

        let projector = ColumnProjector::new(Arc::new(self.enums), self.localizer.clone());
        let grid = self
            .grid
            .unwrap_or_else(|| Arc::new(RowGrid::new()) as Arc<dyn GridApi>);

        let mut controller = CrudController {
            config: self.config,
            schema: self.schema,
            localizer: self.localizer,
            projector,
            column_customizer: self.column_customizer,
            columns: Vec::new(),
            grid,
            ids: RowIdAllocator::new(),
            inline_form: FormValueCache::new(),
            dialog_form: FormValueCache::new(),
            dialog: DialogState::idle(),
            value_changed: Signal::new(),
            dialog_changed: Signal::new(),
        };
        controller.rebuild_columns();

        if let Some(records) = self.initial_value {
            controller.set_value(records);
        }
        controller
    }
}
