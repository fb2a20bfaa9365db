//! End-to-end tests for the CRUD controller.

use std::sync::Arc;

use horizon_gridform::model::{GridSignals, ROW_ID_KEY};
use horizon_gridform::prelude::*;
use parking_lot::Mutex;
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn record(pairs: &[(&str, Value)]) -> FieldValues {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.clone()))
        .collect()
}

fn status_controller(config: ControllerConfig) -> CrudController {
    let enums = EnumRegistry::new().with_enum(
        "statusEnum",
        Enumeration::new().with_entry(1, "Active").with_entry(2, "Closed"),
    );
    CrudController::builder(vec![FieldSchema::new("status").with_enum_id("statusEnum")])
        .config(config)
        .enums(enums)
        .build()
}

fn capture(controller: &CrudController) -> Arc<Mutex<Vec<Vec<FieldValues>>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    controller.on_change(move |event| sink.lock().push(event.value.clone()));
    events
}

#[test]
fn test_add_row_notifies_and_formats_enum() {
    init_tracing();
    let mut controller = status_controller(ControllerConfig::default());
    let events = capture(&controller);

    controller.add_row(record(&[("status", json!(1))]));

    assert_eq!(*events.lock(), vec![vec![record(&[("status", json!(1))])]]);

    let rows = controller.rows();
    let status = controller
        .columns()
        .into_iter()
        .find(|column| column.field() == "status")
        .expect("status column");
    assert_eq!(status.format(&json!(1)), json!("Active"));
    assert_eq!(controller.cell_text(&rows[0], &status), "Active");
}

#[test]
fn test_remove_intent_empties_collection() {
    init_tracing();
    let mut controller = status_controller(ControllerConfig::default());
    controller.set_value(vec![record(&[(ROW_ID_KEY, json!(1)), ("status", json!(1))])]);
    let events = capture(&controller);

    let row = controller.rows()[0].clone();
    assert_eq!(row.id(), RowId::new(1));
    controller.on_remove_intent(&row);

    assert_eq!(*events.lock(), vec![Vec::<FieldValues>::new()]);
    assert!(controller.rows().is_empty());
}

#[test]
fn test_edit_then_cancel_leaves_rows_untouched() {
    init_tracing();
    let mut controller =
        status_controller(ControllerConfig::with_mode(InteractionMode::ModalDialog));
    controller.add_row(record(&[("status", json!(2))]));
    let before = controller.rows();
    let events = capture(&controller);

    let row = before[0].clone();
    controller.on_edit_intent(&row);
    assert_eq!(
        *controller.dialog_state(),
        DialogState {
            visible: true,
            edit_mode: true,
            target_row: Some(row.clone()),
        }
    );

    controller.on_dialog_cancel();

    assert!(controller.dialog_state().is_idle());
    assert!(controller.dialog_state().target_row.is_none());
    assert!(events.lock().is_empty());
    assert_eq!(controller.rows(), before);
}

#[test]
fn test_identities_are_unique_and_increasing() {
    init_tracing();
    let mut controller = CrudController::new(vec![FieldSchema::new("n")], ControllerConfig::default());

    let ids: Vec<RowId> = (0..50)
        .map(|n| controller.add_row(record(&[("n", json!(n))])))
        .collect();

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    // Removal never frees an identity for reuse.
    let last = controller.rows().last().cloned().expect("rows");
    controller.on_remove_intent(&last);
    let next = controller.add_row(FieldValues::new());
    assert!(next > *ids.last().expect("ids"));
}

#[test]
fn test_identity_survives_repeated_edits() {
    init_tracing();
    let mut controller = CrudController::new(vec![FieldSchema::new("n")], ControllerConfig::default());
    let id = controller.add_row(record(&[("n", json!(0))]));

    for n in 1..5 {
        let row = controller.rows()[0].clone();
        controller.edit_row(&row, record(&[("n", json!(n))]));
    }

    let rows = controller.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id(), id);
    assert_eq!(rows[0].get("n"), Some(&json!(4)));
}

#[test]
fn test_notifications_never_carry_identity() {
    init_tracing();
    let mut controller =
        status_controller(ControllerConfig::with_mode(InteractionMode::ModalDialog));
    let events = capture(&controller);

    controller.set_value(vec![record(&[(ROW_ID_KEY, json!("3")), ("status", json!(1))])]);
    controller.add_row(record(&[(ROW_ID_KEY, json!(99)), ("status", json!(2))]));

    let row = controller.rows()[0].clone();
    controller.on_edit_intent(&row);
    controller.on_dialog_form_change(FormChange::new(record(&[("status", json!(2))])));
    controller.submit_dialog();

    let events = events.lock();
    assert_eq!(events.len(), 2);
    for snapshot in events.iter() {
        for values in snapshot {
            assert!(!values.contains_key(ROW_ID_KEY));
            assert!(values.keys().all(|key| key == "status"));
        }
    }
}

#[test]
fn test_column_order_by_placement() {
    init_tracing();
    let schema = vec![FieldSchema::new("A"), FieldSchema::new("B")];
    let fields = |controller: &CrudController| -> Vec<String> {
        controller
            .columns()
            .iter()
            .map(|column| column.field().to_owned())
            .collect()
    };

    let leading = CrudController::new(schema.clone(), ControllerConfig::default());
    assert_eq!(fields(&leading), vec!["__edit", "__remove", "A", "B"]);

    let trailing = CrudController::new(
        schema,
        ControllerConfig {
            action_placement: ActionPlacement::Trailing,
            ..Default::default()
        },
    );
    assert_eq!(fields(&trailing), vec!["A", "B", "__edit", "__remove"]);
}

#[test]
fn test_formatter_falls_back_to_raw() {
    init_tracing();
    let controller = status_controller(ControllerConfig::default());
    let formatter = controller
        .column_definitions()
        .first()
        .map(|column| column.format(&json!(9)))
        .expect("status column");
    assert_eq!(formatter, json!(9));

    let registry = EnumRegistry::new();
    let enums = horizon_gridform::model::EnumFormatter::new(Arc::new(registry));
    assert_eq!(enums.format("missingKey", &json!("X")), json!("X"));
}

#[test]
fn test_shared_grid_observes_controller_transactions() {
    init_tracing();
    let grid = Arc::new(RowGrid::new());
    let inserted = Arc::new(Mutex::new(Vec::new()));
    let sink = inserted.clone();
    let signals: &GridSignals = grid.signals();
    signals
        .rows_inserted
        .connect(move |ids: &Vec<RowId>| sink.lock().extend(ids.iter().copied()));

    let mut controller = CrudController::builder(vec![FieldSchema::new("name")])
        .grid(grid.clone())
        .build();
    let first = controller.add_row(record(&[("name", json!("a"))]));
    let second = controller.add_row(record(&[("name", json!("b"))]));

    assert_eq!(*inserted.lock(), vec![first, second]);
    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.find(second).and_then(|row| row.get("name").cloned()), Some(json!("b")));
}

#[test]
fn test_inline_mode_never_opens_dialog() {
    init_tracing();
    let mut controller = CrudController::new(vec![FieldSchema::new("name")], ControllerConfig::default());
    let dialogs = Arc::new(Mutex::new(0));
    let sink = dialogs.clone();
    controller.dialog_changed().connect(move |_| *sink.lock() += 1);

    controller.on_form_change(FormChange::new(record(&[("name", json!("x"))])));
    controller.on_add_intent();
    controller.on_add_intent();

    assert_eq!(*dialogs.lock(), 0);
    assert_eq!(controller.value().len(), 2);
}
