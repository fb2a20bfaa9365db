//! Horizon GridForm - grid/form CRUD synchronization.
//!
//! A [`CrudController`](controller::CrudController) keeps an editable grid of
//! records in sync with an inline form or a modal record dialog. Rows carry an
//! internal identity that never appears in the values handed back to callers.
//!
//! # Example
//!
//! ```
//! use horizon_gridform::prelude::*;
//! use serde_json::json;
//!
//! let mut controller = CrudController::new(
//!     vec![FieldSchema::new("name")],
//!     ControllerConfig::default(),
//! );
//! controller.on_change(|event| println!("{} rows", event.value.len()));
//!
//! let mut values = FieldValues::new();
//! values.insert("name".into(), json!("Ada"));
//! controller.on_form_change(FormChange::new(values));
//! controller.on_add_intent();
//!
//! assert_eq!(controller.value().len(), 1);
//! ```

pub use horizon_gridform_core::*;

pub mod config;
pub mod controller;
pub mod form;
pub mod localization;
pub mod model;
pub mod prelude;
