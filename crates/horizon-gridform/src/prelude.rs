//! Prelude module for Horizon GridForm.
//!
//! ```ignore
//! use horizon_gridform::prelude::*;
//! ```

// ============================================================================
// Controller
// ============================================================================

pub use crate::controller::{ChangeEvent, CrudController, CrudControllerBuilder};
pub use crate::form::{DialogState, FormChange};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::{AddButtonOrigin, ControllerConfig, InteractionMode};

// ============================================================================
// Signals and errors
// ============================================================================

pub use horizon_gridform_core::{ConnectionId, GridFormError, Result, Signal};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    ActionPlacement, ColumnDefinition, EnumRegistry, Enumeration, FieldSchema, FieldValues,
    GridApi, GridRow, RowGrid, RowId, RowTransaction,
};

// ============================================================================
// Localization
// ============================================================================

pub use crate::localization::{LocalTextTable, Localizer};
