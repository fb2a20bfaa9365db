//! Record model for the grid/form controller.
//!
//! - [`row`]: row identity and records
//! - [`schema`]: field schema entries
//! - [`enums`]: enumerations and display formatting
//! - [`column`]: column definitions and schema projection
//! - [`grid`]: the grid collaborator boundary and the in-memory [`RowGrid`]

pub mod column;
pub mod enums;
pub mod grid;
pub mod row;
pub mod schema;

pub use column::{
    display_order, ActionKind, ActionPlacement, ColumnDefinition, ColumnKind, ColumnProjector,
    Pinned, ValueFormatter, PINNED_KEY,
};
pub use enums::{value_text, EnumEntry, EnumFormatter, EnumRegistry, Enumeration};
pub use grid::{GridApi, GridSignals, RowGrid, RowTransaction, TransactionResult};
pub use row::{
    default_row_id_extractor, take_row_id, FieldValues, GridRow, RowId, RowIdAllocator,
    RowIdExtractor, MAX_EXTERNAL_ROW_ID, ROW_ID_KEY,
};
pub use schema::FieldSchema;
