//! Core systems for Horizon GridForm.
//!
//! This crate provides the foundation the grid/form controller is built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Errors**: The configuration error type and `Result` alias
//! - **Logging**: `tracing` targets and convenience macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_gridform_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{GridFormError, Result};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
