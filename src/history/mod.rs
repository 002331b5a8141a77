//! Undo/redo history and the persistence boundary.
//!
//! - `Snapshot`: complete match state, cheap to clone
//! - `HistoryLog`: bounded linear undo/redo over snapshots
//! - `SaveFile`: versioned, validated byte encoding of a snapshot

pub mod log;
pub mod snapshot;

pub use log::HistoryLog;
pub use snapshot::{PersistenceError, SaveFile, Snapshot, SAVE_FORMAT_VERSION};
