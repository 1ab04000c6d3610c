//! Snapshot persistence.
//!
//! Provides:
//! - `SnapshotName` filename codec keeping lexicographic order temporal
//! - `SnapshotWriter` for per-iteration saves
//! - `select_latest` / `load_latest` for picking the newest snapshot
//! - `ModelState` trait marking the serialization boundary

mod name;
mod selector;
mod state;
mod writer;

pub use name::{SnapshotName, MAX_SEQUENCE};
pub use selector::{list_snapshots, load_latest, select_latest, Snapshot};
pub use state::{load_json, save_json, ModelState};
pub use writer::{SnapshotWriter, WriterConfig};
