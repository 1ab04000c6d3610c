//! # modelsnap
//!
//! Periodic persistence of a model's learned parameters during training,
//! and selection of the most recent snapshot for reloading.
//!
//! ## Overview
//!
//! modelsnap provides:
//! - A filename scheme encoding `(sequence, metric)` so that lexicographic
//!   order matches training order
//! - [`snapshot::SnapshotWriter`] for saving snapshots each iteration
//! - [`snapshot::select_latest`] for picking the newest snapshot in a directory
//! - [`training::IterationHook`] for wiring the writer into a training loop
//!
//! The actual parameter-update algorithm, model architecture, and data
//! loading belong to the surrounding training engine; this crate's
//! responsibility ends at producing and locating correctly named files.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use modelsnap::prelude::*;
//!
//! let config = WriterConfig::new("./snapshots").save_every(1);
//! let mut writer = SnapshotWriter::new(config);
//!
//! // In the training loop:
//! writer.save(&model, epoch, accuracy)?;
//!
//! // Later, for inference:
//! let snapshot = load_latest(Path::new("./snapshots"), "model", "ckpt", &mut model)?;
//! println!("resumed from iteration {}", snapshot.name.sequence);
//! ```

pub mod log;
pub mod snapshot;
pub mod training;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::log::{CompositeLogger, ConsoleLogger, MetricLogger, NoOpLogger};
    pub use crate::snapshot::{
        list_snapshots, load_latest, select_latest, ModelState, Snapshot, SnapshotName,
        SnapshotWriter, WriterConfig,
    };
    pub use crate::training::{HookList, IterationHook, MetricHook};
    pub use crate::{Result, SnapError};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use std::path::PathBuf;

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum SnapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("no snapshots found in {}", dir.display())]
    NotFound { dir: PathBuf },

    #[error("sequence number {sequence} outside supported range 1..=9999")]
    SequenceOutOfRange { sequence: u64 },

    #[error("metric must be finite, got {metric}")]
    NonFiniteMetric { metric: f64 },
}

pub type Result<T> = std::result::Result<T, SnapError>;
