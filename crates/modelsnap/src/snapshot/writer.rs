//! Snapshot writer with save policy and rotation.

use super::name::SnapshotName;
use super::selector::list_snapshots;
use super::state::ModelState;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for snapshot writing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Directory to store snapshots
    pub dir: PathBuf,
    /// Filename prefix
    pub prefix: String,
    /// Filename extension (without the dot)
    pub extension: String,
    /// Save every N iterations
    pub save_every: u64,
    /// Keep only the last N snapshots (0 = keep all)
    pub keep_last: usize,
    /// Also keep a `<prefix>_best.<ext>` copy of the best-metric snapshot
    pub save_best: bool,
}

impl WriterConfig {
    /// Create a config writing to the given directory.
    ///
    /// Defaults preserve the save-every-iteration, keep-everything policy.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "model".to_string(),
            extension: "ckpt".to_string(),
            save_every: 1,
            keep_last: 0,
            save_best: false,
        }
    }

    /// Set the filename prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the filename extension.
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into();
        self
    }

    /// Set save frequency.
    pub fn save_every(mut self, iterations: u64) -> Self {
        self.save_every = iterations;
        self
    }

    /// Set number of snapshots to keep.
    pub fn keep_last(mut self, n: usize) -> Self {
        self.keep_last = n;
        self
    }

    /// Enable/disable best snapshot tracking.
    pub fn save_best(mut self, enabled: bool) -> Self {
        self.save_best = enabled;
        self
    }
}

/// Writes one snapshot per admitted iteration.
///
/// Each write is atomic: bytes are staged to a `.tmp` sibling and renamed
/// into place, so a failed write never corrupts snapshots already on disk.
/// Writing the same sequence number twice deterministically overwrites the
/// earlier file; under a monotonically increasing sequence this cannot occur.
///
/// # Example
///
/// ```ignore
/// let config = WriterConfig::new("./snapshots").save_every(1);
/// let mut writer = SnapshotWriter::new(config);
///
/// // In the training loop:
/// if let Some(path) = writer.maybe_save(&model, epoch, accuracy)? {
///     println!("saved {}", path.display());
/// }
/// ```
pub struct SnapshotWriter {
    config: WriterConfig,
    best_metric: f64,
}

impl SnapshotWriter {
    /// Create a new writer. The directory is created lazily on first save.
    pub fn new(config: WriterConfig) -> Self {
        Self {
            config,
            best_metric: f64::NEG_INFINITY,
        }
    }

    /// Get the snapshot directory path.
    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Save a snapshot if the iteration is admitted by `save_every`.
    ///
    /// Returns the path to the saved snapshot, or None if no save was performed.
    pub fn maybe_save<T: ModelState + ?Sized>(
        &mut self,
        model: &T,
        sequence: u64,
        metric: f64,
    ) -> Result<Option<PathBuf>> {
        if self.config.save_every > 1 && sequence % self.config.save_every != 0 {
            return Ok(None);
        }

        self.save(model, sequence, metric).map(Some)
    }

    /// Save a snapshot regardless of the save frequency.
    pub fn save<T: ModelState + ?Sized>(
        &mut self,
        model: &T,
        sequence: u64,
        metric: f64,
    ) -> Result<PathBuf> {
        let name = SnapshotName::new(sequence, metric)?;
        let data = model.save_state()?;

        fs::create_dir_all(&self.config.dir)?;

        let file_name = name.file_name(&self.config.prefix, &self.config.extension);
        let path = self.config.dir.join(&file_name);

        // Stage next to the target so the rename stays on one filesystem.
        let tmp = self.config.dir.join(format!("{file_name}.tmp"));
        fs::write(&tmp, &data)?;
        fs::rename(&tmp, &path)?;
        tracing::info!(path = %path.display(), sequence, metric, "saved snapshot");

        if self.config.save_best && metric > self.best_metric {
            self.best_metric = metric;
            let best_path = self.config.dir.join(format!(
                "{}_best.{}",
                self.config.prefix, self.config.extension
            ));
            fs::copy(&path, &best_path)?;
            tracing::info!(metric, "new best snapshot");
        }

        if self.config.keep_last > 0 {
            self.rotate()?;
        }

        Ok(path)
    }

    /// Remove old snapshots, keeping only the last `keep_last`.
    fn rotate(&self) -> Result<()> {
        let mut snapshots =
            list_snapshots(&self.config.dir, &self.config.prefix, &self.config.extension)?;

        while snapshots.len() > self.config.keep_last {
            let old = snapshots.remove(0);
            if let Err(e) = fs::remove_file(&old.path) {
                tracing::warn!(path = %old.path.display(), "failed to remove old snapshot: {}", e);
            } else {
                tracing::debug!(path = %old.path.display(), "removed old snapshot");
            }
        }

        Ok(())
    }
}
