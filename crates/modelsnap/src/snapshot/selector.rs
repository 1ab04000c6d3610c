//! Selecting and loading snapshots from a directory.

use super::name::SnapshotName;
use super::state::ModelState;
use crate::{Result, SnapError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A snapshot located on disk.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Full path to the snapshot file
    pub path: PathBuf,
    /// Decoded sequence number and metric
    pub name: SnapshotName,
}

/// List all snapshots in `dir` matching the prefix and extension, oldest first.
///
/// Files that do not parse as snapshot names are ignored. A missing
/// directory yields an empty list; only [`select_latest`] turns emptiness
/// into an error. Any other listing failure (permissions, not a directory)
/// surfaces as [`SnapError::Io`].
pub fn list_snapshots(dir: &Path, prefix: &str, ext: &str) -> Result<Vec<Snapshot>> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut snapshots: Vec<Snapshot> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let path = e.path();
            let name = SnapshotName::parse(path.file_name()?.to_str()?, prefix, ext)?;
            Some(Snapshot { path, name })
        })
        .collect();

    // Fixed-width fields make the filename sort the temporal sort.
    snapshots.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(snapshots)
}

/// Pick the most recent snapshot in `dir`: lexicographically last filename,
/// which under the fixed-width naming scheme is the highest sequence number.
///
/// Fails with [`SnapError::NotFound`] naming the directory when it is empty,
/// missing, or contains no parseable snapshots.
pub fn select_latest(dir: &Path, prefix: &str, ext: &str) -> Result<Snapshot> {
    let mut snapshots = list_snapshots(dir, prefix, ext)?;
    snapshots.pop().ok_or_else(|| SnapError::NotFound {
        dir: dir.to_path_buf(),
    })
}

/// Locate the most recent snapshot and restore `model` from it.
///
/// Interpreting the payload bytes is entirely the model's business; this
/// function's responsibility ends at reading the correct file.
pub fn load_latest<T: ModelState + ?Sized>(
    dir: &Path,
    prefix: &str,
    ext: &str,
    model: &mut T,
) -> Result<Snapshot> {
    let snapshot = select_latest(dir, prefix, ext)?;
    let data = fs::read(&snapshot.path)?;
    model.load_state(&data)?;
    tracing::info!(
        path = %snapshot.path.display(),
        sequence = snapshot.name.sequence,
        "loaded snapshot"
    );
    Ok(snapshot)
}
