//! Snapshot filename codec.

use crate::{Result, SnapError};

/// Largest sequence number the 4-digit zero-padded field can carry.
///
/// Beyond this, padding breaks and lexicographic order diverges from
/// temporal order, so larger values are rejected rather than written.
pub const MAX_SEQUENCE: u64 = 9999;

const SEQ_FIELD: &str = "_epoch-";
const METRIC_FIELD: &str = "_acc-";

/// Decoded snapshot filename: `<prefix>_epoch-NNNN_acc-M.MM.<ext>`.
///
/// The sequence field is zero-padded to a fixed width and precedes the
/// metric field, so for a fixed prefix and extension, sorting filenames as
/// strings sorts them by `(sequence, metric)`. That equivalence is what
/// [`select_latest`](super::select_latest) relies on.
///
/// The metric field only participates in the sort among names sharing a
/// sequence number, which a monotonically increasing sequence never
/// produces. Metrics outside `[0, 10)` render with variable width (a sign
/// or an extra integer digit), and among equal sequence numbers their
/// relative order is then lexicographic rather than numeric — still
/// deterministic, but only the sequence field carries temporal order.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotName {
    /// Training iteration that produced the snapshot, starting at 1.
    pub sequence: u64,
    /// Scalar performance metric recorded alongside the snapshot.
    pub metric: f64,
}

impl SnapshotName {
    /// Create a name, rejecting values that would break the sort invariant.
    pub fn new(sequence: u64, metric: f64) -> Result<Self> {
        if sequence == 0 || sequence > MAX_SEQUENCE {
            return Err(SnapError::SequenceOutOfRange { sequence });
        }
        if !metric.is_finite() {
            return Err(SnapError::NonFiniteMetric { metric });
        }
        Ok(Self { sequence, metric })
    }

    /// Render the filename for the given prefix and extension.
    pub fn file_name(&self, prefix: &str, ext: &str) -> String {
        format!(
            "{prefix}{SEQ_FIELD}{:04}{METRIC_FIELD}{:.2}.{ext}",
            self.sequence, self.metric
        )
    }

    /// Parse a filename produced by [`SnapshotName::file_name`].
    ///
    /// Returns `None` for files that do not belong to this prefix and
    /// extension, so stray files in a snapshot directory are ignored
    /// rather than treated as errors.
    pub fn parse(file_name: &str, prefix: &str, ext: &str) -> Option<Self> {
        let rest = file_name.strip_prefix(prefix)?;
        let rest = rest.strip_prefix(SEQ_FIELD)?;
        let rest = rest.strip_suffix(ext)?;
        let rest = rest.strip_suffix('.')?;
        let (seq, metric) = rest.split_once(METRIC_FIELD)?;
        if seq.len() != 4 {
            return None;
        }
        let sequence: u64 = seq.parse().ok()?;
        let metric: f64 = metric.parse().ok()?;
        Self::new(sequence, metric).ok()
    }
}
