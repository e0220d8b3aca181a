//! Retention policies for bounding checkpoint disk usage.
//!
//! Provides:
//! - `RetentionPolicy` trait, invoked once per save
//! - `WindowedRetention` for a bounded rolling window with time-based
//!   milestone preservation
//! - `KeepAll` for explicitly unbounded growth

mod window;

pub use window::WindowedRetention;

use std::path::PathBuf;
use std::time::SystemTime;

/// One persisted snapshot. Immutable once created; removed from disk only
/// through a retention policy's eviction set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckpointRecord {
    /// Caller-supplied label (e.g. an epoch number).
    pub stamp: String,
    /// When the save began.
    pub created_at: SystemTime,
    /// Where the blob lives on disk.
    pub path: PathBuf,
}

/// What a retention policy decided about one save.
#[derive(Clone, Debug, Default)]
pub struct RetentionOutcome {
    /// Records whose files should be deleted now.
    pub evicted: Vec<CheckpointRecord>,
    /// Records graduated out of the rolling window as permanent milestones.
    /// Their files stay on disk and no longer count against the window.
    pub graduated: Vec<CheckpointRecord>,
}

/// Decides, after each save, which older checkpoints to delete and which
/// to preserve as milestones.
///
/// `on_saved` is invoked exactly once per save, after the new checkpoint
/// is durable on disk, and its state mutation must be treated as one
/// serialized unit per storage directory.
pub trait RetentionPolicy: Send {
    /// Record a freshly written checkpoint and return the eviction
    /// decision for it.
    fn on_saved(&mut self, record: CheckpointRecord) -> RetentionOutcome;
}

/// Retention disabled: every checkpoint is kept forever.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeepAll;

impl RetentionPolicy for KeepAll {
    fn on_saved(&mut self, _record: CheckpointRecord) -> RetentionOutcome {
        RetentionOutcome::default()
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::CheckpointRecord;
    use std::path::PathBuf;
    use std::time::{Duration, UNIX_EPOCH};

    /// A record stamped `stamp`, created `secs` after the epoch.
    pub fn record(stamp: &str, secs: u64) -> CheckpointRecord {
        CheckpointRecord {
            stamp: stamp.to_string(),
            created_at: UNIX_EPOCH + Duration::from_secs(secs),
            path: PathBuf::from(format!("{}_state.bin", stamp)),
        }
    }
}
