//! Console observer backend.

use super::CheckpointObserver;
use crate::retention::CheckpointRecord;
use std::path::Path;

/// Observer that reports lifecycle events via tracing.
pub struct ConsoleObserver;

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self
    }
}

impl CheckpointObserver for ConsoleObserver {
    fn saved(&self, record: &CheckpointRecord) {
        tracing::info!(stamp = %record.stamp, path = %record.path.display(), "checkpoint saved");
    }

    fn evicted(&self, record: &CheckpointRecord) {
        tracing::info!(stamp = %record.stamp, "checkpoint evicted");
    }

    fn milestone(&self, record: &CheckpointRecord) {
        tracing::info!(stamp = %record.stamp, "checkpoint kept as milestone");
    }

    fn restored(&self, path: &Path) {
        tracing::info!(path = %path.display(), "checkpoint restored");
    }
}
