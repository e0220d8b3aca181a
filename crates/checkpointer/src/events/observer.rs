//! Observer traits and composites.

use crate::retention::CheckpointRecord;
use std::path::Path;

/// Hooks invoked by the manager at lifecycle transitions.
///
/// All methods default to no-ops, so implementations only override the
/// events they care about. Replaces any process-global logging registry:
/// observers are injected per manager instance.
pub trait CheckpointObserver: Send + Sync {
    /// A checkpoint became durable on disk.
    fn saved(&self, _record: &CheckpointRecord) {}

    /// A checkpoint left the retention window and its file was removed.
    fn evicted(&self, _record: &CheckpointRecord) {}

    /// A checkpoint graduated out of the retention window permanently.
    fn milestone(&self, _record: &CheckpointRecord) {}

    /// A checkpoint was read back and decoded.
    fn restored(&self, _path: &Path) {}
}

/// An observer that does nothing (default).
pub struct NoOpObserver;

impl CheckpointObserver for NoOpObserver {}

/// A composite observer that dispatches to multiple backends.
pub struct CompositeObserver {
    observers: Vec<Box<dyn CheckpointObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Box<dyn CheckpointObserver>>) -> Self {
        Self { observers }
    }

    pub fn add(&mut self, observer: Box<dyn CheckpointObserver>) {
        self.observers.push(observer);
    }
}

impl CheckpointObserver for CompositeObserver {
    fn saved(&self, record: &CheckpointRecord) {
        for observer in &self.observers {
            observer.saved(record);
        }
    }

    fn evicted(&self, record: &CheckpointRecord) {
        for observer in &self.observers {
            observer.evicted(record);
        }
    }

    fn milestone(&self, record: &CheckpointRecord) {
        for observer in &self.observers {
            observer.milestone(record);
        }
    }

    fn restored(&self, path: &Path) {
        for observer in &self.observers {
            observer.restored(path);
        }
    }
}
