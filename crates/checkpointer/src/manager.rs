//! Checkpoint lifecycle manager.

use crate::codec::StateCodec;
use crate::events::{CheckpointObserver, NoOpObserver};
use crate::locate::{CheckpointSelector, LatestCreated};
use crate::retention::{CheckpointRecord, RetentionPolicy, WindowedRetention};
use crate::store::CheckpointStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Configuration for checkpoint management.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckpointConfig {
    /// Directory to store checkpoints
    pub storage_dir: PathBuf,
    /// Keep only the last N non-milestone checkpoints (0 = keep all)
    pub max_kept: usize,
    /// Graduate an eviction candidate into a permanent milestone when it
    /// was saved at least this long after the previous milestone
    pub milestone_interval: Option<Duration>,
    /// `maybe_save` saves every N epochs
    pub save_every: u64,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("checkpoints"),
            max_kept: 1000,
            milestone_interval: Some(Duration::from_secs(3600)),
            save_every: 1,
        }
    }
}

impl CheckpointConfig {
    /// Create a new config with the given directory.
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            ..Default::default()
        }
    }

    /// Set the retention window size.
    pub fn max_kept(mut self, n: usize) -> Self {
        self.max_kept = n;
        self
    }

    /// Set the milestone interval.
    pub fn milestone_every(mut self, interval: Duration) -> Self {
        self.milestone_interval = Some(interval);
        self
    }

    /// Disable milestone preservation.
    pub fn no_milestones(mut self) -> Self {
        self.milestone_interval = None;
        self
    }

    /// Set the `maybe_save` cadence.
    pub fn save_every(mut self, epochs: u64) -> Self {
        self.save_every = epochs;
        self
    }
}

/// Manages checkpoint lifecycle.
///
/// Composes the codec, store, retention policy, and locator into
/// `save`/`restore`. On save, the new checkpoint is made durable on disk
/// *before* the retention policy runs and before any old file is removed,
/// so a crash mid-cycle never leaves zero valid checkpoints.
///
/// Not designed for concurrent invocation against one storage directory:
/// callers that save from multiple threads or processes must serialize
/// access externally (e.g. one lock per storage directory). The manager
/// performs no internal locking.
///
/// # Example
///
/// ```ignore
/// let config = CheckpointConfig::new("./checkpoints")
///     .max_kept(3)
///     .milestone_every(Duration::from_secs(3600));
///
/// let mut manager = CheckpointManager::new(config, JsonCodec);
///
/// // In training loop:
/// if let Some(path) = manager.maybe_save(epoch, &state)? {
///     println!("Saved checkpoint: {}", path.display());
/// }
///
/// // To resume:
/// let state: TrainingState = manager.restore()?;
/// ```
pub struct CheckpointManager<C> {
    config: CheckpointConfig,
    store: CheckpointStore,
    policy: Box<dyn RetentionPolicy>,
    observer: Box<dyn CheckpointObserver>,
    codec: C,
}

impl<C> CheckpointManager<C> {
    /// Create a new checkpoint manager with the windowed retention policy
    /// described by `config`.
    pub fn new(config: CheckpointConfig, codec: C) -> Self {
        if let Err(e) = std::fs::create_dir_all(&config.storage_dir) {
            tracing::warn!("Failed to create checkpoint directory: {}", e);
        }

        let store = CheckpointStore::new(&config.storage_dir);
        let policy = Box::new(WindowedRetention::new(
            config.max_kept,
            config.milestone_interval,
        ));

        Self {
            config,
            store,
            policy,
            observer: Box::new(NoOpObserver),
            codec,
        }
    }

    /// Replace the retention policy.
    pub fn with_policy(mut self, policy: Box<dyn RetentionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Attach a lifecycle observer.
    pub fn with_observer(mut self, observer: Box<dyn CheckpointObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Get the storage directory path.
    pub fn storage_dir(&self) -> &Path {
        self.store.dir()
    }

    /// Save a checkpoint if the epoch matches the configured cadence.
    ///
    /// Returns the path to the saved checkpoint, or None if no save was
    /// performed.
    pub fn maybe_save<S>(&mut self, epoch: u64, state: &S) -> Result<Option<PathBuf>>
    where
        C: StateCodec<S>,
    {
        if epoch == 0 || epoch % self.config.save_every != 0 {
            return Ok(None);
        }

        self.save(&format!("epoch_{:06}", epoch), state).map(Some)
    }

    /// Save a checkpoint under `stamp`.
    ///
    /// Encodes the state, writes it durably, then lets the retention
    /// policy prune. Files the policy evicts are deleted best-effort: the
    /// desired end state is "file absent", so a file that is already gone
    /// (or cannot be removed right now) never fails the save.
    pub fn save<S>(&mut self, stamp: &str, state: &S) -> Result<PathBuf>
    where
        C: StateCodec<S>,
    {
        let created_at = SystemTime::now();
        let bytes = self.codec.encode(state)?;
        let path = self.store.write(stamp, &bytes)?;
        tracing::info!(path = %path.display(), stamp, "Saved checkpoint");

        let record = CheckpointRecord {
            stamp: stamp.to_string(),
            created_at,
            path: path.clone(),
        };
        self.observer.saved(&record);

        let outcome = self.policy.on_saved(record);

        for milestone in &outcome.graduated {
            tracing::info!(stamp = %milestone.stamp, "Checkpoint kept as milestone");
            self.observer.milestone(milestone);
        }

        for victim in &outcome.evicted {
            match self.store.delete(&victim.path) {
                Ok(()) => tracing::debug!(path = %victim.path.display(), "Removed old checkpoint"),
                Err(e) => {
                    tracing::warn!(path = %victim.path.display(), "Failed to remove old checkpoint: {}", e)
                }
            }
            self.observer.evicted(victim);
        }

        Ok(path)
    }

    /// Restore the most recently created checkpoint.
    pub fn restore<S>(&self) -> Result<S>
    where
        C: StateCodec<S>,
    {
        self.restore_with(&LatestCreated)
    }

    /// Restore the checkpoint chosen by `selector`.
    ///
    /// Fails with `NoCheckpointFound` if nothing exists yet, and with
    /// `CorruptData` if the located file cannot be decoded; corruption is
    /// surfaced to the caller, never skipped.
    pub fn restore_with<S>(&self, selector: &dyn CheckpointSelector) -> Result<S>
    where
        C: StateCodec<S>,
    {
        let path = selector.select(self.store.dir())?;
        let bytes = self.store.read(&path)?;
        let state = self.codec.decode(&bytes)?;

        tracing::info!(path = %path.display(), "Restored checkpoint");
        self.observer.restored(&path);

        Ok(state)
    }

    /// Find the checkpoint the default strategy would restore from.
    pub fn find_latest(&self) -> Result<PathBuf> {
        LatestCreated.select(self.store.dir())
    }

    /// List all checkpoint files in order.
    pub fn list_checkpoints(&self) -> Result<Vec<PathBuf>> {
        self.store.list()
    }
}
