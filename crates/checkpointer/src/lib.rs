//! # Checkpointer
//!
//! Checkpoint lifecycle management for long-running training loops.
//!
//! ## Overview
//!
//! Checkpointer provides:
//! - `CheckpointManager` for saving and restoring opaque training state
//! - Bounded disk usage via a rolling retention window with time-based
//!   milestone preservation
//! - Crash-safe atomic writes (a partial write is never visible as a
//!   valid checkpoint)
//! - Pluggable codecs, restore selectors, and lifecycle observers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkpointer::prelude::*;
//! use std::time::Duration;
//!
//! let config = CheckpointConfig::new("./checkpoints")
//!     .max_kept(5)
//!     .milestone_every(Duration::from_secs(3600));
//! let mut manager = CheckpointManager::new(config, JsonCodec);
//!
//! // In the training loop:
//! let state = TrainingState::new(epoch).with_model_state(weights);
//! manager.save(&format!("epoch_{}", epoch), &state)?;
//!
//! // To resume:
//! let state: TrainingState = manager.restore()?;
//! ```
//!
//! Saving and restoring against the same storage directory must be
//! serialized by the caller; see [`CheckpointManager`] for the
//! single-writer precondition.

pub mod codec;
pub mod events;
pub mod locate;
pub mod manager;
pub mod retention;
pub mod state;
pub mod store;

use std::path::PathBuf;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::{JsonCodec, StateCodec};
    pub use crate::events::{
        CheckpointObserver, CompositeObserver, ConsoleObserver, NoOpObserver,
    };
    pub use crate::locate::{ByStamp, CheckpointSelector, LatestCreated};
    pub use crate::manager::{CheckpointConfig, CheckpointManager};
    pub use crate::retention::{
        CheckpointRecord, KeepAll, RetentionOutcome, RetentionPolicy, WindowedRetention,
    };
    pub use crate::state::TrainingState;
    pub use crate::store::CheckpointStore;
    pub use crate::{CheckpointError, Result};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    /// A specific checkpoint file was expected but is absent. Recoverable:
    /// typically means "nothing to restore yet".
    #[error("checkpoint not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The locator found no checkpoint matching the naming convention.
    /// Same recoverability as [`CheckpointError::NotFound`].
    #[error("no checkpoint found in {}", .0.display())]
    NoCheckpointFound(PathBuf),

    /// Bytes were present but could not be decoded. Never silently
    /// retried or skipped: it indicates data loss.
    #[error("corrupt checkpoint data: {0}")]
    CorruptData(String),

    /// Disk full, permission denied, etc. Fatal to the current call.
    #[error("storage I/O error: {0}")]
    StorageIo(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CheckpointError>;
