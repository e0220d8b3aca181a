//! Ready-made training state blob.

use serde::{Deserialize, Serialize};

/// A complete training snapshot a training loop can persist as-is.
///
/// The manager itself treats state as opaque bytes; this struct is a
/// convenience for the common case of bundling model weights, trainer
/// internals, and RNG seeding into one codec-compatible value.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrainingState {
    /// Training epoch the snapshot was taken at.
    pub epoch: u64,
    /// Serialized model weights.
    pub model_state: Vec<u8>,
    /// Serialized trainer internals (optimizer, scheduler, counters).
    pub trainer_state: Vec<u8>,
    /// RNG seed to reproduce the data order after resuming.
    pub rng_seed: Option<u64>,
}

impl TrainingState {
    /// Create an empty snapshot for the given epoch.
    pub fn new(epoch: u64) -> Self {
        Self {
            epoch,
            ..Default::default()
        }
    }

    /// Set the model weights.
    pub fn with_model_state(mut self, bytes: Vec<u8>) -> Self {
        self.model_state = bytes;
        self
    }

    /// Set the trainer internals.
    pub fn with_trainer_state(mut self, bytes: Vec<u8>) -> Self {
        self.trainer_state = bytes;
        self
    }

    /// Set the RNG seed.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}
