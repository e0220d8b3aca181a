//! State codec seam.
//!
//! The manager never inspects the state it persists; it moves bytes
//! produced and consumed by a caller-supplied [`StateCodec`].

use crate::{CheckpointError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serializes an opaque state object to and from bytes.
///
/// Decode failures must map to [`CheckpointError::CorruptData`] so the
/// manager can distinguish corruption from other I/O failures.
///
/// # Example
///
/// ```ignore
/// struct RawCodec;
///
/// impl StateCodec<Vec<u8>> for RawCodec {
///     fn encode(&self, state: &Vec<u8>) -> Result<Vec<u8>> {
///         Ok(state.clone())
///     }
///
///     fn decode(&self, bytes: &[u8]) -> Result<Vec<u8>> {
///         Ok(bytes.to_vec())
///     }
/// }
/// ```
pub trait StateCodec<S> {
    /// Serialize the state to bytes.
    fn encode(&self, state: &S) -> Result<Vec<u8>>;

    /// Restore the state from bytes.
    fn decode(&self, bytes: &[u8]) -> Result<S>;
}

/// JSON codec over serde for any serializable state type.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl<S> StateCodec<S> for JsonCodec
where
    S: Serialize + DeserializeOwned,
{
    fn encode(&self, state: &S) -> Result<Vec<u8>> {
        serde_json::to_vec(state).map_err(|e| CheckpointError::CorruptData(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<S> {
        serde_json::from_slice(bytes).map_err(|e| CheckpointError::CorruptData(e.to_string()))
    }
}
