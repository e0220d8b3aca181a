//! Restore-target selection strategies.
//!
//! A selector re-derives "which checkpoint to restore" from the
//! filesystem alone, deliberately ignoring any in-memory bookkeeping, so
//! restore works as a crash-recovery path independent of process memory.

use crate::store::{is_checkpoint_file, CheckpointStore};
use crate::{CheckpointError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Selects which checkpoint file in a storage directory to restore from.
///
/// Any `Fn(&Path) -> Result<PathBuf>` works as a selector, so one-off
/// strategies can be passed as closures.
pub trait CheckpointSelector {
    fn select(&self, dir: &Path) -> Result<PathBuf>;
}

impl<F> CheckpointSelector for F
where
    F: Fn(&Path) -> Result<PathBuf>,
{
    fn select(&self, dir: &Path) -> Result<PathBuf> {
        self(dir)
    }
}

/// Default strategy: the checkpoint with the newest filesystem
/// modification time. Ties are broken by file name so selection stays
/// deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct LatestCreated;

impl CheckpointSelector for LatestCreated {
    fn select(&self, dir: &Path) -> Result<PathBuf> {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CheckpointError::NoCheckpointFound(dir.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };

        let mut candidates: Vec<(SystemTime, PathBuf)> = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(is_checkpoint_file)
                .unwrap_or(false);
            if !matches {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            candidates.push((modified, path));
        }

        candidates.sort();
        candidates
            .pop()
            .map(|(_, path)| path)
            .ok_or_else(|| CheckpointError::NoCheckpointFound(dir.to_path_buf()))
    }
}

/// Selects the checkpoint saved under one specific stamp.
#[derive(Clone, Debug)]
pub struct ByStamp(pub String);

impl ByStamp {
    pub fn new(stamp: impl Into<String>) -> Self {
        Self(stamp.into())
    }
}

impl CheckpointSelector for ByStamp {
    fn select(&self, dir: &Path) -> Result<PathBuf> {
        let path = CheckpointStore::new(dir).stamp_path(&self.0);
        if path.is_file() {
            Ok(path)
        } else {
            Err(CheckpointError::NoCheckpointFound(dir.to_path_buf()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str, modified_secs: u64) -> PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(modified_secs))
            .unwrap();
        path
    }

    #[test]
    fn test_latest_created_picks_newest_mtime() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "old_state.bin", 100);
        let newest = touch(dir.path(), "mid_state.bin", 500);
        touch(dir.path(), "older_state.bin", 50);

        assert_eq!(LatestCreated.select(dir.path()).unwrap(), newest);
    }

    #[test]
    fn test_latest_created_ignores_foreign_files() {
        let dir = tempdir().unwrap();
        let wanted = touch(dir.path(), "epoch_1_state.bin", 10);
        touch(dir.path(), "events.log", 999);

        assert_eq!(LatestCreated.select(dir.path()).unwrap(), wanted);
    }

    #[test]
    fn test_empty_dir_is_no_checkpoint_found() {
        let dir = tempdir().unwrap();

        let err = LatestCreated.select(dir.path()).unwrap_err();
        assert!(matches!(err, CheckpointError::NoCheckpointFound(_)));
    }

    #[test]
    fn test_missing_dir_is_no_checkpoint_found() {
        let dir = tempdir().unwrap();

        let err = LatestCreated
            .select(&dir.path().join("never_created"))
            .unwrap_err();
        assert!(matches!(err, CheckpointError::NoCheckpointFound(_)));
    }

    #[test]
    fn test_by_stamp_finds_exact_file() {
        let dir = tempdir().unwrap();
        let wanted = touch(dir.path(), "epoch_3_state.bin", 10);
        touch(dir.path(), "epoch_9_state.bin", 99);

        assert_eq!(ByStamp::new("epoch_3").select(dir.path()).unwrap(), wanted);
    }

    #[test]
    fn test_by_stamp_missing_is_no_checkpoint_found() {
        let dir = tempdir().unwrap();

        let err = ByStamp::new("epoch_3").select(dir.path()).unwrap_err();
        assert!(matches!(err, CheckpointError::NoCheckpointFound(_)));
    }

    #[test]
    fn test_closure_selector() {
        let dir = tempdir().unwrap();
        let wanted = touch(dir.path(), "epoch_1_state.bin", 10);

        let selector = |d: &Path| Ok(d.join("epoch_1_state.bin"));
        assert_eq!(selector.select(dir.path()).unwrap(), wanted);
    }
}
