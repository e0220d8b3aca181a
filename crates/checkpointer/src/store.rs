//! Checkpoint file storage.
//!
//! Owns the storage directory, derives file names from caller-supplied
//! stamps, and performs atomic writes and tolerant deletes.

use crate::{CheckpointError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffix every checkpoint file carries: `<stamp>_state.bin`.
pub const STATE_FILE_SUFFIX: &str = "_state.bin";

/// Returns true if `name` follows the checkpoint naming convention.
pub fn is_checkpoint_file(name: &str) -> bool {
    name.len() > STATE_FILE_SUFFIX.len() && name.ends_with(STATE_FILE_SUFFIX)
}

/// Owns a storage directory of checkpoint files.
///
/// File names are derived deterministically from stamps, so re-saving the
/// same stamp overwrites rather than duplicates. Writes go to a temporary
/// file in the same directory and are renamed into place after a flush and
/// sync, so a partial write is never visible under a checkpoint name.
#[derive(Clone, Debug)]
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    /// Create a store rooted at `dir`. The directory itself is created
    /// lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The path a checkpoint with this stamp is stored at.
    pub fn stamp_path(&self, stamp: &str) -> PathBuf {
        self.dir.join(format!("{}{}", stamp, STATE_FILE_SUFFIX))
    }

    /// Durably write a checkpoint blob, returning its final path.
    ///
    /// The returned path exists and holds the full blob once this returns
    /// `Ok`; on any error the previous file under this stamp (if any) is
    /// left untouched.
    pub fn write(&self, stamp: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let path = self.stamp_path(stamp);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)
            .map_err(|e| CheckpointError::StorageIo(e.error))?;

        Ok(path)
    }

    /// Read a checkpoint blob.
    ///
    /// Fails with [`CheckpointError::NotFound`] if the path is absent and
    /// [`CheckpointError::StorageIo`] for any other filesystem failure.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CheckpointError::NotFound(path.to_path_buf()),
            _ => CheckpointError::StorageIo(e),
        })
    }

    /// Remove a checkpoint file.
    ///
    /// Deleting a missing file is a no-op: a previous run may already have
    /// cleaned it up, or a crash may have left bookkeeping inconsistent
    /// with disk state.
    pub fn delete(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// List all checkpoint files in the storage directory, sorted by name.
    ///
    /// A missing directory yields an empty list, not an error.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(e) => e,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut checkpoints: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(is_checkpoint_file)
                    .unwrap_or(false)
            })
            .collect();

        checkpoints.sort();
        Ok(checkpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path());

        let path = store.write("epoch_1", &[1, 2, 3]).unwrap();
        assert_eq!(path, dir.path().join("epoch_1_state.bin"));
        assert_eq!(store.read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_write_creates_missing_dir() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("nested/checkpoints"));

        let path = store.write("a", &[0]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_same_stamp_overwrites() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path());

        let first = store.write("epoch_1", &[1]).unwrap();
        let second = store.write("epoch_1", &[2, 2]).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.read(&second).unwrap(), vec![2, 2]);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path());

        let err = store.read(&dir.path().join("ghost_state.bin")).unwrap_err();
        assert!(matches!(err, CheckpointError::NotFound(_)));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path());

        store.delete(&dir.path().join("ghost_state.bin")).unwrap();
    }

    #[test]
    fn test_list_filters_and_sorts() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path());

        store.write("b", &[1]).unwrap();
        store.write("a", &[1]).unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(
            listed,
            vec![
                dir.path().join("a_state.bin"),
                dir.path().join("b_state.bin"),
            ]
        );
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("never_created"));

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_bare_suffix_does_not_match_convention() {
        assert!(is_checkpoint_file("epoch_1_state.bin"));
        assert!(!is_checkpoint_file("_state.bin"));
        assert!(!is_checkpoint_file("epoch_1.bin"));
    }
}
