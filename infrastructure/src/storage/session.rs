//! Locked access to the state snapshot.
//!
//! Each CLI invocation loads the whole snapshot, runs one command and
//! writes it back. A second process doing the same in between would
//! overwrite the first one's changes, so a [`StateSession`] holds an
//! exclusive lock on a sibling `.lock` file from load until it is dropped.

use super::memory::InMemoryAwardStore;
use award_application::{AttachmentStore, RepositoryError};
use award_domain::StoredFile;
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Exclusive inter-process lock guarding one state file
#[derive(Debug)]
pub struct StateLock {
    // Released when the file handle is closed
    _file: File,
    path: PathBuf,
}

impl StateLock {
    /// `award.json` is guarded by `award.json.lock`
    pub fn lock_path(state_path: &Path) -> PathBuf {
        let mut name = OsString::from(state_path.as_os_str());
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Wait until the lock is free, then take it
    pub async fn acquire(state_path: &Path) -> Result<Self, RepositoryError> {
        let path = Self::lock_path(state_path);
        tokio::task::spawn_blocking(move || -> Result<Self, RepositoryError> {
            let file = open_lock_file(&path)?;
            FileExt::lock_exclusive(&file).map_err(|e| lock_error(&path, e))?;
            debug!("Acquired state lock {}", path.display());
            Ok(Self { _file: file, path })
        })
        .await
        .map_err(|e| RepositoryError::Storage(format!("state lock task failed: {}", e)))?
    }

    /// Take the lock if no other holder has it
    pub fn try_acquire(state_path: &Path) -> Result<Option<Self>, RepositoryError> {
        let path = Self::lock_path(state_path);
        let file = open_lock_file(&path)?;
        match FileExt::try_lock_exclusive(&file) {
            Ok(()) => Ok(Some(Self { _file: file, path })),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(lock_error(&path, e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_lock_file(path: &Path) -> Result<File, RepositoryError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| lock_error(path, e))?;
    }
    OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(path)
        .map_err(|e| lock_error(path, e))
}

fn lock_error(path: &Path, e: std::io::Error) -> RepositoryError {
    RepositoryError::Storage(format!("locking {}: {}", path.display(), e))
}

/// A store loaded under the state lock, saved back by [`StateSession::commit`]
pub struct StateSession {
    store: Arc<InMemoryAwardStore>,
    path: PathBuf,
    _lock: StateLock,
}

impl StateSession {
    /// Lock the state file, then load it
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let lock = StateLock::acquire(&path).await?;
        let store = InMemoryAwardStore::load(&path).await?;
        Ok(Self {
            store: Arc::new(store),
            path,
            _lock: lock,
        })
    }

    pub fn store(&self) -> Arc<InMemoryAwardStore> {
        self.store.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save the state and release the lock.
    ///
    /// `written` lists files stored for this session's changes. They are
    /// only referenced by the unsaved state, so a failed save removes them.
    pub async fn commit(
        self,
        written: &[StoredFile],
        attachments: &dyn AttachmentStore,
    ) -> Result<(), RepositoryError> {
        let result = self.store.save(&self.path).await;
        if result.is_err() {
            for file in written {
                if let Err(e) = attachments.remove(file).await {
                    warn!("Could not remove {} after failed save: {}", file.file_path, e);
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::LocalAttachmentStore;
    use award_domain::Upload;

    #[test]
    fn test_lock_path_is_a_sibling() {
        assert_eq!(
            StateLock::lock_path(Path::new("state/award.json")),
            PathBuf::from("state/award.json.lock")
        );
    }

    #[tokio::test]
    async fn test_lock_is_exclusive_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("award.json");

        let held = StateLock::acquire(&path).await.unwrap();
        assert!(StateLock::try_acquire(&path).unwrap().is_none());

        drop(held);
        assert!(StateLock::try_acquire(&path).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_commit_removes_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("award.json");
        let attachments = LocalAttachmentStore::new(dir.path().join("uploads"));
        let stored = attachments
            .save(&Upload::new("letter.pdf", b"%PDF".to_vec()))
            .await
            .unwrap();
        assert!(Path::new(&stored.file_path).exists());

        let session = StateSession::open(&path).await.unwrap();
        // The snapshot is written through this temporary path
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

        let result = session.commit(&[stored.clone()], &attachments).await;
        assert!(matches!(result, Err(RepositoryError::Storage(_))));
        assert!(!Path::new(&stored.file_path).exists());
    }

    #[tokio::test]
    async fn test_successful_commit_keeps_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("award.json");
        let attachments = LocalAttachmentStore::new(dir.path().join("uploads"));
        let stored = attachments
            .save(&Upload::new("letter.pdf", b"%PDF".to_vec()))
            .await
            .unwrap();

        let session = StateSession::open(&path).await.unwrap();
        session.commit(&[stored.clone()], &attachments).await.unwrap();

        assert!(Path::new(&stored.file_path).exists());
        assert!(path.exists());
        assert!(StateLock::try_acquire(&path).unwrap().is_some());
    }
}
