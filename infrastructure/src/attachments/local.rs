//! Attachment store on the local filesystem.
//!
//! Files are written under one directory with a collision-free name made of
//! a timestamp, a per-process sequence number and the sanitized original
//! file name.

use async_trait::async_trait;
use award_application::{AttachmentError, AttachmentStore};
use award_domain::{StoredFile, Upload};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

pub struct LocalAttachmentStore {
    directory: PathBuf,
    sequence: AtomicU64,
}

impl LocalAttachmentStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn target_path(&self, file_name: &str) -> PathBuf {
        let sanitized: String = Path::new(file_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let stamp = chrono::Utc::now().timestamp_millis();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.directory
            .join(format!("{}-{}-{}", stamp, seq, sanitized))
    }
}

#[async_trait]
impl AttachmentStore for LocalAttachmentStore {
    async fn save(&self, upload: &Upload) -> Result<StoredFile, AttachmentError> {
        let path = self.target_path(&upload.file_name);
        let write_err = |source| AttachmentError::Write {
            file: upload.file_name.clone(),
            source,
        };

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(write_err)?;
        tokio::fs::write(&path, &upload.content)
            .await
            .map_err(write_err)?;

        debug!("Stored {} at {}", upload.file_name, path.display());
        Ok(StoredFile {
            file_type: upload.extension().unwrap_or_default(),
            file_size: upload.size(),
            file_path: path.to_string_lossy().into_owned(),
        })
    }

    async fn remove(&self, file: &StoredFile) -> Result<(), AttachmentError> {
        match tokio::fs::remove_file(&file.file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(AttachmentError::Remove {
                file: file.file_path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAttachmentStore::new(dir.path().join("uploads"));

        let stored = store
            .save(&Upload::new("Transcript 2025.PDF", b"%PDF-1.7".to_vec()))
            .await
            .unwrap();
        assert_eq!(stored.file_type, "pdf");
        assert_eq!(stored.file_size, 8);
        assert!(stored.file_path.ends_with("Transcript_2025.PDF"));
        assert!(Path::new(&stored.file_path).exists());

        store.remove(&stored).await.unwrap();
        assert!(!Path::new(&stored.file_path).exists());

        // Removing twice is fine
        store.remove(&stored).await.unwrap();
    }

    #[tokio::test]
    async fn test_same_name_gets_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAttachmentStore::new(dir.path());
        let a = store.save(&Upload::new("a.pdf", vec![1])).await.unwrap();
        let b = store.save(&Upload::new("a.pdf", vec![2])).await.unwrap();
        assert_ne!(a.file_path, b.file_path);
    }

    #[tokio::test]
    async fn test_path_components_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAttachmentStore::new(dir.path());
        let stored = store
            .save(&Upload::new("../../etc/passwd.pdf", vec![0]))
            .await
            .unwrap();
        assert!(Path::new(&stored.file_path).starts_with(dir.path()));
    }
}
