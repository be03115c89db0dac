//! Byte-storage seam.
//!
//! The pipeline only ever calls [`ByteStore::exists`] and
//! [`ByteStore::open`]; `save`/`delete` belong to the upload-orchestration
//! layer. The backend must be safe for concurrent reads.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::types::UploadRequest;

/// Asynchronous access to stored upload bytes.
#[async_trait]
pub trait ByteStore: Send + Sync {
    /// True if `path` currently exists in the store.
    async fn exists(&self, path: &Path) -> bool;

    /// Read the full contents stored at `path`.
    async fn open(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Persist an upload's content; returns the stored path.
    ///
    /// Callers must validate the request first; the file name is used as-is
    /// within the store root.
    async fn save(&self, request: &UploadRequest) -> io::Result<PathBuf>;

    /// Remove the file stored at `path`.
    async fn delete(&self, path: &Path) -> io::Result<()>;
}

/// Filesystem-backed store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl ByteStore for FsStore {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(self.resolve(path)).await.unwrap_or(false)
    }

    async fn open(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.resolve(path)).await
    }

    async fn save(&self, request: &UploadRequest) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(&request.file_name);
        tokio::fs::write(&path, &request.content).await?;
        Ok(path)
    }

    async fn delete(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(self.resolve(path)).await
    }
}
