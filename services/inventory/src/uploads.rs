//! On-disk storage for uploaded photos

use std::io;
use std::sync::Arc;

use bytes::Bytes;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;

use crate::item::Attachment;

/// A file received from a client, not yet stored.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Filename supplied by the client
    pub file_name: String,
    /// File contents
    pub data: Bytes,
}

impl Upload {
    /// Browsers send an empty, unnamed file part when no file was chosen.
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() && self.data.is_empty()
    }
}

/// Directory of uploaded photo files.
///
/// Files get random names; items only keep an [`Attachment`] pointing here.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: Utf8PathBuf,
    #[allow(unused)]
    dir: Option<Arc<TempDir>>,
}

impl UploadStore {
    /// Store uploads under `root`, creating it if needed.
    pub async fn new(root: impl Into<Utf8PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root, dir: None })
    }

    /// Store uploads in a private temporary directory, removed once every
    /// clone of the store is dropped.
    pub fn temporary() -> io::Result<Self> {
        let tmp = TempDir::with_prefix("inventory-uploads-")?;
        let root = Utf8Path::from_path(tmp.path())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "temporary dir is not utf-8")
            })?
            .to_owned();

        Ok(Self {
            root,
            dir: Some(Arc::new(tmp)),
        })
    }

    /// Directory holding the stored files
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write an upload to a fresh file and return a reference to it.
    #[tracing::instrument(skip(self, upload), fields(file_name = %upload.file_name))]
    pub async fn save(&self, upload: Upload) -> io::Result<Attachment> {
        let path = self.root.join(uuid::Uuid::new_v4().simple().to_string());

        let mut writer = tokio::io::BufWriter::new(tokio::fs::File::create(&path).await?);
        writer.write_all(&upload.data).await?;
        writer.shutdown().await?;

        tracing::debug!(%path, size = upload.data.len(), "stored upload");
        Ok(Attachment {
            path,
            file_name: upload.file_name,
            size: upload.data.len() as u64,
        })
    }

    /// Open a stored file for reading.
    pub async fn open(&self, attachment: &Attachment) -> io::Result<tokio::fs::File> {
        tokio::fs::File::open(&attachment.path).await
    }

    /// Delete a stored file. Failures are logged, never returned.
    pub async fn discard(&self, attachment: Attachment) {
        if let Err(error) = tokio::fs::remove_file(&attachment.path).await {
            tracing::warn!(path = %attachment.path, %error, "failed to remove stored upload");
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;

    use super::*;

    fn upload(name: &str, data: &'static [u8]) -> Upload {
        Upload {
            file_name: name.to_string(),
            data: Bytes::from_static(data),
        }
    }

    #[tokio::test]
    async fn test_save_and_open() {
        let store = UploadStore::temporary().unwrap();
        let attachment = store.save(upload("cat.jpg", b"meow")).await.unwrap();

        assert_eq!(attachment.file_name, "cat.jpg");
        assert_eq!(attachment.size, 4);
        assert!(attachment.path().starts_with(store.root()));

        let mut file = store.open(&attachment).await.unwrap();
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).await.unwrap();
        assert_eq!(contents, b"meow");
    }

    #[tokio::test]
    async fn test_saves_use_distinct_paths() {
        let store = UploadStore::temporary().unwrap();
        let first = store.save(upload("a.jpg", b"1")).await.unwrap();
        let second = store.save(upload("a.jpg", b"2")).await.unwrap();
        assert_ne!(first.path(), second.path());
    }

    #[tokio::test]
    async fn test_discard_removes_file() {
        let store = UploadStore::temporary().unwrap();
        let attachment = store.save(upload("a.jpg", b"1")).await.unwrap();
        store.discard(attachment.clone()).await;

        let err = store.open(&attachment).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        // A second discard only logs.
        store.discard(attachment).await;
    }

    #[tokio::test]
    async fn test_new_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap().join("nested/uploads");
        let store = UploadStore::new(root.clone()).await.unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn test_empty_upload() {
        assert!(upload("", b"").is_empty());
        assert!(!upload("a.jpg", b"").is_empty());
    }
}
