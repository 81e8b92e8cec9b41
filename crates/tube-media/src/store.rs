//! Media store trait and the local filesystem implementation

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::MediaError;

/// Result of a successful ingestion
#[derive(Debug, Clone, PartialEq)]
pub struct MediaUpload {
    /// Canonical URL of the stored object
    pub url: String,
    /// Container duration in seconds, when the backing store can report it
    pub duration_seconds: Option<f64>,
}

/// Object storage contract for media files
///
/// `upload` consumes the staged temporary file: implementations must remove
/// it regardless of outcome, so a failed ingestion never leaves stray files
/// in the staging directory.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Move a staged local file into the store and return its canonical URL
    async fn upload(&self, local_path: &Path) -> Result<MediaUpload, MediaError>;

    /// Remove a stored object by the URL `upload` returned
    async fn delete(&self, url: &str) -> Result<(), MediaError>;
}

/// Filesystem-backed media store
///
/// Objects are stored flat under `root_dir` with UUID names, keeping the
/// original extension so content types stay guessable. URLs are
/// `{public_base_url}/{file_name}`.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root_dir: PathBuf,
    public_base_url: String,
    max_size: u64,
}

impl LocalMediaStore {
    /// Create the store, ensuring the root directory exists
    pub async fn new(
        root_dir: PathBuf,
        public_base_url: String,
        max_size: u64,
    ) -> Result<Self, MediaError> {
        fs::create_dir_all(&root_dir)
            .await
            .map_err(|e| MediaError::storage("failed to create media root", e))?;

        info!(path = %root_dir.display(), "Media store initialized");

        Ok(Self {
            root_dir,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            max_size,
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Object path for a URL previously returned by `upload`.
    /// Only bare file names are accepted; path traversal is rejected.
    fn object_path(&self, url: &str) -> Result<PathBuf, MediaError> {
        let name = url
            .strip_prefix(&self.public_base_url)
            .map(|rest| rest.trim_start_matches('/'))
            .ok_or_else(|| MediaError::ObjectNotFound(url.to_string()))?;

        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Err(MediaError::ObjectNotFound(url.to_string()));
        }
        Ok(self.root_dir.join(name))
    }

    fn object_name(local_path: &Path) -> String {
        let id = Uuid::new_v4();
        match local_path.extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() => format!("{id}.{}", ext.to_lowercase()),
            _ => id.to_string(),
        }
    }

    async fn ingest(&self, local_path: &Path) -> Result<MediaUpload, MediaError> {
        let metadata = fs::metadata(local_path)
            .await
            .map_err(|_| MediaError::FileNotFound(local_path.to_path_buf()))?;

        if metadata.len() > self.max_size {
            return Err(MediaError::FileTooLarge {
                size: metadata.len(),
                max: self.max_size,
            });
        }

        let mime = mime_guess::from_path(local_path).first_or_octet_stream();
        let kind = mime.type_();
        if kind != mime_guess::mime::IMAGE && kind != mime_guess::mime::VIDEO {
            return Err(MediaError::UnsupportedType(mime.essence_str().to_string()));
        }

        let name = Self::object_name(local_path);
        let dest = self.root_dir.join(&name);

        // Copy rather than rename: the staging dir may live on another filesystem
        fs::copy(local_path, &dest)
            .await
            .map_err(|e| MediaError::storage("failed to store media object", e))?;

        debug!(object = %name, size = metadata.len(), mime = %mime, "Stored media object");

        Ok(MediaUpload {
            url: format!("{}/{name}", self.public_base_url),
            // The filesystem cannot probe container metadata; remote stores
            // that can (e.g. a transcoding CDN) fill this in
            duration_seconds: None,
        })
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(&self, local_path: &Path) -> Result<MediaUpload, MediaError> {
        let result = self.ingest(local_path).await;

        // The staged temp file is consumed on success and failure alike
        if let Err(e) = fs::remove_file(local_path).await {
            if result.is_ok() {
                warn!(path = %local_path.display(), error = %e, "Failed to remove staged upload");
            }
        }

        result
    }

    async fn delete(&self, url: &str) -> Result<(), MediaError> {
        let path = self.object_path(url)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(url = %url, "Deleted media object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(MediaError::ObjectNotFound(url.to_string()))
            }
            Err(e) => Err(MediaError::storage("failed to delete media object", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store(name: &str) -> (LocalMediaStore, PathBuf) {
        let base = std::env::temp_dir().join(format!("tube-media-test-{name}-{}", Uuid::new_v4()));
        let staging = base.join("staging");
        fs::create_dir_all(&staging).await.unwrap();
        let store = LocalMediaStore::new(base.join("objects"), "/media".to_string(), 1024 * 1024)
            .await
            .unwrap();
        (store, staging)
    }

    async fn stage_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_upload_moves_file_and_returns_url() {
        let (store, staging) = test_store("upload").await;
        let temp = stage_file(&staging, "clip.mp4", b"fake video bytes").await;

        let upload = store.upload(&temp).await.unwrap();

        assert!(upload.url.starts_with("/media/"));
        assert!(upload.url.ends_with(".mp4"));
        assert_eq!(upload.duration_seconds, None);
        // Temp file consumed
        assert!(!temp.exists());
        // Object landed in the store
        let object = store.object_path(&upload.url).unwrap();
        assert_eq!(fs::read(object).await.unwrap(), b"fake video bytes");
    }

    #[tokio::test]
    async fn test_upload_failure_still_removes_temp_file() {
        let (store, staging) = test_store("cleanup").await;
        let temp = stage_file(&staging, "notes.txt", b"not media").await;

        let result = store.upload(&temp).await;

        assert!(matches!(result, Err(MediaError::UnsupportedType(_))));
        assert!(!temp.exists(), "temp file must be removed on failure too");
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_file() {
        let base = std::env::temp_dir().join(format!("tube-media-test-size-{}", Uuid::new_v4()));
        fs::create_dir_all(&base).await.unwrap();
        let store = LocalMediaStore::new(base.join("objects"), "/media".to_string(), 8)
            .await
            .unwrap();
        let temp = stage_file(&base, "big.png", &[0u8; 64]).await;

        let result = store.upload(&temp).await;
        assert!(matches!(result, Err(MediaError::FileTooLarge { size: 64, max: 8 })));
        assert!(!temp.exists());
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let (store, staging) = test_store("missing").await;
        let result = store.upload(&staging.join("nope.png")).await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_roundtrip() {
        let (store, staging) = test_store("delete").await;
        let temp = stage_file(&staging, "pic.png", b"png bytes").await;
        let upload = store.upload(&temp).await.unwrap();

        store.delete(&upload.url).await.unwrap();
        assert!(matches!(
            store.delete(&upload.url).await,
            Err(MediaError::ObjectNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_rejects_traversal() {
        let (store, _staging) = test_store("traversal").await;
        assert!(matches!(
            store.delete("/media/../etc/passwd").await,
            Err(MediaError::ObjectNotFound(_))
        ));
        assert!(matches!(
            store.delete("/elsewhere/file.png").await,
            Err(MediaError::ObjectNotFound(_))
        ));
    }
}
