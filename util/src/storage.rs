//! On-disk media storage for uploaded images and resumes.
//!
//! Files live under `{MEDIA_STORAGE_ROOT}/{folder}/{uuid}.{ext}` and are served
//! by the API at `/uploads/{folder}/{file}`. The URL handed back to clients is
//! prefixed with `PUBLIC_URL`.

use crate::config;
use std::{
    io,
    path::{Path, PathBuf},
};
use uuid::Uuid;

/// URL path segment the API mounts the storage root under.
pub const UPLOADS_MOUNT: &str = "/uploads";

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    std::fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Resolves a possibly relative root against the current directory.
fn absolute_root(root: &str) -> PathBuf {
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// A file written by [`MediaStorage::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path relative to the storage root, always `/`-separated.
    pub relative_path: String,
    /// Public URL of the file.
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    public_base: String,
}

impl MediaStorage {
    pub fn new(root: impl AsRef<Path>, public_base: impl Into<String>) -> Self {
        let base: String = public_base.into();
        Self {
            root: root.as_ref().to_path_buf(),
            public_base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the storage from `MEDIA_STORAGE_ROOT` and `PUBLIC_URL`.
    pub fn from_config() -> Self {
        Self::new(
            absolute_root(&config::media_storage_root()),
            config::public_url(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` to a fresh file in `folder` and returns its location.
    ///
    /// `extension` is used verbatim (without the leading dot).
    pub async fn store(
        &self,
        folder: &str,
        extension: &str,
        bytes: &[u8],
    ) -> io::Result<StoredFile> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{}", Uuid::new_v4().simple(), extension);
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        let relative_path = format!("{folder}/{file_name}");
        let url = format!("{}{}/{}", self.public_base, UPLOADS_MOUNT, relative_path);
        tracing::debug!(path = %relative_path, size = bytes.len(), "Stored media file");

        Ok(StoredFile { relative_path, url })
    }

    /// Maps a public URL produced by this storage back to its file on disk.
    ///
    /// Returns `None` for foreign URLs and for paths that try to escape the root.
    pub fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let prefix = format!("{}{}/", self.public_base, UPLOADS_MOUNT);
        let relative = url.strip_prefix(&prefix)?;
        if relative.is_empty() || relative.split('/').any(|seg| seg == ".." || seg.is_empty()) {
            return None;
        }
        Some(self.root.join(relative))
    }

    /// Deletes a previously stored file. Missing files and foreign URLs are ignored.
    pub async fn remove(&self, url: &str) {
        let Some(path) = self.path_for_url(url) else {
            return;
        };
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(error = %e, path = %path.display(), "Failed to remove media file");
            }
        }
    }
}
