//! Image storage for font reference pictures.
//!
//! Uploaded files are stored flat under a generated name and addressed by a
//! public URL whose last path segment is that name. Fonts only keep the URL,
//! so the name is recovered with [`filename_from_url`] when images are
//! deleted or garbage-collected.

mod cleanup;
mod file;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use cleanup::{CleanupReport, cleanup_orphans};
pub use file::FileImageStore;
pub use memory::InMemoryImageStore;

use crate::VaultError;

/// Upload size limit: 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix the server mounts stored images under.
pub const DEFAULT_PUBLIC_PREFIX: &str = "/storage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores `bytes` under `filename`. Never overwrites: an existing name is
    /// a `VaultError::Storage`.
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredImage, VaultError>;

    fn public_url(&self, filename: &str) -> String;

    /// Missing names are skipped silently.
    async fn remove(&self, filenames: &[String]) -> Result<(), VaultError>;

    async fn fetch(&self, filename: &str) -> Result<Option<ImageObject>, VaultError>;

    /// Every stored name.
    async fn list(&self) -> Result<Vec<String>, VaultError>;
}

/// Replaces every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `{unix_millis}-{sanitized original}`.
pub fn stored_name(original: &str, unix_millis: i64) -> String {
    format!("{unix_millis}-{}", sanitize_filename(original))
}

/// Last path segment of an image URL.
pub fn filename_from_url(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Rejects names that could address anything outside the store.
pub(crate) fn check_name(filename: &str) -> Result<(), VaultError> {
    let valid = !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(VaultError::Validation(format!("invalid image name: {filename:?}")))
    }
}

pub(crate) fn join_url(prefix: &str, filename: &str) -> String {
    format!("{}/{filename}", prefix.trim_end_matches('/'))
}
