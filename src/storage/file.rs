use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::{DEFAULT_PUBLIC_PREFIX, ImageObject, ImageStore, StoredImage, check_name, join_url};
use crate::VaultError;

/// Images as plain files in one directory.
#[derive(Debug, Clone)]
pub struct FileImageStore {
    directory: PathBuf,
    prefix: String,
}

impl FileImageStore {
    pub async fn open(directory: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let directory = directory.into();
        tokio::fs::create_dir_all(&directory).await.map_err(|e| {
            VaultError::Storage(format!("cannot create {}: {e}", directory.display()))
        })?;

        log::info!(target: "fontvault::storage", "msg=\"image directory opened\" dir=\"{}\"", directory.display());

        Ok(Self {
            directory,
            prefix: DEFAULT_PUBLIC_PREFIX.to_owned(),
        })
    }

    #[must_use]
    pub fn with_public_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Writes `bytes` through `writer`, removing the file at `path` when any part of
/// the write fails so that no truncated image is left behind.
async fn write_or_discard<W>(path: &Path, writer: &mut W, bytes: &[u8]) -> Result<(), VaultError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    let written = match writer.write_all(bytes).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };
    let Err(e) = written else {
        return Ok(());
    };

    if let Err(remove) = tokio::fs::remove_file(path).await {
        log::warn!(
            target: "fontvault::storage",
            "msg=\"partial image not removed\" path=\"{}\" error=\"{remove}\"",
            path.display()
        );
    }
    Err(VaultError::Storage(format!("write {}: {e}", path.display())))
}

#[async_trait]
impl ImageStore for FileImageStore {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredImage, VaultError> {
        check_name(filename)?;
        let path = self.directory.join(filename);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => VaultError::Storage(format!("{filename} already exists")),
                _ => VaultError::Storage(format!("create {}: {e}", path.display())),
            })?;
        write_or_discard(&path, &mut file, bytes).await?;

        log::debug!(
            target: "fontvault::storage",
            "msg=\"image stored\" filename=\"{filename}\" content_type=\"{content_type}\" bytes={}",
            bytes.len()
        );

        Ok(StoredImage {
            url: self.public_url(filename),
            filename: filename.to_owned(),
        })
    }

    fn public_url(&self, filename: &str) -> String {
        join_url(&self.prefix, filename)
    }

    async fn remove(&self, filenames: &[String]) -> Result<(), VaultError> {
        let mut failures = Vec::new();
        for name in filenames {
            if let Err(e) = check_name(name) {
                failures.push(e.to_string());
                continue;
            }
            match tokio::fs::remove_file(self.directory.join(name)).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => failures.push(format!("{name}: {e}")),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(VaultError::Storage(failures.join("; ")))
        }
    }

    async fn fetch(&self, filename: &str) -> Result<Option<ImageObject>, VaultError> {
        if check_name(filename).is_err() {
            return Ok(None);
        }
        match tokio::fs::read(self.directory.join(filename)).await {
            Ok(bytes) => Ok(Some(ImageObject {
                content_type: content_type_for(filename).to_owned(),
                bytes,
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::Storage(format!("read {filename}: {e}"))),
        }
    }

    async fn list(&self) -> Result<Vec<String>, VaultError> {
        let mut entries = tokio::fs::read_dir(&self.directory)
            .await
            .map_err(|e| VaultError::Storage(format!("list {}: {e}", self.directory.display())))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| VaultError::Storage(e.to_string()))?
        {
            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                names.push(name.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
