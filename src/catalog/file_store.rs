use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{Font, FontRepository, FontUpdate, NewFont};
use crate::VaultError;

/// Catalog persisted as one JSON document per font under `directory`.
///
/// Writes are serialized through a process-local lock. Running two
/// processes against the same directory is not supported.
#[derive(Debug, Clone)]
pub struct FileFontRepository {
    directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileFontRepository {
    /// Creates `directory` if it does not exist yet.
    pub async fn open(directory: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let directory = directory.into();
        tokio::fs::create_dir_all(&directory).await.map_err(|e| {
            VaultError::Database(format!("cannot create {}: {e}", directory.display()))
        })?;

        log::info!(target: "fontvault::catalog", "msg=\"file catalog opened\" dir=\"{}\"", directory.display());

        Ok(Self {
            directory,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        is_valid_id(id).then(|| self.directory.join(format!("{id}.json")))
    }

    async fn read(&self, path: &Path) -> Result<Option<Font>, VaultError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(VaultError::Database(format!("read {}: {e}", path.display()))),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| VaultError::Database(format!("corrupt record {}: {e}", path.display())))
    }

    async fn write(&self, font: &Font) -> Result<(), VaultError> {
        let path = self.path_for(&font.id).ok_or(VaultError::NotFound)?;
        let bytes = serde_json::to_vec_pretty(font)
            .map_err(|e| VaultError::Internal(format!("serialize font: {e}")))?;

        // write-then-rename so readers never observe a torn record
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes)
            .await
            .map_err(|e| VaultError::Database(format!("write {}: {e}", staging.display())))?;
        tokio::fs::rename(&staging, &path)
            .await
            .map_err(|e| VaultError::Database(format!("rename {}: {e}", path.display())))
    }

    async fn modify(
        &self,
        id: &str,
        f: impl FnOnce(&mut Font) + Send,
    ) -> Result<Font, VaultError> {
        let path = self.path_for(id).ok_or(VaultError::NotFound)?;
        let _guard = self.write_lock.lock().await;

        let mut font = self.read(&path).await?.ok_or(VaultError::NotFound)?;
        f(&mut font);
        self.write(&font).await?;
        Ok(font)
    }
}

/// Ids are generated as UUIDs; anything outside that alphabet could escape
/// the catalog directory.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 64 && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[async_trait]
impl FontRepository for FileFontRepository {
    async fn list(&self) -> Result<Vec<Font>, VaultError> {
        let mut entries = tokio::fs::read_dir(&self.directory)
            .await
            .map_err(|e| VaultError::Database(format!("list {}: {e}", self.directory.display())))?;

        let mut fonts = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| VaultError::Database(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read(&path).await {
                Ok(Some(font)) => fonts.push(font),
                Ok(None) => {}
                Err(e) => {
                    log::warn!(target: "fontvault::catalog", "msg=\"skipping unreadable record\" error=\"{e}\"");
                }
            }
        }

        fonts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(fonts)
    }

    async fn find(&self, id: &str) -> Result<Option<Font>, VaultError> {
        match self.path_for(id) {
            Some(path) => self.read(&path).await,
            None => Ok(None),
        }
    }

    async fn create(&self, font: NewFont) -> Result<Font, VaultError> {
        let font = font.into_font(Uuid::new_v4().to_string(), Utc::now());
        let _guard = self.write_lock.lock().await;
        self.write(&font).await?;

        log::debug!(target: "fontvault::catalog", "msg=\"font created\" id=\"{}\"", font.id);
        Ok(font)
    }

    async fn update(&self, id: &str, update: FontUpdate) -> Result<Font, VaultError> {
        self.modify(id, |font| update.apply(font, Utc::now())).await
    }

    async fn delete(&self, id: &str) -> Result<(), VaultError> {
        let Some(path) = self.path_for(id) else {
            return Ok(());
        };
        let _guard = self.write_lock.lock().await;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VaultError::Database(format!("delete {}: {e}", path.display()))),
        }
    }

    async fn toggle_favorite(&self, id: &str) -> Result<Font, VaultError> {
        self.modify(id, |font| {
            font.is_favorite = !font.is_favorite;
            font.updated_at = Utc::now();
        })
        .await
    }
}
