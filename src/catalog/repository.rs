use async_trait::async_trait;

use super::{Font, FontUpdate, NewFont};
use crate::VaultError;

/// Persistence seam for the font catalog.
#[async_trait]
pub trait FontRepository: Send + Sync {
    /// All fonts, newest first.
    async fn list(&self) -> Result<Vec<Font>, VaultError>;

    async fn find(&self, id: &str) -> Result<Option<Font>, VaultError>;

    /// Assigns a fresh id and timestamps.
    async fn create(&self, font: NewFont) -> Result<Font, VaultError>;

    /// Returns `VaultError::NotFound` if `id` is unknown.
    async fn update(&self, id: &str, update: FontUpdate) -> Result<Font, VaultError>;

    /// Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), VaultError>;

    /// Flips `is_favorite` and returns the updated font.
    async fn toggle_favorite(&self, id: &str) -> Result<Font, VaultError>;
}
