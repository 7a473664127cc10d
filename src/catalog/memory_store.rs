use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{Font, FontRepository, FontUpdate, NewFont};
use crate::VaultError;

/// Process-local catalog. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFontRepository {
    fonts: Arc<RwLock<Vec<Font>>>,
}

impl InMemoryFontRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fonts(fonts: Vec<Font>) -> Self {
        Self {
            fonts: Arc::new(RwLock::new(fonts)),
        }
    }

    fn modify<R>(&self, f: impl FnOnce(&mut Vec<Font>) -> R) -> Result<R, VaultError> {
        let mut fonts = self
            .fonts
            .write()
            .map_err(|_| VaultError::Database("font store lock poisoned".to_owned()))?;
        Ok(f(&mut fonts))
    }
}

#[async_trait]
impl FontRepository for InMemoryFontRepository {
    async fn list(&self) -> Result<Vec<Font>, VaultError> {
        let fonts = self
            .fonts
            .read()
            .map_err(|_| VaultError::Database("font store lock poisoned".to_owned()))?;

        // later inserts win ties
        let mut listed: Vec<Font> = fonts.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn find(&self, id: &str) -> Result<Option<Font>, VaultError> {
        let fonts = self
            .fonts
            .read()
            .map_err(|_| VaultError::Database("font store lock poisoned".to_owned()))?;
        Ok(fonts.iter().find(|f| f.id == id).cloned())
    }

    async fn create(&self, font: NewFont) -> Result<Font, VaultError> {
        let font = font.into_font(Uuid::new_v4().to_string(), Utc::now());
        self.modify(|fonts| fonts.push(font.clone()))?;
        Ok(font)
    }

    async fn update(&self, id: &str, update: FontUpdate) -> Result<Font, VaultError> {
        self.modify(|fonts| {
            let font = fonts.iter_mut().find(|f| f.id == id).ok_or(VaultError::NotFound)?;
            update.apply(font, Utc::now());
            Ok(font.clone())
        })?
    }

    async fn delete(&self, id: &str) -> Result<(), VaultError> {
        self.modify(|fonts| fonts.retain(|f| f.id != id))
    }

    async fn toggle_favorite(&self, id: &str) -> Result<Font, VaultError> {
        self.modify(|fonts| {
            let font = fonts.iter_mut().find(|f| f.id == id).ok_or(VaultError::NotFound)?;
            font.is_favorite = !font.is_favorite;
            font.updated_at = Utc::now();
            Ok(font.clone())
        })?
    }
}
