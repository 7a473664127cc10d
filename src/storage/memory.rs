use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{DEFAULT_PUBLIC_PREFIX, ImageObject, ImageStore, StoredImage, check_name, join_url};
use crate::VaultError;

#[derive(Debug, Clone)]
pub struct InMemoryImageStore {
    prefix: String,
    objects: Arc<RwLock<HashMap<String, ImageObject>>>,
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PREFIX)
    }
}

impl InMemoryImageStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            objects: Arc::default(),
        }
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.objects
            .read()
            .map(|objects| objects.contains_key(filename))
            .unwrap_or(false)
    }
}

fn poisoned() -> VaultError {
    VaultError::Storage("image store lock poisoned".to_owned())
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredImage, VaultError> {
        check_name(filename)?;
        let mut objects = self.objects.write().map_err(|_| poisoned())?;
        if objects.contains_key(filename) {
            return Err(VaultError::Storage(format!("{filename} already exists")));
        }
        objects.insert(
            filename.to_owned(),
            ImageObject {
                content_type: content_type.to_owned(),
                bytes: bytes.to_vec(),
            },
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
        let mut objects = self.objects.write().map_err(|_| poisoned())?;
        for name in filenames {
            objects.remove(name);
        }
        Ok(())
    }

    async fn fetch(&self, filename: &str) -> Result<Option<ImageObject>, VaultError> {
        let objects = self.objects.read().map_err(|_| poisoned())?;
        Ok(objects.get(filename).cloned())
    }

    async fn list(&self) -> Result<Vec<String>, VaultError> {
        let objects = self.objects.read().map_err(|_| poisoned())?;
        let mut names: Vec<String> = objects.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
