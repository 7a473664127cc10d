use std::collections::HashSet;

use super::{ImageStore, filename_from_url};
use crate::VaultError;
use crate::catalog::FontRepository;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Distinct image names referenced by some font.
    pub referenced: usize,
    /// Files in the store before cleanup.
    pub stored: usize,
    /// Stored files no font references.
    pub orphans: Vec<String>,
    /// False for a dry run.
    pub removed: bool,
}

/// Deletes stored images that no font's `image_urls` points at.
///
/// With `dry_run` the orphans are only reported.
pub async fn cleanup_orphans(
    fonts: &dyn FontRepository,
    images: &dyn ImageStore,
    dry_run: bool,
) -> Result<CleanupReport, VaultError> {
    let referenced: HashSet<String> = fonts
        .list()
        .await?
        .iter()
        .flat_map(|font| font.image_urls.iter())
        .filter_map(|url| filename_from_url(url))
        .map(ToOwned::to_owned)
        .collect();

    let stored = images.list().await?;
    let orphans: Vec<String> = stored
        .iter()
        .filter(|name| !referenced.contains(*name))
        .cloned()
        .collect();

    log::info!(
        target: "fontvault::storage",
        "msg=\"orphan scan finished\" referenced={} stored={} orphans={}",
        referenced.len(),
        stored.len(),
        orphans.len()
    );

    let removed = !dry_run && !orphans.is_empty();
    if removed {
        images.remove(&orphans).await?;
    }

    Ok(CleanupReport {
        referenced: referenced.len(),
        stored: stored.len(),
        orphans,
        removed,
    })
}
