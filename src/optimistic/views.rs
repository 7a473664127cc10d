use async_trait::async_trait;

use super::{MutationOutcome, perform_optimistic};
use crate::VaultError;
use crate::catalog::{CatalogQuery, Font};
use crate::compare::ComparisonSelection;

/// The remote catalog as seen from a view.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_fonts(&self) -> Result<Vec<Font>, VaultError>;
    async fn toggle_favorite(&self, id: &str) -> Result<Font, VaultError>;
    async fn delete_font(&self, id: &str) -> Result<(), VaultError>;
}

const LOAD_FAILED: &str = "Failed to load fonts";
const FAVORITE_FAILED: &str = "Failed to update favorite";
const DELETE_FAILED: &str = "Failed to delete font";

/// The dashboard: every font, with search, favorites and comparison.
///
/// Favorite toggles and deletes are optimistic and revert in place on
/// failure. Failures surface only through [`notice`](Self::notice).
#[derive(Debug)]
pub struct FontListView<A> {
    api: A,
    fonts: Vec<Font>,
    query: CatalogQuery,
    selection: ComparisonSelection<Font>,
    notice: Option<String>,
}

impl<A: CatalogApi> FontListView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            fonts: Vec::new(),
            query: CatalogQuery::default(),
            selection: ComparisonSelection::new(),
            notice: None,
        }
    }

    /// Replaces the local list with the server's. Keeps the current list if
    /// the fetch fails.
    pub async fn refresh(&mut self) {
        match self.api.list_fonts().await {
            Ok(fonts) => self.fonts = fonts,
            Err(e) => {
                log::warn!(target: "fontvault::views", "msg=\"font list fetch failed\" error=\"{e}\"");
                self.notice = Some(LOAD_FAILED.to_owned());
            }
        }
    }

    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    /// The fonts that pass the current query, in display order.
    pub fn visible(&self) -> Vec<&Font> {
        self.query.apply(&self.fonts)
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: CatalogQuery) {
        self.query = query;
    }

    pub fn selection(&self) -> &ComparisonSelection<Font> {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut ComparisonSelection<Font> {
        &mut self.selection
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Returns whether the server accepted the change. Unknown ids are
    /// ignored.
    pub async fn toggle_favorite(&mut self, id: &str) -> bool {
        if !self.fonts.iter().any(|f| f.id == id) {
            return false;
        }

        let outcome = perform_optimistic(
            &mut self.fonts,
            |fonts| {
                fonts.iter_mut().find(|f| f.id == id).map(|font| {
                    let previous = font.is_favorite;
                    font.is_favorite = !previous;
                    previous
                })
            },
            || self.api.toggle_favorite(id),
            |fonts, previous| {
                if let (Some(font), Some(previous)) = (fonts.iter_mut().find(|f| f.id == id), previous) {
                    font.is_favorite = previous;
                }
            },
        )
        .await;

        self.record(outcome, FAVORITE_FAILED)
    }

    /// Removes the font at once and puts it back at its old position if the
    /// server refuses.
    pub async fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.fonts.iter().position(|f| f.id == id) else {
            return false;
        };

        let outcome = perform_optimistic(
            &mut self.fonts,
            |fonts| (index, fonts.remove(index)),
            || self.api.delete_font(id),
            |fonts, (index, font)| fonts.insert(index.min(fonts.len()), font),
        )
        .await;

        let committed = self.record(outcome, DELETE_FAILED);
        if committed {
            self.selection.remove(id);
        }
        committed
    }

    fn record<T>(&mut self, outcome: MutationOutcome<T, VaultError>, notice: &str) -> bool {
        match outcome {
            MutationOutcome::Committed(_) => true,
            MutationOutcome::RolledBack(_) => {
                self.notice = Some(notice.to_owned());
                false
            }
        }
    }
}

/// Favorites only. Un-favoriting makes the font leave the list, so a failed
/// write is reconciled by re-fetching rather than by a point revert.
#[derive(Debug)]
pub struct FavoritesView<A> {
    api: A,
    fonts: Vec<Font>,
    notice: Option<String>,
    selection: ComparisonSelection<Font>,
}

impl<A: CatalogApi> FavoritesView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            fonts: Vec::new(),
            notice: None,
            selection: ComparisonSelection::new(),
        }
    }

    pub async fn refresh(&mut self) {
        match self.api.list_fonts().await {
            Ok(fonts) => self.fonts = fonts.into_iter().filter(|f| f.is_favorite).collect(),
            Err(e) => {
                log::warn!(target: "fontvault::views", "msg=\"favorites fetch failed\" error=\"{e}\"");
                self.notice = Some(LOAD_FAILED.to_owned());
            }
        }
    }

    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    pub fn selection(&self) -> &ComparisonSelection<Font> {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut ComparisonSelection<Font> {
        &mut self.selection
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub async fn unfavorite(&mut self, id: &str) -> bool {
        if !self.fonts.iter().any(|f| f.id == id) {
            return false;
        }

        let outcome = perform_optimistic(
            &mut self.fonts,
            |fonts| fonts.retain(|f| f.id != id),
            || self.api.toggle_favorite(id),
            // reconciled by the refetch below
            |_, ()| {},
        )
        .await;

        match outcome {
            MutationOutcome::Committed(_) => {
                self.selection.remove(id);
                true
            }
            MutationOutcome::RolledBack(_) => {
                self.notice = Some(FAVORITE_FAILED.to_owned());
                self.refresh().await;
                false
            }
        }
    }
}
