use serde::{Deserialize, Serialize};

use super::{Category, Font};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Newest first.
    #[default]
    Latest,
    Name,
    Designer,
}

/// Client-side filtering of the font list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    /// Case-insensitive match against name, english name, designer and tags.
    pub search: Option<String>,
    pub category: Option<Category>,
    pub favorites_only: bool,
    pub sort: SortBy,
}

impl CatalogQuery {
    pub fn matches(&self, font: &Font) -> bool {
        if self.favorites_only && !font.is_favorite {
            return false;
        }
        if let Some(category) = self.category {
            if font.category != category {
                return false;
            }
        }

        let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();

        font.name.to_lowercase().contains(&needle)
            || font.designer.to_lowercase().contains(&needle)
            || font
                .english_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
            || font.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    /// Filters then sorts. Sorting is stable.
    pub fn apply<'a>(&self, fonts: &'a [Font]) -> Vec<&'a Font> {
        let mut selected: Vec<&Font> = fonts.iter().filter(|f| self.matches(f)).collect();
        match self.sort {
            SortBy::Latest => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortBy::Name => selected.sort_by_cached_key(|f| f.name.to_lowercase()),
            SortBy::Designer => selected.sort_by_cached_key(|f| f.designer.to_lowercase()),
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::catalog::NewFont;

    fn catalog() -> Vec<Font> {
        let base = Utc::now();
        [
            ("Pretendard", "Kil Hyung-jin", Category::Gothic, vec!["ui"], false),
            ("Nanum Myeongjo", "Sandoll", Category::Myeongjo, vec!["body"], true),
            ("Gaegu", "JIKJI SOFT", Category::Handwriting, vec!["cute", "UI"], true),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, designer, category, tags, fav))| {
            NewFont {
                name: name.to_owned(),
                designer: designer.to_owned(),
                category,
                tags: tags.into_iter().map(ToOwned::to_owned).collect(),
                is_favorite: fav,
                ..Default::default()
            }
            .into_font(format!("id-{i}"), base + Duration::seconds(i as i64))
        })
        .collect()
    }

    fn names(fonts: Vec<&Font>) -> Vec<&str> {
        fonts.into_iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_default_query_returns_newest_first() {
        let fonts = catalog();
        assert_eq!(
            names(CatalogQuery::default().apply(&fonts)),
            vec!["Gaegu", "Nanum Myeongjo", "Pretendard"]
        );
    }

    #[test]
    fn test_search_matches_tags_case_insensitively() {
        let fonts = catalog();
        let query = CatalogQuery {
            search: Some("ui".to_owned()),
            sort: SortBy::Name,
            ..Default::default()
        };
        assert_eq!(names(query.apply(&fonts)), vec!["Gaegu", "Pretendard"]);
    }

    #[test]
    fn test_search_matches_designer() {
        let fonts = catalog();
        let query = CatalogQuery {
            search: Some("sandoll".to_owned()),
            ..Default::default()
        };
        assert_eq!(names(query.apply(&fonts)), vec!["Nanum Myeongjo"]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let fonts = catalog();
        let query = CatalogQuery {
            search: Some("   ".to_owned()),
            ..Default::default()
        };
        assert_eq!(query.apply(&fonts).len(), 3);
    }

    #[test]
    fn test_category_and_favorites_filters() {
        let fonts = catalog();
        let query = CatalogQuery {
            category: Some(Category::Handwriting),
            ..Default::default()
        };
        assert_eq!(names(query.apply(&fonts)), vec!["Gaegu"]);

        let query = CatalogQuery {
            favorites_only: true,
            sort: SortBy::Designer,
            ..Default::default()
        };
        assert_eq!(names(query.apply(&fonts)), vec!["Gaegu", "Nanum Myeongjo"]);
    }
}
