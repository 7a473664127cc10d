use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Sans.
    Gothic,
    /// Serif.
    Myeongjo,
    Handwriting,
    Display,
    Dingbat,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum License {
    Free,
    Commercial,
    Personal,
    Ofl,
    Apache,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontType {
    OtfTtf,
    Otf,
    Ttf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleFontsData {
    pub family: String,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub subsets: Vec<String>,
}

/// One archived typeface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub id: String,
    pub name: String,
    pub designer: String,
    pub foundry: Option<String>,
    pub english_name: Option<String>,
    #[serde(default)]
    pub download_url: String,
    pub official_url: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub license: License,
    pub font_type: Option<FontType>,
    pub weight_count: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub usage_notes: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub web_font_link_embed: Option<String>,
    pub web_font_css_class: Option<String>,
    pub web_font_import_code: Option<String>,
    pub google_fonts_data: Option<GoogleFontsData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Insert shape for [`Font`]: everything but the id and timestamps.
///
/// Empty strings in optional fields are stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFont {
    pub name: String,
    pub designer: String,
    #[serde(default)]
    pub foundry: Option<String>,
    #[serde(default)]
    pub english_name: Option<String>,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub official_url: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub license: License,
    #[serde(default)]
    pub font_type: Option<FontType>,
    #[serde(default)]
    pub weight_count: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub usage_notes: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub web_font_link_embed: Option<String>,
    #[serde(default)]
    pub web_font_css_class: Option<String>,
    #[serde(default)]
    pub web_font_import_code: Option<String>,
    #[serde(default)]
    pub google_fonts_data: Option<GoogleFontsData>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl NewFont {
    pub fn into_font(self, id: String, now: DateTime<Utc>) -> Font {
        Font {
            id,
            name: self.name,
            designer: self.designer,
            foundry: non_empty(self.foundry),
            english_name: non_empty(self.english_name),
            download_url: self.download_url,
            official_url: non_empty(self.official_url),
            category: self.category,
            license: self.license,
            font_type: self.font_type,
            weight_count: self.weight_count,
            tags: self.tags,
            description: non_empty(self.description),
            usage_notes: non_empty(self.usage_notes),
            image_urls: self.image_urls,
            thumbnail_url: non_empty(self.thumbnail_url),
            web_font_link_embed: non_empty(self.web_font_link_embed),
            web_font_css_class: non_empty(self.web_font_css_class),
            web_font_import_code: non_empty(self.web_font_import_code),
            google_fonts_data: self.google_fonts_data,
            created_at: now,
            updated_at: now,
            is_favorite: self.is_favorite,
        }
    }
}

/// Partial update for [`Font`]. Absent fields are left untouched; an empty
/// string clears an optional text field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontUpdate {
    pub name: Option<String>,
    pub designer: Option<String>,
    pub foundry: Option<String>,
    pub english_name: Option<String>,
    pub download_url: Option<String>,
    pub official_url: Option<String>,
    pub category: Option<Category>,
    pub license: Option<License>,
    pub font_type: Option<FontType>,
    pub weight_count: Option<u8>,
    pub tags: Option<Vec<String>>,
    pub description: Option<String>,
    pub usage_notes: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub thumbnail_url: Option<String>,
    pub web_font_link_embed: Option<String>,
    pub web_font_css_class: Option<String>,
    pub web_font_import_code: Option<String>,
    pub google_fonts_data: Option<GoogleFontsData>,
    pub is_favorite: Option<bool>,
}

impl FontUpdate {
    pub fn apply(self, font: &mut Font, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            font.name = name;
        }
        if let Some(designer) = self.designer {
            font.designer = designer;
        }
        if let Some(download_url) = self.download_url {
            font.download_url = download_url;
        }
        if let Some(category) = self.category {
            font.category = category;
        }
        if let Some(license) = self.license {
            font.license = license;
        }
        if let Some(tags) = self.tags {
            font.tags = tags;
        }
        if let Some(image_urls) = self.image_urls {
            font.image_urls = image_urls;
        }
        if let Some(is_favorite) = self.is_favorite {
            font.is_favorite = is_favorite;
        }
        if self.font_type.is_some() {
            font.font_type = self.font_type;
        }
        if self.weight_count.is_some() {
            font.weight_count = self.weight_count;
        }
        if self.google_fonts_data.is_some() {
            font.google_fonts_data = self.google_fonts_data;
        }

        replace_text(&mut font.foundry, self.foundry);
        replace_text(&mut font.english_name, self.english_name);
        replace_text(&mut font.official_url, self.official_url);
        replace_text(&mut font.description, self.description);
        replace_text(&mut font.usage_notes, self.usage_notes);
        replace_text(&mut font.thumbnail_url, self.thumbnail_url);
        replace_text(&mut font.web_font_link_embed, self.web_font_link_embed);
        replace_text(&mut font.web_font_css_class, self.web_font_css_class);
        replace_text(&mut font.web_font_import_code, self.web_font_import_code);

        font.updated_at = now;
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn replace_text(slot: &mut Option<String>, update: Option<String>) {
    if let Some(value) = update {
        *slot = non_empty(Some(value));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::Duration;
    use serde_json::json;

    use super::*;

    fn new_font() -> NewFont {
        NewFont {
            name: "Pretendard".to_owned(),
            designer: "Kil Hyung-jin".to_owned(),
            category: Category::Gothic,
            license: License::Ofl,
            tags: vec!["ui".to_owned()],
            ..Default::default()
        }
    }

    #[test]
    fn test_enums_use_snake_case() {
        assert_eq!(serde_json::to_value(FontType::OtfTtf).unwrap(), json!("otf_ttf"));
        assert_eq!(serde_json::to_value(Category::Myeongjo).unwrap(), json!("myeongjo"));
        assert_eq!(serde_json::to_value(License::Ofl).unwrap(), json!("ofl"));
    }

    #[test]
    fn test_new_font_from_minimal_json() {
        let font: NewFont =
            serde_json::from_value(json!({ "name": "Noto Serif KR", "designer": "Google" })).unwrap();
        assert_eq!(font.category, Category::Other);
        assert_eq!(font.license, License::Unknown);
        assert!(font.tags.is_empty());
        assert!(!font.is_favorite);
    }

    #[test]
    fn test_into_font_drops_empty_optionals() {
        let now = Utc::now();
        let font = NewFont {
            official_url: Some(String::new()),
            description: Some("  ".to_owned()),
            foundry: Some("Orioncactus".to_owned()),
            ..new_font()
        }
        .into_font("id-1".to_owned(), now);

        assert_eq!(font.id, "id-1");
        assert!(font.official_url.is_none());
        assert!(font.description.is_none());
        assert_eq!(font.foundry.as_deref(), Some("Orioncactus"));
        assert_eq!(font.created_at, now);
        assert_eq!(font.updated_at, now);
    }

    #[test]
    fn test_update_is_partial() {
        let created = Utc::now();
        let mut font = NewFont {
            description: Some("variable weights".to_owned()),
            ..new_font()
        }
        .into_font("id-1".to_owned(), created);

        let later = created + Duration::minutes(5);
        FontUpdate {
            designer: Some("Orioncactus".to_owned()),
            description: Some(String::new()),
            tags: Some(vec!["ui".to_owned(), "variable".to_owned()]),
            ..Default::default()
        }
        .apply(&mut font, later);

        assert_eq!(font.name, "Pretendard");
        assert_eq!(font.designer, "Orioncactus");
        assert!(font.description.is_none());
        assert_eq!(font.tags.len(), 2);
        assert_eq!(font.category, Category::Gothic);
        assert_eq!(font.created_at, created);
        assert_eq!(font.updated_at, later);
    }

    #[test]
    fn test_update_from_empty_json_changes_nothing_but_timestamp() {
        let mut font = new_font().into_font("id-1".to_owned(), Utc::now());
        let before = font.clone();

        let update: FontUpdate = serde_json::from_value(json!({})).unwrap();
        update.apply(&mut font, before.updated_at);

        assert_eq!(font, before);
    }
}
