//! Content items and discovery filters.

use super::identifiers::ContentId;
use serde::{Deserialize, Serialize};

/// A piece of third-party video metadata shown in one grid cell.
///
/// Only `id` matters to the grid engine. The remaining fields are payload the
/// renderer and filters read; unknown catalog fields are kept verbatim in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Session-wide unique identifier.
    pub id: ContentId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Media type, e.g. `"movie"` or `"tv"`.
    #[serde(default)]
    pub media_type: Option<String>,
    /// Release year.
    #[serde(default)]
    pub year: Option<u16>,
    /// Genre names.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Poster image path on the metadata service.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Opaque remainder of the payload.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContentItem {
    /// Create an item with only an id and a title.
    pub fn new(id: ContentId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            media_type: None,
            year: None,
            genres: Vec::new(),
            poster_path: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Set the release year.
    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    /// Append a genre.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.push(genre.into());
        self
    }
}

/// Provider-side filter applied to discovery batches.
///
/// Changing the active filter invalidates everything placed on the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    /// Restrict to one media type (case-insensitive).
    #[serde(default)]
    pub media_type: Option<String>,
    /// Restrict to items carrying this genre (case-insensitive).
    #[serde(default)]
    pub genre: Option<String>,
}

impl Filter {
    /// Filter that accepts everything.
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to a media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Restrict to a genre.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// True when no restriction is set.
    pub fn is_any(&self) -> bool {
        self.media_type.is_none() && self.genre.is_none()
    }

    /// Check whether an item passes this filter.
    pub fn matches(&self, item: &ContentItem) -> bool {
        let media_ok = match (&self.media_type, &item.media_type) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
            (Some(_), None) => false,
        };
        let genre_ok = match &self.genre {
            None => true,
            Some(wanted) => item.genres.iter().any(|g| g.eq_ignore_ascii_case(wanted)),
        };
        media_ok && genre_ok
    }

    /// Short human-readable description for status lines.
    pub fn describe(&self) -> String {
        match (&self.media_type, &self.genre) {
            (None, None) => "all".to_string(),
            (Some(m), None) => m.clone(),
            (None, Some(g)) => g.clone(),
            (Some(m), Some(g)) => format!("{m}/{g}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ContentItem {
        ContentItem::new(ContentId::new(id).unwrap(), format!("Title {id}"))
    }

    #[test]
    fn item_parses_with_extra_payload() {
        let json = r#"{"id":"m1","title":"Heat","media_type":"movie","year":1995,"vote_average":8.3}"#;
        let parsed: ContentItem = serde_json::from_str(json).expect("valid item");

        assert_eq!(parsed.id.as_str(), "m1");
        assert_eq!(parsed.title, "Heat");
        assert_eq!(parsed.media_type.as_deref(), Some("movie"));
        assert_eq!(parsed.year, Some(1995));
        assert!(parsed.extra.contains_key("vote_average"));
    }

    #[test]
    fn item_requires_id() {
        let result: Result<ContentItem, _> = serde_json::from_str(r#"{"title":"No id"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn any_filter_matches_everything() {
        assert!(Filter::any().matches(&item("a")));
        assert!(Filter::any().is_any());
    }

    #[test]
    fn media_type_filter_is_case_insensitive() {
        let filter = Filter::any().with_media_type("TV");
        assert!(filter.matches(&item("a").with_media_type("tv")));
        assert!(!filter.matches(&item("b").with_media_type("movie")));
        assert!(!filter.matches(&item("c")), "Untyped items fail a typed filter");
    }

    #[test]
    fn genre_filter_requires_matching_genre() {
        let filter = Filter::any().with_genre("drama");
        assert!(filter.matches(&item("a").with_genre("Crime").with_genre("Drama")));
        assert!(!filter.matches(&item("b").with_genre("Comedy")));
    }

    #[test]
    fn describe_combines_parts() {
        assert_eq!(Filter::any().describe(), "all");
        assert_eq!(
            Filter::any().with_media_type("movie").with_genre("drama").describe(),
            "movie/drama"
        );
    }
}
