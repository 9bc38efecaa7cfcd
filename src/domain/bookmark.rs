// src/domain/bookmark.rs
use crate::domain::timestamp::now_millis;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of the id prefix shown in listings
pub const SHORT_ID_LEN: usize = 8;

/// A named URL as entered by the user.
///
/// Persisted with camelCase keys and `lastEdited` as epoch milliseconds.
#[derive(Builder, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[builder(default = "Uuid::new_v4().to_string()")]
    pub id: String,
    #[builder(default)]
    pub name: String,
    pub url: String,
    #[builder(default = "now_millis()")]
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_edited: DateTime<Utc>,
}

impl Bookmark {
    pub fn new<S: AsRef<str>>(name: S, url: S) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.as_ref().to_string(),
            url: url.as_ref().to_string(),
            last_edited: now_millis(),
        }
    }

    /// Replace name and url, restamping the edit time
    pub fn edit<S: AsRef<str>>(&mut self, name: S, url: S) {
        self.name = name.as_ref().to_string();
        self.url = url.as_ref().to_string();
        self.last_edited = now_millis();
    }

    /// True when both name and url are identical
    pub fn same_content(&self, name: &str, url: &str) -> bool {
        self.name == name && self.url == url
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..SHORT_ID_LEN).unwrap_or(&self.id)
    }

    /// Display name, falling back to the url for unnamed bookmarks
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.url
        } else {
            &self.name
        }
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.short_id(), self.name, self.url)
    }
}

impl fmt::Debug for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bookmark")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("url", &self.url)
            .field("last_edited", &self.last_edited)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn given_name_and_url_when_new_then_generates_uuid_and_timestamp() {
        let before = now_millis();
        let bookmark = Bookmark::new("Rust", "https://www.rust-lang.org");

        assert_eq!(bookmark.name, "Rust");
        assert_eq!(bookmark.url, "https://www.rust-lang.org");
        assert!(Uuid::parse_str(&bookmark.id).is_ok());
        assert!(bookmark.last_edited >= before);
    }

    #[test]
    fn given_two_new_bookmarks_then_ids_differ() {
        let a = Bookmark::new("a", "https://a.example");
        let b = Bookmark::new("a", "https://a.example");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn given_bookmark_when_edit_then_replaces_fields_and_restamps() {
        let old = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut bookmark = BookmarkBuilder::default()
            .name("old")
            .url("https://old.example")
            .last_edited(old)
            .build()
            .unwrap();
        let id = bookmark.id.clone();

        bookmark.edit("new", "https://new.example");

        assert_eq!(bookmark.id, id);
        assert_eq!(bookmark.name, "new");
        assert_eq!(bookmark.url, "https://new.example");
        assert!(bookmark.last_edited > old);
    }

    #[test]
    fn given_bookmark_when_same_content_then_requires_name_and_url() {
        let bookmark = Bookmark::new("docs", "https://docs.rs");
        assert!(bookmark.same_content("docs", "https://docs.rs"));
        assert!(!bookmark.same_content("docs", "https://crates.io"));
        assert!(!bookmark.same_content("other", "https://docs.rs"));
    }

    #[test]
    fn given_bookmark_when_serialized_then_uses_camel_case_and_millis() {
        let bookmark = BookmarkBuilder::default()
            .id("5b1f0e7e-0000-4000-8000-000000000001")
            .name("Example")
            .url("https://example.com")
            .last_edited(Utc.timestamp_millis_opt(1_700_000_000_123).unwrap())
            .build()
            .unwrap();

        let value = serde_json::to_value(&bookmark).unwrap();
        assert_eq!(value["lastEdited"], 1_700_000_000_123_i64);
        assert_eq!(value["id"], "5b1f0e7e-0000-4000-8000-000000000001");

        let back: Bookmark = serde_json::from_value(value).unwrap();
        assert_eq!(back, bookmark);
    }

    #[test]
    fn given_unnamed_bookmark_when_label_then_falls_back_to_url() {
        let bookmark = Bookmark::new("", "https://example.com");
        assert_eq!(bookmark.label(), "https://example.com");
        assert_eq!(bookmark.short_id().len(), SHORT_ID_LEN);
    }
}
