// src/domain/metadata.rs
use crate::domain::timestamp::now_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the most recent fetch attempt for a bookmark's preview data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataStatus {
    Pending,
    Error,
    Success,
}

impl fmt::Display for MetadataStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataStatus::Pending => write!(f, "pending"),
            MetadataStatus::Error => write!(f, "error"),
            MetadataStatus::Success => write!(f, "success"),
        }
    }
}

/// Preview fields returned by a single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPreview {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub image: Option<String>,
    pub favicon: Option<String>,
    pub status: MetadataStatus,
}

impl LinkPreview {
    pub fn failed() -> Self {
        Self {
            title: None,
            description: None,
            kind: None,
            image: None,
            favicon: None,
            status: MetadataStatus::Error,
        }
    }
}

/// Cached link-preview data, keyed by bookmark id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub last_edited: Option<DateTime<Utc>>,
    pub status: MetadataStatus,
}

impl MetadataEntry {
    /// Builds an entry from a fetch outcome. The url is the bookmark's, not the one the
    /// provider reports.
    pub fn from_preview(id: &str, url: &str, preview: LinkPreview) -> Self {
        Self {
            id: id.to_string(),
            title: preview.title,
            description: preview.description,
            kind: preview.kind,
            image: preview.image,
            favicon: preview.favicon,
            url: Some(url.to_string()),
            last_edited: Some(now_millis()),
            status: preview.status,
        }
    }

    pub fn pending(id: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            title: None,
            description: None,
            kind: None,
            image: None,
            favicon: None,
            url: Some(url.to_string()),
            last_edited: Some(now_millis()),
            status: MetadataStatus::Pending,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == MetadataStatus::Success
    }
}
