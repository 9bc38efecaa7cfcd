// src/domain/refresh.rs
use crate::domain::bookmark::Bookmark;
use crate::domain::metadata::MetadataEntry;
use chrono::{DateTime, Utc};
use std::fmt;

pub const DEFAULT_REFRESH_AFTER_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    /// The bookmark url no longer matches the url the entry was fetched for
    UrlChanged,
    /// The entry is older than the policy allows
    Expired,
}

impl fmt::Display for RefreshReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshReason::UrlChanged => write!(f, "url changed"),
            RefreshReason::Expired => write!(f, "expired"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    /// No entry exists yet: fetch and add one
    Create,
    /// Mark pending, fetch, replace
    Refresh(RefreshReason),
    Keep,
}

/// Decides when a bookmark's preview data has to be (re-)fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub max_age_days: i64,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            max_age_days: DEFAULT_REFRESH_AFTER_DAYS,
        }
    }
}

impl RefreshPolicy {
    pub fn new(max_age_days: i64) -> Self {
        Self { max_age_days }
    }

    pub fn decide(
        &self,
        bookmark: &Bookmark,
        entry: Option<&MetadataEntry>,
        now: DateTime<Utc>,
    ) -> RefreshDecision {
        let Some(entry) = entry else {
            return RefreshDecision::Create;
        };

        if entry.url.as_deref() != Some(bookmark.url.as_str()) {
            return RefreshDecision::Refresh(RefreshReason::UrlChanged);
        }

        // age counts from the last fetch, not from the bookmark edit
        let fetched_at = entry.last_edited.unwrap_or(bookmark.last_edited);
        // whole days, truncated
        if now.signed_duration_since(fetched_at).num_days() > self.max_age_days {
            return RefreshDecision::Refresh(RefreshReason::Expired);
        }

        RefreshDecision::Keep
    }
}
