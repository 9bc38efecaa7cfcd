// src/application/services/metadata_service_impl.rs
use std::sync::Arc;

use crate::application::error::ApplicationResult;
use crate::application::services::metadata_service::MetadataService;
use crate::domain::bookmark::Bookmark;
use crate::domain::metadata::{MetadataEntry, MetadataStatus};
use crate::domain::refresh::{RefreshDecision, RefreshPolicy};
use crate::domain::repositories::repository::MetadataRepository;
use crate::domain::services::metadata_provider::MetadataProvider;
use crate::domain::timestamp::now_millis;
use chrono::Utc;
use tracing::{debug, info, instrument};

#[derive(Debug)]
pub struct MetadataServiceImpl {
    repository: Arc<dyn MetadataRepository>,
    provider: Arc<dyn MetadataProvider>,
    policy: RefreshPolicy,
}

impl MetadataServiceImpl {
    pub fn new(
        repository: Arc<dyn MetadataRepository>,
        provider: Arc<dyn MetadataProvider>,
        policy: RefreshPolicy,
    ) -> Self {
        Self {
            repository,
            provider,
            policy,
        }
    }

    fn create(&self, bookmark: &Bookmark) -> ApplicationResult<MetadataEntry> {
        let preview = self.provider.fetch(&bookmark.url);
        let entry = MetadataEntry::from_preview(&bookmark.id, &bookmark.url, preview);
        self.repository.add(&entry)?;
        Ok(entry)
    }

    /// Marks the entry pending, keeping its old fields, then replaces it with the fetch
    /// outcome.
    fn refetch(
        &self,
        bookmark: &Bookmark,
        previous: MetadataEntry,
    ) -> ApplicationResult<MetadataEntry> {
        let pending = MetadataEntry {
            url: Some(bookmark.url.clone()),
            last_edited: Some(now_millis()),
            status: MetadataStatus::Pending,
            ..previous
        };
        self.repository.update(&pending)?;
        debug!("Marked {} pending", bookmark.id);

        let preview = self.provider.fetch(&bookmark.url);
        let entry = MetadataEntry::from_preview(&bookmark.id, &bookmark.url, preview);
        self.repository.update(&entry)?;
        Ok(entry)
    }
}

impl MetadataService for MetadataServiceImpl {
    #[instrument(skip(self, entry), fields(id = %entry.id), level = "debug")]
    fn add_metadata(&self, entry: MetadataEntry) -> ApplicationResult<bool> {
        if self.repository.get_by_id(&entry.id)?.is_some() {
            return Ok(false);
        }
        let entry = MetadataEntry {
            last_edited: Some(now_millis()),
            ..entry
        };
        self.repository.add(&entry)?;
        Ok(true)
    }

    #[instrument(skip(self, entry), fields(id = %entry.id, status = %entry.status), level = "debug")]
    fn edit_metadata(&self, entry: MetadataEntry) -> ApplicationResult<bool> {
        if self.repository.get_by_id(&entry.id)?.is_none() {
            return Ok(false);
        }
        let entry = MetadataEntry {
            last_edited: Some(now_millis()),
            ..entry
        };
        self.repository.update(&entry)?;
        Ok(true)
    }

    #[instrument(skip(self), level = "debug")]
    fn remove_metadata(&self, id: &str) -> ApplicationResult<bool> {
        Ok(self.repository.delete(id)?)
    }

    fn get_metadata(&self, id: &str) -> ApplicationResult<Option<MetadataEntry>> {
        Ok(self.repository.get_by_id(id)?)
    }

    fn get_all_metadata(&self) -> ApplicationResult<Vec<MetadataEntry>> {
        Ok(self.repository.get_all()?)
    }

    #[instrument(skip(self, bookmark), fields(id = %bookmark.id), level = "debug")]
    fn sync_bookmark(&self, bookmark: &Bookmark) -> ApplicationResult<MetadataEntry> {
        let existing = self.repository.get_by_id(&bookmark.id)?;
        let decision = self.policy.decide(bookmark, existing.as_ref(), Utc::now());

        match (decision, existing) {
            (RefreshDecision::Keep, Some(entry)) => Ok(entry),
            (RefreshDecision::Refresh(reason), Some(entry)) => {
                info!("Refreshing metadata for {} ({})", bookmark.short_id(), reason);
                self.refetch(bookmark, entry)
            }
            _ => {
                info!("Fetching metadata for {}", bookmark.short_id());
                self.create(bookmark)
            }
        }
    }

    #[instrument(skip(self, bookmark), fields(id = %bookmark.id), level = "debug")]
    fn refresh_bookmark(&self, bookmark: &Bookmark) -> ApplicationResult<MetadataEntry> {
        match self.repository.get_by_id(&bookmark.id)? {
            Some(entry) => self.refetch(bookmark, entry),
            None => self.create(bookmark),
        }
    }
}
