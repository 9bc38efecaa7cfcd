// src/infrastructure/repositories/json_metadata_repository.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::metadata::MetadataEntry;
use crate::domain::repositories::repository::MetadataRepository;
use crate::infrastructure::json_store::JsonStore;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// File name of the metadata store inside the data directory
pub const METADATA_FILE: &str = "ph_metadata_bookmarks.json";
const METADATA_FIELD: &str = "bookmarksMetadata";

#[derive(Debug)]
pub struct JsonMetadataRepository {
    store: JsonStore<MetadataEntry>,
}

impl JsonMetadataRepository {
    pub fn from_path(path: PathBuf) -> DomainResult<Self> {
        let store = JsonStore::open(path, METADATA_FIELD)?;
        Ok(Self { store })
    }

    pub fn in_dir(data_dir: &Path) -> DomainResult<Self> {
        Self::from_path(data_dir.join(METADATA_FILE))
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

impl MetadataRepository for JsonMetadataRepository {
    fn get_all(&self) -> DomainResult<Vec<MetadataEntry>> {
        Ok(self.store.read()?)
    }

    fn get_by_id(&self, id: &str) -> DomainResult<Option<MetadataEntry>> {
        Ok(self.store.read()?.into_iter().find(|e| e.id == id))
    }

    #[instrument(skip(self), level = "debug")]
    fn add(&self, entry: &MetadataEntry) -> DomainResult<()> {
        self.store.mutate(|entries| {
            if entries.iter().any(|e| e.id == entry.id) {
                return Err(DomainError::MetadataOperationFailed(format!(
                    "Metadata for {} already exists",
                    entry.id
                )));
            }
            entries.push(entry.clone());
            Ok(())
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn update(&self, entry: &MetadataEntry) -> DomainResult<()> {
        self.store.mutate(|entries| {
            let slot = entries
                .iter_mut()
                .find(|e| e.id == entry.id)
                .ok_or_else(|| {
                    DomainError::MetadataOperationFailed(format!("No metadata for {}", entry.id))
                })?;
            *slot = entry.clone();
            Ok(())
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn delete(&self, id: &str) -> DomainResult<bool> {
        if self.get_by_id(id)?.is_none() {
            return Ok(false);
        }
        self.store.mutate(|entries| {
            entries.retain(|e| e.id != id);
            Ok(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::{LinkPreview, MetadataStatus};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn given_entries_when_added_then_appended_in_order() {
        let dir = tempdir().unwrap();
        let repo = JsonMetadataRepository::in_dir(dir.path()).unwrap();
        repo.add(&MetadataEntry::pending("a", "https://a.example")).unwrap();
        repo.add(&MetadataEntry::pending("b", "https://b.example")).unwrap();

        let ids: Vec<String> = repo.get_all().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn given_existing_id_when_add_then_rejected() {
        let dir = tempdir().unwrap();
        let repo = JsonMetadataRepository::in_dir(dir.path()).unwrap();
        repo.add(&MetadataEntry::pending("a", "https://a.example")).unwrap();
        assert!(repo.add(&MetadataEntry::pending("a", "https://a.example")).is_err());
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn given_entry_when_update_then_replaced() {
        let dir = tempdir().unwrap();
        let repo = JsonMetadataRepository::in_dir(dir.path()).unwrap();
        repo.add(&MetadataEntry::pending("a", "https://a.example")).unwrap();

        let mut done = MetadataEntry::pending("a", "https://a.example");
        done.status = MetadataStatus::Success;
        done.title = Some("A".to_string());
        repo.update(&done).unwrap();

        let stored = repo.get_by_id("a").unwrap().unwrap();
        assert_eq!(stored.status, MetadataStatus::Success);
        assert_eq!(stored.title.as_deref(), Some("A"));
    }

    #[test]
    fn given_fetched_and_pending_entries_when_reopened_then_equal_to_written() {
        let dir = tempdir().unwrap();
        let fetched = MetadataEntry::from_preview(
            "a",
            "https://a.example",
            LinkPreview {
                title: Some("A".to_string()),
                status: MetadataStatus::Success,
                ..LinkPreview::failed()
            },
        );
        let pending = MetadataEntry::pending("b", "https://b.example");
        {
            let repo = JsonMetadataRepository::in_dir(dir.path()).unwrap();
            repo.add(&fetched).unwrap();
            repo.add(&pending).unwrap();
        }

        let repo = JsonMetadataRepository::in_dir(dir.path()).unwrap();
        assert!(repo.path().ends_with(METADATA_FILE));
        assert_eq!(repo.get_by_id("a").unwrap(), Some(fetched));
        assert_eq!(repo.get_by_id("b").unwrap(), Some(pending));
    }

    #[test]
    fn given_local_storage_document_when_opened_then_entries_parsed() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(METADATA_FILE),
            r#"{"state":{"bookmarksMetadata":[
                {"id":"x","title":"X","type":"website","url":"https://x.example",
                 "lastEdited":1700000000000,"status":"success"},
                {"id":"y","status":"error"}
            ]},"version":0}"#,
        )
        .unwrap();

        let repo = JsonMetadataRepository::in_dir(dir.path()).unwrap();
        let x = repo.get_by_id("x").unwrap().unwrap();
        assert_eq!(x.kind.as_deref(), Some("website"));
        assert_eq!(x.last_edited.unwrap().timestamp_millis(), 1_700_000_000_000);
        assert_eq!(repo.get_by_id("y").unwrap().unwrap().status, MetadataStatus::Error);
    }
}
