// src/infrastructure/repositories/json_bookmark_repository.rs
use crate::domain::bookmark::Bookmark;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::repository::BookmarkRepository;
use crate::infrastructure::json_store::JsonStore;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// File name of the bookmark store inside the data directory
pub const BOOKMARKS_FILE: &str = "ph_bookmarks.json";
const BOOKMARKS_FIELD: &str = "bookmarks";

#[derive(Debug)]
pub struct JsonBookmarkRepository {
    store: JsonStore<Bookmark>,
}

impl JsonBookmarkRepository {
    pub fn from_path(path: PathBuf) -> DomainResult<Self> {
        let store = JsonStore::open(path, BOOKMARKS_FIELD)?;
        Ok(Self { store })
    }

    /// Opens the bookmark store in `data_dir`
    pub fn in_dir(data_dir: &Path) -> DomainResult<Self> {
        Self::from_path(data_dir.join(BOOKMARKS_FILE))
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

impl BookmarkRepository for JsonBookmarkRepository {
    fn get_all(&self) -> DomainResult<Vec<Bookmark>> {
        Ok(self.store.read()?)
    }

    fn get_by_id(&self, id: &str) -> DomainResult<Option<Bookmark>> {
        Ok(self.store.read()?.into_iter().find(|bm| bm.id == id))
    }

    #[instrument(skip(self), level = "debug")]
    fn add(&self, bookmark: &Bookmark) -> DomainResult<()> {
        self.store.mutate(|bookmarks| {
            if bookmarks.iter().any(|bm| bm.id == bookmark.id) {
                return Err(DomainError::BookmarkOperationFailed(format!(
                    "Duplicate bookmark id: {}",
                    bookmark.id
                )));
            }
            bookmarks.insert(0, bookmark.clone());
            Ok(())
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn update(&self, bookmark: &Bookmark) -> DomainResult<()> {
        self.store.mutate(|bookmarks| {
            let slot = bookmarks
                .iter_mut()
                .find(|bm| bm.id == bookmark.id)
                .ok_or_else(|| DomainError::BookmarkNotFound(bookmark.id.clone()))?;
            *slot = bookmark.clone();
            Ok(())
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn delete(&self, id: &str) -> DomainResult<bool> {
        if self.get_by_id(id)?.is_none() {
            debug!("Bookmark {} not present, nothing to delete", id);
            return Ok(false);
        }
        self.store.mutate(|bookmarks| {
            bookmarks.retain(|bm| bm.id != id);
            Ok(true)
        })
    }
}
