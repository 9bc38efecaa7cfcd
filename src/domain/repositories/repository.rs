// src/domain/repositories/repository.rs
use crate::domain::bookmark::Bookmark;
use crate::domain::error::DomainResult;
use crate::domain::metadata::MetadataEntry;

/// Persistence for bookmarks, kept newest first.
pub trait BookmarkRepository: std::fmt::Debug + Send + Sync {
    /// All bookmarks, newest first
    fn get_all(&self) -> DomainResult<Vec<Bookmark>>;

    fn get_by_id(&self, id: &str) -> DomainResult<Option<Bookmark>>;

    /// Insert at the front of the list
    fn add(&self, bookmark: &Bookmark) -> DomainResult<()>;

    /// Replace the bookmark with the same id, keeping its position
    fn update(&self, bookmark: &Bookmark) -> DomainResult<()>;

    /// Returns false when nothing was removed
    fn delete(&self, id: &str) -> DomainResult<bool>;
}

/// Persistence for cached link previews, keyed by bookmark id.
pub trait MetadataRepository: std::fmt::Debug + Send + Sync {
    fn get_all(&self) -> DomainResult<Vec<MetadataEntry>>;

    fn get_by_id(&self, id: &str) -> DomainResult<Option<MetadataEntry>>;

    /// Append a new entry
    fn add(&self, entry: &MetadataEntry) -> DomainResult<()>;

    /// Replace the entry with the same id, keeping its position
    fn update(&self, entry: &MetadataEntry) -> DomainResult<()>;

    fn delete(&self, id: &str) -> DomainResult<bool>;
}
