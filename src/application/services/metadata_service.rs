// src/application/services/metadata_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::bookmark::Bookmark;
use crate::domain::metadata::MetadataEntry;
use std::fmt::Debug;

/// Service interface for the metadata store and its refresh policy
pub trait MetadataService: Send + Sync + Debug {
    /// Add an entry; returns false when one with this id exists
    fn add_metadata(&self, entry: MetadataEntry) -> ApplicationResult<bool>;

    /// Replace an existing entry, restamping it; returns false when there is none
    fn edit_metadata(&self, entry: MetadataEntry) -> ApplicationResult<bool>;

    fn remove_metadata(&self, id: &str) -> ApplicationResult<bool>;

    fn get_metadata(&self, id: &str) -> ApplicationResult<Option<MetadataEntry>>;

    fn get_all_metadata(&self) -> ApplicationResult<Vec<MetadataEntry>>;

    /// Fetch preview data if the refresh policy asks for it
    fn sync_bookmark(&self, bookmark: &Bookmark) -> ApplicationResult<MetadataEntry>;

    /// Fetch preview data unconditionally
    fn refresh_bookmark(&self, bookmark: &Bookmark) -> ApplicationResult<MetadataEntry>;
}
