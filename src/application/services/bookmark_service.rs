// src/application/services/bookmark_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::bookmark::Bookmark;
use crate::domain::pagination::Page;
use std::fmt::Debug;

/// Service interface for the bookmark store
pub trait BookmarkService: Send + Sync + Debug {
    /// Add a bookmark unless one with the same name and url exists
    fn add_bookmark(&self, name: &str, url: &str) -> ApplicationResult<Bookmark>;

    /// Replace name and url of an existing bookmark
    fn edit_bookmark(&self, id: &str, name: &str, url: &str) -> ApplicationResult<Bookmark>;

    /// Delete a bookmark together with its metadata entry
    fn delete_bookmark(&self, id: &str) -> ApplicationResult<bool>;

    fn get_bookmark(&self, id: &str) -> ApplicationResult<Option<Bookmark>>;

    /// All bookmarks, newest first
    fn get_all_bookmarks(&self) -> ApplicationResult<Vec<Bookmark>>;

    /// One page of bookmarks; out-of-range pages are clamped
    fn get_page(&self, page: usize) -> ApplicationResult<Page<Bookmark>>;

    /// Find a bookmark by full id or unique id prefix
    fn resolve_id(&self, id_or_prefix: &str) -> ApplicationResult<Bookmark>;
}
