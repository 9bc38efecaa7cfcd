// src/application/services/bookmark_service_impl.rs
use std::sync::Arc;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::BookmarkService;
use crate::domain::bookmark::Bookmark;
use crate::domain::pagination::{paginate, Page};
use crate::domain::repositories::repository::{BookmarkRepository, MetadataRepository};
use crate::domain::validation::validate_url;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct BookmarkServiceImpl<R: BookmarkRepository> {
    repository: Arc<R>,
    metadata_repository: Arc<dyn MetadataRepository>,
    page_size: usize,
}

impl<R: BookmarkRepository> BookmarkServiceImpl<R> {
    pub fn new(
        repository: Arc<R>,
        metadata_repository: Arc<dyn MetadataRepository>,
        page_size: usize,
    ) -> Self {
        Self {
            repository,
            metadata_repository,
            page_size,
        }
    }

    fn find_duplicate(&self, name: &str, url: &str) -> ApplicationResult<Option<Bookmark>> {
        Ok(self
            .repository
            .get_all()?
            .into_iter()
            .find(|bm| bm.same_content(name, url)))
    }
}

impl<R: BookmarkRepository> BookmarkService for BookmarkServiceImpl<R> {
    #[instrument(skip(self), level = "debug")]
    fn add_bookmark(&self, name: &str, url: &str) -> ApplicationResult<Bookmark> {
        validate_url(url)?;

        if let Some(existing) = self.find_duplicate(name, url)? {
            debug!("Duplicate of {}", existing.id);
            return Err(ApplicationError::BookmarkExists {
                name: name.to_string(),
                url: url.to_string(),
            });
        }

        let bookmark = Bookmark::new(name, url);
        self.repository.add(&bookmark)?;
        Ok(bookmark)
    }

    #[instrument(skip(self), level = "debug")]
    fn edit_bookmark(&self, id: &str, name: &str, url: &str) -> ApplicationResult<Bookmark> {
        validate_url(url)?;

        let mut bookmark = self
            .repository
            .get_by_id(id)?
            .ok_or_else(|| ApplicationError::BookmarkNotFound(id.to_string()))?;

        // itself included: an edit that changes nothing is rejected as well
        if self.find_duplicate(name, url)?.is_some() {
            return Err(ApplicationError::BookmarkExists {
                name: name.to_string(),
                url: url.to_string(),
            });
        }

        bookmark.edit(name, url);
        self.repository.update(&bookmark)?;
        Ok(bookmark)
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_bookmark(&self, id: &str) -> ApplicationResult<bool> {
        let removed = self.repository.delete(id)?;
        if self.metadata_repository.delete(id)? {
            debug!("Removed metadata entry for {}", id);
        }
        Ok(removed)
    }

    #[instrument(skip(self), level = "trace")]
    fn get_bookmark(&self, id: &str) -> ApplicationResult<Option<Bookmark>> {
        Ok(self.repository.get_by_id(id)?)
    }

    fn get_all_bookmarks(&self) -> ApplicationResult<Vec<Bookmark>> {
        Ok(self.repository.get_all()?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_page(&self, page: usize) -> ApplicationResult<Page<Bookmark>> {
        let bookmarks = self.repository.get_all()?;
        Ok(paginate(&bookmarks, page, self.page_size))
    }

    #[instrument(skip(self), level = "debug")]
    fn resolve_id(&self, id_or_prefix: &str) -> ApplicationResult<Bookmark> {
        let needle = id_or_prefix.trim();
        if needle.is_empty() {
            return Err(ApplicationError::Validation(
                "Bookmark id must not be empty".to_string(),
            ));
        }
        if let Some(bookmark) = self.repository.get_by_id(needle)? {
            return Ok(bookmark);
        }

        let mut matches: Vec<Bookmark> = self
            .repository
            .get_all()?
            .into_iter()
            .filter(|bm| bm.id.starts_with(needle))
            .collect();

        match matches.len() {
            0 => Err(ApplicationError::BookmarkNotFound(needle.to_string())),
            1 => Ok(matches.remove(0)),
            n => Err(ApplicationError::AmbiguousId(needle.to_string(), n)),
        }
    }
}
