// src/infrastructure/di/service_container.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::services::metadata_service::MetadataService;
use crate::application::{BookmarkServiceImpl, MetadataServiceImpl};
use crate::config::{MetadataProviderKind, Settings};
use crate::domain::error::DomainError;
use crate::domain::refresh::RefreshPolicy;
use crate::domain::repositories::repository::MetadataRepository;
use crate::domain::services::metadata_provider::MetadataProvider;
use crate::infrastructure::http::{HtmlMetadataProvider, OpenGraphProvider};
use crate::infrastructure::repositories::{JsonBookmarkRepository, JsonMetadataRepository};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    pub bookmark_repository: Arc<JsonBookmarkRepository>,
    pub metadata_repository: Arc<JsonMetadataRepository>,
    pub metadata_provider: Arc<dyn MetadataProvider>,
    pub bookmark_service: Arc<dyn BookmarkService>,
    pub metadata_service: Arc<dyn MetadataService>,
}

impl ServiceContainer {
    /// Create all services with explicit dependency injection
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        let data_dir = config.data_path();
        debug!("Using data directory {:?}", data_dir);

        let (bookmark_repository, metadata_repository) = Self::create_repositories(&data_dir)?;
        let metadata_provider = Self::create_provider(config)?;
        Ok(Self::with_parts(
            bookmark_repository,
            metadata_repository,
            metadata_provider,
            config,
        ))
    }

    /// Wires services around the given stores and provider
    pub fn with_parts(
        bookmark_repository: Arc<JsonBookmarkRepository>,
        metadata_repository: Arc<JsonMetadataRepository>,
        metadata_provider: Arc<dyn MetadataProvider>,
        config: &Settings,
    ) -> Self {
        let bookmark_service = Arc::new(BookmarkServiceImpl::new(
            bookmark_repository.clone(),
            metadata_repository.clone() as Arc<dyn MetadataRepository>,
            config.page_size,
        ));

        let metadata_service = Arc::new(MetadataServiceImpl::new(
            metadata_repository.clone(),
            metadata_provider.clone(),
            RefreshPolicy::new(config.metadata.refresh_after_days),
        ));

        Self {
            bookmark_repository,
            metadata_repository,
            metadata_provider,
            bookmark_service,
            metadata_service,
        }
    }

    fn create_repositories(
        data_dir: &Path,
    ) -> ApplicationResult<(Arc<JsonBookmarkRepository>, Arc<JsonMetadataRepository>)> {
        let bookmarks = JsonBookmarkRepository::in_dir(data_dir)
            .map_err(|e| ApplicationError::Domain(e).context("Failed to open bookmark store"))?;
        let metadata = JsonMetadataRepository::in_dir(data_dir)
            .map_err(|e| ApplicationError::Domain(e).context("Failed to open metadata store"))?;
        debug!(
            "Bookmark store {:?}, metadata store {:?}",
            bookmarks.path(),
            metadata.path()
        );
        Ok((Arc::new(bookmarks), Arc::new(metadata)))
    }

    fn create_provider(config: &Settings) -> ApplicationResult<Arc<dyn MetadataProvider>> {
        let opts = &config.metadata;
        let provider: Arc<dyn MetadataProvider> = match opts.provider {
            MetadataProviderKind::OpenGraph if opts.app_id.trim().is_empty() => {
                warn!("No opengraph.io app_id configured, scraping pages directly instead");
                Arc::new(Self::html_provider(opts.timeout_ms)?)
            }
            MetadataProviderKind::OpenGraph => Arc::new(
                OpenGraphProvider::new(&opts.api_url, &opts.app_id, opts.timeout_ms)
                    .map_err(|e| DomainError::from(e).context("opengraph provider"))?,
            ),
            MetadataProviderKind::Html => Arc::new(Self::html_provider(opts.timeout_ms)?),
        };
        debug!("Metadata provider: {:?}", provider);
        Ok(provider)
    }

    fn html_provider(timeout_ms: u64) -> ApplicationResult<HtmlMetadataProvider> {
        HtmlMetadataProvider::new(timeout_ms).map_err(|e| ApplicationError::Domain(e.into()))
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("bookmark_repository", &"Arc<JsonBookmarkRepository>")
            .field("metadata_repository", &"Arc<JsonMetadataRepository>")
            .field("metadata_provider", &self.metadata_provider)
            .field("bookmark_service", &"Arc<dyn BookmarkService>")
            .field("metadata_service", &"Arc<dyn MetadataService>")
            .finish()
    }
}
