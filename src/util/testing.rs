// src/util/testing.rs

use std::env;
use std::sync::{Arc, Mutex, OnceLock};
use tempfile::TempDir;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::{ENV_DATA_DIR, ENV_METADATA_PROVIDER, ENV_OPENGRAPH_APP_ID, ENV_PAGE_SIZE};
use crate::domain::metadata::{LinkPreview, MetadataStatus};
use crate::domain::services::metadata_provider::MetadataProvider;
use crate::infrastructure::repositories::{JsonBookmarkRepository, JsonMetadataRepository};

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    pub initialized_at: chrono::DateTime<chrono::Utc>,
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes the global test environment exactly once.
/// - Sets up logging
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
        TestEnv {
            initialized_at: chrono::Utc::now(),
        }
    })
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["html5ever", "selectors", "reqwest", "mio", "want", "hyper_util"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

const GUARDED_VARS: [&str; 4] = [
    ENV_DATA_DIR,
    ENV_PAGE_SIZE,
    ENV_METADATA_PROVIDER,
    ENV_OPENGRAPH_APP_ID,
];

/// Restores the `LINKSHELF_*` environment on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            saved: GUARDED_VARS
                .iter()
                .map(|name| (*name, env::var(name).ok()))
                .collect(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(val) => env::set_var(name, val),
                None => env::remove_var(name),
            }
        }
    }
}

/// Both JSON stores in a private temp directory, removed on drop.
#[derive(Debug)]
pub struct TestStores {
    pub dir: TempDir,
    pub bookmarks: Arc<JsonBookmarkRepository>,
    pub metadata: Arc<JsonMetadataRepository>,
}

impl Default for TestStores {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStores {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let bookmarks = JsonBookmarkRepository::in_dir(dir.path())
            .expect("Failed to open bookmark store");
        let metadata = JsonMetadataRepository::in_dir(dir.path())
            .expect("Failed to open metadata store");
        Self {
            dir,
            bookmarks: Arc::new(bookmarks),
            metadata: Arc::new(metadata),
        }
    }
}

/// Answers every fetch with the same preview and records the requested urls.
#[derive(Debug)]
pub struct RecordingProvider {
    preview: LinkPreview,
    calls: Mutex<Vec<String>>,
}

impl RecordingProvider {
    pub fn new(preview: LinkPreview) -> Self {
        Self {
            preview,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_title(title: &str) -> Self {
        Self::new(LinkPreview {
            title: Some(title.to_string()),
            status: MetadataStatus::Success,
            ..LinkPreview::failed()
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl MetadataProvider for RecordingProvider {
    fn fetch(&self, url: &str) -> LinkPreview {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        self.preview.clone()
    }
}
