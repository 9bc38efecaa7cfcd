// src/config.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::pagination::DEFAULT_PAGE_SIZE;
use crate::domain::refresh::DEFAULT_REFRESH_AFTER_DAYS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, instrument, trace, warn};

pub const ENV_DATA_DIR: &str = "LINKSHELF_DATA_DIR";
pub const ENV_PAGE_SIZE: &str = "LINKSHELF_PAGE_SIZE";
pub const ENV_METADATA_PROVIDER: &str = "LINKSHELF_METADATA_PROVIDER";
pub const ENV_OPENGRAPH_APP_ID: &str = "LINKSHELF_OPENGRAPH_APP_ID";

pub const DEFAULT_OPENGRAPH_API_URL: &str = "https://opengraph.io/api/1.1/site";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataProviderKind {
    /// opengraph.io site API, needs an app id
    OpenGraph,
    /// Scrape the page HTML directly
    Html,
}

impl FromStr for MetadataProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "opengraph" => Ok(Self::OpenGraph),
            "html" => Ok(Self::Html),
            other => Err(DomainError::Other(format!(
                "Unknown metadata provider '{}', expected 'opengraph' or 'html'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataOpts {
    #[serde(default = "default_provider")]
    pub provider: MetadataProviderKind,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// opengraph.io app id
    #[serde(default)]
    pub app_id: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Entries older than this many whole days are fetched again
    #[serde(default = "default_refresh_after_days")]
    pub refresh_after_days: i64,
}

fn default_provider() -> MetadataProviderKind {
    MetadataProviderKind::OpenGraph
}

fn default_api_url() -> String {
    DEFAULT_OPENGRAPH_API_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_refresh_after_days() -> i64 {
    DEFAULT_REFRESH_AFTER_DAYS
}

impl Default for MetadataOpts {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: default_api_url(),
            app_id: String::new(),
            timeout_ms: default_timeout_ms(),
            refresh_after_days: default_refresh_after_days(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Directory holding the bookmark and metadata stores
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub metadata: MetadataOpts,
}

fn default_data_dir() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/linkshelf")
        .to_string_lossy()
        .to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            page_size: default_page_size(),
            metadata: MetadataOpts::default(),
        }
    }
}

impl Settings {
    /// Data directory with `~` and environment variables expanded
    pub fn data_path(&self) -> PathBuf {
        match shellexpand::full(&self.data_dir) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(e) => {
                debug!("Could not expand data_dir {}: {}", self.data_dir, e);
                PathBuf::from(&self.data_dir)
            }
        }
    }

    fn sanitize(mut self) -> Self {
        if self.page_size == 0 {
            warn!("page_size must be positive, using {}", DEFAULT_PAGE_SIZE);
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.metadata.refresh_after_days < 0 {
            warn!(
                "refresh_after_days must not be negative, using {}",
                DEFAULT_REFRESH_AFTER_DAYS
            );
            self.metadata.refresh_after_days = DEFAULT_REFRESH_AFTER_DAYS;
        }
        self
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/linkshelf/config.toml"))
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str::<Settings>(&text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Loads settings: defaults, then the config file, then environment overrides.
///
/// An explicitly given config file must exist and parse; the default location is
/// optional.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => {
            trace!("Loading config from: {:?}", path);
            read_config_file(path)?
        }
        None => match default_config_file() {
            Some(path) if path.exists() => {
                trace!("Loading config from: {:?}", path);
                read_config_file(&path)?
            }
            _ => Settings::default(),
        },
    };

    if let Ok(data_dir) = std::env::var(ENV_DATA_DIR) {
        trace!("Using {} from environment: {}", ENV_DATA_DIR, data_dir);
        settings.data_dir = data_dir;
    }

    if let Ok(page_size) = std::env::var(ENV_PAGE_SIZE) {
        match page_size.parse::<usize>() {
            Ok(n) => settings.page_size = n,
            Err(_) => warn!("Ignoring invalid {}: {}", ENV_PAGE_SIZE, page_size),
        }
    }

    if let Ok(provider) = std::env::var(ENV_METADATA_PROVIDER) {
        settings.metadata.provider = provider.parse()?;
    }

    if let Ok(app_id) = std::env::var(ENV_OPENGRAPH_APP_ID) {
        trace!("Using {} from environment", ENV_OPENGRAPH_APP_ID);
        settings.metadata.app_id = app_id;
    }

    let settings = settings.sanitize();
    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::EnvGuard;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config_file(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).unwrap();
        (temp_dir, config_path)
    }

    fn clear_env() {
        for var in [
            ENV_DATA_DIR,
            ENV_PAGE_SIZE,
            ENV_METADATA_PROVIDER,
            ENV_OPENGRAPH_APP_ID,
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn given_config_file_when_load_then_values_used() {
        let _guard = EnvGuard::new();
        clear_env();
        let (_dir, path) = create_temp_config_file(
            r#"
            data_dir = "/tmp/shelf"
            page_size = 5

            [metadata]
            provider = "html"
            timeout_ms = 1500
            "#,
        );

        let settings = load_settings(Some(&path)).unwrap();

        assert_eq!(settings.data_dir, "/tmp/shelf");
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.metadata.provider, MetadataProviderKind::Html);
        assert_eq!(settings.metadata.timeout_ms, 1500);
        assert_eq!(settings.metadata.api_url, DEFAULT_OPENGRAPH_API_URL);
        assert_eq!(settings.metadata.refresh_after_days, 7);
    }

    #[test]
    #[serial]
    fn given_env_vars_when_load_then_override_config_file() {
        let _guard = EnvGuard::new();
        clear_env();
        let (_dir, path) = create_temp_config_file(
            r#"
            data_dir = "/from/file"
            [metadata]
            provider = "html"
            "#,
        );
        env::set_var(ENV_DATA_DIR, "/from/env");
        env::set_var(ENV_PAGE_SIZE, "25");
        env::set_var(ENV_METADATA_PROVIDER, "opengraph");
        env::set_var(ENV_OPENGRAPH_APP_ID, "abc123");

        let settings = load_settings(Some(&path)).unwrap();

        assert_eq!(settings.data_dir, "/from/env");
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.metadata.provider, MetadataProviderKind::OpenGraph);
        assert_eq!(settings.metadata.app_id, "abc123");
    }

    #[test]
    #[serial]
    fn given_zero_page_size_when_load_then_default_used() {
        let _guard = EnvGuard::new();
        clear_env();
        env::set_var(ENV_PAGE_SIZE, "0");
        let (_dir, path) = create_temp_config_file("");

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    #[serial]
    fn given_unknown_provider_when_load_then_error() {
        let _guard = EnvGuard::new();
        clear_env();
        env::set_var(ENV_METADATA_PROVIDER, "carrier-pigeon");
        let (_dir, path) = create_temp_config_file("");

        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn given_missing_explicit_config_when_load_then_error() {
        let _guard = EnvGuard::new();
        clear_env();
        assert!(load_settings(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[test]
    fn given_tilde_data_dir_when_data_path_then_expanded() {
        let settings = Settings {
            data_dir: "~/shelf".to_string(),
            ..Settings::default()
        };
        assert!(!settings.data_path().to_string_lossy().starts_with('~'));
        assert!(settings.data_path().ends_with("shelf"));
    }

    #[test]
    fn given_defaults_when_generate_config_then_parses_back() {
        let text = generate_default_config();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(parsed.metadata.provider, MetadataProviderKind::OpenGraph);
        assert!(text.contains("[metadata]"));
    }
}
