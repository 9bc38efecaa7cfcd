// src/domain/services/metadata_provider.rs
use crate::domain::metadata::LinkPreview;
use std::fmt::Debug;

/// Source of link-preview data.
///
/// Implementations never fail: transport, HTTP and parse errors are reported as a
/// preview with `MetadataStatus::Error`.
pub trait MetadataProvider: Debug + Send + Sync {
    fn fetch(&self, url: &str) -> LinkPreview;
}
