// src/domain/validation.rs
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Please fill in")]
    Empty,

    #[error("Please submit a valid URL")]
    InvalidUrl,
}

/// Checks that `url` is non-empty, absolute, and has a hostname.
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    if url.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    match Url::parse(url) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(()),
        _ => Err(UrlValidationError::InvalidUrl),
    }
}
