// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("Bookmark operation failed: {0}")]
    BookmarkOperationFailed(String),

    #[error("Metadata operation failed: {0}")]
    MetadataOperationFailed(String),

    #[error("Cannot fetch metadata: {0}")]
    CannotFetchMetadata(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        let context = context.into();
        match self {
            DomainError::BookmarkOperationFailed(msg) => {
                DomainError::BookmarkOperationFailed(format!("{}: {}", context, msg))
            }
            DomainError::MetadataOperationFailed(msg) => {
                DomainError::MetadataOperationFailed(format!("{}: {}", context, msg))
            }
            DomainError::CannotFetchMetadata(msg) => {
                DomainError::CannotFetchMetadata(format!("{}: {}", context, msg))
            }
            DomainError::StorageError(msg) => {
                DomainError::StorageError(format!("{}: {}", context, msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context, msg)),
            err => DomainError::Other(format!("{}: {}", context, err)),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_storage_error_when_context_then_prefixes_message() {
        let err = DomainError::StorageError("disk full".to_string()).context("saving bookmarks");
        assert_eq!(
            err.to_string(),
            "Storage error: saving bookmarks: disk full"
        );
    }

    #[test]
    fn given_fetch_error_when_context_then_variant_kept() {
        let err = DomainError::CannotFetchMetadata("no client".to_string()).context("provider");
        assert!(matches!(err, DomainError::CannotFetchMetadata(_)));
        assert_eq!(err.to_string(), "Cannot fetch metadata: provider: no client");
    }

    #[test]
    fn given_not_found_when_context_then_wraps_as_other() {
        let err = DomainError::BookmarkNotFound("abc".to_string()).context("edit");
        assert!(matches!(err, DomainError::Other(_)));
        assert_eq!(err.to_string(), "Other error: edit: Bookmark not found: abc");
    }
}
