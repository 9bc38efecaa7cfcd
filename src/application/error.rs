// src/application/error.rs
use crate::domain::error::DomainError;
use crate::domain::validation::UrlValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("Bookmark already exists: '{name}' {url}")]
    BookmarkExists { name: String, url: String },

    #[error("Ambiguous bookmark id '{0}' matches {1} bookmarks")]
    AmbiguousId(String, usize),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            ApplicationError::Validation(msg) => {
                ApplicationError::Validation(format!("{}: {}", context.into(), msg))
            }
            err => ApplicationError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}

impl From<UrlValidationError> for ApplicationError {
    fn from(err: UrlValidationError) -> Self {
        ApplicationError::Validation(err.to_string())
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        ApplicationError::Domain(DomainError::IoError(err))
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
