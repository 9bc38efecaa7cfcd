// src/infrastructure/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Network(msg) => DomainError::CannotFetchMetadata(msg),
            InfrastructureError::Serialization(msg) => DomainError::SerializationError(msg),
            InfrastructureError::FileSystem(msg) => DomainError::StorageError(msg),
            InfrastructureError::Lock(msg) => DomainError::StorageError(msg),
        }
    }
}

pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
