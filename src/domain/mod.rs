pub mod bookmark;
pub mod error;
pub mod metadata;
pub mod pagination;
pub mod refresh;
pub mod repositories;
pub mod services;
pub mod timestamp;
pub mod validation;
