pub mod json_bookmark_repository;
pub mod json_metadata_repository;

pub use json_bookmark_repository::JsonBookmarkRepository;
pub use json_metadata_repository::JsonMetadataRepository;
