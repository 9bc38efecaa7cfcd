pub mod metadata_provider;
