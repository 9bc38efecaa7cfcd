pub mod bookmark_service;
pub mod bookmark_service_impl;
pub mod metadata_service;
pub mod metadata_service_impl;
