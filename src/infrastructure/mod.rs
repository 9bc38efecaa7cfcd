pub mod di;
pub mod error;
pub mod http;
pub mod json_store;
pub mod repositories;
