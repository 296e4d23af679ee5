pub mod bitmap_format;
pub mod bitmap_provider;
pub mod streaming_service;
