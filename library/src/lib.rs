//#![deny(warnings)]

#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::bool_comparison)]
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod engine;
pub mod geometry;
pub mod index;
pub mod loaders;
pub mod output;
pub mod render;
pub mod scene;
pub mod service;
pub mod sync;
pub mod utils;
mod serialization;
mod tests;

pub use crate::config::ServiceConfig;
pub use crate::engine::compute_engine::ComputeEngine;
pub use crate::engine::headless_engine::HeadlessEngine;
pub use crate::render::session::RenderSession;
pub use crate::service::bitmap_provider::BitmapProvider;
pub use crate::service::streaming_service::StreamingService;
