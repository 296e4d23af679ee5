pub mod compute_engine;
pub mod engine_error;
pub mod headless_engine;
