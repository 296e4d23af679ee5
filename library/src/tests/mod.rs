pub(crate) mod scaffolding;
mod engine_protocol;
