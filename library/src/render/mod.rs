pub mod camera;
pub mod post_processing;
pub mod render_error;
pub mod render_stage;
pub mod scene_parameters;
pub mod session;
pub(crate) mod uniforms;
