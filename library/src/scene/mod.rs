pub(crate) mod arena;
pub mod capacities;
pub mod container;
pub mod diagnostics;
pub mod handles;
pub mod light;
pub mod material;
pub mod primitive;
pub mod scene_error;
pub mod texture;
