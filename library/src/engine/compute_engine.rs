use crate::engine::engine_error::EngineError;
use crate::output::color_depth::ColorDepth;
use crate::output::frame_buffer_size::FrameBufferSize;
use crate::render::camera::CameraState;
use crate::render::post_processing::PostProcessing;
use crate::render::scene_parameters::SceneParameters;
use crate::scene::capacities::{SceneCapacities, TextureFormat};

/// Device buffer sizes, fixed for the lifetime of a session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EngineSetup {
    pub capacities: SceneCapacities,
    pub texture_format: TextureFormat,
    pub frame_size: FrameBufferSize,
    pub color_depth: ColorDepth,
    pub random_table_size: usize,
    pub level_table_size: usize,
}

/// Serialized registry: `bytes` always holds at least one object, while
/// `objects_count` is the number of meaningful ones (possibly zero).
#[derive(Copy, Clone, Debug)]
pub struct Payload<'a> {
    pub bytes: &'a [u8],
    pub objects_count: usize,
}

impl<'a> Payload<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8], objects_count: usize) -> Self {
        Self { bytes, objects_count }
    }
}

/// Data re-sent with every frame.
#[derive(Copy, Clone, Debug)]
pub struct DynamicPayload<'a> {
    pub boxes: Payload<'a>,
    pub primitives: Payload<'a>,
    pub lights: Payload<'a>,
}

/// Data sent once and kept on the device until invalidated.
#[derive(Copy, Clone, Debug)]
pub struct StaticPayload<'a> {
    pub materials: Payload<'a>,
    pub textures: Payload<'a>,
    pub random_table: &'a [f32],
    pub level_table: &'a [i32],
}

#[derive(Copy, Clone, Debug)]
pub struct KernelLaunch<'a> {
    pub uniforms: &'a [u8],
    pub camera: &'a CameraState,
    pub scene_parameters: &'a SceneParameters,
    pub post_processing: &'a PostProcessing,
    pub draft: u32,
    pub timer: f32,
}

/// Device that owns the scene copies and the ray-tracing kernel.
/// A failed call leaves the host side untouched; the caller decides
/// whether to retry with the next frame.
pub trait ComputeEngine {
    fn initialize(&mut self, setup: &EngineSetup) -> Result<(), EngineError>;

    fn upload_dynamic(&mut self, payload: &DynamicPayload) -> Result<(), EngineError>;

    fn upload_static(&mut self, payload: &StaticPayload) -> Result<(), EngineError>;

    fn execute(&mut self, launch: &KernelLaunch) -> Result<(), EngineError>;

    /// Copies the last rendered frame into the beginning of `target`.
    fn read_back(&mut self, target: &mut [u8]) -> Result<(), EngineError>;

    fn shutdown(&mut self);
}
