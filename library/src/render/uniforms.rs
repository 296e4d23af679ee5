use crate::output::color_depth::ColorDepth;
use crate::output::frame_buffer_size::FrameBufferSize;
use crate::render::camera::CameraState;
use crate::render::post_processing::PostProcessing;
use crate::render::scene_parameters::SceneParameters;
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::{GpuSerializable, GpuSerializationSize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ObjectCounts {
    pub(crate) boxes: usize,
    pub(crate) primitives: usize,
    pub(crate) lights: usize,
    pub(crate) materials: usize,
}

/// Per-launch constants of the kernel.
pub(crate) struct Uniforms<'a> {
    pub(crate) frame_buffer_size: FrameBufferSize,
    pub(crate) color_depth: ColorDepth,
    pub(crate) scene_parameters: &'a SceneParameters,
    pub(crate) post_processing: &'a PostProcessing,
    pub(crate) camera: &'a CameraState,
    pub(crate) counts: ObjectCounts,
    pub(crate) draft: u32,
    pub(crate) timer: f32,
}

impl Uniforms<'_> {
    const SERIALIZED_QUARTET_COUNT: usize = 7 + CameraState::SERIALIZED_QUARTET_COUNT;

    #[must_use]
    pub(crate) fn serialize(&self) -> GpuReadySerializationBuffer {
        let mut result = GpuReadySerializationBuffer::new(1, Self::SERIALIZED_QUARTET_COUNT);
        let parameters = self.scene_parameters;

        result.write_quartet(|writer| {
            writer.write_unsigned(self.frame_buffer_size.width());
            writer.write_unsigned(self.frame_buffer_size.height());
            writer.write_unsigned(self.color_depth.bytes_per_pixel() as u32);
            writer.write_unsigned(parameters.path_tracing_iteration);
        });

        result.write_quartet(|writer| {
            writer.write_unsigned(self.draft);
            writer.write_float_32(self.timer);
            writer.write_float_32(parameters.transparent_color);
            writer.write_float_32(parameters.view_distance);
        });

        result.write_quartet(|writer| {
            writer.write_bool(parameters.shadows_enabled);
            writer.write_float_32(parameters.shadow_intensity);
            writer.write_unsigned(parameters.ray_iterations);
            writer.write_bool(parameters.render_boxes);
        });

        let background = parameters.background_color;
        result.write_quartet(|writer| {
            writer.write_float_32(background.red);
            writer.write_float_32(background.green);
            writer.write_float_32(background.blue);
            writer.write_unsigned(parameters.max_path_tracing_iterations);
        });

        result.write_quartet(|writer| {
            writer.write_bool(parameters.stereo_enabled);
            writer.write_float_32(parameters.stereo_eye_separation);
            writer.write_float_32(parameters.draft);
        });

        result.write_quartet(|writer| {
            writer.write_signed(self.post_processing.effect.into());
            writer.write_float_32(self.post_processing.focus_distance);
            writer.write_float_32(self.post_processing.strength);
            writer.write_unsigned(self.post_processing.samples);
        });

        result.write_quartet(|writer| {
            writer.write_unsigned(self.counts.boxes as u32);
            writer.write_unsigned(self.counts.primitives as u32);
            writer.write_unsigned(self.counts.lights as u32);
            writer.write_unsigned(self.counts.materials as u32);
        });

        self.camera.serialize_into(&mut result);

        debug_assert!(result.object_fully_written());
        result
    }
}
