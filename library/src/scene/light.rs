use crate::geometry::alias::{Point, Quartet};
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::{GpuSerializable, GpuSerializationSize};
use cgmath::{EuclideanSpace, Zero};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use palette::Srgb;
use strum_macros::{Display, EnumIter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive, EnumIter, Display)]
#[repr(i32)]
pub enum LightKind {
    Sphere = 0,
    XyPlane = 1,
    XzPlane = 2,
    Spot = 3,
}

/// Everything about a light except its kind, which is fixed when the
/// light is added. `height` only matters for the rectangular kinds and
/// `direction` for spots.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightParameters {
    pub center: Point,
    pub radius: f32,
    pub height: f32,
    pub direction: Quartet,
    pub color: Srgb,
    pub intensity: f32,
}

impl Default for LightParameters {
    fn default() -> Self {
        Self {
            center: Point::origin(),
            radius: 0.0,
            height: 0.0,
            direction: Quartet::zero(),
            color: Srgb::new(1.0, 1.0, 1.0),
            intensity: 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    kind: LightKind,
    parameters: LightParameters,
}

impl Light {
    #[must_use]
    pub(crate) fn new(kind: LightKind) -> Self {
        Self { kind, parameters: LightParameters::default() }
    }

    pub(crate) fn set_parameters(&mut self, parameters: &LightParameters) {
        self.parameters = *parameters;
    }

    #[must_use]
    pub fn kind(&self) -> LightKind {
        self.kind
    }

    #[must_use]
    pub fn parameters(&self) -> &LightParameters {
        &self.parameters
    }
}

impl GpuSerializationSize for Light {
    const SERIALIZED_QUARTET_COUNT: usize = 4;
}

impl GpuSerializable for Light {
    fn serialize_into(&self, container: &mut GpuReadySerializationBuffer) {
        let parameters = &self.parameters;
        container.write_quartet_f32(parameters.center.x, parameters.center.y, parameters.center.z, parameters.radius);
        container.write_padded_quartet_f32(parameters.color.red, parameters.color.green, parameters.color.blue);
        container.write_vector(parameters.direction);
        container.write_quartet(|writer| {
            writer
                .write_signed(self.kind.into())
                .write_float_32(parameters.intensity)
                .write_float_32(parameters.height);
        });
    }
}
