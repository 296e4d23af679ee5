use crate::geometry::alias::{Point, Vector};
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::{GpuSerializable, GpuSerializationSize};
use cgmath::Zero;
use float_cmp::approx_eq;

pub const DEFAULT_EYE_DISTANCE: f32 = -5000.0;

const CHANGE_TOLERANCE: f32 = 1e-4;

/// Viewer pose as the kernel sees it: the eye and the view target are
/// absolute, the rotation is the sum of all angle deltas received so far.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraState {
    eye: Point,
    direction: Point,
    angles: Vector,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            eye: Point::new(0.0, 0.0, DEFAULT_EYE_DISTANCE),
            direction: Point::new(0.0, 0.0, 0.0),
            angles: Vector::zero(),
        }
    }
}

impl CameraState {
    #[must_use]
    pub fn new(eye: Point, direction: Point, angles: Vector) -> Self {
        Self { eye, direction, angles }
    }

    pub fn apply(&mut self, eye: Point, direction: Point, angles_delta: Vector) {
        self.eye = eye;
        self.direction = direction;
        self.angles += angles_delta;
    }

    #[must_use]
    pub fn eye(&self) -> Point {
        self.eye
    }

    #[must_use]
    pub fn direction(&self) -> Point {
        self.direction
    }

    #[must_use]
    pub fn angles(&self) -> Vector {
        self.angles
    }

    /// Compares poses with a small tolerance; used to decide whether the
    /// accumulated image is still valid for the new pose.
    #[must_use]
    pub fn same_view_as(&self, other: &CameraState) -> bool {
        let close = |left: f32, right: f32| approx_eq!(f32, left, right, epsilon = CHANGE_TOLERANCE);
        let points_close = |left: Point, right: Point| close(left.x, right.x) && close(left.y, right.y) && close(left.z, right.z);

        points_close(self.eye, other.eye)
            && points_close(self.direction, other.direction)
            && close(self.angles.x, other.angles.x)
            && close(self.angles.y, other.angles.y)
            && close(self.angles.z, other.angles.z)
    }
}

impl GpuSerializationSize for CameraState {
    const SERIALIZED_QUARTET_COUNT: usize = 3;
}

impl GpuSerializable for CameraState {
    fn serialize_into(&self, container: &mut GpuReadySerializationBuffer) {
        container.write_padded_quartet_f32(self.eye.x, self.eye.y, self.eye.z);
        container.write_padded_quartet_f32(self.direction.x, self.direction.y, self.direction.z);
        container.write_padded_quartet_f32(self.angles.x, self.angles.y, self.angles.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::gpu_ready_serialization_buffer::decode_floats;

    #[test]
    fn test_angles_accumulate() {
        let mut system_under_test = CameraState::default();

        system_under_test.apply(Point::new(1.0, 2.0, 3.0), Point::new(0.0, 0.0, 1.0), Vector::new(0.1, 0.2, 0.0));
        system_under_test.apply(Point::new(4.0, 5.0, 6.0), Point::new(0.0, 1.0, 0.0), Vector::new(0.1, -0.1, 0.5));

        assert_eq!(system_under_test.eye(), Point::new(4.0, 5.0, 6.0));
        assert_eq!(system_under_test.direction(), Point::new(0.0, 1.0, 0.0));
        assert!(system_under_test.same_view_as(&CameraState::new(Point::new(4.0, 5.0, 6.0), Point::new(0.0, 1.0, 0.0), Vector::new(0.2, 0.1, 0.5))));
    }

    #[test]
    fn test_zero_delta_keeps_view() {
        let mut system_under_test = CameraState::default();
        let before = system_under_test;

        system_under_test.apply(before.eye(), before.direction(), Vector::zero());

        assert_eq!(system_under_test.same_view_as(&before), true);
    }

    #[test]
    fn test_moved_eye_changes_view() {
        let mut system_under_test = CameraState::default();
        let before = system_under_test;

        system_under_test.apply(Point::new(0.0, 10.0, DEFAULT_EYE_DISTANCE), before.direction(), Vector::zero());

        assert_eq!(system_under_test.same_view_as(&before), false);
    }

    #[test]
    fn test_serialization() {
        let system_under_test = CameraState::new(Point::new(1.0, 2.0, 3.0), Point::new(4.0, 5.0, 6.0), Vector::new(7.0, 8.0, 9.0));
        let mut container = GpuReadySerializationBuffer::new(1, CameraState::SERIALIZED_QUARTET_COUNT);

        system_under_test.serialize_into(&mut container);
        let floats = decode_floats(container.backend());

        assert_eq!(&floats[0..3], &[1.0, 2.0, 3.0]);
        assert_eq!(&floats[4..7], &[4.0, 5.0, 6.0]);
        assert_eq!(&floats[8..11], &[7.0, 8.0, 9.0]);
    }
}
