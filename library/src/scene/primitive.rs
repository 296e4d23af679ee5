use crate::geometry::alias::{Pair, Point, Quartet, Vector};
use crate::scene::capacities::TextureFormat;
use crate::scene::handles::{BoxId, MaterialHandle};
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::{GpuSerializable, GpuSerializationSize};
use cgmath::{EuclideanSpace, InnerSpace, Zero};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display, EnumCount, EnumIter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, EnumCount, EnumIter, Display)]
#[repr(i32)]
pub enum PrimitiveKind {
    Sphere = 0,
    Triangle = 1,
    Checkerboard = 2,
    Camera = 3,
    XyPlane = 4,
    YzPlane = 5,
    XzPlane = 6,
    Cylinder = 7,
    MagicCarpet = 8,
    Environment = 9,
}

/// What a caller supplies when placing a primitive. `points[0]` is the
/// center for simple shapes; triangles use all three as vertices and
/// cylinders take their axis from `points[0]` to `points[1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrimitiveGeometry {
    points: [Point; 3],
    width: f32,
    height: f32,
    padding: Pair,
}

impl PrimitiveGeometry {
    #[must_use]
    pub fn new(center: Point, width: f32, height: f32) -> Self {
        Self {
            points: [center, Point::origin(), Point::origin()],
            width,
            height,
            padding: Pair::new(1.0, 1.0),
        }
    }

    #[must_use]
    pub fn sphere(center: Point, radius: f32) -> Self {
        Self::new(center, radius, 0.0)
    }

    #[must_use]
    pub fn triangle(v0: Point, v1: Point, v2: Point) -> Self {
        Self::new(v0, 0.0, 0.0).with_points(v1, v2)
    }

    #[must_use]
    pub fn cylinder(from: Point, to: Point, radius: f32) -> Self {
        Self::new(from, radius, 0.0).with_points(to, Point::origin())
    }

    pub fn with_points(mut self, second: Point, third: Point) -> Self {
        self.points[1] = second;
        self.points[2] = third;
        self
    }

    pub fn with_padding(mut self, x: f32, y: f32) -> Self {
        self.padding = Pair::new(x, y);
        self
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.points[0] = center;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn translated(&self, delta: Vector) -> Self {
        let mut result = *self;
        for point in result.points.iter_mut() {
            *point += delta;
        }
        result
    }

    #[must_use]
    pub fn points(&self) -> &[Point; 3] {
        &self.points
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub fn padding(&self) -> Pair {
        self.padding
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    kind: PrimitiveKind,
    geometry: PrimitiveGeometry,
    box_id: Option<BoxId>,

    p0: Quartet,
    p1: Quartet,
    p2: Quartet,
    edge_normals: [Quartet; 3],
    normal: Quartet,
    size: Quartet,
    material: Option<MaterialHandle>,
    material_info: Pair,
}

impl Primitive {
    #[must_use]
    pub(crate) fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            geometry: PrimitiveGeometry::new(Point::origin(), 0.0, 0.0),
            box_id: None,
            p0: Quartet::zero(),
            p1: Quartet::zero(),
            p2: Quartet::zero(),
            edge_normals: [Quartet::zero(); 3],
            normal: Quartet::zero(),
            size: Quartet::zero(),
            material: None,
            material_info: Pair::zero(),
        }
    }

    pub(crate) fn apply(&mut self, geometry: &PrimitiveGeometry, material: Option<MaterialHandle>, texture_format: &TextureFormat) {
        let [first, second, third] = geometry.points;
        self.geometry = *geometry;
        self.p0 = first.to_vec().extend(geometry.width);
        self.p1 = second.to_vec().extend(0.0);
        self.p2 = third.to_vec().extend(0.0);

        match self.kind {
            PrimitiveKind::Triangle => {
                let edges = [second - first, third - second, first - third];
                let normal = edges[0].cross(edges[1]);
                self.p0 = edges[0].extend(geometry.width);
                self.p1 = edges[1].extend(0.0);
                self.p2 = edges[2].extend(0.0);
                for (target, edge) in self.edge_normals.iter_mut().zip(edges.iter()) {
                    *target = edge.cross(normal).extend(0.0);
                }
                self.normal = normal.extend(first.to_vec().dot(normal));
            }
            PrimitiveKind::XyPlane => self.set_normal_direction(Vector::unit_z()),
            PrimitiveKind::YzPlane => self.set_normal_direction(Vector::unit_x()),
            PrimitiveKind::XzPlane | PrimitiveKind::Checkerboard => self.set_normal_direction(Vector::unit_y()),
            _ => {}
        }

        self.size = Quartet::new(geometry.width, geometry.height, 0.0, 0.0);
        self.material = material;
        self.material_info = Pair::new(
            tiling_factor(texture_format.width, geometry.width, geometry.padding.x),
            tiling_factor(texture_format.height, geometry.height, geometry.padding.y),
        );
    }

    fn set_normal_direction(&mut self, direction: Vector) {
        self.normal = direction.extend(self.normal.w);
    }

    /// Turns the normal about X, then about Y; the Z angle is ignored.
    pub(crate) fn rotate_normal(&mut self, angles: Vector) {
        let (sin_x, cos_x) = angles.x.sin_cos();
        let (sin_y, cos_y) = angles.y.sin_cos();
        let source = self.normal;

        let mut rotated = source;
        rotated.y = source.y * cos_x - source.z * sin_x;
        rotated.z = source.y * sin_x + source.z * cos_x;

        let source = rotated;
        rotated.z = source.z * cos_y - source.x * sin_y;
        rotated.x = source.z * sin_y + source.x * cos_y;

        self.normal = rotated;
    }

    pub(crate) fn set_material(&mut self, material: Option<MaterialHandle>) {
        self.material = material;
    }

    pub(crate) fn set_box(&mut self, box_id: Option<BoxId>) {
        self.box_id = box_id;
    }

    /// Points the enclosing box must cover, each widened by `half_width`.
    #[must_use]
    pub(crate) fn bounding_points(&self) -> &[Point] {
        match self.kind {
            PrimitiveKind::Triangle => &self.geometry.points,
            PrimitiveKind::Cylinder => &self.geometry.points[..2],
            _ => &self.geometry.points[..1],
        }
    }

    #[must_use]
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    #[must_use]
    pub fn geometry(&self) -> &PrimitiveGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn box_id(&self) -> Option<BoxId> {
        self.box_id
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.geometry.points[0]
    }

    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.geometry.width
    }

    #[must_use]
    pub fn normal(&self) -> Quartet {
        self.normal
    }

    #[must_use]
    pub fn control_points(&self) -> [Quartet; 3] {
        [self.p0, self.p1, self.p2]
    }

    #[must_use]
    pub fn size(&self) -> Quartet {
        self.size
    }

    #[must_use]
    pub fn material(&self) -> Option<MaterialHandle> {
        self.material
    }

    #[must_use]
    pub fn material_info(&self) -> Pair {
        self.material_info
    }
}

#[must_use]
fn tiling_factor(texture_extent: usize, primitive_extent: f32, padding: f32) -> f32 {
    if primitive_extent == 0.0 {
        return 0.0;
    }
    (texture_extent as f32 / primitive_extent / 2.0) * padding
}

impl GpuSerializationSize for Primitive {
    const SERIALIZED_QUARTET_COUNT: usize = 9;
}

impl GpuSerializable for Primitive {
    fn serialize_into(&self, container: &mut GpuReadySerializationBuffer) {
        debug_assert!(container.has_free_slot(), "buffer overflow");

        container.write_vector(self.p0);
        container.write_vector(self.p1);
        container.write_vector(self.p2);
        for edge_normal in &self.edge_normals {
            container.write_vector(*edge_normal);
        }
        container.write_vector(self.normal);
        container.write_vector(self.size);
        container.write_quartet(|writer| {
            writer
                .write_signed(self.kind.into())
                .write_index(self.material.map(|handle| handle.0))
                .write_float_32(self.material_info.x)
                .write_float_32(self.material_info.y);
        });
    }
}
