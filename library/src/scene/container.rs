use crate::geometry::alias::{Pair, Point, Vector};
use crate::index::bounding_box::Membership;
use crate::index::box_index::BoundingBoxIndex;
use crate::scene::arena::FixedArena;
use crate::scene::capacities::{SceneCapacities, TextureFormat};
use crate::scene::diagnostics::SceneDiagnostics;
use crate::scene::handles::{BoxId, LightHandle, MaterialHandle, PrimitiveHandle, TextureHandle};
use crate::scene::light::{Light, LightKind, LightParameters};
use crate::scene::material::Material;
use crate::scene::primitive::{Primitive, PrimitiveGeometry, PrimitiveKind};
use crate::scene::scene_error::{EntityKind, SceneError};
use crate::scene::texture::{PixelLayout, TextureImage};
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::serialize_batch;
use crate::utils::revision::Revision;
use crate::utils::throttled_logger::ThrottledWarningLogger;
use log::{error, info, warn};
use std::collections::HashMap;

const REJECTION_LOG_INTERVAL: u64 = 100;
const RECTANGLE_FACES: usize = 6;

/// Authoritative scene description: the registries of primitives, lights,
/// materials and texture slots, plus the box index over the primitives.
/// Setters addressing handles that were never allocated are ignored and
/// report `false`; every such call is counted in [`SceneDiagnostics`].
pub struct Scene {
    texture_format: TextureFormat,

    primitives: FixedArena<Primitive>,
    lights: FixedArena<Light>,
    materials: FixedArena<Material>,
    textures: FixedArena<TextureImage>,
    boxes: BoundingBoxIndex,

    diagnostics: SceneDiagnostics,
    rejections_logger: ThrottledWarningLogger,
    overflow_logger: ThrottledWarningLogger,
}

impl Scene {
    #[must_use]
    pub fn new(capacities: &SceneCapacities, texture_format: TextureFormat, view_distance: f32) -> Self {
        info!(
            "scene created: {} primitives, {} boxes of {}, {} lights, {} materials, {} textures",
            capacities.max_primitives,
            capacities.max_boxes,
            capacities.primitives_per_box(),
            capacities.max_lights,
            capacities.max_materials,
            capacities.max_textures,
        );
        Self {
            texture_format,
            primitives: FixedArena::new(EntityKind::Primitive, capacities.max_primitives),
            lights: FixedArena::new(EntityKind::Light, capacities.max_lights),
            materials: FixedArena::new(EntityKind::Material, capacities.max_materials),
            textures: FixedArena::new(EntityKind::Texture, capacities.max_textures),
            boxes: BoundingBoxIndex::new(capacities.max_boxes, capacities.primitives_per_box(), view_distance),
            diagnostics: SceneDiagnostics::default(),
            rejections_logger: ThrottledWarningLogger::new(REJECTION_LOG_INTERVAL),
            overflow_logger: ThrottledWarningLogger::new(REJECTION_LOG_INTERVAL),
        }
    }

    fn track_allocation(&mut self, result: Result<usize, SceneError>) -> Result<usize, SceneError> {
        if let Err(failure) = &result {
            self.diagnostics.exhausted_capacity += 1;
            warn!("allocation refused: {}", failure);
        }
        result
    }

    fn reject<Message: FnOnce() -> String>(&mut self, message: Message) -> bool {
        self.diagnostics.rejected_handles += 1;
        let _ = self.rejections_logger.do_write(message);
        false
    }

    #[must_use]
    fn material_is_valid(&self, material: Option<MaterialHandle>) -> bool {
        material.is_none_or(|handle| self.materials.contains(handle.0))
    }

    // ---------- primitives ----------

    pub fn add_primitive(&mut self, kind: PrimitiveKind) -> Result<PrimitiveHandle, SceneError> {
        let allocation = self.primitives.push(Primitive::new(kind));
        self.track_allocation(allocation).map(PrimitiveHandle)
    }

    /// Places the primitive and, when `box_id` is given (or the primitive
    /// already belongs to a box), grows that box around it.
    pub fn set_primitive(&mut self, handle: PrimitiveHandle, box_id: Option<BoxId>, geometry: &PrimitiveGeometry, material: Option<MaterialHandle>) -> bool {
        if !self.primitives.contains(handle.0) {
            return self.reject(|| format!("set_primitive: {} is not allocated", handle));
        }
        if !self.material_is_valid(material) {
            return self.reject(|| format!("set_primitive: {} refers to unknown material {:?}", handle, material));
        }

        let texture_format = self.texture_format;
        self.primitives.update(handle.0, |primitive| primitive.apply(geometry, material, &texture_format));
        self.index_primitive(handle, box_id);
        true
    }

    fn index_primitive(&mut self, handle: PrimitiveHandle, requested_box: Option<BoxId>) {
        let Some(primitive) = self.primitives.get(handle.0) else {
            return;
        };
        let previous_box = primitive.box_id();
        let Some(target) = requested_box.or(previous_box) else {
            return;
        };
        if target.0 >= self.boxes.capacity() {
            self.diagnostics.rejected_box_ids += 1;
            let _ = self.rejections_logger.do_write(|| format!("{} lies outside the box index, {} becomes unindexed", target, handle));
            if let Some(previous_box) = previous_box {
                self.boxes.detach(previous_box, handle);
            }
            self.primitives.update(handle.0, |primitive| primitive.set_box(None));
            return;
        }

        let points = primitive.bounding_points().to_vec();
        let half_width = primitive.half_width();
        if let Some(previous_box) = previous_box {
            if previous_box != target {
                self.boxes.detach(previous_box, handle);
            }
        }

        if Membership::Dropped == self.boxes.assign(target, handle, &points, half_width) {
            self.diagnostics.dropped_box_assignments += 1;
            let _ = self.overflow_logger.do_write(|| format!("{} is full, {} is left out of its member list", target, handle));
        }
        self.primitives.update(handle.0, |primitive| primitive.set_box(Some(target)));
    }

    pub fn rotate_primitive(&mut self, handle: PrimitiveHandle, angles: Vector) -> bool {
        if self.primitives.update(handle.0, |primitive| primitive.rotate_normal(angles)) {
            return true;
        }
        self.reject(|| format!("rotate_primitive: {} is not allocated", handle))
    }

    /// Shifts every control point by `delta`, keeping size and material.
    pub fn translate_primitive(&mut self, handle: PrimitiveHandle, box_id: Option<BoxId>, delta: Vector) -> bool {
        let Some(primitive) = self.primitives.get(handle.0) else {
            return self.reject(|| format!("translate_primitive: {} is not allocated", handle));
        };
        let geometry = primitive.geometry().translated(delta);
        let material = primitive.material();
        self.set_primitive(handle, box_id, &geometry, material)
    }

    pub fn set_primitive_material(&mut self, handle: PrimitiveHandle, material: Option<MaterialHandle>) -> bool {
        if !self.material_is_valid(material) {
            return self.reject(|| format!("set_primitive_material: unknown material {:?}", material));
        }
        if self.primitives.update(handle.0, |primitive| primitive.set_material(material)) {
            return true;
        }
        self.reject(|| format!("set_primitive_material: {} is not allocated", handle))
    }

    /// Center and half width.
    #[must_use]
    pub fn primitive_center(&self, handle: PrimitiveHandle) -> Option<(Point, f32)> {
        self.primitives.get(handle.0).map(|primitive| (primitive.center(), primitive.half_width()))
    }

    pub fn set_primitive_center(&mut self, handle: PrimitiveHandle, center: Point, half_width: f32) -> bool {
        let Some(primitive) = self.primitives.get(handle.0) else {
            return self.reject(|| format!("set_primitive_center: {} is not allocated", handle));
        };
        let geometry = primitive.geometry().with_center(center).with_width(half_width);
        let material = primitive.material();
        self.set_primitive(handle, None, &geometry, material)
    }

    #[must_use]
    pub fn primitive(&self, handle: PrimitiveHandle) -> Option<&Primitive> {
        self.primitives.get(handle.0)
    }

    #[must_use]
    pub fn primitives_count(&self) -> usize {
        self.primitives.len()
    }

    #[must_use]
    pub fn last_primitive(&self) -> Option<PrimitiveHandle> {
        self.primitives.last_index().map(PrimitiveHandle)
    }

    // ---------- compound objects ----------

    pub fn add_cube(&mut self, box_id: BoxId, center: Point, half_side: f32, material: Option<MaterialHandle>, padding: Pair) -> Result<PrimitiveHandle, SceneError> {
        self.add_rectangle(box_id, center, Vector::new(half_side, half_side, half_side), material, padding)
    }

    /// Six axis-aligned faces around `center`; `half_extents` are the
    /// half width, height and depth. Returns the last face added.
    pub fn add_rectangle(&mut self, box_id: BoxId, center: Point, half_extents: Vector, material: Option<MaterialHandle>, padding: Pair) -> Result<PrimitiveHandle, SceneError> {
        if !self.material_is_valid(material) {
            if let Some(handle) = material {
                return Err(SceneError::UnknownMaterial(handle));
            }
        }
        if self.primitives.len() + RECTANGLE_FACES > self.primitives.capacity() {
            let refusal = Err(SceneError::CapacityExhausted { kind: EntityKind::Primitive, capacity: self.primitives.capacity() });
            return self.track_allocation(refusal).map(PrimitiveHandle);
        }

        let (width, height, depth) = (half_extents.x, half_extents.y, half_extents.z);
        let faces = [
            (PrimitiveKind::XyPlane, Vector::new(0.0, 0.0, -depth), width, height),
            (PrimitiveKind::XyPlane, Vector::new(0.0, 0.0, depth), width, height),
            (PrimitiveKind::YzPlane, Vector::new(-width, 0.0, 0.0), depth, height),
            (PrimitiveKind::YzPlane, Vector::new(width, 0.0, 0.0), depth, height),
            (PrimitiveKind::XzPlane, Vector::new(0.0, -height, 0.0), width, depth),
            (PrimitiveKind::XzPlane, Vector::new(0.0, height, 0.0), width, depth),
        ];

        let mut last = PrimitiveHandle(0);
        for (kind, offset, face_width, face_height) in faces {
            last = self.add_primitive(kind)?;
            let geometry = PrimitiveGeometry::new(center + offset, face_width, face_height).with_padding(padding.x, padding.y);
            self.set_primitive(last, Some(box_id), &geometry, material);
        }
        Ok(last)
    }

    // ---------- lights ----------

    pub fn add_light(&mut self, kind: LightKind) -> Result<LightHandle, SceneError> {
        let allocation = self.lights.push(Light::new(kind));
        self.track_allocation(allocation).map(LightHandle)
    }

    pub fn set_light(&mut self, handle: LightHandle, parameters: &LightParameters) -> bool {
        if self.lights.update(handle.0, |light| light.set_parameters(parameters)) {
            return true;
        }
        self.reject(|| format!("set_light: {} is not allocated", handle))
    }

    #[must_use]
    pub fn light(&self, handle: LightHandle) -> Option<&Light> {
        self.lights.get(handle.0)
    }

    #[must_use]
    pub fn lights_count(&self) -> usize {
        self.lights.len()
    }

    #[must_use]
    pub fn last_light(&self) -> Option<LightHandle> {
        self.lights.last_index().map(LightHandle)
    }

    // ---------- materials ----------

    pub fn add_material(&mut self) -> Result<MaterialHandle, SceneError> {
        let allocation = self.materials.push(Material::default());
        self.track_allocation(allocation).map(MaterialHandle)
    }

    pub fn set_material(&mut self, handle: MaterialHandle, material: &Material) -> bool {
        if let Some(texture) = material.texture() {
            if !self.textures.contains(texture.0) {
                return self.reject(|| format!("set_material: {} refers to unknown {}", handle, texture));
            }
        }
        if self.materials.update(handle.0, |target| *target = *material) {
            return true;
        }
        self.reject(|| format!("set_material: {} is not allocated", handle))
    }

    #[must_use]
    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.0)
    }

    #[must_use]
    pub fn materials_count(&self) -> usize {
        self.materials.len()
    }

    // ---------- textures ----------

    pub fn add_texture(&mut self) -> Result<TextureHandle, SceneError> {
        let allocation = self.textures.push(TextureImage::new_blank(&self.texture_format));
        self.track_allocation(allocation).map(TextureHandle)
    }

    /// Copies a whole image into the slot, turning BGR(A) into device order.
    /// `Ok(false)` when the slot is not allocated.
    pub fn set_texture(&mut self, handle: TextureHandle, pixels: &[u8], layout: PixelLayout) -> Result<bool, SceneError> {
        if let Err(failure) = TextureImage::check_source(&self.texture_format, pixels, layout) {
            error!("texture {} not loaded: {}", handle, failure);
            return Err(failure);
        }
        let texture_format = self.texture_format;
        if self.textures.update(handle.0, |slot| slot.copy_swapped(&texture_format, pixels, layout)) {
            return Ok(true);
        }
        Ok(self.reject(|| format!("set_texture: {} is not allocated", handle)))
    }

    /// Allocates a slot only once the image is known to fit.
    pub fn load_texture(&mut self, pixels: &[u8], layout: PixelLayout) -> Result<TextureHandle, SceneError> {
        if let Err(failure) = TextureImage::check_source(&self.texture_format, pixels, layout) {
            error!("texture not loaded: {}", failure);
            return Err(failure);
        }
        let handle = self.add_texture()?;
        self.set_texture(handle, pixels, layout)?;
        Ok(handle)
    }

    #[must_use]
    pub fn texture(&self, handle: TextureHandle) -> Option<&TextureImage> {
        self.textures.get(handle.0)
    }

    #[must_use]
    pub fn textures_count(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn texture_format(&self) -> TextureFormat {
        self.texture_format
    }

    // ---------- boxes ----------

    #[must_use]
    pub fn boxes(&self) -> &BoundingBoxIndex {
        &self.boxes
    }

    pub fn reset_box(&mut self, box_id: BoxId) -> bool {
        if self.boxes.reset_box(box_id) {
            return true;
        }
        self.diagnostics.rejected_box_ids += 1;
        false
    }

    pub fn reset_boxes(&mut self) {
        self.boxes.reset_all();
    }

    pub fn set_view_distance(&mut self, view_distance: f32) {
        self.boxes.set_view_distance(view_distance);
    }

    /// Collapses empty boxes and renumbers the primitives' box references.
    pub fn compact_boxes(&mut self) -> usize {
        let survivors = self.boxes.compact();
        let renumbering: HashMap<BoxId, BoxId> = survivors
            .iter()
            .enumerate()
            .map(|(new_id, old_id)| (*old_id, BoxId(new_id)))
            .collect();

        for index in 0..self.primitives.len() {
            let Some(old_id) = self.primitives.get(index).and_then(|primitive| primitive.box_id()) else {
                continue;
            };
            let new_id = renumbering.get(&old_id).copied();
            if new_id != Some(old_id) {
                self.primitives.update(index, |primitive| primitive.set_box(new_id));
            }
        }
        survivors.len()
    }

    // ---------- whole scene ----------

    pub fn clear(&mut self) {
        self.primitives.clear();
        self.lights.clear();
        self.materials.clear();
        self.textures.clear();
        self.boxes.reset_all();
        info!("scene cleared");
    }

    #[must_use]
    pub fn diagnostics(&self) -> SceneDiagnostics {
        self.diagnostics
    }

    /// Changes whenever something uploaded once per session changes.
    #[must_use]
    pub fn static_revision(&self) -> Revision {
        self.materials.revision().combined_with(self.textures.revision())
    }

    #[must_use]
    pub(crate) fn serialize_primitives(&self) -> GpuReadySerializationBuffer {
        serialize_batch(self.primitives.as_slice())
    }

    #[must_use]
    pub(crate) fn serialize_lights(&self) -> GpuReadySerializationBuffer {
        serialize_batch(self.lights.as_slice())
    }

    #[must_use]
    pub(crate) fn serialize_materials(&self) -> GpuReadySerializationBuffer {
        serialize_batch(self.materials.as_slice())
    }

    #[must_use]
    pub(crate) fn serialize_boxes(&self) -> GpuReadySerializationBuffer {
        self.boxes.serialize()
    }

    /// All slots back to back; a single blank slot when none exist.
    #[must_use]
    pub(crate) fn texture_bytes(&self) -> Vec<u8> {
        if 0 == self.textures.len() {
            return TextureImage::new_blank(&self.texture_format).pixels().to_vec();
        }
        self.textures.as_slice().iter().flat_map(|slot| slot.pixels().iter().copied()).collect()
    }
}
