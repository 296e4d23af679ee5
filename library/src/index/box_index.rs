use crate::geometry::alias::Point;
use crate::index::bounding_box::{BoundingBox, Membership};
use crate::scene::handles::{BoxId, PrimitiveHandle};
use crate::serialization::gpu_ready_serialization_buffer::{GpuReadySerializationBuffer, DEFAULT_PAD_VALUE, ELEMENTS_IN_QUARTET};
use log::debug;

const HEADER_QUARTETS: usize = 2;

/// Coarse spatial partition of the primitives: a fixed number of boxes,
/// of which `[0, active_count)` are the ones worth visiting.
pub struct BoundingBoxIndex {
    boxes: Vec<BoundingBox>,
    view_distance: f32,
    max_active_box: Option<usize>,
}

impl BoundingBoxIndex {
    #[must_use]
    pub(crate) fn new(boxes_count: usize, members_per_box: usize, view_distance: f32) -> Self {
        Self {
            boxes: (0..boxes_count).map(|_| BoundingBox::new(view_distance, members_per_box)).collect(),
            view_distance,
            max_active_box: None,
        }
    }

    pub(crate) fn assign(&mut self, box_id: BoxId, handle: PrimitiveHandle, points: &[Point], half_width: f32) -> Membership {
        let Some(target) = self.boxes.get_mut(box_id.0) else {
            return Membership::Rejected;
        };
        self.max_active_box = Some(self.max_active_box.map_or(box_id.0, |current| current.max(box_id.0)));
        target.assign(handle, points, half_width)
    }

    pub(crate) fn detach(&mut self, box_id: BoxId, handle: PrimitiveHandle) -> bool {
        self.boxes.get_mut(box_id.0).is_some_and(|target| target.detach(handle))
    }

    pub(crate) fn reset_box(&mut self, box_id: BoxId) -> bool {
        match self.boxes.get_mut(box_id.0) {
            Some(target) => {
                target.reset(self.view_distance);
                true
            }
            None => false,
        }
    }

    pub(crate) fn reset_all(&mut self) {
        for target in self.boxes.iter_mut() {
            target.reset(self.view_distance);
        }
        self.max_active_box = None;
    }

    /// Sentinel extent used by subsequent resets.
    pub(crate) fn set_view_distance(&mut self, view_distance: f32) {
        assert!(view_distance > 0.0);
        self.view_distance = view_distance;
    }

    /// Moves every non-empty box, in order, to the front and resets the
    /// rest. Returns the old id of each box now occupying `[0, n)`.
    pub(crate) fn compact(&mut self) -> Vec<BoxId> {
        let mut survivors = Vec::new();
        let mut write_position = 0;
        for read_position in 0..self.boxes.len() {
            if self.boxes[read_position].is_empty() {
                continue;
            }
            self.boxes.swap(write_position, read_position);
            survivors.push(BoxId(read_position));
            write_position += 1;
        }
        for target in self.boxes.iter_mut().skip(write_position) {
            target.reset(self.view_distance);
        }
        self.max_active_box = write_position.checked_sub(1);

        debug!("bounding boxes compacted: {} active of {}", write_position, self.boxes.len());
        survivors
    }

    /// Boxes to transfer: the highest box id ever assigned plus one.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.max_active_box.map_or(0, |id| id + 1)
    }

    #[must_use]
    pub fn get(&self, box_id: BoxId) -> Option<&BoundingBox> {
        self.boxes.get(box_id.0)
    }

    #[must_use]
    pub fn active_boxes(&self) -> &[BoundingBox] {
        &self.boxes[..self.active_count()]
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.boxes.len()
    }

    #[must_use]
    pub fn members_per_box(&self) -> usize {
        self.boxes.first().map_or(1, |first| first.member_capacity())
    }

    #[must_use]
    fn quartets_per_box(&self) -> usize {
        HEADER_QUARTETS + self.members_per_box().div_ceil(ELEMENTS_IN_QUARTET)
    }

    /// Each box: min corner with member count, max corner, then the
    /// member handles padded with `-1` up to the per-box capacity.
    #[must_use]
    pub(crate) fn serialize(&self) -> GpuReadySerializationBuffer {
        let quartets_per_box = self.quartets_per_box();
        let active = self.active_boxes();
        if active.is_empty() {
            return GpuReadySerializationBuffer::make_filled(1, quartets_per_box, DEFAULT_PAD_VALUE);
        }

        let mut result = GpuReadySerializationBuffer::new(active.len(), quartets_per_box);
        for target in active {
            let min = target.extent().min();
            let max = target.extent().max();
            result.write_quartet(|writer| {
                writer.write_float_32(min.x).write_float_32(min.y).write_float_32(min.z).write_unsigned(target.members().len() as u32);
            });
            result.write_padded_quartet_f32(max.x, max.y, max.z);

            for chunk_start in (0..target.member_capacity()).step_by(ELEMENTS_IN_QUARTET) {
                result.write_quartet(|writer| {
                    for slot in chunk_start..(chunk_start + ELEMENTS_IN_QUARTET).min(target.member_capacity()) {
                        writer.write_index(target.members().get(slot).map(|handle| handle.0));
                    }
                });
            }
        }
        result
    }
}
