use crate::geometry::alias::Quartet;
use crate::serialization::single_quartet_writer::SingleQuartetWriter;

pub(crate) const ELEMENTS_IN_QUARTET: usize = 4;
pub(super) const QUARTET_ELEMENT_SIZE_BYTES: usize = size_of::<f32>();
pub(crate) const QUARTET_SIZE_BYTES: usize = QUARTET_ELEMENT_SIZE_BYTES * ELEMENTS_IN_QUARTET;

pub(crate) const DEFAULT_PAD_VALUE: f32 = -1.0;

/// Byte image of a registry as the device reads it: a sequence of
/// equally sized objects, each made of 16-byte quartets.
pub(crate) struct GpuReadySerializationBuffer {
    backend: Vec<u8>,
    write_pointer: usize,
    quartets_per_object: usize,
}

impl GpuReadySerializationBuffer {
    #[must_use]
    pub(crate) fn new(objects_count: usize, quartets_per_object: usize) -> Self {
        assert!(quartets_per_object > 0);
        Self {
            backend: vec![0; objects_count * quartets_per_object * QUARTET_SIZE_BYTES],
            write_pointer: 0,
            quartets_per_object,
        }
    }

    #[must_use]
    pub(crate) fn make_filled(objects_count: usize, quartets_per_object: usize, filler: f32) -> Self {
        let mut result = Self::new(objects_count, quartets_per_object);
        while result.has_free_slot() {
            result.write_quartet_f32(filler, filler, filler, filler);
        }
        result
    }

    #[must_use]
    fn bytes_per_object(&self) -> usize {
        self.quartets_per_object * QUARTET_SIZE_BYTES
    }

    #[must_use]
    pub(crate) fn objects_count(&self) -> usize {
        self.backend.len() / self.bytes_per_object()
    }

    #[must_use]
    pub(crate) fn quartets_per_object(&self) -> usize {
        self.quartets_per_object
    }

    #[must_use]
    pub(crate) fn object_fully_written(&self) -> bool {
        0 < self.write_pointer && 0 == self.write_pointer % self.bytes_per_object()
    }

    #[must_use]
    pub(crate) fn fully_written(&self) -> bool {
        self.write_pointer == self.backend.len()
    }

    #[must_use]
    pub(crate) fn has_free_slot(&self) -> bool {
        !self.fully_written()
    }

    #[must_use]
    pub(crate) fn backend(&self) -> &[u8] {
        assert!(self.fully_written(), "buffer has not been filled");
        &self.backend
    }

    pub(crate) fn write_quartet<WritingCode>(&mut self, execute_writing: WritingCode)
    where
        WritingCode: FnOnce(&mut SingleQuartetWriter),
    {
        assert!(self.has_free_slot(), "buffer overflow");
        {
            let quartet = &mut self.backend[self.write_pointer..self.write_pointer + QUARTET_SIZE_BYTES];
            let mut writer = SingleQuartetWriter::new(quartet);
            execute_writing(&mut writer);
        }
        self.write_pointer += QUARTET_SIZE_BYTES;
    }

    pub(crate) fn write_quartet_f32(&mut self, x: f32, y: f32, z: f32, w: f32) {
        self.write_quartet(|writer| {
            writer.write_float_32(x).write_float_32(y).write_float_32(z).write_float_32(w);
        });
    }

    pub(crate) fn write_padded_quartet_f32(&mut self, x: f32, y: f32, z: f32) {
        self.write_quartet_f32(x, y, z, DEFAULT_PAD_VALUE);
    }

    pub(crate) fn write_vector(&mut self, value: Quartet) {
        self.write_quartet_f32(value.x, value.y, value.z, value.w);
    }
}

#[cfg(test)]
pub(crate) fn decode_floats(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(QUARTET_ELEMENT_SIZE_BYTES)
        .map(|chunk| bytemuck::pod_read_unaligned::<f32>(chunk))
        .collect()
}
