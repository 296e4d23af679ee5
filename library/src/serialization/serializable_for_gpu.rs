use crate::serialization::gpu_ready_serialization_buffer::{GpuReadySerializationBuffer, DEFAULT_PAD_VALUE};

pub(crate) trait GpuSerializationSize {
    const SERIALIZED_QUARTET_COUNT: usize;
}

pub(crate) trait GpuSerializable: GpuSerializationSize {
    fn serialize_into(&self, container: &mut GpuReadySerializationBuffer);
}

/// Devices refuse zero-sized buffers, so an empty batch
/// becomes a single object filled with the pad value.
#[must_use]
pub(crate) fn serialize_batch<T: GpuSerializable>(items: &[T]) -> GpuReadySerializationBuffer {
    if items.is_empty() {
        return GpuReadySerializationBuffer::make_filled(1, T::SERIALIZED_QUARTET_COUNT, DEFAULT_PAD_VALUE);
    }

    let mut result = GpuReadySerializationBuffer::new(items.len(), T::SERIALIZED_QUARTET_COUNT);
    for item in items {
        item.serialize_into(&mut result);
        debug_assert!(result.object_fully_written(), "object serialization is incomplete");
    }
    result
}
