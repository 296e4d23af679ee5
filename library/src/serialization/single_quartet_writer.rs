use crate::serialization::gpu_ready_serialization_buffer::{DEFAULT_PAD_VALUE, ELEMENTS_IN_QUARTET, QUARTET_ELEMENT_SIZE_BYTES, QUARTET_SIZE_BYTES};

/// Writes up to four 32-bit elements; whatever is left unwritten
/// gets the pad value when the writer goes out of scope.
pub(crate) struct SingleQuartetWriter<'a> {
    quartet: &'a mut [u8],
    elements_written: usize,
}

impl Drop for SingleQuartetWriter<'_> {
    fn drop(&mut self) {
        while self.elements_written < ELEMENTS_IN_QUARTET {
            self.write_float_32(DEFAULT_PAD_VALUE);
        }
    }
}

impl<'a> SingleQuartetWriter<'a> {
    #[must_use]
    pub(super) fn new(quartet: &'a mut [u8]) -> Self {
        assert_eq!(quartet.len(), QUARTET_SIZE_BYTES);
        Self {
            quartet,
            elements_written: 0,
        }
    }

    fn write_element(&mut self, bytes: [u8; QUARTET_ELEMENT_SIZE_BYTES]) -> &mut Self {
        assert!(self.elements_written < ELEMENTS_IN_QUARTET, "quartet overflow");
        let offset = self.elements_written * QUARTET_ELEMENT_SIZE_BYTES;
        self.quartet[offset..offset + QUARTET_ELEMENT_SIZE_BYTES].copy_from_slice(&bytes);
        self.elements_written += 1;
        self
    }

    pub(crate) fn write_unsigned(&mut self, value: u32) -> &mut Self {
        self.write_element(value.to_ne_bytes())
    }

    pub(crate) fn write_signed(&mut self, value: i32) -> &mut Self {
        self.write_element(value.to_ne_bytes())
    }

    pub(crate) fn write_float_32(&mut self, value: f32) -> &mut Self {
        self.write_element(value.to_ne_bytes())
    }

    pub(crate) fn write_bool(&mut self, value: bool) -> &mut Self {
        self.write_unsigned(u32::from(value))
    }

    /// Registry references travel as signed indices, `-1` standing for "none".
    pub(crate) fn write_index(&mut self, value: Option<usize>) -> &mut Self {
        let encoded = match value {
            Some(index) => i32::try_from(index).unwrap_or(i32::MAX),
            None => -1,
        };
        self.write_signed(encoded)
    }
}
