use crate::scene::capacities::TextureFormat;
use crate::scene::scene_error::SceneError;
use strum_macros::Display;

/// Channel order of a caller-supplied image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum PixelLayout {
    Bgr,
    Bgra,
}

impl PixelLayout {
    #[must_use]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Bgr => 3,
            PixelLayout::Bgra => 4,
        }
    }
}

const OPAQUE_ALPHA: u8 = u8::MAX;

/// One texture slot in device channel order (RGB, optionally followed by alpha).
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pixels: Vec<u8>,
}

impl TextureImage {
    #[must_use]
    pub(crate) fn new_blank(format: &TextureFormat) -> Self {
        Self { pixels: vec![0; format.slot_size_bytes()] }
    }

    pub(crate) fn check_source(format: &TextureFormat, source: &[u8], layout: PixelLayout) -> Result<(), SceneError> {
        let expected = format.pixels_count() * layout.bytes_per_pixel();
        if source.len() != expected {
            return Err(SceneError::TextureSizeMismatch { expected, actual: source.len() });
        }
        Ok(())
    }

    /// Source and destination sizes must already be validated.
    pub(crate) fn copy_swapped(&mut self, format: &TextureFormat, source: &[u8], layout: PixelLayout) {
        assert!(format.depth >= 3, "device texels carry at least three channels");
        let source_pixels = source.chunks_exact(layout.bytes_per_pixel());
        let destination_pixels = self.pixels.chunks_exact_mut(format.depth);

        for (texel, pixel) in destination_pixels.zip(source_pixels) {
            texel[0] = pixel[2];
            texel[1] = pixel[1];
            texel[2] = pixel[0];
            if format.depth > 3 {
                texel[3] = if layout == PixelLayout::Bgra { pixel[3] } else { OPAQUE_ALPHA };
            }
        }
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
