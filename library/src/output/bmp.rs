use crate::output::color_depth::ColorDepth;
use crate::output::frame_buffer_size::FrameBufferSize;
use byteorder::{ByteOrder, LittleEndian};

pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

const SIGNATURE: &[u8; 2] = b"BM";
const PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 24;
const TRAILING_PAD: [u8; 3] = [0; 3];

/// Wraps a framebuffer into the minimal bitmap file the streaming clients
/// expect. The size field of the file header holds the raw framebuffer
/// size (`width × height × depth`), and pixels follow as BGR triplets
/// without row padding, closed by three zero bytes.
#[must_use]
pub fn encode_bmp(size: FrameBufferSize, depth: ColorDepth, framebuffer: &[u8]) -> Vec<u8> {
    let image_size = size.bytes_count(depth);
    assert_eq!(framebuffer.len(), image_size, "framebuffer does not match its declared size");

    let pixels_count = size.area() as usize;
    let mut result = Vec::with_capacity(PIXEL_DATA_OFFSET + pixels_count * 3 + TRAILING_PAD.len());
    result.extend_from_slice(&make_headers(size, image_size as u32));

    for pixel in framebuffer.chunks_exact(depth.bytes_per_pixel()) {
        result.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
    }
    result.extend_from_slice(&TRAILING_PAD);
    result
}

#[must_use]
fn make_headers(size: FrameBufferSize, image_size: u32) -> [u8; PIXEL_DATA_OFFSET] {
    let mut headers = [0u8; PIXEL_DATA_OFFSET];

    headers[0..2].copy_from_slice(SIGNATURE);
    LittleEndian::write_u32(&mut headers[2..6], image_size);
    LittleEndian::write_u32(&mut headers[10..14], PIXEL_DATA_OFFSET as u32);

    let info = &mut headers[FILE_HEADER_SIZE..];
    LittleEndian::write_u32(&mut info[0..4], INFO_HEADER_SIZE as u32);
    LittleEndian::write_i32(&mut info[4..8], size.width() as i32);
    LittleEndian::write_i32(&mut info[8..12], size.height() as i32);
    LittleEndian::write_u16(&mut info[12..14], PLANES);
    LittleEndian::write_u16(&mut info[14..16], BITS_PER_PIXEL);

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fields() {
        let size = FrameBufferSize::new(4, 2);
        let framebuffer = vec![0u8; size.bytes_count(ColorDepth::Rgba)];

        let actual = encode_bmp(size, ColorDepth::Rgba, &framebuffer);
        let info = &actual[FILE_HEADER_SIZE..];

        assert_eq!(&actual[0..2], b"BM");
        assert_eq!(LittleEndian::read_u32(&actual[2..6]), 32);
        assert_eq!(LittleEndian::read_u32(&actual[10..14]), 54);
        assert_eq!(LittleEndian::read_u32(&info[0..4]), 40);
        assert_eq!(LittleEndian::read_u32(&info[4..8]), 4);
        assert_eq!(LittleEndian::read_u32(&info[8..12]), 2);
        assert_eq!(LittleEndian::read_u16(&info[12..14]), 1);
        assert_eq!(LittleEndian::read_u16(&info[14..16]), 24);
    }

    #[test]
    fn test_pixels_are_bgr_with_trailing_pad() {
        let size = FrameBufferSize::new(2, 1);
        let framebuffer = [10, 20, 30, 255, 40, 50, 60, 255];

        let actual = encode_bmp(size, ColorDepth::Rgba, &framebuffer);

        assert_eq!(actual.len(), PIXEL_DATA_OFFSET + 6 + 3);
        assert_eq!(&actual[PIXEL_DATA_OFFSET..], &[30, 20, 10, 60, 50, 40, 0, 0, 0]);
    }

    #[test]
    fn test_rgb_framebuffer() {
        let size = FrameBufferSize::new(1, 1);

        let actual = encode_bmp(size, ColorDepth::Rgb, &[1, 2, 3]);

        assert_eq!(LittleEndian::read_u32(&actual[2..6]), 3);
        assert_eq!(&actual[PIXEL_DATA_OFFSET..PIXEL_DATA_OFFSET + 3], &[3, 2, 1]);
    }

    #[test]
    #[should_panic(expected = "framebuffer does not match its declared size")]
    fn test_mismatched_framebuffer() {
        _ = encode_bmp(FrameBufferSize::new(2, 2), ColorDepth::Rgb, &[0; 5]);
    }
}
