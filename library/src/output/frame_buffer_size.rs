use crate::output::color_depth::ColorDepth;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FrameBufferSize {
    width: u32,
    height: u32,
}

impl FrameBufferSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0);
        assert!(height > 0);
        Self { width, height }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    #[must_use]
    pub fn bytes_count(&self, color_depth: ColorDepth) -> usize {
        self.area() as usize * color_depth.bytes_per_pixel()
    }
}
