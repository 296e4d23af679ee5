use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Bytes per framebuffer pixel; channel order is always red first.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Display, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize)]
pub enum ColorDepth {
    Rgb = 3,
    #[default]
    Rgba = 4,
}

impl ColorDepth {
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        u8::from(self) as usize
    }

    #[must_use]
    pub fn has_alpha(self) -> bool {
        self == ColorDepth::Rgba
    }
}
