use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// How `get_bitmap` hands the frame to clients.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum BitmapFormat {
    /// Framebuffer bytes as rendered, `width × height × depth`.
    #[default]
    Raw,
    /// The frame wrapped into a bitmap file with BGR pixels.
    BmpFile,
}
