use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_PRIMITIVES: usize = 50_000;
pub const DEFAULT_MAX_BOXES: usize = 500;
pub const DEFAULT_MAX_LIGHTS: usize = 10;
pub const DEFAULT_MAX_MATERIALS: usize = 100;
pub const DEFAULT_MAX_TEXTURES: usize = 50;

pub const DEFAULT_TEXTURE_WIDTH: usize = 256;
pub const DEFAULT_TEXTURE_HEIGHT: usize = 256;
pub const DEFAULT_TEXTURE_DEPTH: usize = 3;

/// Fixed sizes of every registry; read once when a scene is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneCapacities {
    pub max_primitives: usize,
    pub max_boxes: usize,
    pub max_lights: usize,
    pub max_materials: usize,
    pub max_textures: usize,
}

impl Default for SceneCapacities {
    fn default() -> Self {
        Self {
            max_primitives: DEFAULT_MAX_PRIMITIVES,
            max_boxes: DEFAULT_MAX_BOXES,
            max_lights: DEFAULT_MAX_LIGHTS,
            max_materials: DEFAULT_MAX_MATERIALS,
            max_textures: DEFAULT_MAX_TEXTURES,
        }
    }
}

impl SceneCapacities {
    #[must_use]
    pub fn primitives_per_box(&self) -> usize {
        assert!(self.max_boxes > 0, "at least one bounding box is required");
        (self.max_primitives / self.max_boxes).max(1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureFormat {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl Default for TextureFormat {
    fn default() -> Self {
        Self {
            width: DEFAULT_TEXTURE_WIDTH,
            height: DEFAULT_TEXTURE_HEIGHT,
            depth: DEFAULT_TEXTURE_DEPTH,
        }
    }
}

impl TextureFormat {
    #[must_use]
    pub fn pixels_count(&self) -> usize {
        self.width * self.height
    }

    #[must_use]
    pub fn slot_size_bytes(&self) -> usize {
        self.pixels_count() * self.depth
    }
}
