use palette::Srgb;
use serde::{Deserialize, Serialize};

pub const DEFAULT_VIEW_DISTANCE: f32 = 50_000.0;
pub const DEFAULT_MAX_PATH_TRACING_ITERATIONS: u32 = 100;

/// Per-frame rendering parameters exchanged with streaming clients.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParameters {
    pub width: u32,
    pub height: u32,
    pub draft: f32,
    pub transparent_color: f32,
    pub shadows_enabled: bool,
    pub view_distance: f32,
    pub shadow_intensity: f32,
    pub ray_iterations: u32,
    pub background_color: Srgb,
    pub stereo_enabled: bool,
    pub stereo_eye_separation: f32,
    pub render_boxes: bool,
    pub path_tracing_iteration: u32,
    pub max_path_tracing_iterations: u32,
}

impl Default for SceneParameters {
    fn default() -> Self {
        Self {
            width: 511,
            height: 511,
            draft: 1.0,
            transparent_color: 0.0,
            shadows_enabled: true,
            view_distance: DEFAULT_VIEW_DISTANCE,
            shadow_intensity: 0.9,
            ray_iterations: 3,
            background_color: Srgb::new(0.0, 0.0, 0.0),
            stereo_enabled: false,
            stereo_eye_separation: 0.0,
            render_boxes: false,
            path_tracing_iteration: 0,
            max_path_tracing_iterations: DEFAULT_MAX_PATH_TRACING_ITERATIONS,
        }
    }
}

impl SceneParameters {
    #[must_use]
    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background_color: Srgb) -> Self {
        self.background_color = background_color;
        self
    }

    /// Returns `true` while refinement still has iterations to go.
    pub(crate) fn advance_iteration(&mut self) -> bool {
        if self.path_tracing_iteration >= self.max_path_tracing_iterations {
            return false;
        }
        self.path_tracing_iteration += 1;
        true
    }
}
