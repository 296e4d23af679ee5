use crate::output::color_depth::ColorDepth;
use crate::output::frame_buffer_size::FrameBufferSize;
use crate::render::post_processing::PostProcessing;
use crate::render::scene_parameters::SceneParameters;
use crate::scene::capacities::{SceneCapacities, TextureFormat};
use crate::service::bitmap_format::BitmapFormat;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_FRAME_WIDTH: u32 = 511;
pub const DEFAULT_FRAME_HEIGHT: u32 = 511;
pub const DEFAULT_KERNEL_DEADLINE_MS: u64 = 100;
pub const DEFAULT_RANDOM_SEED: u64 = 0x5eed;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid frame size {width}x{height}")]
    InvalidFrameSize {
        width: u32,
        height: u32,
    },
    #[error("view distance must be positive, got {0}")]
    InvalidViewDistance(f32),
    #[error("invalid capacities: {what:?}")]
    InvalidCapacities {
        what: String,
    },
}

/// Everything a streaming service needs to know at start; read once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub capacities: SceneCapacities,
    pub texture_format: TextureFormat,
    pub frame_width: u32,
    pub frame_height: u32,
    pub color_depth: ColorDepth,
    pub scene_parameters: SceneParameters,
    pub post_processing: PostProcessing,
    pub bitmap_format: BitmapFormat,
    pub kernel_deadline_ms: u64,
    pub initial_draft: u32,
    pub random_seed: u64,
    pub level_table: Vec<i32>,
    pub reset_refinement_on_camera_change: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            capacities: SceneCapacities::default(),
            texture_format: TextureFormat::default(),
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            color_depth: ColorDepth::Rgba,
            scene_parameters: SceneParameters::default().with_frame_size(DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT),
            post_processing: PostProcessing::default(),
            bitmap_format: BitmapFormat::Raw,
            kernel_deadline_ms: DEFAULT_KERNEL_DEADLINE_MS,
            initial_draft: 1,
            random_seed: DEFAULT_RANDOM_SEED,
            level_table: Vec::new(),
            reset_refinement_on_camera_change: true,
        }
    }
}

impl ServiceConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        info!("configuration loaded from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.frame_size()?;
        if 0 == self.capacities.max_boxes || 0 == self.capacities.max_primitives {
            return Err(ConfigError::InvalidCapacities { what: "at least one primitive and one bounding box are required".to_string() });
        }
        if self.texture_format.depth < 3 {
            return Err(ConfigError::InvalidCapacities { what: format!("texture depth {} is below three channels", self.texture_format.depth) });
        }
        let view_distance = self.scene_parameters.view_distance;
        if view_distance.is_nan() || view_distance <= 0.0 {
            return Err(ConfigError::InvalidViewDistance(view_distance));
        }
        Ok(())
    }

    pub fn frame_size(&self) -> Result<FrameBufferSize, ConfigError> {
        if 0 == self.frame_width || 0 == self.frame_height {
            return Err(ConfigError::InvalidFrameSize { width: self.frame_width, height: self.frame_height });
        }
        Ok(FrameBufferSize::new(self.frame_width, self.frame_height))
    }

    #[must_use]
    pub fn kernel_deadline(&self) -> Duration {
        Duration::from_millis(self.kernel_deadline_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let system_under_test = ServiceConfig::default();

        assert_eq!(system_under_test.capacities.max_primitives, 50_000);
        assert_eq!(system_under_test.capacities.max_boxes, 500);
        assert_eq!(system_under_test.texture_format.slot_size_bytes(), 256 * 256 * 3);
        assert_eq!(system_under_test.frame_size().unwrap(), FrameBufferSize::new(511, 511));
        assert_eq!(system_under_test.kernel_deadline(), Duration::from_millis(100));
        assert!(system_under_test.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"frame_width": 64, "capacities": {{"max_boxes": 8}}, "bitmap_format": "BmpFile"}}"#).unwrap();

        let actual = ServiceConfig::load(file.path()).unwrap();

        assert_eq!(actual.frame_width, 64);
        assert_eq!(actual.frame_height, DEFAULT_FRAME_HEIGHT);
        assert_eq!(actual.capacities.max_boxes, 8);
        assert_eq!(actual.capacities.max_primitives, 50_000);
        assert_eq!(actual.bitmap_format, BitmapFormat::BmpFile);
    }

    #[test]
    fn test_save_then_load() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("service.json");
        let expected = ServiceConfig { level_table: vec![1, 2, 3], random_seed: 7, ..ServiceConfig::default() };

        expected.save(&path).unwrap();
        let actual = ServiceConfig::load(&path).unwrap();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_missing_file() {
        let directory = tempfile::tempdir().unwrap();
        let actual = ServiceConfig::load(directory.path().join("absent.json"));
        assert!(matches!(actual, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(matches!(ServiceConfig::load(file.path()), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_zero_frame_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"frame_height": 0}}"#).unwrap();

        assert!(matches!(ServiceConfig::load(file.path()), Err(ConfigError::InvalidFrameSize { width: 511, height: 0 })));
    }

    #[test]
    fn test_non_positive_view_distance_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"scene_parameters": {{"view_distance": 0.0}}}}"#).unwrap();

        assert!(matches!(ServiceConfig::load(file.path()), Err(ConfigError::InvalidViewDistance(_))));

        let negative = ServiceConfig { scene_parameters: SceneParameters { view_distance: -10.0, ..SceneParameters::default() }, ..ServiceConfig::default() };
        assert!(matches!(negative.validate(), Err(ConfigError::InvalidViewDistance(value)) if value == -10.0));
    }
}
