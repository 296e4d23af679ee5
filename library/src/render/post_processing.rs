use num_enum::IntoPrimitive;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Display, EnumIter, IntoPrimitive, Serialize, Deserialize)]
pub enum PostProcessingEffect {
    #[default]
    None = 0,
    DepthOfField = 1,
    AmbientOcclusion = 2,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcessing {
    pub effect: PostProcessingEffect,
    pub focus_distance: f32,
    pub strength: f32,
    pub samples: u32,
}

impl Default for PostProcessing {
    fn default() -> Self {
        Self {
            effect: PostProcessingEffect::None,
            focus_distance: 4000.0,
            strength: 40.0,
            samples: 100,
        }
    }
}

impl PostProcessing {
    #[must_use]
    pub fn depth_of_field(focus_distance: f32, strength: f32, samples: u32) -> Self {
        Self { effect: PostProcessingEffect::DepthOfField, focus_distance, strength, samples }
    }
}
