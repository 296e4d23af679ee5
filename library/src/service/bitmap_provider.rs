use crate::geometry::alias::{Point, Vector};
use crate::render::post_processing::PostProcessing;
use crate::render::render_error::RenderError;
use crate::render::scene_parameters::SceneParameters;

/// Request/response contract offered to remote viewers.
pub trait BitmapProvider {
    /// `eye` and `direction` are absolute; `angles` is added to the current rotation.
    fn set_camera(&mut self, eye: Point, direction: Point, angles: Vector);

    fn get_bitmap(&mut self, timer: f32, scene_parameters: &SceneParameters, post_processing: &PostProcessing) -> Result<Vec<u8>, RenderError>;

    #[must_use]
    fn get_scene_info(&self) -> SceneParameters;
}
