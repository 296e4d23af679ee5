use crate::config::ServiceConfig;
use crate::engine::compute_engine::ComputeEngine;
use crate::geometry::alias::{Point, Vector};
use crate::output::bmp::encode_bmp;
use crate::render::post_processing::PostProcessing;
use crate::render::render_error::RenderError;
use crate::render::scene_parameters::SceneParameters;
use crate::render::session::RenderSession;
use crate::service::bitmap_format::BitmapFormat;
use crate::service::bitmap_provider::BitmapProvider;
use log::{error, trace};

/// Binds a render session to the streaming contract. The service owns the
/// path-tracing iteration: whatever iteration a client sends is replaced
/// by the one the session reached.
pub struct StreamingService<E: ComputeEngine> {
    session: RenderSession<E>,
    bitmap_format: BitmapFormat,
    reset_refinement_on_camera_change: bool,
    frame: Vec<u8>,
}

impl<E: ComputeEngine> StreamingService<E> {
    pub fn new(config: &ServiceConfig, engine: E) -> Result<Self, RenderError> {
        let session = RenderSession::new(config, engine)?;
        let frame = vec![0; session.frame_bytes_count()];
        Ok(Self {
            session,
            bitmap_format: config.bitmap_format,
            reset_refinement_on_camera_change: config.reset_refinement_on_camera_change,
            frame,
        })
    }

    #[must_use]
    pub fn session(&self) -> &RenderSession<E> {
        &self.session
    }

    #[must_use]
    pub fn session_mut(&mut self) -> &mut RenderSession<E> {
        &mut self.session
    }

    #[must_use]
    pub fn bitmap_format(&self) -> BitmapFormat {
        self.bitmap_format
    }

    pub fn set_bitmap_format(&mut self, bitmap_format: BitmapFormat) {
        self.bitmap_format = bitmap_format;
    }

    fn render_frame(&mut self, timer: f32, scene_parameters: &SceneParameters, post_processing: &PostProcessing) -> Result<(), RenderError> {
        let iteration = self.session.scene_parameters().path_tracing_iteration;
        self.session.set_scene_parameters(SceneParameters { path_tracing_iteration: iteration, ..*scene_parameters });
        self.session.set_post_processing(*post_processing);
        self.session.render(timer, &mut self.frame)
    }
}

impl<E: ComputeEngine> BitmapProvider for StreamingService<E> {
    fn set_camera(&mut self, eye: Point, direction: Point, angles: Vector) {
        let previous = *self.session.camera();
        self.session.set_camera(eye, direction, angles);

        if self.reset_refinement_on_camera_change && !self.session.camera().same_view_as(&previous) {
            trace!("camera moved, refinement restarts");
            self.session.reset_progressive_refinement();
        }
    }

    fn get_bitmap(&mut self, timer: f32, scene_parameters: &SceneParameters, post_processing: &PostProcessing) -> Result<Vec<u8>, RenderError> {
        if let Err(failure) = self.render_frame(timer, scene_parameters, post_processing) {
            error!("get_bitmap failed: {}", failure);
            return Err(failure);
        }

        let bitmap = match self.bitmap_format {
            BitmapFormat::Raw => self.frame.clone(),
            BitmapFormat::BmpFile => encode_bmp(self.session.frame_size(), self.session.color_depth(), &self.frame),
        };
        Ok(bitmap)
    }

    fn get_scene_info(&self) -> SceneParameters {
        *self.session.scene_parameters()
    }
}
