use crate::config::ServiceConfig;
use crate::engine::compute_engine::{ComputeEngine, DynamicPayload, EngineSetup, KernelLaunch, Payload, StaticPayload};
use crate::engine::engine_error::EngineError;
use crate::geometry::alias::{Point, Vector};
use crate::output::color_depth::ColorDepth;
use crate::output::frame_buffer_size::FrameBufferSize;
use crate::render::camera::CameraState;
use crate::render::post_processing::PostProcessing;
use crate::render::render_error::RenderError;
use crate::render::render_stage::RenderStage;
use crate::render::scene_parameters::SceneParameters;
use crate::render::uniforms::{ObjectCounts, Uniforms};
use crate::scene::container::Scene;
use crate::sync::device_sync_cache::DeviceSyncCache;
use crate::utils::min_max_time_measurer::MinMaxTimeMeasurer;
use crate::utils::sliding_time_frame::SlidingTimeFrame;
use crate::utils::time_throttled_logger::TimeThrottledInfoLogger;
use log::{debug, error, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::{Duration, Instant};

const RANDOM_CHUNK_SIZE: usize = 4096;
const RANDOM_SPREAD: i32 = 500;

const FRAME_TIME_SAMPLES: usize = 15;
const PERFORMANCE_REPORT_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStatistics {
    pub frames_rendered: u64,
    pub failed_frames: u64,
    pub static_uploads: u64,
    pub deadline_overruns: u64,
}

/// One rendering context: the scene, the viewer and the engine that
/// renders them. Frames are produced one at a time by [`Self::render`].
pub struct RenderSession<E: ComputeEngine> {
    engine: E,
    scene: Scene,

    camera: CameraState,
    scene_parameters: SceneParameters,
    post_processing: PostProcessing,

    sync_cache: DeviceSyncCache,
    random_table: Vec<f32>,
    level_table: Vec<i32>,

    frame_size: FrameBufferSize,
    color_depth: ColorDepth,
    stage: RenderStage,
    initial_draft: u32,
    draft: u32,
    kernel_deadline: Duration,

    statistics: SessionStatistics,
    frame_time: SlidingTimeFrame,
    kernel_time: MinMaxTimeMeasurer,
    performance_reporter: TimeThrottledInfoLogger,
}

impl<E: ComputeEngine> RenderSession<E> {
    pub fn new(config: &ServiceConfig, mut engine: E) -> Result<Self, RenderError> {
        config.validate()?;
        let frame_size = config.frame_size()?;
        let random_table = make_random_table(frame_size.area() as usize, config.random_seed);

        let setup = EngineSetup {
            capacities: config.capacities,
            texture_format: config.texture_format,
            frame_size,
            color_depth: config.color_depth,
            random_table_size: random_table.len(),
            level_table_size: config.level_table.len(),
        };
        engine.initialize(&setup).map_err(|source| RenderError::Engine { stage: RenderStage::Idle, source })?;

        let initial_draft = config.initial_draft.max(1);
        info!("render session started: {}x{} {}, kernel deadline {:?}", frame_size.width(), frame_size.height(), config.color_depth, config.kernel_deadline());

        Ok(Self {
            engine,
            scene: Scene::new(&config.capacities, config.texture_format, config.scene_parameters.view_distance),
            camera: CameraState::default(),
            scene_parameters: config.scene_parameters,
            post_processing: config.post_processing,
            sync_cache: DeviceSyncCache::new(),
            random_table,
            level_table: config.level_table.clone(),
            frame_size,
            color_depth: config.color_depth,
            stage: RenderStage::Idle,
            initial_draft,
            draft: initial_draft,
            kernel_deadline: config.kernel_deadline(),
            statistics: SessionStatistics::default(),
            frame_time: SlidingTimeFrame::new(FRAME_TIME_SAMPLES),
            kernel_time: MinMaxTimeMeasurer::default(),
            performance_reporter: TimeThrottledInfoLogger::new(PERFORMANCE_REPORT_INTERVAL),
        })
    }

    /// Eye and direction replace the current ones, angles add to the
    /// accumulated rotation. Refinement is not reset here.
    pub fn set_camera(&mut self, eye: Point, direction: Point, angles: Vector) {
        self.camera.apply(eye, direction, angles);
    }

    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn set_scene_parameters(&mut self, parameters: SceneParameters) {
        if parameters.view_distance != self.scene_parameters.view_distance {
            if parameters.view_distance > 0.0 {
                self.scene.set_view_distance(parameters.view_distance);
            } else {
                warn!("ignoring non-positive view distance {} for bounding box resets", parameters.view_distance);
            }
        }
        if parameters.width != self.frame_size.width() || parameters.height != self.frame_size.height() {
            debug!("client asked for {}x{}, frames stay {}x{}", parameters.width, parameters.height, self.frame_size.width(), self.frame_size.height());
        }
        self.scene_parameters = parameters;
    }

    #[must_use]
    pub fn scene_parameters(&self) -> &SceneParameters {
        &self.scene_parameters
    }

    pub fn set_post_processing(&mut self, post_processing: PostProcessing) {
        self.post_processing = post_processing;
    }

    #[must_use]
    pub fn post_processing(&self) -> &PostProcessing {
        &self.post_processing
    }

    /// Restarts accumulation: the next frame is iteration zero at the initial draft level.
    pub fn reset_progressive_refinement(&mut self) {
        self.scene_parameters.path_tracing_iteration = 0;
        self.draft = self.initial_draft;
        trace!("progressive refinement reset");
    }

    /// Forces materials, textures and lookup tables to be sent with the next frame.
    pub fn invalidate_static(&mut self) {
        self.sync_cache.invalidate();
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn sync_cache(&self) -> &DeviceSyncCache {
        &self.sync_cache
    }

    #[must_use]
    pub fn random_table(&self) -> &[f32] {
        &self.random_table
    }

    #[must_use]
    pub fn statistics(&self) -> SessionStatistics {
        self.statistics
    }

    #[must_use]
    pub fn stage(&self) -> RenderStage {
        self.stage
    }

    #[must_use]
    pub fn draft(&self) -> u32 {
        self.draft
    }

    #[must_use]
    pub fn frame_size(&self) -> FrameBufferSize {
        self.frame_size
    }

    #[must_use]
    pub fn color_depth(&self) -> ColorDepth {
        self.color_depth
    }

    #[must_use]
    pub fn frame_bytes_count(&self) -> usize {
        self.frame_size.bytes_count(self.color_depth)
    }

    /// Runs one full cycle and leaves the frame at the start of `output`.
    /// On failure the scene is left as it was and the session is ready
    /// for the next attempt.
    pub fn render(&mut self, timer: f32, output: &mut [u8]) -> Result<(), RenderError> {
        let required = self.frame_bytes_count();
        if output.len() < required {
            return Err(RenderError::OutputBufferTooSmall { required, provided: output.len() });
        }

        self.frame_time.start();
        let outcome = self.run_cycle(timer, &mut output[..required]);
        self.enter(RenderStage::Idle);

        if let Err(failure) = outcome {
            self.statistics.failed_frames += 1;
            error!("render cycle failed after {}: {}", failure.completed, failure.error);
            return Err(RenderError::Engine { stage: failure.completed, source: failure.error });
        }

        self.scene_parameters.advance_iteration();
        self.draft = self.draft.saturating_sub(1).max(1);
        self.statistics.frames_rendered += 1;
        self.frame_time.sample();
        self.write_performance_report();
        Ok(())
    }

    fn enter(&mut self, stage: RenderStage) {
        trace!("render stage: {} -> {}", self.stage, stage);
        self.stage = stage;
    }

    fn run_cycle(&mut self, timer: f32, output: &mut [u8]) -> Result<(), CycleFailure> {
        self.enter(RenderStage::CameraApplied);

        self.upload_dynamic().map_err(|error| CycleFailure::after(RenderStage::CameraApplied, error))?;
        self.enter(RenderStage::DynamicUploaded);

        let static_revision = self.scene.static_revision();
        if self.sync_cache.needs_static_upload() {
            self.upload_static().map_err(|error| CycleFailure::after(RenderStage::DynamicUploaded, error))?;
            self.sync_cache.mark_static_uploaded(static_revision);
            self.statistics.static_uploads += 1;
            self.enter(RenderStage::StaticUploaded);
        } else {
            self.sync_cache.check_staleness(static_revision);
        }
        let uploaded = self.stage;

        self.execute(timer).map_err(|error| CycleFailure::after(uploaded, error))?;
        self.enter(RenderStage::KernelExecuted);

        self.engine.read_back(output).map_err(|error| CycleFailure::after(RenderStage::KernelExecuted, error))?;
        self.enter(RenderStage::ReadBack);
        Ok(())
    }

    fn upload_dynamic(&mut self) -> Result<(), EngineError> {
        let boxes = self.scene.serialize_boxes();
        let primitives = self.scene.serialize_primitives();
        let lights = self.scene.serialize_lights();

        let payload = DynamicPayload {
            boxes: Payload::new(boxes.backend(), self.scene.boxes().active_count()),
            primitives: Payload::new(primitives.backend(), self.scene.primitives_count()),
            lights: Payload::new(lights.backend(), self.scene.lights_count()),
        };
        self.engine.upload_dynamic(&payload)
    }

    fn upload_static(&mut self) -> Result<(), EngineError> {
        let materials = self.scene.serialize_materials();
        let textures = self.scene.texture_bytes();

        let payload = StaticPayload {
            materials: Payload::new(materials.backend(), self.scene.materials_count()),
            textures: Payload::new(&textures, self.scene.textures_count()),
            random_table: &self.random_table,
            level_table: &self.level_table,
        };
        debug!("uploading static data: {} materials, {} textures", payload.materials.objects_count, payload.textures.objects_count);
        self.engine.upload_static(&payload)
    }

    fn execute(&mut self, timer: f32) -> Result<(), EngineError> {
        let counts = ObjectCounts {
            boxes: self.scene.boxes().active_count(),
            primitives: self.scene.primitives_count(),
            lights: self.scene.lights_count(),
            materials: self.scene.materials_count(),
        };
        let uniforms = Uniforms {
            frame_buffer_size: self.frame_size,
            color_depth: self.color_depth,
            scene_parameters: &self.scene_parameters,
            post_processing: &self.post_processing,
            camera: &self.camera,
            counts,
            draft: self.draft,
            timer,
        }
        .serialize();

        let launch = KernelLaunch {
            uniforms: uniforms.backend(),
            camera: &self.camera,
            scene_parameters: &self.scene_parameters,
            post_processing: &self.post_processing,
            draft: self.draft,
            timer,
        };

        let kernel_start = Instant::now();
        self.engine.execute(&launch)?;
        let elapsed = kernel_start.elapsed();

        self.kernel_time.record(elapsed);
        if elapsed > self.kernel_deadline {
            self.statistics.deadline_overruns += 1;
            warn!("kernel took {:?}, deadline is {:?}", elapsed, self.kernel_deadline);
        }
        Ok(())
    }

    fn write_performance_report(&mut self) {
        let average_frame_time = self.frame_time.average_delta();
        let kernel_time = &self.kernel_time;
        let iteration = self.scene_parameters.path_tracing_iteration;
        self.performance_reporter.do_write(|| {
            format!(
                "average cycle: {} ms; kernel (ms): min={}, max={}, current={}; iteration {}",
                average_frame_time.as_millis(),
                kernel_time.min_time().as_millis(),
                kernel_time.max_time().as_millis(),
                kernel_time.last_time().as_millis(),
                iteration,
            )
        });
    }
}

impl<E: ComputeEngine> Drop for RenderSession<E> {
    fn drop(&mut self) {
        self.engine.shutdown();
        info!("render session closed: {} frames, {} failed", self.statistics.frames_rendered, self.statistics.failed_frames);
    }
}

struct CycleFailure {
    completed: RenderStage,
    error: EngineError,
}

impl CycleFailure {
    #[must_use]
    fn after(completed: RenderStage, error: EngineError) -> Self {
        Self { completed, error }
    }
}

/// Jitter values in `[-1, 1)`; the same seed always yields the same table.
#[must_use]
fn make_random_table(size: usize, seed: u64) -> Vec<f32> {
    let mut table = vec![0.0; size];
    table.par_chunks_mut(RANDOM_CHUNK_SIZE).enumerate().for_each(|(chunk_index, chunk)| {
        let mut generator = StdRng::seed_from_u64(seed.wrapping_add(chunk_index as u64));
        for value in chunk.iter_mut() {
            *value = generator.gen_range(-RANDOM_SPREAD..RANDOM_SPREAD) as f32 / RANDOM_SPREAD as f32;
        }
    });
    table
}
