use crate::engine::compute_engine::{ComputeEngine, DynamicPayload, EngineSetup, KernelLaunch, StaticPayload};
use crate::engine::engine_error::EngineError;
use crate::sync::device_sync_cache::DataKind;
use log::{debug, info};
use palette::Srgb;
use rayon::prelude::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeadlessStatistics {
    pub dynamic_uploads: usize,
    pub static_uploads: usize,
    pub executions: usize,
    pub read_backs: usize,
    pub primitives_on_device: usize,
    pub boxes_on_device: usize,
    pub lights_on_device: usize,
    pub materials_on_device: usize,
    pub textures_on_device: usize,
}

/// CPU stand-in for the ray-tracing device: keeps the upload protocol
/// and the framebuffer, but shades every pixel with the background color.
pub struct HeadlessEngine {
    setup: Option<EngineSetup>,
    framebuffer: Vec<u8>,
    statistics: HeadlessStatistics,
}

impl HeadlessEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            setup: None,
            framebuffer: Vec::new(),
            statistics: HeadlessStatistics::default(),
        }
    }

    #[must_use]
    pub fn statistics(&self) -> HeadlessStatistics {
        self.statistics
    }

    #[must_use]
    pub fn initialized(&self) -> bool {
        self.setup.is_some()
    }

    fn setup(&self) -> Result<&EngineSetup, EngineError> {
        self.setup.as_ref().ok_or(EngineError::NotInitialized)
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeEngine for HeadlessEngine {
    fn initialize(&mut self, setup: &EngineSetup) -> Result<(), EngineError> {
        self.framebuffer = vec![0; setup.frame_size.bytes_count(setup.color_depth)];
        self.setup = Some(*setup);
        info!("headless engine ready: {}x{} {}", setup.frame_size.width(), setup.frame_size.height(), setup.color_depth);
        Ok(())
    }

    fn upload_dynamic(&mut self, payload: &DynamicPayload) -> Result<(), EngineError> {
        let setup = self.setup()?;
        if payload.primitives.objects_count > setup.capacities.max_primitives {
            return Err(EngineError::TransferFailed {
                what: DataKind::Primitives,
                reason: format!("{} exceed the device capacity {}", payload.primitives.objects_count, setup.capacities.max_primitives),
            });
        }
        self.statistics.dynamic_uploads += 1;
        self.statistics.boxes_on_device = payload.boxes.objects_count;
        self.statistics.primitives_on_device = payload.primitives.objects_count;
        self.statistics.lights_on_device = payload.lights.objects_count;
        Ok(())
    }

    fn upload_static(&mut self, payload: &StaticPayload) -> Result<(), EngineError> {
        let setup = self.setup()?;
        if payload.random_table.len() != setup.random_table_size {
            return Err(EngineError::TransferFailed {
                what: DataKind::RandomTable,
                reason: format!("expected {} values, got {}", setup.random_table_size, payload.random_table.len()),
            });
        }
        self.statistics.static_uploads += 1;
        self.statistics.materials_on_device = payload.materials.objects_count;
        self.statistics.textures_on_device = payload.textures.objects_count;
        debug!("headless engine received {} bytes of textures", payload.textures.bytes.len());
        Ok(())
    }

    fn execute(&mut self, launch: &KernelLaunch) -> Result<(), EngineError> {
        let bytes_per_pixel = self.setup()?.color_depth.bytes_per_pixel();
        let background: Srgb<u8> = launch.scene_parameters.background_color.into_format();
        let color = [background.red, background.green, background.blue, u8::MAX];

        self.framebuffer.par_chunks_mut(bytes_per_pixel).for_each(|pixel| {
            pixel.copy_from_slice(&color[..bytes_per_pixel]);
        });
        self.statistics.executions += 1;
        Ok(())
    }

    fn read_back(&mut self, target: &mut [u8]) -> Result<(), EngineError> {
        self.setup()?;
        if target.len() < self.framebuffer.len() {
            return Err(EngineError::ReadBackTargetTooSmall { required: self.framebuffer.len(), provided: target.len() });
        }
        target[..self.framebuffer.len()].copy_from_slice(&self.framebuffer);
        self.statistics.read_backs += 1;
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.setup.take().is_some() {
            info!("headless engine released after {} frames", self.statistics.executions);
        }
        self.framebuffer = Vec::new();
    }
}
