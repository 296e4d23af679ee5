mod demo_scene;

use anyhow::Context;
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracer_host::geometry::alias::{Point, Vector};
use tracer_host::loaders::pdb::load_pdb;
use tracer_host::output::color_depth::ColorDepth;
use tracer_host::service::bitmap_format::BitmapFormat;
use tracer_host::{BitmapProvider, HeadlessEngine, ServiceConfig, StreamingService};

const DEFAULT_LOG_FILTER: &str = "info,tracer_host=debug";
const DEFAULT_FRAMES: usize = 10;
const DEFAULT_OUTPUT_DIRECTORY: &str = "frames";
const ROTATION_STEP: f32 = 0.02;

#[derive(Default)]
struct Arguments {
    config: Option<PathBuf>,
    molecule: Option<PathBuf>,
    frames: Option<usize>,
    output: Option<PathBuf>,
}

fn parse_arguments() -> anyhow::Result<Arguments> {
    let mut result = Arguments::default();
    let mut arguments = env::args().skip(1);
    while let Some(flag) = arguments.next() {
        let mut value = || arguments.next().with_context(|| format!("{} expects a value", flag));
        match flag.as_str() {
            "--config" => result.config = Some(PathBuf::from(value()?)),
            "--pdb" => result.molecule = Some(PathBuf::from(value()?)),
            "--frames" => result.frames = Some(value()?.parse().context("--frames expects a number")?),
            "--output" => result.output = Some(PathBuf::from(value()?)),
            other => anyhow::bail!("unknown argument {:?}; expected --config, --pdb, --frames or --output", other),
        }
    }
    Ok(result)
}

fn save_png(path: &Path, frame: &[u8], config: &ServiceConfig) -> anyhow::Result<()> {
    let color_type = match config.color_depth {
        ColorDepth::Rgb => image::ColorType::Rgb8,
        ColorDepth::Rgba => image::ColorType::Rgba8,
    };
    image::save_buffer(path, frame, config.frame_width, config.frame_height, color_type)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn run() -> anyhow::Result<()> {
    let arguments = parse_arguments()?;
    let config = match &arguments.config {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };

    let mut service = StreamingService::new(&config, HeadlessEngine::new())?;
    let mut random = StdRng::seed_from_u64(config.random_seed);
    demo_scene::build(service.session_mut().scene_mut(), &mut random)?;

    if let Some(molecule) = &arguments.molecule {
        load_pdb(molecule, service.session_mut().scene_mut(), demo_scene::MOLECULE_FIRST_BOX)?;
        let active = service.session_mut().scene_mut().compact_boxes();
        info!("{} bounding boxes in use after compaction", active);
    }

    let output = arguments.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY));
    fs::create_dir_all(&output).with_context(|| format!("failed to create {}", output.display()))?;

    let frames = arguments.frames.unwrap_or(DEFAULT_FRAMES);
    let post_processing = config.post_processing;
    let eye = service.session().camera().eye();
    let direction = service.session().camera().direction();

    let mut last_frame = Vec::new();
    for frame_index in 0..frames {
        service.set_camera(eye, direction, Vector::new(0.0, ROTATION_STEP, 0.0));
        let parameters = service.get_scene_info();
        last_frame = service.get_bitmap(frame_index as f32, &parameters, &post_processing)?;
    }

    let statistics = service.session().statistics();
    info!("{} frames rendered, {} deadline overruns", statistics.frames_rendered, statistics.deadline_overruns);

    if BitmapFormat::Raw == service.bitmap_format() && !last_frame.is_empty() {
        save_png(&output.join("last_frame.png"), &last_frame, &config)?;
    }

    service.set_bitmap_format(BitmapFormat::BmpFile);
    let parameters = service.get_scene_info();
    let bitmap = service.get_bitmap(frames as f32, &parameters, &post_processing)?;
    let bitmap_path = output.join("last_frame.bmp");
    fs::write(&bitmap_path, bitmap).with_context(|| format!("failed to write {}", bitmap_path.display()))?;

    let diagnostics = service.session().scene().diagnostics();
    info!(
        "scene diagnostics: {} rejected handles, {} rejected boxes, {} dropped assignments",
        diagnostics.rejected_handles(),
        diagnostics.rejected_box_ids(),
        diagnostics.dropped_box_assignments(),
    );
    info!("frames written to {}", output.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER)).init();

    let result = run();
    if let Err(failure) = &result {
        error!("sandbox failed: {:#}", failure);
    }
    result
}
