use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Args;
use glintstone_core::loader::ChainFetcher;
use glintstone_core::overlay::load_annotations_json;
use glintstone_core::{
    ImageSources, InputEvent, LoadedImageInfo, RecordingEvents, Viewport, Zoombox, ZoomboxConfig,
};
use serde::Deserialize;
use tracing::debug;

use crate::summary::{print_state, print_step};

#[derive(Args)]
pub struct ReplayArgs {
    /// Replay script (TOML)
    pub script: PathBuf,

    /// Viewer config (TOML); defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// A scripted viewer session.
#[derive(Debug, Deserialize)]
struct ReplayScript {
    viewport: Viewport,
    #[serde(default)]
    sources: ImageSources,
    /// Natural image size to assume when no sources are given.
    natural: Option<NaturalSize>,
    /// JSON annotations file, relative to the script.
    annotations: Option<PathBuf>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct NaturalSize {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Step {
    Input { event: InputEvent },
    ZoomIn,
    ZoomOut,
    ZoomAt { x: f64, y: f64, delta: f64 },
    PanBy { dx: f64, dy: f64 },
    Reset,
    ResetZoom,
    /// Debounced resize, followed by enough simulated time for it to apply.
    Resize { width: f64, height: f64 },
    Minimap { fx: f64, fy: f64 },
    Hover { x: f64, y: f64 },
    Click { x: f64, y: f64 },
    ClearOverlays,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let script: ReplayScript = toml::from_str(&text)
        .with_context(|| format!("Invalid replay script {}", args.script.display()))?;
    debug!(steps = script.steps.len(), viewport = ?script.viewport, "Replay script parsed");

    let config = match args.config {
        Some(ref path) => ZoomboxConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ZoomboxConfig::default(),
    };

    let base_dir = args
        .script
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut zoombox = Zoombox::with_validated_config(config, script.viewport)?;
    let mut events = RecordingEvents::new();

    load_image(&mut zoombox, &script, &base_dir, &mut events)?;
    print_step(0, "load image", &events.drain());

    if let Some(ref rel) = script.annotations {
        let path = base_dir.join(rel);
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read annotations {}", path.display()))?;
        let annotations = load_annotations_json(&json)?;
        println!("  Loaded {} annotations", annotations.len());
        zoombox.set_overlays(annotations, &mut events);
    }

    let mut clock = Instant::now();
    for (index, step) in script.steps.iter().enumerate() {
        let description = apply_step(&mut zoombox, step, &mut clock, &mut events);
        print_step(index + 1, &description, &events.drain());
    }

    print_state(zoombox.phase(), &zoombox.state(), &zoombox.minimap_indicator());
    Ok(())
}

fn load_image(
    zoombox: &mut Zoombox,
    script: &ReplayScript,
    base_dir: &Path,
    events: &mut RecordingEvents,
) -> Result<()> {
    if !script.sources.candidates().is_empty() {
        let fetcher = ChainFetcher::with_cache_dir(Some(base_dir.to_path_buf()));
        if !zoombox.load_image(&script.sources, &fetcher, events) {
            bail!("No image source in the script could be loaded");
        }
        return Ok(());
    }

    match script.natural {
        Some(ref size) => {
            let ticket = zoombox.begin_load();
            let info = LoadedImageInfo {
                source: "<natural size>".into(),
                width: size.width,
                height: size.height,
            };
            zoombox.finish_load(ticket, Ok(info), events);
            Ok(())
        }
        None => bail!("Script needs either [sources] or [natural]"),
    }
}

fn apply_step(
    zoombox: &mut Zoombox,
    step: &Step,
    clock: &mut Instant,
    events: &mut RecordingEvents,
) -> String {
    match step {
        Step::Input { event } => {
            let consumed = zoombox.handle_input(event.clone(), events);
            format!("{event:?} (consumed: {consumed})")
        }
        Step::ZoomIn => {
            zoombox.zoom_in(events);
            "zoom in".into()
        }
        Step::ZoomOut => {
            zoombox.zoom_out(events);
            "zoom out".into()
        }
        Step::ZoomAt { x, y, delta } => {
            zoombox.zoom_at(*x, *y, *delta, events);
            format!("zoom at ({x}, {y}) by {delta:+}")
        }
        Step::PanBy { dx, dy } => {
            zoombox.pan_by(*dx, *dy, events);
            format!("pan by ({dx}, {dy})")
        }
        Step::Reset => {
            zoombox.reset(events);
            "reset".into()
        }
        Step::ResetZoom => {
            zoombox.reset_zoom(events);
            "reset zoom".into()
        }
        Step::Resize { width, height } => {
            zoombox.resize(Viewport::new(*width, *height), *clock);
            *clock += zoombox.config().resize_debounce() + Duration::from_millis(1);
            zoombox.tick(*clock, events);
            format!("resize to {width}x{height}")
        }
        Step::Minimap { fx, fy } => {
            zoombox.navigate_minimap(*fx, *fy, events);
            format!("minimap navigate ({fx}, {fy})")
        }
        Step::Hover { x, y } => {
            zoombox.hover_at(*x, *y, events);
            format!("hover ({x}, {y})")
        }
        Step::Click { x, y } => {
            let hit = zoombox.click_at(*x, *y, events);
            format!("click ({x}, {y}) hit: {hit}")
        }
        Step::ClearOverlays => {
            zoombox.clear_overlays(events);
            "clear overlays".into()
        }
    }
}
