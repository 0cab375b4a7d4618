use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

use glintstone_core::loader::{load_first, ChainFetcher, LoadedImage};
use glintstone_core::minimap::{render_thumbnail, MinimapLayout};
use glintstone_core::overlay::load_annotations_json;
use glintstone_core::{ImageSources, LoadTicket};
use tracing::{debug, info};

use crate::convert::rgba_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};

pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("glintstone-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage {
                ticket,
                sources,
                cache_dir,
                max_texture_side,
                minimap_max,
            } => {
                handle_load_image(
                    ticket,
                    &sources,
                    cache_dir,
                    max_texture_side,
                    minimap_max,
                    &tx,
                    &ctx,
                );
            }
            WorkerCommand::LoadAnnotations { path } => {
                handle_load_annotations(&path, &tx, &ctx);
            }
        }
    }
    debug!("Worker thread exiting");
}

fn handle_load_image(
    ticket: LoadTicket,
    sources: &ImageSources,
    cache_dir: Option<PathBuf>,
    max_texture_side: usize,
    minimap_max: [u32; 2],
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let fetcher = ChainFetcher::with_cache_dir(cache_dir);

    let loaded = match load_first(sources, &fetcher) {
        Ok(loaded) => loaded,
        Err(error) => {
            send(tx, ctx, WorkerResult::ImageFailed { ticket, error });
            return;
        }
    };

    let info = loaded.info();
    let display = display_image(&loaded, max_texture_side);
    let layout = MinimapLayout::fit(loaded.width, loaded.height, minimap_max[0], minimap_max[1]);
    let minimap = rgba_to_color_image(&render_thumbnail(&loaded.image, &layout));

    info!(
        source = %info.source,
        generation = ticket.generation(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Image decoded"
    );
    send_log(
        tx,
        ctx,
        format!(
            "Decoded {} in {:.0} ms",
            info.source,
            start.elapsed().as_secs_f64() * 1000.0
        ),
    );
    send(
        tx,
        ctx,
        WorkerResult::ImageLoaded {
            ticket,
            info,
            display,
            minimap,
        },
    );
}

/// Display copy of the image, downscaled when it exceeds the GPU texture limit.
/// Geometry always uses the natural size, so only sharpness is affected.
fn display_image(loaded: &LoadedImage, max_texture_side: usize) -> egui::ColorImage {
    let max_side = max_texture_side as u32;
    let rgba = if loaded.width > max_side || loaded.height > max_side {
        debug!(
            width = loaded.width,
            height = loaded.height,
            max_side,
            "Downscaling for display"
        );
        loaded
            .image
            .resize(max_side, max_side, image::imageops::FilterType::Triangle)
            .to_rgba8()
    } else {
        loaded.image.to_rgba8()
    };
    rgba_to_color_image(&rgba)
}

fn handle_load_annotations(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            send_error(tx, ctx, format!("Failed to read {}: {e}", path.display()));
            return;
        }
    };
    match load_annotations_json(&text) {
        Ok(annotations) => send(
            tx,
            ctx,
            WorkerResult::AnnotationsLoaded {
                path: path.to_path_buf(),
                annotations,
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Invalid annotations in {}: {e}", path.display())),
    }
}
