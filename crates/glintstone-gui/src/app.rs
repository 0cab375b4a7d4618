use std::path::PathBuf;
use std::sync::mpsc;

use glintstone_core::{ImageSources, LoadOutcome, Viewport, Zoombox, ZoomboxConfig};
use tracing::debug;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{SourcesState, UIState, ViewportState};
use crate::worker;

pub struct GlintstoneApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub zoombox: Zoombox,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub sources: SourcesState,
    /// Sources of the last requested load, replayed after a config import.
    pub last_request: Option<(ImageSources, Option<PathBuf>)>,
    /// Image named on the command line, loaded once the first frame has
    /// reported the real texture limit.
    initial_image: Option<String>,
    pub show_about: bool,
}

impl GlintstoneApp {
    pub fn new(ctx: &egui::Context, initial_image: Option<String>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        // The canvas size is unknown until the first frame lays out.
        let zoombox = Zoombox::new(ZoomboxConfig::default(), Viewport::new(0.0, 0.0));

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            zoombox,
            ui_state: UIState::new(),
            viewport: ViewportState::default(),
            sources: SourcesState::default(),
            last_request: None,
            initial_image,
            show_about: false,
        }
    }

    /// Start a background load. Any load still in flight becomes stale.
    pub fn request_load(
        &mut self,
        ctx: &egui::Context,
        sources: ImageSources,
        cache_dir: Option<PathBuf>,
    ) {
        let ticket = self.zoombox.begin_load();
        let config = self.zoombox.config();
        let minimap_max = [config.minimap_max_width, config.minimap_max_height];
        let max_texture_side = ctx.input(|i| i.max_texture_side);

        debug!(generation = ticket.generation(), "Requesting image load");
        self.ui_state.loading = true;
        self.last_request = Some((sources.clone(), cache_dir.clone()));
        self.send_command(WorkerCommand::LoadImage {
            ticket,
            sources,
            cache_dir,
            max_texture_side,
            minimap_max,
        });
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded {
                    ticket,
                    info,
                    display,
                    minimap,
                } => {
                    match self.zoombox.finish_load(ticket, Ok(info), &mut self.ui_state) {
                        LoadOutcome::Applied => {
                            self.viewport.texture = Some(ctx.load_texture(
                                "viewer",
                                display,
                                egui::TextureOptions::LINEAR,
                            ));
                            self.viewport.minimap_texture = Some(ctx.load_texture(
                                "minimap",
                                minimap,
                                egui::TextureOptions::LINEAR,
                            ));
                        }
                        LoadOutcome::Stale => {
                            self.ui_state
                                .add_log(format!("Discarded stale load #{}", ticket.generation()));
                        }
                        LoadOutcome::Failed => {}
                    }
                }
                WorkerResult::ImageFailed { ticket, error } => {
                    if self.zoombox.finish_load(ticket, Err(error), &mut self.ui_state)
                        == LoadOutcome::Failed
                    {
                        self.viewport.clear();
                    }
                }
                WorkerResult::AnnotationsLoaded { path, annotations } => {
                    self.ui_state.add_log(format!(
                        "{} annotations from {}",
                        annotations.len(),
                        path.display()
                    ));
                    self.ui_state.selected = None;
                    self.zoombox.set_overlays(annotations, &mut self.ui_state);
                }
                WorkerResult::ImagePicked { path } => {
                    let local = path.display().to_string();
                    self.sources.local = local.clone();
                    self.request_load(
                        ctx,
                        ImageSources {
                            local: Some(local),
                            ..Default::default()
                        },
                        None,
                    );
                }
                WorkerResult::ConfigImported { path, config } => {
                    self.ui_state
                        .add_log(format!("Imported config: {}", path.display()));
                    self.apply_config(ctx, config);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Apply an imported config to the live viewer. The minimap thumbnail
    /// is rendered at the configured size, so a size change reloads.
    fn apply_config(&mut self, ctx: &egui::Context, config: ZoomboxConfig) {
        let old = self.zoombox.config();
        let minimap_changed = old.minimap_max_width != config.minimap_max_width
            || old.minimap_max_height != config.minimap_max_height;
        self.zoombox.set_config(config, &mut self.ui_state);

        if minimap_changed {
            if let Some((sources, cache_dir)) = self.last_request.clone() {
                self.request_load(ctx, sources, cache_dir);
            }
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for GlintstoneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(image) = self.initial_image.take() {
            self.sources.local = image.clone();
            let sources = ImageSources {
                local: Some(image),
                ..Default::default()
            };
            self.request_load(ctx, sources, None);
        }
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::sources::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Glintstone")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Glintstone");
                        ui.label("Tablet Image Viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
