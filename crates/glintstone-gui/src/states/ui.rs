use glintstone_core::{
    Annotation, LoadedImageInfo, ScreenRect, ZoomChange, ZoomboxError, ZoomboxEvents,
};
use tracing::{debug, info, warn};

/// Overall UI state. Doubles as the event sink the viewer reports into.
#[derive(Default)]
pub struct UIState {
    /// Source of the image currently shown.
    pub loaded: Option<LoadedImageInfo>,
    /// True while a load is in flight.
    pub loading: bool,
    /// Last load failure; the viewport shows the placeholder.
    pub load_error: Option<String>,

    pub hovered_sign: Option<Annotation>,
    pub selected: Option<(Annotation, ScreenRect)>,
    pub last_zoom: Option<ZoomChange>,

    pub show_minimap: bool,
    pub show_overlays: bool,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            show_minimap: true,
            show_overlays: true,
            ..Default::default()
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}

impl ZoomboxEvents for UIState {
    fn on_image_load(&mut self, info: &LoadedImageInfo) {
        info!(source = %info.source, width = info.width, height = info.height, "Image loaded");
        self.add_log(format!(
            "Loaded: {} ({}x{})",
            info.source, info.width, info.height
        ));
        self.loaded = Some(info.clone());
        self.loading = false;
        self.load_error = None;
        self.selected = None;
    }

    fn on_image_error(&mut self, error: &ZoomboxError) {
        warn!(%error, "Image unavailable");
        self.add_log(format!("ERROR: {error}"));
        self.loaded = None;
        self.loading = false;
        self.load_error = Some(error.to_string());
        self.selected = None;
    }

    fn on_zoom_change(&mut self, change: ZoomChange) {
        self.last_zoom = Some(change);
    }

    fn on_overlay_click(&mut self, annotation: &Annotation, rect: ScreenRect) {
        debug!(sign = %annotation.sign, surface = %annotation.surface, "Overlay clicked");
        self.add_log(format!(
            "Sign '{}' on {} ({})",
            annotation.sign, annotation.surface, annotation.source
        ));
        self.selected = Some((annotation.clone(), rect));
    }

    fn on_overlay_hover(&mut self, annotation: Option<&Annotation>) {
        self.hovered_sign = annotation.cloned();
    }
}
