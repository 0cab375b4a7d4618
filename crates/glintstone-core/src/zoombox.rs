use std::time::Instant;

use tracing::{debug, info};

use crate::config::ZoomboxConfig;
use crate::consts::SCALE_EPSILON;
use crate::error::Result;
use crate::events::ZoomboxEvents;
use crate::geometry::{Point, ScreenRect, Viewport, ViewRect};
use crate::input::Gesture;
use crate::loader::{load_first, ImageSources, LoadedImageInfo, SourceFetcher};
use crate::minimap::{minimap_to_image, viewport_indicator, MinimapLayout};
use crate::overlay::{Annotation, OverlayLayer};
use crate::state::{Phase, ViewerState};
use crate::transform::{anchor_pan, clamp_pan, centered_pan, pan_to_center_on, FitBounds};

/// Handed out by [`Zoombox::begin_load`]. Only the newest ticket's result
/// is applied; older ones are discarded on arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`Zoombox::finish_load`] did with a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer load started (or the viewer was destroyed) in the meantime.
    Stale,
}

/// Pan/zoom viewer for one image with a minimap and annotation overlays.
///
/// Headless: the host feeds viewport size, input and load results in, and
/// reads state and layouts out to draw.
pub struct Zoombox {
    config: ZoomboxConfig,
    viewport: Viewport,
    state: ViewerState,
    phase: Phase,
    overlays: OverlayLayer,
    generation: u64,
    pending_resize: Option<(Viewport, Instant)>,
    pub(crate) gesture: Gesture,
}

impl Zoombox {
    pub fn new(config: ZoomboxConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            state: ViewerState::default(),
            phase: Phase::Unloaded,
            overlays: OverlayLayer::default(),
            generation: 0,
            pending_resize: None,
            gesture: Gesture::Idle,
        }
    }

    /// Construct with a validated config.
    pub fn with_validated_config(config: ZoomboxConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config, viewport))
    }

    pub fn config(&self) -> &ZoomboxConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn overlays(&self) -> &OverlayLayer {
        &self.overlays
    }

    /// Loaded and laid out in a usable viewport.
    pub(crate) fn is_interactive(&self) -> bool {
        self.phase == Phase::Loaded && !self.viewport.is_degenerate() && self.state.scale > 0.0
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Start a load, invalidating any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply the result of a load started with `begin_load`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<LoadedImageInfo>,
        events: &mut dyn ZoomboxEvents,
    ) -> LoadOutcome {
        if self.phase == Phase::Destroyed || ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale image load"
            );
            return LoadOutcome::Stale;
        }

        self.clear_hover(events);
        match result {
            Ok(info) => {
                self.apply_loaded(&info);
                events.on_image_load(&info);
                events.on_zoom_change(self.state.zoom_change());
                LoadOutcome::Applied
            }
            Err(e) => {
                self.state = ViewerState::default();
                self.phase = Phase::Unloaded;
                self.gesture = Gesture::Idle;
                events.on_image_error(&e);
                LoadOutcome::Failed
            }
        }
    }

    /// Walk the source chain synchronously. Returns `false` and enters the
    /// placeholder state if every source fails; never returns an error.
    pub fn load_image(
        &mut self,
        sources: &ImageSources,
        fetcher: &dyn SourceFetcher,
        events: &mut dyn ZoomboxEvents,
    ) -> bool {
        if self.phase == Phase::Destroyed {
            return false;
        }
        let ticket = self.begin_load();
        let result = load_first(sources, fetcher).map(|loaded| loaded.info());
        self.finish_load(ticket, result, events) == LoadOutcome::Applied
    }

    fn apply_loaded(&mut self, info: &LoadedImageInfo) {
        self.phase = Phase::Loaded;
        self.gesture = Gesture::Idle;
        self.state = ViewerState {
            natural_width: info.width,
            natural_height: info.height,
            image_loaded: true,
            ..ViewerState::default()
        };
        self.fit_to_viewport();
        info!(
            source = %info.source,
            scale = self.state.scale,
            min = self.state.min_scale,
            max = self.state.max_scale,
            "Zoombox ready"
        );
    }

    /// Recompute bounds and show the image at cover scale, centered.
    /// Leaves the scale at zero while the viewport is degenerate.
    fn fit_to_viewport(&mut self) {
        let Some(bounds) = FitBounds::compute(
            self.viewport,
            self.state.natural_width,
            self.state.natural_height,
        ) else {
            debug!(viewport = ?self.viewport, "Viewport degenerate, deferring fit");
            return;
        };
        let (min, max) = bounds.scale_range(&self.config);
        self.state.cover_scale = bounds.cover;
        self.state.min_scale = min;
        self.state.max_scale = max;
        self.state.scale = bounds.cover;
        self.center();
    }

    fn center(&mut self) {
        let (px, py) = centered_pan(&self.state, self.viewport);
        self.state.pan_x = px;
        self.state.pan_y = py;
        clamp_pan(&mut self.state, self.viewport);
    }

    fn notify_if_changed(&self, before: ViewerState, events: &mut dyn ZoomboxEvents) {
        if before.scale != self.state.scale
            || before.pan_x != self.state.pan_x
            || before.pan_y != self.state.pan_y
        {
            events.on_zoom_change(self.state.zoom_change());
        }
    }

    // -----------------------------------------------------------------------
    // Transform
    // -----------------------------------------------------------------------

    /// Zoom by `delta` keeping the viewport point `(x, y)` fixed.
    pub fn zoom_at(&mut self, x: f64, y: f64, delta: f64, events: &mut dyn ZoomboxEvents) {
        if !self.is_interactive() || !(x.is_finite() && y.is_finite() && delta.is_finite()) {
            return;
        }
        let before = self.state;
        let old_scale = self.state.scale;
        let new_scale = (old_scale + delta).clamp(self.state.min_scale, self.state.max_scale);
        if (new_scale - old_scale).abs() < SCALE_EPSILON {
            return;
        }

        let ratio = new_scale / old_scale;
        self.state.pan_x = anchor_pan(x, self.state.pan_x, ratio);
        self.state.pan_y = anchor_pan(y, self.state.pan_y, ratio);
        self.state.scale = new_scale;
        clamp_pan(&mut self.state, self.viewport);

        self.refresh_hover_gate(events);
        self.notify_if_changed(before, events);
    }

    pub fn zoom_in(&mut self, events: &mut dyn ZoomboxEvents) {
        let c = self.viewport.center();
        self.zoom_at(c.x, c.y, self.config.zoom_step, events);
    }

    pub fn zoom_out(&mut self, events: &mut dyn ZoomboxEvents) {
        let c = self.viewport.center();
        self.zoom_at(c.x, c.y, -self.config.zoom_step, events);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64, events: &mut dyn ZoomboxEvents) {
        if !self.is_interactive() || !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let before = self.state;
        self.state.pan_x += dx;
        self.state.pan_y += dy;
        clamp_pan(&mut self.state, self.viewport);
        self.notify_if_changed(before, events);
    }

    /// Set the pan directly, then clamp.
    pub(crate) fn set_pan(&mut self, pan_x: f64, pan_y: f64, events: &mut dyn ZoomboxEvents) {
        if !(pan_x.is_finite() && pan_y.is_finite()) {
            return;
        }
        let before = self.state;
        self.state.pan_x = pan_x;
        self.state.pan_y = pan_y;
        clamp_pan(&mut self.state, self.viewport);
        self.notify_if_changed(before, events);
    }

    /// Back to the initial view: cover scale, centered.
    pub fn reset(&mut self, events: &mut dyn ZoomboxEvents) {
        if !self.is_interactive() {
            return;
        }
        let before = self.state;
        self.state.scale = self.state.cover_scale;
        self.center();
        self.refresh_hover_gate(events);
        self.notify_if_changed(before, events);
    }

    /// Zoom out to the minimum scale so the whole image is visible, centered.
    pub fn reset_zoom(&mut self, events: &mut dyn ZoomboxEvents) {
        if !self.is_interactive() {
            return;
        }
        let before = self.state;
        self.state.scale = self.state.min_scale;
        self.center();
        self.refresh_hover_gate(events);
        self.notify_if_changed(before, events);
    }

    /// Swap in a new config, keeping the image and overlays. Bounds are
    /// recomputed and a loaded image returns to the cover view.
    pub fn set_config(&mut self, config: ZoomboxConfig, events: &mut dyn ZoomboxEvents) {
        if self.phase == Phase::Destroyed {
            return;
        }
        self.config = config;
        if self.phase != Phase::Loaded {
            return;
        }
        let before = self.state;
        self.fit_to_viewport();
        self.refresh_hover_gate(events);
        self.notify_if_changed(before, events);
    }

    // -----------------------------------------------------------------------
    // Resize
    // -----------------------------------------------------------------------

    /// Record a container resize; applied by `tick` once the debounce
    /// interval has passed without another resize.
    pub fn resize(&mut self, viewport: Viewport, now: Instant) {
        if self.phase == Phase::Destroyed {
            return;
        }
        self.pending_resize = Some((viewport, now));
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_some()
    }

    /// Apply a debounced resize if it is due. Returns true when applied.
    pub fn tick(&mut self, now: Instant, events: &mut dyn ZoomboxEvents) -> bool {
        let Some((viewport, at)) = self.pending_resize else {
            return false;
        };
        if now.saturating_duration_since(at) < self.config.resize_debounce() {
            return false;
        }
        self.pending_resize = None;
        self.resize_now(viewport, events);
        true
    }

    /// Apply a new viewport size immediately, keeping the zoom relative to
    /// the cover scale and the image point at the viewport center.
    pub fn resize_now(&mut self, viewport: Viewport, events: &mut dyn ZoomboxEvents) {
        if self.phase == Phase::Destroyed {
            return;
        }
        if self.phase != Phase::Loaded {
            self.viewport = viewport;
            return;
        }

        let Some(bounds) = FitBounds::compute(
            viewport,
            self.state.natural_width,
            self.state.natural_height,
        ) else {
            debug!(viewport = ?viewport, "Ignoring resize to degenerate viewport");
            return;
        };
        let old_viewport = self.viewport;
        let before = self.state;
        self.viewport = viewport;

        if before.scale <= 0.0 || before.cover_scale <= 0.0 || old_viewport.is_degenerate() {
            self.fit_to_viewport();
            self.notify_if_changed(before, events);
            return;
        }

        let relative = before.scale / before.cover_scale;
        let c = old_viewport.center();
        let (ix, iy) = before.viewport_to_image(c.x, c.y);

        let (min, max) = bounds.scale_range(&self.config);
        self.state.cover_scale = bounds.cover;
        self.state.min_scale = min;
        self.state.max_scale = max;
        self.state.scale = (relative * bounds.cover).clamp(min, max);
        let (px, py) = pan_to_center_on(ix, iy, self.state.scale, viewport);
        self.state.pan_x = px;
        self.state.pan_y = py;
        clamp_pan(&mut self.state, viewport);

        debug!(
            relative,
            scale = self.state.scale,
            cover = bounds.cover,
            "Viewport resized"
        );
        self.refresh_hover_gate(events);
        self.notify_if_changed(before, events);
    }

    // -----------------------------------------------------------------------
    // Minimap
    // -----------------------------------------------------------------------

    pub fn minimap_layout(&self) -> MinimapLayout {
        MinimapLayout::fit(
            self.state.natural_width,
            self.state.natural_height,
            self.config.minimap_max_width,
            self.config.minimap_max_height,
        )
    }

    /// Visible region in percentages of the natural image.
    pub fn minimap_indicator(&self) -> ViewRect {
        viewport_indicator(&self.state, self.viewport)
    }

    /// Center the viewport on the image point under a minimap position
    /// given as fractions (0-1) of the minimap canvas.
    pub fn navigate_minimap(&mut self, fx: f64, fy: f64, events: &mut dyn ZoomboxEvents) {
        if !self.is_interactive() || !(fx.is_finite() && fy.is_finite()) {
            return;
        }
        let (ix, iy) = minimap_to_image(fx, fy, &self.state);
        let (px, py) = pan_to_center_on(ix, iy, self.state.scale, self.viewport);
        self.set_pan(px, py, events);
    }

    // -----------------------------------------------------------------------
    // Overlays
    // -----------------------------------------------------------------------

    pub fn set_overlays(&mut self, annotations: Vec<Annotation>, events: &mut dyn ZoomboxEvents) {
        if self.phase == Phase::Destroyed {
            return;
        }
        debug!(count = annotations.len(), "Overlays replaced");
        if self.overlays.replace(annotations) {
            events.on_overlay_hover(None);
        }
    }

    pub fn clear_overlays(&mut self, events: &mut dyn ZoomboxEvents) {
        if self.phase == Phase::Destroyed {
            return;
        }
        if self.overlays.clear() {
            events.on_overlay_hover(None);
        }
    }

    /// Every overlay with its viewport rectangle at the current transform.
    pub fn overlay_rects(&self) -> Vec<(&Annotation, ScreenRect)> {
        if !self.is_interactive() {
            return Vec::new();
        }
        self.overlays
            .annotations()
            .iter()
            .map(|a| (a, a.screen_rect(&self.state)))
            .collect()
    }

    fn overlay_index_at(&self, x: f64, y: f64) -> Option<usize> {
        let (ix, iy) = self.state.viewport_to_image(x, y);
        let left_pct = ix / self.state.natural_width as f64 * 100.0;
        let top_pct = iy / self.state.natural_height as f64 * 100.0;
        self.overlays.hit_test(left_pct, top_pct)
    }

    pub fn hover_enabled(&self) -> bool {
        self.state.scale >= self.config.hover_threshold
    }

    /// Update hover for a pointer at viewport `(x, y)`. Detail is only
    /// reported at or above the hover threshold.
    pub fn hover_at(&mut self, x: f64, y: f64, events: &mut dyn ZoomboxEvents) {
        if !self.is_interactive() {
            return;
        }
        let index = if self.hover_enabled() {
            self.overlay_index_at(x, y)
        } else {
            None
        };
        if self.overlays.set_hovered(index) {
            events.on_overlay_hover(self.overlays.hovered());
        }
    }

    /// Clear hover, e.g. when the pointer leaves the viewport.
    pub fn clear_hover(&mut self, events: &mut dyn ZoomboxEvents) {
        if self.overlays.set_hovered(None) {
            events.on_overlay_hover(None);
        }
    }

    fn refresh_hover_gate(&mut self, events: &mut dyn ZoomboxEvents) {
        if !self.hover_enabled() {
            self.clear_hover(events);
        }
    }

    /// Click at viewport `(x, y)`. Fires the click callback for the topmost
    /// overlay under the point at any zoom. Returns true when one was hit.
    pub fn click_at(&mut self, x: f64, y: f64, events: &mut dyn ZoomboxEvents) -> bool {
        if !self.is_interactive() {
            return false;
        }
        let Some(index) = self.overlay_index_at(x, y) else {
            return false;
        };
        match self.overlays.get(index) {
            Some(annotation) => {
                events.on_overlay_click(annotation, annotation.screen_rect(&self.state));
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Tear down: drop image state and overlays, cancel pending resize and
    /// invalidate in-flight loads. Every later call is a no-op.
    pub fn destroy(&mut self, events: &mut dyn ZoomboxEvents) {
        if self.phase == Phase::Destroyed {
            return;
        }
        self.generation += 1;
        self.pending_resize = None;
        if self.overlays.clear() {
            events.on_overlay_hover(None);
        }
        self.gesture = Gesture::Idle;
        self.state = ViewerState::default();
        self.phase = Phase::Destroyed;
    }

    pub(crate) fn drag_enabled(&self) -> bool {
        self.state.scale > self.state.min_scale + SCALE_EPSILON
    }

    pub(crate) fn pan(&self) -> Point {
        Point::new(self.state.pan_x, self.state.pan_y)
    }
}
