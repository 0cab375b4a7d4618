//! Scale bounds, pan clamping and anchor-preserving zoom.
//!
//! These are pure functions over `f64`; the `Zoombox` applies them to its
//! own state after every mutation.

use crate::config::ZoomboxConfig;
use crate::geometry::Viewport;
use crate::state::ViewerState;

/// Contain and cover scales of an image in a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitBounds {
    /// Largest scale at which the whole image is visible.
    pub contain: f64,
    /// Smallest scale at which the image fills the viewport.
    pub cover: f64,
}

impl FitBounds {
    /// Returns `None` for a degenerate viewport or a zero-sized image.
    pub fn compute(viewport: Viewport, natural_width: u32, natural_height: u32) -> Option<Self> {
        if viewport.is_degenerate() || natural_width == 0 || natural_height == 0 {
            return None;
        }
        let fit_w = viewport.width / natural_width as f64;
        let fit_h = viewport.height / natural_height as f64;
        Some(Self {
            contain: fit_w.min(fit_h),
            cover: fit_w.max(fit_h),
        })
    }

    /// Effective `(min_scale, max_scale)` for a config.
    ///
    /// The minimum is the contain scale raised to the config floor but never
    /// above cover; the maximum is never below cover, so the initial
    /// cover scale is always in range.
    pub fn scale_range(&self, config: &ZoomboxConfig) -> (f64, f64) {
        let min = self.contain.max(config.min_scale).min(self.cover);
        let max = config.max_scale.max(self.cover);
        (min, max)
    }
}

/// Clamp one pan axis.
///
/// When the scaled image covers the viewport the pan stays in
/// `[viewport - scaled, 0]`; otherwise the image is centered.
pub fn clamp_axis(pan: f64, scaled: f64, viewport: f64) -> f64 {
    if scaled >= viewport {
        pan.clamp(viewport - scaled, 0.0)
    } else {
        (viewport - scaled) / 2.0
    }
}

/// Clamp both pan axes of `state` in place.
pub fn clamp_pan(state: &mut ViewerState, viewport: Viewport) {
    state.pan_x = clamp_axis(state.pan_x, state.scaled_width(), viewport.width);
    state.pan_y = clamp_axis(state.pan_y, state.scaled_height(), viewport.height);
}

/// Pan that centers the image at its current scale.
pub fn centered_pan(state: &ViewerState, viewport: Viewport) -> (f64, f64) {
    (
        (viewport.width - state.scaled_width()) / 2.0,
        (viewport.height - state.scaled_height()) / 2.0,
    )
}

/// New pan for one axis so the point `anchor` stays fixed when the scale
/// changes by `ratio = new_scale / old_scale`.
pub fn anchor_pan(anchor: f64, pan: f64, ratio: f64) -> f64 {
    anchor - ratio * (anchor - pan)
}

/// Pan that puts the natural-image point `(ix, iy)` at the viewport center.
pub fn pan_to_center_on(ix: f64, iy: f64, scale: f64, viewport: Viewport) -> (f64, f64) {
    (
        viewport.width / 2.0 - ix * scale,
        viewport.height / 2.0 - iy * scale,
    )
}
