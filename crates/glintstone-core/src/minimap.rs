use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

use crate::geometry::{Viewport, ViewRect};
use crate::state::ViewerState;

/// Thumbnail size for the minimap, aspect-preserving within a maximum box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinimapLayout {
    pub width: u32,
    pub height: u32,
}

impl MinimapLayout {
    pub fn fit(natural_width: u32, natural_height: u32, max_width: u32, max_height: u32) -> Self {
        if natural_width == 0 || natural_height == 0 {
            return Self {
                width: max_width.max(1),
                height: max_height.max(1),
            };
        }
        let ratio = (max_width as f64 / natural_width as f64)
            .min(max_height as f64 / natural_height as f64);
        Self {
            width: ((natural_width as f64 * ratio).round() as u32).max(1),
            height: ((natural_height as f64 * ratio).round() as u32).max(1),
        }
    }
}

/// Downscale the full image into the minimap canvas.
pub fn render_thumbnail(image: &DynamicImage, layout: &MinimapLayout) -> RgbaImage {
    image
        .resize_exact(layout.width, layout.height, FilterType::Triangle)
        .to_rgba8()
}

/// The visible part of the image, in percentages of its natural size.
///
/// Clipped to the image, so a centered (letterboxed) axis reports 0-100.
pub fn viewport_indicator(state: &ViewerState, viewport: Viewport) -> ViewRect {
    if !state.image_loaded || state.scale <= 0.0 || viewport.is_degenerate() {
        return ViewRect::default();
    }
    let nw = state.natural_width as f64;
    let nh = state.natural_height as f64;

    let visible_left = -state.pan_x / state.scale;
    let visible_top = -state.pan_y / state.scale;
    let visible_width = viewport.width / state.scale;
    let visible_height = viewport.height / state.scale;

    let (left, width) = clip_span(visible_left, visible_width, nw);
    let (top, height) = clip_span(visible_top, visible_height, nh);

    ViewRect {
        left: left / nw * 100.0,
        top: top / nh * 100.0,
        width: width / nw * 100.0,
        height: height / nh * 100.0,
    }
}

fn clip_span(start: f64, len: f64, extent: f64) -> (f64, f64) {
    let lo = start.clamp(0.0, extent);
    let hi = (start + len).clamp(0.0, extent);
    (lo, hi - lo)
}

/// Natural-image point under a minimap position given as fractions (0-1).
pub fn minimap_to_image(fx: f64, fy: f64, state: &ViewerState) -> (f64, f64) {
    (
        fx.clamp(0.0, 1.0) * state.natural_width as f64,
        fy.clamp(0.0, 1.0) * state.natural_height as f64,
    )
}
