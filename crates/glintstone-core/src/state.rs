use serde::Serialize;

/// Snapshot of the transform state of one Zoombox.
///
/// `scale` maps natural image pixels to viewport pixels; `pan_x`/`pan_y`
/// are the viewport position of the image's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ViewerState {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub cover_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub natural_width: u32,
    pub natural_height: u32,
    pub image_loaded: bool,
}

impl ViewerState {
    pub fn scaled_width(&self) -> f64 {
        self.natural_width as f64 * self.scale
    }

    pub fn scaled_height(&self) -> f64 {
        self.natural_height as f64 * self.scale
    }

    /// Natural-image coordinates of a viewport point.
    pub fn viewport_to_image(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.pan_x) / self.scale, (y - self.pan_y) / self.scale)
    }

    /// Viewport coordinates of a natural-image point.
    pub fn image_to_viewport(&self, ix: f64, iy: f64) -> (f64, f64) {
        (ix * self.scale + self.pan_x, iy * self.scale + self.pan_y)
    }

    pub fn zoom_change(&self) -> ZoomChange {
        ZoomChange {
            scale: self.scale,
            pan_x: self.pan_x,
            pan_y: self.pan_y,
        }
    }
}

/// Payload of the zoom-change notification.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ZoomChange {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

/// Lifecycle phase of a Zoombox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unloaded,
    Loaded,
    Destroyed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unloaded => write!(f, "Unloaded"),
            Self::Loaded => write!(f, "Loaded"),
            Self::Destroyed => write!(f, "Destroyed"),
        }
    }
}
