use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoomboxError};
use crate::geometry::{ScreenRect, ViewRect};
use crate::state::ViewerState;

/// A detected sign location on a tablet image.
///
/// Position and size are percentages (0-100) of the natural image, so the
/// box follows the image at any zoom without recomputation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub sign: String,
    #[serde(default)]
    pub surface: String,
    #[serde(default)]
    pub source: String,
}

impl Annotation {
    pub fn view_rect(&self) -> ViewRect {
        ViewRect {
            left: self.x,
            top: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Viewport rectangle of the box under the current transform.
    pub fn screen_rect(&self, state: &ViewerState) -> ScreenRect {
        let sw = state.scaled_width();
        let sh = state.scaled_height();
        ScreenRect {
            x: state.pan_x + self.x / 100.0 * sw,
            y: state.pan_y + self.y / 100.0 * sh,
            width: self.width / 100.0 * sw,
            height: self.height / 100.0 * sh,
        }
    }

    fn validate(&self) -> Result<()> {
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        let fields_ok =
            in_range(self.x) && in_range(self.y) && in_range(self.width) && in_range(self.height);
        if !fields_ok || self.x + self.width > 100.0 || self.y + self.height > 100.0 {
            return Err(ZoomboxError::InvalidAnnotation(format!(
                "'{}' at ({}, {}) size {}x{} is outside 0-100%",
                self.sign, self.x, self.y, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Parse a JSON array of annotations, rejecting out-of-range boxes.
pub fn load_annotations_json(text: &str) -> Result<Vec<Annotation>> {
    let annotations: Vec<Annotation> = serde_json::from_str(text)?;
    for a in &annotations {
        a.validate()?;
    }
    Ok(annotations)
}

/// The current set of overlay boxes. Replaced wholesale, never patched.
#[derive(Clone, Debug, Default)]
pub struct OverlayLayer {
    annotations: Vec<Annotation>,
    hovered: Option<usize>,
}

impl OverlayLayer {
    /// Returns true when a hovered box was dropped.
    pub fn replace(&mut self, annotations: Vec<Annotation>) -> bool {
        self.annotations = annotations;
        self.hovered.take().is_some()
    }

    pub fn clear(&mut self) -> bool {
        self.replace(Vec::new())
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn hovered(&self) -> Option<&Annotation> {
        self.hovered.and_then(|i| self.annotations.get(i))
    }

    /// Returns true when the hovered box changed.
    pub(crate) fn set_hovered(&mut self, index: Option<usize>) -> bool {
        let changed = self.hovered != index;
        self.hovered = index;
        changed
    }

    /// Topmost (last drawn) box containing a point given in image percentages.
    pub fn hit_test(&self, left_pct: f64, top_pct: f64) -> Option<usize> {
        self.annotations
            .iter()
            .rposition(|a| a.view_rect().contains(left_pct, top_pct))
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.annotations.get(index)
    }
}
