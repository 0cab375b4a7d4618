use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DRAG_SLOP, DEFAULT_HOVER_THRESHOLD, DEFAULT_KEYBOARD_PAN_STEP, DEFAULT_MAX_SCALE,
    DEFAULT_MINIMAP_MAX_HEIGHT, DEFAULT_MINIMAP_MAX_WIDTH, DEFAULT_MIN_SCALE,
    DEFAULT_PINCH_DIVISOR, DEFAULT_RESIZE_DEBOUNCE_MS, DEFAULT_ZOOM_STEP,
};
use crate::error::{Result, ZoomboxError};

/// Tunables a host passes when constructing a Zoombox.
///
/// Every field has a default, so a partial TOML file is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomboxConfig {
    /// Floor for the contain scale. The effective minimum never drops below it.
    pub min_scale: f64,
    /// Ceiling for zooming in.
    pub max_scale: f64,
    /// Scale delta for `zoom_in`/`zoom_out` and one wheel notch.
    pub zoom_step: f64,
    /// Overlay hover detail is only reported at or above this scale.
    pub hover_threshold: f64,
    /// Pinch distance delta (px) divided by this gives the scale delta.
    pub pinch_divisor: f64,
    /// Arrow-key pan distance in viewport pixels.
    pub keyboard_pan_step: f64,
    pub resize_debounce_ms: u64,
    pub minimap_max_width: u32,
    pub minimap_max_height: u32,
    /// Pointer travel below which press + release is a click rather than a drag.
    pub drag_slop: f64,
}

impl Default for ZoomboxConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            zoom_step: DEFAULT_ZOOM_STEP,
            hover_threshold: DEFAULT_HOVER_THRESHOLD,
            pinch_divisor: DEFAULT_PINCH_DIVISOR,
            keyboard_pan_step: DEFAULT_KEYBOARD_PAN_STEP,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            minimap_max_width: DEFAULT_MINIMAP_MAX_WIDTH,
            minimap_max_height: DEFAULT_MINIMAP_MAX_HEIGHT,
            drag_slop: DEFAULT_DRAG_SLOP,
        }
    }
}

impl ZoomboxConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ZoomboxConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(ZoomboxError::InvalidConfig(format!(
                "min_scale must be > 0 (got {})",
                self.min_scale
            )));
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return Err(ZoomboxError::InvalidConfig(format!(
                "max_scale ({}) must be >= min_scale ({})",
                self.max_scale, self.min_scale
            )));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return Err(ZoomboxError::InvalidConfig(
                "zoom_step must be > 0".into(),
            ));
        }
        if !(self.pinch_divisor.is_finite() && self.pinch_divisor > 0.0) {
            return Err(ZoomboxError::InvalidConfig(
                "pinch_divisor must be > 0".into(),
            ));
        }
        if !(self.keyboard_pan_step.is_finite() && self.keyboard_pan_step > 0.0) {
            return Err(ZoomboxError::InvalidConfig(
                "keyboard_pan_step must be > 0".into(),
            ));
        }
        if self.minimap_max_width == 0 || self.minimap_max_height == 0 {
            return Err(ZoomboxError::InvalidConfig(format!(
                "minimap maximum must be at least 1x1 (got {}x{})",
                self.minimap_max_width, self.minimap_max_height
            )));
        }
        if !(self.hover_threshold.is_finite() && self.drag_slop.is_finite() && self.drag_slop >= 0.0) {
            return Err(ZoomboxError::InvalidConfig(
                "hover_threshold and drag_slop must be finite, drag_slop >= 0".into(),
            ));
        }
        Ok(())
    }
}
