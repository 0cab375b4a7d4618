/// Lowest scale a configuration may allow before fit bounds are applied.
pub const DEFAULT_MIN_SCALE: f64 = 0.05;

/// Highest zoom the viewer allows, unless the cover scale of a tiny image
/// is larger.
pub const DEFAULT_MAX_SCALE: f64 = 4.0;

/// Scale delta applied by `zoom_in`, `zoom_out` and one wheel notch.
pub const DEFAULT_ZOOM_STEP: f64 = 0.15;

/// Scale at and above which hovering an overlay reports its detail.
pub const DEFAULT_HOVER_THRESHOLD: f64 = 1.0;

/// Pinch distance change (in pixels) that corresponds to a scale delta of 1.0.
/// Empirically tuned, kept configurable.
pub const DEFAULT_PINCH_DIVISOR: f64 = 200.0;

/// Arrow-key pan step in viewport pixels.
pub const DEFAULT_KEYBOARD_PAN_STEP: f64 = 50.0;

/// Quiet period before a container resize is applied.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Maximum minimap thumbnail width in pixels.
pub const DEFAULT_MINIMAP_MAX_WIDTH: u32 = 100;

/// Maximum minimap thumbnail height in pixels.
pub const DEFAULT_MINIMAP_MAX_HEIGHT: u32 = 67;

/// Pointer travel (in pixels) below which a press/release counts as a click.
pub const DEFAULT_DRAG_SLOP: f64 = 3.0;

/// Tolerance used when comparing scales to decide whether a zoom is a no-op.
pub const SCALE_EPSILON: f64 = 1e-9;
