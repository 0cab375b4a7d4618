use crate::error::ZoomboxError;
use crate::geometry::ScreenRect;
use crate::loader::LoadedImageInfo;
use crate::overlay::Annotation;
use crate::state::ZoomChange;

/// Notifications from a Zoombox to its host.
///
/// All methods have default no-op implementations, so hosts implement only
/// what they care about. Panics raised here are not caught.
pub trait ZoomboxEvents {
    /// An image from the source chain finished loading.
    fn on_image_load(&mut self, _info: &LoadedImageInfo) {}

    /// Every source failed; the viewer is showing its placeholder.
    fn on_image_error(&mut self, _error: &ZoomboxError) {}

    /// Scale or pan changed.
    fn on_zoom_change(&mut self, _change: ZoomChange) {}

    /// An overlay box was clicked. `rect` is its current viewport rectangle.
    fn on_overlay_click(&mut self, _annotation: &Annotation, _rect: ScreenRect) {}

    /// The hovered overlay changed. `None` when hover left every box or the
    /// scale dropped below the hover threshold.
    fn on_overlay_hover(&mut self, _annotation: Option<&Annotation>) {}
}

/// Sink that ignores every notification.
pub struct NoEvents;
impl ZoomboxEvents for NoEvents {}

/// Owned copy of one notification.
#[derive(Clone, Debug, PartialEq)]
pub enum ZoomboxEvent {
    ImageLoaded(LoadedImageInfo),
    ImageError(String),
    ZoomChanged(ZoomChange),
    OverlayClicked { annotation: Annotation, rect: ScreenRect },
    OverlayHovered(Option<Annotation>),
}

impl std::fmt::Display for ZoomboxEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageLoaded(info) => {
                write!(f, "Loaded {} ({}x{})", info.source, info.width, info.height)
            }
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::ZoomChanged(z) => write!(
                f,
                "Zoom {:.0}% pan ({:.1}, {:.1})",
                z.scale * 100.0,
                z.pan_x,
                z.pan_y
            ),
            Self::OverlayClicked { annotation, .. } => {
                write!(f, "Clicked sign '{}' ({})", annotation.sign, annotation.surface)
            }
            Self::OverlayHovered(Some(a)) => write!(f, "Hover sign '{}'", a.sign),
            Self::OverlayHovered(None) => write!(f, "Hover cleared"),
        }
    }
}

/// Sink that records every notification in order.
#[derive(Debug, Default)]
pub struct RecordingEvents {
    pub events: Vec<ZoomboxEvent>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded events, leaving the recorder empty.
    pub fn drain(&mut self) -> Vec<ZoomboxEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn zoom_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ZoomboxEvent::ZoomChanged(_)))
            .count()
    }
}

impl ZoomboxEvents for RecordingEvents {
    fn on_image_load(&mut self, info: &LoadedImageInfo) {
        self.events.push(ZoomboxEvent::ImageLoaded(info.clone()));
    }

    fn on_image_error(&mut self, error: &ZoomboxError) {
        self.events.push(ZoomboxEvent::ImageError(error.to_string()));
    }

    fn on_zoom_change(&mut self, change: ZoomChange) {
        self.events.push(ZoomboxEvent::ZoomChanged(change));
    }

    fn on_overlay_click(&mut self, annotation: &Annotation, rect: ScreenRect) {
        self.events.push(ZoomboxEvent::OverlayClicked {
            annotation: annotation.clone(),
            rect,
        });
    }

    fn on_overlay_hover(&mut self, annotation: Option<&Annotation>) {
        self.events
            .push(ZoomboxEvent::OverlayHovered(annotation.cloned()));
    }
}
