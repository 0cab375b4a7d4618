pub mod config;
pub mod consts;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod loader;
pub mod minimap;
pub mod overlay;
pub mod state;
pub mod transform;
pub mod zoombox;

pub use config::ZoomboxConfig;
pub use error::{Result, ZoomboxError};
pub use events::{NoEvents, RecordingEvents, ZoomboxEvent, ZoomboxEvents};
pub use geometry::{Point, ScreenRect, Viewport, ViewRect};
pub use input::{InputEvent, Key};
pub use loader::{ImageSources, LoadedImage, LoadedImageInfo, SourceFetcher};
pub use overlay::Annotation;
pub use state::{Phase, ViewerState, ZoomChange};
pub use zoombox::{LoadOutcome, LoadTicket, Zoombox};
