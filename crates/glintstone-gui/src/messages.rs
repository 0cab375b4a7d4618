use std::path::PathBuf;

use glintstone_core::{
    Annotation, ImageSources, LoadTicket, LoadedImageInfo, ZoomboxConfig, ZoomboxError,
};

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Walk the source chain, decode, and build display + minimap images.
    LoadImage {
        ticket: LoadTicket,
        sources: ImageSources,
        cache_dir: Option<PathBuf>,
        /// Largest texture side the GPU accepts; bigger images are downscaled
        /// for display only.
        max_texture_side: usize,
        minimap_max: [u32; 2],
    },

    /// Parse an annotations JSON file.
    LoadAnnotations { path: PathBuf },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    ImageLoaded {
        ticket: LoadTicket,
        info: LoadedImageInfo,
        display: egui::ColorImage,
        minimap: egui::ColorImage,
    },
    ImageFailed {
        ticket: LoadTicket,
        error: ZoomboxError,
    },
    AnnotationsLoaded {
        path: PathBuf,
        annotations: Vec<Annotation>,
    },
    /// A file dialog picked an image; the UI thread starts the load.
    ImagePicked {
        path: PathBuf,
    },
    ConfigImported {
        path: PathBuf,
        config: ZoomboxConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
