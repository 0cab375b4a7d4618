use std::path::PathBuf;

use glintstone_core::ImageSources;

/// Editable fields of the "Open Sources" window.
#[derive(Default)]
pub struct SourcesState {
    pub open: bool,
    pub local: String,
    pub primary: String,
    pub secondary: String,
    pub cache_dir: String,
}

impl SourcesState {
    pub fn sources(&self) -> ImageSources {
        let field = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_string());
        ImageSources {
            local: field(&self.local),
            primary: field(&self.primary),
            secondary: field(&self.secondary),
        }
    }

    pub fn cache_dir(&self) -> Option<PathBuf> {
        let dir = self.cache_dir.trim();
        (!dir.is_empty()).then(|| PathBuf::from(dir))
    }
}
