use std::io::Read;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, ZoomboxError};

/// Prioritized image locations for one tablet photograph.
///
/// Tried in order local cache, primary (photo), secondary (line art).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSources {
    pub local: Option<String>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl ImageSources {
    /// Ordered candidate list, skipping missing and blank entries.
    pub fn candidates(&self) -> Vec<String> {
        [&self.local, &self.primary, &self.secondary]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Retrieves the raw bytes behind an image location.
pub trait SourceFetcher: Send + Sync {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Reads plain paths and `file://` URLs, resolving relative paths against
/// an optional cache directory.
#[derive(Clone, Debug, Default)]
pub struct FsFetcher {
    pub base_dir: Option<PathBuf>,
}

impl FsFetcher {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let raw = location.strip_prefix("file://").unwrap_or(location);
        let path = Path::new(raw);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl SourceFetcher for FsFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = self.resolve(location);
        debug!(path = %path.display(), "Reading image from disk");
        Ok(std::fs::read(path)?)
    }
}

/// Fetches `http://` and `https://` URLs.
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher;

impl SourceFetcher for HttpFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        debug!(url = location, "Fetching remote image");
        let response = ureq::get(location)
            .call()
            .map_err(|e| ZoomboxError::Http(format!("{location}: {e}")))?;
        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Dispatches on the location's scheme: HTTP(S) goes to the network,
/// `file://` and bare paths to the filesystem.
#[derive(Clone, Debug, Default)]
pub struct ChainFetcher {
    pub fs: FsFetcher,
    pub http: HttpFetcher,
}

impl ChainFetcher {
    pub fn with_cache_dir(base_dir: Option<PathBuf>) -> Self {
        Self {
            fs: FsFetcher::new(base_dir),
            http: HttpFetcher,
        }
    }
}

impl SourceFetcher for ChainFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return self.http.fetch(location);
        }
        if location.starts_with("file://") || !location.contains("://") {
            return self.fs.fetch(location);
        }
        let scheme = location.split("://").next().unwrap_or_default();
        Err(ZoomboxError::UnsupportedScheme(scheme.to_string()))
    }
}

/// Natural size and origin of a successfully loaded image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoadedImageInfo {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// A decoded image and the source it came from.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub image: DynamicImage,
}

impl LoadedImage {
    pub fn info(&self) -> LoadedImageInfo {
        LoadedImageInfo {
            source: self.source.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Fetch and decode one location.
pub fn load_source(fetcher: &dyn SourceFetcher, location: &str) -> Result<LoadedImage> {
    let bytes = fetcher.fetch(location)?;
    let image = image::load_from_memory(&bytes)?;
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(ZoomboxError::InvalidDimensions { width, height });
    }
    Ok(LoadedImage {
        source: location.to_string(),
        width,
        height,
        image,
    })
}

/// Walk the source chain and return the first image that loads.
///
/// Later sources are never tried once one succeeds, and failed sources are
/// never revisited.
pub fn load_first(sources: &ImageSources, fetcher: &dyn SourceFetcher) -> Result<LoadedImage> {
    let candidates = sources.candidates();
    if candidates.is_empty() {
        return Err(ZoomboxError::NoSources);
    }

    for (index, location) in candidates.iter().enumerate() {
        match load_source(fetcher, location) {
            Ok(loaded) => {
                info!(
                    source = %loaded.source,
                    width = loaded.width,
                    height = loaded.height,
                    attempt = index + 1,
                    "Image loaded"
                );
                return Ok(loaded);
            }
            Err(e) => warn!(source = %location, error = %e, "Image source failed"),
        }
    }

    Err(ZoomboxError::SourcesExhausted {
        tried: candidates.len(),
    })
}
