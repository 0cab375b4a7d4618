use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoomboxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unsupported source scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No image sources given")]
    NoSources,

    #[error("All {tried} image sources failed to load")]
    SourcesExhausted { tried: usize },

    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),

    #[error("Annotation parse error: {0}")]
    Annotations(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ZoomboxError>;
