#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use glintstone_core::error::{Result, ZoomboxError};
use glintstone_core::{
    LoadedImageInfo, NoEvents, SourceFetcher, Viewport, Zoombox, ZoomboxConfig,
};

/// Encode a solid-color RGB image as PNG bytes.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 180, 150]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

pub fn image_info(source: &str, width: u32, height: u32) -> LoadedImageInfo {
    LoadedImageInfo {
        source: source.to_string(),
        width,
        height,
    }
}

/// A Zoombox with default config that has "loaded" an image of the given
/// natural size into the given viewport.
pub fn loaded_zoombox(vw: f64, vh: f64, width: u32, height: u32) -> Zoombox {
    loaded_zoombox_with(ZoomboxConfig::default(), vw, vh, width, height)
}

pub fn loaded_zoombox_with(
    config: ZoomboxConfig,
    vw: f64,
    vh: f64,
    width: u32,
    height: u32,
) -> Zoombox {
    let mut zb = Zoombox::new(config, Viewport::new(vw, vh));
    let ticket = zb.begin_load();
    zb.finish_load(ticket, Ok(image_info("test.png", width, height)), &mut NoEvents);
    zb
}

/// In-memory fetcher that records every location it is asked for.
#[derive(Default)]
pub struct MapFetcher {
    pub files: HashMap<String, Vec<u8>>,
    pub requested: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn with(mut self, location: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(location.to_string(), bytes);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("lock").clone()
    }
}

impl SourceFetcher for MapFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        self.requested
            .lock()
            .expect("lock")
            .push(location.to_string());
        self.files.get(location).cloned().ok_or_else(|| {
            ZoomboxError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                location.to_string(),
            ))
        })
    }
}
