use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use glintstone_core::minimap::{render_thumbnail, viewport_indicator, MinimapLayout};
use glintstone_core::{NoEvents, ViewRect, Zoombox, ZoomboxConfig};
use image::{Rgba, RgbaImage};

use super::{load_with_spinner, parse_size, parse_viewport, SourceArgs};

#[derive(Args)]
pub struct MinimapArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output PNG path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Maximum thumbnail size
    #[arg(long, default_value = "100x67")]
    pub max: String,

    /// Outline the initial view for this viewport size
    #[arg(long)]
    pub viewport: Option<String>,
}

pub fn run(args: &MinimapArgs) -> Result<()> {
    let (max_w, max_h) = parse_size(&args.max)?;
    let loaded = load_with_spinner(&args.sources)?;

    let layout = MinimapLayout::fit(loaded.width, loaded.height, max_w as u32, max_h as u32);
    let mut thumb = render_thumbnail(&loaded.image, &layout);

    if let Some(ref vp) = args.viewport {
        let viewport = parse_viewport(vp)?;
        let mut zoombox = Zoombox::new(ZoomboxConfig::default(), viewport);
        let ticket = zoombox.begin_load();
        zoombox.finish_load(ticket, Ok(loaded.info()), &mut NoEvents);
        let indicator = viewport_indicator(&zoombox.state(), viewport);
        draw_indicator(&mut thumb, &indicator);
    }

    thumb
        .save(&args.output)
        .with_context(|| format!("Failed to write minimap to {}", args.output.display()))?;
    println!(
        "Minimap {}x{} saved to {}",
        layout.width,
        layout.height,
        args.output.display()
    );
    Ok(())
}

/// Outline the visible region on the thumbnail.
fn draw_indicator(thumb: &mut RgbaImage, rect: &ViewRect) {
    let (w, h) = thumb.dimensions();
    if w == 0 || h == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let to_px = |pct: f64, extent: u32| ((pct / 100.0 * extent as f64).round() as u32).min(extent - 1);
    let x0 = to_px(rect.left, w);
    let y0 = to_px(rect.top, h);
    let x1 = to_px(rect.left + rect.width, w);
    let y1 = to_px(rect.top + rect.height, h);
    let color = Rgba([255, 64, 64, 255]);

    for x in x0..=x1 {
        thumb.put_pixel(x, y0, color);
        thumb.put_pixel(x, y1, color);
    }
    for y in y0..=y1 {
        thumb.put_pixel(x0, y, color);
        thumb.put_pixel(x1, y, color);
    }
}
