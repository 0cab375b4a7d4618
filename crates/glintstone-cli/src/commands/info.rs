use anyhow::Result;
use clap::Args;
use glintstone_core::minimap::MinimapLayout;
use glintstone_core::transform::FitBounds;
use glintstone_core::ZoomboxConfig;

use super::{load_with_spinner, parse_viewport, SourceArgs};
use crate::summary::print_image_summary;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Viewport size used for the fit computation
    #[arg(long, default_value = "800x600")]
    pub viewport: String,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let viewport = parse_viewport(&args.viewport)?;
    let loaded = load_with_spinner(&args.sources)?;
    let info = loaded.info();

    let bounds = FitBounds::compute(viewport, info.width, info.height);
    print_image_summary(&info, (viewport.width, viewport.height), bounds);

    let config = ZoomboxConfig::default();
    if let Some(b) = bounds {
        let (min, max) = b.scale_range(&config);
        println!("Scale range: {min:.4} .. {max:.4}");
    }
    let layout = MinimapLayout::fit(
        info.width,
        info.height,
        config.minimap_max_width,
        config.minimap_max_height,
    );
    println!("Minimap:     {}x{}", layout.width, layout.height);

    Ok(())
}
