pub mod config;
pub mod info;
pub mod minimap;
pub mod replay;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use glintstone_core::loader::{load_first, ChainFetcher};
use glintstone_core::{ImageSources, LoadedImage, Viewport};
use indicatif::{ProgressBar, ProgressStyle};

/// Source chain options shared by every command that loads an image.
#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Local cache path (tried first)
    #[arg(long)]
    pub local: Option<String>,

    /// Primary photo URL or path
    #[arg(long)]
    pub primary: Option<String>,

    /// Secondary (line art) URL or path
    #[arg(long)]
    pub secondary: Option<String>,

    /// Directory relative local paths are resolved against
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

impl SourceArgs {
    pub fn sources(&self) -> ImageSources {
        ImageSources {
            local: self.local.clone(),
            primary: self.primary.clone(),
            secondary: self.secondary.clone(),
        }
    }
}

/// Walk the source chain with a spinner.
pub fn load_with_spinner(args: &SourceArgs) -> Result<LoadedImage> {
    let sources = args.sources();
    let fetcher = ChainFetcher::with_cache_dir(args.cache_dir.clone());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!(
        "Loading image ({} candidate sources)",
        sources.candidates().len()
    ));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = load_first(&sources, &fetcher);
    spinner.finish_and_clear();
    result.context("No image source could be loaded")
}

/// Parse a `WIDTHxHEIGHT` pair such as `800x600`.
pub fn parse_size(text: &str) -> Result<(f64, f64)> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .with_context(|| format!("Expected WIDTHxHEIGHT, got '{text}'"))?;
    let w: f64 = w.trim().parse().with_context(|| format!("Bad width in '{text}'"))?;
    let h: f64 = h.trim().parse().with_context(|| format!("Bad height in '{text}'"))?;
    if !(w > 0.0 && h > 0.0) {
        bail!("Size must be positive, got '{text}'");
    }
    Ok((w, h))
}

pub fn parse_viewport(text: &str) -> Result<Viewport> {
    let (w, h) = parse_size(text)?;
    Ok(Viewport::new(w, h))
}
