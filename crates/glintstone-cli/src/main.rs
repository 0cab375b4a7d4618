mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glintstone", about = "Tablet image zoom viewer tools")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk an image source chain and show the loaded image and fit bounds
    Info(commands::info::InfoArgs),
    /// Render the minimap thumbnail of an image to a PNG
    Minimap(commands::minimap::MinimapArgs),
    /// Replay a scripted input session against the viewer
    Replay(commands::replay::ReplayArgs),
    /// Print or save the default viewer config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Minimap(args) => commands::minimap::run(args),
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
