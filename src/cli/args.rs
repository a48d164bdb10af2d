//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Render images as mosaics of colored characters
#[derive(Parser, Debug)]
#[command(name = "ascii-mosaic")]
#[command(version, about = "Render images as mosaics of colored characters", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image file into a glyph mosaic
    Convert(ConvertArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Source image (any format the image crate can decode)
    pub input: PathBuf,

    /// Destination image; format is taken from the extension
    pub output: PathBuf,

    /// Block side length in pixels
    #[arg(long, short)]
    pub block_size: Option<u32>,

    /// Rows per parallel strip
    #[arg(long, short)]
    pub grain: Option<u32>,

    /// Worker threads (0 = one per core)
    #[arg(long, short)]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
