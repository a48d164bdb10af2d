//! Subcommand handlers for convert and config actions.

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::args::{ConfigAction, ConvertArgs};
use crate::ascii::{ConversionSummary, ConvertError, ConvertOptions, Converter};
use crate::config::{default_path, Config, ConfigError, DEFAULT_CONFIG_TOML};

/// Errors surfaced by the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Failed to read image '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("Failed to write config file '{}': {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render config: {0}")]
    ConfigRender(#[from] toml::ser::Error),
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub options: ConvertOptions,
    pub threads: usize,
}

/// Load the config file. An explicitly named file must exist; the default
/// location falls back to built-in defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load_from_explicit(path),
        None => Config::load(None),
    }
}

/// Merge settings: CLI args > config file > built-in defaults.
pub fn resolve_settings(args: &ConvertArgs, cfg: &Config) -> Result<Settings, ConvertError> {
    let block_size = args.block_size.unwrap_or(cfg.mosaic.block_size);
    let grain = args.grain.unwrap_or(cfg.mosaic.grain);
    let threads = args.threads.unwrap_or(cfg.runtime.threads);

    Ok(Settings {
        options: ConvertOptions::new(block_size, grain)?,
        threads,
    })
}

/// Decode `args.input`, convert it and encode the mosaic to `args.output`.
pub fn run_convert(args: &ConvertArgs, cfg: &Config) -> Result<ConversionSummary, CliError> {
    let settings = resolve_settings(args, cfg)?;

    let source = image::open(&args.input)
        .map_err(|source| CliError::Decode {
            path: args.input.clone(),
            source,
        })?
        .into_rgb8();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads)
        .build()?;
    let converter = Converter::new(settings.options);

    let started = Instant::now();
    let (canvas, summary) = pool.install(|| converter.convert_with_summary(&source))?;
    log::info!(
        "Converted {} ({}x{}) in {:?}: {} glyphs, {} strips, {} threads",
        args.input.display(),
        source.width(),
        source.height(),
        started.elapsed(),
        summary.glyphs,
        summary.strips,
        pool.current_num_threads()
    );

    canvas.save(&args.output).map_err(|source| CliError::Encode {
        path: args.output.clone(),
        source,
    })?;
    log::info!("Wrote {}", args.output.display());

    Ok(summary)
}

/// Write the commented default config to `path`, refusing to overwrite.
pub fn init_config(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::ConfigExists(path.to_path_buf()));
    }

    let write_err = |source| CliError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG_TOML).map_err(write_err)?;
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: &ConfigAction, config_path: Option<&Path>) -> Result<(), CliError> {
    let path = config_path.map(Path::to_path_buf).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let cfg = load_config(config_path)?;
            println!("Current configuration:");
            println!();
            print!("{}", toml::to_string_pretty(&cfg)?);
            println!();
            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
        }
        ConfigAction::Init => {
            init_config(&path)?;
            println!("Created config file: {}", path.display());
        }
    }
    Ok(())
}
