//! Command-line interface definitions and helpers.
//!
//! This module contains CLI argument parsing and subcommand handlers. It is
//! a thin shell around [`crate::ascii::Converter`]: file decoding, encoding
//! and configuration live here, not in the converter.

mod args;
mod commands;

pub use args::{Args, Command, ConfigAction, ConvertArgs};
pub use commands::{
    handle_config_action, init_config, load_config, resolve_settings, run_convert, CliError,
    Settings,
};
