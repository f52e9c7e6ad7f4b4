//! Configuration system for the Plateau terrain generator.
//!
//! Settings persist to disk as a RON file in which every field is optional,
//! and clap command-line flags override them per run.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, ConfigOrigin, DebugConfig, ExportConfig, TerrainConfig, default_config_dir,
};
pub use error::ConfigError;
