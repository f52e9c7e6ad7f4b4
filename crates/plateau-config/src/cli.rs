//! Command-line argument parsing for the Plateau generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Plateau command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "plateau", about = "Diamond-square terrain patch generator")]
pub struct CliArgs {
    /// Grid edge length in cells (power of two).
    #[arg(long)]
    pub edge_length: Option<u32>,

    /// Seed for the displacement source.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write heightmap and material PNGs into this directory.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Number of additional terrains to generate after the first.
    #[arg(long, default_value_t = 0)]
    pub regenerate: u32,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(edge) = args.edge_length {
            self.terrain.edge_length = edge;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = Some(seed);
        }
        if let Some(ref dir) = args.export_dir {
            self.export.enabled = true;
            self.export.directory = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
