//! The binary entry point for the Plateau terrain generator.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use plateau_config::{CliArgs, Config, ConfigOrigin, default_config_dir};
use plateau_mesh::TerrainMesh;
use plateau_terrain::debug_viz::export_debug_images;
use plateau_terrain::{SeededSource, Terrain, TerrainError, TerrainGenerator, TerrainStore};
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let (mut config, origin) = match Config::load_or_create(&config_dir) {
        Ok((config, origin)) => (config, Ok(origin)),
        Err(e) => (Config::default(), Err(e)),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    plateau_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    // Logged only now so the records reach the subscriber.
    match origin {
        Ok(ConfigOrigin::Loaded(path)) => info!("loaded config from {}", path.display()),
        Ok(ConfigOrigin::Created(path)) => info!("created default config at {}", path.display()),
        Err(e) => warn!("{e}, using defaults"),
    }

    if let Err(e) = run(&config, args.regenerate) {
        error!("terrain generation failed: {e}");
        std::process::exit(1);
    }
}

/// Generate the configured terrain, regenerate `regenerations` more times
/// through a [`TerrainStore`], and export the final terrain if enabled.
fn run(config: &Config, regenerations: u32) -> Result<Arc<Terrain>, TerrainError> {
    let generator = TerrainGenerator::new(config.terrain.edge_length)?;
    let seed = config
        .terrain
        .seed
        .unwrap_or_else(|| SeededSource::from_entropy().seed());

    let store = TerrainStore::new(generator, generator.generate_seeded(seed));
    log_summary(&store.current());

    for i in 1..=u64::from(regenerations) {
        store.regenerate_seeded(seed.wrapping_add(i));
        log_summary(&store.current());
    }

    let terrain = store.current();
    if config.export.enabled {
        export_debug_images(&terrain, &config.export.directory)?;
    }
    Ok(terrain)
}

fn log_summary(terrain: &Terrain) {
    let mesh = TerrainMesh::build(terrain);
    info!(
        edge_length = terrain.edge_length(),
        seed = terrain.seed(),
        patches = terrain.patches().len(),
        vertex_bytes = mesh.vertex_bytes().len(),
        index_bytes = mesh.index_bytes().len(),
        max_height = terrain.grid().max_height(),
        "terrain ready"
    );
    for batch in &mesh.batches {
        info!(
            material = %batch.material,
            quads = batch.index_range.len() / 6,
            "material batch"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(edge_length: u32, seed: u64) -> Config {
        let mut config = Config::default();
        config.terrain.edge_length = edge_length;
        config.terrain.seed = Some(seed);
        config
    }

    #[test]
    fn test_run_uses_configured_seed() {
        let terrain = run(&config_with(16, 3), 0).unwrap();
        assert_eq!(terrain.seed(), Some(3));
        assert_eq!(terrain.patches().len(), 256);
    }

    #[test]
    fn test_run_regenerates_with_advancing_seed() {
        let terrain = run(&config_with(8, 10), 2).unwrap();
        assert_eq!(terrain.seed(), Some(12));
        assert_eq!(terrain.patches().len(), 64);
    }

    #[test]
    fn test_run_rejects_invalid_edge() {
        let result = run(&config_with(48, 0), 0);
        assert!(matches!(
            result,
            Err(TerrainError::EdgeLengthNotPowerOfTwo(48))
        ));
    }

    #[test]
    fn test_run_exports_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with(8, 1);
        config.export.enabled = true;
        config.export.directory = dir.path().join("out");
        run(&config, 0).unwrap();
        assert!(dir.path().join("out").join("heightmap.png").exists());
        assert!(dir.path().join("out").join("materials.png").exists());
    }

    #[test]
    fn test_run_without_seed_draws_one() {
        let mut config = Config::default();
        config.terrain.edge_length = 4;
        let terrain = run(&config, 0).unwrap();
        assert!(terrain.seed().is_some());
    }
}
