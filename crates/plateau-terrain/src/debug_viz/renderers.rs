//! Terrain debug visualization renderers: heightmap and material map.

use std::path::{Path, PathBuf};

use tracing::info;

use super::image::DebugImage;
use crate::error::TerrainError;
use crate::generator::Terrain;
use crate::grid::HeightGrid;
use crate::material::MaterialTag;

/// Render one pixel per grid sample, colored by height relative to the peak.
///
/// The image is `(N + 1) x (N + 1)` with sample `(x, y)` at pixel `(x, y)`.
pub fn render_heightmap_debug(grid: &HeightGrid) -> DebugImage {
    let side = grid.side() as u32;
    let mut image = DebugImage::new(side, side);
    let peak = grid.max_height();

    for (x, y, h) in grid.iter() {
        let normalized = if peak > 0.0 { h / peak } else { 0.0 };
        image.set_pixel(x, y, height_to_color(normalized));
    }

    image
}

/// Map a normalized height `[0, 1]` to an RGB color.
///
/// Sea level is blue; everything above ramps from green lowland through brown
/// to white at the peak.
pub fn height_to_color(normalized: f64) -> (u8, u8, u8) {
    let t = normalized.clamp(0.0, 1.0);
    if t == 0.0 {
        (30, 80, 200)
    } else if t < 0.5 {
        let s = t / 0.5;
        (
            (30.0 + s * 80.0) as u8,
            (160.0 - s * 40.0) as u8,
            (30.0 + s * 20.0) as u8,
        )
    } else if t < 0.8 {
        let s = (t - 0.5) / 0.3;
        (
            (110.0 + s * 40.0) as u8,
            (120.0 - s * 50.0) as u8,
            (50.0 + s * 20.0) as u8,
        )
    } else {
        let s = (t - 0.8) / 0.2;
        let base = 150.0 + s * 105.0;
        (base as u8, base as u8, base as u8)
    }
}

/// Flat RGB color for a material tag.
pub fn material_color(tag: MaterialTag) -> (u8, u8, u8) {
    match tag {
        MaterialTag::Water => (20, 50, 180),
        MaterialTag::Sand => (230, 210, 140),
        MaterialTag::Grass => (100, 180, 60),
        MaterialTag::Dirt => (120, 85, 50),
        MaterialTag::Stone => (130, 130, 130),
        MaterialTag::Snow => (240, 240, 250),
    }
}

/// Render one pixel per patch, colored by its material.
///
/// The image is `N x N` with cell `(x, y)` at pixel `(x, y)`.
pub fn render_material_debug(terrain: &Terrain) -> DebugImage {
    let n = terrain.edge_length();
    let mut image = DebugImage::new(n, n);
    for patch in terrain.patches().iter() {
        let cell = patch.cell();
        image.set_pixel(cell.x, cell.y, material_color(patch.material()));
    }
    image
}

/// Write `heightmap.png` and `materials.png` into `dir`, creating it if needed.
///
/// Returns the paths written.
pub fn export_debug_images(terrain: &Terrain, dir: &Path) -> Result<[PathBuf; 2], TerrainError> {
    std::fs::create_dir_all(dir)?;

    let heightmap_path = dir.join("heightmap.png");
    render_heightmap_debug(terrain.grid()).write_png(&heightmap_path)?;

    let materials_path = dir.join("materials.png");
    render_material_debug(terrain).write_png(&materials_path)?;

    info!(dir = %dir.display(), "exported terrain debug images");
    Ok([heightmap_path, materials_path])
}
