//! Procedural terrain generation: diamond-square height synthesis, per-cell
//! material classification, and quad patch emission for a renderer.

mod diamond_square;
mod error;
mod generator;
mod grid;
mod material;
mod patch;
mod random;

pub mod debug_viz;

pub use diamond_square::{DAMPENING_FACTOR, generate_height_grid};
pub use error::TerrainError;
pub use generator::{MaterialHistogram, Terrain, TerrainGenerator, TerrainStore};
pub use grid::{HeightGrid, MAX_EDGE_LENGTH, validate_edge_length};
pub use material::{MaterialTag, classify};
pub use patch::{Patch, QUAD_INDICES, QUAD_NORMAL, QUAD_UVS, emit_patches};
pub use random::{ConstantSource, RandomSource, ScriptedSource, SeededSource};
