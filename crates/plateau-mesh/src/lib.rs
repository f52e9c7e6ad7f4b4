//! GPU-ready mesh data for terrain patches: vertex format, per-patch quads,
//! and a batched terrain mesh grouped by material.

pub mod terrain_mesh;
pub mod vertex;
pub mod vertex_format;

pub use terrain_mesh::{MaterialBatch, PatchMesh, TerrainMesh};
pub use vertex::TerrainVertex;
pub use vertex_format::{
    TERRAIN_VERTEX_ATTRIBUTES, TERRAIN_VERTEX_LAYOUT, terrain_vertex_buffer_layout,
};
