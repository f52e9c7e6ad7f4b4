//! Canonical `wgpu::VertexBufferLayout` for terrain patch rendering.
//!
//! ## Attribute Packing
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |
//! | 2        | 24     | Float32x2 | uv       |

use std::mem;

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::vertex::TerrainVertex;

/// Vertex attributes covering all 32 bytes of [`TerrainVertex`].
pub const TERRAIN_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 24,
        shader_location: 2,
    },
];

/// The vertex buffer layout for terrain patch pipelines.
pub const TERRAIN_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<TerrainVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &TERRAIN_VERTEX_ATTRIBUTES,
};

/// Return the terrain vertex buffer layout as an owned value.
pub fn terrain_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    TERRAIN_VERTEX_LAYOUT
}

const _: () = assert!(
    mem::size_of::<TerrainVertex>() == 32,
    "TerrainVertex size changed, update TERRAIN_VERTEX_LAYOUT"
);
const _: () =
    assert!(TERRAIN_VERTEX_ATTRIBUTES[1].offset == mem::offset_of!(TerrainVertex, normal) as u64);
const _: () =
    assert!(TERRAIN_VERTEX_ATTRIBUTES[2].offset == mem::offset_of!(TerrainVertex, uv) as u64);
