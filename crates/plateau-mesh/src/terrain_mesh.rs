//! Per-patch quads and the batched terrain mesh handed to a renderer.

use std::ops::Range;

use plateau_terrain::{MaterialTag, Patch, QUAD_INDICES, Terrain};

use crate::vertex::TerrainVertex;

/// A single patch as an indexed quad with its texture selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatchMesh {
    /// Four vertices in patch order.
    pub vertices: [TerrainVertex; 4],
    /// Two triangles over `vertices`.
    pub indices: [u16; 6],
    /// Texture selection for the quad.
    pub material: MaterialTag,
}

impl PatchMesh {
    /// Pack a patch's positions, normals and uvs into GPU vertices.
    pub fn from_patch(patch: &Patch) -> Self {
        let positions = patch.positions();
        let normals = patch.normals();
        let uvs = patch.uvs();
        Self {
            vertices: std::array::from_fn(|i| TerrainVertex::new(positions[i], normals[i], uvs[i])),
            indices: patch.indices(),
            material: patch.material(),
        }
    }
}

/// A contiguous run of indices that all use one material's texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialBatch {
    pub material: MaterialTag,
    /// Range into [`TerrainMesh::indices`].
    pub index_range: Range<u32>,
}

/// All patches of a terrain in one vertex/index buffer pair.
///
/// Vertices stay in patch order (patch `i` owns vertices `4i..4i + 4`), while
/// indices are grouped by material so one draw call per [`MaterialBatch`]
/// covers every patch sharing a texture.
#[derive(Clone, Debug, Default)]
pub struct TerrainMesh {
    /// Vertex buffer.
    pub vertices: Vec<TerrainVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
    /// One entry per material that occurs, in [`MaterialTag::ALL`] order.
    pub batches: Vec<MaterialBatch>,
}

impl TerrainMesh {
    /// Build the batched mesh for `terrain`.
    pub fn build(terrain: &Terrain) -> Self {
        let patches = terrain.patches();
        let mut mesh = Self {
            vertices: Vec::with_capacity(patches.len() * 4),
            indices: Vec::with_capacity(patches.len() * QUAD_INDICES.len()),
            batches: Vec::new(),
        };

        for patch in patches.iter() {
            mesh.vertices
                .extend_from_slice(&PatchMesh::from_patch(patch).vertices);
        }

        for material in MaterialTag::ALL {
            let start = mesh.indices.len() as u32;
            for (i, patch) in patches.iter().enumerate() {
                if patch.material() != material {
                    continue;
                }
                let base = (i * 4) as u32;
                mesh.indices
                    .extend(QUAD_INDICES.iter().map(|&idx| base + u32::from(idx)));
            }
            let end = mesh.indices.len() as u32;
            if end > start {
                mesh.batches.push(MaterialBatch {
                    material,
                    index_range: start..end,
                });
            }
        }

        mesh
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Vertex buffer as raw bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
