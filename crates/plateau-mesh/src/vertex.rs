//! Interleaved terrain vertex, laid out for direct GPU upload.

use glam::{Vec2, Vec3};

/// A single terrain vertex (32 bytes).
///
/// Layout:
///   - `[0..12]`  position `[f32; 3]`
///   - `[12..24]` normal `[f32; 3]`
///   - `[24..32]` uv `[f32; 2]`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    /// World-space position, terrain centred on the origin.
    pub position: [f32; 3],
    /// Surface normal.
    pub normal: [f32; 3],
    /// Texture coordinates over the unit square.
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 32]);

impl TerrainVertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    pub fn position_vec3(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}
