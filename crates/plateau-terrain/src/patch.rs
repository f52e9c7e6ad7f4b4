//! Quad patch emission: one textured quad per unit cell.

use glam::{UVec2, Vec2, Vec3};

use crate::grid::HeightGrid;
use crate::material::MaterialTag;

/// Normal shared by every patch vertex. Patches are lit as if flat.
pub const QUAD_NORMAL: Vec3 = Vec3::Y;

/// Texture coordinates for the four quad vertices.
pub const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Two triangles covering the quad, sharing the `0-2` diagonal.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// One unit cell of terrain: corner heights, material, and quad geometry.
///
/// Built once by [`emit_patches`] and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    cell: UVec2,
    corners: [f64; 4],
    material: MaterialTag,
    positions: [Vec3; 4],
}

impl Patch {
    fn new(grid: &HeightGrid, x: u32, y: u32, material: MaterialTag) -> Self {
        let corners = grid.cell_corners(x, y);
        let half = grid.edge_length() as f32 / 2.0;
        let offsets = [(0, 0), (0, 1), (1, 1), (1, 0)];

        let positions = std::array::from_fn(|i| {
            let (dx, dy) = offsets[i];
            Vec3::new(
                (x + dx) as f32 - 0.5 - half,
                corners[i] as f32,
                (y + dy) as f32 - 0.5 - half,
            )
        });

        Self {
            cell: UVec2::new(x, y),
            corners,
            material,
            positions,
        }
    }

    /// Grid coordinates of the cell's minimum corner.
    pub fn cell(&self) -> UVec2 {
        self.cell
    }

    /// Corner heights in vertex order.
    pub fn corners(&self) -> [f64; 4] {
        self.corners
    }

    /// Material the cell was classified as.
    pub fn material(&self) -> MaterialTag {
        self.material
    }

    /// Vertex positions: `(x, y)`, `(x, y + 1)`, `(x + 1, y + 1)`, `(x + 1, y)`.
    pub fn positions(&self) -> [Vec3; 4] {
        self.positions
    }

    /// Per-vertex normals. Patches are flat, so all four point up.
    pub fn normals(&self) -> [Vec3; 4] {
        [QUAD_NORMAL; 4]
    }

    /// Texture coordinates, one unit square per patch.
    pub fn uvs(&self) -> [Vec2; 4] {
        QUAD_UVS
    }

    /// Two triangles over the four vertices, sharing the `0-2` diagonal.
    pub fn indices(&self) -> [u16; 6] {
        QUAD_INDICES
    }

    /// Texture resource name for the renderer.
    pub fn texture_name(&self) -> &'static str {
        self.material.texture_name()
    }
}

/// Emit one patch per cell, `x` outer and `y` inner.
///
/// The returned index of cell `(x, y)` is `x * N + y`; renderers pair patches
/// with textures by this position.
pub fn emit_patches<F>(grid: &HeightGrid, classify: F) -> Vec<Patch>
where
    F: Fn([f64; 4]) -> MaterialTag,
{
    let n = grid.edge_length();
    let mut patches = Vec::with_capacity(n as usize * n as usize);
    for x in 0..n {
        for y in 0..n {
            let material = classify(grid.cell_corners(x, y));
            patches.push(Patch::new(grid, x, y, material));
        }
    }
    patches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diamond_square::generate_height_grid;
    use crate::material::classify;
    use crate::random::{ConstantSource, SeededSource};

    fn flat_grid(n: u32) -> HeightGrid {
        generate_height_grid(n, &mut ConstantSource::new(0.0)).unwrap()
    }

    #[test]
    fn test_patch_count_is_n_squared() {
        for n in [1, 2, 8, 32] {
            let grid = generate_height_grid(n, &mut SeededSource::from_seed(3)).unwrap();
            assert_eq!(emit_patches(&grid, classify).len(), (n * n) as usize);
        }
    }

    #[test]
    fn test_iteration_order_is_x_major() {
        let patches = emit_patches(&flat_grid(4), classify);
        assert_eq!(patches[0].cell(), UVec2::new(0, 0));
        assert_eq!(patches[1].cell(), UVec2::new(0, 1));
        assert_eq!(patches[4].cell(), UVec2::new(1, 0));
        assert_eq!(patches[15].cell(), UVec2::new(3, 3));
    }

    #[test]
    fn test_vertices_are_centered() {
        let patches = emit_patches(&flat_grid(2), classify);
        assert_eq!(
            patches[0].positions(),
            [
                Vec3::new(-1.5, 0.0, -1.5),
                Vec3::new(-1.5, 0.0, -0.5),
                Vec3::new(-0.5, 0.0, -0.5),
                Vec3::new(-0.5, 0.0, -1.5),
            ]
        );
        let last = patches.last().unwrap().positions();
        assert_eq!(last[2], Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn test_vertex_heights_follow_corners() {
        let grid = generate_height_grid(16, &mut SeededSource::from_seed(11)).unwrap();
        for patch in emit_patches(&grid, classify) {
            let corners = grid.cell_corners(patch.cell().x, patch.cell().y);
            assert_eq!(patch.corners(), corners);
            for (pos, h) in patch.positions().iter().zip(corners) {
                assert_eq!(pos.y, h as f32);
            }
        }
    }

    #[test]
    fn test_material_comes_from_classifier() {
        let patches = emit_patches(&flat_grid(4), |_| MaterialTag::Snow);
        assert!(patches.iter().all(|p| p.material() == MaterialTag::Snow));
        assert!(patches.iter().all(|p| p.texture_name() == "snow"));
    }

    #[test]
    fn test_fixed_quad_attributes() {
        let patch = &emit_patches(&flat_grid(2), classify)[0];
        assert_eq!(patch.normals(), [Vec3::Y; 4]);
        assert_eq!(patch.uvs()[2], Vec2::ONE);
        assert_eq!(patch.indices(), [0, 1, 2, 0, 2, 3]);
    }
}
