//! Diamond-square (midpoint displacement) height synthesis.
//!
//! Each square region first gets its centre (diamond step), then its four edge
//! midpoints (square step), and is then split into four quadrants. Displacement
//! is scaled by the region size, so coarse levels move further than fine ones.
//! Samples on the outer edge of the grid are pinned to sea level (0).
//!
//! Regions are processed from an explicit LIFO worklist in the same
//! depth-first order a recursive formulation would use, so the sequence of
//! random draws (and therefore the terrain for a given seed) does not depend on
//! how the traversal is implemented, and stack use does not grow with `N`.

use tracing::debug;

use crate::error::TerrainError;
use crate::grid::{GridBuilder, HeightGrid, is_boundary, validate_edge_length};
use crate::random::RandomSource;

/// Divisor applied once to every interior sample after the fill.
pub const DAMPENING_FACTOR: f64 = std::f64::consts::SQRT_2;

/// Generate a dampened height grid of edge `edge_length`.
///
/// The edge length is validated before anything is allocated.
///
/// # Errors
///
/// Returns an edge-length [`TerrainError`] if `edge_length` is zero, not a
/// power of two, or above [`crate::MAX_EDGE_LENGTH`].
pub fn generate_height_grid<R: RandomSource + ?Sized>(
    edge_length: u32,
    source: &mut R,
) -> Result<HeightGrid, TerrainError> {
    validate_edge_length(edge_length)?;
    Ok(synthesize(edge_length, source))
}

/// Fill and dampen a grid whose edge length is already validated.
pub(crate) fn synthesize<R: RandomSource + ?Sized>(edge_length: u32, source: &mut R) -> HeightGrid {
    let mut synth = Synthesizer {
        grid: GridBuilder::new(edge_length),
        source,
        regions: 0,
        draws: 0,
    };
    synth.seed_corners();
    synth.fill();
    synth.grid.scale_interior(DAMPENING_FACTOR);

    debug!(
        edge_length,
        regions = synth.regions,
        draws = synth.draws,
        "diamond-square fill complete"
    );
    synth.grid.finish()
}

/// A square sub-region with corners `min` and `max` (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Region {
    min: (u32, u32),
    max: (u32, u32),
}

impl Region {
    fn size(&self) -> u32 {
        self.max.0 - self.min.0
    }

    fn midpoint(&self) -> (u32, u32) {
        (
            self.min.0 + (self.max.0 - self.min.0) / 2,
            self.min.1 + (self.max.1 - self.min.1) / 2,
        )
    }

    /// Quadrants in visiting order: top-left, top-right, bottom-left, bottom-right.
    fn quadrants(&self, mid: (u32, u32)) -> [Region; 4] {
        let (min, max) = (self.min, self.max);
        [
            Region { min, max: mid },
            Region {
                min: (mid.0, min.1),
                max: (max.0, mid.1),
            },
            Region {
                min: (min.0, mid.1),
                max: (mid.0, max.1),
            },
            Region { min: mid, max },
        ]
    }
}

struct Synthesizer<'a, R: RandomSource + ?Sized> {
    grid: GridBuilder,
    source: &'a mut R,
    regions: usize,
    draws: usize,
}

impl<R: RandomSource + ?Sized> Synthesizer<'_, R> {
    fn seed_corners(&mut self) {
        let n = self.grid.edge_length();
        for (x, y) in [(0, 0), (0, n), (n, n), (n, 0)] {
            self.grid.set(x, y, 0.0);
        }
    }

    fn fill(&mut self) {
        let n = self.grid.edge_length();
        if n < 2 {
            // A single cell has nothing between its seeded corners.
            return;
        }

        let mut pending = vec![Region {
            min: (0, 0),
            max: (n, n),
        }];
        while let Some(region) = pending.pop() {
            self.regions += 1;
            let mid = self.diamond(region);
            let half = mid.0 - region.min.0;
            self.square(region, mid, half);

            if half > 1 {
                // Reversed so the top-left quadrant is popped first.
                pending.extend(region.quadrants(mid).into_iter().rev());
            }
        }
    }

    /// Set the centre of `region` and return its coordinates.
    fn diamond(&mut self, region: Region) -> (u32, u32) {
        let n = self.grid.edge_length();
        let dist = region.size();
        let mid = region.midpoint();
        let (min, max) = (region.min, region.max);

        let avg = (self.grid.get(min.0, min.1)
            + self.grid.get(min.0, max.1)
            + self.grid.get(max.0, min.1)
            + self.grid.get(max.0, max.1))
            / 4.0;

        let height = if mid.0 == 0 || mid.0 == n {
            0.0
        } else {
            self.displace(avg, dist)
        };
        self.grid.set(mid.0, mid.1, height);
        mid
    }

    /// Set the four edge midpoints of `region`: top, left, right, bottom.
    fn square(&mut self, region: Region, mid: (u32, u32), half: u32) {
        let (min, max) = (region.min, region.max);
        let edges = [
            ((mid.0, min.1), [(min.0, min.1), (max.0, min.1), mid]),
            ((min.0, mid.1), [(min.0, min.1), mid, (min.0, max.1)]),
            ((max.0, mid.1), [(max.0, min.1), mid, (max.0, max.1)]),
            ((mid.0, max.1), [mid, (min.0, max.1), (max.0, max.1)]),
        ];

        let n = self.grid.edge_length();
        for (target, corners) in edges {
            let height = if is_boundary(n, target.0, target.1) {
                0.0
            } else {
                let avg = corners
                    .iter()
                    .map(|&(x, y)| self.grid.get(x, y))
                    .sum::<f64>()
                    / 3.0;
                self.displace(avg, half)
            };
            self.grid.set(target.0, target.1, height);
        }
    }

    /// `avg` plus uniform noise in `[-dist/2, dist/2)`, rounded and floored at 0.
    fn displace(&mut self, avg: f64, dist: u32) -> f64 {
        let dist = f64::from(dist);
        self.draws += 1;
        let offset = self.source.next_unit() * dist - dist / 2.0;
        let rounded = (avg + offset).round();
        if rounded > 0.0 { rounded } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ConstantSource, ScriptedSource, SeededSource};

    fn boundary_is_flat(grid: &HeightGrid) -> bool {
        grid.iter()
            .filter(|&(x, y, _)| grid.is_boundary(x, y))
            .all(|(_, _, h)| h == 0.0)
    }

    #[test]
    fn test_rejects_bad_edge_lengths() {
        let mut source = ConstantSource::new(0.5);
        assert!(matches!(
            generate_height_grid(0, &mut source),
            Err(TerrainError::EdgeLengthZero)
        ));
        assert!(matches!(
            generate_height_grid(12, &mut source),
            Err(TerrainError::EdgeLengthNotPowerOfTwo(12))
        ));
    }

    #[test]
    fn test_edge_two_with_midpoint_noise_is_flat() {
        let mut source = ScriptedSource::new(vec![0.5]);
        let grid = generate_height_grid(2, &mut source).unwrap();
        assert!(grid.heights().iter().all(|&h| h == 0.0));
        // Only the centre is interior, so exactly one value is drawn.
        assert_eq!(source.draws(), 1);
    }

    #[test]
    fn test_edge_one_is_just_the_corners() {
        let mut source = ScriptedSource::new(vec![0.9]);
        let grid = generate_height_grid(1, &mut source).unwrap();
        assert_eq!(grid.heights(), &[0.0; 4]);
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_edge_two_centre_displacement() {
        // dist = 2: offset = 0.9 * 2 - 1 = 0.8, rounds to 1, dampened by sqrt(2).
        let mut source = ConstantSource::new(0.9);
        let grid = generate_height_grid(2, &mut source).unwrap();
        assert_eq!(grid.get(1, 1), 1.0 / DAMPENING_FACTOR);
        assert!(boundary_is_flat(&grid));
    }

    #[test]
    fn test_negative_displacement_clamps_to_zero() {
        let mut source = ConstantSource::new(0.0);
        let grid = generate_height_grid(16, &mut source).unwrap();
        assert!(grid.heights().iter().all(|&h| h == 0.0));
        assert!(grid.heights().iter().all(|h| h.is_sign_positive()));
    }

    #[test]
    fn test_edge_four_draw_order() {
        // Root centre: 0.99 * 4 - 2 = 1.96 -> 2.
        // Root square step: every edge midpoint is on the boundary.
        // Top-left quadrant centre (1,1): avg 0.5 + (0.99 * 2 - 1) = 1.48 -> 1.
        let mut source = ConstantSource::new(0.99);
        let grid = generate_height_grid(4, &mut source).unwrap();
        assert_eq!(grid.get(2, 2), 2.0 / DAMPENING_FACTOR);
        assert_eq!(grid.get(1, 1), 1.0 / DAMPENING_FACTOR);
        assert!(boundary_is_flat(&grid));
    }

    #[test]
    fn test_edge_four_reference_grid() {
        // Undampened heights, rows are y, columns are x. Any other quadrant
        // order, or keeping the first write of a shared edge midpoint,
        // produces a different grid from this script.
        const EXPECTED: [[f64; 5]; 5] = [
            [0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 1.0, 0.0],
            [0.0, 1.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.0],
        ];
        let mut source = ScriptedSource::new(vec![
            0.99, 0.01, 0.99, 0.99, 0.53, 0.99, 0.01, 0.13, 0.99, 0.01, 0.05, 0.01, 0.27,
        ]);
        let grid = generate_height_grid(4, &mut source).unwrap();

        assert_eq!(source.draws(), 13);
        for (x, y, h) in grid.iter() {
            let raw = EXPECTED[y as usize][x as usize];
            let expected = if grid.is_boundary(x, y) {
                raw
            } else {
                raw / DAMPENING_FACTOR
            };
            assert_eq!(h, expected, "sample ({x}, {y})");
        }
    }

    #[test]
    fn test_boundary_flat_for_all_sizes() {
        for shift in 1..=7 {
            let n = 1u32 << shift;
            let mut source = SeededSource::from_seed(u64::from(n));
            let grid = generate_height_grid(n, &mut source).unwrap();
            assert!(boundary_is_flat(&grid), "boundary not flat for N={n}");
            assert!(grid.heights().iter().all(|&h| h >= 0.0));
        }
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let a = generate_height_grid(64, &mut SeededSource::from_seed(99)).unwrap();
        let b = generate_height_grid(64, &mut SeededSource::from_seed(99)).unwrap();
        let bits_a: Vec<u64> = a.heights().iter().map(|h| h.to_bits()).collect();
        let bits_b: Vec<u64> = b.heights().iter().map(|h| h.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_high_noise_produces_relief() {
        let mut source = ConstantSource::new(0.99);
        let grid = generate_height_grid(32, &mut source).unwrap();
        assert!(grid.max_height() > 0.0);
    }

    #[test]
    fn test_quadrant_order() {
        let region = Region {
            min: (0, 0),
            max: (4, 4),
        };
        let quads = region.quadrants(region.midpoint());
        assert_eq!(quads[0].min, (0, 0));
        assert_eq!(quads[1].min, (2, 0));
        assert_eq!(quads[2].min, (0, 2));
        assert_eq!(quads[3].max, (4, 4));
        assert!(quads.iter().all(|q| q.size() == 2));
    }
}
