//! Square height grid storage.
//!
//! [`GridBuilder`] is the write side used while synthesis runs; every sample
//! starts unwritten and reading one before it is written is an algorithm bug.
//! [`HeightGrid`] is the finished, immutable result.

use crate::error::TerrainError;

/// Largest accepted edge length.
///
/// The grid costs 8 bytes per sample once built, but every one of the `N^2`
/// cells also becomes a [`crate::Patch`], which dominates memory at this size.
pub const MAX_EDGE_LENGTH: u32 = 4096;

/// Check that `edge_length` is a positive power of two within [`MAX_EDGE_LENGTH`].
///
/// # Errors
///
/// Returns the matching [`TerrainError`] edge-length variant.
pub fn validate_edge_length(edge_length: u32) -> Result<(), TerrainError> {
    if edge_length == 0 {
        return Err(TerrainError::EdgeLengthZero);
    }
    if !edge_length.is_power_of_two() {
        return Err(TerrainError::EdgeLengthNotPowerOfTwo(edge_length));
    }
    if edge_length > MAX_EDGE_LENGTH {
        return Err(TerrainError::EdgeLengthTooLarge {
            length: edge_length,
            max: MAX_EDGE_LENGTH,
        });
    }
    Ok(())
}

/// Row-major index of sample `(x, y)` in a grid with `side` samples per row.
#[inline]
fn sample_index(side: usize, x: u32, y: u32) -> usize {
    y as usize * side + x as usize
}

/// Mutable grid used during synthesis.
///
/// Heights live in the same flat `f64` buffer the finished grid uses; a
/// parallel flag per sample records whether it has been written.
pub(crate) struct GridBuilder {
    edge_length: u32,
    heights: Vec<f64>,
    written: Vec<bool>,
}

impl GridBuilder {
    /// Allocate an unwritten grid. The caller validates `edge_length` first.
    pub(crate) fn new(edge_length: u32) -> Self {
        let side = edge_length as usize + 1;
        Self {
            edge_length,
            heights: vec![0.0; side * side],
            written: vec![false; side * side],
        }
    }

    pub(crate) fn edge_length(&self) -> u32 {
        self.edge_length
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, height: f64) {
        let idx = self.index(x, y);
        self.heights[idx] = height;
        self.written[idx] = true;
    }

    /// Read a sample that must already be written.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` has not been written yet.
    pub(crate) fn get(&self, x: u32, y: u32) -> f64 {
        let idx = self.index(x, y);
        if !self.written[idx] {
            panic!("height sample ({x}, {y}) read before it was written");
        }
        self.heights[idx]
    }

    /// Divide every interior sample by `divisor`. Boundary samples are untouched.
    pub(crate) fn scale_interior(&mut self, divisor: f64) {
        let n = self.edge_length;
        for y in 1..n {
            for x in 1..n {
                let h = self.get(x, y);
                self.set(x, y, h / divisor);
            }
        }
    }

    /// Freeze into a [`HeightGrid`].
    ///
    /// # Panics
    ///
    /// Panics if any sample was never written.
    pub(crate) fn finish(self) -> HeightGrid {
        let side = self.edge_length as usize + 1;
        if let Some(i) = self.written.iter().position(|&w| !w) {
            panic!(
                "height sample ({}, {}) was never written",
                i % side,
                i / side
            );
        }
        HeightGrid {
            edge_length: self.edge_length,
            heights: self.heights,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x <= self.edge_length && y <= self.edge_length,
            "sample ({x}, {y}) outside grid of edge {}",
            self.edge_length
        );
        sample_index(self.edge_length as usize + 1, x, y)
    }
}

/// A finished square height field with `(N + 1)^2` samples.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGrid {
    edge_length: u32,
    heights: Vec<f64>,
}

impl HeightGrid {
    /// Edge length `N` in cells.
    pub fn edge_length(&self) -> u32 {
        self.edge_length
    }

    /// Number of samples per row (`N + 1`).
    pub fn side(&self) -> usize {
        self.edge_length as usize + 1
    }

    /// Height at sample `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` exceeds the edge length.
    pub fn get(&self, x: u32, y: u32) -> f64 {
        assert!(
            x <= self.edge_length && y <= self.edge_length,
            "sample ({x}, {y}) outside grid of edge {}",
            self.edge_length
        );
        self.heights[sample_index(self.side(), x, y)]
    }

    /// Corner heights of unit cell `(x, y)` in quad order:
    /// `(x, y)`, `(x, y + 1)`, `(x + 1, y + 1)`, `(x + 1, y)`.
    pub fn cell_corners(&self, x: u32, y: u32) -> [f64; 4] {
        [
            self.get(x, y),
            self.get(x, y + 1),
            self.get(x + 1, y + 1),
            self.get(x + 1, y),
        ]
    }

    /// All samples in row-major order (`y` outer, `x` inner).
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Iterate `(x, y, height)` over every sample.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        let side = self.side();
        self.heights
            .iter()
            .enumerate()
            .map(move |(i, &h)| ((i % side) as u32, (i / side) as u32, h))
    }

    /// Highest sample in the grid.
    pub fn max_height(&self) -> f64 {
        self.heights.iter().copied().fold(0.0, f64::max)
    }

    /// Returns `true` if `(x, y)` lies on the outer edge of the grid.
    pub fn is_boundary(&self, x: u32, y: u32) -> bool {
        is_boundary(self.edge_length, x, y)
    }
}

/// Returns `true` if `(x, y)` lies on the outer edge of a grid of edge `n`.
#[inline]
pub(crate) fn is_boundary(n: u32, x: u32, y: u32) -> bool {
    x == 0 || y == 0 || x == n || y == n
}
