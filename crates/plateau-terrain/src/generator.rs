//! Terrain generation pipeline and snapshot store.
//!
//! [`TerrainGenerator`] runs synthesis, dampening, classification and emission
//! to completion and returns an immutable [`Terrain`]. [`TerrainStore`] holds
//! the terrain a renderer is currently reading and replaces it wholesale on
//! regeneration.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use tracing::{debug, info};

use crate::diamond_square::synthesize;
use crate::error::TerrainError;
use crate::grid::{HeightGrid, validate_edge_length};
use crate::material::{MaterialTag, classify};
use crate::patch::{Patch, emit_patches};
use crate::random::{RandomSource, SeededSource};

/// Validated generation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainGenerator {
    edge_length: u32,
}

impl TerrainGenerator {
    /// Create a generator for grids of edge `edge_length`.
    ///
    /// # Errors
    ///
    /// Returns an edge-length [`TerrainError`] if `edge_length` is zero, not a
    /// power of two, or too large. Nothing is allocated on failure.
    pub fn new(edge_length: u32) -> Result<Self, TerrainError> {
        validate_edge_length(edge_length)?;
        Ok(Self { edge_length })
    }

    /// Edge length `N` every generated terrain will have.
    pub fn edge_length(&self) -> u32 {
        self.edge_length
    }

    /// Generate a terrain from an arbitrary random source.
    pub fn generate<R: RandomSource + ?Sized>(&self, source: &mut R) -> Terrain {
        self.build(source, None)
    }

    /// Generate a terrain from a ChaCha8 source seeded with `seed`.
    pub fn generate_seeded(&self, seed: u64) -> Terrain {
        let mut source = SeededSource::from_seed(seed);
        self.build(&mut source, Some(seed))
    }

    fn build<R: RandomSource + ?Sized>(&self, source: &mut R, seed: Option<u64>) -> Terrain {
        let start = Instant::now();

        let grid = synthesize(self.edge_length, source);
        let patches: Arc<[Patch]> = emit_patches(&grid, classify).into();

        debug!(
            edge_length = self.edge_length,
            patches = patches.len(),
            max_height = grid.max_height(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "terrain generated"
        );

        Terrain {
            seed,
            grid: Arc::new(grid),
            patches,
        }
    }
}

/// An immutable generated terrain: the dampened grid and its patch list.
#[derive(Clone, Debug)]
pub struct Terrain {
    seed: Option<u64>,
    grid: Arc<HeightGrid>,
    patches: Arc<[Patch]>,
}

impl Terrain {
    /// Edge length `N` in cells; the terrain has `N * N` patches.
    pub fn edge_length(&self) -> u32 {
        self.grid.edge_length()
    }

    /// Seed used, if generated through [`TerrainGenerator::generate_seeded`].
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The dampened height grid the patches were classified from.
    pub fn grid(&self) -> &Arc<HeightGrid> {
        &self.grid
    }

    /// Patches in emission order (`x` outer, `y` inner).
    pub fn patches(&self) -> &Arc<[Patch]> {
        &self.patches
    }

    /// Count patches per material.
    pub fn material_histogram(&self) -> MaterialHistogram {
        let mut histogram = MaterialHistogram::default();
        for patch in self.patches.iter() {
            histogram.counts[patch.material().index()] += 1;
        }
        histogram
    }
}

/// Number of patches per [`MaterialTag`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaterialHistogram {
    counts: [usize; MaterialTag::ALL.len()],
}

impl MaterialHistogram {
    /// Number of patches tagged `tag`.
    pub fn count(&self, tag: MaterialTag) -> usize {
        self.counts[tag.index()]
    }

    /// Number of patches counted, equal to `N * N`.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(tag, count)` pairs in [`MaterialTag::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialTag, usize)> + '_ {
        MaterialTag::ALL.into_iter().zip(self.counts.iter().copied())
    }
}

/// Holds the current terrain and swaps in whole replacements.
///
/// Readers clone the `Arc<Terrain>` they were handed and keep a consistent
/// snapshot even while a regeneration is published.
pub struct TerrainStore {
    generator: TerrainGenerator,
    current: RwLock<Arc<Terrain>>,
    generation: AtomicU64,
}

impl TerrainStore {
    /// Create a store seeded with an initial terrain.
    pub fn new(generator: TerrainGenerator, initial: Terrain) -> Self {
        Self {
            generator,
            current: RwLock::new(Arc::new(initial)),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the terrain currently published.
    pub fn current(&self) -> Arc<Terrain> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// How many times the terrain has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Generate a new terrain from `source` and publish it, returning the previous one.
    ///
    /// The new terrain is fully built before the swap.
    pub fn regenerate<R: RandomSource + ?Sized>(&self, source: &mut R) -> Arc<Terrain> {
        let next = self.generator.generate(source);
        self.publish(next)
    }

    /// Regenerate with a ChaCha8 source seeded with `seed`.
    pub fn regenerate_seeded(&self, seed: u64) -> Arc<Terrain> {
        let next = self.generator.generate_seeded(seed);
        self.publish(next)
    }

    fn publish(&self, next: Terrain) -> Arc<Terrain> {
        let next = Arc::new(next);
        let previous = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *current, next)
        };
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(generation, "terrain replaced");
        previous
    }
}
