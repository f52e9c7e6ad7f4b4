//! Displacement sources for diamond-square synthesis.
//!
//! Generation only ever asks for uniform values in `[0, 1)`. Production code
//! uses [`SeededSource`]; tests inject [`ConstantSource`] or [`ScriptedSource`]
//! to pin down every draw.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A uniform random number source in `[0, 1)`.
pub trait RandomSource {
    /// Draw the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// ChaCha8-backed source, reproducible for a given seed on every platform.
#[derive(Clone, Debug)]
pub struct SeededSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Create a source from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a source from a seed drawn from the thread-local entropy RNG.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// The seed this source was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Returns the same value on every draw.
#[derive(Clone, Copy, Debug)]
pub struct ConstantSource(f64);

impl ConstantSource {
    /// Create a constant source.
    ///
    /// # Panics
    ///
    /// Panics if `value` is outside `[0, 1)`.
    pub fn new(value: f64) -> Self {
        assert!(
            (0.0..1.0).contains(&value),
            "constant source value {value} outside [0, 1)"
        );
        Self(value)
    }
}

impl RandomSource for ConstantSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed list of values, wrapping around when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl ScriptedSource {
    /// Create a scripted source.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty or any value lies outside `[0, 1)`.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted source needs at least one value");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "scripted source values must lie in [0, 1)"
        );
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// Total number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        value
    }
}
