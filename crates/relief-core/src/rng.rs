//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A single `SmallRng` seeded from `SimConfig::seed` drives every random
//! draw: aid amounts at dispatch and jitter offsets during ticks.  The tick
//! loop visits volunteers in ascending `VolunteerId` order and draws the
//! latitude offset before the longitude offset, so the same seed, shelters
//! and dispatches always replay identically.
//!
//! Each dispatch re-seeds a batch RNG from the root seed mixed with the
//! batch generation, so replacing a batch does not shift the random stream
//! of later batches depending on how long the previous one ran.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::BatchId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Used only from the single simulation thread.
#[derive(Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically from the run's global seed and a batch
    /// generation.
    pub fn for_batch(global_seed: u64, batch: BatchId) -> Self {
        let seed = global_seed ^ batch.0.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform offset in `[-width / 2, +width / 2]`.
    ///
    /// Returns `0.0` without consuming randomness when `width <= 0`.
    #[inline]
    pub fn centered(&mut self, width: f64) -> f64 {
        if width <= 0.0 {
            return 0.0;
        }
        let half = width * 0.5;
        self.0.gen_range(-half..=half)
    }
}
