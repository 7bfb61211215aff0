//! Injected randomness for maze generation
//!
//! Generation never touches a global RNG. Callers hand in anything that
//! implements [`MazeRng`]; every `rand::Rng` does, so a seeded `Pcg32`
//! gives reproducible mazes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Uniform randomness used by carving, loosening, repair and racing
pub trait MazeRng {
    /// Uniform float in `[0, 1)`
    fn unit_f64(&mut self) -> f64;

    /// Uniform index in `[0, len)`; `len` must be non-zero
    fn index(&mut self, len: usize) -> usize;

    /// Uniform pick from a slice, `None` when empty
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.index(items.len())])
        }
    }

    /// Bernoulli trial with probability `p` (clamped to `[0, 1]`)
    fn chance(&mut self, p: f64) -> bool {
        self.unit_f64() < p.clamp(0.0, 1.0)
    }
}

impl<R: Rng> MazeRng for R {
    fn unit_f64(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Seed wrapper so a round can be replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
