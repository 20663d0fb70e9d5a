use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every random draw the bot makes. Handlers only see this
/// trait, so tests can swap in a scripted sequence.
pub trait RandomSource: Send {
    /// Uniform draw from the closed interval `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

/// `RandomSource` backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.0.gen_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() called with empty range");
        self.0.gen_range(0..len.max(1))
    }
}
