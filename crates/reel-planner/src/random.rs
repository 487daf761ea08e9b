//! Randomness used for score jitter and the top-rank swap.
//!
//! The scorer never touches a global RNG; callers hand it a [`RandomSource`]
//! so runs can be seeded or made fully deterministic.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of the two random decisions the scorer makes.
pub trait RandomSource {
    /// Uniform value in `[-amplitude, amplitude]`.
    fn jitter(&mut self, amplitude: f64) -> f64;

    /// True with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    /// Thread-local generator, different output every run.
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible generator for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn jitter(&mut self, amplitude: f64) -> f64 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-amplitude..=amplitude)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }
}

/// No jitter, never swaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRandom;

impl RandomSource for NoRandom {
    fn jitter(&mut self, _amplitude: f64) -> f64 {
        0.0
    }

    fn chance(&mut self, _probability: f64) -> bool {
        false
    }
}

/// Scripted outcomes: a constant jitter (clamped to the amplitude) and a fixed swap decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom {
    pub jitter: f64,
    pub swap: bool,
}

impl FixedRandom {
    pub fn new(jitter: f64, swap: bool) -> Self {
        Self { jitter, swap }
    }
}

impl RandomSource for FixedRandom {
    fn jitter(&mut self, amplitude: f64) -> f64 {
        self.jitter.clamp(-amplitude.abs(), amplitude.abs())
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.swap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_within_amplitude() {
        let mut source = RngSource::seeded(7);
        for _ in 0..1000 {
            let j = source.jitter(0.05);
            assert!((-0.05..=0.05).contains(&j), "jitter out of range: {}", j);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.jitter(0.05), b.jitter(0.05));
            assert_eq!(a.chance(0.3), b.chance(0.3));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut source = RngSource::seeded(1);
        assert!((0..100).all(|_| !source.chance(0.0)));
        assert!((0..100).all(|_| source.chance(1.0)));
    }

    #[test]
    fn test_zero_amplitude() {
        let mut source = RngSource::seeded(3);
        assert_eq!(source.jitter(0.0), 0.0);
    }

    #[test]
    fn test_fixed_random_clamps() {
        let mut source = FixedRandom::new(0.2, true);
        assert_eq!(source.jitter(0.05), 0.05);
        assert!(source.chance(0.3));

        let mut quiet = NoRandom;
        assert_eq!(quiet.jitter(0.05), 0.0);
        assert!(!quiet.chance(0.3));
    }
}
