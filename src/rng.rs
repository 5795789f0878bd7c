/*
 * RNG Module
 *
 * Deterministic randomness for the flock. One root seed drives:
 * - the placement RNG used once to scatter boids and pick initial headings
 * - one independent jitter RNG per boid, seeded as
 *   seed XOR ((index + 1) * MIXING_CONSTANT)
 *
 * Boids never share RNG state, so the order (or thread) in which they are
 * updated does not change the numbers they draw.
 */

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// 64-bit fractional part of the golden ratio
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone)]
pub struct BoidRng(SmallRng);

impl BoidRng {
    pub fn new(seed: u64, index: usize) -> Self {
        let mixed = seed ^ (index as u64).wrapping_add(1).wrapping_mul(MIXING_CONSTANT);
        BoidRng(SmallRng::seed_from_u64(mixed))
    }

    // Uniform in [0, max); zero when max is zero
    #[inline]
    pub fn jitter(&mut self, max: f32) -> f32 {
        if max > 0.0 {
            self.0.gen_range(0.0..max)
        } else {
            0.0
        }
    }
}

pub fn placement_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

// Use the configured seed, or draw a fresh one from entropy
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_and_index_repeat() {
        let mut a = BoidRng::new(7, 3);
        let mut b = BoidRng::new(7, 3);
        for _ in 0..10 {
            assert_eq!(a.jitter(0.1).to_bits(), b.jitter(0.1).to_bits());
        }
    }

    #[test]
    fn neighbouring_indices_diverge() {
        let mut a = BoidRng::new(7, 0);
        let mut b = BoidRng::new(7, 1);
        let xs: Vec<f32> = (0..4).map(|_| a.jitter(1.0)).collect();
        let ys: Vec<f32> = (0..4).map(|_| b.jitter(1.0)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn jitter_stays_in_range() {
        let mut rng = BoidRng::new(1, 0);
        for _ in 0..1000 {
            let j = rng.jitter(0.1);
            assert!((0.0..0.1).contains(&j));
        }
        assert_eq!(rng.jitter(0.0), 0.0);
    }
}
