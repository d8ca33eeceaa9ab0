//! ChaCha-backed implementation of the engine's RNG oracle.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rules_core::RngOracle;

/// Deterministic RNG for a combat session.
///
/// Each draw seeds a fresh ChaCha8 stream from the engine-derived seed, so
/// the oracle stays a pure seed-to-value mapping with no stream state to
/// persist or replay.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionRng;

impl SessionRng {
    pub fn new() -> Self {
        Self
    }
}

impl RngOracle for SessionRng {
    fn next_u32(&self, seed: u64) -> u32 {
        ChaCha8Rng::seed_from_u64(seed).next_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value() {
        let rng = SessionRng::new();
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
    }

    #[test]
    fn die_rolls_stay_in_range() {
        let rng = SessionRng::new();
        for seed in 0..200 {
            let face = rng.roll_die(seed, 8);
            assert!((1..=8).contains(&face));
        }
    }
}
