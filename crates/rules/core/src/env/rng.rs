//! RNG oracle for deterministic dice.
//!
//! The engine never owns an RNG stream. Every random draw is a pure
//! function of a seed, and seeds are derived from combat state so that a
//! replay of the same combat produces the same rolls.

use crate::state::CombatantId;

/// RNG oracle: a pure mapping from seed to random output.
///
/// Implementations must be deterministic: the same seed always yields the
/// same value. Statefulness lives entirely in the seed derivation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with `faces` sides (1..=faces).
    fn roll_die(&self, seed: u64, faces: u32) -> u32 {
        (self.next_u32(seed) % faces) + 1
    }
}

/// Roll contexts, so distinct random events within the same turn draw from
/// distinct seeds.
pub mod roll_context {
    /// Death save rolls.
    pub const DEATH_SAVE: u32 = 1;
    /// Host-initiated skill/attack rolls.
    pub const SKILL: u32 = 2;
}

const MIX_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

/// Derives the seed for one random event from combat state.
///
/// Combines the combat-wide seed with round, turn, the acting combatant,
/// and a context tag so every event in a combat gets a unique seed.
pub fn compute_seed(
    combat_seed: u64,
    round: u32,
    turn: u32,
    combatant: CombatantId,
    context: u32,
) -> u64 {
    let mut seed = combat_seed;
    seed = mix(seed, round as u64);
    seed = mix(seed, turn as u64);
    seed = mix(seed, combatant.0 as u64);
    seed = mix(seed, context as u64);
    seed
}

/// Derives the sub-seed for the nth draw within one roll. Explosion chains
/// consume draws from the same sequence as the initial dice.
pub fn draw_seed(seed: u64, draw: u32) -> u64 {
    mix(seed, draw as u64 + 1)
}

/// SplitMix-style finalizer: absorb a word, then scramble.
fn mix(state: u64, word: u64) -> u64 {
    let mut z = state
        .wrapping_add(word.wrapping_mul(MIX_MULTIPLIER))
        .wrapping_add(MIX_MULTIPLIER);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
