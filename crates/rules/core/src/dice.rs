//! Roll-and-keep dice with exploding maximum faces and raises.
//!
//! The one randomness primitive in the engine: roll a pool of d8s, explode
//! on the maximum face, keep the highest dice, and grade the total against
//! an optional target number.

use crate::config::RulesConfig;
use crate::env::{draw_seed, RngOracle};

/// Immutable outcome of one roll.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    /// Per-die values in original roll order. An exploded die's value is
    /// the sum of its whole chain.
    pub dice: Vec<u32>,
    /// The values actually counted, highest first.
    pub kept: Vec<u32>,
    /// Indices into `dice` of dice that exploded at least once.
    pub exploded: Vec<usize>,
    pub skill_bonus: i32,
    pub total: i32,
    pub target_number: Option<i32>,
    pub success: bool,
    /// Margin above the target number, one raise per
    /// [`RulesConfig::RAISE_INCREMENT`]. Zero without a target number.
    pub raises: u32,
}

/// Rolls `pool` d8s, keeps the `keep` highest, adds `bonus`, and grades
/// against `target` when given.
///
/// Any die landing on the maximum face rolls again and accumulates, for as
/// long as the maximum face recurs. Keeping is a stable descending
/// selection: ties keep original roll order. `keep >= pool` keeps
/// everything; an empty pool totals to just the bonus.
pub fn roll(
    rng: &dyn RngOracle,
    seed: u64,
    pool: u32,
    keep: u32,
    bonus: i32,
    target: Option<i32>,
) -> RollResult {
    let mut dice = Vec::with_capacity(pool as usize);
    let mut exploded = Vec::new();
    let mut draw = 0u32;

    for index in 0..pool as usize {
        let mut value = 0u32;
        loop {
            let face = rng.roll_die(draw_seed(seed, draw), RulesConfig::DIE_FACES);
            draw += 1;
            value += face;
            if face < RulesConfig::DIE_FACES {
                break;
            }
            if !exploded.contains(&index) {
                exploded.push(index);
            }
        }
        dice.push(value);
    }

    // Stable descending selection: sort indices by value, ties in roll order.
    let mut order: Vec<usize> = (0..dice.len()).collect();
    order.sort_by(|&a, &b| dice[b].cmp(&dice[a]));
    let kept: Vec<u32> = order
        .into_iter()
        .take(keep.min(pool) as usize)
        .map(|i| dice[i])
        .collect();

    let total = kept.iter().map(|&v| v as i64).sum::<i64>() as i32 + bonus;
    let (success, raises) = match target {
        Some(tn) => (total >= tn, raises_for(total, tn)),
        None => (false, 0),
    };

    RollResult {
        dice,
        kept,
        exploded,
        skill_bonus: bonus,
        total,
        target_number: target,
        success,
        raises,
    }
}

/// Raises bought by a total against a target number.
fn raises_for(total: i32, target: i32) -> u32 {
    if total < target {
        return 0;
    }
    ((total - target) / RulesConfig::RAISE_INCREMENT) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::ScriptedRng;
    use proptest::prelude::*;

    #[test]
    fn keeps_two_highest_with_one_explosion() {
        // Pool 4 keep 2 against TN 12: faces 5, 8 (explodes into 3), 3, 2.
        let rng = ScriptedRng::new(&[5, 8, 3, 3, 2]);
        let result = roll(&rng, 0, 4, 2, 0, Some(12));

        assert_eq!(result.dice, vec![5, 11, 3, 2]);
        assert_eq!(result.exploded, vec![1]);
        assert_eq!(result.kept, vec![11, 5]);
        assert_eq!(result.total, 16);
        assert!(result.success);
        assert_eq!(result.raises, 1);
    }

    #[test]
    fn explosion_chain_accumulates_until_non_max_face() {
        let rng = ScriptedRng::new(&[8, 8, 4]);
        let result = roll(&rng, 0, 1, 1, 0, None);

        assert_eq!(result.dice, vec![20]);
        assert_eq!(result.exploded, vec![0]);
        assert_eq!(result.total, 20);
    }

    #[test]
    fn empty_pool_totals_to_bonus() {
        let rng = ScriptedRng::new(&[]);
        let result = roll(&rng, 0, 0, 3, 5, Some(5));

        assert!(result.dice.is_empty());
        assert!(result.kept.is_empty());
        assert_eq!(result.total, 5);
        assert!(result.success);
        assert_eq!(result.raises, 0);
    }

    #[test]
    fn keep_larger_than_pool_keeps_everything() {
        let rng = ScriptedRng::new(&[2, 7, 4]);
        let result = roll(&rng, 0, 3, 10, 0, None);

        assert_eq!(result.kept, vec![7, 4, 2]);
        assert_eq!(result.total, 13);
    }

    #[test]
    fn ties_keep_roll_order() {
        let rng = ScriptedRng::new(&[4, 6, 4, 6]);
        let result = roll(&rng, 0, 4, 3, 0, None);

        // Both sixes come before the first four; the first four beats the
        // second by roll order.
        assert_eq!(result.kept, vec![6, 6, 4]);
    }

    #[test]
    fn failure_below_target_number() {
        let rng = ScriptedRng::new(&[1, 2]);
        let result = roll(&rng, 0, 2, 2, 0, Some(10));

        assert!(!result.success);
        assert_eq!(result.raises, 0);
    }

    proptest! {
        /// Keeping is exactly the K largest values (as a multiset) and the
        /// total is their sum plus the bonus.
        #[test]
        fn keep_highest_multiset(
            faces in prop::collection::vec(1u32..8, 0..12),
            keep in 0u32..12,
            bonus in -10i32..10,
        ) {
            let rng = ScriptedRng::new(&faces);
            let pool = faces.len() as u32;
            let result = roll(&rng, 0, pool, keep, bonus, None);

            let mut expected = faces.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            expected.truncate(keep.min(pool) as usize);

            let mut kept = result.kept.clone();
            kept.sort_unstable_by(|a, b| b.cmp(a));
            prop_assert_eq!(kept, expected.clone());

            let sum: i32 = expected.iter().map(|&v| v as i32).sum();
            prop_assert_eq!(result.total, sum + bonus);
        }

        /// For a fixed target number, raises never decrease as the total
        /// grows, and stay zero below the target.
        #[test]
        fn raises_monotonic_in_total(tn in 1i32..40, totals in prop::collection::vec(-20i32..60, 1..20)) {
            let mut sorted = totals.clone();
            sorted.sort_unstable();

            let mut previous = 0u32;
            for total in sorted {
                let raises = raises_for(total, tn);
                if total < tn {
                    prop_assert_eq!(raises, 0);
                }
                prop_assert!(raises >= previous);
                previous = raises;
            }
        }
    }
}
