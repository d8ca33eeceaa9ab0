//! Death saves: incapacitation bookkeeping, save rolls, damage and healing
//! while down.
//!
//! States run `Healthy → Incapacitated → {Stabilized | Dead}`, with a reset
//! back to `Healthy` when healing lifts the combatant above the
//! incapacitation threshold. The host owns health tiers; the engine reads
//! the incapacitation flag through the oracle and owns the record.

use crate::config::RulesConfig;
use crate::dice::{self, RollResult};
use crate::economy::{self, EconomyError};
use crate::env::{compute_seed, roll_context, CombatEnv, StoreError};
use crate::state::{CombatantId, DeathSaveRecord};

#[derive(Debug, thiserror::Error)]
pub enum DeathError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown {0}")]
    UnknownCombatant(CombatantId),
}

impl From<EconomyError> for DeathError {
    fn from(err: EconomyError) -> Self {
        match err {
            EconomyError::Store(e) => DeathError::Store(e),
            EconomyError::UnknownCombatant(id) => DeathError::UnknownCombatant(id),
        }
    }
}

/// What a save roll did to the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SaveResult {
    Success,
    /// Third success: the combatant is stable, no further saves.
    Stabilized,
    Failure,
    /// Third mark: the combatant is dead.
    Died,
}

/// Outcome of a save attempt. Asking for a save on a combatant that is not
/// down, or already terminal, reports status instead of rolling.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SaveOutcome {
    Rolled {
        roll: RollResult,
        record: DeathSaveRecord,
        result: SaveResult,
    },
    NotIncapacitated,
    Terminal {
        record: DeathSaveRecord,
    },
}

/// Outcome of healing applied to a downed combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealOutcome {
    /// Healed above the incapacitation threshold; the record was cleared.
    Recovered,
    /// Still down; marks removed at one per three points of healing.
    MarksRemoved {
        removed: u8,
        record: DeathSaveRecord,
    },
    /// Nothing changed (dead record, or healing below the ratio).
    Unchanged { record: DeathSaveRecord },
}

/// Initializes a death-save record on entry to incapacitation.
///
/// An existing record, terminal or not, is left untouched.
pub fn ensure_record(env: &CombatEnv<'_>, id: CombatantId) -> Result<DeathSaveRecord, DeathError> {
    if let Some(record) = env.store.load_death_record(id)? {
        return Ok(record);
    }
    let record = DeathSaveRecord::new();
    env.store.save_death_record(id, &record)?;
    Ok(record)
}

/// Rolls a death save for an incapacitated combatant.
///
/// Pool is the vitality score, keep is the mastery rank plus any stone
/// save-keep bonus, against TN 20 with the usual exploding dice.
pub fn roll_save(
    env: &CombatEnv<'_>,
    id: CombatantId,
    round: u32,
    turn: u32,
) -> Result<SaveOutcome, DeathError> {
    let profile = env
        .oracle
        .profile(id)
        .ok_or(DeathError::UnknownCombatant(id))?;

    if !profile.incapacitated {
        return Ok(SaveOutcome::NotIncapacitated);
    }

    let mut record = ensure_record(env, id)?;
    if record.is_terminal() {
        return Ok(SaveOutcome::Terminal { record });
    }

    let state = economy::round_state(env, id, round, turn)?;
    let pool = profile.scores.score(crate::state::Attribute::Vitality);
    let keep = profile.mastery_rank + state.bonuses.save_keep_bonus;

    let seed = compute_seed(env.combat_seed, round, turn, id, roll_context::DEATH_SAVE);
    let roll = dice::roll(
        env.rng,
        seed,
        pool,
        keep,
        0,
        Some(RulesConfig::DEATH_SAVE_TARGET),
    );

    let result = if roll.success {
        if record.record_success() {
            SaveResult::Stabilized
        } else {
            SaveResult::Success
        }
    } else if record.add_marks(1) {
        SaveResult::Died
    } else {
        SaveResult::Failure
    };

    env.store.save_death_record(id, &record)?;
    Ok(SaveOutcome::Rolled {
        roll,
        record,
        result,
    })
}

/// Damage taken while down: one death mark, two for a critical hit, capped
/// at the limit and then re-checked for death. Destabilizes a stabilized
/// record without resetting its successes. Dead records are untouched.
pub fn damage_while_down(
    env: &CombatEnv<'_>,
    id: CombatantId,
    critical: bool,
) -> Result<DeathSaveRecord, DeathError> {
    let mut record = ensure_record(env, id)?;
    if record.dead {
        return Ok(record);
    }

    record.add_marks(if critical { 2 } else { 1 });
    env.store.save_death_record(id, &record)?;
    Ok(record)
}

/// Healing applied to a combatant with an active record.
///
/// Every three points removes one mark; healing that lifts the combatant
/// above the incapacitation threshold clears the record entirely.
pub fn apply_healing(
    env: &CombatEnv<'_>,
    id: CombatantId,
    healing: u32,
) -> Result<HealOutcome, DeathError> {
    let profile = env
        .oracle
        .profile(id)
        .ok_or(DeathError::UnknownCombatant(id))?;

    if !profile.incapacitated {
        env.store.clear_death_record(id)?;
        return Ok(HealOutcome::Recovered);
    }

    let mut record = ensure_record(env, id)?;
    if record.dead {
        return Ok(HealOutcome::Unchanged { record });
    }

    let removed = ((healing / RulesConfig::HEALING_PER_MARK) as u8).min(record.death_marks);
    if removed == 0 {
        return Ok(HealOutcome::Unchanged { record });
    }

    record.remove_marks(removed);
    env.store.save_death_record(id, &record)?;
    Ok(HealOutcome::MarksRemoved { removed, record })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::CombatStore;
    use crate::state::{Attribute, AttributeScores, CombatantProfile, RoundState};
    use crate::testkit::{FixedOracle, MemStore, ScriptedRng};

    const DOWNED: CombatantId = CombatantId(7);

    fn oracle_with_downed(vitality: u32, mastery: u32) -> FixedOracle {
        let oracle = FixedOracle::new();
        oracle.insert(
            DOWNED,
            CombatantProfile::player(
                AttributeScores::new().with(Attribute::Vitality, vitality),
                mastery,
            )
            .with_incapacitated(true),
        );
        oracle
    }

    #[test]
    fn successful_save_counts_toward_stabilizing() {
        let store = MemStore::new();
        let oracle = oracle_with_downed(3, 2);
        // Three dice: 8 explodes into 5 (13), then 7 and 4. Keep 2 => 20.
        let rng = ScriptedRng::new(&[8, 5, 7, 4]);
        let env = CombatEnv::new(&store, &oracle, &rng, 0);

        match roll_save(&env, DOWNED, 1, 1).unwrap() {
            SaveOutcome::Rolled {
                roll,
                record,
                result,
            } => {
                assert_eq!(roll.total, 20);
                assert!(roll.success);
                assert_eq!(result, SaveResult::Success);
                assert_eq!(record.successes, 1);
                assert_eq!(record.death_marks, 0);
            }
            other => panic!("expected a rolled save, got {other:?}"),
        }
    }

    #[test]
    fn failed_save_adds_a_mark_and_third_kills() {
        let store = MemStore::new();
        let oracle = oracle_with_downed(2, 1);
        let rng = ScriptedRng::new(&[1, 2, 1, 2, 1, 2]);
        let env = CombatEnv::new(&store, &oracle, &rng, 0);

        for expected_marks in 1..=2u8 {
            match roll_save(&env, DOWNED, 1, expected_marks as u32).unwrap() {
                SaveOutcome::Rolled { record, result, .. } => {
                    assert_eq!(result, SaveResult::Failure);
                    assert_eq!(record.death_marks, expected_marks);
                }
                other => panic!("expected a rolled save, got {other:?}"),
            }
        }

        match roll_save(&env, DOWNED, 1, 3).unwrap() {
            SaveOutcome::Rolled { record, result, .. } => {
                assert_eq!(result, SaveResult::Died);
                assert!(record.dead);
            }
            other => panic!("expected a rolled save, got {other:?}"),
        }

        // Terminal now: no further rolls.
        assert!(matches!(
            roll_save(&env, DOWNED, 1, 4).unwrap(),
            SaveOutcome::Terminal { record } if record.dead
        ));
    }

    #[test]
    fn save_keep_bonus_raises_keep_count() {
        let store = MemStore::new();
        let oracle = oracle_with_downed(3, 1);
        let mut state = RoundState::fresh(1, 1, true);
        state.bonuses.save_keep_bonus = 1;
        store.save_round_state(DOWNED, &state).unwrap();

        // Keep 2 instead of 1: 13 + 7 = 20 succeeds where 13 alone fails.
        let rng = ScriptedRng::new(&[8, 5, 7, 4]);
        let env = CombatEnv::new(&store, &oracle, &rng, 0);

        match roll_save(&env, DOWNED, 1, 1).unwrap() {
            SaveOutcome::Rolled { roll, .. } => {
                assert_eq!(roll.kept, vec![13, 7]);
                assert!(roll.success);
            }
            other => panic!("expected a rolled save, got {other:?}"),
        }
    }

    #[test]
    fn no_save_when_not_incapacitated() {
        let store = MemStore::new();
        let oracle = oracle_with_downed(3, 2);
        oracle.set_incapacitated(DOWNED, false);
        let rng = ScriptedRng::new(&[]);
        let env = CombatEnv::new(&store, &oracle, &rng, 0);

        assert_eq!(
            roll_save(&env, DOWNED, 1, 1).unwrap(),
            SaveOutcome::NotIncapacitated
        );
    }

    #[test]
    fn critical_damage_while_down_can_kill() {
        let store = MemStore::new();
        let oracle = oracle_with_downed(3, 2);
        let rng = ScriptedRng::new(&[]);
        let env = CombatEnv::new(&store, &oracle, &rng, 0);

        store
            .save_death_record(
                DOWNED,
                &DeathSaveRecord {
                    successes: 2,
                    death_marks: 1,
                    stabilized: false,
                    dead: false,
                },
            )
            .unwrap();

        let record = damage_while_down(&env, DOWNED, true).unwrap();
        assert_eq!(record.death_marks, 3);
        assert!(record.dead);
    }

    #[test]
    fn healing_removes_one_mark_per_three_points() {
        let store = MemStore::new();
        let oracle = oracle_with_downed(3, 2);
        let rng = ScriptedRng::new(&[]);
        let env = CombatEnv::new(&store, &oracle, &rng, 0);

        store
            .save_death_record(
                DOWNED,
                &DeathSaveRecord {
                    death_marks: 2,
                    ..DeathSaveRecord::default()
                },
            )
            .unwrap();

        // Two points: below the ratio, nothing removed.
        assert!(matches!(
            apply_healing(&env, DOWNED, 2).unwrap(),
            HealOutcome::Unchanged { record } if record.death_marks == 2
        ));

        // Five points: one mark.
        match apply_healing(&env, DOWNED, 5).unwrap() {
            HealOutcome::MarksRemoved { removed, record } => {
                assert_eq!(removed, 1);
                assert_eq!(record.death_marks, 1);
            }
            other => panic!("expected marks removed, got {other:?}"),
        }
    }

    #[test]
    fn healing_above_threshold_clears_the_record() {
        let store = MemStore::new();
        let oracle = oracle_with_downed(3, 2);
        let rng = ScriptedRng::new(&[]);
        let env = CombatEnv::new(&store, &oracle, &rng, 0);

        store
            .save_death_record(
                DOWNED,
                &DeathSaveRecord {
                    successes: 1,
                    death_marks: 2,
                    ..DeathSaveRecord::default()
                },
            )
            .unwrap();

        oracle.set_incapacitated(DOWNED, false);
        assert_eq!(apply_healing(&env, DOWNED, 3).unwrap(), HealOutcome::Recovered);
        assert!(store.load_death_record(DOWNED).unwrap().is_none());
    }
}
