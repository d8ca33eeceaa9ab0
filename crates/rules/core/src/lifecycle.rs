//! Lifecycle orchestration across round and turn boundaries.
//!
//! The orchestrator is a pure reaction to four host events (combat
//! started, round changed, turn changed, combat ended) and never
//! generates them. It is thin glue over the economy, stone, and death
//! modules.

use crate::death::{self, DeathError, SaveOutcome};
use crate::economy::{self, EconomyError};
use crate::env::{CombatEnv, StoreError};
use crate::state::{CombatantId, StoneUsage};
use crate::stones::{self, RegenSession, StonesError};

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Economy(#[from] EconomyError),

    #[error(transparent)]
    Stones(#[from] StonesError),

    #[error(transparent)]
    Death(#[from] DeathError),
}

/// Combat start: fresh round-1 state for every combatant, cleared
/// activation counters, shop bonuses for player-controlled combatants.
pub fn combat_started(
    env: &CombatEnv<'_>,
    roster: &[CombatantId],
) -> Result<(), LifecycleError> {
    for &id in roster {
        env.store.save_usage(id, &StoneUsage::new())?;
        economy::reset_round(env, id, 1)?;
    }
    Ok(())
}

/// Round boundary: every combatant's round state is replaced wholesale and
/// the shop re-applied. From round 2 on, regeneration sessions are opened
/// for player-controlled combatants with headroom; the caller prompts and
/// commits them (the engine holds no partial state while waiting).
pub fn round_changed(
    env: &CombatEnv<'_>,
    roster: &[CombatantId],
    round: u32,
) -> Result<Vec<RegenSession>, LifecycleError> {
    let mut sessions = Vec::new();
    for &id in roster {
        economy::reset_round(env, id, round)?;
        if round > 1 {
            if let Some(session) = stones::begin_regen(env, id)? {
                sessions.push(session);
            }
        }
    }
    Ok(sessions)
}

/// Turn boundary for the combatant whose turn begins: turn-scoped budgets
/// reset, stale activation counters purged, and a death save rolled when
/// the combatant is incapacitated.
pub fn turn_changed(
    env: &CombatEnv<'_>,
    id: CombatantId,
    round: u32,
    turn: u32,
) -> Result<Option<SaveOutcome>, LifecycleError> {
    economy::reset_turn(env, id, round, turn)?;

    let incapacitated = env
        .oracle
        .profile(id)
        .map(|profile| profile.incapacitated)
        .unwrap_or(false);
    if !incapacitated {
        return Ok(None);
    }

    Ok(Some(death::roll_save(env, id, round, turn)?))
}

/// Combat end: every pool back to its effective capacity.
pub fn combat_ended(env: &CombatEnv<'_>, roster: &[CombatantId]) -> Result<(), LifecycleError> {
    for &id in roster {
        stones::restore_all(env, id)?;
    }
    Ok(())
}
