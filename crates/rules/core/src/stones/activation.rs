//! Power activation: eligibility, escalating cost, effect, deduction.
//!
//! The resolution order is a designed guarantee: the effect runs before any
//! stone is deducted, so a refused effect is non-destructive. Refusals are
//! reported as outcomes; only store failures are errors.

use crate::economy;
use crate::env::CombatEnv;
use crate::state::{Attribute, CombatantId, RoundState, StonePools, UsageKey};
use crate::stones::powers::{EffectError, PowerAttunement, StonePower};
use crate::stones::StonesError;

/// Why an activation was refused. All of these are expected outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RefusalReason {
    #[error("only player-controlled combatants may spend stones")]
    NotPlayerControlled,

    #[error("{power} can only be charged against the {required} pool")]
    WrongPool {
        power: StonePower,
        required: Attribute,
    },

    #[error("not enough stones: {cost} needed, {available} in the pool")]
    InsufficientStones { cost: u32, available: u32 },

    #[error("effect refused: {0}")]
    EffectFailed(EffectError),
}

/// Outcome of an activation attempt.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationOutcome {
    Activated {
        power: StonePower,
        /// Pool the activation was charged against.
        attribute: Attribute,
        /// Stones deducted (doubles with each activation this turn).
        cost: u32,
        pool_remaining: u32,
        /// The round state after the effect.
        state: RoundState,
    },
    Refused(RefusalReason),
}

impl ActivationOutcome {
    pub fn activated(&self) -> bool {
        matches!(self, ActivationOutcome::Activated { .. })
    }
}

/// Cost of the nth activation of one `(pool, power)` pair within a turn:
/// 1, 2, 4, 8, ... stones.
pub fn activation_cost(prior_activations: u32) -> u32 {
    1u32
        .checked_shl(prior_activations)
        .unwrap_or(u32::MAX)
}

/// Attempts to activate `power`, charging the `attribute` pool.
///
/// Resolution order: eligibility, pool match, escalating cost against the
/// activation counter, funds, effect, and only then deduction, counting,
/// and persistence. Nothing is written unless every step passed.
pub fn activate(
    env: &CombatEnv<'_>,
    id: CombatantId,
    attribute: Attribute,
    power: StonePower,
    round: u32,
    turn: u32,
) -> Result<ActivationOutcome, StonesError> {
    let profile = env
        .oracle
        .profile(id)
        .ok_or(StonesError::UnknownCombatant(id))?;

    if !profile.player_controlled {
        return Ok(ActivationOutcome::Refused(RefusalReason::NotPlayerControlled));
    }

    if let PowerAttunement::Fixed(required) = power.attunement() {
        if required != attribute {
            return Ok(ActivationOutcome::Refused(RefusalReason::WrongPool {
                power,
                required,
            }));
        }
    }

    let mut usage = env.store.load_usage(id)?;
    let key = UsageKey {
        attribute,
        power,
        round,
        turn,
    };
    let cost = activation_cost(usage.count(&key));

    let mut pools = env
        .store
        .load_pools(id)?
        .unwrap_or_else(|| StonePools::from_scores(&profile.scores));
    let pool = pools.get_mut(attribute);
    if pool.current < cost {
        return Ok(ActivationOutcome::Refused(RefusalReason::InsufficientStones {
            cost,
            available: pool.current,
        }));
    }

    // Effect first: a refused effect must not cost anything.
    let mut state = economy::round_state(env, id, round, turn)?;
    if let Err(effect) = power.apply(&mut state) {
        return Ok(ActivationOutcome::Refused(RefusalReason::EffectFailed(
            effect,
        )));
    }

    // Effect succeeded: deduct, count, persist.
    pool.try_spend(cost);
    let pool_remaining = pool.current;
    usage.increment(key);

    env.store.save_round_state(id, &state)?;
    env.store.save_pools(id, &pools)?;
    env.store.save_usage(id, &usage)?;

    Ok(ActivationOutcome::Activated {
        power,
        attribute,
        cost,
        pool_remaining,
        state,
    })
}
