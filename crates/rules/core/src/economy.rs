//! Action economy: per-round budgets, their consumption, and their resets.
//!
//! `spend` is the single admission-control point for all movement, attack,
//! and reaction economy. Exhaustion is an expected outcome, not an error;
//! callers surface it to the table, the engine just refuses.

use crate::config::RulesConfig;
use crate::env::{CombatEnv, StoreError};
use crate::state::{ActionKind, CombatantId, RoundState, ShopPurchases};

/// Errors surfaced by economy operations. Admission failures are not here;
/// they are [`SpendOutcome`] values.
#[derive(Debug, thiserror::Error)]
pub enum EconomyError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown {0}")]
    UnknownCombatant(CombatantId),
}

/// Outcome of a spend attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpendOutcome {
    /// One action consumed; `remaining` of that kind are left this turn.
    Spent { kind: ActionKind, remaining: u32 },
    /// Budget exhausted; nothing was mutated.
    Exhausted { kind: ActionKind, total: u32 },
}

impl SpendOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, SpendOutcome::Spent { .. })
    }

    /// Human-readable refusal reason, for the presentation layer.
    pub fn reason(&self) -> Option<String> {
        match self {
            SpendOutcome::Spent { .. } => None,
            SpendOutcome::Exhausted { kind, total } => Some(format!(
                "no {kind} actions remaining (all {total} used)"
            )),
        }
    }
}

/// Returns the combatant's round state for the current round.
///
/// A stored record is used only when its round stamp matches; otherwise a
/// fresh default is synthesized and returned without being persisted.
pub fn round_state(
    env: &CombatEnv<'_>,
    id: CombatantId,
    round: u32,
    turn: u32,
) -> Result<RoundState, EconomyError> {
    let profile = env
        .oracle
        .profile(id)
        .ok_or(EconomyError::UnknownCombatant(id))?;

    match env.store.load_round_state(id)? {
        Some(state) if state.round == round => Ok(state),
        _ => Ok(RoundState::fresh(round, turn, profile.player_controlled)),
    }
}

/// Consumes one action of `kind` if the budget allows.
///
/// On success the mutated state is persisted; on exhaustion nothing is
/// written.
pub fn spend(
    env: &CombatEnv<'_>,
    id: CombatantId,
    round: u32,
    turn: u32,
    kind: ActionKind,
) -> Result<SpendOutcome, EconomyError> {
    let mut state = round_state(env, id, round, turn)?;
    let budget = state.budget_mut(kind);

    if !budget.spend() {
        return Ok(SpendOutcome::Exhausted {
            kind,
            total: budget.total,
        });
    }

    let remaining = budget.remaining();
    env.store.save_round_state(id, &state)?;
    Ok(SpendOutcome::Spent { kind, remaining })
}

/// Applies the initiative-shop purchases to a round state, at most once per
/// round.
///
/// The guard is the stored round marker: a second application with the same
/// round is a no-op. Returns whether the bonus was applied by this call.
pub fn apply_shop_bonus(state: &mut RoundState, shop: &ShopPurchases, round: u32) -> bool {
    if state.shop_applied_round == Some(round) {
        return false;
    }

    if shop.extra_attack {
        state.attack.total += 1;
    }
    state.move_bonus_meters += shop.move_increments * RulesConfig::SHOP_MOVE_METERS;

    state.shop_applied_round = Some(round);
    state.shop = Some(*shop);
    true
}

/// Turn-boundary reset: `used` counters back to zero, stale activation
/// counters purged. Totals and accumulated bonuses stay.
pub fn reset_turn(
    env: &CombatEnv<'_>,
    id: CombatantId,
    round: u32,
    turn: u32,
) -> Result<RoundState, EconomyError> {
    let mut state = round_state(env, id, round, turn)?;
    state.reset_turn_scoped(turn);
    env.store.save_round_state(id, &state)?;

    let mut usage = env.store.load_usage(id)?;
    if !usage.is_empty() {
        usage.purge_before(round, turn);
        env.store.save_usage(id, &usage)?;
    }

    Ok(state)
}

/// Round-boundary reset: the record is replaced wholesale with defaults for
/// the new round, then the shop bonus is re-applied for player-controlled
/// combatants.
pub fn reset_round(
    env: &CombatEnv<'_>,
    id: CombatantId,
    round: u32,
) -> Result<RoundState, EconomyError> {
    let profile = env
        .oracle
        .profile(id)
        .ok_or(EconomyError::UnknownCombatant(id))?;

    let mut state = RoundState::fresh(round, 1, profile.player_controlled);
    if profile.player_controlled {
        apply_shop_bonus(&mut state, &profile.shop, round);
    }

    env.store.save_round_state(id, &state)?;
    Ok(state)
}
