//! Per-round action bookkeeping for a single combatant.

use strum::EnumIter;

use crate::config::RulesConfig;
use crate::state::combatant::ShopPurchases;

/// The three per-round action budgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Movement,
    Attack,
    Reaction,
}

/// One action budget: how many actions of a kind are available this round
/// and how many have been consumed.
///
/// `used` never exceeds `total`; the only mutation path is [`spend`], which
/// checks first.
///
/// [`spend`]: ActionBudget::spend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionBudget {
    pub total: u32,
    pub used: u32,
}

impl ActionBudget {
    pub fn new(total: u32) -> Self {
        Self { total, used: 0 }
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.used)
    }

    /// Consumes one action if any remain. Returns false without mutating
    /// when the budget is exhausted.
    pub fn spend(&mut self) -> bool {
        if self.used < self.total {
            self.used += 1;
            true
        } else {
            false
        }
    }

    /// Turn-boundary reset: consumed actions come back, the total stays.
    pub fn reset_used(&mut self) {
        self.used = 0;
    }
}

impl Default for ActionBudget {
    fn default() -> Self {
        Self::new(RulesConfig::DEFAULT_BUDGET)
    }
}

/// Accumulated stone-power bonuses for the current round.
///
/// All counters start at zero and only grow while the round lasts; the
/// round-boundary reset replaces the whole [`RoundState`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoneBonuses {
    pub extra_attacks: u32,
    pub extra_reactions: u32,
    pub extra_move_meters: u32,
    pub damage_bonus: u32,
    pub armor_penetration: u32,
    pub evade_bonus: u32,
    pub temp_armor: u32,
    pub crit_raises: u32,
    pub free_raises: u32,
    pub save_keep_bonus: u32,
    pub spell_pool_dice: u32,
    pub spell_keep_dice: u32,
}

/// Per-(combatant, round) action record.
///
/// Created lazily on first read for a round, replaced wholesale at round
/// boundaries, and discarded when the round advances. No history is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    /// Round this record is stamped for. A stored record whose stamp does
    /// not match the current round is stale and ignored on read.
    pub round: u32,
    pub turn: u32,
    pub player_controlled: bool,

    pub movement: ActionBudget,
    pub attack: ActionBudget,
    pub reaction: ActionBudget,

    /// Bonus movement distance this round, in meters.
    pub move_bonus_meters: u32,
    pub bonuses: StoneBonuses,

    /// Round number the shop bonus was applied for. Guards re-application:
    /// applying again with the same round is a no-op.
    pub shop_applied_round: Option<u32>,
    /// Snapshot of the purchases that were applied, for presentation.
    pub shop: Option<ShopPurchases>,
}

impl RoundState {
    /// Fresh defaults for the given round: one action of each kind, no
    /// bonuses.
    pub fn fresh(round: u32, turn: u32, player_controlled: bool) -> Self {
        Self {
            round,
            turn,
            player_controlled,
            movement: ActionBudget::default(),
            attack: ActionBudget::default(),
            reaction: ActionBudget::default(),
            move_bonus_meters: 0,
            bonuses: StoneBonuses::default(),
            shop_applied_round: None,
            shop: None,
        }
    }

    pub fn budget(&self, kind: ActionKind) -> &ActionBudget {
        match kind {
            ActionKind::Movement => &self.movement,
            ActionKind::Attack => &self.attack,
            ActionKind::Reaction => &self.reaction,
        }
    }

    pub fn budget_mut(&mut self, kind: ActionKind) -> &mut ActionBudget {
        match kind {
            ActionKind::Movement => &mut self.movement,
            ActionKind::Attack => &mut self.attack,
            ActionKind::Reaction => &mut self.reaction,
        }
    }

    /// Turn-boundary reset: every budget's `used` back to zero, totals and
    /// bonuses untouched.
    pub fn reset_turn_scoped(&mut self, turn: u32) {
        self.turn = turn;
        self.movement.reset_used();
        self.attack.reset_used();
        self.reaction.reset_used();
    }
}
