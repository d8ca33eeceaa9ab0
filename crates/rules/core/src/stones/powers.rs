//! The stone power catalog.
//!
//! Powers are a closed, compile-time catalog: every power is an enum
//! variant bound to an attunement, a category, and an effect transform over
//! the activating combatant's [`RoundState`]. Invalid power ids are
//! unrepresentable.

use strum::EnumIter;

use crate::config::RulesConfig;
use crate::state::{ActionKind, Attribute, RoundState};

/// Which pool a power draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerAttunement {
    /// Chargeable against any one pool, chosen at activation time.
    Generic,
    /// Only chargeable against this attribute's pool.
    Fixed(Attribute),
}

/// When during the round a power is meant to be used. Informational for the
/// presentation layer; the engine charges all categories the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerCategory {
    Action,
    Passive,
    Reaction,
}

/// An effect transform refused to apply. The activation charges nothing
/// when this happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectError {
    #[error("{kind} budget is already at its cap of {cap}")]
    BudgetAtCap { kind: ActionKind, cap: u32 },

    #[error("bonus is already at its stack cap of {cap}")]
    BonusAtCap { cap: u32 },
}

/// Every activatable stone power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StonePower {
    /// One additional attack action this round.
    ExtraAttack,
    /// Flat damage bonus on hits this round.
    MightyBlow,
    /// Ignore a point of armor on hits this round.
    PiercingStrike,
    /// One additional reaction this round.
    ExtraReaction,
    /// Bonus movement distance this round.
    Sprint,
    /// Harder to hit when evading this round.
    Sidestep,
    /// Temporary armor this round.
    StoneSkin,
    /// Critical hits grade one raise higher this round.
    KeenEye,
    /// One extra die in the spell pool this round.
    SpellSurge,
    /// Extra keep dice on saves this round.
    IronWill,
    /// One extra kept die on spells this round.
    SpellFocus,
    /// A free raise on the next successful roll this round.
    Inspire,
    /// A free raise, chargeable against any pool.
    FortunesFavor,
    /// Extra movement distance, chargeable against any pool.
    Surge,
}

impl StonePower {
    pub fn attunement(&self) -> PowerAttunement {
        use Attribute::*;
        match self {
            StonePower::ExtraAttack | StonePower::MightyBlow | StonePower::PiercingStrike => {
                PowerAttunement::Fixed(Might)
            }
            StonePower::ExtraReaction | StonePower::Sprint | StonePower::Sidestep => {
                PowerAttunement::Fixed(Agility)
            }
            StonePower::StoneSkin => PowerAttunement::Fixed(Vitality),
            StonePower::KeenEye | StonePower::SpellSurge => PowerAttunement::Fixed(Intellect),
            StonePower::IronWill | StonePower::SpellFocus => PowerAttunement::Fixed(Resolve),
            StonePower::Inspire => PowerAttunement::Fixed(Influence),
            StonePower::FortunesFavor | StonePower::Surge => PowerAttunement::Generic,
        }
    }

    pub fn category(&self) -> PowerCategory {
        match self {
            StonePower::ExtraAttack
            | StonePower::Sprint
            | StonePower::SpellSurge
            | StonePower::SpellFocus
            | StonePower::Inspire
            | StonePower::Surge => PowerCategory::Action,
            StonePower::ExtraReaction | StonePower::Sidestep => PowerCategory::Reaction,
            StonePower::MightyBlow
            | StonePower::PiercingStrike
            | StonePower::StoneSkin
            | StonePower::KeenEye
            | StonePower::IronWill
            | StonePower::FortunesFavor => PowerCategory::Passive,
        }
    }

    /// Applies the power's effect to a round state.
    ///
    /// Effects mutate only the state they receive. A refusal leaves the
    /// state exactly as it was; each effect validates before it writes.
    pub fn apply(&self, state: &mut RoundState) -> Result<(), EffectError> {
        match self {
            StonePower::ExtraAttack => {
                raise_budget(state, ActionKind::Attack)?;
                state.bonuses.extra_attacks += 1;
            }
            StonePower::ExtraReaction => {
                raise_budget(state, ActionKind::Reaction)?;
                state.bonuses.extra_reactions += 1;
            }
            StonePower::Sprint | StonePower::Surge => {
                bump(&mut state.bonuses.extra_move_meters, RulesConfig::SHOP_MOVE_METERS)?;
                state.move_bonus_meters += RulesConfig::SHOP_MOVE_METERS;
            }
            StonePower::MightyBlow => bump(&mut state.bonuses.damage_bonus, 2)?,
            StonePower::PiercingStrike => bump(&mut state.bonuses.armor_penetration, 1)?,
            StonePower::Sidestep => bump(&mut state.bonuses.evade_bonus, 1)?,
            StonePower::StoneSkin => bump(&mut state.bonuses.temp_armor, 1)?,
            StonePower::KeenEye => bump(&mut state.bonuses.crit_raises, 1)?,
            StonePower::SpellSurge => bump(&mut state.bonuses.spell_pool_dice, 1)?,
            StonePower::IronWill => bump(&mut state.bonuses.save_keep_bonus, 1)?,
            StonePower::SpellFocus => bump(&mut state.bonuses.spell_keep_dice, 1)?,
            StonePower::Inspire | StonePower::FortunesFavor => {
                bump(&mut state.bonuses.free_raises, 1)?
            }
        }
        Ok(())
    }
}

/// Grows an action budget's total by one, within the per-kind cap.
fn raise_budget(state: &mut RoundState, kind: ActionKind) -> Result<(), EffectError> {
    let budget = state.budget_mut(kind);
    if budget.total >= RulesConfig::MAX_BUDGET_PER_KIND {
        return Err(EffectError::BudgetAtCap {
            kind,
            cap: RulesConfig::MAX_BUDGET_PER_KIND,
        });
    }
    budget.total += 1;
    Ok(())
}

/// Grows a bonus accumulator, within the stack cap.
fn bump(counter: &mut u32, by: u32) -> Result<(), EffectError> {
    if *counter + by > RulesConfig::MAX_BONUS_STACK {
        return Err(EffectError::BonusAtCap {
            cap: RulesConfig::MAX_BONUS_STACK,
        });
    }
    *counter += by;
    Ok(())
}
