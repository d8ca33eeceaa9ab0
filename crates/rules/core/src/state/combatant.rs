//! Combatant identity and the read-only profile served by the host.

use core::fmt;

use crate::config::RulesConfig;
use crate::state::stones::Attribute;

/// Identifier for a combatant, assigned by the host environment.
///
/// The engine never allocates these; it only threads them through to the
/// document store and oracles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "combatant#{}", self.0)
    }
}

/// The six attribute scores of a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeScores {
    scores: [u32; Attribute::COUNT],
}

impl AttributeScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for one attribute score.
    pub fn with(mut self, attribute: Attribute, score: u32) -> Self {
        self.scores[attribute as usize] = score;
        self
    }

    pub fn score(&self, attribute: Attribute) -> u32 {
        self.scores[attribute as usize]
    }

    /// Stone pool capacity derived from an attribute score.
    pub fn pool_max(&self, attribute: Attribute) -> u32 {
        self.score(attribute) / RulesConfig::POOL_DIVISOR
    }
}

/// Bonuses purchased from the initiative shop before the round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopPurchases {
    /// One additional attack action this round.
    pub extra_attack: bool,
    /// Purchased movement increments; each grants
    /// [`RulesConfig::SHOP_MOVE_METERS`] meters.
    pub move_increments: u32,
}

impl ShopPurchases {
    pub fn is_empty(&self) -> bool {
        !self.extra_attack && self.move_increments == 0
    }
}

/// Read-only view of a combatant, resolved by the [`CombatantOracle`].
///
/// The engine treats this as a snapshot: attribute scores and mastery rank
/// are static for the duration of a combat, `incapacitated` tracks the
/// host-side health tiers and may change between calls.
///
/// [`CombatantOracle`]: crate::env::CombatantOracle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantProfile {
    /// Player-controlled combatants may spend stones and shop bonuses;
    /// others may not.
    pub player_controlled: bool,
    /// Proficiency tier: keep-dice count for most rolls and stone
    /// regeneration points per round.
    pub mastery_rank: u32,
    pub scores: AttributeScores,
    pub shop: ShopPurchases,
    /// True while the lowest health tier has damage marked.
    pub incapacitated: bool,
}

impl CombatantProfile {
    /// A non-player combatant with the given scores.
    pub fn npc(scores: AttributeScores, mastery_rank: u32) -> Self {
        Self {
            player_controlled: false,
            mastery_rank,
            scores,
            shop: ShopPurchases::default(),
            incapacitated: false,
        }
    }

    /// A player-controlled combatant with the given scores.
    pub fn player(scores: AttributeScores, mastery_rank: u32) -> Self {
        Self {
            player_controlled: true,
            mastery_rank,
            scores,
            shop: ShopPurchases::default(),
            incapacitated: false,
        }
    }

    pub fn with_shop(mut self, shop: ShopPurchases) -> Self {
        self.shop = shop;
        self
    }

    pub fn with_incapacitated(mut self, incapacitated: bool) -> Self {
        self.incapacitated = incapacitated;
        self
    }
}
