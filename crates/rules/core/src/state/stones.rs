//! Stone pools and per-turn activation counters.

use strum::EnumIter;

use crate::state::combatant::AttributeScores;
use crate::stones::StonePower;

/// The six attributes, each backing one stone pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    Might,
    Agility,
    Vitality,
    Intellect,
    Resolve,
    Influence,
}

impl Attribute {
    pub const COUNT: usize = 6;

    /// All attributes in canonical order.
    pub const ALL: [Attribute; Self::COUNT] = [
        Attribute::Might,
        Attribute::Agility,
        Attribute::Vitality,
        Attribute::Intellect,
        Attribute::Resolve,
        Attribute::Influence,
    ];
}

/// One per-attribute stone pool.
///
/// `sustained` stones are reserved and unavailable, reducing the effective
/// capacity without reducing `max`. `current` is always clamped to
/// `[0, max - sustained]` on mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StonePool {
    pub current: u32,
    pub max: u32,
    pub sustained: u32,
}

impl StonePool {
    /// A full pool with the given capacity.
    pub fn full(max: u32) -> Self {
        Self {
            current: max,
            max,
            sustained: 0,
        }
    }

    /// Effective capacity: `max - sustained`.
    pub fn cap(&self) -> u32 {
        self.max.saturating_sub(self.sustained)
    }

    pub fn at_cap(&self) -> bool {
        self.current >= self.cap()
    }

    /// Deducts `cost` stones. Returns false without mutating when the pool
    /// cannot cover it.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if self.current >= cost {
            self.current -= cost;
            true
        } else {
            false
        }
    }

    /// Adds stones, clamped at the effective capacity. Returns the amount
    /// actually gained.
    pub fn gain(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.cap().saturating_sub(self.current));
        self.current += gained;
        gained
    }

    /// Sets the pool to its effective capacity.
    pub fn restore(&mut self) {
        self.current = self.cap();
    }

    /// Re-clamps `current` into `[0, max - sustained]`. Used after loading
    /// records whose `sustained` changed while the record was at rest.
    pub fn clamp(&mut self) {
        self.current = self.current.min(self.cap());
    }
}

/// The full set of six pools for one combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StonePools {
    pools: [StonePool; Attribute::COUNT],
}

impl StonePools {
    /// Full pools sized from attribute scores.
    pub fn from_scores(scores: &AttributeScores) -> Self {
        let mut pools = [StonePool::default(); Attribute::COUNT];
        for attribute in Attribute::ALL {
            pools[attribute as usize] = StonePool::full(scores.pool_max(attribute));
        }
        Self { pools }
    }

    pub fn get(&self, attribute: Attribute) -> &StonePool {
        &self.pools[attribute as usize]
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut StonePool {
        &mut self.pools[attribute as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &StonePool)> {
        Attribute::ALL
            .iter()
            .map(move |&attribute| (attribute, self.get(attribute)))
    }

    /// True when no pool can hold another stone.
    pub fn all_at_cap(&self) -> bool {
        self.iter().all(|(_, pool)| pool.at_cap())
    }

    /// Restores every pool to its effective capacity.
    pub fn restore_all(&mut self) {
        for pool in &mut self.pools {
            pool.restore();
        }
    }
}

/// Key of one activation counter: a power charged against a specific pool
/// during a specific turn.
///
/// Generic powers charged against different pools escalate independently,
/// which is why the attribute is part of the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageKey {
    pub attribute: Attribute,
    pub power: StonePower,
    pub round: u32,
    pub turn: u32,
}

/// Per-combatant activation counters, reset every turn.
///
/// Counters are never decremented; stale entries are removed wholesale at
/// turn boundaries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoneUsage {
    entries: Vec<(UsageKey, u32)>,
}

impl StoneUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, key: &UsageKey) -> u32 {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn increment(&mut self, key: UsageKey) {
        if let Some((_, count)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *count += 1;
        } else {
            self.entries.push((key, 1));
        }
    }

    /// Drops every entry from before `(round, turn)`: earlier rounds
    /// entirely, and earlier turns of the current round.
    pub fn purge_before(&mut self, round: u32, turn: u32) {
        self.entries
            .retain(|(k, _)| k.round == round && k.turn >= turn);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
