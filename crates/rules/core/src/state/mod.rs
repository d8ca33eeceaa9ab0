//! Typed records the engine persists through the document store.
//!
//! Each record has a single owner (one combatant) and a narrow lifecycle;
//! the engine mutates them only through the operations in `economy`,
//! `stones`, `death`, and `lifecycle`.
mod combatant;
mod death;
mod round;
mod stones;

pub use combatant::{AttributeScores, CombatantId, CombatantProfile, ShopPurchases};
pub use death::DeathSaveRecord;
pub use round::{ActionBudget, ActionKind, RoundState, StoneBonuses};
pub use stones::{Attribute, StonePool, StonePools, StoneUsage, UsageKey};
