//! Deterministic combat rules shared across hosts.
//!
//! `rules-core` defines the canonical combat mechanics (roll-and-keep
//! dice, per-round action budgets, the stone economy, death saves, and the
//! lifecycle glue across round and turn boundaries) and exposes pure APIs
//! over a small set of collaborator traits ([`env`]). All persisted records
//! live in [`state`]; hosts mutate them only through the operations here.
pub mod config;
pub mod death;
pub mod dice;
pub mod economy;
pub mod env;
pub mod lifecycle;
pub mod state;
pub mod stones;

#[cfg(test)]
pub(crate) mod testkit;

pub use config::RulesConfig;
pub use death::{DeathError, HealOutcome, SaveOutcome, SaveResult};
pub use dice::RollResult;
pub use economy::{EconomyError, SpendOutcome};
pub use env::{
    compute_seed, roll_context, CombatantOracle, CombatEnv, CombatStore, RngOracle, StoreError,
};
pub use lifecycle::LifecycleError;
pub use state::{
    ActionBudget, ActionKind, Attribute, AttributeScores, CombatantId, CombatantProfile,
    DeathSaveRecord, RoundState, ShopPurchases, StoneBonuses, StonePool, StonePools, StoneUsage,
    UsageKey,
};
pub use stones::{
    ActivationOutcome, EffectError, PowerAttunement, PowerCategory, RefusalReason,
    RegenAllocation, RegenOutcome, RegenSession, StonePower, StonesError,
};
