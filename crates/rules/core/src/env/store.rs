//! Narrow repository interface over the host's key/value document store.
//!
//! The engine reads and writes four logical records per combatant and does
//! not define the storage format. Get/set with last-write-wins visibility
//! and no torn reads is all it requires.

use crate::state::{CombatantId, DeathSaveRecord, RoundState, StonePools, StoneUsage};

/// Errors surfaced by a document store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Persistence collaborator for per-combatant combat records.
///
/// Implementations must make each method atomic from the engine's point of
/// view; the engine keeps its read-modify-write windows short and never
/// holds partially mutated records across a suspension point.
pub trait CombatStore: Send + Sync {
    fn load_round_state(&self, id: CombatantId) -> Result<Option<RoundState>, StoreError>;
    fn save_round_state(&self, id: CombatantId, state: &RoundState) -> Result<(), StoreError>;

    fn load_pools(&self, id: CombatantId) -> Result<Option<StonePools>, StoreError>;
    fn save_pools(&self, id: CombatantId, pools: &StonePools) -> Result<(), StoreError>;

    /// Missing usage records read as empty.
    fn load_usage(&self, id: CombatantId) -> Result<StoneUsage, StoreError>;
    fn save_usage(&self, id: CombatantId, usage: &StoneUsage) -> Result<(), StoreError>;

    fn load_death_record(&self, id: CombatantId) -> Result<Option<DeathSaveRecord>, StoreError>;
    fn save_death_record(
        &self,
        id: CombatantId,
        record: &DeathSaveRecord,
    ) -> Result<(), StoreError>;
    fn clear_death_record(&self, id: CombatantId) -> Result<(), StoreError>;
}
