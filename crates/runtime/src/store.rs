//! In-memory document store for tests and local sessions.
//!
//! Records are kept as JSON documents keyed by combatant and record name,
//! matching the get/set, last-write-wins semantics the engine assumes of
//! the host's document store.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use rules_core::{
    CombatantId, CombatStore, DeathSaveRecord, RoundState, StonePools, StoneUsage, StoreError,
};

const ROUND_STATE: &str = "round-state";
const POOLS: &str = "stone-pools";
const USAGE: &str = "stone-usage";
const DEATH: &str = "death-record";

/// Current schema of the pools document. Version 1 stored a single
/// aggregate pool; it is migrated (dropped, pools rebuilt from scores on
/// next use) once at load time rather than branched on in read paths.
const POOLS_VERSION: u32 = 2;

#[derive(Serialize, Deserialize)]
struct PoolsDoc {
    version: u32,
    pools: StonePools,
}

/// In-memory implementation of [`CombatStore`].
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<CombatantId, HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get<T: DeserializeOwned>(&self, id: CombatantId, key: &str) -> Result<Option<T>, StoreError> {
        let docs = self.docs.read().map_err(|_| StoreError::LockPoisoned)?;
        match docs.get(&id).and_then(|records| records.get(key)) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| StoreError::Backend(e.to_string())),
            None => Ok(None),
        }
    }

    fn put<T: Serialize>(&self, id: CombatantId, key: &str, record: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(record).map_err(|e| StoreError::Backend(e.to_string()))?;
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;
        docs.entry(id).or_default().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, id: CombatantId, key: &str) -> Result<(), StoreError> {
        let mut docs = self.docs.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(records) = docs.get_mut(&id) {
            records.remove(key);
        }
        Ok(())
    }

    /// Seeds a raw pools document, as a pre-migration host would have
    /// written it. Test helper.
    pub fn seed_raw_pools(&self, id: CombatantId, value: Value) {
        let mut docs = self.docs.write().expect("store lock");
        docs.entry(id).or_default().insert(POOLS.to_owned(), value);
    }
}

impl CombatStore for MemoryStore {
    fn load_round_state(&self, id: CombatantId) -> Result<Option<RoundState>, StoreError> {
        self.get(id, ROUND_STATE)
    }

    fn save_round_state(&self, id: CombatantId, state: &RoundState) -> Result<(), StoreError> {
        self.put(id, ROUND_STATE, state)
    }

    fn load_pools(&self, id: CombatantId) -> Result<Option<StonePools>, StoreError> {
        let docs = self.docs.read().map_err(|_| StoreError::LockPoisoned)?;
        let Some(value) = docs.get(&id).and_then(|records| records.get(POOLS)).cloned() else {
            return Ok(None);
        };
        drop(docs);

        match serde_json::from_value::<PoolsDoc>(value) {
            Ok(doc) if doc.version == POOLS_VERSION => Ok(Some(doc.pools)),
            // Legacy aggregate document: migrate by dropping it so the
            // engine rebuilds typed pools from attribute scores.
            _ => {
                tracing::debug!(%id, "migrating legacy stone-pool document");
                self.remove(id, POOLS)?;
                Ok(None)
            }
        }
    }

    fn save_pools(&self, id: CombatantId, pools: &StonePools) -> Result<(), StoreError> {
        self.put(
            id,
            POOLS,
            &PoolsDoc {
                version: POOLS_VERSION,
                pools: *pools,
            },
        )
    }

    fn load_usage(&self, id: CombatantId) -> Result<StoneUsage, StoreError> {
        Ok(self.get(id, USAGE)?.unwrap_or_default())
    }

    fn save_usage(&self, id: CombatantId, usage: &StoneUsage) -> Result<(), StoreError> {
        self.put(id, USAGE, usage)
    }

    fn load_death_record(&self, id: CombatantId) -> Result<Option<DeathSaveRecord>, StoreError> {
        self.get(id, DEATH)
    }

    fn save_death_record(
        &self,
        id: CombatantId,
        record: &DeathSaveRecord,
    ) -> Result<(), StoreError> {
        self.put(id, DEATH, record)
    }

    fn clear_death_record(&self, id: CombatantId) -> Result<(), StoreError> {
        self.remove(id, DEATH)
    }
}
