//! Shared test fixtures: an in-memory store, a fixed oracle, and scripted
//! RNG oracles.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::env::{CombatantOracle, CombatStore, RngOracle, StoreError};
use crate::state::{CombatantId, CombatantProfile, DeathSaveRecord, RoundState, StonePools, StoneUsage};

#[derive(Default)]
struct Doc {
    round_state: Option<RoundState>,
    pools: Option<StonePools>,
    usage: StoneUsage,
    death: Option<DeathSaveRecord>,
}

/// Minimal in-memory document store for engine tests.
#[derive(Default)]
pub struct MemStore {
    docs: Mutex<HashMap<CombatantId, Doc>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CombatStore for MemStore {
    fn load_round_state(&self, id: CombatantId) -> Result<Option<RoundState>, StoreError> {
        let docs = self.docs.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.get(&id).and_then(|doc| doc.round_state))
    }

    fn save_round_state(&self, id: CombatantId, state: &RoundState) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| StoreError::LockPoisoned)?;
        docs.entry(id).or_default().round_state = Some(*state);
        Ok(())
    }

    fn load_pools(&self, id: CombatantId) -> Result<Option<StonePools>, StoreError> {
        let docs = self.docs.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.get(&id).and_then(|doc| doc.pools))
    }

    fn save_pools(&self, id: CombatantId, pools: &StonePools) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| StoreError::LockPoisoned)?;
        docs.entry(id).or_default().pools = Some(*pools);
        Ok(())
    }

    fn load_usage(&self, id: CombatantId) -> Result<StoneUsage, StoreError> {
        let docs = self.docs.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.get(&id).map(|doc| doc.usage.clone()).unwrap_or_default())
    }

    fn save_usage(&self, id: CombatantId, usage: &StoneUsage) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| StoreError::LockPoisoned)?;
        docs.entry(id).or_default().usage = usage.clone();
        Ok(())
    }

    fn load_death_record(&self, id: CombatantId) -> Result<Option<DeathSaveRecord>, StoreError> {
        let docs = self.docs.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(docs.get(&id).and_then(|doc| doc.death))
    }

    fn save_death_record(
        &self,
        id: CombatantId,
        record: &DeathSaveRecord,
    ) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| StoreError::LockPoisoned)?;
        docs.entry(id).or_default().death = Some(*record);
        Ok(())
    }

    fn clear_death_record(&self, id: CombatantId) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(doc) = docs.get_mut(&id) {
            doc.death = None;
        }
        Ok(())
    }
}

/// Oracle over a fixed set of profiles. Profiles can be swapped mid-test
/// (e.g. to flip the incapacitation flag).
#[derive(Default)]
pub struct FixedOracle {
    profiles: Mutex<HashMap<CombatantId, CombatantProfile>>,
}

impl FixedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: CombatantId, profile: CombatantProfile) {
        self.profiles.lock().unwrap().insert(id, profile);
    }

    pub fn set_incapacitated(&self, id: CombatantId, incapacitated: bool) {
        if let Some(profile) = self.profiles.lock().unwrap().get_mut(&id) {
            profile.incapacitated = incapacitated;
        }
    }
}

impl CombatantOracle for FixedOracle {
    fn profile(&self, id: CombatantId) -> Option<CombatantProfile> {
        self.profiles.lock().unwrap().get(&id).copied()
    }
}

/// RNG oracle that replays a scripted sequence of die faces, ignoring seeds.
pub struct ScriptedRng {
    faces: Mutex<Vec<u32>>,
}

impl ScriptedRng {
    pub fn new(faces: &[u32]) -> Self {
        let mut faces: Vec<u32> = faces.to_vec();
        faces.reverse();
        Self {
            faces: Mutex::new(faces),
        }
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        // roll_die is overridden; next_u32 should never be consulted.
        unreachable!("scripted oracle only serves roll_die")
    }

    fn roll_die(&self, _seed: u64, _faces: u32) -> u32 {
        self.faces.lock().unwrap().pop().expect("script exhausted")
    }
}
