//! Live roster oracle backed by host-updated profiles.

use std::collections::HashMap;
use std::sync::RwLock;

use rules_core::{CombatantId, CombatantOracle, CombatantProfile, ShopPurchases};

/// [`CombatantOracle`] over a mutable roster.
///
/// The host updates profiles as sheets change mid-combat, most notably
/// the incapacitation flag, which follows the health tiers.
#[derive(Default)]
pub struct RosterOracle {
    profiles: RwLock<HashMap<CombatantId, CombatantProfile>>,
}

impl RosterOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: CombatantId, profile: CombatantProfile) {
        if let Ok(mut profiles) = self.profiles.write() {
            profiles.insert(id, profile);
        }
    }

    pub fn set_incapacitated(&self, id: CombatantId, incapacitated: bool) {
        if let Ok(mut profiles) = self.profiles.write() {
            if let Some(profile) = profiles.get_mut(&id) {
                profile.incapacitated = incapacitated;
            }
        }
    }

    pub fn set_shop(&self, id: CombatantId, shop: ShopPurchases) {
        if let Ok(mut profiles) = self.profiles.write() {
            if let Some(profile) = profiles.get_mut(&id) {
                profile.shop = shop;
            }
        }
    }
}

impl CombatantOracle for RosterOracle {
    fn profile(&self, id: CombatantId) -> Option<CombatantProfile> {
        self.profiles.read().ok()?.get(&id).copied()
    }
}
