//! Traits describing the engine's external collaborators.
//!
//! The engine is a pure function of its inputs plus these collaborators:
//! a document store for persisted records, an oracle for sheet data, and a
//! deterministic RNG. The [`CombatEnv`] aggregate bundles them so every
//! operation takes one environment parameter instead of three.
mod profile;
mod rng;
mod store;

pub use profile::CombatantOracle;
pub use rng::{compute_seed, draw_seed, roll_context, RngOracle};
pub use store::{CombatStore, StoreError};

/// Aggregates the collaborators required by engine operations.
///
/// Round and turn numbers are NOT part of the environment: they are
/// threaded explicitly into each call so operations stay pure with respect
/// to ambient session state.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub store: &'a dyn CombatStore,
    pub oracle: &'a dyn CombatantOracle,
    pub rng: &'a dyn RngOracle,
    /// Combat-wide seed fixed at combat start; all roll seeds derive from it.
    pub combat_seed: u64,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        store: &'a dyn CombatStore,
        oracle: &'a dyn CombatantOracle,
        rng: &'a dyn RngOracle,
        combat_seed: u64,
    ) -> Self {
        Self {
            store,
            oracle,
            rng,
            combat_seed,
        }
    }
}
