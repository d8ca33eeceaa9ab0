//! The stone economy: per-attribute pools, the power catalog, activation
//! with exponentially escalating costs, and regeneration.
mod activation;
mod powers;
mod regen;

pub use activation::{activate, activation_cost, ActivationOutcome, RefusalReason};
pub use powers::{EffectError, PowerAttunement, PowerCategory, StonePower};
pub use regen::{
    begin_regen, commit_regen, restore_all, RegenAllocation, RegenOutcome, RegenSession,
};

use crate::economy::EconomyError;
use crate::env::StoreError;
use crate::state::CombatantId;

/// Errors surfaced by stone operations. Refusals are not here; they are
/// [`ActivationOutcome`] / [`RegenOutcome`] values.
#[derive(Debug, thiserror::Error)]
pub enum StonesError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown {0}")]
    UnknownCombatant(CombatantId),
}

impl From<EconomyError> for StonesError {
    fn from(err: EconomyError) -> Self {
        match err {
            EconomyError::Store(e) => StonesError::Store(e),
            EconomyError::UnknownCombatant(id) => StonesError::UnknownCombatant(id),
        }
    }
}
