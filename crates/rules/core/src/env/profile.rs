//! Read-only oracle for combatant sheets.

use crate::state::{CombatantId, CombatantProfile};

/// Resolves a combatant's sheet data: control, mastery rank, attribute
/// scores, shop purchases, and the current incapacitation flag.
///
/// The oracle is a live view; `incapacitated` in particular follows the
/// host's health tiers between calls.
pub trait CombatantOracle: Send + Sync {
    fn profile(&self, id: CombatantId) -> Option<CombatantProfile>;
}
