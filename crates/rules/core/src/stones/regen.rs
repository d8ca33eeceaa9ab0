//! End-of-round stone regeneration and combat-end restoration.
//!
//! Regeneration is a two-step protocol so the engine never holds partially
//! mutated state while a human decides: `begin_regen` snapshots the pools
//! and computes the points, the host prompts, and `commit_regen` re-loads
//! and re-validates the caps before applying the allocation.

use crate::env::CombatEnv;
use crate::state::{Attribute, CombatantId, StonePools};
use crate::stones::StonesError;

/// A pending regeneration decision for one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenSession {
    pub combatant: CombatantId,
    /// Points to distribute, equal to the combatant's mastery rank.
    pub points: u32,
    /// Pool snapshot taken when the session was opened. Presentation only;
    /// the commit re-reads the live pools.
    pub pools: StonePools,
}

/// How the player distributed their regeneration points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenAllocation {
    amounts: [u32; Attribute::COUNT],
}

impl RegenAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attribute: Attribute, amount: u32) -> Self {
        self.amounts[attribute as usize] = amount;
        self
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        self.amounts[attribute as usize]
    }

    pub fn total(&self) -> u32 {
        self.amounts.iter().sum()
    }
}

/// Outcome of a regeneration commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegenOutcome {
    /// Allocation applied; `gained` stones actually entered pools (cap
    /// clamping can make this less than the allocation).
    Applied { pools: StonePools, gained: u32 },
    /// The allocation asked for more than the available points. Nothing
    /// was written.
    OverAllocated { requested: u32, points: u32 },
}

/// Opens a regeneration session for a player-controlled combatant.
///
/// Returns `None` (no prompt at all) for non-player combatants, zero
/// mastery rank, or when every pool is already at its effective cap.
pub fn begin_regen(
    env: &CombatEnv<'_>,
    id: CombatantId,
) -> Result<Option<RegenSession>, StonesError> {
    let profile = env
        .oracle
        .profile(id)
        .ok_or(StonesError::UnknownCombatant(id))?;

    if !profile.player_controlled || profile.mastery_rank == 0 {
        return Ok(None);
    }

    let pools = env
        .store
        .load_pools(id)?
        .unwrap_or_else(|| StonePools::from_scores(&profile.scores));

    if pools.all_at_cap() {
        return Ok(None);
    }

    Ok(Some(RegenSession {
        combatant: id,
        points: profile.mastery_rank,
        pools,
    }))
}

/// Applies a regeneration allocation.
///
/// The pools are re-loaded and each gain is clamped against the live cap,
/// tolerating state that changed while the prompt was open.
pub fn commit_regen(
    env: &CombatEnv<'_>,
    session: &RegenSession,
    allocation: &RegenAllocation,
) -> Result<RegenOutcome, StonesError> {
    let requested = allocation.total();
    if requested > session.points {
        return Ok(RegenOutcome::OverAllocated {
            requested,
            points: session.points,
        });
    }

    let id = session.combatant;
    let profile = env
        .oracle
        .profile(id)
        .ok_or(StonesError::UnknownCombatant(id))?;

    let mut pools = env
        .store
        .load_pools(id)?
        .unwrap_or_else(|| StonePools::from_scores(&profile.scores));

    let mut gained = 0;
    for attribute in Attribute::ALL {
        gained += pools.get_mut(attribute).gain(allocation.get(attribute));
    }

    env.store.save_pools(id, &pools)?;
    Ok(RegenOutcome::Applied { pools, gained })
}

/// Combat-end restoration: every pool straight to `max - sustained`,
/// bypassing point allocation.
pub fn restore_all(env: &CombatEnv<'_>, id: CombatantId) -> Result<StonePools, StonesError> {
    let profile = env
        .oracle
        .profile(id)
        .ok_or(StonesError::UnknownCombatant(id))?;

    let mut pools = env
        .store
        .load_pools(id)?
        .unwrap_or_else(|| StonePools::from_scores(&profile.scores));

    pools.restore_all();
    env.store.save_pools(id, &pools)?;
    Ok(pools)
}
