//! Prompting seam for end-of-round regeneration decisions.

use async_trait::async_trait;

use rules_core::{Attribute, RegenAllocation, RegenSession};

/// Asks the player how to distribute their regeneration points.
///
/// Implementations can take as long as they need; the engine holds no
/// partial state while the prompt is open. Returning `None` skips the
/// combatant's regeneration for this round.
#[async_trait]
pub trait RegenPrompt: Send + Sync {
    async fn allocate(&self, session: &RegenSession) -> Option<RegenAllocation>;
}

/// Distributes points round-robin across pools with headroom.
///
/// Useful as a default for unattended sessions and tests; a real table
/// replaces this with a UI-backed prompt.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvenSplitPrompt;

#[async_trait]
impl RegenPrompt for EvenSplitPrompt {
    async fn allocate(&self, session: &RegenSession) -> Option<RegenAllocation> {
        let mut headroom = [0u32; Attribute::COUNT];
        for (i, attribute) in Attribute::ALL.into_iter().enumerate() {
            let pool = session.pools.get(attribute);
            headroom[i] = pool.cap().saturating_sub(pool.current);
        }

        let mut amounts = [0u32; Attribute::COUNT];
        let mut left = session.points;
        while left > 0 {
            let mut placed = false;
            for i in 0..Attribute::COUNT {
                if left == 0 {
                    break;
                }
                if amounts[i] < headroom[i] {
                    amounts[i] += 1;
                    left -= 1;
                    placed = true;
                }
            }
            if !placed {
                break;
            }
        }

        let mut allocation = RegenAllocation::new();
        for (i, attribute) in Attribute::ALL.into_iter().enumerate() {
            allocation = allocation.with(attribute, amounts[i]);
        }
        Some(allocation)
    }
}

/// Never allocates anything. Pools stay where they are.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkipRegenPrompt;

#[async_trait]
impl RegenPrompt for SkipRegenPrompt {
    async fn allocate(&self, _session: &RegenSession) -> Option<RegenAllocation> {
        None
    }
}
