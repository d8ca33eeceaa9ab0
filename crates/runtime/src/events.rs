//! Combat events broadcast to observers.
//!
//! Every state-changing session operation publishes one event. Observers
//! (UI, logs, recaps) subscribe through the session's broadcast channel and
//! may join or lag freely; the session never blocks on them.

use serde::Serialize;

use rules_core::{
    ActionKind, ActivationOutcome, Attribute, CombatantId, HealOutcome, RegenOutcome, SaveOutcome,
    SpendOutcome, StonePower,
};

#[derive(Clone, Debug, Serialize)]
pub enum CombatEvent {
    CombatStarted {
        roster: Vec<CombatantId>,
        combat_seed: u64,
    },
    RoundStarted {
        round: u32,
    },
    TurnStarted {
        combatant: CombatantId,
        round: u32,
        turn: u32,
    },
    ActionSpent {
        combatant: CombatantId,
        kind: ActionKind,
        outcome: SpendOutcome,
    },
    StoneActivation {
        combatant: CombatantId,
        attribute: Attribute,
        power: StonePower,
        outcome: ActivationOutcome,
    },
    StonesRegenerated {
        combatant: CombatantId,
        outcome: RegenOutcome,
    },
    DeathSave {
        combatant: CombatantId,
        outcome: SaveOutcome,
    },
    DamageWhileDown {
        combatant: CombatantId,
        critical: bool,
        death_marks: u8,
    },
    HealingApplied {
        combatant: CombatantId,
        healing: u32,
        outcome: HealOutcome,
    },
    CombatEnded,
}
