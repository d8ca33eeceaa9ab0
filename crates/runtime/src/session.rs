//! Session driver: owns the live combat and orders engine calls.
//!
//! The session is the single writer. It owns the store, the roster, and the
//! round/turn cursor, translates host calls into engine operations, and
//! broadcasts one event per state change. The engine itself stays
//! synchronous; the only await point is the regeneration prompt.

use tokio::sync::broadcast;
use tracing::{debug, info};

use rules_core::{
    death, economy, lifecycle, stones, ActionKind, ActivationOutcome, Attribute, CombatEnv,
    CombatantId, CombatantProfile, DeathSaveRecord, HealOutcome, RoundState, SaveOutcome,
    SpendOutcome, StonePools, StonePower,
};

use crate::error::{Result, RuntimeError};
use crate::events::CombatEvent;
use crate::oracle::RosterOracle;
use crate::prompt::RegenPrompt;
use crate::rng::SessionRng;
use crate::store::MemoryStore;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Staging,
    Running,
    Ended,
}

/// A live combat over an in-memory store.
pub struct CombatSession {
    store: MemoryStore,
    oracle: RosterOracle,
    rng: SessionRng,
    prompt: Box<dyn RegenPrompt>,
    roster: Vec<CombatantId>,
    combat_seed: u64,
    round: u32,
    turn: u32,
    phase: Phase,
    events: broadcast::Sender<CombatEvent>,
}

impl CombatSession {
    pub fn new(combat_seed: u64, prompt: Box<dyn RegenPrompt>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store: MemoryStore::new(),
            oracle: RosterOracle::new(),
            rng: SessionRng::new(),
            prompt,
            roster: Vec::new(),
            combat_seed,
            round: 0,
            turn: 0,
            phase: Phase::Staging,
            events,
        }
    }

    /// Subscribes an observer to the event stream. Late subscribers miss
    /// earlier events; laggards drop the oldest.
    pub fn subscribe(&self) -> broadcast::Receiver<CombatEvent> {
        self.events.subscribe()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn roster(&self) -> &[CombatantId] {
        &self.roster
    }

    /// Roster access for mid-combat sheet updates (incapacitation, shop).
    pub fn oracle(&self) -> &RosterOracle {
        &self.oracle
    }

    /// Adds a combatant. Only meaningful before [`begin`](Self::begin).
    pub fn register(&mut self, id: CombatantId, profile: CombatantProfile) {
        self.oracle.insert(id, profile);
        if !self.roster.contains(&id) {
            self.roster.push(id);
        }
    }

    fn env(&self) -> CombatEnv<'_> {
        CombatEnv::new(&self.store, &self.oracle, &self.rng, self.combat_seed)
    }

    fn ensure_running(&self) -> Result<()> {
        match self.phase {
            Phase::Staging => Err(RuntimeError::NotStarted),
            Phase::Ended => Err(RuntimeError::AlreadyEnded),
            Phase::Running => Ok(()),
        }
    }

    fn emit(&self, event: CombatEvent) {
        // No subscribers is fine; events are best-effort.
        let _ = self.events.send(event);
    }

    /// Starts combat: round 1, fresh budgets, shop bonuses applied.
    pub fn begin(&mut self) -> Result<()> {
        if self.phase != Phase::Staging {
            return Err(RuntimeError::AlreadyEnded);
        }

        lifecycle::combat_started(&self.env(), &self.roster)?;
        self.round = 1;
        self.turn = 1;
        self.phase = Phase::Running;

        info!(roster = self.roster.len(), seed = self.combat_seed, "combat started");
        self.emit(CombatEvent::CombatStarted {
            roster: self.roster.clone(),
            combat_seed: self.combat_seed,
        });
        self.emit(CombatEvent::RoundStarted { round: 1 });
        Ok(())
    }

    /// Advances to the next round: budgets replaced wholesale, shop
    /// re-applied, and each eligible player prompted for regeneration.
    pub async fn advance_round(&mut self) -> Result<u32> {
        self.ensure_running()?;

        let round = self.round + 1;
        let sessions = lifecycle::round_changed(&self.env(), &self.roster, round)?;
        self.round = round;
        self.turn = 1;

        info!(round, pending_regen = sessions.len(), "round started");
        self.emit(CombatEvent::RoundStarted { round });

        for session in sessions {
            let Some(allocation) = self.prompt.allocate(&session).await else {
                debug!(combatant = %session.combatant, "regeneration skipped");
                continue;
            };
            let outcome = stones::commit_regen(&self.env(), &session, &allocation)?;
            debug!(combatant = %session.combatant, ?outcome, "regeneration committed");
            self.emit(CombatEvent::StonesRegenerated {
                combatant: session.combatant,
                outcome,
            });
        }

        Ok(round)
    }

    /// Starts `id`'s turn: turn-scoped resets, and a death save if they are
    /// down.
    pub fn advance_turn(&mut self, id: CombatantId) -> Result<Option<SaveOutcome>> {
        self.ensure_running()?;

        self.turn += 1;
        let save = lifecycle::turn_changed(&self.env(), id, self.round, self.turn)?;

        debug!(combatant = %id, round = self.round, turn = self.turn, "turn started");
        self.emit(CombatEvent::TurnStarted {
            combatant: id,
            round: self.round,
            turn: self.turn,
        });
        if let Some(outcome) = &save {
            self.emit(CombatEvent::DeathSave {
                combatant: id,
                outcome: outcome.clone(),
            });
        }
        Ok(save)
    }

    /// Spends one action of `kind` from `id`'s budget.
    pub fn spend(&self, id: CombatantId, kind: ActionKind) -> Result<SpendOutcome> {
        self.ensure_running()?;

        let outcome = economy::spend(&self.env(), id, self.round, self.turn, kind)?;
        debug!(combatant = %id, %kind, granted = outcome.succeeded(), "action spend");
        self.emit(CombatEvent::ActionSpent {
            combatant: id,
            kind,
            outcome,
        });
        Ok(outcome)
    }

    /// Activates a stone power against `attribute`'s pool.
    pub fn activate(
        &self,
        id: CombatantId,
        attribute: Attribute,
        power: StonePower,
    ) -> Result<ActivationOutcome> {
        self.ensure_running()?;

        let outcome = stones::activate(&self.env(), id, attribute, power, self.round, self.turn)?;
        debug!(combatant = %id, %power, granted = outcome.activated(), "stone activation");
        self.emit(CombatEvent::StoneActivation {
            combatant: id,
            attribute,
            power,
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    /// Reports damage dealt to an incapacitated combatant.
    pub fn damage_while_down(
        &self,
        id: CombatantId,
        critical: bool,
    ) -> Result<DeathSaveRecord> {
        self.ensure_running()?;

        let record = death::damage_while_down(&self.env(), id, critical)?;
        self.emit(CombatEvent::DamageWhileDown {
            combatant: id,
            critical,
            death_marks: record.death_marks,
        });
        Ok(record)
    }

    /// Reports healing received by a combatant with a death-save record.
    pub fn apply_healing(&self, id: CombatantId, healing: u32) -> Result<HealOutcome> {
        self.ensure_running()?;

        let outcome = death::apply_healing(&self.env(), id, healing)?;
        self.emit(CombatEvent::HealingApplied {
            combatant: id,
            healing,
            outcome,
        });
        Ok(outcome)
    }

    /// Reads `id`'s current round state without mutating it.
    pub fn round_state(&self, id: CombatantId) -> Result<RoundState> {
        self.ensure_running()?;
        Ok(economy::round_state(&self.env(), id, self.round, self.turn)?)
    }

    /// Reads `id`'s stone pools, deriving them from scores when the store
    /// has none yet.
    pub fn stone_pools(&self, id: CombatantId) -> Result<StonePools> {
        let env = self.env();
        if let Some(pools) = env.store.load_pools(id)? {
            return Ok(pools);
        }
        let profile = env
            .oracle
            .profile(id)
            .ok_or(rules_core::EconomyError::UnknownCombatant(id))
            .map_err(RuntimeError::Economy)?;
        Ok(StonePools::from_scores(&profile.scores))
    }

    /// Ends combat and restores every stone pool to its effective cap.
    pub fn end(&mut self) -> Result<()> {
        self.ensure_running()?;

        lifecycle::combat_ended(&self.env(), &self.roster)?;
        self.phase = Phase::Ended;

        info!(rounds = self.round, "combat ended");
        self.emit(CombatEvent::CombatEnded);
        Ok(())
    }
}
