//! Death-save bookkeeping for an incapacitated combatant.

use crate::config::RulesConfig;

/// Accumulated death-save progress for one combatant.
///
/// `stabilized` and `dead` are mutually exclusive terminal flags. A dead
/// record is locked: no method mutates it further. A stabilized record can
/// still pick up death marks from damage, which also destabilizes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathSaveRecord {
    pub successes: u8,
    pub death_marks: u8,
    pub stabilized: bool,
    pub dead: bool,
}

impl DeathSaveRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Either terminal flag set.
    pub fn is_terminal(&self) -> bool {
        self.stabilized || self.dead
    }

    /// Records one successful save. At three successes the record becomes
    /// stabilized. Returns true when this call stabilized it.
    pub fn record_success(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.successes = (self.successes + 1).min(RulesConfig::SAVE_SUCCESS_LIMIT);
        if self.successes >= RulesConfig::SAVE_SUCCESS_LIMIT {
            self.stabilized = true;
            return true;
        }
        false
    }

    /// Adds death marks, capped at the limit, then checks for death against
    /// the capped value. Returns true when this call killed the combatant.
    ///
    /// Damage destabilizes: the stabilized flag drops, successes are kept.
    pub fn add_marks(&mut self, marks: u8) -> bool {
        if self.dead {
            return false;
        }
        if self.stabilized {
            self.stabilized = false;
        }
        self.death_marks = (self.death_marks + marks).min(RulesConfig::DEATH_MARK_LIMIT);
        if self.death_marks >= RulesConfig::DEATH_MARK_LIMIT {
            self.dead = true;
            return true;
        }
        false
    }

    /// Removes death marks (healing). No effect on a dead record.
    pub fn remove_marks(&mut self, marks: u8) {
        if self.dead {
            return;
        }
        self.death_marks = self.death_marks.saturating_sub(marks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_successes_stabilize() {
        let mut record = DeathSaveRecord::new();
        assert!(!record.record_success());
        assert!(!record.record_success());
        assert!(record.record_success());
        assert!(record.stabilized);

        // Terminal: further successes change nothing.
        assert!(!record.record_success());
        assert_eq!(record.successes, 3);
    }

    #[test]
    fn marks_cap_then_kill() {
        let mut record = DeathSaveRecord {
            successes: 2,
            death_marks: 1,
            stabilized: false,
            dead: false,
        };

        // Critical hit while down: two marks at once, capped at three.
        assert!(record.add_marks(2));
        assert_eq!(record.death_marks, 3);
        assert!(record.dead);
    }

    #[test]
    fn dead_records_are_locked() {
        let mut record = DeathSaveRecord {
            dead: true,
            death_marks: 3,
            ..DeathSaveRecord::default()
        };

        record.remove_marks(2);
        assert!(!record.add_marks(1));
        assert!(!record.record_success());

        assert_eq!(record.death_marks, 3);
        assert!(record.dead);
        assert_eq!(record.successes, 0);
    }

    #[test]
    fn damage_destabilizes_but_keeps_successes() {
        let mut record = DeathSaveRecord {
            successes: 3,
            stabilized: true,
            ..DeathSaveRecord::default()
        };

        assert!(!record.add_marks(1));
        assert!(!record.stabilized);
        assert_eq!(record.successes, 3);
        assert_eq!(record.death_marks, 1);
    }
}
