/// Ruleset constants and sanity caps.
///
/// Every number the ruleset fixes lives here so the rest of the engine never
/// hard-codes a face count or threshold inline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RulesConfig;

impl RulesConfig {
    // ===== dice =====
    /// Face count of the ruleset die. Dice explode on the maximum face.
    pub const DIE_FACES: u32 = 8;
    /// Target-number margin that buys one raise.
    pub const RAISE_INCREMENT: i32 = 4;

    // ===== action economy =====
    /// Default per-round budget for each action kind (movement/attack/reaction).
    pub const DEFAULT_BUDGET: u32 = 1;
    /// Distance granted per purchased movement increment from the initiative shop.
    pub const SHOP_MOVE_METERS: u32 = 2;

    // ===== stones =====
    /// Attribute score points per stone of pool capacity.
    pub const POOL_DIVISOR: u32 = 8;

    // ===== death saves =====
    /// Target number for a death save roll.
    pub const DEATH_SAVE_TARGET: i32 = 20;
    /// Successes needed to stabilize.
    pub const SAVE_SUCCESS_LIMIT: u8 = 3;
    /// Death marks that kill.
    pub const DEATH_MARK_LIMIT: u8 = 3;
    /// Healing points that remove one death mark.
    pub const HEALING_PER_MARK: u32 = 3;

    // ===== sanity caps =====
    /// Upper bound on any single action budget's total within one round.
    /// Power effects refuse to push a budget past this.
    pub const MAX_BUDGET_PER_KIND: u32 = 8;
    /// Upper bound on any single stone-bonus accumulator within one round.
    pub const MAX_BONUS_STACK: u32 = 16;
}
