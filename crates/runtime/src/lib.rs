//! Async host runtime over the combat rules engine.
//!
//! `runtime` supplies everything the pure engine leaves to its environment:
//! an in-memory document store, a mutable roster oracle, a deterministic
//! ChaCha-backed RNG, an async prompting seam for regeneration, and the
//! [`CombatSession`] driver that sequences engine calls and broadcasts
//! [`CombatEvent`]s to observers.
pub mod error;
pub mod events;
pub mod oracle;
pub mod prompt;
pub mod rng;
pub mod session;
pub mod store;

pub use error::{Result, RuntimeError};
pub use events::CombatEvent;
pub use oracle::RosterOracle;
pub use prompt::{EvenSplitPrompt, RegenPrompt, SkipRegenPrompt};
pub use rng::SessionRng;
pub use session::CombatSession;
pub use store::MemoryStore;
