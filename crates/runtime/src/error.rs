//! Error type surfaced by the session driver.

use rules_core::{DeathError, EconomyError, LifecycleError, StonesError, StoreError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Economy(#[from] EconomyError),

    #[error(transparent)]
    Stones(#[from] StonesError),

    #[error(transparent)]
    Death(#[from] DeathError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("combat has not been started")]
    NotStarted,

    #[error("combat has already ended")]
    AlreadyEnded,
}
