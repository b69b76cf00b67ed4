use core::fmt;

use super::state::GamePhase;

/// Failures surfaced by pools, the spawner and the state machine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// Handle is stale or belongs to another pool
    NotFound { index: u32, generation: u32 },
    /// Node allocation failed or the pool's slot limit was reached
    OutOfMemory { live: usize, limit: usize },
    /// Operation is not allowed in the current phase
    InvalidState {
        phase: GamePhase,
        operation: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { index, generation } => {
                write!(f, "no live node at slot {index} (generation {generation})")
            }
            Self::OutOfMemory { live, limit } => {
                write!(f, "out of node memory ({live} live, limit {limit})")
            }
            Self::InvalidState { phase, operation } => {
                write!(f, "{operation} is not allowed during {phase:?}")
            }
        }
    }
}

impl std::error::Error for SimError {}

pub type SimResult<T> = Result<T, SimError>;
