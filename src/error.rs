use thiserror::Error;
use crate::symbol::Symbol;
use crate::types::{EpisodeStatus, MachineState};

#[derive(Debug, Error)]
pub enum RmError {
    #[error("Invalid transition: state {state} + symbol '{symbol}' not in transition table")]
    InvalidTransition { state: MachineState, symbol: Symbol },

    #[error("Malformed reward machine: {0}")]
    MalformedMachine(String),

    #[error("Invalid action {action}: action space has {n} actions")]
    InvalidAction { action: usize, n: usize },

    #[error("Episode not started: call reset() before step()")]
    EpisodeNotStarted,

    #[error("Episode is over ({0}): call reset() to start a new one")]
    EpisodeOver(EpisodeStatus),

    #[error("Build error: {0}")]
    BuildError(String),
}
