use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An automaton state of the reward machine (`u`).
pub type MachineState = u32;

/// A ground or cross-product observation: a fixed-shape integer vector.
pub type Observation = Vec<i32>;

/// Auxiliary per-step information. The core always returns it empty.
pub type Info = HashMap<String, serde_json::Value>;

/// Lifecycle of a single cross-product episode.
///
/// `Terminated`, `Truncated` and `Aborted` are absorbing: the caller must
/// `reset` before stepping again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodeStatus {
    NotStarted,
    Running,
    /// The machine landed in a terminal state.
    Terminated,
    /// The step horizon was reached.
    Truncated,
    /// A step hit a `(u, symbol)` pair with no table row.
    Aborted,
}

impl EpisodeStatus {
    /// Returns true once the episode needs a `reset`.
    pub fn is_over(&self) -> bool {
        matches!(self, Self::Terminated | Self::Truncated | Self::Aborted)
    }
}

impl std::fmt::Display for EpisodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::NotStarted => "NotStarted",
            Self::Running    => "Running",
            Self::Terminated => "Terminated",
            Self::Truncated  => "Truncated",
            Self::Aborted    => "Aborted",
        };
        write!(f, "{}", name)
    }
}

/// What `CrossProduct::step` returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub obs:        Observation,
    pub reward:     f64,
    pub terminated: bool,
    pub truncated:  bool,
    pub info:       Info,
}

/// One transition record of a counterfactual batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub obs:      Observation,
    pub action:   usize,
    pub next_obs: Observation,
    pub reward:   f64,
    pub done:     bool,
    pub info:     Info,
}

/// A discrete action space of `n` actions, `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    pub n: usize,
}

impl ActionSpace {
    pub fn new(n: usize) -> Self { Self { n } }

    pub fn contains(&self, action: usize) -> bool {
        action < self.n
    }
}

/// A box of integer observations of a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationSpace {
    pub shape: usize,
    pub low:   i32,
    pub high:  i32,
}

impl ObservationSpace {
    pub fn new(shape: usize, low: i32, high: i32) -> Self {
        Self { shape, low, high }
    }

    pub fn contains(&self, obs: &[i32]) -> bool {
        obs.len() == self.shape && obs.iter().all(|v| (self.low..=self.high).contains(v))
    }
}

/// Configuration for the cross-product environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Episode horizon: `truncated` is raised on this step
    pub max_steps: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self { max_steps: 100 }
    }
}
