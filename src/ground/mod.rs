use serde::{Deserialize, Serialize};
use crate::types::{ActionSpace, Info, Observation, ObservationSpace};

mod letter_world;
mod scripted;

pub use letter_world::{LetterWorld, LetterWorldConfig, Move};
pub use scripted::ScriptedGround;

/// What a ground environment returns from `step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundStep {
    pub obs:        Observation,
    pub reward:     f64,
    pub terminated: bool,
    pub truncated:  bool,
    pub info:       Info,
}

impl GroundStep {
    /// A non-terminal step with zero reward and empty info.
    pub fn observe(obs: Observation) -> Self {
        Self { obs, reward: 0.0, terminated: false, truncated: false, info: Info::new() }
    }
}

/// The contract every ground (base) environment must fulfill.
///
/// The cross-product only reads the observations it returns; the ground
/// reward and done flags are ignored, since the reward machine is the sole
/// reward source.
///
/// # Contract
/// - `reset` returns an observation of length `observation_space().shape`.
/// - `step` accepts any action in `action_space()`. The cross-product
///   rejects out-of-range actions before calling it.
/// - Must be `Send` so independent instances can be moved into rollout workers.
pub trait GroundEnv: Send {
    fn reset(&mut self, seed: Option<u64>) -> (Observation, Info);

    fn step(&mut self, action: usize) -> GroundStep;

    fn action_space(&self) -> ActionSpace;

    fn observation_space(&self) -> ObservationSpace;
}
