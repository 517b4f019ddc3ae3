pub mod types;
pub mod symbol;
pub mod transitions;
pub mod machine;
pub mod label;
pub mod ground;
pub mod crossproduct;
pub mod trace;
pub mod error;
pub mod builder;

// Convenience re-exports at crate root
pub use builder::{RewardMachineBuilder, CrossProductBuilder};
pub use crossproduct::{CrossProduct, augment, to_ground_obs, letter_world_crossproduct};
pub use machine::{RewardMachine, TransitionOutcome, MachineSpec};
pub use symbol::Symbol;
pub use label::{Labeller, LetterLabeller};
pub use ground::{GroundEnv, GroundStep, LetterWorld, LetterWorldConfig, ScriptedGround};
pub use types::{
    MachineState, Observation, Info, EpisodeStatus, StepResult, Experience,
    ActionSpace, ObservationSpace, EnvConfig,
};
pub use trace::{TraceEntry, Trace};
pub use error::RmError;
