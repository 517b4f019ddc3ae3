use chrono::Utc;
use crate::builder::CrossProductBuilder;
use crate::error::RmError;
use crate::ground::{GroundEnv, LetterWorld, LetterWorldConfig};
use crate::label::{Labeller, LetterLabeller};
use crate::machine::{RewardMachine, TransitionOutcome};
use crate::trace::{Trace, TraceEntry};
use crate::types::{
    ActionSpace, EnvConfig, EpisodeStatus, Experience, Info, MachineState,
    Observation, ObservationSpace, StepResult,
};

/// Upper bound advertised for every cross-product observation component.
pub const OBS_HIGH: i32 = 100;

/// Builds the cross-product observation `ground_obs ⧺ [u]`.
pub fn augment(ground_obs: &[i32], u: MachineState) -> Observation {
    let mut obs = Vec::with_capacity(ground_obs.len() + 1);
    obs.extend_from_slice(ground_obs);
    obs.push(u as i32);
    obs
}

/// Strips the machine state from a cross-product observation.
///
/// `to_ground_obs(&augment(g, u)) == g` for every `g` and `u`.
pub fn to_ground_obs(obs: &[i32]) -> Observation {
    obs[..obs.len().saturating_sub(1)].to_vec()
}

/// The cross-product of a ground environment and a reward machine.
///
/// Each step labels the real ground transition, advances the machine from
/// its pre-step state and returns the machine's reward. Observations carry
/// the machine state as their last component.
pub struct CrossProduct {
    ground:   Box<dyn GroundEnv>,
    machine:  RewardMachine,
    labeller: Box<dyn Labeller>,
    config:   EnvConfig,

    // ── Episode state (rebuilt by reset) ─────────────────
    status:          EpisodeStatus,
    u:               MachineState,
    steps:           usize,
    ground_obs:      Observation,
    ground_obs_next: Observation,
    trace:           Trace,
}

impl CrossProduct {
    /// Creates a new environment. Prefer [`CrossProductBuilder`] for ergonomic construction.
    pub fn new(
        ground:   Box<dyn GroundEnv>,
        machine:  RewardMachine,
        labeller: Box<dyn Labeller>,
        config:   EnvConfig,
    ) -> Self {
        let u = machine.initial_state();
        Self {
            ground,
            machine,
            labeller,
            config,
            status:          EpisodeStatus::NotStarted,
            u,
            steps:           0,
            ground_obs:      Vec::new(),
            ground_obs_next: Vec::new(),
            trace:           Trace::new(),
        }
    }

    /// Starts a new episode and returns `(ground_obs ⧺ [u_0], info)`.
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        let (ground_obs, _) = self.ground.reset(seed);

        self.steps = 0;
        self.u = self.machine.initial_state();
        self.ground_obs_next = ground_obs.clone();
        self.ground_obs = ground_obs;
        self.status = EpisodeStatus::Running;
        self.trace.clear();

        tracing::info!(seed = ?seed, u = self.u, "episode reset");
        (augment(&self.ground_obs, self.u), Info::new())
    }

    /// Advances the ground environment and the reward machine by one step.
    ///
    /// # Errors
    /// - [`RmError::EpisodeNotStarted`] before the first `reset`.
    /// - [`RmError::EpisodeOver`] once the episode terminated or truncated.
    /// - [`RmError::InvalidAction`] for actions outside the action space.
    /// - [`RmError::InvalidTransition`] if the machine has no row for the
    ///   current state and the derived symbol. The episode is then
    ///   [`EpisodeStatus::Aborted`] with its step count and observations
    ///   unchanged.
    pub fn step(&mut self, action: usize) -> Result<StepResult, RmError> {
        match self.status {
            EpisodeStatus::NotStarted => return Err(RmError::EpisodeNotStarted),
            s if s.is_over()          => return Err(RmError::EpisodeOver(s)),
            _ => {}
        }
        let space = self.ground.action_space();
        if !space.contains(action) {
            return Err(RmError::InvalidAction { action, n: space.n });
        }

        let next_obs = self.ground.step(action).obs;
        let symbol = self.labeller.label(&self.ground_obs_next, action, &next_obs);
        let (u_next, reward) = match self.machine.transition(self.u, &symbol) {
            Ok(moved) => moved,
            Err(e) => {
                self.status = EpisodeStatus::Aborted;
                tracing::warn!(step = self.steps + 1, u = self.u, symbol = %symbol, "episode aborted: {}", e);
                return Err(e);
            }
        };

        self.steps += 1;
        self.ground_obs = std::mem::replace(&mut self.ground_obs_next, next_obs);

        tracing::debug!(step = self.steps, from = self.u, symbol = %symbol, to = u_next, reward, "machine transition");
        self.trace.record(TraceEntry {
            step:      self.steps,
            from:      self.u,
            symbol,
            to:        u_next,
            reward,
            timestamp: Utc::now(),
        });
        self.u = u_next;

        let terminated = self.machine.is_terminal(self.u);
        let truncated = self.steps >= self.config.max_steps;

        if terminated {
            self.status = EpisodeStatus::Terminated;
            tracing::info!(steps = self.steps, u = self.u, "episode terminated");
        } else if truncated {
            self.status = EpisodeStatus::Truncated;
            tracing::info!(steps = self.steps, u = self.u, "episode truncated");
        }

        Ok(StepResult {
            obs: augment(&self.ground_obs_next, self.u),
            reward,
            terminated,
            truncated,
            info: Info::new(),
        })
    }

    /// Replays one real ground transition from every machine state in `U`.
    ///
    /// The symbol is derived once. For each `u_i`, in the order of `U`, a
    /// defined row `(u_i, symbol) → (u_j, r_j)` yields one experience;
    /// an undefined row yields nothing. Never fails, and never returns more
    /// than `|U|` experiences.
    pub fn generate_counterfactual_experience(
        &self,
        ground_obs:      &[i32],
        action:          usize,
        next_ground_obs: &[i32],
    ) -> Vec<Experience> {
        let symbol = self.labeller.label(ground_obs, action, next_ground_obs);

        self.machine.states().iter()
            .filter_map(|&u_i| match self.machine.lookup(u_i, &symbol) {
                TransitionOutcome::Moved { next: u_j, reward } => Some(Experience {
                    obs:      augment(ground_obs, u_i),
                    action,
                    next_obs: augment(next_ground_obs, u_j),
                    reward,
                    done:     self.machine.is_terminal(u_j),
                    info:     Info::new(),
                }),
                TransitionOutcome::Undefined => {
                    tracing::trace!(u = u_i, symbol = %symbol, "counterfactual branch skipped");
                    None
                }
            })
            .collect()
    }

    /// Builds a cross-product observation for this environment.
    pub fn augment(&self, ground_obs: &[i32], u: MachineState) -> Observation {
        augment(ground_obs, u)
    }

    /// Inverse of [`CrossProduct::augment`] on the ground part.
    pub fn to_ground_obs(&self, obs: &[i32]) -> Observation {
        to_ground_obs(obs)
    }

    /// The real ground transition `(previous, current)` of the last step.
    ///
    /// Right after `reset` both are the initial observation. `None` before
    /// the first `reset`.
    pub fn last_ground_transition(&self) -> Option<(&[i32], &[i32])> {
        match self.status {
            EpisodeStatus::NotStarted => None,
            _ => Some((self.ground_obs.as_slice(), self.ground_obs_next.as_slice())),
        }
    }

    pub fn action_space(&self) -> ActionSpace {
        self.ground.action_space()
    }

    /// Ground observation space widened by one component for the machine state.
    pub fn observation_space(&self) -> ObservationSpace {
        ObservationSpace::new(self.ground.observation_space().shape + 1, 0, OBS_HIGH)
    }

    /// Current machine state (`u`).
    pub fn machine_state(&self) -> MachineState {
        self.u
    }

    /// Steps taken since the last reset.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    pub fn machine(&self) -> &RewardMachine {
        &self.machine
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Machine transitions of the current episode.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }
}

/// LetterWorld composed with the A → C → A → C machine and [`LetterLabeller`].
pub fn letter_world_crossproduct(config: LetterWorldConfig) -> Result<CrossProduct, RmError> {
    CrossProductBuilder::new()
        .ground(Box::new(LetterWorld::new(config)))
        .machine(RewardMachine::letter_world()?)
        .labeller(Box::new(LetterLabeller))
        .build()
}
