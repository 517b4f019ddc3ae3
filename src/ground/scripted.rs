use crate::ground::{GroundEnv, GroundStep};
use crate::types::{ActionSpace, Info, Observation, ObservationSpace};

/// A ground environment that replays a fixed list of observations.
///
/// `reset` returns the first observation; each `step` returns the next one,
/// repeating the last once the script runs out. Received actions are
/// recorded so tests can check what the cross-product forwarded.
pub struct ScriptedGround {
    script:    Vec<Observation>,
    cursor:    usize,
    actions:   Vec<usize>,
    resets:    usize,
    n_actions: usize,
}

impl ScriptedGround {
    /// `script` must hold at least the reset observation.
    pub fn new(script: Vec<Observation>) -> Self {
        Self {
            script,
            cursor:    0,
            actions:   Vec::new(),
            resets:    0,
            n_actions: 4,
        }
    }

    /// Overrides the size of the advertised action space (default 4).
    pub fn with_actions(mut self, n: usize) -> Self {
        self.n_actions = n; self
    }

    /// Actions received since construction, in order.
    pub fn actions(&self) -> &[usize] {
        &self.actions
    }

    /// Number of times `reset` was called.
    pub fn reset_count(&self) -> usize {
        self.resets
    }

    fn current(&self) -> Observation {
        self.script.get(self.cursor)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or_default()
    }
}

impl GroundEnv for ScriptedGround {
    fn reset(&mut self, _seed: Option<u64>) -> (Observation, Info) {
        self.resets += 1;
        self.cursor = 0;
        (self.current(), Info::new())
    }

    fn step(&mut self, action: usize) -> GroundStep {
        self.actions.push(action);
        if self.cursor + 1 < self.script.len() {
            self.cursor += 1;
        }
        GroundStep::observe(self.current())
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::new(self.n_actions)
    }

    fn observation_space(&self) -> ObservationSpace {
        let shape = self.script.first().map_or(0, |o| o.len());
        let high = self.script.iter().flatten().copied().max().unwrap_or(0);
        ObservationSpace::new(shape, 0, high)
    }
}
