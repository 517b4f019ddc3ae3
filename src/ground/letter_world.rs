use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use crate::ground::{GroundEnv, GroundStep};
use crate::label::LetterLabeller;
use crate::types::{ActionSpace, Info, Observation, ObservationSpace};

/// The four LetterWorld moves, indexed by action id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    pub fn from_action(action: usize) -> Option<Self> {
        Self::ALL.get(action).copied()
    }

    pub fn action(self) -> usize {
        self as usize
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Move::Up    => (-1,  0),
            Move::Right => ( 0,  1),
            Move::Down  => ( 1,  0),
            Move::Left  => ( 0, -1),
        }
    }
}

/// Configuration for [`LetterWorld`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterWorldConfig {
    pub rows: i32,
    pub cols: i32,

    /// Starting `(row, col)` of every episode
    pub start: (i32, i32),

    /// Chance that a step ending on the letter square in mode 0 flips the letter
    /// from A to B for the rest of the episode
    pub switch_proba: f64,

    /// Seed for the first episode; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for LetterWorldConfig {
    fn default() -> Self {
        Self {
            rows:         3,
            cols:         7,
            start:        (1, 3),
            switch_proba: 0.0,
            seed:         None,
        }
    }
}

/// A small grid world with two letter squares.
///
/// Observations are `[mode, row, col]`. The square at
/// [`LetterLabeller::A_B_POSITION`] shows `A` while `mode == 0` and `B`
/// once the mode has switched to 1; the square at
/// [`LetterLabeller::C_POSITION`] always shows `C`. Moves into a wall
/// leave the agent in place. The ground reward is always 0 and the world
/// never terminates by itself.
pub struct LetterWorld {
    config: LetterWorldConfig,
    rng:    StdRng,
    mode:   i32,
    pos:    (i32, i32),
}

impl LetterWorld {
    pub fn new(config: LetterWorldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let pos = config.start;
        Self { config, rng, mode: 0, pos }
    }

    /// LetterWorld with default layout and the given switch probability.
    pub fn with_switch_proba(switch_proba: f64) -> Self {
        Self::new(LetterWorldConfig { switch_proba, ..Default::default() })
    }

    pub fn config(&self) -> &LetterWorldConfig {
        &self.config
    }

    pub fn mode(&self) -> i32 {
        self.mode
    }

    pub fn position(&self) -> (i32, i32) {
        self.pos
    }

    fn obs(&self) -> Observation {
        vec![self.mode, self.pos.0, self.pos.1]
    }

    fn on_letter_square(&self) -> bool {
        let [r, c] = LetterLabeller::A_B_POSITION;
        self.pos == (r, c)
    }
}

impl GroundEnv for LetterWorld {
    fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.mode = 0;
        self.pos = self.config.start;
        (self.obs(), Info::new())
    }

    fn step(&mut self, action: usize) -> GroundStep {
        if let Some(m) = Move::from_action(action) {
            let (dr, dc) = m.delta();
            let row = (self.pos.0 + dr).clamp(0, self.config.rows.max(1) - 1);
            let col = (self.pos.1 + dc).clamp(0, self.config.cols.max(1) - 1);
            self.pos = (row, col);
        }

        if self.mode == 0
            && self.on_letter_square()
            && self.config.switch_proba > 0.0
            && self.rng.gen_bool(self.config.switch_proba.min(1.0))
        {
            self.mode = 1;
        }

        GroundStep::observe(self.obs())
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::new(Move::ALL.len())
    }

    fn observation_space(&self) -> ObservationSpace {
        let high = self.config.rows.max(self.config.cols).max(2) - 1;
        ObservationSpace::new(3, 0, high)
    }
}
