use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use crate::builder::RewardMachineBuilder;
use crate::error::RmError;
use crate::symbol::Symbol;
use crate::transitions::{letter_world_entries, RewardTable, TableEntry, TransitionTable};
use crate::types::MachineState;

/// Result of looking up a `(state, symbol)` pair in the machine's tables.
///
/// `Undefined` is an expected outcome: it means the symbol has no defined
/// effect from that state. The counterfactual generator filters on it; the
/// episode path turns it into [`RmError::InvalidTransition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionOutcome {
    Moved { next: MachineState, reward: f64 },
    Undefined,
}

impl TransitionOutcome {
    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Serializable form of a reward machine: the declared sets plus table rows.
///
/// Deserializing a [`RewardMachine`] goes through this struct and runs the
/// same validation as [`RewardMachineBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineSpec {
    /// Ordered set of non-terminal automaton states (`U`)
    pub states:   Vec<MachineState>,
    /// Initial state (`u_0`)
    pub initial:  MachineState,
    /// Terminal states (`F`)
    pub terminal: Vec<MachineState>,
    /// Every symbol the labelling function may emit
    pub alphabet: Vec<Symbol>,
    /// Co-defined δ_u / δ_r rows
    pub entries:  Vec<TableEntry>,
    /// Whether every `(u, symbol) ∈ U × alphabet` must have a row
    #[serde(default = "default_require_total")]
    pub require_total: bool,
}

fn default_require_total() -> bool { true }

/// A deterministic reward machine: a pure lookup table over `U × alphabet`
/// plus the fixed `u_0`, `U` and `F`.
///
/// Construct one through [`RewardMachineBuilder`] (or [`RewardMachine::letter_world`]);
/// the builder validates the tables so lookups during an episode only miss
/// where a gap was explicitly allowed with `build_partial()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "MachineSpec", try_from = "MachineSpec")]
pub struct RewardMachine {
    pub(crate) delta_u:  TransitionTable,
    pub(crate) delta_r:  RewardTable,
    pub(crate) initial:  MachineState,
    pub(crate) states:   Vec<MachineState>,
    pub(crate) terminal: BTreeSet<MachineState>,
    pub(crate) alphabet: Vec<Symbol>,
    pub(crate) total:    bool,
}

impl RewardMachine {
    /// The LetterWorld task: observe A → C → A → C.
    ///
    /// `U = (0, 1, 2, 3)`, `u_0 = 0`, `F = {4}`.
    pub fn letter_world() -> Result<Self, RmError> {
        RewardMachineBuilder::new()
            .states([0, 1, 2, 3])
            .initial(0)
            .terminal([4])
            .alphabet(Symbol::letter_alphabet())
            .entries(letter_world_entries())
            .build()
    }

    /// Looks up `(u, symbol)` without failing.
    pub fn lookup(&self, u: MachineState, symbol: &Symbol) -> TransitionOutcome {
        let key = (u, symbol.clone());
        match (self.delta_u.get(&key), self.delta_r.get(&key)) {
            (Some(&next), Some(&reward)) => TransitionOutcome::Moved { next, reward },
            _ => TransitionOutcome::Undefined,
        }
    }

    /// Returns the next machine state and reward for `(u, symbol)`.
    ///
    /// Fails with [`RmError::InvalidTransition`] when the pair has no table entry.
    pub fn transition(&self, u: MachineState, symbol: &Symbol) -> Result<(MachineState, f64), RmError> {
        match self.lookup(u, symbol) {
            TransitionOutcome::Moved { next, reward } => Ok((next, reward)),
            TransitionOutcome::Undefined => Err(RmError::InvalidTransition {
                state:  u,
                symbol: symbol.clone(),
            }),
        }
    }

    /// Membership in `F`. The machine never checks this itself.
    pub fn is_terminal(&self, u: MachineState) -> bool {
        self.terminal.contains(&u)
    }

    pub fn initial_state(&self) -> MachineState {
        self.initial
    }

    /// The ordered set `U`.
    pub fn states(&self) -> &[MachineState] {
        &self.states
    }

    pub fn terminal_states(&self) -> &BTreeSet<MachineState> {
        &self.terminal
    }

    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// True if the machine was validated as total over `U × alphabet`.
    pub fn is_total(&self) -> bool {
        self.total
    }

    /// Number of defined `(state, symbol)` pairs.
    pub fn len(&self) -> usize {
        self.delta_u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delta_u.is_empty()
    }

    /// Table rows sorted by source state, then symbol.
    pub fn entries(&self) -> Vec<TableEntry> {
        let mut rows: Vec<TableEntry> = self.delta_u.iter()
            .filter_map(|((from, symbol), &to)| {
                self.delta_r.get(&(*from, symbol.clone()))
                    .map(|&reward| TableEntry::new(*from, symbol.clone(), to, reward))
            })
            .collect();
        rows.sort_by(|x, y| (x.from, &x.symbol).cmp(&(y.from, &y.symbol)));
        rows
    }
}

impl From<RewardMachine> for MachineSpec {
    fn from(machine: RewardMachine) -> Self {
        Self {
            entries:       machine.entries(),
            states:        machine.states,
            initial:       machine.initial,
            terminal:      machine.terminal.into_iter().collect(),
            alphabet:      machine.alphabet,
            require_total: machine.total,
        }
    }
}

impl TryFrom<MachineSpec> for RewardMachine {
    type Error = RmError;

    fn try_from(spec: MachineSpec) -> Result<Self, Self::Error> {
        let require_total = spec.require_total;
        let builder = RewardMachineBuilder::from_spec(spec);
        if require_total { builder.build() } else { builder.build_partial() }
    }
}
