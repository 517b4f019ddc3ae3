use std::collections::{BTreeSet, HashMap, HashSet};
use crate::crossproduct::CrossProduct;
use crate::error::RmError;
use crate::ground::GroundEnv;
use crate::label::Labeller;
use crate::machine::{MachineSpec, RewardMachine};
use crate::symbol::Symbol;
use crate::transitions::{build_tables, TableEntry};
use crate::types::{EnvConfig, MachineState};

/// Collects the declared sets and table rows of a reward machine, then
/// validates them into a [`RewardMachine`].
///
/// # Example
/// ```
/// # use rmcross::{RewardMachineBuilder, Symbol};
/// let machine = RewardMachineBuilder::new()
///     .states([0, 1])
///     .initial(0)
///     .terminal([2])
///     .alphabet([Symbol::new("go"), Symbol::empty()])
///     .transition(0, Symbol::new("go"), 1, 0.0)
///     .transition(0, Symbol::empty(),   0, 0.0)
///     .transition(1, Symbol::new("go"), 2, 1.0)
///     .transition(1, Symbol::empty(),   1, 0.0)
///     .build()
///     .unwrap();
/// assert_eq!(machine.transition(1, &Symbol::new("go")).unwrap(), (2, 1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RewardMachineBuilder {
    spec: MachineSpec,
}

impl RewardMachineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing spec (e.g. one deserialized from JSON).
    pub fn from_spec(spec: MachineSpec) -> Self {
        Self { spec }
    }

    /// Sets the ordered set `U`. Counterfactual batches follow this order.
    pub fn states(mut self, states: impl IntoIterator<Item = MachineState>) -> Self {
        self.spec.states = states.into_iter().collect(); self
    }

    pub fn initial(mut self, u: MachineState) -> Self {
        self.spec.initial = u; self
    }

    pub fn terminal(mut self, terminal: impl IntoIterator<Item = MachineState>) -> Self {
        self.spec.terminal = terminal.into_iter().collect(); self
    }

    pub fn alphabet(mut self, alphabet: impl IntoIterator<Item = Symbol>) -> Self {
        self.spec.alphabet = alphabet.into_iter().collect(); self
    }

    /// Adds one `(from, symbol) → (to, reward)` row.
    pub fn transition(mut self, from: MachineState, symbol: Symbol, to: MachineState, reward: f64) -> Self {
        self.spec.entries.push(TableEntry::new(from, symbol, to, reward)); self
    }

    pub fn entries(mut self, entries: impl IntoIterator<Item = TableEntry>) -> Self {
        self.spec.entries.extend(entries); self
    }

    /// Builds the machine, requiring a row for every `(u, symbol) ∈ U × alphabet`.
    pub fn build(self) -> Result<RewardMachine, RmError> {
        self.finish(true)
    }

    /// Builds the machine without the totality check.
    ///
    /// Missing rows are then treated as "no defined effect": `step` fails on
    /// them and counterfactual generation skips them.
    pub fn build_partial(self) -> Result<RewardMachine, RmError> {
        self.finish(false)
    }

    fn finish(self, require_total: bool) -> Result<RewardMachine, RmError> {
        fn malformed(msg: String) -> Result<RewardMachine, RmError> {
            Err(RmError::MalformedMachine(msg))
        }

        let spec = self.spec;

        if spec.states.is_empty() {
            return malformed("state set U is empty".to_string());
        }
        let mut states: HashSet<MachineState> = HashSet::new();
        for &u in &spec.states {
            if !states.insert(u) {
                return malformed(format!("state {} declared twice", u));
            }
            if i32::try_from(u).is_err() {
                return malformed(format!("state {} does not fit an observation component", u));
            }
        }
        if !states.contains(&spec.initial) {
            return malformed(format!("initial state {} is not in U", spec.initial));
        }
        if spec.alphabet.is_empty() {
            return malformed("alphabet is empty".to_string());
        }

        let terminal: BTreeSet<MachineState> = spec.terminal.iter().copied().collect();
        if let Some(u) = terminal.iter().find(|u| i32::try_from(**u).is_err()) {
            return malformed(format!("state {} does not fit an observation component", u));
        }
        if terminal.contains(&spec.initial) {
            tracing::warn!(initial = spec.initial, "initial state is terminal");
        }
        let alphabet: HashSet<&Symbol> = spec.alphabet.iter().collect();

        let mut seen: HashMap<(MachineState, &Symbol), &TableEntry> = HashMap::new();
        for entry in &spec.entries {
            if !states.contains(&entry.from) {
                return malformed(format!("row ({}, '{}') starts outside U", entry.from, entry.symbol));
            }
            if !alphabet.contains(&entry.symbol) {
                return malformed(format!("row ({}, '{}') uses a symbol outside the alphabet",
                                         entry.from, entry.symbol));
            }
            if !states.contains(&entry.to) && !terminal.contains(&entry.to) {
                return malformed(format!("row ({}, '{}') targets unknown state {}",
                                         entry.from, entry.symbol, entry.to));
            }
            if let Some(prev) = seen.insert((entry.from, &entry.symbol), entry) {
                if prev != entry {
                    return malformed(format!("row ({}, '{}') defined twice with different values",
                                             entry.from, entry.symbol));
                }
            }
        }

        if require_total {
            for &u in &spec.states {
                for symbol in &spec.alphabet {
                    if !seen.contains_key(&(u, symbol)) {
                        return malformed(format!("no row for ({}, '{}')", u, symbol));
                    }
                }
            }
        }

        let (delta_u, delta_r) = build_tables(&spec.entries);
        tracing::debug!(
            states = spec.states.len(),
            symbols = spec.alphabet.len(),
            rows = delta_u.len(),
            total = require_total,
            "reward machine built"
        );

        Ok(RewardMachine {
            delta_u,
            delta_r,
            initial:  spec.initial,
            states:   spec.states,
            terminal,
            alphabet: spec.alphabet,
            total:    require_total,
        })
    }
}

/// Composes a ground environment, a reward machine and a labelling function
/// into a [`CrossProduct`].
pub struct CrossProductBuilder {
    ground:   Option<Box<dyn GroundEnv>>,
    machine:  Option<RewardMachine>,
    labeller: Option<Box<dyn Labeller>>,
    config:   EnvConfig,
}

impl CrossProductBuilder {
    pub fn new() -> Self {
        Self {
            ground:   None,
            machine:  None,
            labeller: None,
            config:   EnvConfig::default(),
        }
    }

    pub fn ground(mut self, ground: Box<dyn GroundEnv>) -> Self {
        self.ground = Some(ground); self
    }

    pub fn machine(mut self, machine: RewardMachine) -> Self {
        self.machine = Some(machine); self
    }

    pub fn labeller(mut self, labeller: Box<dyn Labeller>) -> Self {
        self.labeller = Some(labeller); self
    }

    pub fn config(mut self, config: EnvConfig) -> Self {
        self.config = config; self
    }

    pub fn max_steps(mut self, n: usize) -> Self {
        self.config.max_steps = n; self
    }

    pub fn build(self) -> Result<CrossProduct, RmError> {
        let ground = self.ground
            .ok_or_else(|| RmError::BuildError("ground environment is required".to_string()))?;
        let machine = self.machine
            .ok_or_else(|| RmError::BuildError("reward machine is required".to_string()))?;
        let labeller = self.labeller
            .ok_or_else(|| RmError::BuildError("labelling function is required".to_string()))?;

        if self.config.max_steps == 0 {
            return Err(RmError::BuildError("max_steps must be at least 1".to_string()));
        }

        Ok(CrossProduct::new(ground, machine, labeller, self.config))
    }
}

impl Default for CrossProductBuilder {
    fn default() -> Self { Self::new() }
}
