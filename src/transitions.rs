use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::symbol::Symbol;
use crate::types::MachineState;

/// δ_u: `(u, symbol) → u'`.
pub type TransitionTable = HashMap<(MachineState, Symbol), MachineState>;

/// δ_r: `(u, symbol) → reward`. Always keyed exactly like the transition table.
pub type RewardTable = HashMap<(MachineState, Symbol), f64>;

/// One row of the co-defined δ_u / δ_r tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub from:   MachineState,
    pub symbol: Symbol,
    pub to:     MachineState,
    pub reward: f64,
}

impl TableEntry {
    pub fn new(from: MachineState, symbol: Symbol, to: MachineState, reward: f64) -> Self {
        Self { from, symbol, to, reward }
    }
}

/// Builds the rows of the LetterWorld task: observe A → C → A → C.
///
/// Every symbol that does not advance the pattern is a self-loop, so the
/// table is total over `{0, 1, 2, 3} × {A, B, C, ∅}`. The only non-zero
/// reward is on `(3, C)`, which reaches the terminal state 4.
pub fn letter_world_entries() -> Vec<TableEntry> {
    let (a, b, c, e) = (Symbol::a(), Symbol::b(), Symbol::c(), Symbol::empty());
    vec![
        // ── u0: waiting for the first A ──────────────────────
        TableEntry::new(0, a.clone(), 1, 0.0),
        TableEntry::new(0, b.clone(), 0, 0.0),
        TableEntry::new(0, c.clone(), 0, 0.0),
        TableEntry::new(0, e.clone(), 0, 0.0),

        // ── u1: seen A, waiting for C ────────────────────────
        TableEntry::new(1, a.clone(), 1, 0.0),
        TableEntry::new(1, b.clone(), 1, 0.0),
        TableEntry::new(1, c.clone(), 2, 0.0),
        TableEntry::new(1, e.clone(), 1, 0.0),

        // ── u2: seen A C, waiting for A ──────────────────────
        TableEntry::new(2, a.clone(), 3, 0.0),
        TableEntry::new(2, b.clone(), 2, 0.0),
        TableEntry::new(2, c.clone(), 2, 0.0),
        TableEntry::new(2, e.clone(), 2, 0.0),

        // ── u3: seen A C A, waiting for the final C ──────────
        TableEntry::new(3, a,          3, 0.0),
        TableEntry::new(3, b,          3, 0.0),
        TableEntry::new(3, c,          4, 1.0),
        TableEntry::new(3, e,          3, 0.0),

        // Note: 4 is terminal — no outgoing transitions.
    ]
}

/// Splits table rows into the two parallel lookup maps.
pub fn build_tables(entries: &[TableEntry]) -> (TransitionTable, RewardTable) {
    let mut delta_u = HashMap::with_capacity(entries.len());
    let mut delta_r = HashMap::with_capacity(entries.len());
    for e in entries {
        delta_u.insert((e.from, e.symbol.clone()), e.to);
        delta_r.insert((e.from, e.symbol.clone()), e.reward);
    }
    (delta_u, delta_r)
}
