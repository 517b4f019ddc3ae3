use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::symbol::Symbol;
use crate::types::MachineState;

/// One machine transition taken during an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub step:      usize,
    pub from:      MachineState,
    pub symbol:    Symbol,
    pub to:        MachineState,
    pub reward:    f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self { Self { entries: Vec::new() } }

    pub fn record(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all entries driven by the given symbol
    pub fn for_symbol(&self, symbol: &Symbol) -> Vec<&TraceEntry> {
        self.entries.iter().filter(|e| &e.symbol == symbol).collect()
    }

    /// Machine states visited after each step, in order
    pub fn states(&self) -> Vec<MachineState> {
        self.entries.iter().map(|e| e.to).collect()
    }

    /// Sum of the machine rewards of the episode so far
    pub fn total_reward(&self) -> f64 {
        self.entries.iter().map(|e| e.reward).sum()
    }

    /// Serializes the trace to a pretty-printed JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.entries)
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Prints a human-readable trace table to stdout
    pub fn print(&self) {
        println!("\n{:<6} {:<6} {:<8} {:<6} {}", "step", "from", "symbol", "to", "reward");
        println!("{}", "─".repeat(40));
        for e in &self.entries {
            println!("{:<6} {:<6} {:<8} {:<6} {:.1}", e.step, e.from, e.symbol.to_string(), e.to, e.reward);
        }
    }
}
