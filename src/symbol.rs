use serde::{Deserialize, Serialize};

/// A symbol of the reward machine's alphabet, emitted by a labelling function.
///
/// Symbols are identified by their string name. The empty name is the
/// distinguished "no event" symbol. The library ships constructors for the
/// letters used by the LetterWorld task, but any alphabet can be built
/// from custom names.
///
/// # Defining a Custom Symbol
///
/// ```
/// use rmcross::Symbol;
/// let key = Symbol::new("KeyPickedUp");
/// assert!(!key.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a new symbol with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string name of this symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the "no event" symbol.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // ── LetterWorld alphabet ────────────────────────────────────────────
    pub fn a()     -> Self { Self::new("A") }
    pub fn b()     -> Self { Self::new("B") }
    pub fn c()     -> Self { Self::new("C") }
    pub fn empty() -> Self { Self::new("") }

    /// The full LetterWorld alphabet, in table order.
    pub fn letter_alphabet() -> Vec<Self> {
        vec![Self::a(), Self::b(), Self::c(), Self::empty()]
    }
}

impl Default for Symbol {
    fn default() -> Self { Self::empty() }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
