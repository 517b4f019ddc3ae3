use crate::symbol::Symbol;

/// The single interface between a ground environment and the reward machine.
///
/// # Contract
/// - Pure function of the ground transition `(obs, action, next_obs)`.
/// - Returns exactly one symbol, never a set.
/// - Never fails: returns [`Symbol::empty`] when no condition holds.
///
/// Closures with the matching signature implement this trait, which is how
/// tests force a particular symbol.
pub trait Labeller: Send {
    fn label(&self, obs: &[i32], action: usize, next_obs: &[i32]) -> Symbol;
}

impl<F> Labeller for F
where
    F: Fn(&[i32], usize, &[i32]) -> Symbol + Send,
{
    fn label(&self, obs: &[i32], action: usize, next_obs: &[i32]) -> Symbol {
        self(obs, action, next_obs)
    }
}

/// Labelling function for LetterWorld.
///
/// Observations are `[mode, row, col]`. Only `next_obs` matters:
/// - `A` at the letter square while `mode == 0`
/// - `B` at the letter square while `mode == 1`
/// - `C` at the C square, whatever the mode
/// - `∅` otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterLabeller;

impl LetterLabeller {
    pub const A_B_POSITION: [i32; 2] = [1, 1];
    pub const C_POSITION:   [i32; 2] = [1, 5];
}

impl Labeller for LetterLabeller {
    fn label(&self, _obs: &[i32], _action: usize, next_obs: &[i32]) -> Symbol {
        let (mode, pos) = match next_obs {
            [mode, pos @ ..] => (*mode, pos),
            [] => return Symbol::empty(),
        };

        if pos == Self::A_B_POSITION {
            match mode {
                0 => return Symbol::a(),
                1 => return Symbol::b(),
                _ => {}
            }
        }
        if pos == Self::C_POSITION {
            return Symbol::c();
        }
        Symbol::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_square_depends_on_mode() {
        let l = LetterLabeller;
        assert_eq!(l.label(&[0, 1, 2], 3, &[0, 1, 1]), Symbol::a());
        assert_eq!(l.label(&[1, 1, 2], 3, &[1, 1, 1]), Symbol::b());
    }

    #[test]
    fn c_square_ignores_mode() {
        let l = LetterLabeller;
        assert_eq!(l.label(&[0, 1, 4], 1, &[0, 1, 5]), Symbol::c());
        assert_eq!(l.label(&[1, 1, 4], 1, &[1, 1, 5]), Symbol::c());
    }

    #[test]
    fn anything_else_is_empty() {
        let l = LetterLabeller;
        assert_eq!(l.label(&[0, 1, 3], 0, &[0, 0, 3]), Symbol::empty());
        assert_eq!(l.label(&[0, 1, 3], 0, &[2, 1, 1]), Symbol::empty());
        assert_eq!(l.label(&[], 0, &[]), Symbol::empty());
        assert_eq!(l.label(&[], 0, &[0, 1]), Symbol::empty());
    }
}
