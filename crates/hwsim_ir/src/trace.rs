//! Per-signal value sequences across simulated cycles.

use hwsim_common::{Ident, Interner};
use serde::{Deserialize, Serialize};

/// The values of one signal over every simulated cycle.
///
/// Stimulus traces come from the `.simulate` section; output traces are
/// allocated by the simulator with the simulation length and filled cycle by
/// cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// The signal this trace belongs to.
    pub signal: Ident,
    /// One value per cycle.
    pub values: Vec<bool>,
}

impl Trace {
    /// Creates a trace from explicit values.
    pub fn new(signal: Ident, values: Vec<bool>) -> Self {
        Self { signal, values }
    }

    /// Creates a trace of `len` cycles, all `false`.
    pub fn zeroed(signal: Ident, len: usize) -> Self {
        Self {
            signal,
            values: vec![false; len],
        }
    }

    /// Returns the number of cycles in this trace.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the trace holds no cycles.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `cycle`, or `None` past the end.
    pub fn get(&self, cycle: usize) -> Option<bool> {
        self.values.get(cycle).copied()
    }

    /// Renders the trace as `"0101 Signal"`.
    pub fn render(&self, interner: &Interner) -> String {
        let mut out = format_bits(&self.values);
        out.push(' ');
        out.push_str(interner.resolve(self.signal));
        out
    }
}

/// Formats values as a string of `0` and `1` characters.
pub fn format_bits(values: &[bool]) -> String {
    values.iter().map(|&v| if v { '1' } else { '0' }).collect()
}

/// Parses a string of `0` and `1` characters.
///
/// Returns the first offending character on failure.
pub fn parse_bits(bits: &str) -> Result<Vec<bool>, char> {
    bits.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(other),
        })
        .collect()
}
