//! Interned names for signals, latches and definitions.
//!
//! Every name in a circuit is interned once, so environments and definition
//! tables key on a `u32`. A latch `L` also owns a derived name `L'` holding
//! its value from the previous cycle; [`Interner::primed`] and
//! [`Interner::unprimed`] convert between the two.

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// Suffix that turns a latch name into the name of its delayed value.
pub const PRIME: char = '\'';

/// An interned name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident(u32);

impl Ident {
    /// Wraps an interner index. Circuits built by hand in tests use this;
    /// everything else goes through [`Interner::get_or_intern`].
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// The interner index behind this name.
    pub const fn index(self) -> u32 {
        self.0
    }
}

// SAFETY: every `u32` converts to `usize` and back unchanged on the 32-bit
// and 64-bit targets we build for; larger indices are refused.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Self)
    }
}

/// The name table shared by the circuit loader and the simulator.
///
/// Interning takes `&self`, so the simulator can derive delayed latch names
/// while the circuit that owns the original names is borrowed.
pub struct Interner {
    names: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates an empty name table.
    pub fn new() -> Self {
        Self {
            names: ThreadedRodeo::new(),
        }
    }

    /// Returns the name for `name`, interning it on first use.
    pub fn get_or_intern(&self, name: &str) -> Ident {
        self.names.get_or_intern(name)
    }

    /// Returns the text of `ident`.
    ///
    /// # Panics
    ///
    /// Panics if `ident` came from a different interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.names.resolve(&ident)
    }

    /// Returns the delayed-value name `L'` of the latch named `L`.
    pub fn primed(&self, latch: Ident) -> Ident {
        self.get_or_intern(&format!("{}{PRIME}", self.resolve(latch)))
    }

    /// Returns `L` for a name spelled `L'`, provided `L` has been interned.
    pub fn unprimed(&self, ident: Ident) -> Option<Ident> {
        let base = self.resolve(ident).strip_suffix(PRIME)?;
        self.names.get(base)
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
