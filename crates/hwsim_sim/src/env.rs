//! Signal environments with nested scopes.
//!
//! The simulator owns one root [`Environment`] holding every input, output,
//! latch and delayed latch value. Each function call evaluates its body in a
//! [`child`](Environment::child) scope that binds the parameters and borrows
//! the caller's scope as its parent, so the frame is dropped as soon as the
//! call returns.

use std::collections::HashMap;
use std::fmt;

use hwsim_common::{Ident, Interner};
use hwsim_ir::DefinitionTable;

use crate::error::SimError;

/// Default limit on nested definition calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// A scope of signal bindings.
pub struct Environment<'a> {
    bindings: HashMap<Ident, bool>,
    parent: Option<&'a Environment<'a>>,
    definitions: &'a DefinitionTable,
    interner: &'a Interner,
    depth: usize,
    max_call_depth: usize,
}

impl<'a> Environment<'a> {
    /// Creates an empty root scope closed over `definitions`.
    pub fn new(definitions: &'a DefinitionTable, interner: &'a Interner) -> Self {
        Self {
            bindings: HashMap::new(),
            parent: None,
            definitions,
            interner,
            depth: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Changes the call depth limit of this scope and its future children.
    pub fn set_max_call_depth(&mut self, max: usize) {
        self.max_call_depth = max;
    }

    /// Creates a fresh scope whose parent is `self`.
    pub fn child(&self) -> Environment<'_> {
        Environment {
            bindings: HashMap::new(),
            parent: Some(self),
            definitions: self.definitions,
            interner: self.interner,
            depth: self.depth + 1,
            max_call_depth: self.max_call_depth,
        }
    }

    /// Looks up `name` locally, then through the enclosing scopes.
    pub fn get(&self, name: Ident) -> Result<bool, SimError> {
        self.lookup(name).ok_or_else(|| SimError::UnboundSignal {
            name: self.interner.resolve(name).to_string(),
        })
    }

    /// Like [`get`](Self::get), but returns `None` instead of an error.
    pub fn lookup(&self, name: Ident) -> Option<bool> {
        let mut scope = Some(self);
        while let Some(env) = scope {
            if let Some(&value) = env.bindings.get(&name) {
                return Some(value);
            }
            scope = env.parent;
        }
        None
    }

    /// Binds `name` in this scope. Enclosing scopes are never modified.
    pub fn set(&mut self, name: Ident, value: bool) {
        self.bindings.insert(name, value);
    }

    /// The definition table calls are resolved against.
    pub fn definitions(&self) -> &'a DefinitionTable {
        self.definitions
    }

    /// The interner used to name signals in errors and dumps.
    pub fn interner(&self) -> &'a Interner {
        self.interner
    }

    /// Number of enclosing scopes; zero for the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The configured call depth limit.
    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }
}

/// Prints the local bindings sorted by name, e.g. `A=1 B=0 L'=0`.
impl fmt::Display for Environment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(&str, bool)> = self
            .bindings
            .iter()
            .map(|(&name, &value)| (self.interner.resolve(name), value))
            .collect();
        entries.sort_unstable();
        for (i, (name, value)) in entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}={}", u8::from(*value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let defs = DefinitionTable::new();
        let interner = Interner::new();
        let a = interner.get_or_intern("A");
        let mut env = Environment::new(&defs, &interner);
        env.set(a, true);
        assert!(env.get(a).unwrap());
    }

    #[test]
    fn overwrite_replaces_value() {
        let defs = DefinitionTable::new();
        let interner = Interner::new();
        let a = interner.get_or_intern("A");
        let mut env = Environment::new(&defs, &interner);
        env.set(a, true);
        env.set(a, false);
        assert!(!env.get(a).unwrap());
    }

    #[test]
    fn missing_binding_is_error() {
        let defs = DefinitionTable::new();
        let interner = Interner::new();
        let ghost = interner.get_or_intern("Ghost");
        let env = Environment::new(&defs, &interner);
        match env.get(ghost) {
            Err(SimError::UnboundSignal { name }) => assert_eq!(name, "Ghost"),
            other => panic!("expected UnboundSignal, got {other:?}"),
        }
    }

    #[test]
    fn child_reads_through_parent() {
        let defs = DefinitionTable::new();
        let interner = Interner::new();
        let a = interner.get_or_intern("A");
        let mut root = Environment::new(&defs, &interner);
        root.set(a, true);
        let child = root.child();
        assert!(child.get(a).unwrap());
        assert_eq!(child.to_string(), "");
        assert_eq!(child.depth(), 1);
    }

    #[test]
    fn child_shadows_without_touching_parent() {
        let defs = DefinitionTable::new();
        let interner = Interner::new();
        let a = interner.get_or_intern("A");
        let mut root = Environment::new(&defs, &interner);
        root.set(a, true);
        {
            let mut child = root.child();
            child.set(a, false);
            assert!(!child.get(a).unwrap());
        }
        assert!(root.get(a).unwrap());
    }

    #[test]
    fn grandchild_reaches_root() {
        let defs = DefinitionTable::new();
        let interner = Interner::new();
        let a = interner.get_or_intern("A");
        let mut root = Environment::new(&defs, &interner);
        root.set_max_call_depth(8);
        root.set(a, true);
        let child = root.child();
        let grandchild = child.child();
        assert_eq!(grandchild.lookup(a), Some(true));
        assert_eq!(grandchild.depth(), 2);
        assert_eq!(grandchild.max_call_depth(), 8);
    }

    #[test]
    fn display_sorted_bindings() {
        let defs = DefinitionTable::new();
        let interner = Interner::new();
        let mut env = Environment::new(&defs, &interner);
        env.set(interner.get_or_intern("B"), false);
        env.set(interner.get_or_intern("A"), true);
        env.set(interner.get_or_intern("L'"), false);
        assert_eq!(env.to_string(), "A=1 B=0 L'=0");
    }
}
