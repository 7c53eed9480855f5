//! User function definitions (`def xor(A,B) = A*/B + /A*B`).

use std::collections::HashMap;

use hwsim_common::Ident;
use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// A named, parameterized boolean function.
///
/// Signals in `body` that are not parameters are resolved through the
/// caller's scope chain at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// The function name.
    pub name: Ident,
    /// Formal parameters in declaration order.
    pub params: Vec<Ident>,
    /// The function body.
    pub body: Expr,
}

impl Definition {
    /// Creates a new definition.
    pub fn new(name: Ident, params: Vec<Ident>, body: Expr) -> Self {
        Self { name, params, body }
    }

    /// Returns the number of formal parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// All definitions of a circuit, keyed by function name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionTable {
    defs: HashMap<Ident, Definition>,
}

impl DefinitionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, returning the one it replaced, if any.
    pub fn insert(&mut self, def: Definition) -> Option<Definition> {
        self.defs.insert(def.name, def)
    }

    /// Looks up a definition by function name.
    pub fn get(&self, name: Ident) -> Option<&Definition> {
        self.defs.get(&name)
    }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns `true` if the table holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl FromIterator<Definition> for DefinitionTable {
    fn from_iter<I: IntoIterator<Item = Definition>>(iter: I) -> Self {
        let mut table = Self::new();
        for def in iter {
            table.insert(def);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor_def() -> Definition {
        let (a, b) = (Ident::from_index(1), Ident::from_index(2));
        Definition::new(
            Ident::from_index(0),
            vec![a, b],
            Expr::or(
                Expr::and(Expr::signal(a), Expr::not(Expr::signal(b))),
                Expr::and(Expr::not(Expr::signal(a)), Expr::signal(b)),
            ),
        )
    }

    #[test]
    fn arity_counts_params() {
        assert_eq!(xor_def().arity(), 2);
    }

    #[test]
    fn lookup_by_name() {
        let table: DefinitionTable = std::iter::once(xor_def()).collect();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(Ident::from_index(0)), Some(&xor_def()));
        assert!(table.get(Ident::from_index(7)).is_none());
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut table = DefinitionTable::new();
        assert!(table.insert(xor_def()).is_none());
        let replaced = table.insert(Definition::new(
            Ident::from_index(0),
            vec![],
            Expr::signal(Ident::from_index(3)),
        ));
        assert_eq!(replaced, Some(xor_def()));
        assert_eq!(table.get(Ident::from_index(0)).map(Definition::arity), Some(0));
    }

    #[test]
    fn empty_table() {
        let table = DefinitionTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
