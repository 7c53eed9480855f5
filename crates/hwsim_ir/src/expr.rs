//! Boolean expression trees.

use hwsim_common::Ident;
use serde::{Deserialize, Serialize};

/// A boolean expression.
///
/// Expressions are immutable once built and owned by the [`Definition`](crate::Definition)
/// or [`Update`](crate::Update) that contains them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A reference to a signal, latch value or function parameter (`A`).
    Signal(Ident),
    /// Negation (`/A`).
    Not(Box<Expr>),
    /// Conjunction (`A * B`).
    And(Box<Expr>, Box<Expr>),
    /// Disjunction (`A + B`).
    Or(Box<Expr>, Box<Expr>),
    /// Application of a user definition (`xor(A, /B)`).
    Call {
        /// The definition being applied.
        function: Ident,
        /// Actual arguments, in parameter order.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Builds a signal reference.
    pub fn signal(name: Ident) -> Self {
        Expr::Signal(name)
    }

    /// Builds a negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }

    /// Builds a conjunction.
    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    /// Builds a disjunction.
    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Builds a function call.
    pub fn call(function: Ident, args: Vec<Expr>) -> Self {
        Expr::Call { function, args }
    }

    /// Collects every signal name read by this expression, in left-to-right
    /// order and without duplicates. Names inside call arguments are
    /// included; the bodies of called definitions are not.
    pub fn signals(&self) -> Vec<Ident> {
        let mut out = Vec::new();
        self.collect_signals(&mut out);
        out
    }

    fn collect_signals(&self, out: &mut Vec<Ident>) {
        match self {
            Expr::Signal(name) => {
                if !out.contains(name) {
                    out.push(*name);
                }
            }
            Expr::Not(inner) => inner.collect_signals(out),
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                lhs.collect_signals(out);
                rhs.collect_signals(out);
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.collect_signals(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> Ident {
        Ident::from_index(n)
    }

    #[test]
    fn builders_box_children() {
        let e = Expr::and(Expr::signal(id(0)), Expr::not(Expr::signal(id(1))));
        match e {
            Expr::And(lhs, rhs) => {
                assert_eq!(*lhs, Expr::Signal(id(0)));
                assert_eq!(*rhs, Expr::Not(Box::new(Expr::Signal(id(1)))));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn signals_in_order_without_duplicates() {
        // A * /B + B
        let e = Expr::or(
            Expr::and(Expr::signal(id(0)), Expr::not(Expr::signal(id(1)))),
            Expr::signal(id(1)),
        );
        assert_eq!(e.signals(), vec![id(0), id(1)]);
    }

    #[test]
    fn signals_include_call_arguments() {
        let e = Expr::call(id(9), vec![Expr::signal(id(2)), Expr::signal(id(3))]);
        assert_eq!(e.signals(), vec![id(2), id(3)]);
    }

    #[test]
    fn serde_roundtrip() {
        let e = Expr::call(id(5), vec![Expr::or(Expr::signal(id(1)), Expr::signal(id(2)))]);
        let json = serde_json::to_string(&e).unwrap();
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
