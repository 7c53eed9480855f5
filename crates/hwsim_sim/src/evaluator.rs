//! Expression evaluation and update execution.
//!
//! [`eval_expr`] walks an [`Expr`] tree against an [`Environment`]. Both
//! operands of `*` and `+` are always evaluated, left first, so an unbound
//! signal is reported even when the other operand already decides the
//! result. [`exec_update`] evaluates one update equation and writes its
//! target into the environment.

use hwsim_common::Ident;
use hwsim_ir::{Expr, Update};

use crate::env::Environment;
use crate::error::SimError;

/// Evaluates `expr` in `env`.
pub fn eval_expr(expr: &Expr, env: &Environment<'_>) -> Result<bool, SimError> {
    match expr {
        Expr::Signal(name) => env.get(*name),

        Expr::Not(inner) => Ok(!eval_expr(inner, env)?),

        Expr::And(lhs, rhs) => {
            let l = eval_expr(lhs, env)?;
            let r = eval_expr(rhs, env)?;
            Ok(l && r)
        }

        Expr::Or(lhs, rhs) => {
            let l = eval_expr(lhs, env)?;
            let r = eval_expr(rhs, env)?;
            Ok(l || r)
        }

        Expr::Call { function, args } => eval_call(*function, args, env),
    }
}

/// Applies the definition named `function` to `args`.
///
/// Arguments are evaluated in the caller's scope. The body runs in a child
/// of the caller's scope, so names that are not parameters resolve to the
/// caller's bindings.
fn eval_call(function: Ident, args: &[Expr], env: &Environment<'_>) -> Result<bool, SimError> {
    let interner = env.interner();
    let def = env
        .definitions()
        .get(function)
        .ok_or_else(|| SimError::UndefinedFunction {
            name: interner.resolve(function).to_string(),
        })?;

    if def.arity() != args.len() {
        return Err(SimError::ArityMismatch {
            function: interner.resolve(function).to_string(),
            expected: def.arity(),
            got: args.len(),
        });
    }

    if env.depth() >= env.max_call_depth() {
        return Err(SimError::CallDepthExceeded {
            function: interner.resolve(function).to_string(),
            limit: env.max_call_depth(),
        });
    }

    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(eval_expr(arg, env)?);
    }

    let mut scope = env.child();
    for (&param, value) in def.params.iter().zip(values) {
        scope.set(param, value);
    }
    eval_expr(&def.body, &scope)
}

/// Evaluates an update equation and binds its target in `env`.
///
/// Returns the assigned value.
pub fn exec_update(update: &Update, env: &mut Environment<'_>) -> Result<bool, SimError> {
    let value = eval_expr(&update.expr, env)?;
    env.set(update.target, value);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwsim_common::Interner;
    use hwsim_ir::{Definition, DefinitionTable};

    /// `def xor(A,B) = A*/B + /A*B`
    fn xor_def(interner: &Interner) -> Definition {
        let a = interner.get_or_intern("A");
        let b = interner.get_or_intern("B");
        Definition::new(
            interner.get_or_intern("xor"),
            vec![a, b],
            Expr::or(
                Expr::and(Expr::signal(a), Expr::not(Expr::signal(b))),
                Expr::and(Expr::not(Expr::signal(a)), Expr::signal(b)),
            ),
        )
    }

    fn sig(interner: &Interner, name: &str) -> Expr {
        Expr::signal(interner.get_or_intern(name))
    }

    #[test]
    fn signal_reads_binding() {
        let interner = Interner::new();
        let defs = DefinitionTable::new();
        let mut env = Environment::new(&defs, &interner);
        env.set(interner.get_or_intern("X"), true);
        assert!(eval_expr(&sig(&interner, "X"), &env).unwrap());
    }

    #[test]
    fn connectives_truth_table() {
        let interner = Interner::new();
        let defs = DefinitionTable::new();
        let (x, y) = (interner.get_or_intern("X"), interner.get_or_intern("Y"));
        let and = Expr::and(Expr::signal(x), Expr::signal(y));
        let or = Expr::or(Expr::signal(x), Expr::signal(y));
        let nand = Expr::not(and.clone());
        for (vx, vy) in [(false, false), (false, true), (true, false), (true, true)] {
            let mut env = Environment::new(&defs, &interner);
            env.set(x, vx);
            env.set(y, vy);
            assert_eq!(eval_expr(&and, &env).unwrap(), vx && vy);
            assert_eq!(eval_expr(&or, &env).unwrap(), vx || vy);
            assert_eq!(eval_expr(&nand, &env).unwrap(), !(vx && vy));
        }
    }

    #[test]
    fn and_does_not_short_circuit_errors() {
        let interner = Interner::new();
        let defs = DefinitionTable::new();
        let mut env = Environment::new(&defs, &interner);
        env.set(interner.get_or_intern("Zero"), false);
        let e = Expr::and(sig(&interner, "Zero"), sig(&interner, "Ghost"));
        match eval_expr(&e, &env) {
            Err(SimError::UnboundSignal { name }) => assert_eq!(name, "Ghost"),
            other => panic!("expected UnboundSignal, got {other:?}"),
        }
    }

    #[test]
    fn or_does_not_short_circuit_errors() {
        let interner = Interner::new();
        let defs = DefinitionTable::new();
        let mut env = Environment::new(&defs, &interner);
        env.set(interner.get_or_intern("One"), true);
        let e = Expr::or(sig(&interner, "One"), sig(&interner, "Ghost"));
        assert!(matches!(
            eval_expr(&e, &env),
            Err(SimError::UnboundSignal { .. })
        ));
    }

    #[test]
    fn left_operand_error_reported_first() {
        let interner = Interner::new();
        let defs = DefinitionTable::new();
        let env = Environment::new(&defs, &interner);
        let e = Expr::or(sig(&interner, "Left"), sig(&interner, "Right"));
        match eval_expr(&e, &env) {
            Err(SimError::UnboundSignal { name }) => assert_eq!(name, "Left"),
            other => panic!("expected UnboundSignal, got {other:?}"),
        }
    }

    #[test]
    fn xor_call() {
        let interner = Interner::new();
        let defs: DefinitionTable = std::iter::once(xor_def(&interner)).collect();
        let xor = interner.get_or_intern("xor");
        let (p, q) = (interner.get_or_intern("P"), interner.get_or_intern("Q"));
        let call = Expr::call(xor, vec![Expr::signal(p), Expr::signal(q)]);

        let mut env = Environment::new(&defs, &interner);
        env.set(p, true);
        env.set(q, true);
        assert!(!eval_expr(&call, &env).unwrap());

        env.set(q, false);
        assert!(eval_expr(&call, &env).unwrap());
    }

    #[test]
    fn arguments_evaluated_in_caller_scope() {
        // Actuals name B, which is also a parameter of xor; they must be
        // read from the caller before the parameters are bound.
        let interner = Interner::new();
        let defs: DefinitionTable = std::iter::once(xor_def(&interner)).collect();
        let xor = interner.get_or_intern("xor");
        let (a, b) = (interner.get_or_intern("A"), interner.get_or_intern("B"));
        let mut env = Environment::new(&defs, &interner);
        env.set(a, true);
        env.set(b, false);
        let call = Expr::call(xor, vec![Expr::signal(b), Expr::not(Expr::signal(b))]);
        assert!(eval_expr(&call, &env).unwrap());
        // Parameters do not leak into the caller.
        assert!(!env.get(b).unwrap());
    }

    #[test]
    fn body_resolves_free_names_at_call_site() {
        // def gate(A) = A * Enable
        let interner = Interner::new();
        let a = interner.get_or_intern("A");
        let enable = interner.get_or_intern("Enable");
        let gate = interner.get_or_intern("gate");
        let defs: DefinitionTable = std::iter::once(Definition::new(
            gate,
            vec![a],
            Expr::and(Expr::signal(a), Expr::signal(enable)),
        ))
        .collect();

        let x = interner.get_or_intern("X");
        let mut env = Environment::new(&defs, &interner);
        env.set(x, true);
        env.set(enable, true);
        let call = Expr::call(gate, vec![Expr::signal(x)]);
        assert!(eval_expr(&call, &env).unwrap());
        env.set(enable, false);
        assert!(!eval_expr(&call, &env).unwrap());
    }

    #[test]
    fn nested_calls() {
        // def xnor(A,B) = /xor(A,B)
        let interner = Interner::new();
        let a = interner.get_or_intern("A");
        let b = interner.get_or_intern("B");
        let xor = interner.get_or_intern("xor");
        let xnor = interner.get_or_intern("xnor");
        let defs: DefinitionTable = [
            xor_def(&interner),
            Definition::new(
                xnor,
                vec![a, b],
                Expr::not(Expr::call(xor, vec![Expr::signal(a), Expr::signal(b)])),
            ),
        ]
        .into_iter()
        .collect();

        let (p, q) = (interner.get_or_intern("P"), interner.get_or_intern("Q"));
        let mut env = Environment::new(&defs, &interner);
        env.set(p, true);
        env.set(q, true);
        let call = Expr::call(xnor, vec![Expr::signal(p), Expr::signal(q)]);
        assert!(eval_expr(&call, &env).unwrap());
    }

    #[test]
    fn undefined_function() {
        let interner = Interner::new();
        let defs = DefinitionTable::new();
        let env = Environment::new(&defs, &interner);
        let call = Expr::call(interner.get_or_intern("nope"), vec![]);
        match eval_expr(&call, &env) {
            Err(SimError::UndefinedFunction { name }) => assert_eq!(name, "nope"),
            other => panic!("expected UndefinedFunction, got {other:?}"),
        }
    }

    #[test]
    fn too_few_arguments() {
        let interner = Interner::new();
        let defs: DefinitionTable = std::iter::once(xor_def(&interner)).collect();
        let mut env = Environment::new(&defs, &interner);
        env.set(interner.get_or_intern("P"), true);
        let call = Expr::call(interner.get_or_intern("xor"), vec![sig(&interner, "P")]);
        match eval_expr(&call, &env) {
            Err(SimError::ArityMismatch {
                function,
                expected,
                got,
            }) => {
                assert_eq!(function, "xor");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("expected ArityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn arity_checked_before_arguments() {
        // The argument is unbound; the arity error must win.
        let interner = Interner::new();
        let defs: DefinitionTable = std::iter::once(xor_def(&interner)).collect();
        let env = Environment::new(&defs, &interner);
        let call = Expr::call(
            interner.get_or_intern("xor"),
            vec![
                sig(&interner, "Ghost"),
                sig(&interner, "Ghost"),
                sig(&interner, "Ghost"),
            ],
        );
        assert!(matches!(
            eval_expr(&call, &env),
            Err(SimError::ArityMismatch { got: 3, .. })
        ));
    }

    #[test]
    fn runaway_recursion_is_bounded() {
        // def spin(A) = spin(A)
        let interner = Interner::new();
        let a = interner.get_or_intern("A");
        let spin = interner.get_or_intern("spin");
        let defs: DefinitionTable = std::iter::once(Definition::new(
            spin,
            vec![a],
            Expr::call(spin, vec![Expr::signal(a)]),
        ))
        .collect();
        let mut env = Environment::new(&defs, &interner);
        env.set_max_call_depth(16);
        env.set(a, true);
        let call = Expr::call(spin, vec![Expr::signal(a)]);
        match eval_expr(&call, &env) {
            Err(SimError::CallDepthExceeded { function, limit }) => {
                assert_eq!(function, "spin");
                assert_eq!(limit, 16);
            }
            other => panic!("expected CallDepthExceeded, got {other:?}"),
        }
    }

    #[test]
    fn exec_update_binds_target() {
        let interner = Interner::new();
        let defs = DefinitionTable::new();
        let mut env = Environment::new(&defs, &interner);
        let (x, y) = (interner.get_or_intern("X"), interner.get_or_intern("Y"));
        env.set(x, false);
        let update = Update::new(y, Expr::not(Expr::signal(x)));
        assert!(exec_update(&update, &mut env).unwrap());
        assert!(env.get(y).unwrap());
    }
}
