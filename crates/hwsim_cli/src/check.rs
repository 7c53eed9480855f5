//! The `hwsim check` command: validate a circuit description and its stimulus.

use std::path::Path;

use hwsim_common::{Ident, Interner};
use hwsim_ir::Circuit;
use hwsim_sim::Simulator;

use crate::pipeline::{load_circuit, resolve_run_config};
use crate::{CheckArgs, GlobalArgs};

/// Runs the `hwsim check` command. Returns exit code 0 if the circuit can be
/// simulated.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let summary = check_file(args, global)?;
    if !global.quiet {
        eprintln!("   {summary}");
    }
    Ok(0)
}

fn check_file(args: &CheckArgs, global: &GlobalArgs) -> Result<String, Box<dyn std::error::Error>> {
    let circuit_path = Path::new(&args.circuit);
    // Surfaces configuration errors alongside circuit errors.
    resolve_run_config(circuit_path, global)?;

    let interner = Interner::new();
    let circuit = load_circuit(circuit_path, &interner)?;
    let simlength = Simulator::new(&circuit, &interner).validate()?;

    for name in unknown_reads(&circuit, &interner) {
        tracing::warn!(signal = %name, "read by an update but never declared or assigned");
    }

    Ok(format!(
        "{}: {} input(s), {} output(s), {} latch(es), {} definition(s), {} cycle(s)",
        interner.resolve(circuit.name),
        circuit.inputs.len(),
        circuit.outputs.len(),
        circuit.latches.len(),
        circuit.definitions.len(),
        simlength
    ))
}

/// Names read by the update equations that nothing binds: not declared,
/// not the delayed value of a declared latch, and not the target of any
/// update. Reading one fails with an unbound-signal error at run time.
fn unknown_reads(circuit: &Circuit, interner: &Interner) -> Vec<String> {
    let bound = |signal: Ident| {
        circuit.is_declared(signal)
            || circuit.updates.iter().any(|u| u.target == signal)
            || interner
                .unprimed(signal)
                .is_some_and(|latch| circuit.latches.contains(&latch))
    };

    let mut unknown: Vec<String> = Vec::new();
    for update in &circuit.updates {
        for signal in update.expr.signals() {
            let name = interner.resolve(signal);
            if !bound(signal) && !unknown.iter().any(|n| n == name) {
                unknown.push(name.to_string());
            }
        }
    }
    unknown
}
