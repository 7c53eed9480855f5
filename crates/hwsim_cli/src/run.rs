//! The `hwsim run` command: simulate a circuit and print its traces.
//!
//! Traces go to stdout as `0101 Signal` lines, inputs first unless the
//! configuration turns that off. Status messages go to stderr.

use std::path::Path;

use hwsim_common::Interner;
use hwsim_sim::SimConfig;

use crate::pipeline::{load_circuit, resolve_run_config, waveform_path};
use crate::{GlobalArgs, RunArgs};

/// Runs the `hwsim run` command. Returns exit code 0 on success.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let lines = simulate_file(args, global)?;
    for line in &lines {
        println!("{line}");
    }
    Ok(0)
}

/// Loads, simulates and renders a circuit file.
fn simulate_file(
    args: &RunArgs,
    global: &GlobalArgs,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let circuit_path = Path::new(&args.circuit);
    let config = resolve_run_config(circuit_path, global)?;

    let interner = Interner::new();
    let mut circuit = load_circuit(circuit_path, &interner)?;

    let record_waveform = !args.no_waveform && (args.vcd.is_some() || config.waveform.enabled);
    let vcd_path = waveform_path(circuit_path, args.vcd.as_deref(), &config);

    let sim_config = SimConfig {
        max_call_depth: config.simulation.max_call_depth,
        waveform_path: record_waveform.then(|| vcd_path.clone()),
        record_waveform,
    };

    if !global.quiet {
        eprintln!("   Simulating {}", interner.resolve(circuit.name));
    }

    if let Err(e) = hwsim_sim::simulate(&mut circuit, &sim_config, &interner) {
        tracing::debug!(
            simlength = circuit.simlength,
            "run aborted; partial traces:\n{}",
            hwsim_sim::render_traces(&circuit.simoutputs, &interner).join("\n")
        );
        return Err(e.into());
    }

    if !global.quiet {
        eprintln!("   Simulated {} cycle(s)", circuit.simlength);
        if record_waveform {
            eprintln!("   Waveform written to {}", vcd_path.display());
        }
    }

    Ok(hwsim_sim::render_report(
        &circuit,
        &interner,
        config.report.echo_inputs,
    ))
}
