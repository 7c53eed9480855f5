//! Plain-text rendering of recorded traces.

use hwsim_common::Interner;
use hwsim_ir::{Circuit, Trace};

/// Renders each trace as `"0101 Signal"`, one per line.
pub fn render_traces(traces: &[Trace], interner: &Interner) -> Vec<String> {
    traces.iter().map(|t| t.render(interner)).collect()
}

/// Renders the traces of a simulated circuit.
///
/// With `echo_inputs` unset, the stimulus traces are left out and only the
/// outputs are rendered.
pub fn render_report(circuit: &Circuit, interner: &Interner, echo_inputs: bool) -> Vec<String> {
    circuit
        .simoutputs
        .iter()
        .skip(if echo_inputs { 0 } else { circuit.inputs.len() })
        .map(|t| t.render(interner))
        .collect()
}
