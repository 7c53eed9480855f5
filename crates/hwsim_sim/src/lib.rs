//! Cycle-based simulator for boolean circuits.
//!
//! This crate evaluates a [`Circuit`] built by `hwsim_ir`: each cycle it
//! binds the stimulus, carries latch state through the delayed `L'` names,
//! evaluates the update equations in declaration order and records traces.
//!
//! # Usage
//!
//! ```ignore
//! use hwsim_sim::{simulate, SimConfig};
//!
//! simulate(&mut circuit, &SimConfig::default(), &interner)?;
//! for line in hwsim_sim::render_report(&circuit, &interner, true) {
//!     println!("{line}");
//! }
//! ```
//!
//! # Modules
//!
//! - `error` — Simulation error types
//! - `env` — Scoped signal environments
//! - `evaluator` — Expression evaluation and update execution
//! - `kernel` — The per-cycle simulation state machine
//! - `waveform` — Waveform recording (VCD format)
//! - `report` — Text rendering of traces

#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod evaluator;
pub mod kernel;
pub mod report;
pub mod waveform;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use hwsim_common::Interner;
use hwsim_ir::Circuit;

pub use env::{Environment, DEFAULT_MAX_CALL_DEPTH};
pub use error::SimError;
pub use evaluator::{eval_expr, exec_update};
pub use kernel::{SimResult, SimState, Simulator, StepResult};
pub use report::{render_report, render_traces};
pub use waveform::{VcdRecorder, WaveformRecorder};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Maximum nesting of definition calls.
    pub max_call_depth: usize,
    /// Optional path for VCD output.
    pub waveform_path: Option<PathBuf>,
    /// Whether to record a waveform. Ignored if `waveform_path` is `None`.
    pub record_waveform: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            waveform_path: None,
            record_waveform: false,
        }
    }
}

/// Runs `circuit` to completion and stores the results in it.
///
/// On return `circuit.simlength` and `circuit.simoutputs` hold the run's
/// traces, even when the run failed part way (cycles that were not reached
/// read as `0`).
pub fn simulate(
    circuit: &mut Circuit,
    config: &SimConfig,
    interner: &Interner,
) -> Result<(), SimError> {
    let (outcome, result) = {
        let mut sim = Simulator::new(circuit, interner);
        sim.set_max_call_depth(config.max_call_depth);

        if config.record_waveform {
            if let Some(path) = &config.waveform_path {
                let file = File::create(path)?;
                sim.set_recorder(Box::new(VcdRecorder::new(BufWriter::new(file))));
            }
        }

        let outcome = sim.run();
        (outcome, sim.into_result())
    };

    circuit.simlength = result.simlength;
    circuit.simoutputs = result.traces;
    outcome
}
