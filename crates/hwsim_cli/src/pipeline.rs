//! Loading steps shared by the `run` and `check` commands.

use std::path::{Path, PathBuf};

use hwsim_common::Interner;
use hwsim_config::RunConfig;
use hwsim_ir::Circuit;

use crate::GlobalArgs;

/// Resolves the run configuration for a circuit.
///
/// Uses `--config` when given, else `hwsim.toml` next to the circuit file,
/// else the defaults.
pub fn resolve_run_config(
    circuit_path: &Path,
    global: &GlobalArgs,
) -> Result<RunConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &global.config {
        return Ok(hwsim_config::load_config(Path::new(path))?);
    }
    let dir = circuit_path.parent().unwrap_or_else(|| Path::new("."));
    match hwsim_config::discover_config(dir) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using configuration");
            Ok(hwsim_config::load_config(&path)?)
        }
        None => Ok(RunConfig::default()),
    }
}

/// Loads a circuit description.
pub fn load_circuit(
    circuit_path: &Path,
    interner: &Interner,
) -> Result<Circuit, Box<dyn std::error::Error>> {
    let circuit = hwsim_config::load_circuit(circuit_path, interner)?;
    tracing::info!(
        circuit = interner.resolve(circuit.name),
        inputs = circuit.inputs.len(),
        outputs = circuit.outputs.len(),
        latches = circuit.latches.len(),
        updates = circuit.updates.len(),
        "loaded circuit"
    );
    Ok(circuit)
}

/// Picks the waveform output path: `--vcd`, then `waveform.path`, then the
/// circuit file with a `.vcd` extension.
pub fn waveform_path(circuit_path: &Path, cli_path: Option<&str>, config: &RunConfig) -> PathBuf {
    cli_path
        .or(config.waveform.path.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(|| circuit_path.with_extension("vcd"))
}
