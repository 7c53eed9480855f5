//! Run settings deserialized from `hwsim.toml`.

use serde::Deserialize;

/// The top-level run configuration. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct RunConfig {
    /// Evaluation limits.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Waveform output settings.
    #[serde(default)]
    pub waveform: WaveformConfig,
    /// Trace report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Evaluation limits.
#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Maximum nesting of definition calls.
    #[serde(default = "default_max_call_depth")]
    pub max_call_depth: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_call_depth: default_max_call_depth(),
        }
    }
}

fn default_max_call_depth() -> usize {
    256
}

/// Waveform output settings.
#[derive(Debug, Default, Deserialize)]
pub struct WaveformConfig {
    /// Whether to write a VCD file.
    #[serde(default)]
    pub enabled: bool,
    /// Output path. Defaults to `<circuit file stem>.vcd` next to the circuit.
    #[serde(default)]
    pub path: Option<String>,
}

/// Trace report settings.
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Print the stimulus traces before the outputs.
    #[serde(default = "default_true")]
    pub echo_inputs: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { echo_inputs: true }
    }
}

fn default_true() -> bool {
    true
}
