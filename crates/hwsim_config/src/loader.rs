//! File loading for run configurations and circuit descriptions.

use std::path::{Path, PathBuf};

use hwsim_common::Interner;
use hwsim_ir::Circuit;

use crate::circuit::CircuitFile;
use crate::error::ConfigError;
use crate::types::RunConfig;

/// Name of the run configuration file looked up next to a circuit.
pub const CONFIG_FILE_NAME: &str = "hwsim.toml";

/// Loads and validates a run configuration file.
pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a run configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<RunConfig, ConfigError> {
    let config: RunConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Returns `<dir>/hwsim.toml` if it exists.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

fn validate_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.simulation.max_call_depth == 0 {
        return Err(ConfigError::ValidationError(
            "simulation.max_call_depth must be at least 1".to_string(),
        ));
    }
    if let Some(path) = &config.waveform.path {
        if path.is_empty() {
            return Err(ConfigError::MissingField("waveform.path".to_string()));
        }
    }
    Ok(())
}

/// Loads a JSON circuit description and interns it into a [`Circuit`].
pub fn load_circuit(path: &Path, interner: &Interner) -> Result<Circuit, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_circuit_from_str(&content, interner)
}

/// Parses a JSON circuit description from a string.
pub fn load_circuit_from_str(content: &str, interner: &Interner) -> Result<Circuit, ConfigError> {
    let file: CircuitFile =
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    file.into_circuit(interner)
}
