//! Loading of `hwsim.toml` run settings and JSON circuit descriptions.
//!
//! [`load_config`] reads the optional run configuration; [`load_circuit`]
//! turns a JSON circuit description into an interned [`hwsim_ir::Circuit`].

#![warn(missing_docs)]

pub mod circuit;
pub mod error;
pub mod loader;
pub mod types;

pub use circuit::{CircuitFile, DefinitionFile, ExprFile, StimulusFile, UpdateFile};
pub use error::ConfigError;
pub use loader::{
    discover_config, load_circuit, load_circuit_from_str, load_config, load_config_from_str,
    CONFIG_FILE_NAME,
};
pub use types::*;
