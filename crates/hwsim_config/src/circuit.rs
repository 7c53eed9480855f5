//! JSON circuit descriptions.
//!
//! A [`CircuitFile`] mirrors the sections of a `.hw` source: declarations,
//! `def`s, updates and the `.simulate` stimulus. Expressions use serde's
//! externally tagged form:
//!
//! ```json
//! {"or": [{"and": [{"signal": "A"}, {"not": {"signal": "B"}}]},
//!         {"call": {"name": "xor", "args": [{"signal": "A"}, {"signal": "B"}]}}]}
//! ```
//!
//! [`CircuitFile::into_circuit`] checks the builder's side of the contract
//! with the simulator and interns every name. Declarations must be disjoint
//! and must leave each latch's delayed name `L'` free. Definitions must be
//! unique, and stimulus must be binary.

use std::collections::HashSet;

use hwsim_common::{Ident, Interner, PRIME};
use hwsim_ir::{parse_bits, Circuit, Definition, DefinitionTable, Expr, Trace, Update};
use serde::Deserialize;

use crate::error::ConfigError;

/// A circuit as written in a JSON description.
#[derive(Debug, Deserialize)]
pub struct CircuitFile {
    /// The circuit name.
    pub name: String,
    /// Input signals.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Output signals.
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Latches.
    #[serde(default)]
    pub latches: Vec<String>,
    /// Function definitions.
    #[serde(default)]
    pub definitions: Vec<DefinitionFile>,
    /// Update equations, in evaluation order.
    #[serde(default)]
    pub updates: Vec<UpdateFile>,
    /// Stimulus, one entry per input.
    #[serde(default)]
    pub simulate: Vec<StimulusFile>,
}

/// `def name(params) = body`
#[derive(Debug, Deserialize)]
pub struct DefinitionFile {
    /// The function name.
    pub name: String,
    /// Formal parameters.
    #[serde(default)]
    pub params: Vec<String>,
    /// The function body.
    pub body: ExprFile,
}

/// `target = expr`
#[derive(Debug, Deserialize)]
pub struct UpdateFile {
    /// The assigned signal.
    pub target: String,
    /// The assigned expression.
    pub expr: ExprFile,
}

/// `signal = 0101...`
#[derive(Debug, Deserialize)]
pub struct StimulusFile {
    /// The driven input.
    pub signal: String,
    /// One `0` or `1` per cycle.
    pub values: String,
}

/// An expression as written in JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExprFile {
    /// `{"signal": "A"}`
    Signal(String),
    /// `{"not": e}`
    Not(Box<ExprFile>),
    /// `{"and": [l, r]}`
    And(Box<ExprFile>, Box<ExprFile>),
    /// `{"or": [l, r]}`
    Or(Box<ExprFile>, Box<ExprFile>),
    /// `{"call": {"name": "f", "args": [...]}}`
    Call {
        /// The called definition.
        name: String,
        /// Actual arguments.
        #[serde(default)]
        args: Vec<ExprFile>,
    },
}

impl ExprFile {
    /// Interns every name and builds the IR expression.
    pub fn lower(&self, interner: &Interner) -> Expr {
        match self {
            ExprFile::Signal(name) => Expr::signal(interner.get_or_intern(name)),
            ExprFile::Not(inner) => Expr::not(inner.lower(interner)),
            ExprFile::And(lhs, rhs) => Expr::and(lhs.lower(interner), rhs.lower(interner)),
            ExprFile::Or(lhs, rhs) => Expr::or(lhs.lower(interner), rhs.lower(interner)),
            ExprFile::Call { name, args } => Expr::call(
                interner.get_or_intern(name),
                args.iter().map(|a| a.lower(interner)).collect(),
            ),
        }
    }
}

impl CircuitFile {
    /// Validates the description and builds an interned [`Circuit`].
    pub fn into_circuit(self, interner: &Interner) -> Result<Circuit, ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::MissingField("name".to_string()));
        }

        let mut declared = HashSet::new();
        for name in self.inputs.iter().chain(&self.outputs).chain(&self.latches) {
            if name.is_empty() {
                return Err(ConfigError::ValidationError(
                    "empty signal name in declarations".to_string(),
                ));
            }
            if !declared.insert(name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "signal '{name}' declared more than once"
                )));
            }
        }
        for latch in &self.latches {
            let delayed = format!("{latch}{PRIME}");
            if declared.contains(delayed.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "signal '{delayed}' clashes with the delayed value of latch '{latch}'"
                )));
            }
        }

        let mut definitions = DefinitionTable::new();
        for def in &self.definitions {
            let mut params = HashSet::new();
            if let Some(dup) = def.params.iter().find(|p| !params.insert(p.as_str())) {
                return Err(ConfigError::ValidationError(format!(
                    "parameter '{dup}' repeated in definition of '{}'",
                    def.name
                )));
            }
            let lowered = Definition::new(
                interner.get_or_intern(&def.name),
                def.params.iter().map(|p| interner.get_or_intern(p)).collect(),
                def.body.lower(interner),
            );
            if definitions.insert(lowered).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "function '{}' defined more than once",
                    def.name
                )));
            }
        }

        let updates = self
            .updates
            .iter()
            .map(|u| Update::new(interner.get_or_intern(&u.target), u.expr.lower(interner)))
            .collect();

        let mut siminputs = Vec::with_capacity(self.simulate.len());
        for stimulus in &self.simulate {
            let values = parse_bits(&stimulus.values).map_err(|c| {
                ConfigError::ValidationError(format!(
                    "stimulus for '{}' contains '{c}', expected only 0 and 1",
                    stimulus.signal
                ))
            })?;
            siminputs.push(Trace::new(interner.get_or_intern(&stimulus.signal), values));
        }

        let intern_all = |names: &[String]| -> Vec<Ident> {
            names.iter().map(|n| interner.get_or_intern(n)).collect()
        };

        Ok(Circuit::new(
            interner.get_or_intern(&self.name),
            intern_all(&self.inputs),
            intern_all(&self.outputs),
            intern_all(&self.latches),
            definitions,
            updates,
            siminputs,
        ))
    }
}
