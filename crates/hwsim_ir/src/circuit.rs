//! The circuit: declarations, definitions, update equations and stimulus.

use hwsim_common::Ident;
use serde::{Deserialize, Serialize};

use crate::def::DefinitionTable;
use crate::expr::Expr;
use crate::trace::Trace;

/// One line of the update section (`Signal1 = /Signal2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// The signal being assigned.
    pub target: Ident,
    /// The value it receives each cycle.
    pub expr: Expr,
}

impl Update {
    /// Creates a new update equation.
    pub fn new(target: Ident, expr: Expr) -> Self {
        Self { target, expr }
    }
}

/// A complete circuit ready for simulation.
///
/// `inputs`, `outputs` and `latches` are expected to be disjoint, and each
/// output and latch is expected to be assigned by exactly one update. These
/// are the builder's responsibility; the simulator does not re-check them.
///
/// `simoutputs` and `simlength` are not part of the source description. They
/// are empty until a simulation run fills them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// The circuit name.
    pub name: Ident,
    /// Declared input signals, in declaration order.
    pub inputs: Vec<Ident>,
    /// Declared output signals, in declaration order.
    pub outputs: Vec<Ident>,
    /// Declared latches, in declaration order.
    pub latches: Vec<Ident>,
    /// User function definitions.
    pub definitions: DefinitionTable,
    /// Update equations, evaluated in this order every cycle.
    pub updates: Vec<Update>,
    /// One stimulus trace per input.
    pub siminputs: Vec<Trace>,
    /// Traces recorded by the last run: inputs first, then outputs.
    #[serde(default)]
    pub simoutputs: Vec<Trace>,
    /// Number of cycles of the last run.
    #[serde(default)]
    pub simlength: usize,
}

impl Circuit {
    /// Creates a circuit that has not been simulated yet.
    pub fn new(
        name: Ident,
        inputs: Vec<Ident>,
        outputs: Vec<Ident>,
        latches: Vec<Ident>,
        definitions: DefinitionTable,
        updates: Vec<Update>,
        siminputs: Vec<Trace>,
    ) -> Self {
        Self {
            name,
            inputs,
            outputs,
            latches,
            definitions,
            updates,
            siminputs,
            simoutputs: Vec::new(),
            simlength: 0,
        }
    }

    /// Returns the stimulus trace driving `signal`, if any.
    pub fn stimulus(&self, signal: Ident) -> Option<&Trace> {
        self.siminputs.iter().find(|t| t.signal == signal)
    }

    /// Returns `true` if `signal` is declared as an input, output or latch.
    pub fn is_declared(&self, signal: Ident) -> bool {
        self.inputs.contains(&signal)
            || self.outputs.contains(&signal)
            || self.latches.contains(&signal)
    }
}
