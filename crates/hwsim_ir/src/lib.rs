//! Abstract syntax of boolean circuits as consumed by the simulator.
//!
//! A [`Circuit`] bundles the declared [`Ident`](hwsim_common::Ident) signal
//! lists, a [`DefinitionTable`] of user functions, the ordered [`Update`]
//! equations, and the stimulus [`Trace`]s. Builders (a parser, the JSON
//! loader in `hwsim_config`, or test code) construct it once; the simulator
//! only reads it.

#![warn(missing_docs)]

pub mod circuit;
pub mod def;
pub mod expr;
pub mod trace;

pub use circuit::{Circuit, Update};
pub use def::{Definition, DefinitionTable};
pub use expr::Expr;
pub use trace::{format_bits, parse_bits, Trace};
