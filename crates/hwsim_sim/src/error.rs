//! Simulation error types.
//!
//! Every error aborts the run it occurs in. Names are resolved to strings at
//! the point of failure so the error can be displayed without an interner.

use std::io;

/// Errors that can occur while validating or running a circuit.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A signal was read but has no binding anywhere in the scope chain.
    #[error("signal '{name}' is not defined")]
    UnboundSignal {
        /// The signal name.
        name: String,
    },

    /// A call referenced a function that has no definition.
    #[error("function '{name}' is not defined")]
    UndefinedFunction {
        /// The function name.
        name: String,
    },

    /// A call supplied the wrong number of arguments.
    #[error("function '{function}' expects {expected} argument(s), got {got}")]
    ArityMismatch {
        /// The function name.
        function: String,
        /// Number of formal parameters.
        expected: usize,
        /// Number of actual arguments.
        got: usize,
    },

    /// A declared input has no stimulus trace.
    #[error("no stimulus for input signal '{signal}'")]
    MissingStimulus {
        /// The input signal.
        signal: String,
    },

    /// A declared input has more than one stimulus trace.
    #[error("more than one stimulus for input signal '{signal}'")]
    DuplicateStimulus {
        /// The input signal.
        signal: String,
    },

    /// A stimulus trace drives a signal that is not a declared input.
    #[error("stimulus for '{signal}', which is not a declared input")]
    UndeclaredStimulus {
        /// The driven signal.
        signal: String,
    },

    /// A declared signal uses the name reserved for a latch's delayed value.
    #[error("signal '{signal}' is declared, but names the delayed value of latch '{latch}'")]
    DelayedNameClash {
        /// The latch.
        latch: String,
        /// The declared signal spelled `latch'`.
        signal: String,
    },

    /// Stimulus traces are empty or differ in length.
    #[error("inconsistent stimulus length: {reason}")]
    InconsistentTraceLength {
        /// Which trace broke the rule.
        reason: String,
    },

    /// A stimulus trace ran out before the simulation did.
    #[error("stimulus for '{signal}' has no value for cycle {cycle}")]
    StimulusExhausted {
        /// The input signal.
        signal: String,
        /// The cycle that had no value.
        cycle: usize,
    },

    /// Nested definition calls went deeper than the configured limit.
    #[error("call depth limit {limit} exceeded while calling '{function}'")]
    CallDepthExceeded {
        /// The function whose call hit the limit.
        function: String,
        /// The configured limit.
        limit: usize,
    },

    /// The simulator was stepped after it finished or aborted.
    #[error("invalid simulator state: {reason}")]
    InvalidState {
        /// Description of the misuse.
        reason: String,
    },

    /// An I/O error occurred while writing waveform data.
    #[error("waveform I/O error: {0}")]
    WaveformIo(#[from] io::Error),
}
