//! Cycle-based simulation kernel.
//!
//! [`Simulator`] drives one run of a [`Circuit`] through the states
//! `Uninitialized → Initialized → Running(cycle) → Done`. Every cycle binds
//! the stimulus values, shifts each latch into its delayed slot, evaluates
//! the update equations once in declaration order, and records the traced
//! signals. Any error moves the simulator to `Aborted`; traces filled by
//! earlier cycles stay readable.

use hwsim_common::{Ident, Interner};
use hwsim_ir::{Circuit, Trace};

use crate::env::Environment;
use crate::error::SimError;
use crate::evaluator::exec_update;
use crate::waveform::WaveformRecorder;

/// Lifecycle of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Nothing has been validated or evaluated yet.
    Uninitialized,
    /// Cycle 0 has been evaluated.
    Initialized,
    /// The given cycle (≥ 1) has been evaluated.
    Running {
        /// The last evaluated cycle.
        cycle: usize,
    },
    /// All cycles have been evaluated.
    Done,
    /// A step failed; the run cannot continue.
    Aborted,
}

/// The result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// More cycles remain.
    Continued,
    /// The run is complete.
    Done,
}

/// The traces produced by a run.
#[derive(Debug, Clone)]
pub struct SimResult {
    /// Number of cycles the stimulus asked for.
    pub simlength: usize,
    /// Number of cycles actually evaluated.
    pub cycles: usize,
    /// Input traces in declaration order, then output traces in declaration order.
    pub traces: Vec<Trace>,
}

/// A latch's current-value name and delayed-value name (`L` and `L'`).
#[derive(Debug, Clone, Copy)]
struct LatchSlot {
    current: Ident,
    delayed: Ident,
}

/// Simulates one circuit.
///
/// The simulator borrows the circuit for the whole run and owns the
/// environment and the recorded traces.
pub struct Simulator<'c> {
    circuit: &'c Circuit,
    interner: &'c Interner,
    env: Environment<'c>,
    state: SimState,
    simlength: usize,
    /// Completed cycles.
    cycles: usize,
    /// Stimulus for each input, aligned with `circuit.inputs`.
    stimulus: Vec<&'c Trace>,
    latches: Vec<LatchSlot>,
    /// Inputs first, then outputs.
    traces: Vec<Trace>,
    recorder: Option<Box<dyn WaveformRecorder>>,
}

impl<'c> Simulator<'c> {
    /// Creates a simulator for `circuit`. Nothing is evaluated until the
    /// first [`step`](Self::step).
    pub fn new(circuit: &'c Circuit, interner: &'c Interner) -> Self {
        let latches = circuit
            .latches
            .iter()
            .map(|&latch| LatchSlot {
                current: latch,
                delayed: interner.primed(latch),
            })
            .collect();

        Self {
            circuit,
            interner,
            env: Environment::new(&circuit.definitions, interner),
            state: SimState::Uninitialized,
            simlength: 0,
            cycles: 0,
            stimulus: Vec::new(),
            latches,
            traces: Vec::new(),
            recorder: None,
        }
    }

    /// Sets the limit on nested definition calls.
    pub fn set_max_call_depth(&mut self, max: usize) {
        self.env.set_max_call_depth(max);
    }

    /// Attaches a waveform recorder. Must be called before the first step to
    /// capture the whole run.
    pub fn set_recorder(&mut self, recorder: Box<dyn WaveformRecorder>) {
        self.recorder = Some(recorder);
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> SimState {
        self.state
    }

    /// Returns the number of cycles this run will take, once validated.
    pub fn simlength(&self) -> usize {
        self.simlength
    }

    /// Returns the number of cycles evaluated so far.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Returns the traces recorded so far.
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Returns the trace recorded for `signal`, if it is traced.
    pub fn trace(&self, signal: Ident) -> Option<&Trace> {
        self.traces.iter().find(|t| t.signal == signal)
    }

    /// Returns the root environment.
    pub fn env(&self) -> &Environment<'c> {
        &self.env
    }

    /// Checks the stimulus against the declared inputs and derives the
    /// simulation length.
    ///
    /// Every input needs exactly one trace, every trace must drive a
    /// declared input, and all traces must have the same non-zero length.
    /// No declared signal may take a latch's delayed name `L'`.
    pub fn validate(&mut self) -> Result<usize, SimError> {
        let circuit = self.circuit;
        let name = |id: Ident| self.interner.resolve(id).to_string();

        if let Some(slot) = self.latches.iter().find(|s| circuit.is_declared(s.delayed)) {
            return Err(SimError::DelayedNameClash {
                latch: name(slot.current),
                signal: name(slot.delayed),
            });
        }

        if let Some(stray) = circuit
            .siminputs
            .iter()
            .find(|t| !circuit.inputs.contains(&t.signal))
        {
            return Err(SimError::UndeclaredStimulus {
                signal: name(stray.signal),
            });
        }

        let mut stimulus = Vec::with_capacity(circuit.inputs.len());
        for &input in &circuit.inputs {
            let trace = circuit
                .stimulus(input)
                .ok_or_else(|| SimError::MissingStimulus {
                    signal: name(input),
                })?;
            if circuit.siminputs.iter().filter(|t| t.signal == input).count() > 1 {
                return Err(SimError::DuplicateStimulus {
                    signal: name(input),
                });
            }
            stimulus.push(trace);
        }

        let mut expected: Option<&Trace> = None;
        for &trace in &stimulus {
            if trace.is_empty() {
                return Err(SimError::InconsistentTraceLength {
                    reason: format!("'{}' has no values", name(trace.signal)),
                });
            }
            match expected {
                None => expected = Some(trace),
                Some(first) if first.len() != trace.len() => {
                    return Err(SimError::InconsistentTraceLength {
                        reason: format!(
                            "'{}' has {} values but '{}' has {}",
                            name(trace.signal),
                            trace.len(),
                            name(first.signal),
                            first.len()
                        ),
                    });
                }
                Some(_) => {}
            }
        }

        let simlength = expected
            .map(Trace::len)
            .ok_or_else(|| SimError::InconsistentTraceLength {
                reason: "no stimulus to derive the simulation length from".into(),
            })?;

        self.stimulus = stimulus;
        self.simlength = simlength;
        tracing::debug!(
            circuit = self.interner.resolve(circuit.name),
            simlength,
            "stimulus validated"
        );
        Ok(simlength)
    }

    /// Advances the simulation by one cycle.
    ///
    /// The first call validates the stimulus and evaluates cycle 0. Stepping
    /// a finished simulator is a no-op; stepping an aborted one is an error.
    pub fn step(&mut self) -> Result<StepResult, SimError> {
        let result = match self.state {
            SimState::Done => return Ok(StepResult::Done),
            SimState::Aborted => {
                return Err(SimError::InvalidState {
                    reason: "simulation was aborted by an earlier error".into(),
                })
            }
            SimState::Uninitialized => self.initialize(),
            SimState::Initialized | SimState::Running { .. } => self.advance(),
        };
        if result.is_err() {
            self.state = SimState::Aborted;
            self.close_waveform();
        }
        result
    }

    /// Steps until every cycle has been evaluated.
    pub fn run(&mut self) -> Result<(), SimError> {
        while self.step()? == StepResult::Continued {}
        Ok(())
    }

    /// Runs to completion and returns the traces.
    pub fn run_to_completion(mut self) -> Result<SimResult, SimError> {
        self.run()?;
        Ok(self.into_result())
    }

    /// Consumes the simulator, returning whatever has been recorded.
    pub fn into_result(self) -> SimResult {
        SimResult {
            simlength: self.simlength,
            cycles: self.cycles,
            traces: self.traces,
        }
    }

    /// Cycle 0: bind the first stimulus values, reset every delayed latch
    /// value to `false`, and evaluate the updates.
    fn initialize(&mut self) -> Result<StepResult, SimError> {
        let simlength = self.validate()?;
        let circuit = self.circuit;

        self.traces = circuit
            .inputs
            .iter()
            .chain(&circuit.outputs)
            .map(|&signal| Trace::zeroed(signal, simlength))
            .collect();
        self.open_waveform()?;

        self.bind_inputs(0)?;
        for latch in &self.latches {
            self.env.set(latch.delayed, false);
        }
        self.finish_cycle(0)
    }

    /// Cycle `i ≥ 1`: bind the stimulus, copy each latch into its delayed
    /// slot before the updates run, then evaluate the updates.
    fn advance(&mut self) -> Result<StepResult, SimError> {
        let cycle = self.cycles;
        self.bind_inputs(cycle)?;
        for latch in &self.latches {
            let value = self.env.get(latch.current)?;
            self.env.set(latch.delayed, value);
        }
        self.finish_cycle(cycle)
    }

    fn bind_inputs(&mut self, cycle: usize) -> Result<(), SimError> {
        for (idx, (&input, trace)) in self
            .circuit
            .inputs
            .iter()
            .zip(&self.stimulus)
            .enumerate()
        {
            let value = trace
                .get(cycle)
                .ok_or_else(|| SimError::StimulusExhausted {
                    signal: self.interner.resolve(input).to_string(),
                    cycle,
                })?;
            self.env.set(input, value);
            self.traces[idx].values[cycle] = value;
        }
        Ok(())
    }

    /// Evaluates the updates, records the outputs and the waveform, and
    /// moves to the next state.
    fn finish_cycle(&mut self, cycle: usize) -> Result<StepResult, SimError> {
        for update in &self.circuit.updates {
            exec_update(update, &mut self.env)?;
        }

        let first_output = self.circuit.inputs.len();
        for trace in &mut self.traces[first_output..] {
            trace.values[cycle] = self.env.get(trace.signal)?;
        }
        self.record_waveform(cycle)?;

        tracing::trace!(cycle, env = %self.env, "cycle evaluated");
        self.cycles = cycle + 1;

        if self.cycles == self.simlength {
            if let Some(recorder) = self.recorder.as_mut() {
                recorder.finalize()?;
            }
            tracing::debug!(cycles = self.cycles, "simulation done");
            self.state = SimState::Done;
            Ok(StepResult::Done)
        } else {
            self.state = if cycle == 0 {
                SimState::Initialized
            } else {
                SimState::Running { cycle }
            };
            Ok(StepResult::Continued)
        }
    }

    /// Flushes whatever an aborted run recorded. The run's own error is the
    /// one reported, so a failure here is only logged.
    fn close_waveform(&mut self) {
        if let Some(recorder) = self.recorder.as_mut() {
            if let Err(e) = recorder.finalize() {
                tracing::warn!(error = %e, "could not finalize waveform after abort");
            }
        }
    }

        fn open_waveform(&mut self) -> Result<(), SimError> {
        let Some(recorder) = self.recorder.as_mut() else {
            return Ok(());
        };
        recorder.begin_scope(self.interner.resolve(self.circuit.name))?;
        for trace in &self.traces {
            recorder.register_signal(trace.signal, self.interner.resolve(trace.signal))?;
        }
        recorder.end_scope()
    }

    /// Emits the values that changed since the previous cycle (all values
    /// at cycle 0).
    fn record_waveform(&mut self, cycle: usize) -> Result<(), SimError> {
        let Some(recorder) = self.recorder.as_mut() else {
            return Ok(());
        };
        for trace in &self.traces {
            let value = trace.values[cycle];
            if cycle == 0 || trace.values[cycle - 1] != value {
                recorder.record_change(cycle, trace.signal, value)?;
            }
        }
        Ok(())
    }
}
