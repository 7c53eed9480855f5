//! Waveform recording for simulation output.
//!
//! The [`WaveformRecorder`] trait abstracts waveform output. [`VcdRecorder`]
//! writes IEEE 1364 Value Change Dump text that GTKWave, Surfer and other
//! viewers can open. One simulated cycle is one time unit.

use std::collections::HashMap;
use std::io::Write;

use hwsim_common::Ident;

use crate::error::SimError;

/// Receives the value changes of traced signals during a run.
pub trait WaveformRecorder {
    /// Registers a one-bit signal for recording.
    fn register_signal(&mut self, id: Ident, name: &str) -> Result<(), SimError>;

    /// Opens a new scope in the waveform hierarchy.
    fn begin_scope(&mut self, name: &str) -> Result<(), SimError>;

    /// Closes the current scope.
    fn end_scope(&mut self) -> Result<(), SimError>;

    /// Records the value of `id` at `cycle`.
    fn record_change(&mut self, cycle: usize, id: Ident, value: bool) -> Result<(), SimError>;

    /// Finalizes the output (flush, trailer).
    fn finalize(&mut self) -> Result<(), SimError>;
}

const HEADER: &str = "$version\n  hwsim circuit simulator\n$end\n$timescale\n  1ns\n$end\n";

/// Where the writer is within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Nothing written yet.
    Empty,
    /// Scopes and variable declarations.
    Declarations,
    /// The `$dumpvars` block holding the first cycle's values.
    Dump { cycle: usize },
    /// Value changes after the initial dump.
    Changes { cycle: usize },
    /// `finalize` has run.
    Finished,
}

/// VCD (Value Change Dump) recorder.
pub struct VcdRecorder<W: Write> {
    writer: W,
    codes: HashMap<Ident, String>,
    section: Section,
}

impl<W: Write> VcdRecorder<W> {
    /// Creates a new VCD recorder writing to the given output.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            codes: HashMap::new(),
            section: Section::Empty,
        }
    }

    /// Consumes the recorder and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn declarations(&mut self) -> Result<(), SimError> {
        match self.section {
            Section::Empty => {
                self.writer.write_all(HEADER.as_bytes())?;
                self.section = Section::Declarations;
                Ok(())
            }
            Section::Declarations => Ok(()),
            _ => Err(SimError::InvalidState {
                reason: "VCD declarations must precede the first value change".into(),
            }),
        }
    }

    /// Moves the writer to `cycle`, closing the declarations or the initial
    /// dump as needed.
    fn enter_cycle(&mut self, cycle: usize) -> Result<(), SimError> {
        match self.section {
            Section::Empty | Section::Declarations => {
                self.declarations()?;
                writeln!(self.writer, "$enddefinitions $end")?;
                writeln!(self.writer, "#{cycle}")?;
                writeln!(self.writer, "$dumpvars")?;
                self.section = Section::Dump { cycle };
            }
            Section::Dump { cycle: current } | Section::Changes { cycle: current }
                if current == cycle => {}
            Section::Dump { .. } => {
                writeln!(self.writer, "$end")?;
                writeln!(self.writer, "#{cycle}")?;
                self.section = Section::Changes { cycle };
            }
            Section::Changes { .. } => {
                writeln!(self.writer, "#{cycle}")?;
                self.section = Section::Changes { cycle };
            }
            Section::Finished => {
                return Err(SimError::InvalidState {
                    reason: "VCD output already finalized".into(),
                })
            }
        }
        Ok(())
    }
}

/// Short identifier codes over the printable ASCII range `!`..=`~`:
/// `!`, `"`, ... `~`, `!!`, `"!`, ...
fn id_code(index: usize) -> String {
    let mut code = String::new();
    let mut rest = index + 1;
    while rest > 0 {
        rest -= 1;
        code.push(char::from(b'!' + (rest % 94) as u8));
        rest /= 94;
    }
    code
}

impl<W: Write> WaveformRecorder for VcdRecorder<W> {
    fn register_signal(&mut self, id: Ident, name: &str) -> Result<(), SimError> {
        self.declarations()?;
        let code = id_code(self.codes.len());
        writeln!(self.writer, "$var wire 1 {code} {name} $end")?;
        self.codes.insert(id, code);
        Ok(())
    }

    fn begin_scope(&mut self, name: &str) -> Result<(), SimError> {
        self.declarations()?;
        writeln!(self.writer, "$scope module {name} $end")?;
        Ok(())
    }

    fn end_scope(&mut self) -> Result<(), SimError> {
        self.declarations()?;
        writeln!(self.writer, "$upscope $end")?;
        Ok(())
    }

    fn record_change(&mut self, cycle: usize, id: Ident, value: bool) -> Result<(), SimError> {
        if !self.codes.contains_key(&id) {
            return Err(SimError::InvalidState {
                reason: format!("unregistered VCD signal {}", id.index()),
            });
        }
        self.enter_cycle(cycle)?;
        if let Some(code) = self.codes.get(&id) {
            writeln!(self.writer, "{}{code}", u8::from(value))?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), SimError> {
        match self.section {
            Section::Empty | Section::Declarations => {
                self.declarations()?;
                writeln!(self.writer, "$enddefinitions $end")?;
            }
            Section::Dump { .. } => writeln!(self.writer, "$end")?,
            Section::Changes { .. } => {}
            Section::Finished => return Ok(()),
        }
        self.section = Section::Finished;
        self.writer.flush()?;
        Ok(())
    }
}
