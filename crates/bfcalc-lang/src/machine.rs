pub mod error;
pub mod program;
pub mod tape;

use std::io::{self, Read};

use error::{Location, MachineError};
use program::{Instruction, Program};
use tape::Tape;

pub const DEFAULT_TAPE_LEN: usize = 30_000;

/// What `,` does once the input source has no more bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// Fail with [`MachineError::InputExhausted`].
    #[default]
    Error,
    /// Leave the current cell as it is.
    Unchanged,
    /// Store 0 in the current cell.
    Zero,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub tape_len: usize,
    pub eof: EofPolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tape_len: DEFAULT_TAPE_LEN,
            eof: EofPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

/// Executes one program against its own tape.
///
/// Loop targets are resolved while running: an entered `[` pushes its position onto the loop
/// stack and a skipped one scans forward for its partner, so a jump costs a linear scan in the
/// worst case.
#[derive(Debug, Clone)]
pub struct Machine {
    program: Program,
    tape: Tape,
    pc: usize,
    loop_stack: Vec<usize>,
    output: Vec<u8>,
    eof: EofPolicy,
    steps: u64,
}

impl Machine {
    pub fn new(program: Program, options: Options) -> Result<Self, MachineError> {
        if options.tape_len == 0 {
            return Err(MachineError::InvalidTapeLength(options.tape_len));
        }

        Ok(Self {
            program,
            tape: Tape::new(options.tape_len),
            pc: 0,
            loop_stack: Vec::new(),
            output: Vec::new(),
            eof: options.eof,
            steps: 0,
        })
    }

    pub fn state(&self) -> State {
        if self.pc < self.program.len() {
            State::Running
        } else {
            State::Halted
        }
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn loop_depth(&self) -> usize {
        self.loop_stack.len()
    }

    pub fn into_parts(self) -> (Vec<u8>, Tape) {
        (self.output, self.tape)
    }

    /// Runs until the program counter moves past the last instruction.
    pub fn run<R: Read>(&mut self, input: &mut R) -> Result<&[u8], MachineError> {
        while self.step(input)? == State::Running {}

        if !self.loop_stack.is_empty() {
            tracing::warn!(
                open_loops = self.loop_stack.len(),
                "program halted inside an unclosed loop"
            );
        }
        tracing::debug!(
            steps = self.steps,
            output_len = self.output.len(),
            "machine halted"
        );

        Ok(&self.output)
    }

    /// Executes the instruction under the program counter.
    pub fn step<R: Read>(&mut self, input: &mut R) -> Result<State, MachineError> {
        let Some(op) = self.program.get(self.pc).copied() else {
            return Ok(State::Halted);
        };
        let location = Location {
            pc: self.pc,
            offset: op.offset,
        };

        match op.instruction {
            Instruction::Right => self.shift(1, location)?,
            Instruction::Left => self.shift(-1, location)?,
            Instruction::Increment => self.tape.increment(),
            Instruction::Decrement => self.tape.decrement(),
            Instruction::Output => self.output.push(self.tape.current()),
            Instruction::Input => self.read(input, location)?,
            Instruction::LoopStart => {
                if self.tape.current() == 0 {
                    self.pc = self.matching_end(location)?;
                } else {
                    self.loop_stack.push(self.pc);
                }
            }
            Instruction::LoopEnd => {
                if self.tape.current() != 0 {
                    let start = *self
                        .loop_stack
                        .last()
                        .ok_or(MachineError::UnbalancedLoop(location))?;
                    tracing::trace!(pc = self.pc, target = start, "loop back");
                    self.pc = start;
                } else if self.loop_stack.pop().is_none() {
                    return Err(MachineError::UnbalancedLoop(location));
                }
            }
        }

        self.pc += 1;
        self.steps += 1;

        Ok(self.state())
    }

    fn shift(&mut self, delta: isize, location: Location) -> Result<(), MachineError> {
        self.tape.shift(delta).map(|_| ()).ok_or_else(|| {
            MachineError::PointerOutOfBounds(location, self.tape.pointer() as isize + delta)
        })
    }

    fn read<R: Read>(&mut self, input: &mut R, location: Location) -> Result<(), MachineError> {
        let mut byte = [0u8; 1];

        match input.read_exact(&mut byte) {
            Ok(()) => self.tape.set_current(byte[0]),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => match self.eof {
                EofPolicy::Error => return Err(MachineError::InputExhausted(location)),
                EofPolicy::Unchanged => {}
                EofPolicy::Zero => self.tape.set_current(0),
            },
            Err(e) => return Err(MachineError::InputFailed(location, e.to_string())),
        }

        Ok(())
    }

    /// Position of the `]` closing the `[` at `location`.
    fn matching_end(&self, location: Location) -> Result<usize, MachineError> {
        let mut depth = 1usize;
        let mut pc = location.pc;

        while depth > 0 {
            pc += 1;
            match self.program.get(pc).map(|op| op.instruction) {
                Some(Instruction::LoopStart) => depth += 1,
                Some(Instruction::LoopEnd) => depth -= 1,
                Some(_) => {}
                None => return Err(MachineError::UnbalancedLoop(location)),
            }
        }

        Ok(pc)
    }
}

/// Runs `program` on a fresh machine and returns everything it printed.
pub fn run<R: Read>(
    program: Program,
    input: &mut R,
    options: Options,
) -> Result<Vec<u8>, MachineError> {
    let mut machine = Machine::new(program, options)?;
    machine.run(input)?;
    Ok(machine.into_parts().0)
}
