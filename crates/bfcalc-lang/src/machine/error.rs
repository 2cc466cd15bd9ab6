use thiserror::Error;

/// Where an instruction lives: its index in the program and its byte offset in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub pc: usize,
    pub offset: usize,
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum MachineError {
    #[error("Unbalanced loop at instruction {}", .0.pc)]
    UnbalancedLoop(Location),
    #[error("Pointer moved outside the tape (cell {1})")]
    PointerOutOfBounds(Location, isize),
    #[error("Input exhausted")]
    InputExhausted(Location),
    #[error("Failed to read input: {1}")]
    InputFailed(Location, String),
    #[error("Invalid tape length {0}")]
    InvalidTapeLength(usize),
}

impl MachineError {
    #[cold]
    pub fn location(&self) -> Option<Location> {
        match self {
            MachineError::UnbalancedLoop(location) => Some(*location),
            MachineError::PointerOutOfBounds(location, _) => Some(*location),
            MachineError::InputExhausted(location) => Some(*location),
            MachineError::InputFailed(location, _) => Some(*location),
            MachineError::InvalidTapeLength(_) => None,
        }
    }
}
