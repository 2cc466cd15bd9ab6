use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Right,
    Left,
    Increment,
    Decrement,
    Output,
    Input,
    LoopStart,
    LoopEnd,
}

impl Instruction {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'>' => Some(Instruction::Right),
            b'<' => Some(Instruction::Left),
            b'+' => Some(Instruction::Increment),
            b'-' => Some(Instruction::Decrement),
            b'.' => Some(Instruction::Output),
            b',' => Some(Instruction::Input),
            b'[' => Some(Instruction::LoopStart),
            b']' => Some(Instruction::LoopEnd),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Instruction::Right => '>',
            Instruction::Left => '<',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::LoopStart => '[',
            Instruction::LoopEnd => ']',
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// An instruction together with the byte offset it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Op {
    pub instruction: Instruction,
    pub offset: usize,
}

/// A loaded program. Every byte that is not an instruction is treated as a comment and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    ops: Vec<Op>,
}

impl Program {
    pub fn parse(source: &[u8]) -> Self {
        let ops = source
            .iter()
            .enumerate()
            .filter_map(|(offset, byte)| {
                Instruction::from_byte(*byte).map(|instruction| Op {
                    instruction,
                    offset,
                })
            })
            .collect();

        Self { ops }
    }

    #[inline(always)]
    pub fn get(&self, pc: usize) -> Option<&Op> {
        self.ops.get(pc)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn instructions(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.ops.iter().map(|op| op.instruction)
    }
}

impl From<&str> for Program {
    fn from(source: &str) -> Self {
        Program::parse(source.as_bytes())
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        self.instructions()
            .try_for_each(|instruction| write!(f, "{}", instruction))
    }
}
