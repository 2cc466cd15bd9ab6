//! `bfcalc-lang` provides the tape machine, encoder and expression evaluator behind the
//! `bfcalc` command.
//!
//! A program is a sequence of the eight instructions `> < + - . , [ ]`; everything else is a
//! comment. Running a program collects what it prints. When the printed text has the shape
//! `label=expression`, the expression is evaluated and the line becomes `label=value`.
//!
//! ## Examples
//!
//! ```rust
//! use bfcalc_lang::Engine;
//!
//! let engine = Engine::default();
//!
//! // Encode a labeled expression into a program, then run it.
//! let program = engine.encode("answer=6*7").unwrap();
//! let outcome = engine.run(program.as_bytes(), std::io::empty()).unwrap();
//! assert_eq!(outcome.text, "answer=42");
//!
//! // Text without `=` is passed through.
//! let program = bfcalc_lang::encode(b"hi");
//! assert_eq!(engine.run(program.as_bytes(), std::io::empty()).unwrap().text, "hi");
//!
//! // The evaluator on its own.
//! assert_eq!(bfcalc_lang::evaluate("10-2-3"), Ok(5));
//! ```
mod encoder;
mod engine;
mod error;
mod expr;
mod format;
mod machine;

pub use encoder::{EncodeError, encode, encode_byte, encode_labeled};
pub use engine::{Engine, Outcome};
pub use error::{Error, InnerError};
pub use expr::error::EvalError;
pub use expr::evaluate;
pub use expr::token::{Operator, Token, TokenKind, tokenize};
pub use format::{LABEL_SEPARATOR, format_output, split_label};
pub use machine::error::{Location, MachineError};
pub use machine::program::{Instruction, Op, Program};
pub use machine::tape::Tape;
pub use machine::{
    DEFAULT_TAPE_LEN, EofPolicy, Machine, Options as MachineOptions, State, run,
};

pub type CalcResult<T> = Result<T, Box<Error>>;
