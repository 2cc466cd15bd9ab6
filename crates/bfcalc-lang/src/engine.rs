use std::io::Read;

use crate::{
    CalcResult,
    encoder::{encode, encode_labeled},
    error::{Error, InnerError},
    expr::evaluate,
    format::format_output,
    machine::{self, Machine, program::Program, tape::Tape},
};

/// The result of one program run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Every byte the program printed.
    pub output: Vec<u8>,
    /// The printed bytes decoded as text, with a labeled expression replaced by its value.
    pub text: String,
    /// The tape as the program left it.
    pub tape: Tape,
    pub steps: u64,
}

/// Runs programs, each on a machine of its own.
#[derive(Debug, Clone)]
pub struct Engine {
    options: machine::Options,
    format: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            options: machine::Options::default(),
            format: true,
        }
    }
}

impl Engine {
    pub fn new(options: machine::Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &machine::Options {
        &self.options
    }

    /// When disabled, [`Outcome::text`] is the decoded output as printed.
    pub fn set_format(&mut self, format: bool) {
        self.format = format;
    }

    pub fn run<R: Read>(&self, source: &[u8], mut input: R) -> CalcResult<Outcome> {
        let program = Program::parse(source);
        tracing::debug!(
            instructions = program.len(),
            tape_len = self.options.tape_len,
            "running program"
        );

        let mut machine = Machine::new(program, self.options.clone())
            .map_err(|e| machine_error(source, e.into()))?;
        machine
            .run(&mut input)
            .map_err(|e| machine_error(source, e.into()))?;

        let steps = machine.steps();
        let (output, tape) = machine.into_parts();
        let decoded = String::from_utf8_lossy(&output).into_owned();

        let text = if self.format {
            format_output(&decoded)
                .map_err(|e| Box::new(Error::from_error(decoded.as_str(), e.into())))?
        } else {
            decoded
        };

        Ok(Outcome {
            output,
            text,
            tape,
            steps,
        })
    }

    pub fn evaluate(&self, expr: &str) -> CalcResult<i64> {
        evaluate(expr).map_err(|e| Box::new(Error::from_error(expr, e.into())))
    }

    pub fn encode(&self, text: &str) -> CalcResult<String> {
        encode_labeled(text).map_err(|e| Box::new(Error::from_error(text, e.into())))
    }

    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        encode(bytes)
    }
}

fn machine_error(source: &[u8], cause: InnerError) -> Box<Error> {
    Box::new(Error::from_error(String::from_utf8_lossy(source), cause))
}
