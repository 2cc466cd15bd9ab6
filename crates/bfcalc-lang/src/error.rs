use std::ops::Range;

use miette::{Diagnostic, SourceOffset, SourceSpan};

use crate::{encoder::EncodeError, expr::error::EvalError, machine::error::MachineError};

#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum InnerError {
    #[error(transparent)]
    Machine(#[from] MachineError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Represents a high-level error with diagnostic information for the user.
#[derive(PartialEq, Debug, thiserror::Error)]
#[error("{cause}")]
pub struct Error {
    /// The underlying cause of the error.
    pub cause: InnerError,
    /// The program or expression text the error points into.
    pub source_code: String,
    /// The location in the source code for diagnostics.
    pub location: SourceSpan,
}

impl Error {
    pub fn from_error(source_code: impl Into<String>, cause: InnerError) -> Self {
        let source_code = source_code.into();
        let range: Option<Range<usize>> = match &cause {
            InnerError::Machine(err) => err
                .location()
                .map(|location| location.offset..location.offset + 1),
            InnerError::Eval(err) => Some(err.range().clone()),
            InnerError::Encode(_) => None,
        };

        let location = match range {
            Some(range) => {
                let start = range.start.min(source_code.len());
                let end = range.end.min(source_code.len());
                SourceSpan::new(
                    SourceOffset::from(start),
                    std::cmp::max(end.saturating_sub(start), 1),
                )
            }
            None => SourceSpan::new(SourceOffset::from(0), 0),
        };

        Self {
            cause,
            source_code,
            location,
        }
    }
}

impl Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let c = match &self.cause {
            InnerError::Machine(MachineError::UnbalancedLoop(_)) => "MachineError::UnbalancedLoop",
            InnerError::Machine(MachineError::PointerOutOfBounds(_, _)) => {
                "MachineError::PointerOutOfBounds"
            }
            InnerError::Machine(MachineError::InputExhausted(_)) => "MachineError::InputExhausted",
            InnerError::Machine(MachineError::InputFailed(_, _)) => "MachineError::InputFailed",
            InnerError::Machine(MachineError::InvalidTapeLength(_)) => {
                "MachineError::InvalidTapeLength"
            }
            InnerError::Eval(EvalError::MalformedExpression(_, _)) => {
                "EvalError::MalformedExpression"
            }
            InnerError::Eval(EvalError::NumberOutOfRange(_, _)) => "EvalError::NumberOutOfRange",
            InnerError::Encode(EncodeError::MissingLabelSeparator) => {
                "EncodeError::MissingLabelSeparator"
            }
        };

        Some(Box::new(c))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let msg = match &self.cause {
            InnerError::Machine(MachineError::UnbalancedLoop(_)) => {
                Some("Every `[` needs a matching `]`. Check the brackets around this position.".to_string())
            }
            InnerError::Machine(MachineError::PointerOutOfBounds(_, _)) => {
                Some("The pointer left the tape. Use a longer tape or fix the `<`/`>` moves.".to_string())
            }
            InnerError::Machine(MachineError::InputExhausted(_)) => {
                Some("The program read more input than was given. Provide more input or pick another EOF policy.".to_string())
            }
            InnerError::Machine(MachineError::InvalidTapeLength(_)) => {
                Some("The tape needs at least one cell.".to_string())
            }
            InnerError::Eval(EvalError::MalformedExpression(_, reason)) => Some(format!(
                "The expression must alternate numbers and operators ({reason})."
            )),
            InnerError::Eval(EvalError::NumberOutOfRange(_, _)) => {
                Some(format!("Numbers must not exceed {}.", i64::MAX))
            }
            InnerError::Encode(EncodeError::MissingLabelSeparator) => {
                Some("Write the input as `label=expression`, or encode raw bytes instead.".to_string())
            }
            _ => None,
        };

        msg.map(|m| Box::new(m) as Box<dyn std::fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(
            miette::LabeledSpan::new_with_span(Some(format!("{}", self.cause)), self.location),
        )))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source_code)
    }
}
