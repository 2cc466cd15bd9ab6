use std::ops::Range;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum EvalError {
    #[error("Malformed expression: {1}")]
    MalformedExpression(Range<usize>, &'static str),
    #[error("Number `{1}` is out of range")]
    NumberOutOfRange(Range<usize>, String),
}

impl EvalError {
    /// Byte range of the offending part of the expression.
    pub fn range(&self) -> &Range<usize> {
        match self {
            EvalError::MalformedExpression(range, _) => range,
            EvalError::NumberOutOfRange(range, _) => range,
        }
    }

    /// Moves the reported range `offset` bytes to the right, for expressions cut out of a
    /// larger text.
    pub fn shifted(self, offset: usize) -> Self {
        let shift = |range: Range<usize>| range.start + offset..range.end + offset;

        match self {
            EvalError::MalformedExpression(range, reason) => {
                EvalError::MalformedExpression(shift(range), reason)
            }
            EvalError::NumberOutOfRange(range, digits) => {
                EvalError::NumberOutOfRange(shift(range), digits)
            }
        }
    }
}
