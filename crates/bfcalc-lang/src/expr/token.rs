use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use super::error::EvalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Mul | Operator::Div)
    }

    /// Applies the operator with wrapping arithmetic. Dividing by zero gives 0.
    pub fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs.wrapping_add(rhs),
            Operator::Sub => lhs.wrapping_sub(rhs),
            Operator::Mul => lhs.wrapping_mul(rhs),
            Operator::Div if rhs == 0 => 0,
            Operator::Div => lhs.wrapping_div(rhs),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let c = match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        };
        write!(f, "{}", c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number(i64),
    Operator(Operator),
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// A number or operator with the byte range it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range<usize>,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.kind)
    }
}

/// Digits seen so far for the number under construction.
struct PendingNumber {
    digits: String,
    range: Range<usize>,
}

impl PendingNumber {
    fn into_token(self) -> Result<Token, EvalError> {
        match self.digits.parse::<i64>() {
            Ok(n) => Ok(Token {
                kind: TokenKind::Number(n),
                range: self.range,
            }),
            Err(_) => Err(EvalError::NumberOutOfRange(self.range, self.digits)),
        }
    }
}

/// Splits an expression into numbers and operators.
///
/// Digit runs become numbers and `+ - * /` become operators. Any other character, whitespace
/// included, is skipped without ending the number being read, so `1 2` reads as `12`.
pub fn tokenize(expr: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut pending: Option<PendingNumber> = None;

    for (i, c) in expr.char_indices() {
        if c.is_ascii_digit() {
            let number = pending.get_or_insert_with(|| PendingNumber {
                digits: String::new(),
                range: i..i,
            });
            number.digits.push(c);
            number.range.end = i + 1;
        } else if let Some(op) = Operator::from_char(c) {
            if let Some(number) = pending.take() {
                tokens.push(number.into_token()?);
            }
            tokens.push(Token {
                kind: TokenKind::Operator(op),
                range: i..i + 1,
            });
        }
    }

    if let Some(number) = pending.take() {
        tokens.push(number.into_token()?);
    }

    Ok(tokens)
}
