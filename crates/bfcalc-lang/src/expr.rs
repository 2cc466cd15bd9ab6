pub mod error;
pub mod token;

use error::EvalError;
use token::{Operator, Token, TokenKind, tokenize};

/// A leading operand followed by `(operator, operand)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Terms {
    head: i64,
    tail: Vec<(Operator, i64)>,
}

/// Evaluates a flat integer expression.
///
/// `*` and `/` are folded left to right first, then `+` and `-` are applied left to right to
/// what is left. There are no parentheses and no unary minus. Dividing by zero gives 0.
///
/// ```
/// assert_eq!(bfcalc_lang::evaluate("2+3*4"), Ok(14));
/// assert_eq!(bfcalc_lang::evaluate("10-2-3"), Ok(5));
/// assert_eq!(bfcalc_lang::evaluate("5/0"), Ok(0));
/// ```
pub fn evaluate(expr: &str) -> Result<i64, EvalError> {
    let tokens = tokenize(expr)?;
    let terms = terms(expr, &tokens)?;

    Ok(reduce_additive(reduce_multiplicative(terms)))
}

fn terms(expr: &str, tokens: &[Token]) -> Result<Terms, EvalError> {
    let Some((first, rest)) = tokens.split_first() else {
        return Err(EvalError::MalformedExpression(
            0..expr.len(),
            "expression is empty",
        ));
    };

    let head = number(first)?;
    let mut tail = Vec::with_capacity(rest.len() / 2);

    for chunk in rest.chunks(2) {
        match chunk {
            [op, operand] => tail.push((operator(op)?, number(operand)?)),
            [op] => {
                operator(op)?;
                return Err(EvalError::MalformedExpression(
                    op.range.clone(),
                    "dangling operator",
                ));
            }
            _ => unreachable!(),
        }
    }

    Ok(Terms { head, tail })
}

fn number(token: &Token) -> Result<i64, EvalError> {
    match token.kind {
        TokenKind::Number(n) => Ok(n),
        TokenKind::Operator(_) => Err(EvalError::MalformedExpression(
            token.range.clone(),
            "expected a number",
        )),
    }
}

fn operator(token: &Token) -> Result<Operator, EvalError> {
    match token.kind {
        TokenKind::Operator(op) => Ok(op),
        TokenKind::Number(_) => Err(EvalError::MalformedExpression(
            token.range.clone(),
            "expected an operator",
        )),
    }
}

/// Folds every `*` and `/` into the operand on its left.
fn reduce_multiplicative(terms: Terms) -> Terms {
    let Terms { mut head, tail } = terms;
    let mut reduced: Vec<(Operator, i64)> = Vec::with_capacity(tail.len());

    for (op, rhs) in tail {
        if op.is_multiplicative() {
            let lhs = reduced.last_mut().map(|(_, value)| value).unwrap_or(&mut head);
            *lhs = op.apply(*lhs, rhs);
        } else {
            reduced.push((op, rhs));
        }
    }

    Terms {
        head,
        tail: reduced,
    }
}

fn reduce_additive(terms: Terms) -> i64 {
    terms
        .tail
        .into_iter()
        .fold(terms.head, |acc, (op, rhs)| op.apply(acc, rhs))
}
