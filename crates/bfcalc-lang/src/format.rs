use crate::expr::{error::EvalError, evaluate};

pub const LABEL_SEPARATOR: char = '=';

/// Splits `text` at the first `=` into the label (separator included) and a non-empty
/// expression.
pub fn split_label(text: &str) -> Option<(&str, &str)> {
    let at = text.find(LABEL_SEPARATOR)? + LABEL_SEPARATOR.len_utf8();
    let (label, expr) = text.split_at(at);

    (!expr.is_empty()).then_some((label, expr))
}

/// Replaces the expression after the first `=` with its value.
///
/// Text without a separator, or with nothing after it, is returned unchanged. Ranges in a
/// returned error are relative to `text`.
///
/// ```
/// assert_eq!(bfcalc_lang::format_output("total=2+3*4"), Ok("total=14".to_string()));
/// assert_eq!(bfcalc_lang::format_output("hello"), Ok("hello".to_string()));
/// ```
pub fn format_output(text: &str) -> Result<String, EvalError> {
    match split_label(text) {
        Some((label, expr)) => {
            let value = evaluate(expr).map_err(|e| e.shifted(label.len()))?;
            tracing::debug!(label, expr, value, "evaluated labeled expression");
            Ok(format!("{}{}", label, value))
        }
        None => Ok(text.to_string()),
    }
}
