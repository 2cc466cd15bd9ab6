use thiserror::Error;

use crate::format::LABEL_SEPARATOR;

/// Value added to the work cell by one pass of the multiply loop.
const MULTIPLIER: u8 = 10;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum EncodeError {
    #[error("Missing label separator `=`")]
    MissingLabelSeparator,
}

fn push_increments(out: &mut String, count: u8) {
    out.extend(std::iter::repeat_n('+', count as usize));
}

/// Appends a program fragment that prints `byte`.
///
/// The fragment starts and ends on the same cell and uses the cell to its right as scratch
/// space. Both cells must be zero on entry and are zero again on exit, so fragments can be
/// concatenated freely.
pub fn encode_byte(byte: u8, out: &mut String) {
    let tens = byte / MULTIPLIER;
    let rest = byte % MULTIPLIER;

    if tens > 0 {
        push_increments(out, MULTIPLIER);
        out.push_str("[>");
        push_increments(out, tens);
        out.push_str("<-]");
    }

    out.push('>');
    push_increments(out, rest);
    out.push_str(".[-]<");
}

/// Builds a program that prints `bytes` verbatim.
pub fn encode(bytes: &[u8]) -> String {
    let mut program = String::with_capacity(bytes.len() * 24);
    bytes
        .iter()
        .for_each(|byte| encode_byte(*byte, &mut program));
    program
}

/// Builds a program printing a `label=expression` line.
///
/// Surrounding whitespace is trimmed and the text must contain a `=`.
pub fn encode_labeled(text: &str) -> Result<String, EncodeError> {
    let text = text.trim();

    if !text.contains(LABEL_SEPARATOR) {
        return Err(EncodeError::MissingLabelSeparator);
    }

    tracing::debug!(len = text.len(), "encoding labeled text");
    Ok(encode(text.as_bytes()))
}
