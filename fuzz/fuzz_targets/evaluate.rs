#![no_main]

use arbitrary::Arbitrary;
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Term {
    Number(u64),
    Operator(u8),
    Raw(String),
}

impl Term {
    fn to_source(&self) -> String {
        match self {
            Term::Number(n) => n.to_string(),
            Term::Operator(op) => ["+", "-", "*", "/"][*op as usize % 4].to_string(),
            Term::Raw(raw) => raw.clone(),
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
struct Context {
    label: Option<String>,
    terms: Vec<Term>,
}

fuzz_target!(|context: Context| {
    let expr = context.terms.iter().map(|term| term.to_source()).join("");
    let _ = bfcalc_lang::evaluate(&expr);

    if let Some(label) = &context.label {
        let text = format!("{}={}", label, expr);
        let _ = bfcalc_lang::format_output(&text);
    }
});
