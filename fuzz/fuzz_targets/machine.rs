#![no_main]

use arbitrary::Arbitrary;
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Eof {
    Error,
    Unchanged,
    Zero,
}

#[derive(Debug, Clone, Arbitrary)]
enum Fragment {
    Raw(Vec<u8>),
    Encoded(String),
    Loop(u8, Vec<u8>),
}

impl Fragment {
    fn to_program(&self) -> Vec<u8> {
        match self {
            Fragment::Raw(bytes) => bytes
                .iter()
                .copied()
                .filter(|b| !matches!(b, b'[' | b']'))
                .collect(),
            Fragment::Encoded(text) => bfcalc_lang::encode(text.as_bytes()).into_bytes(),
            Fragment::Loop(count, body) => {
                let mut program = vec![b'+'; *count as usize];
                program.extend_from_slice(b"[>");
                program.extend(body.iter().filter(|b| matches!(b, b'+' | b'-' | b'.' | b',')));
                program.extend_from_slice(b"<-]");
                program
            }
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
struct Context {
    fragments: Vec<Fragment>,
    input: Vec<u8>,
    tape_len: u16,
    eof: Eof,
}

fuzz_target!(|context: Context| {
    let program = context
        .fragments
        .iter()
        .map(|fragment| fragment.to_program())
        .concat();

    let engine = bfcalc_lang::Engine::new(bfcalc_lang::MachineOptions {
        tape_len: context.tape_len as usize,
        eof: match context.eof {
            Eof::Error => bfcalc_lang::EofPolicy::Error,
            Eof::Unchanged => bfcalc_lang::EofPolicy::Unchanged,
            Eof::Zero => bfcalc_lang::EofPolicy::Zero,
        },
    });

    // Every generated loop counts its own cell down to zero.
    let _ = engine.run(&program, context.input.as_slice());
});
