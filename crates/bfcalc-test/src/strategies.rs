//! Property-based testing strategies for bfcalc.
//!
//! # Examples
//!
//! ```rust,ignore
//! use bfcalc_test::strategies::*;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn test_something((expr, expected) in arb_expression()) {
//!         // Your test here
//!     }
//! }
//! ```

use proptest::prelude::*;

/// A run of `*` and `/` applied left to right to a leading operand.
fn arb_product() -> impl Strategy<Value = (String, i64)> {
    (
        0i64..100,
        prop::collection::vec((prop::sample::select(vec!['*', '/']), 0i64..100), 0..3),
    )
        .prop_map(|(head, factors)| {
            let mut text = head.to_string();
            let mut value = head;

            for (op, rhs) in factors {
                text.push(op);
                text.push_str(&rhs.to_string());
                value = match (op, rhs) {
                    ('*', _) => value * rhs,
                    (_, 0) => 0,
                    _ => value / rhs,
                };
            }

            (text, value)
        })
}

/// Strategy for generating flat expressions together with their value.
///
/// Generates expressions like `3*4+10/0-7`, where the value follows the usual precedence of
/// `*` and `/` over `+` and `-`, with division by zero giving 0.
pub fn arb_expression() -> impl Strategy<Value = (String, i64)> {
    (
        arb_product(),
        prop::collection::vec((prop::sample::select(vec!['+', '-']), arb_product()), 0..4),
    )
        .prop_map(|((head, head_value), terms)| {
            terms.into_iter().fold(
                (head, head_value),
                |(mut text, value), (op, (term, term_value))| {
                    text.push(op);
                    text.push_str(&term);
                    let value = if op == '+' {
                        value + term_value
                    } else {
                        value - term_value
                    };
                    (text, value)
                },
            )
        })
}

/// Strategy for generating labels that do not contain the `=` separator.
///
/// Generates labels like `total`, `x 1`, `Answer_`.
pub fn arb_label() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_ ]{0,8}").unwrap()
}

/// Strategy for generating text without a `=` separator.
pub fn arb_plain_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ,.!?*+/-]{0,24}").unwrap()
}

/// Strategy for generating programs without loops, which always halt.
pub fn arb_straight_line_program() -> impl Strategy<Value = String> {
    prop::string::string_regex("[<>+\\-.,]{0,64}").unwrap()
}
