//! Command-line interface for bfcalc.
//!
//! This crate provides the `bfcalc` binary: it runs tape programs, encodes text into programs
//! and evaluates arithmetic expressions, all on top of [`bfcalc_lang`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use bfcalc_run::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["bfcalc", "eval", "2+3*4"]);
//! cli.run().unwrap();
//! ```
mod cli;

pub use cli::Cli;
