//! # Introduction
//!
//! catty lexes and syntax-checks programs written in `.cat`, a small C-like
//! teaching language. Every syntax error is reported with its line number and
//! parsing continues past it, so a single run lists all the problems in a
//! file.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Diagnostics
//!                    ↕                    ↓
//!               token table         diagnostics table
//! ```
//!
//! 1. [`parser::lexer`] turns source text into classified [`parser::Token`]s.
//!    Lexing never fails: malformed literals and identifiers become tokens of
//!    their own, and unrecognized characters are skipped and logged.
//! 2. [`parser::parse()`] checks the token sequence with a recursive-descent
//!    recognizer. Errors are collected as [`parser::Diagnostic`]s and the
//!    parser resynchronizes at statement boundaries.
//! 3. [`persist`] reads and writes the CSV token and diagnostics tables.
//! 4. [`cli`] wires the stages together for the `catty` binary.
//!
//! ## Language
//!
//! Types: `int`, `float`, `double`, `char`, `string`, `bool`.
//! Statements: declarations, `int main()`, `for`, `if/else`, `printf`,
//! `return`, `gc() { }`, and `name--;`.
//! Comments: `// ...` and `/* ... */`.

pub mod cli;
pub mod constants;
pub mod error;
pub mod parser;
pub mod persist;

pub use error::{CattyError, Result};
