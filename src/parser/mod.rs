//! .cat source code front end
//!
//! This module turns .cat source text into a token stream and checks it
//! against the language grammar:
//! - [`token`]: Token kinds, tokens and the lexer's lookup tables
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state, diagnostics and the entry point (tokens → diagnostics)
//! - [`recovery`]: Panic-mode synchronization after a syntax error
//!
//! # Supported Language
//!
//! - Types: `int`, `float`, `double`, `char`, `bool`, `string`
//! - Statements: declarations, `for`, `if`/`else`, `printf`, `return`,
//!   `gc() { ... }`, `name--;`, and the `int main() { ... }` entry function
//! - Conditions: a single comparison between two operands
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser that validates without building a
//! syntax tree. Errors never stop the parse: each malformed statement yields
//! one [`parse::Diagnostic`] and the parser resynchronizes at the next
//! statement boundary.

pub mod lexer;
pub mod parse;
pub mod recovery;
pub mod token;

mod declarations;
mod expressions;
mod statements;

pub use lexer::{tokenize, Lexed, Lexer, Unrecognized};
pub use parse::{parse, Diagnostic, ParseReport, Parser};
pub use recovery::Resync;
pub use token::{Span, Token, TokenKind};
