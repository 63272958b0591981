//! Lexer (tokenizer) for .cat source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The lexer is total: it never fails. Unterminated quotes become
//! [`TokenKind::InvalidCharOrString`] tokens, operator runs that match nothing
//! become [`TokenKind::UnrecognizedOperator`], and characters that start no
//! token at all are reported with a warning and skipped one at a time.
//!
//! At each input position the scanners are tried in a fixed order: whitespace,
//! quotes, delimiters, operator runs, numbers, words. The order matters: quotes
//! must win over everything else, and `.` followed by a digit must reach the
//! number scanner rather than the word scanner.

use super::token::{Span, Token, TokenKind, DELIMITERS, OPERATORS, WORDS};
use crate::constants::DOUBLE_MIN_FRACTION_DIGITS;
use tracing::{trace, warn};

/// Characters that may form an operator run
const OPERATOR_CHARS: &str = "#+-*/%=!&|<>^";

/// Punctuation accepted inside a word so that names like `total$` are
/// reported as invalid identifiers instead of being split apart
const SPECIAL_CHARS: &str = "~?@$.";

fn is_operator_char(ch: char) -> bool {
    OPERATOR_CHARS.contains(ch)
}

fn is_special_char(ch: char) -> bool {
    SPECIAL_CHARS.contains(ch)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || is_special_char(ch)
}

/// A character that started no token and was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unrecognized {
    pub ch: char,
    pub line: usize,
    /// Byte offset in the source
    pub offset: usize,
}

/// Everything one lexing pass produces.
///
/// `spans[i]` is the source range of `tokens[i]`. Token text equals the
/// spanned source except for multi-line comments, whose stored text has the
/// newlines removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub spans: Vec<Span>,
    pub unrecognized: Vec<Unrecognized>,
}

/// Tokenize `source` and return only the token sequence.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize().tokens
}

/// Single-pass lexer over a borrowed source string
pub struct Lexer<'src> {
    source: &'src str,
    /// Byte offset of the next unread character
    position: usize,
    line: usize,
    /// Kind of the last emitted token; decides unary vs binary `+`/`-`
    previous: Option<TokenKind>,
    output: Lexed,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            previous: None,
            output: Lexed::default(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(mut self) -> Lexed {
        while let Some(ch) = self.peek() {
            let start = self.position;
            let line = self.line;

            if ch == '\n' {
                self.advance();
                self.line += 1;
                continue;
            }

            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            if ch == '\'' || ch == '"' {
                let kind = self.quoted_literal(ch);
                self.emit_spanned(kind, start, line);
                continue;
            }

            if let Some(&kind) = DELIMITERS.get(&ch) {
                self.advance();
                self.emit_spanned(kind, start, line);
                continue;
            }

            if is_operator_char(ch) {
                self.operator_or_comment(start, line);
                continue;
            }

            if ch.is_ascii_digit()
                || (ch == '.' && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()))
            {
                let kind = self.number_literal();
                self.emit_spanned(kind, start, line);
                continue;
            }

            if ch.is_alphabetic() || ch == '_' || is_special_char(ch) {
                let kind = self.word();
                self.emit_spanned(kind, start, line);
                continue;
            }

            warn!(
                "Unrecognized character '{}' at offset {}, line {}",
                ch.escape_debug(),
                start,
                line
            );
            self.output.unrecognized.push(Unrecognized {
                ch,
                line,
                offset: start,
            });
            self.advance();
        }

        self.output
    }

    /// Scan a quoted literal starting at the opening quote. Stops at the
    /// matching quote, or before a newline / end of input (unterminated).
    fn quoted_literal(&mut self, quote: char) -> TokenKind {
        self.advance(); // opening quote
        let mut content_len = 0usize;

        while let Some(ch) = self.peek() {
            if ch == quote {
                self.advance();
                return match content_len {
                    0 => TokenKind::EmptyString,
                    1 => TokenKind::CharLiteral,
                    _ => TokenKind::StringLiteral,
                };
            }
            if ch == '\n' {
                break;
            }
            content_len += 1;
            self.advance();
        }

        TokenKind::InvalidCharOrString
    }

    /// Scan a maximal operator run, or a comment if the run opens with `//`
    /// or `/*`. Emits the token itself because block comments carry text
    /// that differs from their span.
    fn operator_or_comment(&mut self, start: usize, line: usize) {
        if self.peek() == Some('/') {
            match self.peek_ahead(1) {
                Some('/') => {
                    self.skip_line_comment();
                    self.emit_spanned(TokenKind::SingleLineComment, start, line);
                    return;
                }
                Some('*') => {
                    let text = self.block_comment();
                    self.emit(TokenKind::MultiLineComment, text, start, line);
                    return;
                }
                _ => {}
            }
        }

        while self.peek().is_some_and(is_operator_char) {
            self.advance();
        }

        let run = &self.source[start..self.position];
        let kind = classify_operator(run, self.previous);
        self.emit_spanned(kind, start, line);
    }

    /// Consume a `//` comment up to, not including, the newline
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Consume a `/* ... */` comment. Newlines are counted but left out of the
    /// returned text. An unterminated comment runs to end of input.
    fn block_comment(&mut self) -> String {
        self.advance(); // '/'
        self.advance(); // '*'
        let mut text = String::from("/*");

        while let Some(ch) = self.peek() {
            if ch == '*' && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                text.push_str("*/");
                return text;
            }
            if ch == '\n' {
                self.line += 1;
            } else {
                text.push(ch);
            }
            self.advance();
        }

        text
    }

    /// Scan digits with at most one `.` that must be followed by a digit.
    /// A number running straight into a letter becomes a digit-led invalid
    /// identifier covering the whole alphanumeric run.
    fn number_literal(&mut self) -> TokenKind {
        let mut fraction_digits: Option<usize> = None;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                if let Some(count) = fraction_digits.as_mut() {
                    *count += 1;
                }
                self.advance();
            } else if ch == '.'
                && fraction_digits.is_none()
                && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit())
            {
                fraction_digits = Some(0);
                self.advance();
            } else {
                break;
            }
        }

        if self.peek().is_some_and(char::is_alphabetic) {
            while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                self.advance();
            }
            return TokenKind::DigitLeadInvalid;
        }

        match fraction_digits {
            None => TokenKind::Integer,
            Some(count) if count < DOUBLE_MIN_FRACTION_DIGITS => TokenKind::Float,
            Some(_) => TokenKind::Double,
        }
    }

    /// Scan a word and classify it
    fn word(&mut self) -> TokenKind {
        let start = self.position;
        while self.peek().is_some_and(is_word_char) {
            self.advance();
        }
        classify_word(&self.source[start..self.position])
    }

    fn emit_spanned(&mut self, kind: TokenKind, start: usize, line: usize) {
        let text = self.source[start..self.position].to_string();
        self.emit(kind, text, start, line);
    }

    fn emit(&mut self, kind: TokenKind, text: String, start: usize, line: usize) {
        trace!(kind = %kind, text = %text, line, "token");
        self.output.tokens.push(Token::new(kind, text, line));
        self.output.spans.push(Span::new(start, self.position));
        self.previous = Some(kind);
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.source[self.position..].chars().nth(n)
    }

    /// Advance past the current character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }
}

/// Classify a complete operator run. `previous` is the kind of the last token
/// emitted before the run.
pub fn classify_operator(run: &str, previous: Option<TokenKind>) -> TokenKind {
    match run {
        "+" if TokenKind::admits_unary_after(previous) => TokenKind::UnaryPlus,
        "+" => TokenKind::Plus,
        "-" if TokenKind::admits_unary_after(previous) => TokenKind::UnaryMinus,
        "-" => TokenKind::Minus,
        _ => OPERATORS
            .get(run)
            .copied()
            .unwrap_or(TokenKind::UnrecognizedOperator),
    }
}

/// Classify a scanned word: keyword, reserved word, boolean literal and noise
/// word tables first, then the invalid-identifier rules in order. The first
/// rule that matches decides.
pub fn classify_word(word: &str) -> TokenKind {
    if let Some(&kind) = WORDS.get(word) {
        return kind;
    }

    if word.starts_with(|c: char| c.is_ascii_digit()) {
        TokenKind::DigitLeadInvalid
    } else if word.starts_with('_') || word.contains("__") {
        TokenKind::UnderscoreInvalid
    } else if word.contains(is_special_char) {
        TokenKind::SpecialCharInvalid
    } else if word.ends_with('_') {
        TokenKind::UnderscoreInvalid
    } else {
        TokenKind::Identifier
    }
}
