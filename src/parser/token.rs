//! Token definitions for the .cat language
//!
//! Every lexical unit is a [`Token`]: a [`TokenKind`] tag, the exact text it
//! was scanned from, and the line it started on. The kind set is closed and
//! flat; grouping (delimiters, assignment operators, keywords, ...) is exposed
//! through predicate methods instead of nested enums so that the parser can
//! match on a single tag.
//!
//! The text-to-kind tables used by the lexer live here as well, keeping the
//! scanner's dispatch data-driven.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Byte range of a token in its source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Every tag the lexer can produce.
///
/// The persisted name of each variant (see [`TokenKind::as_str`]) is part of
/// the token table format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum TokenKind {
    // Literals
    Integer,
    Float,
    Double,
    CharLiteral,
    StringLiteral,
    EmptyString,
    TrueBool,
    FalseBool,

    // Names
    Identifier,
    DigitLeadInvalid,
    UnderscoreInvalid,
    SpecialCharInvalid,

    // Type keywords
    IntKw,
    FloatKw,
    DoubleKw,
    CharKw,
    BoolKw,
    StringKw,

    // Control keywords
    If,
    Else,
    For,
    While,
    Break,
    Continue,
    Return,
    Printf,
    Scanf,

    // Reserved words
    Gc,
    Main,
    Malloc,

    // Noise words
    BoolNoise,
    IntNoise,
    CharNoise,

    // Delimiters
    Semicolon, // ;
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,

    // Increment / decrement / address
    Increment, // ++
    Decrement, // --
    Address,   // &

    // Assignment
    Assign,        // =
    PlusAssign,    // +=
    MinusAssign,   // -=
    StarAssign,    // *=
    SlashAssign,   // /=
    PercentAssign, // %=

    // Logical
    Not, // !
    And, // &&
    Or,  // ||

    // Relational
    EqualEqual,   // ==
    NotEqual,     // !=
    GreaterEqual, // >=
    LessEqual,    // <=
    Greater,      // >
    Less,         // <

    // Arithmetic
    UnaryPlus,
    UnaryMinus,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret, // ^ (power)
    Hash,  // # (root)

    // Comment markers
    SingleLineComment,
    MultiLineComment,
    CommentEnd, // stray */

    UnrecognizedOperator,
    InvalidCharOrString,
}

impl TokenKind {
    pub const ALL: [TokenKind; 73] = [
        TokenKind::Integer,
        TokenKind::Float,
        TokenKind::Double,
        TokenKind::CharLiteral,
        TokenKind::StringLiteral,
        TokenKind::EmptyString,
        TokenKind::TrueBool,
        TokenKind::FalseBool,
        TokenKind::Identifier,
        TokenKind::DigitLeadInvalid,
        TokenKind::UnderscoreInvalid,
        TokenKind::SpecialCharInvalid,
        TokenKind::IntKw,
        TokenKind::FloatKw,
        TokenKind::DoubleKw,
        TokenKind::CharKw,
        TokenKind::BoolKw,
        TokenKind::StringKw,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::For,
        TokenKind::While,
        TokenKind::Break,
        TokenKind::Continue,
        TokenKind::Return,
        TokenKind::Printf,
        TokenKind::Scanf,
        TokenKind::Gc,
        TokenKind::Main,
        TokenKind::Malloc,
        TokenKind::BoolNoise,
        TokenKind::IntNoise,
        TokenKind::CharNoise,
        TokenKind::Semicolon,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::Comma,
        TokenKind::Increment,
        TokenKind::Decrement,
        TokenKind::Address,
        TokenKind::Assign,
        TokenKind::PlusAssign,
        TokenKind::MinusAssign,
        TokenKind::StarAssign,
        TokenKind::SlashAssign,
        TokenKind::PercentAssign,
        TokenKind::Not,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::EqualEqual,
        TokenKind::NotEqual,
        TokenKind::GreaterEqual,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::Less,
        TokenKind::UnaryPlus,
        TokenKind::UnaryMinus,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Caret,
        TokenKind::Hash,
        TokenKind::SingleLineComment,
        TokenKind::MultiLineComment,
        TokenKind::CommentEnd,
        TokenKind::UnrecognizedOperator,
        TokenKind::InvalidCharOrString,
    ];

    /// Stable tag name, as written to the token table.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::Double => "DOUBLE",
            TokenKind::CharLiteral => "CHAR_LITERAL",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::EmptyString => "EMPTY_STRING",
            TokenKind::TrueBool => "TRUE_BOOL",
            TokenKind::FalseBool => "FALSE_BOOL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::DigitLeadInvalid => "DIGIT_INVAL_IDEN",
            TokenKind::UnderscoreInvalid => "UNDER_INVAL_IDEN",
            TokenKind::SpecialCharInvalid => "SPECIAL_INVAL_IDEN",
            TokenKind::IntKw => "INT_KEY",
            TokenKind::FloatKw => "FLOAT_KEY",
            TokenKind::DoubleKw => "DOUBLE_KEY",
            TokenKind::CharKw => "CHAR_KEY",
            TokenKind::BoolKw => "BOOL_KEY",
            TokenKind::StringKw => "STRING_KEY",
            TokenKind::If => "IF_KEY",
            TokenKind::Else => "ELSE_KEY",
            TokenKind::For => "FOR_KEY",
            TokenKind::While => "WHILE_KEY",
            TokenKind::Break => "BREAK_KEY",
            TokenKind::Continue => "CONTINUE_KEY",
            TokenKind::Return => "RETURN_KEY",
            TokenKind::Printf => "PRINTF_KEY",
            TokenKind::Scanf => "SCANF_KEY",
            TokenKind::Gc => "GC_RES",
            TokenKind::Main => "MAIN_RES",
            TokenKind::Malloc => "MALLOC_RES",
            TokenKind::BoolNoise => "BOOL_NOISE",
            TokenKind::IntNoise => "INT_NOISE",
            TokenKind::CharNoise => "CHAR_NOISE",
            TokenKind::Semicolon => "SEMICOLON_DELI",
            TokenKind::LParen => "OPEN_PAREN_DELI",
            TokenKind::RParen => "CLOSE_PAREN_DELI",
            TokenKind::LBracket => "OPEN_BRAC_DELI",
            TokenKind::RBracket => "CLOSE_BRAC_DELI",
            TokenKind::LBrace => "OPEN_CURL_BRAC_DELI",
            TokenKind::RBrace => "CLOSE_CURL_BRAC_DELI",
            TokenKind::Comma => "COMMA_DELI",
            TokenKind::Increment => "INCRE_OP",
            TokenKind::Decrement => "DECRE_OP",
            TokenKind::Address => "ADDRESS_OP",
            TokenKind::Assign => "ASSIGN_OP",
            TokenKind::PlusAssign => "PLUS_ASSIGN_OP",
            TokenKind::MinusAssign => "MINUS_ASSIGN_OP",
            TokenKind::StarAssign => "MULTI_ASSIGN_OP",
            TokenKind::SlashAssign => "DIVIDE_ASSIGN_OP",
            TokenKind::PercentAssign => "MOD_ASSIGN_OP",
            TokenKind::Not => "NOT_LOGIC_OP",
            TokenKind::And => "AND_LOGIC_OP",
            TokenKind::Or => "OR_LOGIC_OP",
            TokenKind::EqualEqual => "EQUAL_REL_OP",
            TokenKind::NotEqual => "NOT_EQUAL_REL_OP",
            TokenKind::GreaterEqual => "GREAT_EQL_REL_OP",
            TokenKind::LessEqual => "LESS_EQL_REL_OP",
            TokenKind::Greater => "GREAT_REL_OP",
            TokenKind::Less => "LESS_REL_OP",
            TokenKind::UnaryPlus => "UNARY_PLUS_OP",
            TokenKind::UnaryMinus => "UNARY_MINUS_OP",
            TokenKind::Plus => "PLUS_ARITH_OP",
            TokenKind::Minus => "MINUS_ARITH_OP",
            TokenKind::Star => "MULTI_ARITH_OP",
            TokenKind::Slash => "DIV_ARITH_OP",
            TokenKind::Percent => "MOD_ARITH_OP",
            TokenKind::Caret => "POWER_ARITH_OP",
            TokenKind::Hash => "ROOT_ARITH_OP",
            TokenKind::SingleLineComment => "SINGLE_LINE_COMMENT",
            TokenKind::MultiLineComment => "MULTI_LINE_COMMENT",
            TokenKind::CommentEnd => "COMMENT_END",
            TokenKind::UnrecognizedOperator => "UNRECOGNIZED_OPERATOR",
            TokenKind::InvalidCharOrString => "INVALID_CHAR_STRING",
        }
    }

    pub fn is_delimiter(self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::Comma
        )
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::StarAssign
                | TokenKind::SlashAssign
                | TokenKind::PercentAssign
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, TokenKind::Not | TokenKind::And | TokenKind::Or)
    }

    /// `&&` and `||`; `!` is prefix-only and never joins two operands.
    pub fn is_binary_logical(self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or)
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::EqualEqual
                | TokenKind::NotEqual
                | TokenKind::GreaterEqual
                | TokenKind::LessEqual
                | TokenKind::Greater
                | TokenKind::Less
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::SingleLineComment | TokenKind::MultiLineComment | TokenKind::CommentEnd
        )
    }

    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::IntKw
                | TokenKind::FloatKw
                | TokenKind::DoubleKw
                | TokenKind::CharKw
                | TokenKind::BoolKw
                | TokenKind::StringKw
        )
    }

    /// Type keywords and control keywords. Reserved words are not keywords.
    pub fn is_keyword(self) -> bool {
        self.is_type_keyword()
            || matches!(
                self,
                TokenKind::If
                    | TokenKind::Else
                    | TokenKind::For
                    | TokenKind::While
                    | TokenKind::Break
                    | TokenKind::Continue
                    | TokenKind::Return
                    | TokenKind::Printf
                    | TokenKind::Scanf
            )
    }

    pub fn is_reserved(self) -> bool {
        matches!(self, TokenKind::Gc | TokenKind::Main | TokenKind::Malloc)
    }

    pub fn is_noise(self) -> bool {
        matches!(
            self,
            TokenKind::BoolNoise | TokenKind::IntNoise | TokenKind::CharNoise
        )
    }

    pub fn is_invalid_identifier(self) -> bool {
        matches!(
            self,
            TokenKind::DigitLeadInvalid
                | TokenKind::UnderscoreInvalid
                | TokenKind::SpecialCharInvalid
        )
    }

    pub fn is_numeric_literal(self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::Float | TokenKind::Double)
    }

    pub fn is_literal(self) -> bool {
        self.is_numeric_literal()
            || matches!(
                self,
                TokenKind::CharLiteral
                    | TokenKind::StringLiteral
                    | TokenKind::EmptyString
                    | TokenKind::TrueBool
                    | TokenKind::FalseBool
            )
    }

    /// Kinds of quoted text accepted where the grammar asks for a string.
    pub fn is_text_literal(self) -> bool {
        matches!(
            self,
            TokenKind::StringLiteral | TokenKind::CharLiteral | TokenKind::EmptyString
        )
    }

    /// Tokens that can begin a statement. Panic-mode recovery stops in front of
    /// these so the statement dispatcher gets a fresh start.
    pub fn starts_statement(self) -> bool {
        self.is_type_keyword()
            || matches!(
                self,
                TokenKind::For
                    | TokenKind::If
                    | TokenKind::Printf
                    | TokenKind::Return
                    | TokenKind::Gc
            )
    }

    /// `+` and `-` are unary when they follow nothing, or a token after which
    /// an operand is expected.
    pub fn admits_unary_after(previous: Option<TokenKind>) -> bool {
        match previous {
            None => true,
            Some(kind) => {
                kind.is_delimiter()
                    || kind.is_assignment()
                    || kind.is_logical()
                    || kind.is_relational()
                    || kind.is_comment()
                    || kind.is_keyword()
                    || kind.is_noise()
            }
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a persisted tag name matches no [`TokenKind`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token kind '{0}'")]
pub struct UnknownKind(pub String);

static KIND_NAMES: LazyLock<FxHashMap<&'static str, TokenKind>> =
    LazyLock::new(|| TokenKind::ALL.iter().map(|&kind| (kind.as_str(), kind)).collect());

impl FromStr for TokenKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KIND_NAMES
            .get(s)
            .copied()
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

impl TryFrom<String> for TokenKind {
    type Error = UnknownKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenKind> for &'static str {
    fn from(kind: TokenKind) -> Self {
        kind.as_str()
    }
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({}) on line {}", self.text, self.kind, self.line)
    }
}

// ===== Lexer lookup tables =====

pub(crate) static DELIMITERS: LazyLock<FxHashMap<char, TokenKind>> = LazyLock::new(|| {
    [
        (';', TokenKind::Semicolon),
        ('(', TokenKind::LParen),
        (')', TokenKind::RParen),
        ('[', TokenKind::LBracket),
        (']', TokenKind::RBracket),
        ('{', TokenKind::LBrace),
        ('}', TokenKind::RBrace),
        (',', TokenKind::Comma),
    ]
    .into_iter()
    .collect()
});

/// Operators whose kind does not depend on context. `+` and `-` are resolved
/// by the lexer from the previous token; comment openers scan further input.
pub(crate) static OPERATORS: LazyLock<FxHashMap<&'static str, TokenKind>> =
    LazyLock::new(|| {
        [
            ("++", TokenKind::Increment),
            ("--", TokenKind::Decrement),
            ("&", TokenKind::Address),
            ("=", TokenKind::Assign),
            ("+=", TokenKind::PlusAssign),
            ("-=", TokenKind::MinusAssign),
            ("*=", TokenKind::StarAssign),
            ("/=", TokenKind::SlashAssign),
            ("%=", TokenKind::PercentAssign),
            ("!", TokenKind::Not),
            ("&&", TokenKind::And),
            ("||", TokenKind::Or),
            ("==", TokenKind::EqualEqual),
            ("!=", TokenKind::NotEqual),
            (">=", TokenKind::GreaterEqual),
            ("<=", TokenKind::LessEqual),
            (">", TokenKind::Greater),
            ("<", TokenKind::Less),
            ("*", TokenKind::Star),
            ("/", TokenKind::Slash),
            ("%", TokenKind::Percent),
            ("^", TokenKind::Caret),
            ("#", TokenKind::Hash),
            ("*/", TokenKind::CommentEnd),
        ]
        .into_iter()
        .collect()
    });

/// Keywords, reserved words, boolean literals and noise words. The four
/// groups are disjoint, so one table serves all of them.
pub(crate) static WORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    [
        ("int", TokenKind::IntKw),
        ("float", TokenKind::FloatKw),
        ("double", TokenKind::DoubleKw),
        ("char", TokenKind::CharKw),
        ("bool", TokenKind::BoolKw),
        ("string", TokenKind::StringKw),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("for", TokenKind::For),
        ("while", TokenKind::While),
        ("break", TokenKind::Break),
        ("continue", TokenKind::Continue),
        ("return", TokenKind::Return),
        ("printf", TokenKind::Printf),
        ("scanf", TokenKind::Scanf),
        ("gc", TokenKind::Gc),
        ("main", TokenKind::Main),
        ("malloc", TokenKind::Malloc),
        ("True", TokenKind::TrueBool),
        ("TRUE", TokenKind::TrueBool),
        ("true", TokenKind::TrueBool),
        ("False", TokenKind::FalseBool),
        ("FALSE", TokenKind::FalseBool),
        ("false", TokenKind::FalseBool),
        ("boolean", TokenKind::BoolNoise),
        ("integer", TokenKind::IntNoise),
        ("character", TokenKind::CharNoise),
    ]
    .into_iter()
    .collect()
});
