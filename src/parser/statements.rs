//! Statement parsing implementation
//!
//! This module handles statement dispatch and every construct that owns a
//! block:
//!
//! - The entry function: `int main() { ... }`
//! - Control flow: `for`, `if` / `else`
//! - Calls: `printf(...)`, `return value;`, `gc() { ... }`
//! - Standalone decrement: `name--;`
//!
//! # Grammar
//!
//! ```text
//! statement     ::= main_function | declaration | for_loop | if_else
//!                 | function_call | decrement | comment
//! main_function ::= "int" "main" "(" ")" block
//! for_loop      ::= "for" "(" for_init ";" condition ";" update ")" block
//! if_else       ::= "if" "(" operand (rel_op | logic_op) operand ")" block
//!                   [ "else" block ]
//! function_call ::= "printf" "(" text { "," (identifier | text) } ")" ";"
//!                 | "return" (number | identifier) ";"
//!                 | "gc" "(" ")" block
//! decrement     ::= identifier "--" ";"
//! block         ::= "{" { statement } "}"
//! ```
//!
//! Dispatch order matters: comments are skipped first, then `int main` is
//! recognized with a two-token peek before the generic declaration rule sees
//! the `int`.

use super::parse::{Parser, RuleResult, SyntaxError};
use super::recovery::Resync;
use super::token::TokenKind;
use crate::constants::MAX_NESTING_DEPTH;

impl Parser<'_> {
    /// Parse one statement. Returns where recovery resynchronized if the
    /// statement was malformed, `None` if it parsed cleanly.
    pub(crate) fn parse_statement(&mut self) -> Option<Resync> {
        let kind = self.peek_kind()?;

        match kind {
            TokenKind::SingleLineComment | TokenKind::MultiLineComment => {
                self.advance();
                None
            }
            TokenKind::IntKw if self.peek_ahead_kind(1) == Some(TokenKind::Main) => {
                self.run_rule("main_function", Self::parse_main_function)
            }
            k if k.is_type_keyword() => self.run_rule("declaration", Self::parse_declaration),
            TokenKind::For => self.run_rule("for_loop", Self::parse_for_loop),
            TokenKind::Printf => self.run_rule("printf", Self::parse_printf),
            TokenKind::Return => self.run_rule("return", Self::parse_return),
            TokenKind::Gc => self.run_rule("gc_block", Self::parse_gc_block),
            TokenKind::If => self.run_rule("if_else", Self::parse_if_else),
            TokenKind::Identifier => self.run_rule("decrement", Self::parse_decrement),
            _ => self.run_rule("unexpected", Self::unexpected_statement),
        }
    }

    /// Parse `{ statements }`. The closing brace is mandatory; reaching the
    /// end of input first is an unterminated block.
    pub(crate) fn parse_block(&mut self, construct: &str) -> RuleResult {
        if self.depth >= MAX_NESTING_DEPTH && self.check(TokenKind::LBrace) {
            let line = self.line_at(self.position);
            self.skip_balanced_block();
            self.report(
                line,
                format!(
                    "Blocks nested deeper than {MAX_NESTING_DEPTH} levels; {construct} body skipped"
                ),
            );
            return Ok(());
        }

        self.expect(
            TokenKind::LBrace,
            &format!("Expected '{{' to open the {construct} body"),
        )?;

        self.depth += 1;
        let result = self.parse_block_statements(construct);
        self.depth -= 1;
        result
    }

    /// Parse block statements (after the `{`, through the `}`)
    fn parse_block_statements(&mut self, construct: &str) -> RuleResult {
        loop {
            match self.peek_kind() {
                None => {
                    return Err(SyntaxError::new(format!(
                        "Unterminated {construct} block: missing closing '}}'"
                    )));
                }
                Some(TokenKind::RBrace) => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => {
                    if self.parse_statement() == Some(Resync::BlockClosed) {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// `int main ( ) { ... }`
    fn parse_main_function(&mut self) -> RuleResult {
        self.advance(); // int
        self.advance(); // main
        self.expect(TokenKind::LParen, "Expected '(' after 'main'")?;
        self.expect(TokenKind::RParen, "Expected ')' after 'main('")?;
        self.parse_block("main function")
    }

    /// `for ( init ; condition ; update ) { ... }`
    fn parse_for_loop(&mut self) -> RuleResult {
        self.advance(); // for
        self.parse_for_header().map_err(SyntaxError::in_for_header)?;
        self.parse_block("for loop")
    }

    fn parse_for_header(&mut self) -> RuleResult {
        self.expect(TokenKind::LParen, "Expected '(' after 'for'")?;
        self.parse_for_init()?;
        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after the for-loop initialization",
        )?;
        self.parse_condition("in the for-loop condition")?;
        self.expect(TokenKind::Semicolon, "Expected ';' after the for-loop condition")?;
        self.parse_update()?;
        self.expect(TokenKind::RParen, "Expected ')' to close the for-loop header")?;
        Ok(())
    }

    /// `if ( operand op operand ) { ... } [ else { ... } ]`
    fn parse_if_else(&mut self) -> RuleResult {
        self.advance(); // if
        self.expect(TokenKind::LParen, "Expected '(' after 'if'")?;
        self.parse_if_condition()?;
        self.expect(TokenKind::RParen, "Expected ')' to close the if condition")?;
        self.parse_block("if")?;

        if self.match_token(TokenKind::Else) {
            self.parse_block("else")?;
        }
        Ok(())
    }

    /// `printf ( text { , identifier | text } ) ;`
    fn parse_printf(&mut self) -> RuleResult {
        self.advance(); // printf
        self.expect(TokenKind::LParen, "Expected '(' after 'printf'")?;

        if !self.peek_kind().is_some_and(TokenKind::is_text_literal) {
            return Err(SyntaxError::new(format!(
                "Expected a format string as the first printf argument, found {}",
                self.found()
            )));
        }
        self.advance();

        while self.match_token(TokenKind::Comma) {
            match self.peek_kind() {
                Some(k) if k == TokenKind::Identifier || k.is_text_literal() => {
                    self.advance();
                }
                _ => {
                    return Err(SyntaxError::new(format!(
                        "Expected an identifier, string or character after ',' in printf, found {}",
                        self.found()
                    )));
                }
            }
        }

        self.expect(TokenKind::RParen, "Expected ')' to close the printf arguments")?;
        self.expect(TokenKind::Semicolon, "Expected ';' after the printf call")?;
        Ok(())
    }

    /// `return ( number | identifier ) ;`
    fn parse_return(&mut self) -> RuleResult {
        self.advance(); // return

        let signed = matches!(
            self.peek_kind(),
            Some(TokenKind::UnaryPlus | TokenKind::UnaryMinus)
        );
        if signed {
            self.advance();
        }

        match self.peek_kind() {
            Some(k) if k.is_numeric_literal() => {
                self.advance();
            }
            Some(TokenKind::Identifier) => {
                self.advance();
            }
            _ => {
                return Err(SyntaxError::new(format!(
                    "Expected a number or identifier after 'return', found {}",
                    self.found()
                )));
            }
        }

        self.expect(TokenKind::Semicolon, "Expected ';' after the return value")?;
        Ok(())
    }

    /// `gc ( ) { ... }`
    fn parse_gc_block(&mut self) -> RuleResult {
        self.advance(); // gc
        self.expect(TokenKind::LParen, "Expected '(' after 'gc'")?;
        self.expect(TokenKind::RParen, "Expected ')' after 'gc('")?;
        self.parse_block("gc")
    }

    /// `name -- ;`, the only statement that may start with a bare identifier
    fn parse_decrement(&mut self) -> RuleResult {
        let name = self.peek().map(|t| t.text.as_str()).unwrap_or_default();

        if self.peek_ahead_kind(1) != Some(TokenKind::Decrement) {
            return Err(SyntaxError::new(format!(
                "Unrecognized statement or function starting with '{name}'"
            )));
        }

        self.advance(); // name
        self.advance(); // --
        self.expect(TokenKind::Semicolon, "Expected ';' after the decrement")?;
        Ok(())
    }

    /// Anything no other statement rule accepts
    fn unexpected_statement(&mut self) -> RuleResult {
        let message = match self.peek() {
            Some(token) if token.kind.is_invalid_identifier() => {
                Self::invalid_identifier_message(token)
            }
            _ => format!("Unexpected statement starting with {}", self.found()),
        };
        Err(SyntaxError::new(message))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, ParseReport};
    use pretty_assertions::assert_eq;

    fn check(source: &str) -> ParseReport {
        parse(&tokenize(source))
    }

    fn lines(report: &ParseReport) -> Vec<usize> {
        report.diagnostics.iter().map(|d| d.line).collect()
    }

    #[test]
    fn test_main_function() {
        let report = check("int main() {\n  int x = 1;\n  return 0;\n}");
        assert!(report.is_clean(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_main_missing_paren() {
        let report = check("int main( {\n}\nint y;");
        assert_eq!(lines(&report), vec![1]);
        assert!(report.diagnostics[0].message.starts_with("Expected ')' after 'main('"));
        assert!(report.declared_names.contains("y"));
    }

    #[test]
    fn test_main_unterminated() {
        let report = check("int main() {\n  int x;\n");
        assert_eq!(report.error_count(), 1);
        assert_eq!(
            report.diagnostics[0].message,
            "Unterminated main function block: missing closing '}'"
        );
        assert_eq!(report.diagnostics[0].line, 1);
    }

    #[test]
    fn test_for_loop() {
        let report = check("for (int i = 0; i < 10; i++) { }");
        assert!(report.is_clean(), "{:?}", report.diagnostics);
        assert!(report.declared_names.contains("i"));
    }

    #[test]
    fn test_for_loop_variants() {
        let report = check(
            "for (i = 0; i <= n; i += 2) { }\n\
             for (j = 10; j > 0; j--) { }\n\
             for (k = 0; k != limit; k = limit) { }",
        );
        assert!(report.is_clean(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_for_loop_missing_semicolon() {
        let report = check("for (i = 0 10) { }\nint x;");
        assert_eq!(lines(&report), vec![1]);
        assert_eq!(
            report.diagnostics[0].message,
            "Expected ';' after the for-loop initialization, found '10' (INTEGER)"
        );
        assert!(report.declared_names.contains("x"));
    }

    #[test]
    fn test_for_header_error_does_not_cascade_into_body() {
        let report = check("for (i = 0; i < ; i++) {\n  bogus statement;\n  x = 1;\n}\nreturn 0;");
        assert_eq!(lines(&report), vec![1]);
    }

    #[test]
    fn test_broken_for_header_inside_main() {
        let report = check("int main() {\n  for (i = 0 10) { }\n  return 0;\n}\n");
        assert_eq!(lines(&report), vec![2]);
        assert!(report.diagnostics[0]
            .message
            .starts_with("Expected ';' after the for-loop initialization"));
    }

    #[test]
    fn test_broken_for_header_keeps_outer_block_open() {
        let report = check("gc() {\n  if (a > b) {\n    for (i = 0 10) { x--; }\n    b--;\n  }\n");
        assert_eq!(lines(&report), vec![3, 1]);
        assert_eq!(
            report.diagnostics[1].message,
            "Unterminated gc block: missing closing '}'"
        );
    }

    #[test]
    fn test_nested_blocks() {
        let report = check(
            "int main() {\n\
               for (int i = 0; i < 3; i++) {\n\
                 if (i == 1) {\n\
                   gc() { printf(\"%d\", i); }\n\
                 } else {\n\
                   i--;\n\
                 }\n\
               }\n\
               return 0;\n\
             }",
        );
        assert!(report.is_clean(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_body_errors_are_reported_on_their_own_lines() {
        let report = check("int main() {\n  int = 3;\n  printf(x);\n  return 0;\n}");
        assert_eq!(lines(&report), vec![2, 3]);
    }

    #[test]
    fn test_if_else() {
        let report = check("if (a > b) { a--; } else { b--; }\nif (x && y) { }");
        assert!(report.is_clean(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_if_compound_condition_is_rejected() {
        let report = check("if (a > b && c < d) { }");
        assert_eq!(report.error_count(), 1);
        assert!(report.diagnostics[0]
            .message
            .starts_with("Expected ')' to close the if condition"));
    }

    #[test]
    fn test_else_requires_block() {
        let report = check("if (a < 1) { } else a--;");
        assert_eq!(report.error_count(), 1);
        assert!(report.diagnostics[0]
            .message
            .starts_with("Expected '{' to open the else body"));
    }

    #[test]
    fn test_printf() {
        let report = check("printf(\"%d %s %c\", n, \"str\", 'c');\nprintf(\"\");\nprintf(\"x\");");
        assert!(report.is_clean(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_printf_errors() {
        let report = check("printf(x);\nprintf(\"%d\", 5);\nprintf(\"hi\")\nint y;");
        assert_eq!(lines(&report), vec![1, 2, 3]);
        assert!(report.diagnostics[2]
            .message
            .starts_with("Expected ';' after the printf call"));
        assert!(report.declared_names.contains("y"));
    }

    #[test]
    fn test_return() {
        let report = check("return 0;\nreturn x;\nreturn -1;\nreturn 2.5;");
        assert!(report.is_clean(), "{:?}", report.diagnostics);

        let report = check("return;\nreturn \"s\";\nreturn 1");
        assert_eq!(lines(&report), vec![1, 2, 3]);
    }

    #[test]
    fn test_gc_block() {
        let report = check("gc() { int x = 1; }");
        assert!(report.is_clean(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_gc_block_must_be_closed() {
        let report = check("gc() {\n  int x = 1;\n  x--;\n");
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.diagnostics[0].message, "Unterminated gc block: missing closing '}'");
    }

    #[test]
    fn test_decrement_statement() {
        let report = check("count--;");
        assert!(report.is_clean(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_bare_identifier_statements() {
        let report = check("x = 5;\ncount++;\ncount--");
        assert_eq!(lines(&report), vec![1, 2, 3]);
        assert_eq!(
            report.diagnostics[0].message,
            "Unrecognized statement or function starting with 'x'"
        );
    }

    #[test]
    fn test_unexpected_statement() {
        let report = check("while (x) { }");
        assert_eq!(report.error_count(), 1);
        assert_eq!(
            report.diagnostics[0].message,
            "Unexpected statement starting with 'while' (WHILE_KEY)"
        );
    }

    #[test]
    fn test_invalid_identifier_statement() {
        let report = check("_temp--;");
        assert_eq!(report.error_count(), 1);
        assert!(report.diagnostics[0].message.contains("'_temp'"));
    }

    #[test]
    fn test_comments_are_skipped() {
        let report = check("// leading\nint x; /* trailing\nblock */\nx--;");
        assert!(report.is_clean(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_stray_closing_brace() {
        let report = check("}\nint x;");
        assert_eq!(lines(&report), vec![1]);
        assert!(report.declared_names.contains("x"));
    }

    #[test]
    fn test_recovery_closes_enclosing_block() {
        // The malformed printf swallows the main body's `}`
        let report = check("int main() {\n  printf(\"a\" }\nint y;");
        assert_eq!(lines(&report), vec![2]);
        assert!(report.declared_names.contains("y"));
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let depth = crate::constants::MAX_NESTING_DEPTH + 10;
        let source = format!("{}{}", "gc() {\n".repeat(depth), "}".repeat(depth));
        let report = check(&source);
        assert_eq!(report.error_count(), 1);
        assert!(report.diagnostics[0].message.starts_with("Blocks nested deeper than"));
        assert_eq!(report.diagnostics[0].line, crate::constants::MAX_NESTING_DEPTH + 1);
    }
}
