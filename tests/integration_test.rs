// Integration tests for the .cat front end

use catty::parser::{parse, tokenize, Lexer, TokenKind};
use catty::persist;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

fn sorted_names(source: &str) -> Vec<String> {
    let mut names: Vec<String> = parse(&tokenize(source)).declared_names.into_iter().collect();
    names.sort();
    names
}

#[test]
fn test_number_classification() {
    assert_eq!(kinds("3.1415926"), vec![TokenKind::Float]);
    assert_eq!(kinds("3.14159265"), vec![TokenKind::Double]);
    assert_eq!(kinds("42"), vec![TokenKind::Integer]);
    assert_eq!(kinds("12abc"), vec![TokenKind::DigitLeadInvalid]);
}

#[test]
fn test_unary_and_binary_minus() {
    assert_eq!(
        kinds("x = -5;"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::UnaryMinus,
            TokenKind::Integer,
            TokenKind::Semicolon,
        ]
    );
    assert_eq!(
        kinds("x - 5;"),
        vec![
            TokenKind::Identifier,
            TokenKind::Minus,
            TokenKind::Integer,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_quote_edge_cases() {
    assert_eq!(kinds("\"\""), vec![TokenKind::EmptyString]);
    assert_eq!(kinds("\"a\""), vec![TokenKind::CharLiteral]);
    assert_eq!(kinds("\"ab\""), vec![TokenKind::StringLiteral]);

    let tokens = tokenize("\"ab\nint");
    assert_eq!(tokens[0].kind, TokenKind::InvalidCharOrString);
    assert_eq!(tokens[0].text, "\"ab");
    assert_eq!(tokens[1].kind, TokenKind::IntKw);
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn test_unrecognized_characters_are_skipped() {
    let lexed = Lexer::new("int `x;").tokenize();
    assert_eq!(lexed.unrecognized.len(), 1);
    assert_eq!(lexed.unrecognized[0].ch, '`');
    let kinds: Vec<TokenKind> = lexed.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::IntKw, TokenKind::Identifier, TokenKind::Semicolon]
    );
}

#[test]
fn test_declaration_list() {
    let report = parse(&tokenize("int a, b = 5, c;"));
    assert!(report.is_clean(), "{:?}", report.diagnostics);
    assert_eq!(sorted_names("int a, b = 5, c;"), vec!["a", "b", "c"]);
}

#[test]
fn test_missing_identifier_recovers() {
    let report = parse(&tokenize("int ;\nfloat f = 2.5;\nint main() { }"));
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.diagnostics[0].line, 1);
    assert_eq!(sorted_names("int ;\nfloat f = 2.5;"), vec!["f"]);
}

#[test]
fn test_for_loop() {
    let report = parse(&tokenize("for (int i = 0; i < 10; i++) { }"));
    assert!(report.is_clean(), "{:?}", report.diagnostics);
}

#[test]
fn test_broken_for_header() {
    let report = parse(&tokenize("int x;\nfor (i = 0 10) {\n  x--;\n}\nint y = ;"));
    let lines: Vec<usize> = report.diagnostics.iter().map(|d| d.line).collect();
    // One for the header, none from the skipped body, one for `int y = ;`
    assert_eq!(lines, vec![2, 5]);
}

#[test]
fn test_all_errors_reported_in_one_pass() {
    let source = "\
int main() {
    int x = 10
    int 2y;
    printf(x);
    if (x > 1) {
        x--;
    } else {
        return -1;
    }
    gc() {
        string s = \"ok\";
    }
}
";
    let report = parse(&tokenize(source));
    let lines: Vec<usize> = report.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![2, 3, 4], "{:#?}", report.diagnostics);
}

#[test]
fn test_complete_program() {
    let source = "\
// counts down
int main() {
    int total = 0, step = -1;
    double ratio = 0.123456789;
    bool done = false;
    /* nested
       loops */
    for (int i = 10; i >= 0; i--) {
        for (j = 0; j < i; j += 2) {
            if (i == j) {
                printf(\"%d %c\", i, 'c');
            }
        }
    }
    if (done || total) {
        return total;
    }
    gc() { }
    step--;
    return 0;
}
";
    let report = parse(&tokenize(source));
    assert!(report.is_clean(), "{:#?}", report.diagnostics);
}

#[test]
fn test_persisted_tokens_parse_identically() {
    let source = "int main() {\n  int a = 1, b;\n  for (i = 0 10) { }\n  printf(\"%d, %d\", a, b)\n}\n";
    let tokens = tokenize(source);

    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("tokens.csv");
    persist::save_tokens(&table, &tokens).unwrap();
    let loaded = persist::load_tokens(&table).unwrap();

    assert_eq!(loaded.skipped_rows, 0);
    assert_eq!(loaded.tokens, tokens);
    assert_eq!(
        parse(&loaded.tokens).diagnostics,
        parse(&tokens).diagnostics
    );
}

#[test]
fn test_diagnostics_table() {
    let report = parse(&tokenize("int ;\nint ;"));
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("errors.csv");
    persist::save_diagnostics(&table, &report.diagnostics).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&table)
        .unwrap();
    let rows: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], "Error Message");
    assert!(rows[1].starts_with("Syntax Error on line 1: "));
    assert!(rows[2].starts_with("Syntax Error on line 2: "));
    assert_eq!(rows[3], "Total Errors: 2");
}
