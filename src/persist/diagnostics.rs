//! Diagnostics table
//!
//! A single `Error Message` column holding the rendered diagnostics in source
//! order, then a `Total Errors: N` row. A clean parse produces one
//! `No errors found.` row instead.

use crate::error::Result;
use crate::parser::Diagnostic;
use std::io;

pub const DIAGNOSTIC_HEADER: &str = "Error Message";

pub fn write_diagnostics<W: io::Write>(diagnostics: &[Diagnostic], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record([DIAGNOSTIC_HEADER])?;
    if diagnostics.is_empty() {
        csv.write_record(["No errors found."])?;
    } else {
        for diagnostic in diagnostics {
            csv.write_record([diagnostic.to_string()])?;
        }
        csv.write_record([format!("Total Errors: {}", diagnostics.len())])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn to_string(diagnostics: &[Diagnostic]) -> String {
        let mut buffer = Vec::new();
        write_diagnostics(diagnostics, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_clean_report() {
        assert_eq!(to_string(&[]), "Error Message\nNo errors found.\n");
    }

    #[test]
    fn test_rows_and_total() {
        let diagnostics = [
            Diagnostic::new(1, "Expected ';' at the end of the declaration"),
            Diagnostic::new(4, "Unterminated main block: missing closing '}'"),
        ];
        assert_eq!(
            to_string(&diagnostics),
            "Error Message\n\
             Syntax Error on line 1: Expected ';' at the end of the declaration\n\
             Syntax Error on line 4: Unterminated main block: missing closing '}'\n\
             Total Errors: 2\n"
        );
    }

    #[test]
    fn test_commas_are_quoted() {
        let diagnostics = [Diagnostic::new(2, "Found ',' (COMMA_DELI)")];
        let csv = to_string(&diagnostics);
        assert!(csv.contains("\"Syntax Error on line 2: Found ',' (COMMA_DELI)\""));
    }
}
