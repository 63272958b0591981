//! Command-line front end
//!
//! ```text
//! catty program.cat [--tokens tokens.csv] [--errors errors.csv] [--quiet]
//! catty --from-tokens tokens.csv [--errors errors.csv]
//! ```
//!
//! Exit status: 0 when the program is syntactically clean, 1 when syntax
//! errors were reported, 2 when a file could not be read or written.

use crate::constants::{SOURCE_EXTENSION, TABLE_EXTENSION};
use crate::error::{CattyError, Result};
use crate::parser::{parse, Diagnostic, Lexer, ParseReport, Token};
use crate::persist;
use clap::Parser as ClapParser;
use crossterm::style::Stylize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

/// Lex and syntax-check a .cat program
#[derive(Debug, ClapParser)]
#[command(name = "catty", version, about)]
pub struct Cli {
    /// Source file to check (must have the .cat extension)
    #[arg(required_unless_present = "from_tokens")]
    pub source: Option<PathBuf>,

    /// Write the token table to this CSV file
    #[arg(long, value_name = "CSV")]
    pub tokens: Option<PathBuf>,

    /// Write the diagnostics table to this CSV file
    #[arg(long, value_name = "CSV")]
    pub errors: Option<PathBuf>,

    /// Parse a previously saved token table instead of a source file
    #[arg(long, value_name = "CSV", conflicts_with = "source")]
    pub from_tokens: Option<PathBuf>,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

fn check_extension(path: &Path, expected: &'static str) -> Result<()> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(expected) {
        return Err(CattyError::InvalidExtension {
            path: path.to_path_buf(),
            expected,
        });
    }
    Ok(())
}

/// Check that `path` names an existing `.cat` file
pub fn validate_source_path(path: &Path) -> Result<()> {
    check_extension(path, SOURCE_EXTENSION)?;
    if !path.is_file() {
        return Err(CattyError::SourceNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Check that `path` names a `.csv` table. The file itself may not exist yet.
pub fn validate_table_path(path: &Path) -> Result<()> {
    check_extension(path, TABLE_EXTENSION)
}

fn validate_table_paths(cli: &Cli) -> Result<()> {
    [&cli.tokens, &cli.errors, &cli.from_tokens]
        .into_iter()
        .flatten()
        .try_for_each(|path| validate_table_path(path))
}

/// Tokens to parse, from whichever input the command line named
fn load_input(cli: &Cli) -> Result<Vec<Token>> {
    if let Some(table) = &cli.from_tokens {
        let loaded = persist::load_tokens(table)?;
        if loaded.tokens.is_empty() {
            return Err(CattyError::EmptyTokenTable(table.to_path_buf()));
        }
        if loaded.skipped_rows > 0 {
            warn!(
                skipped = loaded.skipped_rows,
                "some rows of {} could not be read",
                table.display()
            );
        }
        return Ok(loaded.tokens);
    }

    // clap guarantees a source when --from-tokens is absent
    let path = cli.source.as_deref().unwrap_or_else(|| Path::new(""));
    validate_source_path(path)?;

    let source = fs::read_to_string(path)?;
    let lexed = Lexer::new(&source).tokenize();
    info!(
        tokens = lexed.tokens.len(),
        unrecognized = lexed.unrecognized.len(),
        "lexed {}",
        path.display()
    );

    if let Some(table) = &cli.tokens {
        persist::save_tokens(table, &lexed.tokens)?;
    }
    Ok(lexed.tokens)
}

/// Run the pipeline described by `cli` and return the parse report
pub fn run(cli: &Cli) -> Result<ParseReport> {
    validate_table_paths(cli)?;
    let tokens = load_input(cli)?;
    let report = parse(&tokens);

    if let Some(table) = &cli.errors {
        persist::save_diagnostics(table, &report.diagnostics)?;
    }
    Ok(report)
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    println!(
        "{} {}",
        format!("Syntax Error on line {}:", diagnostic.line).red().bold(),
        diagnostic.message
    );
}

/// Print the report to stdout
pub fn print_report(report: &ParseReport, quiet: bool) {
    if !quiet {
        for diagnostic in &report.diagnostics {
            print_diagnostic(diagnostic);
        }
    }

    if report.is_clean() {
        println!("{}", "No syntax errors found.".green().bold());
    } else {
        println!(
            "{}",
            format!("Total Errors: {}", report.error_count()).yellow().bold()
        );
    }
}

/// Parse arguments, run, print, and map the outcome to an exit status
pub fn main_entry() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            print_report(&report, cli.quiet);
            if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}
