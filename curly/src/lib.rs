//! Runs Curly programs: parse top-level items, register functions, execute statements, then call `main`.

use curly_interp::{Interpreter, RuntimeError};
use curly_parser::ast::Item;
use curly_parser::lexer::Lexer;
use curly_parser::printer::print_items;
use curly_parser::{ParseError, Parser};
use curly_source::Source;
use std::io::Write;
use thiserror::Error;
use tracing::debug;

/// Name of the function invoked once the whole program has been loaded.
pub const ENTRY_POINT: &str = "main";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Summary of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Value returned by `main`, or `None` when the program declares no `main`.
    pub main_result: Option<i64>,
    pub functions: usize,
    /// Top-level statements executed before `main` was called.
    pub statements: usize,
}

impl Outcome {
    /// The line reported once the run is over, e.g. `main() returned: 0`.
    pub fn summary(&self) -> Option<String> {
        self.main_result
            .map(|result| format!("{}() returned: {}", ENTRY_POINT, result))
    }
}

/// Lexes `source` into one `L:C Kind 'lexeme'` line per token.
pub fn emit_tokens(source: &str) -> String {
    let source = Source::new(source);
    Lexer::new(&source)
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses the whole of `source` and renders its AST.
pub fn emit_ast(source: &str) -> Result<String, Error> {
    let source = Source::new(source);
    let items = Parser::new(&source).parse_program()?;
    Ok(print_items(&items))
}

/// Runs `source` with an interpreter printing to standard output.
pub fn run(source: &str) -> Result<Outcome, Error> {
    run_with(source, &mut Interpreter::new())
}

/// Runs `source` on `interp`.
///
/// Items are handled as soon as they are parsed: a statement runs before the
/// next item is parsed, so a syntax error further down does not undo the
/// output of statements above it.
pub fn run_with<W: Write>(source: &str, interp: &mut Interpreter<W>) -> Result<Outcome, Error> {
    let source = Source::new(source);
    debug!(lines = source.line_count(), "running program");
    let mut parser = Parser::new(&source);
    let mut outcome = Outcome::default();

    while !parser.is_at_end() {
        match parser.parse_top_level()? {
            Item::FnDeclaration(func) => {
                let name = func.ident.clone();
                interp.add_function(&name, func);
                outcome.functions += 1;
            }
            Item::Stmt(stmt) => {
                interp.exec_stmt(&stmt)?;
                outcome.statements += 1;
            }
        }
    }

    if interp.has_function(ENTRY_POINT) {
        debug!(
            max_call_depth = interp.config().max_call_depth,
            "calling {}", ENTRY_POINT
        );
        outcome.main_result = Some(interp.call_function(ENTRY_POINT, &[])?);
    }
    debug!(?outcome, "run finished");
    Ok(outcome)
}
