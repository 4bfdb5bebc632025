use curly_parser::ast::BinOp;
use curly_source::Position;
use std::io;
use thiserror::Error;

/// Errors raised while evaluating a program. Evaluation stops at the first one.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Undefined variable: {name} at {pos}")]
    UndefinedVariable { name: String, pos: Position },
    #[error("Function not found: {}{}", .name, at(.pos))]
    UnknownFunction { name: String, pos: Option<Position> },
    #[error(
        "Function {} expects {} argument(s), got {}{}",
        .name, .expected, .given, at(.pos)
    )]
    ArityMismatch {
        name: String,
        expected: usize,
        given: usize,
        pos: Option<Position>,
    },
    #[error("Division by zero at {pos}")]
    DivisionByZero { pos: Position },
    #[error("Integer overflow in '{op}' at {pos}")]
    Overflow { op: BinOp, pos: Position },
    #[error("{message} at {pos}")]
    Unsupported { message: &'static str, pos: Position },
    #[error(
        "Stack overflow: more than {} nested calls when calling {}{}",
        .limit, .name, at(.pos)
    )]
    StackOverflow {
        name: String,
        limit: usize,
        pos: Option<Position>,
    },
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn at(pos: &Option<Position>) -> String {
    match pos {
        Some(pos) => format!(" at {}", pos),
        None => String::new(),
    }
}
