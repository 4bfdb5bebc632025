pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod visitor;

pub use parser::{ParseError, Parser};
