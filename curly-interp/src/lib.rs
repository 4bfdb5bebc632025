//! Tree-walking evaluation of parsed programs.

pub mod config;
pub mod env;
pub mod error;
pub mod interpreter;

pub use config::InterpreterConfig;
pub use error::RuntimeError;
pub use interpreter::Interpreter;
