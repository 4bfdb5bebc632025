/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Tunables for an [`Interpreter`](crate::interpreter::Interpreter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Calls nested deeper than this fail with
    /// [`RuntimeError::StackOverflow`](crate::error::RuntimeError::StackOverflow).
    pub max_call_depth: usize,
}

impl InterpreterConfig {
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
