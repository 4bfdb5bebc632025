//! Variable storage.

use rustc_hash::FxHashMap;

/// A flat mapping from variable names to integer values.
///
/// There is no block scope: every statement of a function body shares one
/// `Environment`. Function calls isolate the caller by taking a snapshot
/// (a clone) before binding parameters and restoring it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    variables: FxHashMap<String, i64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.variables.get(name).copied()
    }

    /// Creates or overwrites `name`.
    pub fn set(&mut self, name: &str, value: i64) {
        match self.variables.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.variables.insert(name.to_string(), value);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
