use std::collections::HashMap;

use thiserror::Error;

use super::Value;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("cannot assign to reserved name: {0}")]
    ReservedName(String),
}

const BUILTINS: [(&str, bool); 2] = [("true", true), ("false", false)];

/// Variable bindings of one session, seeded with the reserved boolean names.
#[derive(Debug, Clone)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        let bindings = BUILTINS
            .iter()
            .map(|(name, value)| (name.to_string(), Value::Boolean(*value)))
            .collect();
        Self { bindings }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Binds `name`, replacing any earlier binding. Reserved names are refused
    /// and left untouched.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), EnvironmentError> {
        if Self::is_reserved(name) {
            return Err(EnvironmentError::ReservedName(name.to_string()));
        }
        self.bindings.insert(name.to_string(), value);
        Ok(())
    }

    pub fn is_reserved(name: &str) -> bool {
        BUILTINS.iter().any(|(builtin, _)| *builtin == name)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
