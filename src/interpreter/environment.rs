use std::collections::HashMap;

/// Persistent variable bindings shared by all statements of a session.
///
/// The environment maps names to values and outlives individual statement
/// executions. Only the virtual machine writes to it, when a `STORE_VAR`
/// sequence completes successfully; everything else has read access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, f64>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if no variable is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Returns all bindings ordered by name.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut bindings: Vec<(&str, f64)> = self.variables
                                                 .iter()
                                                 .map(|(name, value)| (name.as_str(), *value))
                                                 .collect();
        bindings.sort_unstable_by(|a, b| a.0.cmp(b.0));
        bindings
    }

    /// Binds `name` to `value`, overwriting any previous binding.
    pub(crate) fn bind(&mut self, name: String, value: f64) {
        self.variables.insert(name, value);
    }
}
