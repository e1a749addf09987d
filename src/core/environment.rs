use std::collections::HashMap;
use std::iter::FromIterator;

use super::{Result, RpascalError, Value};

/// The interpreter's variable store: one flat mapping from identifier to
/// its current value, standing in for program memory.
///
/// The store is created empty by the caller and handed to the interpreter
/// for the duration of a run. Assignments insert or overwrite; nothing is
/// ever deleted during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    values: HashMap<String, Value>,
}

impl Environment {
    /// Creates a new empty environment.
    #[must_use]
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
        }
    }

    /// Inserts `(name : value)` into self's environment, overwriting any
    /// prior value and its numeric kind.
    pub fn define(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }

    /// Returns the value of `name`.
    ///
    /// # Returns
    /// Returns `Err(RpascalError::UndefinedVariable(name))` if nothing was
    /// ever assigned to `name`. A missing name is never a silent zero.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| RpascalError::UndefinedVariable(name.to_owned()))
    }

    /// Iterates over the store's bindings in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Constructs an environment from an iterator.
impl FromIterator<(String, Value)> for Environment {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (String, Value)>,
    {
        let mut values = HashMap::new();
        values.extend(iter);

        Environment { values }
    }
}
