use super::Value;
use crate::{Error, Result};

use indexmap::IndexMap;

/// Values bound to named variables for one execution.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VariableSet {
    values: IndexMap<String, Value>,
}

impl VariableSet {
    pub fn new() -> VariableSet {
        VariableSet::default()
    }

    /// Returns the value bound to `name`.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| Error::unbound_variable(name))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for VariableSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        VariableSet {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
