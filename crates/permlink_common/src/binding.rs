//! Binding properties: one axis of client-property specialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between alternative values in a joined binding value.
pub const VALUE_SEPARATOR: char = ',';

/// A `(name, value)` pair describing one resolved selection property.
///
/// After signature reduction the value may be a comma-joined union of several
/// raw values, meaning "any of these values selects the permutation".
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BindingProperty {
    /// The selection property name (e.g. `user.agent`).
    pub name: String,
    /// The resolved value, possibly a comma-joined list of alternatives.
    pub value: String,
}

impl BindingProperty {
    /// Creates a new binding property.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the number of alternative values carried by this binding.
    pub fn component_count(&self) -> usize {
        self.value.split(VALUE_SEPARATOR).count()
    }
}

impl fmt::Display for BindingProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
