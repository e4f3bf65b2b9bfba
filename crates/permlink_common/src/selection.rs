//! Selection inputs from the host build and the records derived from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::binding::BindingProperty;

/// A selection property declared by the build, in declaration order.
///
/// Derived properties are computed from other properties on the client and
/// never participate in a permutation's signature.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SelectionProperty {
    /// The property name.
    pub name: String,
    /// Whether the property's value is derived from other properties.
    #[serde(default)]
    pub derived: bool,
}

impl SelectionProperty {
    /// Creates a non-derived selection property.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            derived: false,
        }
    }

    /// Creates a derived selection property.
    pub fn derived(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            derived: true,
        }
    }
}

/// One concrete selection result: a permutation identifier plus the property
/// values the host resolved to it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SelectionResult {
    /// The permutation's strong name.
    pub strong_name: String,
    /// Property name to resolved value.
    #[serde(default)]
    pub prop_map: BTreeMap<String, String>,
}

impl SelectionResult {
    /// Creates a selection result from `(name, value)` pairs.
    pub fn new<I, K, V>(strong_name: impl Into<String>, props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            strong_name: strong_name.into(),
            prop_map: props
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// An ordered list of binding properties attached to a permutation.
///
/// Used both for the raw variant records collected per permutation and for
/// the reduced signature emitted into the permutation map. Two descriptors
/// are equal when their permutation names and ordered binding lists match.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SelectionDescriptor {
    /// The permutation's strong name.
    #[serde(rename = "permutation")]
    pub permutation_name: String,
    /// Binding properties in declared (or reduced) order.
    #[serde(rename = "selectors")]
    pub binding_properties: Vec<BindingProperty>,
}

impl SelectionDescriptor {
    /// Creates a new selection descriptor.
    pub fn new(permutation_name: impl Into<String>, binding_properties: Vec<BindingProperty>) -> Self {
        Self {
            permutation_name: permutation_name.into(),
            binding_properties,
        }
    }

    /// Returns the value bound to `name`, if any.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.binding_properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}
