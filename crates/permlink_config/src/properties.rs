//! Multi-valued configuration properties and their resolution.

use crate::types::LinkerConfig;

/// Name of the property listing static resources every manifest must cache.
pub const STATIC_FILES_PROPERTY: &str = "serviceworker_static_files";

/// A named, multi-valued configuration option supplied by the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationProperty {
    /// The property name.
    pub name: String,
    /// The configured values, in declaration order.
    pub values: Vec<String>,
}

impl ConfigurationProperty {
    /// Creates a new configuration property.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl LinkerConfig {
    /// Returns the `[properties]` table as configuration properties, in name order.
    pub fn configuration_properties(&self) -> Vec<ConfigurationProperty> {
        self.properties
            .iter()
            .map(|(name, values)| ConfigurationProperty::new(name.clone(), values.0.clone()))
            .collect()
    }
}

/// Returns the always-cache static resource paths.
///
/// Uses the first property named [`STATIC_FILES_PROPERTY`]; an absent
/// property yields an empty list.
pub fn configured_static_files(properties: &[ConfigurationProperty]) -> Vec<String> {
    properties
        .iter()
        .find(|p| p.name == STATIC_FILES_PROPERTY)
        .map(|p| p.values.clone())
        .unwrap_or_default()
}

/// Merges the file-based properties with properties supplied by the host.
///
/// File properties form the base. A host property replaces the file property
/// of the same name entirely; host properties with new names are appended.
pub fn resolve_properties(
    config: &LinkerConfig,
    host: &[ConfigurationProperty],
) -> Vec<ConfigurationProperty> {
    let mut resolved = config.configuration_properties();
    for property in host {
        match resolved.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => existing.values = property.values.clone(),
            None => resolved.push(property.clone()),
        }
    }
    resolved
}
