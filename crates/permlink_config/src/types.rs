//! Configuration types deserialized from `permlink.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Default filename of the build-wide permutation map document.
pub const DEFAULT_DESCRIPTOR_FILE: &str = "permutations.json";

/// The top-level linker configuration parsed from `permlink.toml`.
#[derive(Debug, Deserialize)]
pub struct LinkerConfig {
    /// The module being linked.
    pub module: ModuleMeta,
    /// Where and under which names output documents are written.
    #[serde(default)]
    pub output: OutputConfig,
    /// Multi-valued configuration properties, keyed by property name.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValues>,
}

/// Metadata about the module whose artifacts are linked.
#[derive(Debug, Deserialize)]
pub struct ModuleMeta {
    /// The module name; discovered artifact paths are qualified with it.
    pub name: String,
}

/// Output settings for the aggregating pass.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives manifests and the permutation map.
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// Filename of the permutation map document.
    #[serde(default = "default_descriptor")]
    pub descriptor: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            descriptor: default_descriptor(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_descriptor() -> String {
    DEFAULT_DESCRIPTOR_FILE.to_string()
}

/// The values of one configuration property.
///
/// Accepts either a single string or a list of strings, so both
/// `serviceworker_static_files = "index.html"` and
/// `serviceworker_static_files = ["index.html", "app.css"]` are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyValues(pub Vec<String>);

impl<'de> Deserialize<'de> for PropertyValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrVec;

        impl<'de> Visitor<'de> for StringOrVec {
            type Value = Vec<String>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("a string or a list of strings")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(vec![v.to_string()])
            }

            fn visit_seq<A: de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut vec = Vec::new();
                while let Some(val) = seq.next_element::<String>()? {
                    vec.push(val);
                }
                Ok(vec)
            }
        }

        deserializer.deserialize_any(StringOrVec).map(PropertyValues)
    }
}
