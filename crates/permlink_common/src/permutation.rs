//! A single compiled permutation and the variant records that select it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::selection::SelectionDescriptor;

/// File ending of a permutation's offline cache manifest.
pub const PERMUTATION_MANIFEST_FILE_ENDING: &str = ".appcache";

/// One compiled variant of the application.
///
/// Created once per per-permutation link pass. Files and variant records are
/// only appended during that pass; afterwards the value is treated as
/// immutable and handed to the aggregating pass.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Permutation {
    /// The permutation's strong name (unique build-variant identifier).
    pub name: String,
    /// Artifact paths contributed by this permutation.
    #[serde(default)]
    pub files: BTreeSet<String>,
    /// Variant records in discovery order, without structural duplicates.
    #[serde(default)]
    pub selectors: Vec<SelectionDescriptor>,
}

impl Permutation {
    /// Creates an empty permutation with the given strong name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: BTreeSet::new(),
            selectors: Vec::new(),
        }
    }

    /// Appends a variant record unless a structurally equal one is present.
    ///
    /// Returns `true` if the record was added.
    pub fn add_selector(&mut self, selector: SelectionDescriptor) -> bool {
        if self.selectors.contains(&selector) {
            return false;
        }
        self.selectors.push(selector);
        true
    }

    /// Returns the name of this permutation's cache manifest document.
    pub fn manifest_file_name(&self) -> String {
        format!("{}{PERMUTATION_MANIFEST_FILE_ENDING}", self.name)
    }
}
