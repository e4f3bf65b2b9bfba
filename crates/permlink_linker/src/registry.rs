//! The permutations collected for one aggregating link pass.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use permlink_common::Permutation;

/// Every permutation of one build, keyed by strong name.
///
/// Built once at the start of the aggregating pass and read-only afterwards.
/// Iteration follows the order in which the host handed permutations over.
/// Strong names are unique across per-permutation passes; if the host breaks
/// that guarantee the later permutation replaces the earlier one in place and
/// the name is listed in [`PermutationRegistry::replaced`].
#[derive(Debug, Clone, Default)]
pub struct PermutationRegistry {
    permutations: IndexMap<String, Permutation>,
    all_permutation_files: BTreeSet<String>,
    replaced: Vec<String>,
}

impl PermutationRegistry {
    /// Builds the registry and precomputes the union of all permutation files.
    ///
    /// The union covers only the permutations kept after replacement.
    pub fn from_permutations(permutations: impl IntoIterator<Item = Permutation>) -> Self {
        let mut registry = Self::default();
        for permutation in permutations {
            let name = permutation.name.clone();
            if registry.permutations.insert(name.clone(), permutation).is_some() {
                registry.replaced.push(name);
            }
        }
        registry.all_permutation_files = registry
            .permutations
            .values()
            .flat_map(|p| p.files.iter().cloned())
            .collect();
        registry
    }

    /// Strong names that were registered more than once, in replacement order.
    pub fn replaced(&self) -> &[String] {
        &self.replaced
    }

    /// Returns the permutation with the given strong name.
    pub fn get(&self, name: &str) -> Option<&Permutation> {
        self.permutations.get(name)
    }

    /// Iterates over the permutations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Permutation> {
        self.permutations.values()
    }

    /// Returns the number of permutations.
    pub fn len(&self) -> usize {
        self.permutations.len()
    }

    /// Returns `true` if no permutation was registered (a dev-mode build).
    pub fn is_empty(&self) -> bool {
        self.permutations.is_empty()
    }

    /// Returns the union of every permutation's files.
    pub fn all_permutation_files(&self) -> &BTreeSet<String> {
        &self.all_permutation_files
    }
}
