//! Splits the build's artifacts into per-permutation cache sets.

use std::collections::BTreeSet;

use permlink_common::Permutation;

use crate::registry::PermutationRegistry;

/// Computes the offline cache file set of each permutation.
///
/// Common files are the artifacts no permutation claims (the bootstrap
/// script, shared images). A permutation caches the common files plus those
/// of its own files that are still present in the artifact set.
pub struct ArtifactPartitioner<'a> {
    all_artifacts: &'a BTreeSet<String>,
    common: BTreeSet<String>,
}

impl<'a> ArtifactPartitioner<'a> {
    /// Precomputes the common files for the given artifacts and registry.
    pub fn new(all_artifacts: &'a BTreeSet<String>, registry: &PermutationRegistry) -> Self {
        let common = all_artifacts
            .difference(registry.all_permutation_files())
            .cloned()
            .collect();
        Self {
            all_artifacts,
            common,
        }
    }

    /// Returns the artifacts not claimed by any permutation.
    pub fn common_files(&self) -> &BTreeSet<String> {
        &self.common
    }

    /// Returns the files `permutation` must cache.
    pub fn files_for(&self, permutation: &Permutation) -> BTreeSet<String> {
        let mut files = self.common.clone();
        files.extend(
            permutation
                .files
                .intersection(self.all_artifacts)
                .cloned(),
        );
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn permutation(name: &str, files: &[&str]) -> Permutation {
        let mut p = Permutation::new(name);
        p.files = set(files);
        p
    }

    #[test]
    fn partition_correctness() {
        let all = set(&["A", "B", "P1", "P2"]);
        let p1 = permutation("P1", &["P1"]);
        let p2 = permutation("P2", &["P2"]);
        let registry = PermutationRegistry::from_permutations(vec![p1.clone(), p2.clone()]);
        let partitioner = ArtifactPartitioner::new(&all, &registry);

        let files_1 = partitioner.files_for(&p1);
        let files_2 = partitioner.files_for(&p2);
        assert_eq!(files_1, set(&["A", "B", "P1"]));
        assert_eq!(files_2, set(&["A", "B", "P2"]));

        let recovered: BTreeSet<String> = files_1
            .union(&files_2)
            .filter(|f| !partitioner.common_files().contains(*f))
            .cloned()
            .collect();
        assert_eq!(recovered, set(&["P1", "P2"]));
    }

    #[test]
    fn stale_permutation_files_are_dropped() {
        let all = set(&["app/app.nocache.js", "app/P1.cache.js"]);
        let p1 = permutation("P1", &["app/P1.cache.js", "app/pruned.png"]);
        let registry = PermutationRegistry::from_permutations(vec![p1.clone()]);
        let partitioner = ArtifactPartitioner::new(&all, &registry);
        assert_eq!(
            partitioner.files_for(&p1),
            set(&["app/P1.cache.js", "app/app.nocache.js"])
        );
    }

    #[test]
    fn files_shared_by_permutations_are_not_common() {
        let all = set(&["boot.js", "shared.png", "P1.js", "P2.js"]);
        let p1 = permutation("P1", &["P1.js", "shared.png"]);
        let p2 = permutation("P2", &["P2.js", "shared.png"]);
        let registry = PermutationRegistry::from_permutations(vec![p1.clone(), p2]);
        let partitioner = ArtifactPartitioner::new(&all, &registry);
        assert_eq!(partitioner.common_files(), &set(&["boot.js"]));
        assert_eq!(
            partitioner.files_for(&p1),
            set(&["P1.js", "boot.js", "shared.png"])
        );
    }
}
