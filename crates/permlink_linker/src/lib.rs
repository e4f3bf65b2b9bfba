//! Permutation linking: selection signatures and offline cache manifests.
//!
//! A build compiles one application into many permutations. This crate runs
//! the two link passes over them:
//!
//! - the **per-permutation** pass ([`link_permutation`]) records which
//!   property combinations select a permutation and which files it owns;
//! - the **aggregating** pass ([`link_aggregate`]) reduces every
//!   permutation's variants to a minimal signature, writes the permutation
//!   map consumed by client-side selection, and partitions the build's
//!   artifacts into one `.appcache` manifest per permutation.

#![warn(missing_docs)]

pub mod discovery;
pub mod emit;
pub mod error;
pub mod linker;
pub mod manifest;
pub mod partition;
pub mod permutation_map;
pub mod recorder;
pub mod reducer;
pub mod registry;

pub use discovery::{ArtifactDiscovery, ModuleArtifacts};
pub use emit::{emit_outputs, EmittedFile};
pub use error::LinkError;
pub use linker::{
    link_aggregate, link_permutation, record_permutation, AggregationResult, LinkContext,
    PerPermutationResult,
};
pub use manifest::{write_manifest, ManifestDescriptor};
pub use partition::ArtifactPartitioner;
pub use permutation_map::{JsonPermutationMapCodec, PermutationMapCodec};
pub use recorder::SelectionRecorder;
pub use reducer::{collect_permutation_selectors, reduce_permutation};
pub use registry::PermutationRegistry;
