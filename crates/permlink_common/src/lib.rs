//! Shared value types used across the permlink workspace.
//!
//! This crate provides the data model exchanged between the per-permutation
//! and aggregating link passes: binding properties, selection descriptors,
//! permutations, the host's selection inputs, and emitted build artifacts.

#![warn(missing_docs)]

pub mod artifact;
pub mod binding;
pub mod permutation;
pub mod selection;

pub use artifact::{EmittedArtifact, Visibility};
pub use binding::{BindingProperty, VALUE_SEPARATOR};
pub use permutation::{Permutation, PERMUTATION_MANIFEST_FILE_ENDING};
pub use selection::{SelectionDescriptor, SelectionProperty, SelectionResult};
