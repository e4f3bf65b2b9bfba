//! Records the selection results of a single per-permutation link pass.

use permlink_common::{
    BindingProperty, Permutation, SelectionDescriptor, SelectionProperty, SelectionResult,
};

use crate::discovery::ArtifactDiscovery;
use crate::error::LinkError;

/// Accumulates the variant records and files of one permutation.
///
/// A recorder lives for exactly one per-permutation pass. The first
/// selection result fixes the permutation identity and snapshots the
/// discovered artifacts as the permutation's files; every result becomes a
/// variant record built from the non-derived selection properties, in
/// declared order.
pub struct SelectionRecorder<'a> {
    properties: &'a [SelectionProperty],
    permutation: Option<Permutation>,
}

impl<'a> SelectionRecorder<'a> {
    /// Creates a recorder for the build's declared selection properties.
    pub fn new(properties: &'a [SelectionProperty]) -> Self {
        Self {
            properties,
            permutation: None,
        }
    }

    /// Records one selection result.
    ///
    /// Fails with [`LinkError::IdentityConflict`] if the result names a
    /// different permutation than the results recorded before it.
    pub fn record(
        &mut self,
        result: &SelectionResult,
        discovery: &dyn ArtifactDiscovery,
    ) -> Result<(), LinkError> {
        if let Some(existing) = &self.permutation {
            if existing.name != result.strong_name {
                return Err(LinkError::IdentityConflict {
                    expected: existing.name.clone(),
                    found: result.strong_name.clone(),
                });
            }
        }
        let record = self.variant_record(result);
        let permutation = self.permutation.get_or_insert_with(|| {
            let mut permutation = Permutation::new(result.strong_name.clone());
            permutation.files = discovery.discover();
            permutation
        });
        permutation.add_selector(record);
        Ok(())
    }

    /// Records every result in order, stopping at the first conflict.
    pub fn record_all(
        &mut self,
        results: &[SelectionResult],
        discovery: &dyn ArtifactDiscovery,
    ) -> Result<(), LinkError> {
        for result in results {
            self.record(result, discovery)?;
        }
        Ok(())
    }

    /// Returns the recorded permutation, or `None` if no result was recorded.
    pub fn finish(self) -> Option<Permutation> {
        self.permutation
    }

    fn variant_record(&self, result: &SelectionResult) -> SelectionDescriptor {
        let bindings = self
            .properties
            .iter()
            .filter(|p| !p.derived)
            .filter_map(|p| {
                result
                    .prop_map
                    .get(&p.name)
                    .map(|value| BindingProperty::new(p.name.clone(), value.clone()))
            })
            .collect();
        SelectionDescriptor::new(result.strong_name.clone(), bindings)
    }
}
