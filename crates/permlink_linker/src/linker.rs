//! The two link pass entry points and their results.
//!
//! The host runs [`link_permutation`] once per compiled permutation (these
//! runs share nothing and may execute concurrently), collects the recorded
//! permutations, and then runs [`link_aggregate`] exactly once.

use std::collections::BTreeSet;

use permlink_common::{EmittedArtifact, Permutation, SelectionProperty, SelectionResult};
use permlink_config::{
    configured_static_files, resolve_properties, ConfigurationProperty, LinkerConfig,
    DEFAULT_DESCRIPTOR_FILE,
};
use permlink_diagnostics::{Diagnostic, DiagnosticSink};

use crate::discovery::{ArtifactDiscovery, ModuleArtifacts};
use crate::emit::EmittedFile;
use crate::error::{LinkError, DEV_MODE_PASSTHROUGH, DUPLICATE_PERMUTATION, NOTHING_TO_RECORD};
use crate::manifest::write_manifest;
use crate::partition::ArtifactPartitioner;
use crate::permutation_map::{create_permutation_map, PermutationMapCodec};
use crate::recorder::SelectionRecorder;
use crate::reducer::collect_permutation_selectors;
use crate::registry::PermutationRegistry;

/// Build-wide inputs shared by both link passes.
#[derive(Debug, Clone)]
pub struct LinkContext {
    /// Module name used to qualify artifact paths.
    pub module_name: String,
    /// Selection properties in declaration order.
    pub selection_properties: Vec<SelectionProperty>,
    /// Multi-valued configuration properties.
    pub configuration_properties: Vec<ConfigurationProperty>,
    /// Filename of the permutation map document.
    pub descriptor_file: String,
}

impl LinkContext {
    /// Creates a context with no properties and the default descriptor name.
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            selection_properties: Vec::new(),
            configuration_properties: Vec::new(),
            descriptor_file: DEFAULT_DESCRIPTOR_FILE.to_string(),
        }
    }

    /// Creates a context from a loaded configuration.
    ///
    /// `host_properties` override file properties of the same name.
    pub fn from_config(config: &LinkerConfig, host_properties: &[ConfigurationProperty]) -> Self {
        Self {
            module_name: config.module.name.clone(),
            selection_properties: Vec::new(),
            configuration_properties: resolve_properties(config, host_properties),
            descriptor_file: config.output.descriptor.clone(),
        }
    }

    /// Sets the declared selection properties.
    pub fn with_selection_properties(mut self, properties: Vec<SelectionProperty>) -> Self {
        self.selection_properties = properties;
        self
    }

    /// Sets the configuration properties.
    pub fn with_configuration_properties(mut self, properties: Vec<ConfigurationProperty>) -> Self {
        self.configuration_properties = properties;
        self
    }
}

/// Outcome of one per-permutation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerPermutationResult {
    /// The recorded permutation; `None` when the pass saw no selection results.
    pub permutation: Option<Permutation>,
}

/// Outcome of the aggregating pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregationResult {
    /// One manifest per permutation, in registry order, then the permutation map.
    pub outputs: Vec<EmittedFile>,
    /// `true` when no permutations were found and nothing was produced.
    pub dev_mode: bool,
}

impl AggregationResult {
    /// The result of a pass that found no permutations.
    pub fn passthrough() -> Self {
        Self {
            outputs: Vec::new(),
            dev_mode: true,
        }
    }
}

/// Runs the per-permutation pass.
///
/// Records every selection result against the permutation it names. The
/// permutation's files are the module artifacts discoverable when the first
/// result is recorded.
pub fn link_permutation(
    ctx: &LinkContext,
    results: &[SelectionResult],
    artifacts: &[EmittedArtifact],
    sink: &DiagnosticSink,
) -> Result<PerPermutationResult, LinkError> {
    let discovery = ModuleArtifacts::new(&ctx.module_name, artifacts);
    record_permutation(&ctx.selection_properties, results, &discovery, sink)
}

/// Runs the per-permutation pass against an arbitrary artifact source.
pub fn record_permutation(
    properties: &[SelectionProperty],
    results: &[SelectionResult],
    discovery: &dyn ArtifactDiscovery,
    sink: &DiagnosticSink,
) -> Result<PerPermutationResult, LinkError> {
    let mut recorder = SelectionRecorder::new(properties);
    recorder
        .record_all(results, discovery)
        .inspect_err(|e| sink.emit(e.to_diagnostic()))?;

    let permutation = recorder.finish();
    match &permutation {
        Some(p) => tracing::debug!(
            permutation = %p.name,
            selectors = p.selectors.len(),
            files = p.files.len(),
            "calculated permutation"
        ),
        None => sink.emit(Diagnostic::note(
            NOTHING_TO_RECORD,
            "link pass produced no selection results; nothing to record",
        )),
    }
    Ok(PerPermutationResult { permutation })
}

/// Runs the aggregating pass.
///
/// With no permutations (a development-mode build) the pass is a no-op.
/// Otherwise it produces one `<strong name>.appcache` manifest per
/// permutation followed by the permutation map. Any failure aborts the whole
/// pass and no documents are returned.
pub fn link_aggregate(
    ctx: &LinkContext,
    artifacts: &[EmittedArtifact],
    permutations: Vec<Permutation>,
    codec: &dyn PermutationMapCodec,
    sink: &DiagnosticSink,
) -> Result<AggregationResult, LinkError> {
    let registry = PermutationRegistry::from_permutations(permutations);
    if registry.is_empty() {
        sink.emit(
            Diagnostic::note(DEV_MODE_PASSTHROUGH, "no permutations found; skipping manifests")
                .with_help("this is expected for development-mode builds"),
        );
        return Ok(AggregationResult::passthrough());
    }
    for name in registry.replaced() {
        sink.emit(
            Diagnostic::warning(DUPLICATE_PERMUTATION, "permutation recorded more than once")
                .with_subject(name.clone())
                .with_note("only the last record is linked"),
        );
    }

    let all_artifacts = ModuleArtifacts::new(&ctx.module_name, artifacts).discover();
    aggregate(ctx, &registry, &all_artifacts, codec).inspect_err(|e| sink.emit(e.to_diagnostic()))
}

fn aggregate(
    ctx: &LinkContext,
    registry: &PermutationRegistry,
    all_artifacts: &BTreeSet<String>,
    codec: &dyn PermutationMapCodec,
) -> Result<AggregationResult, LinkError> {
    let descriptors = collect_permutation_selectors(registry)?;
    let static_files = configured_static_files(&ctx.configuration_properties);
    let partitioner = ArtifactPartitioner::new(all_artifacts, registry);

    let mut outputs = Vec::with_capacity(registry.len() + 1);
    for permutation in registry.iter() {
        let file_name = permutation.manifest_file_name();
        let files = partitioner.files_for(permutation);
        let contents = write_manifest(&file_name, &static_files, &files)?;
        outputs.push(EmittedFile::new(file_name, contents));
    }
    outputs.push(create_permutation_map(
        codec,
        &descriptors,
        &ctx.descriptor_file,
    )?);

    Ok(AggregationResult {
        outputs,
        dev_mode: false,
    })
}
