//! `permlink permutation`: per-permutation link passes.
//!
//! Each input describes one compiled permutation. Passes share nothing but
//! the diagnostic sink, so they run on the rayon pool; every recorded
//! permutation is written as `<name>.permutation.json` for the aggregating
//! pass to pick up.

use std::path::Path;

use permlink_common::{EmittedArtifact, SelectionProperty, SelectionResult};
use permlink_diagnostics::DiagnosticSink;
use permlink_linker::{emit_outputs, link_permutation, EmittedFile, LinkContext};
use rayon::prelude::*;
use serde::Deserialize;

use crate::pipeline::{exit_code, load_project, read_json, render_diagnostics};
use crate::{GlobalArgs, PermutationArgs};

/// File suffix of a recorded permutation.
pub const PERMUTATION_RECORD_SUFFIX: &str = ".permutation.json";

/// One per-permutation pass as handed over by the host build.
#[derive(Debug, Deserialize)]
pub struct PassInput {
    /// Selection properties declared by the build, in order.
    #[serde(default)]
    pub properties: Vec<SelectionProperty>,
    /// Selection results observed for this permutation.
    #[serde(default)]
    pub results: Vec<SelectionResult>,
    /// Artifacts emitted while compiling this permutation.
    #[serde(default)]
    pub artifacts: Vec<EmittedArtifact>,
}

/// Runs the `permlink permutation` command.
///
/// Returns exit code 0 if every pass succeeded, 1 otherwise.
pub fn run(args: &PermutationArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (_, config) = load_project(global)?;
    let module_name = config.module.name.as_str();

    let mut inputs = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        inputs.push(read_json::<PassInput>(Path::new(path))?);
    }

    if !global.quiet {
        eprintln!("   Linking {} permutation pass(es) for {module_name}", inputs.len());
    }

    tracing::debug!(inputs = inputs.len(), out_dir = %args.out_dir, "running permutation passes");
    let sink = DiagnosticSink::new();
    let records = record_passes(module_name, &inputs, &sink)?;
    let written = emit_outputs(Path::new(&args.out_dir), &records, &sink);

    render_diagnostics(&sink, global);
    if written.is_ok() && !global.quiet {
        eprintln!("   Recorded {} permutation(s)", records.len());
    }
    Ok(exit_code(&sink))
}

/// Runs every pass in parallel and serializes the recorded permutations.
///
/// A failing pass has already reported its diagnostic and is skipped.
pub fn record_passes(
    module_name: &str,
    inputs: &[PassInput],
    sink: &DiagnosticSink,
) -> Result<Vec<EmittedFile>, serde_json::Error> {
    let permutations: Vec<_> = inputs
        .par_iter()
        .filter_map(|input| {
            let ctx =
                LinkContext::new(module_name).with_selection_properties(input.properties.clone());
            link_permutation(&ctx, &input.results, &input.artifacts, sink)
                .ok()
                .and_then(|result| result.permutation)
        })
        .collect();

    permutations
        .iter()
        .map(|p| {
            let contents = serde_json::to_string_pretty(p)?;
            Ok(EmittedFile::new(
                format!("{}{PERMUTATION_RECORD_SUFFIX}", p.name),
                contents,
            ))
        })
        .collect()
}
