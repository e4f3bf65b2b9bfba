//! `permlink aggregate`: the build-wide aggregating pass.
//!
//! The pipeline:
//!
//! 1. Find project root and load `permlink.toml`
//! 2. Load every `*.permutation.json` record
//! 3. Load the build's artifact list
//! 4. Reduce signatures, partition artifacts, render manifests and the map
//! 5. Write the documents into the configured output directory

use std::path::{Path, PathBuf};

use permlink_common::{EmittedArtifact, Permutation};
use permlink_diagnostics::DiagnosticSink;
use permlink_linker::{emit_outputs, link_aggregate, JsonPermutationMapCodec, LinkContext};

use crate::permutation::PERMUTATION_RECORD_SUFFIX;
use crate::pipeline::{exit_code, load_project, read_json, render_diagnostics};
use crate::{AggregateArgs, GlobalArgs};

/// Runs the `permlink aggregate` command.
///
/// Returns exit code 0 if no errors, 1 if there are errors.
pub fn run(args: &AggregateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (project_dir, config) = load_project(global)?;

    let permutations = load_permutations(Path::new(&args.permutations))?;
    let artifacts: Vec<EmittedArtifact> = read_json(Path::new(&args.artifacts))?;

    if !global.quiet {
        eprintln!(
            "   Aggregating {} permutation(s) for {}",
            permutations.len(),
            config.module.name
        );
    }

    let ctx = LinkContext::from_config(&config, &[]);
    let sink = DiagnosticSink::new();
    let out_dir = project_dir.join(&config.output.dir);

    if let Ok(result) =
        link_aggregate(&ctx, &artifacts, permutations, &JsonPermutationMapCodec, &sink)
    {
        if let Ok(written) = emit_outputs(&out_dir, &result.outputs, &sink) {
            if !global.quiet && !result.dev_mode {
                eprintln!("   Wrote {} file(s) to {}", written.len(), out_dir.display());
            }
        }
    }

    render_diagnostics(&sink, global);
    Ok(exit_code(&sink))
}

/// Loads every recorded permutation in `dir`, ordered by file name.
///
/// A missing directory means no per-permutation pass ran (a development-mode
/// build) and yields no permutations.
pub fn load_permutations(dir: &Path) -> Result<Vec<Permutation>, Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_record = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(PERMUTATION_RECORD_SUFFIX));
        if is_record {
            paths.push(path);
        }
    }
    paths.sort();
    tracing::debug!(dir = %dir.display(), records = paths.len(), "loading permutation records");
    paths.iter().map(|p| read_json(p)).collect()
}
