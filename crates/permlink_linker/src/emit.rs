//! Writing link output documents to disk.

use std::path::{Path, PathBuf};

use permlink_diagnostics::DiagnosticSink;
use serde::{Deserialize, Serialize};

use crate::error::LinkError;

/// A document produced by a link pass, named relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedFile {
    /// File name relative to the output directory.
    pub path: String,
    /// The full document text.
    pub contents: String,
}

impl EmittedFile {
    /// Creates a new emitted document.
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Writes every document into `dir`, creating the directory if needed.
///
/// Returns the written paths in input order. The first failure is reported
/// to `sink` and aborts the remaining writes.
pub fn emit_outputs(
    dir: &Path,
    outputs: &[EmittedFile],
    sink: &DiagnosticSink,
) -> Result<Vec<PathBuf>, LinkError> {
    write_all(dir, outputs).inspect_err(|e| sink.emit(e.to_diagnostic()))
}

fn write_all(dir: &Path, outputs: &[EmittedFile]) -> Result<Vec<PathBuf>, LinkError> {
    std::fs::create_dir_all(dir).map_err(|e| LinkError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut written = Vec::with_capacity(outputs.len());
    for output in outputs {
        let path = dir.join(&output.path);
        std::fs::write(&path, &output.contents).map_err(|e| LinkError::Io {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), bytes = output.contents.len(), "emitted link output");
        written.push(path);
    }
    Ok(written)
}
