//! Error types for link passes.

use std::path::PathBuf;

use permlink_diagnostics::{Category, Diagnostic, DiagnosticCode};

/// Code for a per-permutation pass that saw more than one permutation identity.
pub const IDENTITY_CONFLICT: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
/// Code for a permutation without any variant records.
pub const NO_SELECTION_DATA: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
/// Code for a manifest or permutation map that could not be rendered.
pub const SERIALIZATION_FAILURE: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);
/// Code for an output document that could not be written.
pub const OUTPUT_IO: DiagnosticCode = DiagnosticCode::new(Category::Error, 104);
/// Code for a previously emitted manifest that could not be read back.
pub const MANIFEST_PARSE: DiagnosticCode = DiagnosticCode::new(Category::Error, 105);
/// Code for a strong name handed to the aggregating pass more than once.
pub const DUPLICATE_PERMUTATION: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);
/// Code for an aggregating pass that found no permutations.
pub const DEV_MODE_PASSTHROUGH: DiagnosticCode = DiagnosticCode::new(Category::Note, 201);
/// Code for a per-permutation pass that found no selection results.
pub const NOTHING_TO_RECORD: DiagnosticCode = DiagnosticCode::new(Category::Note, 202);

/// Fatal conditions that abort a link pass.
///
/// Every variant is also reported to the caller's diagnostic sink (see
/// [`LinkError::to_diagnostic`]) before it is returned; no output document is
/// produced for a pass that fails.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Selection results or variant records of one permutation name another.
    #[error("permutation identity conflict: expected '{expected}', found '{found}'")]
    IdentityConflict {
        /// The identity established by the first selection result.
        expected: String,
        /// The conflicting identity.
        found: String,
    },

    /// A permutation reached the aggregating pass without any variant records.
    #[error("no selection data for permutation '{permutation}'")]
    NoSelectionData {
        /// The permutation's strong name.
        permutation: String,
    },

    /// A manifest or the permutation map could not be rendered.
    #[error("failed to serialize {artifact}: {reason}")]
    Serialization {
        /// The output document being rendered.
        artifact: String,
        /// Description of the failure.
        reason: String,
    },

    /// A manifest document could not be parsed.
    #[error("failed to parse cache manifest: {reason}")]
    ManifestParse {
        /// Description of the parse failure.
        reason: String,
    },

    /// An output document could not be written.
    #[error("link output I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl LinkError {
    /// Returns the diagnostic code reported for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            LinkError::IdentityConflict { .. } => IDENTITY_CONFLICT,
            LinkError::NoSelectionData { .. } => NO_SELECTION_DATA,
            LinkError::Serialization { .. } => SERIALIZATION_FAILURE,
            LinkError::ManifestParse { .. } => MANIFEST_PARSE,
            LinkError::Io { .. } => OUTPUT_IO,
        }
    }

    /// Builds the structured error event for this failure.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LinkError::IdentityConflict { expected, found } => {
                Diagnostic::error(self.code(), "selection data must match one permutation")
                    .with_subject(expected.clone())
                    .with_note(format!("also saw selection results for '{found}'"))
            }
            LinkError::NoSelectionData { permutation } => {
                Diagnostic::error(self.code(), "unable to calculate permutation signature")
                    .with_subject(permutation.clone())
                    .with_note("the permutation has no recorded selection results")
            }
            LinkError::Serialization { artifact, reason } => {
                Diagnostic::error(self.code(), "failed to render link output")
                    .with_subject(artifact.clone())
                    .with_note(format!("caused by: {reason}"))
            }
            LinkError::ManifestParse { reason } => {
                Diagnostic::error(self.code(), "failed to read cache manifest")
                    .with_note(format!("caused by: {reason}"))
            }
            LinkError::Io { path, source } => {
                Diagnostic::error(self.code(), "failed to write link output")
                    .with_subject(path.display().to_string())
                    .with_note(format!("caused by: {source}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permlink_diagnostics::Severity;

    #[test]
    fn identity_conflict_display() {
        let err = LinkError::IdentityConflict {
            expected: "AAA".to_string(),
            found: "BBB".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("identity conflict"));
        assert!(msg.contains("AAA"));
        assert!(msg.contains("BBB"));
        assert_eq!(format!("{}", err.code()), "E101");
    }

    #[test]
    fn no_selection_data_display() {
        let err = LinkError::NoSelectionData {
            permutation: "AAA".to_string(),
        };
        assert_eq!(err.to_string(), "no selection data for permutation 'AAA'");
        assert_eq!(format!("{}", err.code()), "E102");
    }

    #[test]
    fn serialization_display() {
        let err = LinkError::Serialization {
            artifact: "AAA.appcache".to_string(),
            reason: "path contains a line break".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("AAA.appcache"));
        assert!(msg.contains("line break"));
    }

    #[test]
    fn manifest_parse_display() {
        let err = LinkError::ManifestParse {
            reason: "missing header".to_string(),
        };
        assert!(err.to_string().contains("missing header"));
        assert_eq!(format!("{}", err.code()), "E105");
        assert!(err.to_diagnostic().subject.is_none());
    }

    #[test]
    fn io_display() {
        let err = LinkError::Io {
            path: PathBuf::from("/out/permutations.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("permutations.json"));
        assert_eq!(format!("{}", err.code()), "E104");
    }

    #[test]
    fn diagnostic_carries_cause() {
        let err = LinkError::Serialization {
            artifact: "permutations.json".to_string(),
            reason: "boom".to_string(),
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code, SERIALIZATION_FAILURE);
        assert_eq!(diag.subject.as_deref(), Some("permutations.json"));
        assert_eq!(diag.notes, vec!["caused by: boom"]);
    }

    #[test]
    fn note_codes_are_not_errors() {
        assert_eq!(format!("{DEV_MODE_PASSTHROUGH}"), "N201");
        assert_eq!(format!("{NOTHING_TO_RECORD}"), "N202");
        assert_eq!(format!("{DUPLICATE_PERMUTATION}"), "W301");
    }
}
