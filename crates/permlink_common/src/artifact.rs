//! Emitted build artifacts as reported by the host toolchain.

use serde::{Deserialize, Serialize};

/// Visibility of an emitted artifact.
///
/// Only public artifacts are served to clients and can appear in a cache
/// manifest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Served to clients from the module's output directory.
    #[default]
    Public,
    /// Kept out of the deployable output (compiler bookkeeping).
    Private,
    /// Deployed to the server but never served to clients.
    Deploy,
}

/// A file the build emitted, identified by its path relative to the module
/// output directory.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct EmittedArtifact {
    /// Path relative to the module output directory.
    pub partial_path: String,
    /// Who can see the artifact.
    #[serde(default)]
    pub visibility: Visibility,
}

impl EmittedArtifact {
    /// Creates a public artifact.
    pub fn public(partial_path: impl Into<String>) -> Self {
        Self {
            partial_path: partial_path.into(),
            visibility: Visibility::Public,
        }
    }

    /// Creates an artifact with the given visibility.
    pub fn with_visibility(partial_path: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            partial_path: partial_path.into(),
            visibility,
        }
    }

    /// Returns `true` if clients can fetch this artifact.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}
