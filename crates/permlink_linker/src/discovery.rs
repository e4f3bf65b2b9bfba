//! Artifact discovery: which emitted files belong in an offline cache.

use std::collections::BTreeSet;

use permlink_common::EmittedArtifact;

/// Compiler bookkeeping file that is never served to clients.
const COMPILATION_MAPPINGS: &str = "compilation-mappings.txt";

/// Suffix of scripts that only exist for development-mode builds.
const DEVMODE_SCRIPT_SUFFIX: &str = ".devmode.js";

/// Source of the cacheable artifact paths for the current build context.
pub trait ArtifactDiscovery {
    /// Returns the module-qualified paths of every cacheable artifact.
    fn discover(&self) -> BTreeSet<String>;
}

/// Discovers the public artifacts emitted for one module.
///
/// Paths are qualified as `<module>/<partial path>`. Non-public artifacts,
/// the compilation mappings file and development-mode scripts are skipped.
pub struct ModuleArtifacts<'a> {
    /// The module name used to qualify paths.
    pub module_name: &'a str,
    /// Every artifact the build has emitted so far.
    pub artifacts: &'a [EmittedArtifact],
}

impl<'a> ModuleArtifacts<'a> {
    /// Creates a discovery view over a module's emitted artifacts.
    pub fn new(module_name: &'a str, artifacts: &'a [EmittedArtifact]) -> Self {
        Self {
            module_name,
            artifacts,
        }
    }
}

impl ArtifactDiscovery for ModuleArtifacts<'_> {
    fn discover(&self) -> BTreeSet<String> {
        self.artifacts
            .iter()
            .filter(|a| a.is_public() && should_add_to_manifest(&a.partial_path))
            .map(|a| format!("{}/{}", self.module_name, a.partial_path))
            .collect()
    }
}

impl ArtifactDiscovery for BTreeSet<String> {
    fn discover(&self) -> BTreeSet<String> {
        self.clone()
    }
}

fn should_add_to_manifest(partial_path: &str) -> bool {
    partial_path != COMPILATION_MAPPINGS && !partial_path.ends_with(DEVMODE_SCRIPT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use permlink_common::Visibility;

    #[test]
    fn qualifies_public_artifacts() {
        let artifacts = vec![
            EmittedArtifact::public("app.nocache.js"),
            EmittedArtifact::public("ABC.cache.js"),
        ];
        let found = ModuleArtifacts::new("app", &artifacts).discover();
        let expected: BTreeSet<String> = ["app/ABC.cache.js", "app/app.nocache.js"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn skips_denylisted_and_private() {
        let artifacts = vec![
            EmittedArtifact::public("compilation-mappings.txt"),
            EmittedArtifact::public("app.devmode.js"),
            EmittedArtifact::with_visibility("symbolMaps/ABC.symbolMap", Visibility::Private),
            EmittedArtifact::with_visibility("WEB-INF/deploy/app/rpc.txt", Visibility::Deploy),
            EmittedArtifact::public("nested/compilation-mappings.txt"),
        ];
        let found = ModuleArtifacts::new("app", &artifacts).discover();
        assert_eq!(found.len(), 1);
        assert!(found.contains("app/nested/compilation-mappings.txt"));
    }

    #[test]
    fn empty_artifacts_discover_nothing() {
        assert!(ModuleArtifacts::new("app", &[]).discover().is_empty());
    }
}
