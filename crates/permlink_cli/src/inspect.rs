//! `permlink inspect`: print the resources a cache manifest lists.

use std::path::Path;

use permlink_diagnostics::DiagnosticSink;
use permlink_linker::manifest::summarize;
use permlink_linker::ManifestDescriptor;

use crate::pipeline::{exit_code, render_diagnostics};
use crate::GlobalArgs;

/// Runs the `permlink inspect` command.
pub fn run(manifest: &str, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let path = Path::new(manifest);
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    let sink = DiagnosticSink::new();
    match ManifestDescriptor::parse(&content) {
        Ok(descriptor) => print!("{}", describe(manifest, &descriptor)),
        Err(e) => sink.emit(e.to_diagnostic().with_subject(manifest)),
    }
    render_diagnostics(&sink, global);
    Ok(exit_code(&sink))
}

/// Formats a manifest's cache and network sections for display.
fn describe(name: &str, descriptor: &ManifestDescriptor) -> String {
    format!(
        "{name}: {} cached, network: {}\n{}",
        descriptor.cached_resources.len(),
        descriptor.network_resources.join(" "),
        summarize(descriptor)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportFormat;
    use std::fs;
    use tempfile::TempDir;

    fn global() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            format: ReportFormat::Text,
            config: None,
        }
    }

    #[test]
    fn describe_lists_resources() {
        let descriptor = ManifestDescriptor::parse(
            "CACHE MANIFEST\nCACHE:\napp/a.js\nindex.html\nNETWORK:\n*\n",
        )
        .unwrap();
        let text = describe("P1.appcache", &descriptor);
        assert!(text.starts_with("P1.appcache: 2 cached, network: *\n"));
        assert!(text.contains("  app/a.js\n"));
        assert!(text.contains("  index.html\n"));
    }

    #[test]
    fn inspect_valid_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("P1.appcache");
        fs::write(&path, "CACHE MANIFEST\nCACHE:\nindex.html\nNETWORK:\n*\n").unwrap();
        assert_eq!(run(path.to_str().unwrap(), &global()).unwrap(), 0);
    }

    #[test]
    fn inspect_malformed_manifest_exits_one() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("P1.appcache");
        fs::write(&path, "CACHE:\nindex.html\n").unwrap();
        assert_eq!(run(path.to_str().unwrap(), &global()).unwrap(), 1);
    }

    #[test]
    fn inspect_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.appcache");
        assert!(run(path.to_str().unwrap(), &global()).is_err());
    }
}
