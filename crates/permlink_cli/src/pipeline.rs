//! Shared pipeline helpers for CLI commands.
//!
//! Project root resolution, JSON input loading, and diagnostic rendering
//! used by both link pass commands.

use std::path::{Path, PathBuf};

use permlink_config::{LinkerConfig, CONFIG_FILE};
use permlink_diagnostics::{
    DiagnosticRenderer, DiagnosticSink, JsonRenderer, Severity, TerminalRenderer,
};
use serde::de::DeserializeOwned;

use crate::{GlobalArgs, ReportFormat};

/// Walks up from `start` looking for the nearest directory containing `permlink.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file means its parent dir,
/// dir means itself). Otherwise walks up from the current directory.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Resolves the project root and loads its configuration.
pub fn load_project(
    global: &GlobalArgs,
) -> Result<(PathBuf, LinkerConfig), Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = permlink_config::load_config(&project_dir)?;
    Ok((project_dir, config))
}

/// Reads and deserializes a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("invalid JSON in {}: {e}", path.display()).into())
}

/// Renders all diagnostics from a sink to stderr in the requested format.
///
/// Notes are hidden under `--quiet`. Returns the number of error diagnostics.
pub fn render_diagnostics(sink: &DiagnosticSink, global: &GlobalArgs) -> usize {
    let renderer: Box<dyn DiagnosticRenderer> = match global.format {
        ReportFormat::Text => Box::new(TerminalRenderer::new(stderr_is_terminal())),
        ReportFormat::Json => Box::new(JsonRenderer),
    };
    for diag in sink.take_all() {
        if global.quiet && diag.severity == Severity::Note {
            continue;
        }
        eprint!("{}", renderer.render(&diag));
    }
    sink.error_count()
}

/// Returns the process exit code for a finished command.
pub fn exit_code(sink: &DiagnosticSink) -> i32 {
    if sink.has_errors() {
        1
    } else {
        0
    }
}

fn stderr_is_terminal() -> bool {
    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use permlink_diagnostics::{Category, Diagnostic, DiagnosticCode};
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = "[module]\nname = \"app\"\n";

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            format: ReportFormat::Text,
            config,
        }
    }

    #[test]
    fn find_project_root_in_current_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), CONFIG).unwrap();
        let root = find_project_root(tmp.path()).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn find_project_root_in_parent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), CONFIG).unwrap();
        let nested = tmp.path().join("war").join("app");
        fs::create_dir_all(&nested).unwrap();
        let root = find_project_root(&nested).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn find_project_root_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = find_project_root(tmp.path()).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn config_flag_accepts_file_or_dir() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join(CONFIG_FILE);
        fs::write(&file, CONFIG).unwrap();

        let from_file = resolve_project_root(&global(Some(file.display().to_string()))).unwrap();
        assert_eq!(from_file, tmp.path());

        let from_dir =
            resolve_project_root(&global(Some(tmp.path().display().to_string()))).unwrap();
        assert_eq!(from_dir, tmp.path());
    }

    #[test]
    fn load_project_reads_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), CONFIG).unwrap();
        let (dir, config) = load_project(&global(Some(tmp.path().display().to_string()))).unwrap();
        assert_eq!(dir, tmp.path());
        assert_eq!(config.module.name, "app");
    }

    #[test]
    fn read_json_reports_path_on_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let err = read_json::<Vec<String>>(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn render_counts_errors_and_drains_sink() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::error(
            DiagnosticCode::new(Category::Error, 101),
            "conflict",
        ));
        sink.emit(Diagnostic::note(
            DiagnosticCode::new(Category::Note, 202),
            "nothing to record",
        ));
        assert_eq!(render_diagnostics(&sink, &global(None)), 1);
        assert!(sink.diagnostics().is_empty());
        assert_eq!(exit_code(&sink), 1);
    }

    #[test]
    fn clean_sink_exits_zero() {
        assert_eq!(exit_code(&DiagnosticSink::new()), 0);
    }
}
