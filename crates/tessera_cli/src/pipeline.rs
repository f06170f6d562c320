//! Shared CLI pipeline helpers.
//!
//! Loads configuration and inputs, renders diagnostics and writes results
//! in the selected [`ReportFormat`].

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tessera_advisor::{Advisor, AdvisoryBackend, ProcessBackend};
use tessera_config::SynthesisConfig;
use tessera_diagnostics::{
    Diagnostic, DiagnosticRenderer, DiagnosticSink, JsonRenderer, Severity, TerminalRenderer,
};

use crate::{BackendArgs, GlobalArgs, ReportFormat};

/// Loads the synthesis configuration.
///
/// Uses `--config` when given, otherwise `tessera.toml` in the current
/// directory, otherwise the built-in defaults.
pub fn load_config(global: &GlobalArgs) -> Result<SynthesisConfig, Box<dyn std::error::Error>> {
    let config = match &global.config {
        Some(path) => tessera_config::load_config(path)?,
        None => tessera_config::load_project_config(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Renders all diagnostics in the sink to stderr.
///
/// In quiet mode only errors are shown. Returns the number of errors.
pub fn report(sink: &DiagnosticSink, global: &GlobalArgs) -> usize {
    let diagnostics: Vec<Diagnostic> = sink
        .take_all()
        .into_iter()
        .filter(|d| !global.quiet || d.severity == Severity::Error)
        .collect();
    if !diagnostics.is_empty() {
        let rendered = match global.format {
            ReportFormat::Text => TerminalRenderer::new(global.color).render_all(&diagnostics),
            ReportFormat::Json => JsonRenderer.render_all(&diagnostics),
        };
        eprint!("{rendered}");
    }
    sink.error_count()
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty JSON to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    std::fs::write(path, text).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    Ok(())
}

/// Builds the advisor selected by `--backend` and `--timeout`.
pub fn advisor(args: &BackendArgs) -> Advisor {
    let backend = args
        .backend
        .as_deref()
        .and_then(ProcessBackend::from_command_line)
        .map(|b| b.with_timeout(Duration::from_secs(args.timeout)));
    if let Some(b) = &backend {
        tracing::debug!(program = b.program(), timeout = args.timeout, "using process backend");
    }
    Advisor::new(
        backend.map(|b| Box::new(b) as Box<dyn AdvisoryBackend + Send + Sync>),
        Duration::from_secs(args.timeout),
    )
}

/// Prints the status line shown before a command's output.
pub fn status(global: &GlobalArgs, verb: &str, subject: impl std::fmt::Display) {
    if !global.quiet && global.format == ReportFormat::Text {
        eprintln!("{verb:>12} {subject}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_diagnostics::{Category, DiagnosticCode};

    fn global(quiet: bool) -> GlobalArgs {
        GlobalArgs {
            quiet,
            verbose: false,
            color: false,
            format: ReportFormat::Text,
            config: None,
        }
    }

    #[test]
    fn report_counts_errors() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::warning(DiagnosticCode::new(Category::Feasibility, 2), "w"));
        sink.emit(Diagnostic::error(DiagnosticCode::new(Category::Input, 1), "e"));
        assert_eq!(report(&sink, &global(true)), 1);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[floorplan]\npower_target_w = 20.0\n").unwrap();
        let g = GlobalArgs {
            config: Some(path),
            ..global(false)
        };
        assert_eq!(load_config(&g).unwrap().floorplan.power_target_w, 20.0);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let g = GlobalArgs {
            config: Some("/nonexistent/tessera.toml".into()),
            ..global(false)
        };
        assert!(load_config(&g).is_err());
    }

    #[test]
    fn blank_backend_means_offline() {
        let args = BackendArgs {
            backend: Some("   ".into()),
            timeout: 1,
        };
        assert!(!advisor(&args).has_backend());
    }

    #[test]
    fn json_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&path, &serde_json::json!({"a": 1})).unwrap();
        let back: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back["a"], 1);
    }
}
