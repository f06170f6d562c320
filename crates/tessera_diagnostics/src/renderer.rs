//! Diagnostic rendering backends for human-readable and machine-readable output.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;

    /// Renders a batch of diagnostics, one after another.
    fn render_all(&self, diags: &[Diagnostic]) -> String {
        diags.iter().map(|d| self.render(d)).collect()
    }
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// ```text
/// warning[F002]: Freq 3GHz exceeds 28nm limits (Max: 2.0GHz).
///    = help: lower the clock target or move to a smaller process node
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, diag: &Diagnostic) -> String {
        let header = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return header;
        }
        let ansi = match diag.severity {
            crate::Severity::Error => "31",
            crate::Severity::Warning => "33",
            crate::Severity::Note => "36",
        };
        format!("\x1b[1;{ansi}m{header}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.paint(diag), diag.message);
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

/// Renders each diagnostic as one JSON object per line.
pub struct JsonRenderer;

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut line = serde_json::to_string(diag).unwrap_or_else(|_| "{}".to_string());
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    fn sample() -> Diagnostic {
        Diagnostic::warning(
            DiagnosticCode::new(Category::Feasibility, 2),
            "Freq 3GHz exceeds 28nm limits (Max: 2.0GHz).",
        )
        .with_help("lower the clock target")
    }

    #[test]
    fn render_plain_warning() {
        let out = TerminalRenderer::new(false).render(&sample());
        assert!(out.starts_with("warning[F002]: Freq 3GHz"));
        assert!(out.contains("   = help: lower the clock target"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn render_colored_header() {
        let out = TerminalRenderer::new(true).render(&sample());
        assert!(out.contains("\x1b[1;33mwarning[F002]\x1b[0m"));
    }

    #[test]
    fn render_json_lines() {
        let out = JsonRenderer.render_all(&[sample(), sample()]);
        assert_eq!(out.lines().count(), 2);
        let parsed: Diagnostic = serde_json::from_str(out.lines().next().unwrap()).unwrap();
        assert_eq!(parsed, sample());
    }
}
