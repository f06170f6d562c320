//! Diagnostic codes emitted at the advisory boundary.

use tessera_diagnostics::{Category, DiagnosticCode};

/// The advisory backend failed, timed out or answered garbage; the local fallback was used.
pub const BACKEND_FALLBACK: DiagnosticCode = DiagnosticCode::new(Category::Advisory, 1);
/// No advisory backend is configured; the local fallback was used.
pub const OFFLINE: DiagnosticCode = DiagnosticCode::new(Category::Advisory, 2);
