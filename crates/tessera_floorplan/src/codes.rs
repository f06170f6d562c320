//! Diagnostic codes emitted by the floorplan engine.

use tessera_diagnostics::{Category, DiagnosticCode};

/// Two boundary blocks overlap because the ring is crowded.
pub const BOUNDARY_OVERLAP: DiagnosticCode = DiagnosticCode::new(Category::Floorplan, 101);
/// An edge references a node that was never placed and was not routed.
pub const DANGLING_EDGE: DiagnosticCode = DiagnosticCode::new(Category::Floorplan, 201);
