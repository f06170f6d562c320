//! Diagnostic codes emitted by feasibility analysis.

use tessera_diagnostics::{Category, DiagnosticCode};

/// The requested process node has no physics entry.
pub const UNKNOWN_NODE: DiagnosticCode = DiagnosticCode::new(Category::Feasibility, 1);
/// The clock target exceeds the node's bound.
pub const FREQUENCY_BOUND: DiagnosticCode = DiagnosticCode::new(Category::Feasibility, 2);
/// The power estimate exceeds the budget.
pub const POWER_BUDGET: DiagnosticCode = DiagnosticCode::new(Category::Feasibility, 3);
/// Memory bandwidth is below the roofline requirement.
pub const MEMORY_BANDWIDTH: DiagnosticCode = DiagnosticCode::new(Category::Feasibility, 4);
/// Competition mode: the system bus is too narrow.
pub const COMPETITION_AXI_WIDTH: DiagnosticCode = DiagnosticCode::new(Category::Feasibility, 101);
/// Competition mode: too few NPU clusters.
pub const COMPETITION_CLUSTERS: DiagnosticCode = DiagnosticCode::new(Category::Feasibility, 102);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(UNKNOWN_NODE.to_string(), "F001");
        assert_eq!(MEMORY_BANDWIDTH.to_string(), "F004");
        assert_eq!(COMPETITION_CLUSTERS.to_string(), "F102");
    }
}
