//! Physics-based feasibility analysis of a chip specification.
//!
//! Looks up the bounds of the requested process node, estimates throughput,
//! memory bandwidth, power and die area, and reports every bound the
//! specification violates. Analysis is total: unknown process nodes and
//! memory types fall back to configured defaults, and degenerate numbers
//! produce zero ratios instead of failures.
//!
//! # Usage
//!
//! ```ignore
//! use tessera_feasibility::analyze;
//!
//! let result = analyze(&spec);
//! for warning in &result.warnings {
//!     println!("{warning}");
//! }
//! ```

#![warn(missing_docs)]

pub mod checks;
pub mod codes;
pub mod estimate;
pub mod result;

pub use estimate::{estimate, resolve_node, FeasibilityEstimates, ResolvedNode};
pub use result::AnalysisResult;

use tessera_config::FeasibilityConfig;
use tessera_diagnostics::DiagnosticSink;
use tessera_model::ChipSpecification;

/// Analyzes a specification with the built-in constants.
///
/// Diagnostics are discarded; the warnings are still returned as strings.
pub fn analyze(spec: &ChipSpecification) -> AnalysisResult {
    let sink = DiagnosticSink::new();
    analyze_with(spec, &FeasibilityConfig::default(), &sink)
}

/// Analyzes a specification with explicit constants, emitting each warning
/// into `sink` as a diagnostic as well.
pub fn analyze_with(
    spec: &ChipSpecification,
    config: &FeasibilityConfig,
    sink: &DiagnosticSink,
) -> AnalysisResult {
    let estimates = estimate(spec, config);
    let warnings = checks::run_checks(spec, config, &estimates, sink);

    tracing::debug!(
        node = %estimates.node.name,
        tops = estimates.tops,
        bandwidth_gbps = estimates.bandwidth_gbps,
        power_w = estimates.power_w,
        warnings = warnings.len(),
        "feasibility analysis complete"
    );

    AnalysisResult {
        warnings,
        area_estimate: format!("{:.1} mm²", estimates.area_mm2),
        power_estimate: format!("{:.2} W", estimates.power_w),
        max_freq_estimate: format!("{:.1} GHz", estimates.node.physics.max_freq_ghz),
    }
}
