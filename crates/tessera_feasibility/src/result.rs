//! The report returned by feasibility analysis.

use serde::{Deserialize, Serialize};

/// Warnings and headline estimates for one specification.
///
/// Warnings appear in detection order. The estimates are preformatted for
/// display; [`crate::estimate`] returns the numbers behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Human-readable warnings, in detection order.
    pub warnings: Vec<String>,
    /// Die area estimate, e.g. `"22.5 mm²"`.
    pub area_estimate: String,
    /// Power estimate, e.g. `"1.30 W"`.
    pub power_estimate: String,
    /// Highest clock the process node supports, e.g. `"2.0 GHz"`.
    pub max_freq_estimate: String,
}

impl AnalysisResult {
    /// Returns `true` when no bound was violated.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
