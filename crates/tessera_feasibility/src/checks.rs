//! Bound checks that turn estimates into warnings.
//!
//! Every check is independent; one firing never suppresses another. Each
//! warning is returned as a string and emitted into the sink as a diagnostic
//! carrying the same message.

use crate::codes;
use crate::estimate::FeasibilityEstimates;
use tessera_config::FeasibilityConfig;
use tessera_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tessera_model::ChipSpecification;

/// Collects warnings in detection order.
struct Findings<'a> {
    sink: &'a DiagnosticSink,
    warnings: Vec<String>,
}

impl Findings<'_> {
    fn push(&mut self, code: DiagnosticCode, message: String, help: Option<String>) {
        let mut diag = Diagnostic::warning(code, message.clone());
        if let Some(help) = help {
            diag = diag.with_help(help);
        }
        self.sink.emit(diag);
        self.warnings.push(message);
    }
}

/// Runs every check and returns the warnings in detection order.
pub fn run_checks(
    spec: &ChipSpecification,
    config: &FeasibilityConfig,
    est: &FeasibilityEstimates,
    sink: &DiagnosticSink,
) -> Vec<String> {
    let mut findings = Findings {
        sink,
        warnings: Vec::new(),
    };
    let node = &est.node;

    if !node.known {
        let known: Vec<&str> = config.nodes.keys().map(String::as_str).collect();
        findings.push(
            codes::UNKNOWN_NODE,
            format!(
                "Unknown process node '{}', defaulting to {} physics.",
                spec.process_node, node.name
            ),
            Some(format!("known process nodes: {}", known.join(", "))),
        );
    }

    if spec.frequency > node.physics.max_freq_ghz {
        findings.push(
            codes::FREQUENCY_BOUND,
            format!(
                "Freq {}GHz exceeds {} limits (Max: {}GHz).",
                plain(spec.frequency),
                node.name,
                plain(node.physics.max_freq_ghz)
            ),
            None,
        );
    }

    if est.power_w > spec.power_budget {
        findings.push(
            codes::POWER_BUDGET,
            format!(
                "Est. Power ({:.1}W) exceeds budget ({}W).",
                est.power_w,
                plain(spec.power_budget)
            ),
            Some("lower the clock target, the cluster count or the supply voltage".into()),
        );
    }

    if est.bandwidth_gbps < est.required_bandwidth_gbps {
        findings.push(
            codes::MEMORY_BANDWIDTH,
            format!(
                "Memory Bottleneck: {:.1} GB/s is low for {:.1} TOPS (Suggest >{:.1} GB/s).",
                est.bandwidth_gbps, est.tops, est.required_bandwidth_gbps
            ),
            None,
        );
    }

    if spec.competition_mode {
        if spec.axi_width < config.competition_min_axi_width {
            findings.push(
                codes::COMPETITION_AXI_WIDTH,
                format!(
                    "[Competition] AXI Width {}-bit is bottleneck for NPU. Suggest {}+.",
                    spec.axi_width, config.competition_min_axi_width
                ),
                None,
            );
        }
        if spec.num_npu_clusters < config.competition_min_clusters {
            let what = if spec.num_npu_clusters == 1 {
                "Single cluster".to_string()
            } else {
                format!("{}-cluster", spec.num_npu_clusters)
            };
            findings.push(
                codes::COMPETITION_CLUSTERS,
                format!(
                    "[Competition] {what} NPU is low performance. Suggest {}+ for competition.",
                    config.competition_min_clusters
                ),
                None,
            );
        }
    }

    findings.warnings
}

/// Formats a number the way a spec author would write it: `2.0`, `2.5`, `0.8`.
fn plain(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::estimate;

    fn check(spec: &ChipSpecification) -> Vec<String> {
        let cfg = FeasibilityConfig::default();
        let est = estimate(spec, &cfg);
        run_checks(spec, &cfg, &est, &DiagnosticSink::new())
    }

    #[test]
    fn frequency_above_bound_warns() {
        let spec = ChipSpecification {
            process_node: "28nm".into(),
            frequency: 2.5,
            power_budget: 100.0,
            ..Default::default()
        };
        let warnings = check(&spec);
        assert_eq!(warnings, vec!["Freq 2.5GHz exceeds 28nm limits (Max: 2.0GHz)."]);
    }

    #[test]
    fn frequency_at_bound_is_silent() {
        let spec = ChipSpecification {
            process_node: "28nm".into(),
            frequency: 2.0,
            power_budget: 100.0,
            ..Default::default()
        };
        assert!(check(&spec).is_empty());
    }

    #[test]
    fn power_over_budget() {
        let spec = ChipSpecification {
            power_budget: 0.5,
            ..Default::default()
        };
        let warnings = check(&spec);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Est. Power ("));
        assert!(warnings[0].ends_with("exceeds budget (0.5W)."));
    }

    #[test]
    fn zero_budget_does_not_panic() {
        let spec = ChipSpecification {
            power_budget: 0.0,
            ..Default::default()
        };
        assert_eq!(check(&spec).len(), 1);
    }

    #[test]
    fn bandwidth_bottleneck_message() {
        let spec = ChipSpecification {
            process_node: "7nm".into(),
            frequency: 1.0,
            num_npu_clusters: 4,
            mac_units_per_cluster: 1000,
            ddr_width: 8,
            power_budget: 100.0,
            ..Default::default()
        };
        // tops = 8.0, bandwidth = 3.2 GB/s, required = 4.0 GB/s
        let warnings = check(&spec);
        assert_eq!(
            warnings,
            vec!["Memory Bottleneck: 3.2 GB/s is low for 8.0 TOPS (Suggest >4.0 GB/s)."]
        );
    }

    #[test]
    fn competition_axi_width() {
        let narrow = ChipSpecification {
            competition_mode: true,
            axi_width: 64,
            num_npu_clusters: 2,
            ..Default::default()
        };
        assert_eq!(
            check(&narrow),
            vec!["[Competition] AXI Width 64-bit is bottleneck for NPU. Suggest 128+."]
        );

        let wide = ChipSpecification {
            axi_width: 128,
            ..narrow.clone()
        };
        assert!(check(&wide).is_empty());
    }

    #[test]
    fn competition_cluster_count() {
        let single = ChipSpecification {
            competition_mode: true,
            ..Default::default()
        };
        assert_eq!(
            check(&single),
            vec!["[Competition] Single cluster NPU is low performance. Suggest 2+ for competition."]
        );
    }

    #[test]
    fn competition_checks_need_flag() {
        let spec = ChipSpecification {
            competition_mode: false,
            axi_width: 32,
            num_npu_clusters: 1,
            ..Default::default()
        };
        assert!(check(&spec).is_empty());
    }

    #[test]
    fn checks_are_independent_and_ordered() {
        let spec = ChipSpecification {
            process_node: "unobtainium".into(),
            frequency: 3.0,
            power_budget: 0.1,
            ddr_width: 1,
            competition_mode: true,
            axi_width: 32,
            num_npu_clusters: 1,
            ..Default::default()
        };
        let warnings = check(&spec);
        let prefixes: Vec<&str> = warnings
            .iter()
            .map(|w| w.split_whitespace().next().unwrap_or(""))
            .collect();
        assert_eq!(
            prefixes,
            ["Unknown", "Freq", "Est.", "Memory", "[Competition]", "[Competition]"]
        );
    }

    #[test]
    fn plain_number_formatting() {
        assert_eq!(plain(2.0), "2.0");
        assert_eq!(plain(2.5), "2.5");
        assert_eq!(plain(0.8), "0.8");
    }
}
