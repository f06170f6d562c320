//! Numeric throughput, bandwidth, power and area estimates.

use serde::{Deserialize, Serialize};
use tessera_config::{FeasibilityConfig, NodePhysics};
use tessera_model::ChipSpecification;

/// Physics used when even the configured default node is missing.
const FALLBACK_PHYSICS: NodePhysics = NodePhysics {
    max_freq_ghz: 2.0,
    power_factor: 2.5,
};

/// The process node an analysis actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedNode {
    /// Table name of the node, or the default node after a fallback.
    pub name: String,
    /// Physics bounds of the node.
    pub physics: NodePhysics,
    /// `false` when the requested node was unknown and the default was substituted.
    pub known: bool,
}

/// Looks up the requested process node, substituting the default node on a miss.
pub fn resolve_node(spec: &ChipSpecification, config: &FeasibilityConfig) -> ResolvedNode {
    if let Some((name, physics)) = config.node(&spec.process_node) {
        return ResolvedNode {
            name: name.to_string(),
            physics: *physics,
            known: true,
        };
    }
    let (name, physics) = config
        .node(&config.default_node)
        .map(|(n, p)| (n.to_string(), *p))
        .unwrap_or_else(|| (config.default_node.clone(), FALLBACK_PHYSICS));
    tracing::warn!(
        requested = %spec.process_node,
        fallback = %name,
        "unknown process node"
    );
    ResolvedNode {
        name,
        physics,
        known: false,
    }
}

/// The numbers behind an [`crate::AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityEstimates {
    /// Process node the estimates were computed for.
    pub node: ResolvedNode,
    /// Peak throughput in TOPS.
    pub tops: f64,
    /// External memory bandwidth in GB/s.
    pub bandwidth_gbps: f64,
    /// Bandwidth the roofline heuristic asks for, in GB/s.
    pub required_bandwidth_gbps: f64,
    /// Estimated power in watts.
    pub power_w: f64,
    /// Throughput per watt; zero when power is not positive.
    pub efficiency_tops_per_w: f64,
    /// Estimated die area in mm².
    pub area_mm2: f64,
}

/// Computes all estimates for a specification.
pub fn estimate(spec: &ChipSpecification, config: &FeasibilityConfig) -> FeasibilityEstimates {
    let node = resolve_node(spec, config);
    let clusters = f64::from(spec.num_npu_clusters);

    // Two operations per multiply-accumulate.
    let ops_per_cycle = f64::from(spec.mac_units_per_cluster) * clusters * 2.0;
    let tops = spec.frequency * ops_per_cycle / 1000.0;

    let rate = config.memory_rate(spec.memory_type.as_str());
    let width = if spec.memory_type.is_stacked() {
        config.stacked_memory_width
    } else {
        spec.ddr_width
    };
    let bandwidth_gbps = rate * f64::from(width) * f64::from(spec.memory_channels) / 8.0;

    let mut dynamic = config.dynamic_power_coeff
        * spec.frequency
        * node.physics.power_factor
        * (clusters * config.cluster_activity);
    if let Some(v) = spec.voltage_target.filter(|v| *v > 0.0) {
        if config.nominal_voltage > 0.0 {
            dynamic *= (v / config.nominal_voltage).powi(2);
        }
    }
    let power_w = config.base_power_w + dynamic;

    let efficiency_tops_per_w = if power_w > 0.0 { tops / power_w } else { 0.0 };
    let area_mm2 =
        config.area_base_mm2 + clusters * config.area_per_cluster_mm2 * node.physics.power_factor;

    FeasibilityEstimates {
        node,
        tops,
        bandwidth_gbps,
        required_bandwidth_gbps: tops * config.bandwidth_per_tops,
        power_w,
        efficiency_tops_per_w,
        area_mm2,
    }
}
