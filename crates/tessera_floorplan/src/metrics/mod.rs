//! Metric aggregation for a placed and routed floorplan.
//!
//! Everything here is a heuristic summary: throughput and power come from
//! the block weights, bandwidth from memory labels, and congestion and
//! utilization from plain block and wire counts.

mod heatmap;
mod power;

use crate::data::{Congestion, FloorplanMetrics};
use crate::enrich::{BlockClass, EnrichedBlock};
use tessera_config::FloorplanConfig;
use tessera_model::LogicDomain;

pub use heatmap::{heatmap_total, power_heatmap};
pub use power::power_breakdown;

/// Bottleneck label reported when memory bandwidth cannot feed the compute.
pub const MEMORY_BOTTLENECK: &str = "Global Memory Bottleneck";

/// Counts and dimensions of the finished layout that feed the metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutShape {
    /// Chip width in layout units.
    pub chip_width: f64,
    /// Chip height in layout units.
    pub chip_height: f64,
    /// Number of placed blocks.
    pub placed: usize,
    /// Number of routed edges.
    pub routed: usize,
}

/// Computes the summary metrics of a layout.
pub fn compute_metrics(
    enriched: &[EnrichedBlock],
    shape: LayoutShape,
    config: &FloorplanConfig,
) -> FloorplanMetrics {
    let estimated_tops: f64 = enriched.iter().map(|b| b.weights.tops).sum();
    let power_breakdown = power_breakdown(enriched, config);
    let total_power = power_breakdown.total();
    let efficiency_tops_per_watt = if total_power > 0.0 {
        estimated_tops / total_power
    } else {
        0.0
    };

    let memory_bandwidth_gbps = memory_bandwidth(enriched, config);
    let mut bottlenecks = Vec::new();
    if estimated_tops > 0.0
        && memory_bandwidth_gbps / estimated_tops < config.bottleneck_gbps_per_tops
    {
        bottlenecks.push(MEMORY_BOTTLENECK.to_string());
    }

    let metrics = FloorplanMetrics {
        estimated_tops,
        power_breakdown,
        memory_bandwidth_gbps,
        latency_ms: latency(estimated_tops, config),
        efficiency_tops_per_watt,
        bottlenecks,
        total_area_mm2: shape.chip_width * shape.chip_height / config.area_units_per_mm2,
        congestion: congestion(shape.placed, shape.routed, config.congestion_ratio),
        area_utilization_pct: utilization(shape.placed, config),
    };
    tracing::debug!(
        tops = metrics.estimated_tops,
        bandwidth = metrics.memory_bandwidth_gbps,
        congestion = %metrics.congestion,
        "metrics computed"
    );
    metrics
}

/// Batch-1 latency: a fixed base plus a compute term shrinking with throughput.
fn latency(tops: f64, config: &FloorplanConfig) -> f64 {
    let denom = tops + 1.0;
    if denom > 0.0 {
        config.latency_base_ms + config.latency_compute_ms / denom
    } else {
        config.latency_base_ms
    }
}

/// Sums the bandwidth of memory blocks using the first label token each carries.
fn memory_bandwidth(enriched: &[EnrichedBlock], config: &FloorplanConfig) -> f64 {
    enriched
        .iter()
        .filter(|b| b.class == BlockClass::Memory || b.domain == LogicDomain::Memory)
        .filter_map(|b| {
            let label = b.label.to_uppercase();
            config
                .memory_bandwidth
                .iter()
                .find(|m| label.contains(&m.token.to_uppercase()))
                .map(|m| m.gbps)
        })
        .sum()
}

fn congestion(placed: usize, routed: usize, ratio: f64) -> Congestion {
    if routed as f64 > placed as f64 * ratio {
        Congestion::Medium
    } else {
        Congestion::Low
    }
}

fn utilization(placed: usize, config: &FloorplanConfig) -> u32 {
    let capacity = config.utilization_capacity.max(1) as usize;
    let pct = placed.saturating_mul(100) / capacity;
    pct.min(config.utilization_cap_pct as usize) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_config::BlockWeights;

    fn block(label: &str, class: BlockClass, domain: LogicDomain, tops: f64) -> EnrichedBlock {
        EnrichedBlock {
            id: label.to_lowercase(),
            label: label.into(),
            domain,
            class,
            weights: BlockWeights::new(1.0, 1.0, tops),
            is_bus: false,
        }
    }

    fn shape(placed: usize, routed: usize) -> LayoutShape {
        LayoutShape {
            chip_width: 1000.0,
            chip_height: 500.0,
            placed,
            routed,
        }
    }

    #[test]
    fn latency_formula() {
        let cfg = FloorplanConfig::default();
        assert!((latency(0.0, &cfg) - 10.5).abs() < 1e-9);
        assert!((latency(99.0, &cfg) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn bandwidth_first_token_wins() {
        let cfg = FloorplanConfig::default();
        let blocks = [
            // "LPDDR5" matches before "DDR5".
            block("LPDDR5 Controller", BlockClass::Memory, LogicDomain::Memory, 0.0),
            block("hbm3 stack", BlockClass::Memory, LogicDomain::Digital, 0.0),
            // Memory domain without memory class still counts.
            block("DDR4 PHY", BlockClass::Io, LogicDomain::Memory, 0.0),
            // Neither memory class nor domain.
            block("DDR5 Bridge", BlockClass::Compute, LogicDomain::Digital, 0.0),
        ];
        let bw = memory_bandwidth(&blocks, &cfg);
        assert!((bw - (51.2 + 819.0 + 25.6)).abs() < 1e-9);
    }

    #[test]
    fn bottleneck_detection() {
        let cfg = FloorplanConfig::default();
        let starved = [
            block("NPU", BlockClass::Compute, LogicDomain::Digital, 100.0),
            block("DDR4 Controller", BlockClass::Memory, LogicDomain::Memory, 0.0),
        ];
        let m = compute_metrics(&starved, shape(2, 1), &cfg);
        assert_eq!(m.bottlenecks, [MEMORY_BOTTLENECK]);

        let fed = [
            block("NPU", BlockClass::Compute, LogicDomain::Digital, 100.0),
            block("HBM3 Controller", BlockClass::Memory, LogicDomain::Memory, 0.0),
        ];
        assert!(compute_metrics(&fed, shape(2, 1), &cfg).bottlenecks.is_empty());

        let idle = [block("CPU", BlockClass::Compute, LogicDomain::Digital, 0.0)];
        assert!(compute_metrics(&idle, shape(1, 0), &cfg).bottlenecks.is_empty());
    }

    #[test]
    fn congestion_and_utilization() {
        let cfg = FloorplanConfig::default();
        assert_eq!(congestion(10, 12, 1.2), Congestion::Low);
        assert_eq!(congestion(10, 13, 1.2), Congestion::Medium);
        assert_eq!(utilization(7, &cfg), 46);
        assert_eq!(utilization(15, &cfg), 95);
        assert_eq!(utilization(0, &cfg), 0);
    }

    #[test]
    fn area_and_efficiency() {
        let cfg = FloorplanConfig::default();
        let blocks = [block("NPU", BlockClass::Compute, LogicDomain::Digital, 30.0)];
        let m = compute_metrics(&blocks, shape(1, 0), &cfg);
        assert_eq!(m.total_area_mm2, 50.0);
        assert!((m.efficiency_tops_per_watt - 2.0).abs() < 1e-9);
        assert_eq!(m.estimated_tops, 30.0);
    }

    #[test]
    fn empty_design() {
        let m = compute_metrics(&[], shape(0, 0), &FloorplanConfig::default());
        assert_eq!(m.efficiency_tops_per_watt, 0.0);
        assert_eq!(m.memory_bandwidth_gbps, 0.0);
        assert_eq!(m.congestion, Congestion::Low);
    }
}
