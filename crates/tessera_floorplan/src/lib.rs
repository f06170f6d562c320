//! Floorplan engine for the Tessera chip-synthesis pipeline.
//!
//! This crate turns an [`ArchitectureGraph`] (from `tessera_topology` or a
//! hand-written graph file) into a concrete 2D [`FloorplanResult`]: placed
//! blocks, routed interconnect, a power-density heatmap and summary metrics.
//! It never looks at the original chip specification.
//!
//! # Pipeline
//!
//! 1. **Enrich**: classify each node and attach area/power/TOPS weights
//! 2. **Place**: largest-first row packing for the core, perimeter ring for IO
//! 3. **Route**: orthogonal L-shaped paths between block centers
//! 4. **Metrics**: heatmap, power breakdown, bandwidth, bottlenecks
//!
//! # Usage
//!
//! ```ignore
//! use tessera_floorplan::layout;
//!
//! let graph = tessera_topology::synthesize(&spec);
//! let result = layout(&graph);
//! println!("{} TOPS on {:.1} mm²", result.metrics.estimated_tops, result.metrics.total_area_mm2);
//! ```

#![warn(missing_docs)]

pub mod codes;
pub mod data;
pub mod enrich;
pub mod metrics;
pub mod placement;
pub mod routing;

pub use data::{
    Block, BlockRegion, Congestion, FloorplanMetrics, FloorplanResult, Heatmap, PowerBreakdown,
    Region, RoutedEdge, HEATMAP_SIZE,
};
pub use enrich::{enrich, BlockClass, EnrichedBlock};
pub use metrics::{compute_metrics, LayoutShape, MEMORY_BOTTLENECK};
pub use placement::{place, Placement};
pub use routing::route;

use std::collections::HashSet;
use tessera_config::FloorplanConfig;
use tessera_diagnostics::DiagnosticSink;
use tessera_model::ArchitectureGraph;

/// Lays out a graph with the default configuration, discarding diagnostics.
pub fn layout(graph: &ArchitectureGraph) -> FloorplanResult {
    layout_with(graph, &FloorplanConfig::default(), &DiagnosticSink::new())
}

/// Lays out a graph with an explicit configuration.
///
/// Total over any graph: dangling edges are skipped and reported into
/// `sink` as notes, and an empty graph yields a chip around the fallback
/// core.
pub fn layout_with(
    graph: &ArchitectureGraph,
    config: &FloorplanConfig,
    sink: &DiagnosticSink,
) -> FloorplanResult {
    let enriched = enrich(graph, &config.weights);
    let placement = place(&enriched, config, sink);

    let bus_ids: HashSet<&str> = enriched
        .iter()
        .filter(|b| b.is_bus)
        .map(|b| b.id.as_str())
        .collect();
    let routed_edges = route(&graph.edges, &placement.blocks, &bus_ids, config, sink);

    let power_density_grid = metrics::power_heatmap(
        &placement.blocks,
        placement.chip_width,
        placement.chip_height,
    );
    let metrics = compute_metrics(
        &enriched,
        LayoutShape {
            chip_width: placement.chip_width,
            chip_height: placement.chip_height,
            placed: placement.blocks.len(),
            routed: routed_edges.len(),
        },
        config,
    );

    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        routed = routed_edges.len(),
        "floorplan complete"
    );

    FloorplanResult {
        chip_width: placement.chip_width,
        chip_height: placement.chip_height,
        regions: vec![placement.core_region],
        blocks: placement.blocks,
        routed_edges,
        power_density_grid,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_common::Point;
    use tessera_model::{Edge, LogicDomain, Node, NodeKind};

    fn node(id: &str, kind: NodeKind, label: &str) -> Node {
        Node {
            id: id.into(),
            kind,
            label: label.into(),
            domain: LogicDomain::Digital,
            position: Point::default(),
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> Edge {
        Edge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            bandwidth_weight: 1,
        }
    }

    #[test]
    fn two_nodes_one_orthogonal_route() {
        let mut graph = ArchitectureGraph::new();
        graph.nodes.push(node("a", NodeKind::HostCpu, "CPU"));
        graph.nodes.push(node("b", NodeKind::Gpu, "GPU"));
        graph.edges.push(edge("e", "a", "b"));

        let result = layout(&graph);
        assert_eq!(result.blocks.len(), 2);
        assert_eq!(result.routed_edges.len(), 1);
        let path = &result.routed_edges[0].path;
        assert_eq!(path.len(), 4);
        assert!(routing::is_orthogonal(path));
        let a = result.block("a").map(|b| b.rect.center());
        let b = result.block("b").map(|b| b.rect.center());
        assert_eq!(Some(path[0]), a);
        assert_eq!(Some(path[3]), b);
    }

    #[test]
    fn dangling_edge_is_tolerated() {
        let mut graph = ArchitectureGraph::new();
        graph.nodes.push(node("cpu", NodeKind::HostCpu, "CPU"));
        graph.edges.push(edge("e_x", "cpu", "missing"));

        let sink = DiagnosticSink::new();
        let result = layout_with(&graph, &FloorplanConfig::default(), &sink);
        assert!(result.routed_edges.is_empty());
        assert_eq!(sink.diagnostics().len(), 1);
        assert_eq!(sink.diagnostics()[0].code, codes::DANGLING_EDGE);
    }

    #[test]
    fn heatmap_sums_power_of_placed_blocks() {
        let mut graph = ArchitectureGraph::new();
        graph.nodes.push(node("cpu", NodeKind::HostCpu, "CPU"));
        graph.nodes.push(node("npu_0", NodeKind::NpuCluster { index: 0 }, "NPU Cluster 0"));
        graph.nodes.push(node(
            "io_pcie",
            NodeKind::Io {
                standard: "PCIe".into(),
            },
            "PCIe Controller",
        ));

        let result = layout(&graph);
        let expected: f64 = result.blocks.iter().map(|b| b.power_density).sum();
        assert_eq!(expected, 5.0 + 8.0 + 2.0);
        assert!((metrics::heatmap_total(&result.power_density_grid) - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_graph() {
        let result = layout(&ArchitectureGraph::new());
        assert!(result.blocks.is_empty());
        assert_eq!(result.regions.len(), 1);
        assert_eq!((result.chip_width, result.chip_height), (560.0, 560.0));
        assert_eq!(result.metrics.estimated_tops, 0.0);
    }

    #[test]
    fn result_serializes_to_json() {
        let mut graph = ArchitectureGraph::new();
        graph.nodes.push(node("cpu", NodeKind::HostCpu, "CPU"));
        let json = serde_json::to_value(layout(&graph)).unwrap();
        assert_eq!(json["blocks"][0]["id"], "cpu");
        assert_eq!(json["power_density_grid"].as_array().map(Vec::len), Some(HEATMAP_SIZE));
        assert_eq!(json["metrics"]["congestion"], "Low");
    }
}
