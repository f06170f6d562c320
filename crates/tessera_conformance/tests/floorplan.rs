//! Floorplan conformance: tolerance of malformed graphs, heatmap
//! accounting and routing geometry.

use tessera_common::Point;
use tessera_conformance::{edge, full_pipeline, node};
use tessera_floorplan::{layout, HEATMAP_SIZE};
use tessera_model::{ArchitectureGraph, ChipSpecification};

fn orthogonal(path: &[Point]) -> bool {
    path.windows(2).all(|w| w[0].x == w[1].x || w[0].y == w[1].y)
}

#[test]
fn dangling_edge_is_dropped() {
    let mut graph = ArchitectureGraph::new();
    graph.nodes.push(node("cpu", "Host CPU"));
    graph.nodes.push(node("bus", "System Bus"));
    graph.edges.push(edge("e_ok", "cpu", "bus"));
    graph.edges.push(edge("e_bad", "cpu", "ghost"));

    let result = layout(&graph);
    let ids: Vec<&str> = result.routed_edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["e_ok"]);
}

#[test]
fn heatmap_accounts_for_every_block() {
    let spec = ChipSpecification {
        num_npu_clusters: 4,
        standards: vec!["PCIe".into(), "USB".into(), "Ethernet".into(), "MIPI".into()],
        ..ChipSpecification::default()
    };
    let fp = full_pipeline(&spec).floorplan;

    assert_eq!(fp.power_density_grid.len(), HEATMAP_SIZE);
    for row in &fp.power_density_grid {
        assert_eq!(row.len(), HEATMAP_SIZE);
        assert!(row.iter().all(|&cell| cell >= 0.0));
    }

    let expected: f64 = fp
        .blocks
        .iter()
        .filter(|b| {
            let c = b.rect.center();
            c.x >= 0.0 && c.x < fp.chip_width && c.y >= 0.0 && c.y < fp.chip_height
        })
        .map(|b| b.power_density)
        .sum();
    let total: f64 = fp.power_density_grid.iter().flatten().sum();
    assert!((total - expected).abs() < 1e-9, "{total} != {expected}");
}

#[test]
fn two_nodes_one_route() {
    let mut graph = ArchitectureGraph::new();
    graph.nodes.push(node("a", "Host CPU"));
    graph.nodes.push(node("b", "DDR4 Controller"));
    graph.edges.push(edge("e_ab", "a", "b"));

    let result = layout(&graph);
    assert_eq!(result.routed_edges.len(), 1);
    let path = &result.routed_edges[0].path;
    assert_eq!(path.len(), 4);
    assert!(orthogonal(path));
    assert_eq!(path[1].y, path[0].y);
    assert_eq!(path[2].x, path[3].x);
}

#[test]
fn every_synthesized_edge_is_routed() {
    let spec = ChipSpecification {
        num_npu_clusters: 3,
        standards: vec!["PCIe".into()],
        ..ChipSpecification::default()
    };
    let result = full_pipeline(&spec);
    assert_eq!(result.floorplan.routed_edges.len(), result.graph.edges.len());
    assert!(result
        .floorplan
        .routed_edges
        .iter()
        .all(|e| orthogonal(&e.path)));
}

#[test]
fn blocks_are_placed_once() {
    let result = full_pipeline(&ChipSpecification::default());
    assert_eq!(result.floorplan.blocks.len(), result.graph.nodes.len());
    for n in &result.graph.nodes {
        assert!(result.floorplan.block(&n.id).is_some(), "{} not placed", n.id);
    }
}
