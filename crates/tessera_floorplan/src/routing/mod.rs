//! Routing engine for the floorplan pipeline.
//!
//! Connects the centers of placed blocks with orthogonal L-shaped paths.
//! Edges whose endpoints were never placed are skipped and reported.

mod manhattan;

use crate::codes;
use crate::data::{Block, RoutedEdge};
use std::collections::{HashMap, HashSet};
use tessera_config::FloorplanConfig;
use tessera_diagnostics::{Diagnostic, DiagnosticSink};
use tessera_model::Edge;

pub use manhattan::{is_orthogonal, l_path};

/// Routes every edge whose source and target are both placed, in edge order.
///
/// `bus_ids` holds the ids of interconnect blocks; edges touching one are
/// drawn with the bus stroke.
pub fn route(
    edges: &[Edge],
    blocks: &[Block],
    bus_ids: &HashSet<&str>,
    config: &FloorplanConfig,
    sink: &DiagnosticSink,
) -> Vec<RoutedEdge> {
    let placed: HashMap<&str, &Block> = blocks.iter().map(|b| (b.id.as_str(), b)).collect();

    let mut routed = Vec::with_capacity(edges.len());
    for edge in edges {
        let (Some(src), Some(dst)) = (
            placed.get(edge.source.as_str()),
            placed.get(edge.target.as_str()),
        ) else {
            tracing::warn!(edge = %edge.id, source = %edge.source, target = %edge.target, "skipping dangling edge");
            sink.emit(
                Diagnostic::note(
                    codes::DANGLING_EDGE,
                    format!(
                        "edge '{}' from '{}' to '{}' references a missing block and was not routed",
                        edge.id, edge.source, edge.target
                    ),
                ),
            );
            continue;
        };

        let touches_bus =
            bus_ids.contains(edge.source.as_str()) || bus_ids.contains(edge.target.as_str());
        let stroke = if touches_bus {
            &config.bus_stroke
        } else {
            &config.default_stroke
        };

        routed.push(RoutedEdge {
            id: edge.id.clone(),
            path: l_path(src.rect.center(), dst.rect.center()),
            thickness: stroke.thickness,
            color: stroke.color.clone(),
        });
    }

    tracing::debug!(
        edges = edges.len(),
        routed = routed.len(),
        "routing complete"
    );
    routed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BlockRegion;
    use tessera_common::{Point, Rect};
    use tessera_diagnostics::Severity;
    use tessera_model::LogicDomain;

    fn block(id: &str, rect: Rect) -> Block {
        Block {
            id: id.into(),
            label: id.into(),
            rect,
            region: BlockRegion::Core,
            domain: LogicDomain::Digital,
            power_density: 1.0,
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
    fn routes_between_centers() {
        let blocks = [
            block("a", Rect::new(0.0, 0.0, 20.0, 20.0)),
            block("b", Rect::new(100.0, 200.0, 40.0, 40.0)),
        ];
        let sink = DiagnosticSink::new();
        let routed = route(
            &[edge("e", "a", "b")],
            &blocks,
            &HashSet::new(),
            &FloorplanConfig::default(),
            &sink,
        );
        assert_eq!(routed.len(), 1);
        assert_eq!(routed[0].path[0], Point::new(10.0, 10.0));
        assert_eq!(routed[0].path[3], Point::new(120.0, 220.0));
        assert_eq!(routed[0].thickness, 2);
        assert_eq!(routed[0].color, "#64748b");
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn bus_edges_are_heavier() {
        let blocks = [
            block("bus", Rect::new(0.0, 0.0, 20.0, 20.0)),
            block("cpu", Rect::new(50.0, 0.0, 20.0, 20.0)),
        ];
        let bus: HashSet<&str> = ["bus"].into_iter().collect();
        let routed = route(
            &[edge("e_cpu", "cpu", "bus")],
            &blocks,
            &bus,
            &FloorplanConfig::default(),
            &DiagnosticSink::new(),
        );
        assert_eq!(routed[0].thickness, 4);
        assert_eq!(routed[0].color, "#3b82f6");
    }

    #[test]
    fn dangling_edges_are_skipped_and_noted() {
        let blocks = [block("a", Rect::new(0.0, 0.0, 10.0, 10.0))];
        let sink = DiagnosticSink::new();
        let routed = route(
            &[edge("e1", "a", "ghost"), edge("e2", "ghost", "a")],
            &blocks,
            &HashSet::new(),
            &FloorplanConfig::default(),
            &sink,
        );
        assert!(routed.is_empty());
        assert_eq!(sink.count_of(Severity::Note), 2);
        assert!(!sink.has_errors());
        assert_eq!(sink.diagnostics()[0].code, codes::DANGLING_EDGE);
    }
}
