//! Graph construction rules.

use crate::ids::{edge_id, slug, IdAllocator};
use tessera_common::Point;
use tessera_config::TopologyConfig;
use tessera_model::{
    ArchitectureGraph, BusStyle, ChipSpecification, Edge, LogicDomain, Node, NodeKind,
};

const BUS_ID: &str = "bus";

/// Synthesizes the architecture graph with the built-in layout constants.
pub fn synthesize(spec: &ChipSpecification) -> ArchitectureGraph {
    synthesize_with(spec, &TopologyConfig::default())
}

/// Synthesizes the architecture graph with explicit layout constants.
pub fn synthesize_with(spec: &ChipSpecification, config: &TopologyConfig) -> ArchitectureGraph {
    let mut builder = GraphBuilder::new(config);
    let center = builder.center;

    let style = select_bus_style(spec, config);
    builder.add_node(
        BUS_ID.to_string(),
        NodeKind::Bus { style },
        bus_label(style).to_string(),
        LogicDomain::Digital,
        center,
    );

    add_compute(&mut builder, spec);
    add_host(&mut builder);
    add_memory(&mut builder, spec);
    add_io(&mut builder, spec);

    let graph = builder.finish();
    tracing::debug!(
        ?style,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "synthesized topology"
    );
    graph
}

/// Returns the display label of an interconnect style.
pub fn bus_label(style: BusStyle) -> &'static str {
    match style {
        BusStyle::Mesh => "NoC (Mesh)",
        BusStyle::Lightweight => "AHB-Lite Bus",
        BusStyle::Crossbar => "AXI4 Interconnect",
    }
}

/// Mesh wins over lightweight when both conditions hold.
fn select_bus_style(spec: &ChipSpecification, config: &TopologyConfig) -> BusStyle {
    if spec.num_npu_clusters > config.mesh_cluster_threshold {
        BusStyle::Mesh
    } else if spec.frequency < config.lightweight_bus_max_ghz {
        BusStyle::Lightweight
    } else {
        BusStyle::Crossbar
    }
}

fn add_compute(builder: &mut GraphBuilder<'_>, spec: &ChipSpecification) {
    let cfg = builder.config;
    let count = spec.num_npu_clusters;
    let y = builder.center.y - cfg.compute_row_offset;

    if count <= cfg.array_collapse_threshold {
        let xs = centered_row(builder.center.x, count as usize, cfg.cluster_spacing);
        for (index, x) in (0..count).zip(xs) {
            let id = builder.add_node(
                format!("npu_{index}"),
                NodeKind::NpuCluster { index },
                format!("NPU Cluster {index}"),
                LogicDomain::Digital,
                Point::new(x, y),
            );
            builder.link_to_bus(id, cfg.cluster_link_bandwidth);
        }
    } else {
        let cols = cfg.array_columns.max(1);
        let rows = count.div_ceil(cols);
        let id = builder.add_node(
            "npu_array".to_string(),
            NodeKind::NpuArray {
                clusters: count,
                rows,
                cols,
            },
            format!("Systolic Array ({rows}x{cols})"),
            LogicDomain::Digital,
            Point::new(builder.center.x, y),
        );
        builder.link_to_bus(id, cfg.array_link_bandwidth);
    }
}

fn add_host(builder: &mut GraphBuilder<'_>) {
    let cfg = builder.config;
    let id = builder.add_node(
        "cpu".to_string(),
        NodeKind::HostCpu,
        "RISC-V Host".to_string(),
        LogicDomain::Digital,
        Point::new(
            builder.center.x - cfg.host_offset_x,
            builder.center.y - cfg.host_offset_y,
        ),
    );
    builder.link_to_bus(id, cfg.default_link_bandwidth);
}

fn add_memory(builder: &mut GraphBuilder<'_>, spec: &ChipSpecification) {
    if spec.memory_type.is_on_chip() {
        return;
    }
    let cfg = builder.config;
    let name = spec.memory_type.as_str();
    let center = builder.center;

    let ctrl = builder.add_node(
        "ddr_ctrl".to_string(),
        NodeKind::MemoryController,
        format!("{name} Controller"),
        LogicDomain::Memory,
        Point::new(center.x + cfg.memory_ctrl_offset_x, center.y),
    );
    builder.add_edge(
        "e_mem".to_string(),
        BUS_ID.to_string(),
        ctrl.clone(),
        cfg.memory_link_bandwidth,
    );

    let phy = builder.add_node(
        "ddr_phy".to_string(),
        NodeKind::MemoryPhy,
        format!("{name} PHY"),
        LogicDomain::Analog,
        Point::new(
            center.x + cfg.memory_phy_offset_x,
            center.y + cfg.memory_phy_offset_y,
        ),
    );
    builder.add_edge("e_phy".to_string(), ctrl, phy, cfg.default_link_bandwidth);
}

fn add_io(builder: &mut GraphBuilder<'_>, spec: &ChipSpecification) {
    let cfg = builder.config;
    let y = builder.center.y + cfg.io_row_offset;
    let xs = centered_row(builder.center.x, spec.standards.len(), cfg.io_spacing);

    for (index, (standard, x)) in spec.standards.iter().zip(xs).enumerate() {
        let upper = standard.to_ascii_uppercase();
        let domain = if upper.contains("PHY") || upper.contains("USB") {
            LogicDomain::Analog
        } else {
            LogicDomain::Digital
        };
        let id = builder.ids.claim(format!("io_{}", slug(standard)), index);
        builder.push_node(Node {
            id: id.clone(),
            kind: NodeKind::Io {
                standard: standard.clone(),
            },
            label: format!("{standard} Controller"),
            domain,
            position: Point::new(x, y),
        });
        builder.add_edge(
            edge_id(&id),
            BUS_ID.to_string(),
            id,
            cfg.default_link_bandwidth,
        );
    }
}

/// X coordinates of `count` items spaced evenly and centered on `center_x`.
fn centered_row(center_x: f64, count: usize, spacing: f64) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let start = center_x - (count - 1) as f64 * spacing / 2.0;
    (0..count).map(|i| start + i as f64 * spacing).collect()
}

/// Accumulates nodes and edges with unique ids.
struct GraphBuilder<'a> {
    config: &'a TopologyConfig,
    center: Point,
    ids: IdAllocator,
    graph: ArchitectureGraph,
}

impl<'a> GraphBuilder<'a> {
    fn new(config: &'a TopologyConfig) -> Self {
        Self {
            config,
            center: Point::new(config.canvas_width / 2.0, config.canvas_height / 2.0),
            ids: IdAllocator::new(),
            graph: ArchitectureGraph::new(),
        }
    }

    fn add_node(
        &mut self,
        base_id: String,
        kind: NodeKind,
        label: String,
        domain: LogicDomain,
        position: Point,
    ) -> String {
        let index = self.graph.nodes.len();
        let id = self.ids.claim(base_id, index);
        self.push_node(Node {
            id: id.clone(),
            kind,
            label,
            domain,
            position,
        });
        id
    }

    fn push_node(&mut self, node: Node) {
        self.graph.nodes.push(node);
    }

    fn add_edge(&mut self, id: String, source: String, target: String, bandwidth_weight: u32) {
        self.graph.edges.push(Edge {
            id,
            source,
            target,
            bandwidth_weight,
        });
    }

    /// Wires a node to the interconnect, with the node as the source.
    fn link_to_bus(&mut self, node_id: String, bandwidth_weight: u32) {
        self.add_edge(
            edge_id(&node_id),
            node_id,
            BUS_ID.to_string(),
            bandwidth_weight,
        );
    }

    fn finish(self) -> ArchitectureGraph {
        self.graph
    }
}
