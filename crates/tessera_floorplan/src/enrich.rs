//! Block classification and weight assignment.
//!
//! Typed nodes map straight to a weight class. Nodes that arrive without a
//! kind fall back to case-insensitive label matching with first-match
//! priority GPU, NPU, CPU, interconnect, memory, IO.

use tessera_config::{BlockWeights, WeightTable};
use tessera_model::{ArchitectureGraph, LogicDomain, Node, NodeKind};

/// Coarse category of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockClass {
    /// Processing blocks (NPU, GPU, CPU, and anything unrecognized).
    Compute,
    /// Memory controllers and on-chip memory.
    Memory,
    /// System bus or network-on-chip.
    Interconnect,
    /// IO controllers and PHYs.
    Io,
}

/// A graph node with its class and weights attached.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedBlock {
    /// Node id.
    pub id: String,
    /// Node label.
    pub label: String,
    /// Node logic domain.
    pub domain: LogicDomain,
    /// Coarse category.
    pub class: BlockClass,
    /// Area, power and throughput weights.
    pub weights: BlockWeights,
    /// `true` for the system interconnect; routed edges touching it are drawn heavier.
    pub is_bus: bool,
}

impl EnrichedBlock {
    /// Returns `true` for blocks that go on the boundary ring.
    pub fn is_boundary(&self) -> bool {
        self.class == BlockClass::Io || self.domain == LogicDomain::Analog
    }
}

/// Enriches every node of the graph, preserving node order.
pub fn enrich(graph: &ArchitectureGraph, table: &WeightTable) -> Vec<EnrichedBlock> {
    graph.nodes.iter().map(|n| enrich_node(n, table)).collect()
}

fn enrich_node(node: &Node, table: &WeightTable) -> EnrichedBlock {
    let (class, weights) = match &node.kind {
        NodeKind::Gpu => (BlockClass::Compute, table.gpu),
        NodeKind::NpuCluster { .. } => (BlockClass::Compute, table.npu),
        NodeKind::NpuArray { clusters, .. } => (
            BlockClass::Compute,
            table.npu_array_per_cluster.scaled(*clusters),
        ),
        NodeKind::HostCpu => (BlockClass::Compute, table.cpu),
        NodeKind::Bus { .. } => (BlockClass::Interconnect, table.interconnect),
        NodeKind::MemoryController | NodeKind::Sram => (BlockClass::Memory, table.memory),
        NodeKind::MemoryPhy | NodeKind::Io { .. } => (BlockClass::Io, table.io),
        NodeKind::Unclassified => classify_label(&node.id, &node.label, table),
    };
    let is_bus = match &node.kind {
        NodeKind::Bus { .. } => true,
        NodeKind::Unclassified => node.id.contains("bus"),
        _ => false,
    };
    EnrichedBlock {
        id: node.id.clone(),
        label: node.label.clone(),
        domain: node.domain,
        class,
        weights,
        is_bus,
    }
}

/// Label matching for nodes without a kind.
fn classify_label(id: &str, label: &str, table: &WeightTable) -> (BlockClass, BlockWeights) {
    let label = label.to_lowercase();
    if label.contains("gpu") {
        (BlockClass::Compute, table.gpu)
    } else if label.contains("npu") {
        if label.contains("array") || label.contains("clusters") {
            let count = array_cluster_count(&label, table.array_fallback_clusters);
            (BlockClass::Compute, table.npu_array_per_cluster.scaled(count))
        } else {
            (BlockClass::Compute, table.npu)
        }
    } else if label.contains("cpu") {
        (BlockClass::Compute, table.cpu)
    } else if label.contains("bus") || label.contains("noc") {
        (BlockClass::Interconnect, table.interconnect)
    } else if label.contains("memory") || label.contains("sram") || label.contains("ddr") {
        (BlockClass::Memory, table.memory)
    } else if label.contains("phy") || id.contains("io") {
        (BlockClass::Io, table.io)
    } else {
        (BlockClass::Compute, table.generic)
    }
}

/// Reads the count in labels like `"NPU Array (16x Clusters)"`.
///
/// Returns 1 when there is no parenthesis and `fallback` when the token
/// between `(` and `x` is not a number.
fn array_cluster_count(label: &str, fallback: u32) -> u32 {
    let Some((_, after)) = label.split_once('(') else {
        return 1;
    };
    let token = after.split('x').next().unwrap_or("");
    token.trim().parse().unwrap_or(fallback)
}
