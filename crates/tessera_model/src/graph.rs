//! The architecture graph: typed blocks connected by weighted links.
//!
//! Produced by topology synthesis and consumed by the floorplan engine. Each
//! [`Node`] carries a [`NodeKind`] assigned when the graph is synthesized, so
//! downstream stages dispatch on the kind rather than on label text. Graphs
//! read from outside may leave the kind out; such nodes deserialize as
//! [`NodeKind::Unclassified`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tessera_common::Point;

/// Flavour of the system interconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusStyle {
    /// Network-on-chip mesh for large cluster counts.
    Mesh,
    /// Lightweight shared bus for low clock targets.
    Lightweight,
    /// Crossbar interconnect.
    Crossbar,
}

/// What a block is, decided once at synthesis time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// The system interconnect.
    Bus {
        /// Interconnect flavour.
        style: BusStyle,
    },
    /// A single NPU cluster.
    NpuCluster {
        /// Zero-based cluster index.
        index: u32,
    },
    /// Many NPU clusters collapsed into one systolic array block.
    NpuArray {
        /// Total clusters represented.
        clusters: u32,
        /// Array rows.
        rows: u32,
        /// Array columns.
        cols: u32,
    },
    /// A graphics processor.
    Gpu,
    /// The host processor.
    HostCpu,
    /// External memory controller.
    MemoryController,
    /// External memory physical interface.
    MemoryPhy,
    /// An IO controller.
    Io {
        /// The IO standard, e.g. `"PCIe"`.
        standard: String,
    },
    /// On-chip SRAM.
    Sram,
    /// Unknown; the floorplan engine classifies it from its label.
    #[default]
    Unclassified,
}

impl NodeKind {
    /// Returns `true` for the system interconnect.
    pub fn is_bus(&self) -> bool {
        matches!(self, NodeKind::Bus { .. })
    }
}

/// Logic domain of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicDomain {
    /// Standard-cell digital logic.
    #[default]
    #[serde(alias = "digital")]
    Digital,
    /// Mixed-signal or analog circuitry; placed on the boundary ring.
    #[serde(alias = "analog")]
    Analog,
    /// Memory macros and controllers.
    #[serde(alias = "memory")]
    Memory,
}

/// A block in the architecture graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier derived from role and index, e.g. `"npu_0"`.
    pub id: String,
    /// Typed role of the block.
    #[serde(default)]
    pub kind: NodeKind,
    /// Human-readable label.
    pub label: String,
    /// Logic domain.
    #[serde(default)]
    pub domain: LogicDomain,
    /// Seed position from the illustrative topology layout.
    #[serde(default)]
    pub position: Point,
}

/// A weighted link between two blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier, e.g. `"e_npu_0"`.
    pub id: String,
    /// Id of the driving node.
    pub source: String,
    /// Id of the receiving node.
    pub target: String,
    /// Relative bandwidth demand.
    #[serde(default = "default_bandwidth_weight")]
    pub bandwidth_weight: u32,
}

fn default_bandwidth_weight() -> u32 {
    1
}

/// Blocks and links of one synthesized architecture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureGraph {
    /// All blocks, in synthesis order.
    pub nodes: Vec<Node>,
    /// All links, in synthesis order.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl ArchitectureGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Returns the edges whose source or target names no node in the graph.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
            .collect()
    }

    /// Returns the number of nodes whose kind satisfies `pred`.
    pub fn count_nodes(&self, pred: impl Fn(&NodeKind) -> bool) -> usize {
        self.nodes.iter().filter(|n| pred(&n.kind)).count()
    }
}
