//! Floorplan result data structures.
//!
//! A [`FloorplanResult`] is what one run of the engine produces: the chip
//! outline, the core region, every placed [`Block`], every [`RoutedEdge`],
//! the power-density heatmap and the summary [`FloorplanMetrics`].

use serde::{Deserialize, Serialize};
use tessera_common::{Point, Rect};
use tessera_model::LogicDomain;

/// Side length of the square power-density grid.
pub const HEATMAP_SIZE: usize = 10;

/// Power density accumulated per grid cell, indexed `[row][column]`.
pub type Heatmap = [[f64; HEATMAP_SIZE]; HEATMAP_SIZE];

/// A named, colored rectangle of the die.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region name, e.g. `"Digital Core"`.
    pub name: String,
    /// Outline of the region.
    #[serde(flatten)]
    pub rect: Rect,
    /// Fill color.
    pub color: String,
}

/// Where a block was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockRegion {
    /// Packed into the core grid.
    Core,
    /// Snapped onto the boundary ring.
    Io,
}

/// A placed block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Id of the graph node this block realizes.
    pub id: String,
    /// Label copied from the node.
    pub label: String,
    /// Placed outline.
    #[serde(flatten)]
    pub rect: Rect,
    /// Core grid or boundary ring.
    pub region: BlockRegion,
    /// Logic domain copied from the node.
    pub domain: LogicDomain,
    /// Power weight of the block, used for the heatmap.
    pub power_density: f64,
}

/// A routed connection between two block centers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedEdge {
    /// Id of the graph edge.
    pub id: String,
    /// Orthogonal path from source center to target center.
    pub path: Vec<Point>,
    /// Stroke width.
    pub thickness: u32,
    /// Stroke color.
    pub color: String,
}

/// Power split across block categories, in watts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerBreakdown {
    /// Compute blocks.
    #[serde(rename = "Compute")]
    pub compute: f64,
    /// Memory blocks.
    #[serde(rename = "Memory")]
    pub memory: f64,
    /// IO blocks.
    #[serde(rename = "IO")]
    pub io: f64,
    /// Interconnect blocks.
    #[serde(rename = "Interconnect")]
    pub interconnect: f64,
}

impl PowerBreakdown {
    /// Returns the sum of all categories.
    pub fn total(&self) -> f64 {
        self.compute + self.memory + self.io + self.interconnect
    }
}

/// Coarse routing congestion class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Congestion {
    /// Few wires per block.
    Low,
    /// Noticeably more wires than blocks.
    Medium,
}

impl std::fmt::Display for Congestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Congestion::Low => f.write_str("Low"),
            Congestion::Medium => f.write_str("Medium"),
        }
    }
}

/// Chip-level summary figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorplanMetrics {
    /// Sum of block throughput estimates in TOPS.
    pub estimated_tops: f64,
    /// Power per category, rescaled to the configured target wattage.
    pub power_breakdown: PowerBreakdown,
    /// External memory bandwidth in GB/s.
    pub memory_bandwidth_gbps: f64,
    /// Batch-1 inference latency estimate in milliseconds.
    pub latency_ms: f64,
    /// TOPS per watt of the breakdown total.
    pub efficiency_tops_per_watt: f64,
    /// Detected bottleneck labels.
    pub bottlenecks: Vec<String>,
    /// Die area in mm².
    pub total_area_mm2: f64,
    /// Coarse congestion class.
    pub congestion: Congestion,
    /// Area utilization in percent.
    pub area_utilization_pct: u32,
}

/// The complete output of one floorplan run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorplanResult {
    /// Chip width in layout units.
    pub chip_width: f64,
    /// Chip height in layout units.
    pub chip_height: f64,
    /// Named regions; the first is always the core region.
    pub regions: Vec<Region>,
    /// Every placed block, core blocks first.
    pub blocks: Vec<Block>,
    /// Every routed edge, in graph order.
    pub routed_edges: Vec<RoutedEdge>,
    /// Power density per grid cell.
    pub power_density_grid: Heatmap,
    /// Summary metrics.
    pub metrics: FloorplanMetrics,
}

impl FloorplanResult {
    /// Returns the placed block with the given id.
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Returns the routed edge with the given id.
    pub fn routed_edge(&self, id: &str) -> Option<&RoutedEdge> {
        self.routed_edges.iter().find(|e| e.id == id)
    }
}
