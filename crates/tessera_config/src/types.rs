//! Configuration types deserialized from `tessera.toml`.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// The complete set of heuristic constants for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Physics bounds and estimation constants for feasibility analysis.
    #[serde(default)]
    pub feasibility: FeasibilityConfig,
    /// Layout heuristics for topology graph synthesis.
    #[serde(default)]
    pub topology: TopologyConfig,
    /// Placement, routing and metric constants for the floorplan engine.
    #[serde(default)]
    pub floorplan: FloorplanConfig,
}

/// Physics bounds of one process node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePhysics {
    /// Highest clock frequency the node sustains, in GHz.
    pub max_freq_ghz: f64,
    /// Relative dynamic power per cluster; larger on older nodes.
    pub power_factor: f64,
}

/// Constants used by the feasibility analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeasibilityConfig {
    /// Process node substituted when the requested node is unknown.
    pub default_node: String,
    /// Physics table keyed by process node name (e.g. `"5nm"`).
    ///
    /// Entries given in `tessera.toml` extend and override the built-in table.
    #[serde(deserialize_with = "extend_default_nodes")]
    pub nodes: BTreeMap<String, NodePhysics>,
    /// Per-pin transfer rate in Gb/s keyed by memory type name.
    ///
    /// Entries given in `tessera.toml` extend and override the built-in table.
    #[serde(deserialize_with = "extend_default_memory_rates")]
    pub memory_rates: BTreeMap<String, f64>,
    /// Transfer rate used for memory types missing from `memory_rates`.
    pub default_memory_rate: f64,
    /// Bus width of one stacked (HBM) memory device, replacing the configured width.
    pub stacked_memory_width: u32,
    /// Static power floor in watts.
    pub base_power_w: f64,
    /// Dynamic power coefficient applied to `frequency * power_factor`.
    pub dynamic_power_coeff: f64,
    /// Fraction of each cluster assumed active when estimating dynamic power.
    pub cluster_activity: f64,
    /// Supply voltage the power factors were characterized at.
    pub nominal_voltage: f64,
    /// Required memory bandwidth (GB/s) per TOPS before a bottleneck is flagged.
    pub bandwidth_per_tops: f64,
    /// Minimum AXI width accepted in competition mode.
    pub competition_min_axi_width: u32,
    /// Minimum NPU cluster count accepted in competition mode.
    pub competition_min_clusters: u32,
    /// Fixed die area overhead in mm².
    pub area_base_mm2: f64,
    /// Die area per cluster in mm², scaled by the node power factor.
    pub area_per_cluster_mm2: f64,
}

impl Default for FeasibilityConfig {
    fn default() -> Self {
        Self {
            default_node: "28nm".to_string(),
            nodes: default_nodes(),
            memory_rates: default_memory_rates(),
            default_memory_rate: 3.2,
            stacked_memory_width: 1024,
            base_power_w: 0.5,
            dynamic_power_coeff: 0.1,
            cluster_activity: 0.5,
            nominal_voltage: 0.8,
            bandwidth_per_tops: 0.5,
            competition_min_axi_width: 128,
            competition_min_clusters: 2,
            area_base_mm2: 10.0,
            area_per_cluster_mm2: 5.0,
        }
    }
}

impl FeasibilityConfig {
    /// Looks up the physics entry for a node, ignoring ASCII case and padding.
    pub fn node(&self, name: &str) -> Option<(&str, &NodePhysics)> {
        let name = name.trim();
        self.nodes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(key, physics)| (key.as_str(), physics))
    }

    /// Returns the transfer rate for a memory type, or the default rate.
    pub fn memory_rate(&self, memory_type: &str) -> f64 {
        self.memory_rates
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(memory_type.trim()))
            .map(|(_, rate)| *rate)
            .unwrap_or(self.default_memory_rate)
    }
}

fn default_nodes() -> BTreeMap<String, NodePhysics> {
    [
        ("130nm", 0.5, 10.0),
        ("65nm", 1.2, 5.0),
        ("28nm", 2.0, 2.5),
        ("7nm", 4.5, 1.0),
        ("5nm", 5.5, 0.8),
    ]
    .into_iter()
    .map(|(name, max_freq_ghz, power_factor)| {
        (
            name.to_string(),
            NodePhysics {
                max_freq_ghz,
                power_factor,
            },
        )
    })
    .collect()
}

fn default_memory_rates() -> BTreeMap<String, f64> {
    [
        ("DDR4", 3.2),
        ("DDR5", 6.4),
        ("LPDDR5", 6.4),
        ("HBM2", 2.0),
        ("HBM3", 6.4),
    ]
    .into_iter()
    .map(|(name, rate)| (name.to_string(), rate))
    .collect()
}

/// Deserializes a node table and layers it over the built-in one.
fn extend_default_nodes<'de, D>(deserializer: D) -> Result<BTreeMap<String, NodePhysics>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, NodePhysics>::deserialize(deserializer)?;
    let mut nodes = default_nodes();
    nodes.extend(overrides);
    Ok(nodes)
}

/// Deserializes a memory rate table and layers it over the built-in one.
fn extend_default_memory_rates<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, f64>::deserialize(deserializer)?;
    let mut rates = default_memory_rates();
    rates.extend(overrides);
    Ok(rates)
}

/// Constants used by the topology graph synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Width of the seed layout canvas.
    pub canvas_width: f64,
    /// Height of the seed layout canvas.
    pub canvas_height: f64,
    /// Cluster counts above this use a mesh network-on-chip.
    pub mesh_cluster_threshold: u32,
    /// Clock targets below this (GHz) use a lightweight bus.
    pub lightweight_bus_max_ghz: f64,
    /// Cluster counts at or below this get one node per cluster.
    pub array_collapse_threshold: u32,
    /// Column count of a collapsed systolic array.
    pub array_columns: u32,
    /// Horizontal spacing between individual cluster nodes.
    pub cluster_spacing: f64,
    /// Vertical distance of the compute row above the bus.
    pub compute_row_offset: f64,
    /// Horizontal distance of the host processor left of the bus.
    pub host_offset_x: f64,
    /// Vertical distance of the host processor above the bus.
    pub host_offset_y: f64,
    /// Horizontal distance of the memory controller right of the bus.
    pub memory_ctrl_offset_x: f64,
    /// Horizontal distance of the memory PHY right of the bus.
    pub memory_phy_offset_x: f64,
    /// Vertical distance of the memory PHY below the bus.
    pub memory_phy_offset_y: f64,
    /// Horizontal spacing between IO nodes.
    pub io_spacing: f64,
    /// Vertical distance of the IO band below the bus.
    pub io_row_offset: f64,
    /// Bandwidth weight of an individual cluster link.
    pub cluster_link_bandwidth: u32,
    /// Bandwidth weight of the systolic array link.
    pub array_link_bandwidth: u32,
    /// Bandwidth weight of the bus to memory controller link.
    pub memory_link_bandwidth: u32,
    /// Bandwidth weight of every other link.
    pub default_link_bandwidth: u32,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            mesh_cluster_threshold: 4,
            lightweight_bus_max_ghz: 0.5,
            array_collapse_threshold: 4,
            array_columns: 4,
            cluster_spacing: 200.0,
            compute_row_offset: 150.0,
            host_offset_x: 300.0,
            host_offset_y: 50.0,
            memory_ctrl_offset_x: 250.0,
            memory_phy_offset_x: 350.0,
            memory_phy_offset_y: 80.0,
            io_spacing: 150.0,
            io_row_offset: 150.0,
            cluster_link_bandwidth: 10,
            array_link_bandwidth: 50,
            memory_link_bandwidth: 20,
            default_link_bandwidth: 1,
        }
    }
}

/// Area, power and throughput weights of one block class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockWeights {
    /// Relative silicon area; drives placed block size.
    pub area: f64,
    /// Relative power draw; drives power density and the power breakdown.
    pub power: f64,
    /// Throughput contribution in TOPS.
    pub tops: f64,
}

impl BlockWeights {
    /// Creates a weight triple.
    pub const fn new(area: f64, power: f64, tops: f64) -> Self {
        Self { area, power, tops }
    }

    /// Returns the weights multiplied by a count (used for cluster arrays).
    pub fn scaled(&self, count: u32) -> Self {
        let n = f64::from(count);
        Self::new(self.area * n, self.power * n, self.tops * n)
    }
}

/// Weight table used when enriching graph nodes into floorplan blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    /// Graphics processors.
    pub gpu: BlockWeights,
    /// A single NPU cluster.
    pub npu: BlockWeights,
    /// One cluster's share of a collapsed NPU array.
    pub npu_array_per_cluster: BlockWeights,
    /// Host processor.
    pub cpu: BlockWeights,
    /// System bus or network-on-chip.
    pub interconnect: BlockWeights,
    /// Memory controllers and on-chip SRAM.
    pub memory: BlockWeights,
    /// IO controllers and PHYs.
    pub io: BlockWeights,
    /// Anything that matches no other class.
    pub generic: BlockWeights,
    /// Cluster count assumed when an array label has an unreadable count.
    pub array_fallback_clusters: u32,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            gpu: BlockWeights::new(8.0, 9.0, 15.0),
            npu: BlockWeights::new(7.0, 8.0, 100.0),
            npu_array_per_cluster: BlockWeights::new(4.0, 3.0, 100.0),
            cpu: BlockWeights::new(5.0, 5.0, 0.5),
            interconnect: BlockWeights::new(6.0, 3.0, 0.0),
            memory: BlockWeights::new(5.0, 4.0, 0.0),
            io: BlockWeights::new(3.0, 2.0, 0.0),
            generic: BlockWeights::new(4.0, 4.0, 0.0),
            array_fallback_clusters: 8,
        }
    }
}

/// A fixed width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockSize {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

/// Stroke style of a routed edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke width in layout units.
    pub thickness: u32,
    /// CSS-style color string.
    pub color: String,
}

/// A label token and the bandwidth attributed to memory blocks carrying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryBandwidth {
    /// Case-insensitive substring searched in the block label.
    pub token: String,
    /// Bandwidth contribution in GB/s.
    pub gbps: f64,
}

/// Multipliers applied to block power weights per category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerMultipliers {
    /// Compute blocks.
    pub compute: f64,
    /// Memory blocks.
    pub memory: f64,
    /// IO blocks.
    pub io: f64,
    /// Interconnect blocks.
    pub interconnect: f64,
}

impl Default for PowerMultipliers {
    fn default() -> Self {
        Self {
            compute: 1.5,
            memory: 0.8,
            io: 0.5,
            interconnect: 0.2,
        }
    }
}

/// Constants used by the floorplan engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorplanConfig {
    /// Per-class block weights.
    pub weights: WeightTable,
    /// Layout units per area weight along the block width.
    pub block_scale: f64,
    /// Height-to-width ratio of a core block.
    pub block_aspect: f64,
    /// Row width at which the core packer wraps to a new row.
    pub max_row_width: f64,
    /// Gap between neighbouring core blocks and between rows.
    pub placement_gap: f64,
    /// Core width and height used when there are no core blocks.
    pub fallback_core_size: f64,
    /// Thickness of the IO ring around the core.
    pub ring_thickness: f64,
    /// Extra margin between the ring and the core region.
    pub core_margin: f64,
    /// Name of the core region.
    pub core_region_name: String,
    /// Fill color of the core region.
    pub core_region_color: String,
    /// Size of a boundary (IO) block.
    pub io_block: BlockSize,
    /// Distance of boundary blocks from the chip edge.
    pub io_inset: f64,
    /// Size override for memory blocks labelled "High-Bandwidth".
    pub high_bandwidth_block: BlockSize,
    /// Size override for memory blocks labelled "DDR".
    pub ddr_block: BlockSize,
    /// Stroke of edges touching the bus.
    pub bus_stroke: StrokeStyle,
    /// Stroke of every other edge.
    pub default_stroke: StrokeStyle,
    /// Per-category power multipliers.
    pub power_multipliers: PowerMultipliers,
    /// Total wattage the power breakdown is rescaled to.
    pub power_target_w: f64,
    /// Latency floor in milliseconds.
    pub latency_base_ms: f64,
    /// Latency numerator divided by `tops + 1`, in milliseconds.
    pub latency_compute_ms: f64,
    /// Memory bandwidth per label token, first match wins.
    pub memory_bandwidth: Vec<MemoryBandwidth>,
    /// GB/s per TOPS below which a global memory bottleneck is flagged.
    pub bottleneck_gbps_per_tops: f64,
    /// Routed-edge to placed-block ratio above which congestion is "Medium".
    pub congestion_ratio: f64,
    /// Block count that represents a fully used die.
    pub utilization_capacity: u32,
    /// Upper bound of the reported utilization percentage.
    pub utilization_cap_pct: u32,
    /// Layout units squared per mm² when reporting die area.
    pub area_units_per_mm2: f64,
}

impl Default for FloorplanConfig {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            block_scale: 40.0,
            block_aspect: 0.8,
            max_row_width: 800.0,
            placement_gap: 20.0,
            fallback_core_size: 400.0,
            ring_thickness: 60.0,
            core_margin: 20.0,
            core_region_name: "Digital Core".to_string(),
            core_region_color: "#0f172a".to_string(),
            io_block: BlockSize {
                width: 50.0,
                height: 30.0,
            },
            io_inset: 10.0,
            high_bandwidth_block: BlockSize {
                width: 40.0,
                height: 120.0,
            },
            ddr_block: BlockSize {
                width: 120.0,
                height: 40.0,
            },
            bus_stroke: StrokeStyle {
                thickness: 4,
                color: "#3b82f6".to_string(),
            },
            default_stroke: StrokeStyle {
                thickness: 2,
                color: "#64748b".to_string(),
            },
            power_multipliers: PowerMultipliers::default(),
            power_target_w: 15.0,
            latency_base_ms: 0.5,
            latency_compute_ms: 10.0,
            memory_bandwidth: [
                ("HBM3", 819.0),
                ("HBM2", 460.0),
                ("LPDDR5", 51.2),
                ("DDR5", 32.0),
                ("DDR4", 25.6),
            ]
            .into_iter()
            .map(|(token, gbps)| MemoryBandwidth {
                token: token.to_string(),
                gbps,
            })
            .collect(),
            bottleneck_gbps_per_tops: 0.5,
            congestion_ratio: 1.2,
            utilization_capacity: 15,
            utilization_cap_pct: 95,
            area_units_per_mm2: 10_000.0,
        }
    }
}
