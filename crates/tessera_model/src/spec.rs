//! The chip specification: the design intent every pipeline stage starts from.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tessera_common::Frequency;

/// External memory technology attached to the chip.
///
/// Names are matched case-insensitively. Unknown names are kept verbatim in
/// [`MemoryType::Other`] so that generated labels still show what was asked
/// for; the feasibility stage then uses its default transfer rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemoryType {
    /// DDR4 SDRAM.
    #[default]
    Ddr4,
    /// DDR5 SDRAM.
    Ddr5,
    /// Low-power DDR5.
    Lpddr5,
    /// Second generation high-bandwidth stacked memory.
    Hbm2,
    /// Third generation high-bandwidth stacked memory.
    Hbm3,
    /// Purely on-chip SRAM; no external memory subsystem.
    Sram,
    /// Any other technology, by name.
    Other(String),
}

impl MemoryType {
    /// Returns the canonical name, e.g. `"LPDDR5"`.
    pub fn as_str(&self) -> &str {
        match self {
            MemoryType::Ddr4 => "DDR4",
            MemoryType::Ddr5 => "DDR5",
            MemoryType::Lpddr5 => "LPDDR5",
            MemoryType::Hbm2 => "HBM2",
            MemoryType::Hbm3 => "HBM3",
            MemoryType::Sram => "SRAM",
            MemoryType::Other(name) => name,
        }
    }

    /// Returns `true` for stacked high-bandwidth memory, whose bus is one full stack wide.
    pub fn is_stacked(&self) -> bool {
        match self {
            MemoryType::Hbm2 | MemoryType::Hbm3 => true,
            MemoryType::Other(name) => name.to_ascii_uppercase().contains("HBM"),
            _ => false,
        }
    }

    /// Returns `true` when all memory is on-chip and no controller or PHY is needed.
    pub fn is_on_chip(&self) -> bool {
        matches!(self, MemoryType::Sram)
    }
}

impl From<String> for MemoryType {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "DDR4" => MemoryType::Ddr4,
            "DDR5" => MemoryType::Ddr5,
            "LPDDR5" => MemoryType::Lpddr5,
            "HBM2" => MemoryType::Hbm2,
            "HBM3" => MemoryType::Hbm3,
            "SRAM" => MemoryType::Sram,
            _ => MemoryType::Other(name),
        }
    }
}

impl From<&str> for MemoryType {
    fn from(name: &str) -> Self {
        MemoryType::from(name.to_string())
    }
}

impl From<MemoryType> for String {
    fn from(memory: MemoryType) -> Self {
        match memory {
            MemoryType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete chip design intent.
///
/// Every field has a default, so a specification file only needs the values
/// that differ. The core pipeline reads the process node, clock, power budget,
/// compute, memory and IO fields; the descriptive fields further down are
/// carried through to generated RTL headers and advisory prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChipSpecification {
    /// Free-form description of what the chip is for.
    pub purpose: String,
    /// Process node name such as `"7nm"`.
    pub process_node: String,
    /// Target clock in GHz. Accepts a number or a unit string like `"800MHz"`.
    #[serde(deserialize_with = "deserialize_ghz")]
    pub frequency: f64,
    /// Power budget in watts.
    pub power_budget: f64,
    /// Number of NPU clusters.
    pub num_npu_clusters: u32,
    /// Multiply-accumulate units in each cluster.
    pub mac_units_per_cluster: u32,
    /// System bus data width in bits.
    pub axi_width: u32,
    /// External memory technology.
    pub memory_type: MemoryType,
    /// Memory bus width in bits per channel.
    pub ddr_width: u32,
    /// Number of memory channels.
    pub memory_channels: u32,
    /// IO standards to provide, e.g. `["PCIe", "USB"]`.
    pub standards: Vec<String>,
    /// Core supply voltage in volts, if constrained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_target: Option<f64>,
    /// Split the design across several dies.
    pub multi_die_partitioning: bool,
    /// Apply the stricter competition-grade structural checks.
    pub competition_mode: bool,

    /// Preferred foundry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foundry: Option<String>,
    /// Operating temperature grade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_range: Option<String>,
    /// Market segment, e.g. `"Edge AI"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_goal: Option<String>,
    /// Inference, training or both.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_type: Option<String>,
    /// Arithmetic precision, e.g. `"INT8"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<String>,
    /// On-chip SRAM capacity in MB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sram_size_mb: Option<u32>,
    /// Preferred interconnect family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interconnect_type: Option<String>,
    /// Share of working set kept on-chip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_chip_ratio: Option<String>,
    /// PCIe generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcie_version: Option<String>,
    /// Power management strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_strategy: Option<String>,
    /// Cooling solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooling_solution: Option<String>,
    /// Packaging technology.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packaging_type: Option<String>,
    /// Die area target range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub die_area_target: Option<String>,
    /// Cost segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_target: Option<String>,
    /// Clock domain name to frequency in GHz.
    pub clock_domains: BTreeMap<String, f64>,
}

impl Default for ChipSpecification {
    fn default() -> Self {
        Self {
            purpose: "AI Accelerator".to_string(),
            process_node: "28nm".to_string(),
            frequency: 1.0,
            power_budget: 5.0,
            num_npu_clusters: 1,
            mac_units_per_cluster: 256,
            axi_width: 128,
            memory_type: MemoryType::Ddr4,
            ddr_width: 64,
            memory_channels: 1,
            standards: Vec::new(),
            voltage_target: Some(0.8),
            multi_die_partitioning: false,
            competition_mode: false,
            foundry: None,
            temperature_range: None,
            performance_goal: None,
            compute_type: None,
            precision: None,
            sram_size_mb: None,
            interconnect_type: None,
            on_chip_ratio: None,
            pcie_version: None,
            power_strategy: None,
            cooling_solution: None,
            packaging_type: None,
            die_area_target: None,
            cost_target: None,
            clock_domains: [("core", 1.0), ("io", 0.5), ("mem", 0.8)]
                .into_iter()
                .map(|(name, ghz)| (name.to_string(), ghz))
                .collect(),
        }
    }
}

impl ChipSpecification {
    /// Returns the clock target as a [`Frequency`].
    pub fn clock(&self) -> Frequency {
        Frequency::from_ghz(self.frequency)
    }
}

/// Accepts a GHz number, a unitless GHz string such as `"2.5"`, or a
/// frequency string with a unit.
fn deserialize_ghz<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GhzOrString {
        Ghz(f64),
        Text(String),
    }

    match GhzOrString::deserialize(deserializer)? {
        GhzOrString::Ghz(ghz) => Ok(ghz),
        GhzOrString::Text(text) => match text.trim().parse::<f64>() {
            Ok(ghz) => Ok(ghz),
            Err(_) => text
                .parse::<Frequency>()
                .map(|f| f.ghz())
                .map_err(serde::de::Error::custom),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let spec = ChipSpecification::default();
        assert_eq!(spec.process_node, "28nm");
        assert_eq!(spec.frequency, 1.0);
        assert_eq!(spec.num_npu_clusters, 1);
        assert_eq!(spec.axi_width, 128);
        assert_eq!(spec.memory_type, MemoryType::Ddr4);
        assert_eq!(spec.voltage_target, Some(0.8));
        assert!(spec.standards.is_empty());
    }

    #[test]
    fn empty_json_is_default() {
        let spec: ChipSpecification = serde_json::from_str("{}").unwrap();
        assert_eq!(spec, ChipSpecification::default());
    }

    #[test]
    fn frequency_accepts_unit_string() {
        let spec: ChipSpecification = serde_json::from_str(r#"{"frequency": "800MHz"}"#).unwrap();
        assert!((spec.frequency - 0.8).abs() < 1e-12);
        let spec: ChipSpecification = serde_json::from_str(r#"{"frequency": 2.5}"#).unwrap();
        assert_eq!(spec.frequency, 2.5);
    }

    #[test]
    fn unitless_frequency_string_is_ghz() {
        let spec: ChipSpecification = serde_json::from_str(r#"{"frequency": "2.5"}"#).unwrap();
        assert_eq!(spec.frequency, 2.5);
        let spec: ChipSpecification = toml::from_str("frequency = \" 1.2 \"\n").unwrap();
        assert!((spec.frequency - 1.2).abs() < 1e-12);
        let spec: ChipSpecification = toml::from_str("frequency = 2.5\n").unwrap();
        assert_eq!(spec.frequency, 2.5);
    }

    #[test]
    fn frequency_rejects_garbage() {
        let res = serde_json::from_str::<ChipSpecification>(r#"{"frequency": "fast"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn memory_type_parsing() {
        assert_eq!(MemoryType::from("hbm3"), MemoryType::Hbm3);
        assert_eq!(MemoryType::from(" LPDDR5 "), MemoryType::Lpddr5);
        assert_eq!(MemoryType::from("GDDR6"), MemoryType::Other("GDDR6".into()));
        assert_eq!(MemoryType::from("GDDR6").as_str(), "GDDR6");
    }

    #[test]
    fn memory_type_classes() {
        assert!(MemoryType::Hbm2.is_stacked());
        assert!(MemoryType::Other("HBM3e".into()).is_stacked());
        assert!(!MemoryType::Ddr5.is_stacked());
        assert!(MemoryType::Sram.is_on_chip());
        assert!(!MemoryType::Lpddr5.is_on_chip());
    }

    #[test]
    fn memory_type_serializes_as_name() {
        let json = serde_json::to_string(&MemoryType::Lpddr5).unwrap();
        assert_eq!(json, r#""LPDDR5""#);
    }

    #[test]
    fn null_voltage_disables_scaling() {
        let spec: ChipSpecification =
            serde_json::from_str(r#"{"voltage_target": null}"#).unwrap();
        assert_eq!(spec.voltage_target, None);
    }

    #[test]
    fn clock_conversion() {
        let spec = ChipSpecification {
            frequency: 2.5,
            ..Default::default()
        };
        assert_eq!(spec.clock().ghz(), 2.5);
        assert_eq!(spec.clock().to_string(), "2.5GHz");
    }
}
