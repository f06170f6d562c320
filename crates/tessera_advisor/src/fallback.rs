//! Deterministic answers used when no backend answer is available.
//!
//! Architecture reviews come from an embedded lookup table keyed by the
//! partitioning mode. Optimizations and free-text parsing are derived
//! locally from the specification and the request text.

use serde_json::{json, Value};
use tessera_model::{ChipSpecification, MemoryType};

/// The embedded review table.
const PRECOMPUTED_ANALYSIS: &str = include_str!("../data/precomputed_analysis.json");

/// Table key for monolithic designs.
pub const MONOLITHIC_KEY: &str = "monolithic_default";
/// Table key for chiplet designs.
pub const MULTI_DIE_KEY: &str = "multi_die_partitioning";

/// Returns the precomputed review matching the specification's partitioning mode.
pub fn precomputed_review(spec: &ChipSpecification) -> Value {
    let key = if spec.multi_die_partitioning {
        MULTI_DIE_KEY
    } else {
        MONOLITHIC_KEY
    };
    let table: Value = match serde_json::from_str(PRECOMPUTED_ANALYSIS) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!(error = %e, "embedded review table is unreadable");
            return minimal_review();
        }
    };
    table
        .get(key)
        .or_else(|| table.get(MONOLITHIC_KEY))
        .cloned()
        .unwrap_or_else(minimal_review)
}

fn minimal_review() -> Value {
    json!({
        "summary": "Local review only; no advisory backend answered.",
        "bottlenecks": [],
        "reasoning": "No reasoning available offline.",
        "suggestions": []
    })
}

/// Derives an optimization for `goal` from fixed rules.
///
/// `power` lowers the clock by a fifth and the supply voltage to 0.7 V.
/// `performance` doubles the NPU clusters and widens the interconnect to at
/// least 256 bits. Any other goal leaves the specification unchanged.
pub fn optimize_locally(spec: &ChipSpecification, goal: &str) -> Value {
    let mut optimized = spec.clone();
    let mut changes = Vec::new();
    let goal = goal.trim().to_lowercase();

    let trade_offs = match goal.as_str() {
        "power" => {
            optimized.frequency = round2(spec.frequency * 0.8);
            changes.push(change(
                "frequency",
                spec.frequency,
                optimized.frequency,
                "Dynamic power scales linearly with clock frequency.",
            ));
            if spec.voltage_target.is_some_and(|v| v > 0.7) {
                optimized.voltage_target = Some(0.7);
                changes.push(change(
                    "voltage_target",
                    spec.voltage_target.unwrap_or_default(),
                    0.7,
                    "Dynamic power scales with the square of the supply voltage.",
                ));
            }
            "Lower clock and voltage reduce throughput roughly in proportion to frequency."
        }
        "performance" => {
            optimized.num_npu_clusters = spec.num_npu_clusters.max(1) * 2;
            changes.push(change(
                "num_npu_clusters",
                spec.num_npu_clusters,
                optimized.num_npu_clusters,
                "Peak TOPS scales with the number of clusters.",
            ));
            if spec.axi_width < 256 {
                optimized.axi_width = 256;
                changes.push(change(
                    "axi_width",
                    spec.axi_width,
                    256,
                    "A wider interconnect keeps the added clusters fed.",
                ));
            }
            "More clusters raise area and power; check the power budget again."
        }
        _ => "No rule applies to this goal; the specification is unchanged.",
    };

    json!({
        "optimized_spec": optimized,
        "changes": changes,
        "trade_offs": trade_offs,
    })
}

fn change(parameter: &str, old: impl ToString, new: impl ToString, reason: &str) -> Value {
    json!({
        "parameter": parameter,
        "old": old.to_string(),
        "new": new.to_string(),
        "reason": reason,
    })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// IO standards recognized in free text, with the name used in the specification.
const KNOWN_STANDARDS: &[(&str, &str)] = &[
    ("pcie", "PCIe"),
    ("usb", "USB"),
    ("ethernet", "Ethernet"),
    ("mipi", "MIPI"),
    ("hdmi", "HDMI"),
    ("spi", "SPI"),
    ("i2c", "I2C"),
    ("uart", "UART"),
    ("can", "CAN"),
];

/// Builds a specification from keywords in a free-text request.
///
/// Recognizes a process node (`"5nm"`), a power budget (`"15W"` or
/// `"15 watts"`), a cluster count (`"8 clusters"`), a memory type, IO
/// standards and a few deployment keywords. Everything else keeps its
/// default.
pub fn extract_spec(text: &str) -> ChipSpecification {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '.'))
        .filter(|w| !w.is_empty())
        .collect();

    let mut spec = ChipSpecification {
        purpose: String::from("AI Accelerator"),
        ..ChipSpecification::default()
    };

    if let Some(node) = words.iter().find_map(|w| number_with_suffix(w, "nm")) {
        spec.process_node = format!("{node}nm");
    }
    if let Some(watts) = words
        .iter()
        .find_map(|w| number_with_suffix(w, "w"))
        .or_else(|| number_before(&words, &["w", "watt", "watts"]))
    {
        if let Ok(w) = watts.parse::<f64>() {
            spec.power_budget = w;
        }
    }
    if let Some(n) = number_before(&words, &["cluster", "clusters"]).and_then(|n| n.parse().ok()) {
        spec.num_npu_clusters = n;
    }

    for (token, memory) in [
        ("hbm3", MemoryType::Hbm3),
        ("hbm2", MemoryType::Hbm2),
        ("lpddr5", MemoryType::Lpddr5),
        ("ddr5", MemoryType::Ddr5),
        ("ddr4", MemoryType::Ddr4),
    ] {
        if words.contains(&token) {
            spec.memory_type = memory;
            break;
        }
    }

    spec.standards = KNOWN_STANDARDS
        .iter()
        .filter(|(token, _)| words.contains(token))
        .map(|(_, name)| name.to_string())
        .collect();

    if lower.contains("data center") || lower.contains("datacenter") {
        spec.performance_goal = Some("Data Center AI".into());
        spec.purpose = String::from("Data Center AI Accelerator");
    } else if lower.contains("automotive") {
        spec.performance_goal = Some("Automotive AI".into());
        spec.purpose = String::from("Automotive AI Accelerator");
        spec.temperature_range = Some("-40C to 125C".into());
    } else if lower.contains("edge") {
        spec.performance_goal = Some("Edge AI".into());
        spec.purpose = String::from("Edge AI Accelerator");
    }

    if lower.contains("training") {
        spec.compute_type = Some("Training".into());
    } else if lower.contains("inference") {
        spec.compute_type = Some("Inference Only".into());
    }

    if lower.contains("passive") || lower.contains("fanless") {
        spec.cooling_solution = Some("Passive".into());
    } else if lower.contains("active cooling") || lower.contains("liquid") {
        spec.cooling_solution = Some("Active".into());
    }

    spec.multi_die_partitioning = lower.contains("chiplet") || lower.contains("multi-die");
    spec
}

/// Returns the numeric part of `word` when it is a number followed by `suffix`.
fn number_with_suffix<'a>(word: &'a str, suffix: &str) -> Option<&'a str> {
    let number = word.strip_suffix(suffix)?;
    is_number(number).then_some(number)
}

/// Returns the number preceding the first word in `units`.
fn number_before<'a>(words: &[&'a str], units: &[&str]) -> Option<&'a str> {
    words
        .windows(2)
        .find(|w| units.contains(&w[1]) && is_number(w[0]))
        .map(|w| w[0])
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_follows_partitioning() {
        let mono = precomputed_review(&ChipSpecification::default());
        assert!(mono["summary"].as_str().unwrap().starts_with("Monolithic"));

        let chiplet = ChipSpecification {
            multi_die_partitioning: true,
            ..ChipSpecification::default()
        };
        let multi = precomputed_review(&chiplet);
        assert!(multi["summary"].as_str().unwrap().starts_with("Chiplet"));
        assert!(multi["suggestions"].as_array().is_some_and(|s| !s.is_empty()));
    }

    #[test]
    fn power_goal_lowers_clock_and_voltage() {
        let spec = ChipSpecification {
            frequency: 2.0,
            ..ChipSpecification::default()
        };
        let out = optimize_locally(&spec, "Power");
        assert_eq!(out["optimized_spec"]["frequency"], 1.6);
        assert_eq!(out["optimized_spec"]["voltage_target"], 0.7);
        assert_eq!(out["changes"].as_array().map(Vec::len), Some(2));
        assert_eq!(out["changes"][0]["old"], "2");
    }

    #[test]
    fn performance_goal_scales_compute() {
        let spec = ChipSpecification {
            num_npu_clusters: 4,
            axi_width: 128,
            ..ChipSpecification::default()
        };
        let out = optimize_locally(&spec, "performance");
        assert_eq!(out["optimized_spec"]["num_npu_clusters"], 8);
        assert_eq!(out["optimized_spec"]["axi_width"], 256);
    }

    #[test]
    fn unknown_goal_changes_nothing() {
        let out = optimize_locally(&ChipSpecification::default(), "balanced");
        assert_eq!(out["changes"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn keywords_become_spec_fields() {
        let spec = extract_spec(
            "A 5nm data center training chip, 75W, 16 clusters, HBM3, PCIe and Ethernet",
        );
        assert_eq!(spec.process_node, "5nm");
        assert_eq!(spec.power_budget, 75.0);
        assert_eq!(spec.num_npu_clusters, 16);
        assert_eq!(spec.memory_type, MemoryType::Hbm3);
        assert_eq!(spec.standards, ["PCIe", "Ethernet"]);
        assert_eq!(spec.performance_goal.as_deref(), Some("Data Center AI"));
        assert_eq!(spec.compute_type.as_deref(), Some("Training"));
    }

    #[test]
    fn spaced_units_and_defaults() {
        let spec = extract_spec("edge inference camera at 2.5 watts with usb");
        assert_eq!(spec.power_budget, 2.5);
        assert_eq!(spec.process_node, "28nm");
        assert_eq!(spec.standards, ["USB"]);
        assert_eq!(spec.purpose, "Edge AI Accelerator");
    }
}
