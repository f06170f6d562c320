//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{BlockWeights, SynthesisConfig};
use std::path::Path;

/// File name looked up by [`load_project_config`].
pub const CONFIG_FILE_NAME: &str = "tessera.toml";

/// Loads and validates a configuration file at an explicit path.
pub fn load_config(path: &Path) -> Result<SynthesisConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "loading configuration");
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Loads `<project_dir>/tessera.toml`, or the built-in defaults if it does not exist.
pub fn load_project_config(project_dir: &Path) -> Result<SynthesisConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        load_config(&config_path)
    } else {
        tracing::debug!(dir = %project_dir.display(), "no {CONFIG_FILE_NAME}, using defaults");
        Ok(SynthesisConfig::default())
    }
}

/// Parses and validates a `tessera.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<SynthesisConfig, ConfigError> {
    let config: SynthesisConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are consistent.
fn validate_config(config: &SynthesisConfig) -> Result<(), ConfigError> {
    let feas = &config.feasibility;
    if feas.node(&feas.default_node).is_none() {
        return Err(ConfigError::UnknownDefaultNode(feas.default_node.clone()));
    }
    for (name, physics) in &feas.nodes {
        if physics.max_freq_ghz <= 0.0 || physics.power_factor <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "feasibility.nodes.{name} must have positive max_freq_ghz and power_factor"
            )));
        }
    }

    let topo = &config.topology;
    if topo.array_columns == 0 {
        return Err(ConfigError::ValidationError(
            "topology.array_columns must be positive".to_string(),
        ));
    }
    require_positive("topology.canvas_width", topo.canvas_width)?;
    require_positive("topology.canvas_height", topo.canvas_height)?;

    let fp = &config.floorplan;
    require_positive("floorplan.block_scale", fp.block_scale)?;
    require_positive("floorplan.block_aspect", fp.block_aspect)?;
    require_positive("floorplan.max_row_width", fp.max_row_width)?;
    require_positive("floorplan.fallback_core_size", fp.fallback_core_size)?;
    require_positive("floorplan.area_units_per_mm2", fp.area_units_per_mm2)?;
    if fp.utilization_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "floorplan.utilization_capacity must be positive".to_string(),
        ));
    }

    let w = &fp.weights;
    for (class, weights) in [
        ("gpu", &w.gpu),
        ("npu", &w.npu),
        ("npu_array_per_cluster", &w.npu_array_per_cluster),
        ("cpu", &w.cpu),
        ("interconnect", &w.interconnect),
        ("memory", &w.memory),
        ("io", &w.io),
        ("generic", &w.generic),
    ] {
        require_weights(class, weights)?;
    }
    let m = &fp.power_multipliers;
    require_non_negative("floorplan.power_multipliers.compute", m.compute)?;
    require_non_negative("floorplan.power_multipliers.memory", m.memory)?;
    require_non_negative("floorplan.power_multipliers.io", m.io)?;
    require_non_negative("floorplan.power_multipliers.interconnect", m.interconnect)?;
    require_non_negative("floorplan.power_target_w", fp.power_target_w)?;
    Ok(())
}

fn require_weights(class: &str, weights: &BlockWeights) -> Result<(), ConfigError> {
    require_non_negative(&format!("floorplan.weights.{class}.area"), weights.area)?;
    require_non_negative(&format!("floorplan.weights.{class}.power"), weights.power)?;
    require_non_negative(&format!("floorplan.weights.{class}.tops"), weights.tops)
}

fn require_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{field} must not be negative"
        )))
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{field} must be positive"
        )))
    }
}
