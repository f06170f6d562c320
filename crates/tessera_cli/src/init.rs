//! `tessera init`: starter specification.

use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline;
use crate::GlobalArgs;

/// File written when no path is given.
const DEFAULT_SPEC_FILE: &str = "chip.toml";

/// Runs the `tessera init` command.
///
/// Writes a commented starter specification. Refuses to overwrite an
/// existing file unless `force` is set. Returns exit code 0 on success.
pub fn run(
    path: Option<PathBuf>,
    force: bool,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_SPEC_FILE));
    if path.exists() && !force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    write_starter_spec(&path)?;
    pipeline::status(global, "Created", path.display());
    Ok(0)
}

fn write_starter_spec(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, STARTER_SPEC)
}

const STARTER_SPEC: &str = r#"# Tessera chip specification.
# Every field is optional; omitted fields take the values shown here.

purpose = "AI Accelerator"

# Process node: "5nm", "7nm", "28nm", "65nm" or "130nm".
process_node = "28nm"

# Target clock in GHz. Strings such as "800MHz" are accepted too.
frequency = 1.0

# Power budget in watts.
power_budget = 5.0

# Compute.
num_npu_clusters = 1
mac_units_per_cluster = 256

# Interconnect data width in bits.
axi_width = 128

# External memory: DDR4, DDR5, LPDDR5, HBM2, HBM3 or SRAM (on-chip only).
memory_type = "DDR4"
ddr_width = 64
memory_channels = 1

# IO standards, one controller each.
standards = ["PCIe", "USB"]

voltage_target = 0.8
multi_die_partitioning = false
competition_mode = false
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportFormat;

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            format: ReportFormat::Text,
            config: None,
        }
    }

    #[test]
    fn starter_spec_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("specs").join("chip.toml");
        assert_eq!(run(Some(path.clone()), false, &quiet()).unwrap(), 0);

        let spec = tessera_model::load_spec(&path).unwrap();
        let defaults = tessera_model::ChipSpecification::default();
        assert_eq!(spec.process_node, defaults.process_node);
        assert_eq!(spec.num_npu_clusters, defaults.num_npu_clusters);
        assert_eq!(spec.memory_type, defaults.memory_type);
        assert_eq!(spec.standards, ["PCIe", "USB"]);
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chip.toml");
        fs::write(&path, "purpose = \"mine\"\n").unwrap();
        assert!(run(Some(path.clone()), false, &quiet()).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "purpose = \"mine\"\n");

        assert_eq!(run(Some(path.clone()), true, &quiet()).unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().starts_with("# Tessera"));
    }
}
