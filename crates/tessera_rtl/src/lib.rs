//! Verilog emission for a finalized chip specification.
//!
//! Produces a parameterized `top_chip` module together with the leaf modules
//! it instantiates, plus a simulation testbench. This is plain template
//! substitution; no synthesis or checking of the emitted RTL takes place.
//!
//! # Usage
//!
//! ```ignore
//! use tessera_rtl::{generate_rtl, generate_testbench, write_files};
//!
//! let mut files = generate_rtl(&spec, &graph);
//! files.insert("tb_top_chip.v".into(), generate_testbench(&spec));
//! write_files(Path::new("rtl_out"), &files)?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod templates;
pub mod testbench;
pub mod top;

pub use error::RtlError;
pub use testbench::generate_testbench;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tessera_model::{ArchitectureGraph, ChipSpecification};

/// File name of the generated top-level module.
pub const TOP_FILE: &str = "top_chip.v";
/// File name of the NPU cluster module.
pub const NPU_CLUSTER_FILE: &str = "npu_cluster.v";
/// File name of the interconnect module.
pub const INTERCONNECT_FILE: &str = "axi_interconnect.v";
/// File name of the memory controller module.
pub const DDR_CONTROLLER_FILE: &str = "ddr_controller.v";
/// File name conventionally used for the testbench.
pub const TESTBENCH_FILE: &str = "tb_top_chip.v";

/// Generates every RTL file for the design, keyed by file name.
pub fn generate_rtl(
    spec: &ChipSpecification,
    graph: &ArchitectureGraph,
) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    files.insert(TOP_FILE.to_string(), top::top_chip(spec, graph));
    files.insert(NPU_CLUSTER_FILE.to_string(), templates::NPU_CLUSTER.to_string());
    files.insert(
        INTERCONNECT_FILE.to_string(),
        templates::AXI_INTERCONNECT.to_string(),
    );
    files.insert(
        DDR_CONTROLLER_FILE.to_string(),
        templates::DDR_CONTROLLER.to_string(),
    );
    tracing::debug!(files = files.len(), "rtl generated");
    files
}

/// Writes each file into `dir`, creating the directory if needed.
///
/// Returns the written paths in file-name order.
pub fn write_files(dir: &Path, files: &BTreeMap<String, String>) -> Result<Vec<PathBuf>, RtlError> {
    std::fs::create_dir_all(dir).map_err(|e| RtlError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(files.len());
    for (name, text) in files {
        let path = dir.join(name);
        std::fs::write(&path, text).map_err(|e| RtlError::Io {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "wrote rtl file");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ChipSpecification {
        ChipSpecification {
            purpose: "Edge Vision SoC".into(),
            process_node: "7nm".into(),
            num_npu_clusters: 4,
            axi_width: 256,
            ddr_width: 32,
            standards: vec!["PCIe".into(), "USB".into(), "MIPI CSI".into()],
            ..ChipSpecification::default()
        }
    }

    #[test]
    fn bundle_has_all_modules() {
        let s = spec();
        let files = generate_rtl(&s, &tessera_topology::synthesize(&s));
        let names: Vec<&str> = files.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            [INTERCONNECT_FILE, DDR_CONTROLLER_FILE, NPU_CLUSTER_FILE, TOP_FILE]
        );
        assert!(files[NPU_CLUSTER_FILE].contains("module npu_cluster"));
        assert!(files[INTERCONNECT_FILE].contains("module axi_interconnect"));
        assert!(files[DDR_CONTROLLER_FILE].contains("module ddr_controller"));
    }

    #[test]
    fn top_is_parameterized_from_spec() {
        let s = spec();
        let top = &generate_rtl(&s, &tessera_topology::synthesize(&s))[TOP_FILE];
        assert!(top.contains("// Top module for Edge Vision SoC"));
        assert!(top.contains("7nm"));
        assert!(top.contains("parameter NUM_CLUSTERS = 4,"));
        assert!(top.contains("parameter AXI_WIDTH = 256,"));
        assert!(top.contains("parameter DDR_WIDTH = 32"));
    }

    #[test]
    fn one_inout_per_standard() {
        let s = spec();
        let top = &generate_rtl(&s, &ArchitectureGraph::new())[TOP_FILE];
        assert_eq!(top.matches("inout").count(), 3);
        assert!(top.contains("inout  wire pcie_d,"));
        assert!(top.contains("inout  wire usb_d,"));
        assert!(top.contains("inout  wire mipi_csi_d,"));
    }

    #[test]
    fn writes_files_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("rtl");
        let s = spec();
        let mut files = generate_rtl(&s, &ArchitectureGraph::new());
        files.insert(TESTBENCH_FILE.to_string(), generate_testbench(&s));

        let written = write_files(&out, &files).unwrap();
        assert_eq!(written.len(), 5);
        let tb = std::fs::read_to_string(out.join(TESTBENCH_FILE)).unwrap();
        assert!(tb.contains("module tb_top_chip;"));
    }

    #[test]
    fn write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "x").unwrap();
        let err = write_files(&blocker, &generate_rtl(&spec(), &ArchitectureGraph::new()))
            .unwrap_err();
        assert!(matches!(err, RtlError::Io { .. }));
    }
}
