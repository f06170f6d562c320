//! `tessera generate`: RTL and testbench emission.

use crate::pipeline;
use crate::{GenerateArgs, GlobalArgs, ReportFormat};

/// Runs the `tessera generate` command.
///
/// Synthesizes the topology, renders the Verilog files and writes them into
/// the output directory. Returns exit code 0 on success.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = pipeline::load_config(global)?;
    let spec = tessera_model::load_spec(&args.spec)?;
    pipeline::status(global, "Generating", &spec.purpose);

    let graph = tessera_topology::synthesize_with(&spec, &config.topology);
    let mut files = tessera_rtl::generate_rtl(&spec, &graph);
    if !args.no_testbench {
        files.insert(
            tessera_rtl::TESTBENCH_FILE.to_string(),
            tessera_rtl::generate_testbench(&spec),
        );
    }

    let written = tessera_rtl::write_files(&args.out, &files)?;
    match global.format {
        ReportFormat::Json => {
            let paths: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            pipeline::print_json(&paths)?;
        }
        ReportFormat::Text => {
            for path in &written {
                pipeline::status(global, "Created", path.display());
            }
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_rtl_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("chip.json");
        std::fs::write(&spec_path, r#"{"purpose": "Test SoC", "standards": ["PCIe"]}"#).unwrap();
        let args = GenerateArgs {
            spec: spec_path,
            out: dir.path().join("rtl"),
            no_testbench: false,
        };
        let global = crate::GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            format: ReportFormat::Text,
            config: None,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
        let top = std::fs::read_to_string(dir.path().join("rtl").join("top_chip.v")).unwrap();
        assert!(top.contains("inout  wire pcie_d,"));
        assert!(dir.path().join("rtl").join("tb_top_chip.v").exists());
    }
}
