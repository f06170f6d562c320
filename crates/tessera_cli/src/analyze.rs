//! `tessera analyze`: feasibility analysis and topology synthesis.

use std::path::Path;

use serde::Serialize;
use tessera_diagnostics::DiagnosticSink;
use tessera_feasibility::AnalysisResult;
use tessera_model::ArchitectureGraph;

use crate::pipeline;
use crate::{GlobalArgs, ReportFormat};

/// JSON shape of the analyze output.
#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    feasibility: &'a AnalysisResult,
    architecture: &'a ArchitectureGraph,
}

/// Runs the `tessera analyze` command.
///
/// Feasibility warnings are reported as diagnostics and do not fail the
/// command. Returns exit code 0 unless an error diagnostic was emitted.
pub fn run(spec_path: &Path, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = pipeline::load_config(global)?;
    let spec = tessera_model::load_spec(spec_path)?;
    pipeline::status(global, "Analyzing", &spec.purpose);

    let sink = DiagnosticSink::new();
    let feasibility = tessera_feasibility::analyze_with(&spec, &config.feasibility, &sink);
    let architecture = tessera_topology::synthesize_with(&spec, &config.topology);

    match global.format {
        ReportFormat::Json => pipeline::print_json(&AnalyzeOutput {
            feasibility: &feasibility,
            architecture: &architecture,
        })?,
        ReportFormat::Text => print!("{}", render_text(&feasibility, &architecture)),
    }

    let errors = pipeline::report(&sink, global);
    Ok(if errors > 0 { 1 } else { 0 })
}

fn render_text(feasibility: &AnalysisResult, graph: &ArchitectureGraph) -> String {
    let mut out = String::from("Feasibility\n");
    out.push_str(&format!("  area       {}\n", feasibility.area_estimate));
    out.push_str(&format!("  power      {}\n", feasibility.power_estimate));
    out.push_str(&format!("  max clock  {}\n", feasibility.max_freq_estimate));
    if feasibility.is_clean() {
        out.push_str("  no bound violated\n");
    } else {
        out.push_str(&format!("  {} warning(s)\n", feasibility.warnings.len()));
    }

    out.push_str(&format!(
        "\nTopology: {} blocks, {} links\n",
        graph.nodes.len(),
        graph.edges.len()
    ));
    for node in &graph.nodes {
        out.push_str(&format!("  {:<16} {}\n", node.id, node.label));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_model::ChipSpecification;

    #[test]
    fn text_lists_estimates_and_blocks() {
        let spec = ChipSpecification::default();
        let text = render_text(
            &tessera_feasibility::analyze(&spec),
            &tessera_topology::synthesize(&spec),
        );
        assert!(text.contains("area"));
        assert!(text.contains("Topology:"));
        assert!(text.contains("RISC-V Host"));
    }

    #[test]
    fn json_has_both_sections() {
        let spec = ChipSpecification::default();
        let feasibility = tessera_feasibility::analyze(&spec);
        let architecture = tessera_topology::synthesize(&spec);
        let json = serde_json::to_value(AnalyzeOutput {
            feasibility: &feasibility,
            architecture: &architecture,
        })
        .unwrap();
        assert!(json["feasibility"]["warnings"].is_array());
        assert!(json["architecture"]["nodes"].is_array());
    }
}
