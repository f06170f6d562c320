//! `tessera floorplan`: placement, routing and metrics.

use tessera_diagnostics::DiagnosticSink;
use tessera_floorplan::FloorplanResult;
use tessera_model::ArchitectureGraph;

use crate::pipeline;
use crate::{FloorplanArgs, GlobalArgs, ReportFormat};

/// Runs the `tessera floorplan` command.
///
/// The graph comes from a graph file or, with `--spec`, from synthesizing a
/// specification. Dangling edges are reported as notes. Returns exit code 0
/// unless an error diagnostic was emitted.
pub fn run(args: &FloorplanArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = pipeline::load_config(global)?;
    let graph = load_input(args, &config)?;
    pipeline::status(
        global,
        "Placing",
        format!("{} blocks, {} links", graph.nodes.len(), graph.edges.len()),
    );

    let sink = DiagnosticSink::new();
    let result = tessera_floorplan::layout_with(&graph, &config.floorplan, &sink);

    if let Some(path) = &args.output {
        pipeline::write_json(path, &result)?;
        pipeline::status(global, "Wrote", path.display());
    } else {
        match global.format {
            ReportFormat::Json => pipeline::print_json(&result)?,
            ReportFormat::Text => print!("{}", render_text(&result)),
        }
    }

    let errors = pipeline::report(&sink, global);
    Ok(if errors > 0 { 1 } else { 0 })
}

fn load_input(
    args: &FloorplanArgs,
    config: &tessera_config::SynthesisConfig,
) -> Result<ArchitectureGraph, Box<dyn std::error::Error>> {
    if let Some(spec_path) = &args.spec {
        let spec = tessera_model::load_spec(spec_path)?;
        return Ok(tessera_topology::synthesize_with(&spec, &config.topology));
    }
    match &args.graph {
        Some(path) => Ok(tessera_model::load_graph(path)?),
        None => Err("no graph file or --spec given".into()),
    }
}

fn render_text(result: &FloorplanResult) -> String {
    let m = &result.metrics;
    let mut out = format!(
        "Chip {:.0} x {:.0} ({:.2} mm²), {} blocks, {} routes\n",
        result.chip_width,
        result.chip_height,
        m.total_area_mm2,
        result.blocks.len(),
        result.routed_edges.len()
    );
    out.push_str(&format!("  throughput   {:.1} TOPS\n", m.estimated_tops));
    out.push_str(&format!("  bandwidth    {:.1} GB/s\n", m.memory_bandwidth_gbps));
    out.push_str(&format!("  latency      {:.2} ms\n", m.latency_ms));
    out.push_str(&format!(
        "  efficiency   {:.2} TOPS/W\n",
        m.efficiency_tops_per_watt
    ));
    let pb = &m.power_breakdown;
    out.push_str(&format!(
        "  power        compute {:.1} W, memory {:.1} W, io {:.1} W, interconnect {:.1} W\n",
        pb.compute, pb.memory, pb.io, pb.interconnect
    ));
    out.push_str(&format!(
        "  congestion   {}, utilization {}%\n",
        m.congestion, m.area_utilization_pct
    ));
    if !m.bottlenecks.is_empty() {
        out.push_str(&format!("  bottlenecks  {}\n", m.bottlenecks.join(", ")));
    }

    out.push('\n');
    for b in &result.blocks {
        out.push_str(&format!(
            "  {:<16} {:>7.1} {:>7.1} {:>6.1} x {:<6.1} {:?}\n",
            b.id, b.rect.x, b.rect.y, b.rect.width, b.rect.height, b.region
        ));
    }
    out
}
