//! Conformance test helpers for the Tessera synthesis pipeline.
//!
//! Provides shared pipeline functions that run a specification through
//! feasibility analysis, topology synthesis and floorplanning and return
//! structured results for assertion in integration tests.

#![warn(missing_docs)]

use tessera_common::Point;
use tessera_config::SynthesisConfig;
use tessera_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use tessera_feasibility::AnalysisResult;
use tessera_floorplan::FloorplanResult;
use tessera_model::{ArchitectureGraph, ChipSpecification, Edge, LogicDomain, Node, NodeKind};

/// Result of running the full analyze → synthesize → floorplan pipeline.
pub struct PipelineResult {
    /// Feasibility report.
    pub analysis: AnalysisResult,
    /// Synthesized topology.
    pub graph: ArchitectureGraph,
    /// Floorplan of the synthesized topology.
    pub floorplan: FloorplanResult,
    /// All diagnostics emitted during the pipeline.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
    /// Number of note-severity diagnostics.
    pub note_count: usize,
}

/// Parses a specification from TOML text, panicking on invalid input.
pub fn spec_from_toml(src: &str) -> ChipSpecification {
    match toml::from_str(src) {
        Ok(spec) => spec,
        Err(e) => panic!("invalid test specification: {e}"),
    }
}

/// Runs every pipeline stage with the built-in configuration.
pub fn full_pipeline(spec: &ChipSpecification) -> PipelineResult {
    full_pipeline_with(spec, &SynthesisConfig::default())
}

/// Runs every pipeline stage with an explicit configuration.
pub fn full_pipeline_with(spec: &ChipSpecification, config: &SynthesisConfig) -> PipelineResult {
    let sink = DiagnosticSink::new();
    let analysis = tessera_feasibility::analyze_with(spec, &config.feasibility, &sink);
    let graph = tessera_topology::synthesize_with(spec, &config.topology);
    let floorplan = tessera_floorplan::layout_with(&graph, &config.floorplan, &sink);

    let diagnostics = sink.take_all();
    let count = |s: Severity| diagnostics.iter().filter(|d| d.severity == s).count();
    PipelineResult {
        warning_count: count(Severity::Warning),
        note_count: count(Severity::Note),
        analysis,
        graph,
        floorplan,
        diagnostics,
    }
}

/// Runs the full pipeline on a TOML specification.
pub fn full_pipeline_toml(src: &str) -> PipelineResult {
    full_pipeline(&spec_from_toml(src))
}

/// Builds an untyped node for hand-written graphs.
pub fn node(id: &str, label: &str) -> Node {
    Node {
        id: id.into(),
        kind: NodeKind::Unclassified,
        label: label.into(),
        domain: LogicDomain::Digital,
        position: Point::default(),
    }
}

/// Builds an edge with unit bandwidth weight.
pub fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        bandwidth_weight: 1,
    }
}

/// Returns `true` when every edge of the graph connects existing nodes.
pub fn is_consistent(graph: &ArchitectureGraph) -> bool {
    graph.dangling_edges().is_empty()
}
