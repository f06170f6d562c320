//! `tessera advise`: architecture review and optimization through the advisor.

use tessera_diagnostics::DiagnosticSink;

use crate::pipeline;
use crate::{AdviseArgs, GlobalArgs};

/// Runs the `tessera advise` command.
///
/// Without `--goal` the architecture is reviewed against a fresh feasibility
/// analysis; with it, an optimization for that goal is requested. The answer
/// is free-form JSON in either output format. A fallback to the local answer
/// is reported as a diagnostic. Returns exit code 0.
pub fn run(args: &AdviseArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = pipeline::load_config(global)?;
    let spec = tessera_model::load_spec(&args.spec)?;
    let advisor = pipeline::advisor(&args.backend);
    let sink = DiagnosticSink::new();

    let advice = match &args.goal {
        Some(goal) => {
            pipeline::status(global, "Optimizing", format!("{} for {goal}", spec.purpose));
            advisor.suggest_optimization(&spec, goal)
        }
        None => {
            pipeline::status(global, "Reviewing", &spec.purpose);
            let analysis = tessera_feasibility::analyze_with(&spec, &config.feasibility, &sink);
            advisor.analyze_architecture(&spec, &analysis)
        }
    };
    pipeline::print_json(&advice.body)?;

    if let Some(diag) = advice.diagnostic() {
        sink.emit(diag);
    }
    pipeline::report(&sink, global);
    Ok(0)
}
