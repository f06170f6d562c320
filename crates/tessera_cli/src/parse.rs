//! `tessera parse`: free text to specification.

use tessera_diagnostics::DiagnosticSink;
use tessera_model::ChipSpecification;

use crate::pipeline;
use crate::{GlobalArgs, ParseArgs};

/// Runs the `tessera parse` command.
///
/// Prints the advisor's specification JSON, or writes it to `--output`.
/// When writing, the answer must deserialize as a specification; unknown
/// fields are ignored and missing ones take their defaults.
pub fn run(args: &ParseArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let text = args.text.join(" ");
    pipeline::status(global, "Parsing", format!("\"{text}\""));

    let advice = pipeline::advisor(&args.backend).parse_natural_language(&text);

    match &args.output {
        Some(path) => {
            let spec: ChipSpecification = serde_json::from_value(advice.body.clone())
                .map_err(|e| format!("answer is not a chip specification: {e}"))?;
            pipeline::write_json(path, &spec)?;
            pipeline::status(global, "Wrote", path.display());
        }
        None => pipeline::print_json(&advice.body)?,
    }

    let sink = DiagnosticSink::new();
    if let Some(diag) = advice.diagnostic() {
        sink.emit(diag);
    }
    pipeline::report(&sink, global);
    Ok(0)
}
