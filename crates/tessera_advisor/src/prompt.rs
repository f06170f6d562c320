//! Prompt text sent to advisory backends.

use tessera_feasibility::AnalysisResult;
use tessera_model::ChipSpecification;

/// Standing instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a semiconductor architecture reviewer. You analyze chip specifications \
and suggest optimizations.

Rules:
1. Answer with a single JSON value and nothing else.
2. Only name standard IP blocks and interfaces (AMBA, PCIe, DDR, HBM).
3. Give the causal reasoning behind every suggestion.
4. When a value is unknown, pick a default appropriate for the process node.";

/// Builds the architecture review prompt.
pub fn analyze_prompt(spec: &ChipSpecification, analysis: &AnalysisResult) -> String {
    let partitioning = if spec.multi_die_partitioning {
        "Multi-die partitioning is ENABLED. Discuss how splitting the design into \
         chiplets affects yield and how die-to-die links carry cross-die traffic."
    } else {
        "Multi-die partitioning is DISABLED; treat the design as one monolithic die."
    };
    format!(
        "Review this accelerator design.\n\n\
         Specification:\n{}\n\n\
         Preliminary analysis:\n{}\n\n\
         {partitioning}\n\n\
         Answer with this JSON shape:\n\
         {{\"summary\": string, \"bottlenecks\": [string], \"reasoning\": string, \
         \"suggestions\": [{{\"parameter\": string, \"action\": string, \"value\": string, \"reason\": string}}]}}",
        to_json(spec),
        to_json(analysis),
    )
}

/// Builds the optimization prompt for a goal such as `"power"` or `"performance"`.
pub fn optimize_prompt(spec: &ChipSpecification, goal: &str) -> String {
    format!(
        "Optimize this specification for goal: {}\n\n\
         Specification:\n{}\n\n\
         Constraints: keep the design functionally equivalent; the process node may change.\n\n\
         Answer with this JSON shape:\n\
         {{\"optimized_spec\": {{...complete specification...}}, \
         \"changes\": [{{\"parameter\": string, \"old\": string, \"new\": string, \"reason\": string}}], \
         \"trade_offs\": string}}",
        goal.to_uppercase(),
        to_json(spec),
    )
}

/// Builds the prompt that turns a free-text request into a specification.
pub fn parse_prompt(text: &str) -> String {
    format!(
        "Convert this request into a chip specification.\n\
         Request: \"{text}\"\n\n\
         Extract or infer process_node, performance_goal, compute_type, power_budget (W), \
         standards, cooling_solution and packaging_type. Use sensible defaults for anything \
         missing (data center implies high power and an advanced node).\n\n\
         Answer with a JSON object using these keys: purpose, process_node, performance_goal, \
         compute_type, power_budget, standards, num_npu_clusters, mac_units_per_cluster, \
         packaging_type, temperature_range."
    )
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| String::from("{}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_prompt_embeds_spec_and_mode() {
        let spec = ChipSpecification {
            multi_die_partitioning: true,
            ..ChipSpecification::default()
        };
        let analysis = tessera_feasibility::analyze(&spec);
        let prompt = analyze_prompt(&spec, &analysis);
        assert!(prompt.contains("\"process_node\": \"28nm\""));
        assert!(prompt.contains("\"area_estimate\""));
        assert!(prompt.contains("ENABLED"));
    }

    #[test]
    fn optimize_prompt_uppercases_goal() {
        let prompt = optimize_prompt(&ChipSpecification::default(), "power");
        assert!(prompt.contains("goal: POWER"));
    }

    #[test]
    fn parse_prompt_quotes_request() {
        assert!(parse_prompt("5nm edge chip").contains("Request: \"5nm edge chip\""));
    }
}
