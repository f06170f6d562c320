//! Top-level module generation.

use std::collections::HashSet;
use tessera_model::{ArchitectureGraph, ChipSpecification, NodeKind};
use tessera_topology::ids::slug;

/// Returns the port names of the external IO pads, one per distinct standard.
///
/// Standards are slugged (`"USB 3.0"` becomes `usb_3_0_d`). Blank standards
/// and repeats of an already emitted slug are skipped.
pub fn io_ports(spec: &ChipSpecification) -> Vec<String> {
    let mut seen = HashSet::new();
    spec.standards
        .iter()
        .map(|s| slug(s))
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .map(|s| format!("{s}_d"))
        .collect()
}

/// Renders `top_chip.v`.
///
/// The memory controller is only instantiated when the graph carries one;
/// designs backed purely by on-chip SRAM leave it out.
pub fn top_chip(spec: &ChipSpecification, graph: &ArchitectureGraph) -> String {
    let has_ddr = graph.count_nodes(|k| matches!(k, NodeKind::MemoryController)) > 0;

    let mut v = String::new();
    v.push_str(&format!("// Top module for {}\n", spec.purpose));
    v.push_str(&format!(
        "// Params: {}, {}, {} NPU cluster(s), {} memory\n",
        spec.process_node,
        spec.clock(),
        spec.num_npu_clusters,
        spec.memory_type
    ));
    v.push_str(&format!(
        "// Topology: {} blocks, {} links\n\n",
        graph.nodes.len(),
        graph.edges.len()
    ));

    v.push_str("module top_chip #(\n");
    v.push_str(&format!(
        "    parameter NUM_CLUSTERS = {},\n",
        spec.num_npu_clusters
    ));
    v.push_str(&format!(
        "    parameter MAC_UNITS = {},\n",
        spec.mac_units_per_cluster
    ));
    v.push_str(&format!("    parameter AXI_WIDTH = {},\n", spec.axi_width));
    v.push_str(&format!("    parameter DDR_WIDTH = {}\n", spec.ddr_width));
    v.push_str(")(\n");
    v.push_str("    input  wire clk,\n");
    v.push_str("    input  wire rst_n,\n");
    for port in io_ports(spec) {
        v.push_str(&format!("    inout  wire {port},\n"));
    }
    v.push_str("    output wire [3:0] status_led\n");
    v.push_str(");\n\n");

    v.push_str(
        r#"    wire [NUM_CLUSTERS*AXI_WIDTH-1:0] axi_m_data;
    wire [AXI_WIDTH-1:0]              axi_s_data;
    wire [NUM_CLUSTERS-1:0]           cluster_done;
    wire [3:0]                        grant_id;
    wire                              dram_cmd_valid;

    genvar i;
    generate
        for (i = 0; i < NUM_CLUSTERS; i = i + 1) begin : CLUSTERS
            npu_cluster #(
                .CLUSTER_ID(i),
                .MAC_UNITS(MAC_UNITS),
                .DATA_WIDTH(AXI_WIDTH)
            ) u_npu (
                .clk(clk),
                .rst_n(rst_n),
                .start_compute(1'b1),
                .done_compute(cluster_done[i]),
                .result_data(axi_m_data[i*AXI_WIDTH +: AXI_WIDTH])
            );
        end
    endgenerate

    axi_interconnect #(
        .NUM_MASTERS(NUM_CLUSTERS),
        .DATA_WIDTH(AXI_WIDTH)
    ) u_noc (
        .clk(clk),
        .rst_n(rst_n),
        .s_data(axi_m_data),
        .m_data(axi_s_data),
        .master_id(grant_id)
    );

"#,
    );

    if has_ddr {
        v.push_str(
            r#"    ddr_controller #(
        .AXI_WIDTH(AXI_WIDTH),
        .BUS_WIDTH(DDR_WIDTH)
    ) u_ddr (
        .sys_clk(clk),
        .rst_n(rst_n),
        .axi_s_data(axi_s_data),
        .dram_cmd_valid(dram_cmd_valid)
    );

"#,
        );
    } else {
        v.push_str("    assign dram_cmd_valid = 1'b0;\n\n");
    }

    v.push_str("    assign status_led = {dram_cmd_valid, &cluster_done, grant_id[1:0]};\n\n");
    v.push_str("endmodule\n");
    v
}
