//! Fixed Verilog sources for the leaf modules.
//!
//! These modules are behavioral placeholders sized by parameters that the
//! generated top level overrides.

/// A compute cluster that counts cycles once started and raises `done_compute`.
pub const NPU_CLUSTER: &str = r#"module npu_cluster #(
    parameter CLUSTER_ID = 0,
    parameter MAC_UNITS = 256,
    parameter DATA_WIDTH = 128
)(
    input  wire                  clk,
    input  wire                  rst_n,
    input  wire                  start_compute,
    output reg                   done_compute,
    output wire [DATA_WIDTH-1:0] result_data
);
    reg [31:0] cycle_count;
    reg [15:0] mac_acc [0:MAC_UNITS-1];

    integer i;

    always @(posedge clk or negedge rst_n) begin
        if (!rst_n) begin
            cycle_count  <= 0;
            done_compute <= 0;
            for (i = 0; i < MAC_UNITS; i = i + 1) mac_acc[i] <= 0;
        end else if (start_compute) begin
            cycle_count <= cycle_count + 1;
            if (cycle_count > 100) done_compute <= 1;
        end
    end

    assign result_data = {{(DATA_WIDTH-32){1'b0}}, cycle_count} + CLUSTER_ID;

endmodule
"#;

/// A round-robin arbiter over a flattened master data bus.
pub const AXI_INTERCONNECT: &str = r#"module axi_interconnect #(
    parameter NUM_MASTERS = 4,
    parameter DATA_WIDTH = 128
)(
    input  wire                              clk,
    input  wire                              rst_n,
    input  wire [NUM_MASTERS*DATA_WIDTH-1:0] s_data,
    output reg  [DATA_WIDTH-1:0]             m_data,
    output reg  [3:0]                        master_id
);
    reg [3:0] grant;

    always @(posedge clk or negedge rst_n) begin
        if (!rst_n) begin
            grant     <= 0;
            m_data    <= 0;
            master_id <= 0;
        end else begin
            grant     <= (grant == NUM_MASTERS - 1) ? 4'd0 : grant + 4'd1;
            master_id <= grant;
            m_data    <= s_data[grant*DATA_WIDTH +: DATA_WIDTH];
        end
    end
endmodule
"#;

/// A transaction monitor that flags DRAM commands whenever the bus carries data.
pub const DDR_CONTROLLER: &str = r#"module ddr_controller #(
    parameter AXI_WIDTH = 128,
    parameter BUS_WIDTH = 64
)(
    input  wire                 sys_clk,
    input  wire                 rst_n,
    input  wire [AXI_WIDTH-1:0] axi_s_data,
    output reg                  dram_cmd_valid
);
    always @(posedge sys_clk or negedge rst_n) begin
        if (!rst_n) begin
            dram_cmd_valid <= 0;
        end else begin
            dram_cmd_valid <= |axi_s_data;
        end
    end
endmodule
"#;
