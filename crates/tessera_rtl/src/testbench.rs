//! Simulation testbench generation.

use tessera_model::ChipSpecification;

/// Half clock period in nanoseconds used when the spec frequency is unusable.
const FALLBACK_HALF_PERIOD_NS: f64 = 5.0;

/// Renders a self-contained testbench module `tb_top_chip` for `top_chip`.
///
/// The generated clock toggles at the specification's target frequency.
/// The bench releases reset after 20 ns, runs for 1 µs and dumps a VCD
/// waveform.
pub fn generate_testbench(spec: &ChipSpecification) -> String {
    let half_period = spec.clock().period_ns() / 2.0;
    let half_period = if half_period.is_finite() && half_period > 0.0 {
        half_period
    } else {
        FALLBACK_HALF_PERIOD_NS
    };

    let mut v = String::new();
    v.push_str(&format!("// Testbench for {}\n", spec.purpose));
    v.push_str("`timescale 1ns/1ps\n\n");
    v.push_str("module tb_top_chip;\n");
    v.push_str("    reg clk;\n");
    v.push_str("    reg rst_n;\n");
    v.push_str("    wire [3:0] status_led;\n\n");
    v.push_str(
        "    top_chip u_dut (\n        .clk(clk),\n        .rst_n(rst_n),\n        .status_led(status_led)\n    );\n\n",
    );
    v.push_str(&format!(
        "    always #{half_period:.3} clk = ~clk; // {}\n\n",
        spec.clock()
    ));
    v.push_str(
        r#"    initial begin
        $dumpfile("waveform.vcd");
        $dumpvars(0, tb_top_chip);

        clk = 0;
        rst_n = 0;
        #20 rst_n = 1;

        #1000;
        $finish;
    end

endmodule
"#,
    );
    v
}
