//! Power breakdown by block category.

use crate::data::PowerBreakdown;
use crate::enrich::{BlockClass, EnrichedBlock};
use tessera_config::FloorplanConfig;

/// Weighs block power per category and rescales the split to the target wattage.
///
/// When every weight is zero the breakdown stays all-zero.
pub fn power_breakdown(blocks: &[EnrichedBlock], config: &FloorplanConfig) -> PowerBreakdown {
    let m = &config.power_multipliers;
    let mut pb = PowerBreakdown::default();
    for block in blocks {
        let p = block.weights.power;
        match block.class {
            BlockClass::Compute => pb.compute += p * m.compute,
            BlockClass::Memory => pb.memory += p * m.memory,
            BlockClass::Io => pb.io += p * m.io,
            BlockClass::Interconnect => pb.interconnect += p * m.interconnect,
        }
    }

    let total = pb.total();
    if total > 0.0 {
        let scale = config.power_target_w / total;
        pb.compute *= scale;
        pb.memory *= scale;
        pb.io *= scale;
        pb.interconnect *= scale;
    }
    pb
}
