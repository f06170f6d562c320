//! Placement engine for the floorplan pipeline.
//!
//! Splits enriched blocks into a core set and a boundary set. The core set is
//! packed into rows by the greedy largest-first packer in `grid`, which
//! also fixes the chip outline. The boundary set is then distributed around
//! the chip edge by `ring`.

mod grid;
mod ring;

use crate::codes;
use crate::data::{Block, Region};
use crate::enrich::EnrichedBlock;
use tessera_common::Rect;
use tessera_config::FloorplanConfig;
use tessera_diagnostics::{Diagnostic, DiagnosticSink};

pub use grid::{core_block_size, pack_core, CorePacking};
pub use ring::place_ring;

/// The outcome of placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Chip width, truncated to whole layout units.
    pub chip_width: f64,
    /// Chip height, truncated to whole layout units.
    pub chip_height: f64,
    /// The core region.
    pub core_region: Region,
    /// All placed blocks, core blocks first.
    pub blocks: Vec<Block>,
}

/// Places every enriched block.
pub fn place(
    enriched: &[EnrichedBlock],
    config: &FloorplanConfig,
    sink: &DiagnosticSink,
) -> Placement {
    let (boundary, core): (Vec<&EnrichedBlock>, Vec<&EnrichedBlock>) =
        enriched.iter().partition(|b| b.is_boundary());

    let packing = pack_core(&core, config);
    let inset = config.ring_thickness + config.core_margin;
    let chip_width = (packing.width + 2.0 * inset).trunc();
    let chip_height = (packing.height + 2.0 * inset).trunc();

    let core_region = Region {
        name: config.core_region_name.clone(),
        rect: Rect::new(inset, inset, packing.width, packing.height),
        color: config.core_region_color.clone(),
    };

    let mut blocks: Vec<Block> = packing
        .blocks
        .into_iter()
        .map(|mut b| {
            b.rect = b.rect.translated(inset, inset);
            b
        })
        .collect();
    let ring_start = blocks.len();
    blocks.extend(place_ring(&boundary, chip_width, chip_height, config));

    report_ring_overlaps(&blocks[ring_start..], sink);

    tracing::debug!(
        chip_width,
        chip_height,
        core = ring_start,
        boundary = blocks.len() - ring_start,
        "placement complete"
    );

    Placement {
        chip_width,
        chip_height,
        core_region,
        blocks,
    }
}

/// Notes crowded boundary rings with one summary; the overlap itself is left
/// in place.
///
/// Ring blocks are in perimeter order, so only neighbours (including the
/// last and first) are compared.
fn report_ring_overlaps(ring: &[Block], sink: &DiagnosticSink) {
    let n = ring.len();
    if n < 2 {
        return;
    }
    let pairs = if n == 2 { 1 } else { n };
    let overlapping: Vec<(&Block, &Block)> = (0..pairs)
        .map(|i| (&ring[i], &ring[(i + 1) % n]))
        .filter(|(a, b)| a.rect.overlaps(&b.rect))
        .collect();

    let Some((a, b)) = overlapping.first() else {
        return;
    };
    sink.emit(
        Diagnostic::note(
            codes::BOUNDARY_OVERLAP,
            format!(
                "{} neighbouring boundary block pair(s) overlap, starting with '{}' and '{}'",
                overlapping.len(),
                a.id,
                b.id
            ),
        )
        .with_help("the boundary ring is crowded; fewer IO blocks or a larger core spread them out"),
    );
}
