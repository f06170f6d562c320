//! Greedy row packer for core blocks.

use crate::data::{Block, BlockRegion};
use crate::enrich::{BlockClass, EnrichedBlock};
use tessera_common::Rect;
use tessera_config::FloorplanConfig;

/// Core blocks packed relative to the core origin, plus the core size.
#[derive(Debug, Clone, PartialEq)]
pub struct CorePacking {
    /// Blocks positioned relative to the top-left of the core region.
    pub blocks: Vec<Block>,
    /// Core width, including the gap trailing each row.
    pub width: f64,
    /// Core height.
    pub height: f64,
}

/// Returns the width and height a core block is drawn with.
///
/// Size follows the area weight, except for memory blocks whose labels name
/// a stacked ("High-Bandwidth") or DDR part, which get fixed tall or wide
/// outlines.
pub fn core_block_size(block: &EnrichedBlock, config: &FloorplanConfig) -> (f64, f64) {
    if block.class == BlockClass::Memory {
        if block.label.contains("High-Bandwidth") {
            let s = config.high_bandwidth_block;
            return (s.width, s.height);
        }
        if block.label.contains("DDR") {
            let s = config.ddr_block;
            return (s.width, s.height);
        }
    }
    let area = block.weights.area;
    (
        area * config.block_scale,
        area * (config.block_scale * config.block_aspect),
    )
}

/// Packs core blocks largest-first into rows no wider than `max_row_width`.
///
/// A row wraps only once it holds at least one block, so a block wider than
/// the limit still gets a row of its own. Falls back to a square core of
/// `fallback_core_size` when nothing was placed.
pub fn pack_core(core: &[&EnrichedBlock], config: &FloorplanConfig) -> CorePacking {
    let mut order: Vec<&EnrichedBlock> = core.to_vec();
    order.sort_by(|a, b| b.weights.area.total_cmp(&a.weights.area));

    let gap = config.placement_gap;
    let mut cursor_x = 0.0_f64;
    let mut cursor_y = 0.0_f64;
    let mut row_height = 0.0_f64;
    let mut total_width = 0.0_f64;
    let mut total_height = 0.0_f64;
    let mut blocks = Vec::with_capacity(order.len());

    for block in order {
        let (w, h) = core_block_size(block, config);
        if cursor_x > 0.0 && cursor_x + w > config.max_row_width {
            cursor_x = 0.0;
            cursor_y += row_height + gap;
            row_height = 0.0;
        }

        blocks.push(Block {
            id: block.id.clone(),
            label: block.label.clone(),
            rect: Rect::new(cursor_x, cursor_y, w, h),
            region: BlockRegion::Core,
            domain: block.domain,
            power_density: block.weights.power,
        });

        row_height = row_height.max(h);
        cursor_x += w + gap;
        total_width = total_width.max(cursor_x);
        total_height = total_height.max(cursor_y + row_height);
    }

    CorePacking {
        blocks,
        width: if total_width > 0.0 {
            total_width
        } else {
            config.fallback_core_size
        },
        height: if total_height > 0.0 {
            total_height
        } else {
            config.fallback_core_size
        },
    }
}
