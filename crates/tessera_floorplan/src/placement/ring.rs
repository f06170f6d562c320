//! Boundary ring placement.
//!
//! Boundary blocks are spread at equal steps along the chip perimeter,
//! walking the top edge left to right, the right edge downwards, the bottom
//! edge right to left and the left edge upwards. Each block is clamped inside
//! the chip. Neighbours may overlap when the ring holds more blocks than the
//! perimeter has room for; that is reported, not corrected.

use crate::data::{Block, BlockRegion};
use crate::enrich::EnrichedBlock;
use tessera_common::Rect;
use tessera_config::FloorplanConfig;

/// Places boundary blocks around a chip of the given size.
pub fn place_ring(
    boundary: &[&EnrichedBlock],
    chip_width: f64,
    chip_height: f64,
    config: &FloorplanConfig,
) -> Vec<Block> {
    if boundary.is_empty() {
        return Vec::new();
    }
    let (bw, bh) = (config.io_block.width, config.io_block.height);
    let inset = config.io_inset;
    let (w, h) = (chip_width, chip_height);
    let step = 2.0 * (w + h) / boundary.len() as f64;

    let mut pos = 0.0_f64;
    let mut blocks = Vec::with_capacity(boundary.len());
    for block in boundary {
        let (x, y) = if pos < w {
            (pos, inset)
        } else if pos < w + h {
            (w - bw - inset, pos - w)
        } else if pos < 2.0 * w + h {
            ((2.0 * w + h) - pos, h - bh - inset)
        } else {
            (inset, (2.0 * w + 2.0 * h) - pos)
        };

        blocks.push(Block {
            id: block.id.clone(),
            label: block.label.clone(),
            rect: Rect::new(clamp(x, w - bw), clamp(y, h - bh), bw, bh),
            region: BlockRegion::Io,
            domain: block.domain,
            power_density: block.weights.power,
        });
        pos += step;
    }
    blocks
}

/// Limits `v` to `[0, max]`, preferring 0 when `max` is negative.
fn clamp(v: f64, max: f64) -> f64 {
    v.min(max).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::BlockClass;
    use tessera_config::BlockWeights;
    use tessera_model::LogicDomain;

    fn io(id: &str) -> EnrichedBlock {
        EnrichedBlock {
            id: id.into(),
            label: id.into(),
            domain: LogicDomain::Digital,
            class: BlockClass::Io,
            weights: BlockWeights::new(3.0, 2.0, 0.0),
            is_bus: false,
        }
    }

    #[test]
    fn four_blocks_one_per_side() {
        let blocks: Vec<EnrichedBlock> = ["a", "b", "c", "d"].iter().map(|id| io(id)).collect();
        let refs: Vec<&EnrichedBlock> = blocks.iter().collect();
        // Perimeter 2000 on a 500x500 chip, step 500.
        let placed = place_ring(&refs, 500.0, 500.0, &FloorplanConfig::default());
        let origins: Vec<(f64, f64)> = placed.iter().map(|b| (b.rect.x, b.rect.y)).collect();
        assert_eq!(
            origins,
            [(0.0, 10.0), (440.0, 0.0), (450.0, 460.0), (10.0, 470.0)]
        );
        assert!(placed.iter().all(|b| b.region == BlockRegion::Io));
    }

    #[test]
    fn blocks_stay_inside_chip() {
        let blocks: Vec<EnrichedBlock> = (0..13).map(|i| io(&format!("io_{i}"))).collect();
        let refs: Vec<&EnrichedBlock> = blocks.iter().collect();
        let (w, h) = (380.0, 320.0);
        for b in place_ring(&refs, w, h, &FloorplanConfig::default()) {
            assert!(b.rect.x >= 0.0 && b.rect.right() <= w, "{:?}", b.rect);
            assert!(b.rect.y >= 0.0 && b.rect.bottom() <= h, "{:?}", b.rect);
            assert_eq!((b.rect.width, b.rect.height), (50.0, 30.0));
        }
    }

    #[test]
    fn tiny_chip_clamps_to_origin() {
        let block = io("x");
        let placed = place_ring(&[&block], 20.0, 20.0, &FloorplanConfig::default());
        assert_eq!((placed[0].rect.x, placed[0].rect.y), (0.0, 0.0));
    }

    #[test]
    fn empty_ring() {
        assert!(place_ring(&[], 100.0, 100.0, &FloorplanConfig::default()).is_empty());
    }
}
