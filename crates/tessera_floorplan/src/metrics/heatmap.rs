//! Power-density heatmap.

use crate::data::{Block, Heatmap, HEATMAP_SIZE};

/// Accumulates block power densities into a `HEATMAP_SIZE` square grid.
///
/// Each block lands in the cell containing its center. Centers outside the
/// chip are discarded, and a chip with zero width or height yields an empty
/// grid.
pub fn power_heatmap(blocks: &[Block], chip_width: f64, chip_height: f64) -> Heatmap {
    let mut grid = [[0.0; HEATMAP_SIZE]; HEATMAP_SIZE];
    if chip_width <= 0.0 || chip_height <= 0.0 {
        return grid;
    }
    for block in blocks {
        let center = block.rect.center();
        let (Some(col), Some(row)) = (
            cell_index(center.x, chip_width),
            cell_index(center.y, chip_height),
        ) else {
            continue;
        };
        grid[row][col] += block.power_density;
    }
    grid
}

/// Sums every cell of the grid.
pub fn heatmap_total(grid: &Heatmap) -> f64 {
    grid.iter().flatten().sum()
}

fn cell_index(coord: f64, extent: f64) -> Option<usize> {
    let cell = (coord / extent * HEATMAP_SIZE as f64).floor();
    if cell >= 0.0 && cell < HEATMAP_SIZE as f64 {
        Some(cell as usize)
    } else {
        None
    }
}
