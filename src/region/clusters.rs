//! Removal of clusters that touch the grid border.

use crate::image::{PixelFormat, PixelGrid};
use crate::region::neighbours_8;
use crate::util::HumatchResult;

/// Replaces the 8-connected `in_value` cluster containing `seed` with `out_value`.
fn replace_cluster(
    grid: &mut PixelGrid,
    seed: (usize, usize),
    in_value: u8,
    out_value: u8,
    stack: &mut Vec<(usize, usize)>,
) {
    let (seed_row, seed_col) = seed;
    if grid.primary(seed_row, seed_col) != in_value {
        return;
    }
    let width = grid.width();
    let height = grid.height();

    grid.set(seed_row, seed_col, 0, out_value);
    stack.push(seed);
    while let Some((row, col)) = stack.pop() {
        for (r, c) in neighbours_8(row, col, width, height) {
            if grid.primary(r, c) == in_value {
                grid.set(r, c, 0, out_value);
                stack.push((r, c));
            }
        }
    }
}

/// Replaces every `in_value` cluster touching the border with `out_value`.
///
/// Border pixels are visited top and bottom rows first (left to right), then
/// left and right columns (top to bottom). Clusters that never reach the
/// border are left untouched. Equal `in_value` and `out_value` yield an
/// unchanged copy.
pub fn remove_clusters(grid: &PixelGrid, in_value: u8, out_value: u8) -> HumatchResult<PixelGrid> {
    grid.require_format(PixelFormat::Mono)?;
    let mut out = grid.clone();
    if in_value == out_value {
        return Ok(out);
    }

    let width = grid.width();
    let height = grid.height();
    let mut stack = Vec::new();
    for col in 0..width {
        replace_cluster(&mut out, (0, col), in_value, out_value, &mut stack);
        replace_cluster(&mut out, (height - 1, col), in_value, out_value, &mut stack);
    }
    for row in 0..height {
        replace_cluster(&mut out, (row, 0), in_value, out_value, &mut stack);
        replace_cluster(&mut out, (row, width - 1), in_value, out_value, &mut stack);
    }
    Ok(out)
}
