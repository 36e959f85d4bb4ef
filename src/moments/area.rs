//! Pixel-count area and boundary-contact perimeter.

use crate::image::mask::{BACKGROUND, FOREGROUND};
use crate::image::PixelGrid;
use crate::region::neighbours_8;

/// Counts pixels whose channel-0 sample equals `value`.
pub fn get_area(grid: &PixelGrid, value: u8) -> usize {
    let mut area = 0usize;
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if grid.primary(row, col) == value {
                area += 1;
            }
        }
    }
    area
}

/// Counts interior background pixels with at least one foreground 8-neighbour.
///
/// Pixels on the outermost ring are never counted. This is a contact count,
/// not a contour length.
pub fn get_perimeter(grid: &PixelGrid) -> usize {
    let width = grid.width();
    let height = grid.height();
    let mut perimeter = 0usize;
    for row in 1..height.saturating_sub(1) {
        for col in 1..width.saturating_sub(1) {
            if grid.primary(row, col) != BACKGROUND {
                continue;
            }
            if neighbours_8(row, col, width, height).any(|(r, c)| grid.primary(r, c) == FOREGROUND)
            {
                perimeter += 1;
            }
        }
    }
    perimeter
}
