//! Connected-component discovery and border-cluster cleanup.
//!
//! Both flood fills are 8-connected and iterative: pending pixels live on an
//! explicit `Vec` stack whose size is bounded by the grid area, so very large
//! components cannot exhaust the call stack. Pixels are marked when pushed,
//! which keeps every pixel on the stack at most once.

mod bbox;
pub(crate) mod clusters;
pub(crate) mod label;

pub use bbox::BoundingBox;
pub use clusters::remove_clusters;
pub use label::{find_rois, label_components, Component, ComponentLabeling, RoiLimits};

/// Offsets of the eight neighbours of a pixel as `(d_row, d_col)`.
const NEIGHBOURS_8: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Yields the in-bounds 8-neighbours of `(row, col)`.
pub(crate) fn neighbours_8(
    row: usize,
    col: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, usize)> {
    NEIGHBOURS_8.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < height && c < width).then_some((r, c))
    })
}

#[cfg(test)]
mod tests {
    use super::neighbours_8;

    #[test]
    fn corner_pixels_have_three_neighbours() {
        assert_eq!(neighbours_8(0, 0, 4, 4).count(), 3);
        assert_eq!(neighbours_8(3, 3, 4, 4).count(), 3);
        assert_eq!(neighbours_8(0, 2, 4, 4).count(), 5);
        assert_eq!(neighbours_8(1, 1, 4, 4).count(), 8);
    }
}
