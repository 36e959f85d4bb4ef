//! Raw geometric moments with inverted foreground polarity.

use crate::image::mask::FOREGROUND;
use crate::image::PixelGrid;

/// Weight of a channel-0 sample: foreground counts 0, everything else 1.
#[inline]
pub fn moment_weight(sample: u8) -> f64 {
    if sample == FOREGROUND {
        0.0
    } else {
        1.0
    }
}

/// Evaluates `m(p, q) = sum_{i,j} i^p * j^q * w(pixel(i, j))` with `i` the
/// row and `j` the column index.
pub fn raw_moment(grid: &PixelGrid, p: i32, q: i32) -> f64 {
    let mut m = 0.0f64;
    for i in 0..grid.height() {
        let ip = (i as f64).powi(p);
        for j in 0..grid.width() {
            m += ip * (j as f64).powi(q) * moment_weight(grid.primary(i, j));
        }
    }
    m
}

/// Every raw moment up to order three, gathered in a single pass.
///
/// Each sum accumulates in the same row-major order as `raw_moment`, so
/// the fields match the one-at-a-time evaluation exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawMoments {
    /// Weighted pixel count.
    pub m00: f64,
    /// First moment along rows.
    pub m10: f64,
    /// First moment along columns.
    pub m01: f64,
    /// Mixed second moment.
    pub m11: f64,
    /// Second moment along rows.
    pub m20: f64,
    /// Second moment along columns.
    pub m02: f64,
    /// Third moment along rows.
    pub m30: f64,
    /// Third moment along columns.
    pub m03: f64,
    /// Mixed moment, row order 2.
    pub m21: f64,
    /// Mixed moment, column order 2.
    pub m12: f64,
}

impl RawMoments {
    /// Accumulates all moments over the channel-0 samples of `grid`.
    pub fn from_grid(grid: &PixelGrid) -> Self {
        let mut acc = Self::default();
        for i in 0..grid.height() {
            let i1 = i as f64;
            let i2 = i1 * i1;
            let i3 = i2 * i1;
            for j in 0..grid.width() {
                let w = moment_weight(grid.primary(i, j));
                let j1 = j as f64;
                let j2 = j1 * j1;
                let j3 = j2 * j1;
                acc.m00 += w;
                acc.m10 += i1 * w;
                acc.m01 += j1 * w;
                acc.m11 += i1 * j1 * w;
                acc.m20 += i2 * w;
                acc.m02 += j2 * w;
                acc.m30 += i3 * w;
                acc.m03 += j3 * w;
                acc.m21 += i2 * j1 * w;
                acc.m12 += i1 * j2 * w;
            }
        }
        acc
    }

    /// Row centroid `m10 / m00`; non-finite when `m00` is zero.
    pub fn centroid_i(&self) -> f64 {
        self.m10 / self.m00
    }

    /// Column centroid `m01 / m00`; non-finite when `m00` is zero.
    pub fn centroid_j(&self) -> f64 {
        self.m01 / self.m00
    }
}

#[cfg(test)]
mod tests {
    use super::{raw_moment, RawMoments};
    use crate::image::PixelGrid;

    #[test]
    fn foreground_pixels_carry_no_weight() {
        let grid = PixelGrid::mono_from_fn(3, 3, |row, col| {
            if row == 1 && col == 1 {
                0
            } else {
                255
            }
        })
        .unwrap();
        let raw = RawMoments::from_grid(&grid);
        assert_eq!(raw.m00, 1.0);
        assert_eq!(raw.m10, 1.0);
        assert_eq!(raw.m01, 1.0);
        assert_eq!(raw.centroid_i(), 1.0);
    }

    #[test]
    fn single_pass_matches_individual_sums() {
        let grid = PixelGrid::mono_from_fn(7, 5, |row, col| {
            if (row * 7 + col) % 3 == 0 {
                255
            } else {
                0
            }
        })
        .unwrap();
        let raw = RawMoments::from_grid(&grid);
        assert_eq!(raw.m00, raw_moment(&grid, 0, 0));
        assert_eq!(raw.m10, raw_moment(&grid, 1, 0));
        assert_eq!(raw.m01, raw_moment(&grid, 0, 1));
        assert_eq!(raw.m11, raw_moment(&grid, 1, 1));
        assert_eq!(raw.m20, raw_moment(&grid, 2, 0));
        assert_eq!(raw.m02, raw_moment(&grid, 0, 2));
        assert_eq!(raw.m30, raw_moment(&grid, 3, 0));
        assert_eq!(raw.m03, raw_moment(&grid, 0, 3));
        assert_eq!(raw.m21, raw_moment(&grid, 2, 1));
        assert_eq!(raw.m12, raw_moment(&grid, 1, 2));
    }

    #[test]
    fn all_foreground_grid_has_undefined_centroid() {
        let grid = PixelGrid::mono_from_fn(4, 4, |_, _| 255).unwrap();
        let raw = RawMoments::from_grid(&grid);
        assert_eq!(raw.m00, 0.0);
        assert!(raw.centroid_i().is_nan());
    }
}
