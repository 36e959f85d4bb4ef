//! Central moments and the ten Hu-style invariants.
//!
//! The third-order expansions and the single-precision rounding in `mu20` /
//! `mu02` are kept exactly as calibrated; the acceptance ranges used by the
//! classifier were tuned against this arithmetic, not against the textbook
//! central-moment definitions.

use crate::image::PixelGrid;
use crate::moments::raw::RawMoments;
use crate::util::math::{norm_pow, sq};

/// Translation-invariant moments derived from `RawMoments`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentralMoments {
    /// Weighted pixel count, equal to `m00`.
    pub mu00: f64,
    /// Mixed second central moment.
    pub mu11: f64,
    /// Second central moment along rows.
    pub mu20: f64,
    /// Second central moment along columns.
    pub mu02: f64,
    /// Third central moment along rows.
    pub mu30: f64,
    /// Third central moment along columns.
    pub mu03: f64,
    /// Mixed third central moment, column order 2.
    pub mu12: f64,
    /// Mixed third central moment, row order 2.
    pub mu21: f64,
}

impl CentralMoments {
    /// Derives central moments; every field is non-finite when `m00` is zero.
    pub fn from_raw(raw: &RawMoments) -> Self {
        let ci = raw.centroid_i();
        let cj = raw.centroid_j();

        // The subtracted term passes through f32 before widening again.
        let mu20 = raw.m20 - f64::from((sq(raw.m10) / raw.m00) as f32);
        let mu02 = raw.m02 - f64::from((sq(raw.m01) / raw.m00) as f32);
        let mu11 = raw.m11 - raw.m10 * raw.m01 / raw.m00;

        let mu30 = raw.m30 - 3.0 * raw.m20 * ci + 2.0 * raw.m10 * sq(ci);
        let mu03 = raw.m03 - 3.0 * raw.m02 * cj + 2.0 * raw.m01 * sq(cj);
        let mu12 = raw.m12 - 2.0 * raw.m11 * cj - raw.m02 * ci + 2.0 * raw.m10 * sq(cj);
        let mu21 = raw.m21 - 2.0 * raw.m11 * ci - raw.m20 * cj + 2.0 * raw.m01 * sq(ci);

        Self {
            mu00: raw.m00,
            mu11,
            mu20,
            mu02,
            mu30,
            mu03,
            mu12,
            mu21,
        }
    }
}

/// The ten invariants `M1..M10`, each normalized by a power of `m00`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HuInvariants {
    values: [f64; 10],
}

impl HuInvariants {
    /// Evaluates all ten combinations.
    pub fn from_central(c: &CentralMoments) -> Self {
        let m00 = c.mu00;
        let (mu20, mu02, mu11) = (c.mu20, c.mu02, c.mu11);
        let (mu30, mu03, mu12, mu21) = (c.mu30, c.mu03, c.mu12, c.mu21);

        let m1 = (mu20 + mu02) / norm_pow(m00, 2);
        let m2 = (sq(mu20 - mu02) + 4.0 * sq(mu11)) / norm_pow(m00, 4);
        let m3 = (sq(mu30 - 3.0 * mu12) + sq(3.0 * mu21 - mu03)) / norm_pow(m00, 5);
        let m4 = (sq(mu30 + mu12) + sq(mu21 + mu03)) / norm_pow(m00, 5);
        let m5 = ((mu30 - 3.0 * mu12)
            * (mu30 + mu12)
            * (sq(mu30 + mu12) - 3.0 * sq(mu21 + mu03))
            + (3.0 * mu21 - mu03) * (mu21 + mu03) * (3.0 * sq(mu30 + mu12) - sq(mu21 + mu03)))
            / norm_pow(m00, 10);
        let m6 = ((mu20 - mu02) * (sq(mu30 + mu12) - sq(mu21 + mu03))
            + 4.0 * mu11 * (mu30 + mu12) * (mu21 + mu03))
            / norm_pow(m00, 7);
        let m7 = (mu20 * mu02 - sq(mu11)) / norm_pow(m00, 4);
        let m8 = (mu30 * mu12 + mu21 * mu03 - sq(mu12) - sq(mu21)) / norm_pow(m00, 5);
        let m9 = (mu20 * (mu21 * mu03 - sq(mu12)) + mu02 * (mu03 * mu12 - sq(mu21))
            - mu11 * (mu30 * mu03 - mu21 * mu12))
            / norm_pow(m00, 7);
        let m10 = (sq(mu30 * mu03 - mu12 * mu21)
            - 4.0 * (mu30 * mu12 - sq(mu21)) * (mu03 * mu21 - mu12))
            / norm_pow(m00, 10);

        Self {
            values: [m1, m2, m3, m4, m5, m6, m7, m8, m9, m10],
        }
    }

    /// Returns invariant `M{order}` for `order` in `1..=10`.
    pub fn get(&self, order: usize) -> Option<f64> {
        order.checked_sub(1).and_then(|idx| self.values.get(idx).copied())
    }

    /// All ten invariants, `M1` first.
    pub fn as_array(&self) -> [f64; 10] {
        self.values
    }

    /// Invariant `M1`.
    pub fn m1(&self) -> f64 {
        self.values[0]
    }
    /// Invariant `M2`.
    pub fn m2(&self) -> f64 {
        self.values[1]
    }
    /// Invariant `M3`.
    pub fn m3(&self) -> f64 {
        self.values[2]
    }
    /// Invariant `M4`.
    pub fn m4(&self) -> f64 {
        self.values[3]
    }
    /// Invariant `M5`.
    pub fn m5(&self) -> f64 {
        self.values[4]
    }
    /// Invariant `M6`.
    pub fn m6(&self) -> f64 {
        self.values[5]
    }
    /// Invariant `M7`.
    pub fn m7(&self) -> f64 {
        self.values[6]
    }
    /// Invariant `M8`.
    pub fn m8(&self) -> f64 {
        self.values[7]
    }
    /// Invariant `M9`.
    pub fn m9(&self) -> f64 {
        self.values[8]
    }
    /// Invariant `M10`.
    pub fn m10(&self) -> f64 {
        self.values[9]
    }
}

/// Raw, central and invariant moments of one region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeDescriptor {
    /// Raw moments up to order three.
    pub raw: RawMoments,
    /// Central moments derived from `raw`.
    pub central: CentralMoments,
    /// Normalized invariants `M1..M10`.
    pub hu: HuInvariants,
}

impl ShapeDescriptor {
    /// Computes the full descriptor from the channel-0 samples of `grid`.
    pub fn from_grid(grid: &PixelGrid) -> Self {
        let raw = RawMoments::from_grid(grid);
        let central = CentralMoments::from_raw(&raw);
        let hu = HuInvariants::from_central(&central);
        Self { raw, central, hu }
    }
}

#[cfg(test)]
mod tests {
    use super::{CentralMoments, HuInvariants, ShapeDescriptor};
    use crate::image::PixelGrid;
    use crate::moments::raw::RawMoments;

    fn rect_grid(width: usize, height: usize) -> PixelGrid {
        // A background rectangle (weight 1) in the top-left corner of a
        // foreground canvas.
        PixelGrid::mono_from_fn(width + 3, height + 2, |row, col| {
            if row < height && col < width {
                0
            } else {
                255
            }
        })
        .unwrap()
    }

    #[test]
    fn rectangle_second_order_moments_match_closed_form() {
        let (w, h) = (4usize, 6usize);
        let raw = RawMoments::from_grid(&rect_grid(w, h));
        let c = CentralMoments::from_raw(&raw);
        let n = (w * h) as f64;
        assert_eq!(c.mu00, n);
        // Variance of 0..h-1 times the pixel count.
        let var_i = ((h * h - 1) as f64) / 12.0;
        let var_j = ((w * w - 1) as f64) / 12.0;
        assert!((c.mu20 - n * var_i).abs() < 1e-3);
        assert!((c.mu02 - n * var_j).abs() < 1e-3);
        assert!(c.mu11.abs() < 1e-9);
        // Symmetric in both axes.
        assert!(c.mu30.abs() < 1e-6);
        assert!(c.mu03.abs() < 1e-6);
    }

    #[test]
    fn rectangle_invariants_follow_second_order_formulas() {
        let grid = rect_grid(5, 3);
        let d = ShapeDescriptor::from_grid(&grid);
        let c = d.central;
        let n = c.mu00;
        assert!((d.hu.m1() - (c.mu20 + c.mu02) / (n * n)).abs() < 1e-12);
        assert!((d.hu.m7() - (c.mu20 * c.mu02 - c.mu11 * c.mu11) / n.powi(4)).abs() < 1e-12);
        assert!(d.hu.m1() > 0.0);
        assert!(d.hu.m7() > 0.0);
        assert_eq!(d.hu.get(1), Some(d.hu.m1()));
        assert_eq!(d.hu.get(10), Some(d.hu.m10()));
        assert_eq!(d.hu.get(0), None);
        assert_eq!(d.hu.get(11), None);
    }

    #[test]
    fn invariants_ignore_translation_of_background_region() {
        let a = PixelGrid::mono_from_fn(20, 20, |row, col| {
            if (2..7).contains(&row) && (3..11).contains(&col) {
                0
            } else {
                255
            }
        })
        .unwrap();
        let b = PixelGrid::mono_from_fn(20, 20, |row, col| {
            if (10..15).contains(&row) && (9..17).contains(&col) {
                0
            } else {
                255
            }
        })
        .unwrap();
        let ha = ShapeDescriptor::from_grid(&a).hu;
        let hb = ShapeDescriptor::from_grid(&b).hu;
        assert!((ha.m1() - hb.m1()).abs() < 1e-6);
        assert!((ha.m7() - hb.m7()).abs() < 1e-6);
    }

    #[test]
    fn zero_weight_region_propagates_non_finite_values() {
        let grid = PixelGrid::mono_from_fn(3, 3, |_, _| 255).unwrap();
        let d = ShapeDescriptor::from_grid(&grid);
        assert!(!d.hu.m6().is_finite());
        assert!(!d.hu.m7().is_finite());
        let hu = HuInvariants::from_central(&d.central);
        assert!(hu.as_array().iter().all(|v| !v.is_finite()));
    }
}
