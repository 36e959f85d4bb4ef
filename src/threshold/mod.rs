//! Range tests that turn color or intensity grids into binary masks.

use crate::image::mask::{BACKGROUND, FOREGROUND};
use crate::image::{BinaryMask, PixelFormat, PixelGrid};
use crate::trace::{trace_event, trace_span};
use crate::util::{HumatchError, HumatchResult};

/// Inclusive per-channel bounds over half-scale HSV samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HsvBounds {
    /// Lower bounds for hue, saturation and value.
    pub lower: [u8; 3],
    /// Upper bounds for hue, saturation and value.
    pub upper: [u8; 3],
}

impl Default for HsvBounds {
    fn default() -> Self {
        Self {
            lower: [10, 0, 0],
            upper: [150, 255, 255],
        }
    }
}

impl HsvBounds {
    /// Creates bounds from lower and upper margins.
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// Fails if any lower bound exceeds its upper bound.
    pub fn validate(&self) -> HumatchResult<()> {
        if self.lower.iter().zip(self.upper.iter()).any(|(lo, hi)| lo > hi) {
            return Err(HumatchError::InvalidParameter(
                "hsv lower bound exceeds upper bound",
            ));
        }
        Ok(())
    }

    /// Returns `true` if every channel lies inside its inclusive range.
    #[inline]
    pub fn contains(&self, hsv: &[u8]) -> bool {
        hsv.iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(v, (lo, hi))| v >= lo && v <= hi)
    }
}

/// Marks pixels whose H, S and V all fall inside `bounds` as foreground.
pub fn apply_hsv_thresholding(hsv: &PixelGrid, bounds: &HsvBounds) -> HumatchResult<BinaryMask> {
    hsv.require_format(PixelFormat::Tricolor)?;
    let _span = trace_span!("apply_hsv_thresholding").entered();

    let data: Vec<u8> = hsv
        .data()
        .chunks_exact(3)
        .map(|px| {
            if bounds.contains(px) {
                FOREGROUND
            } else {
                BACKGROUND
            }
        })
        .collect();
    let grid = PixelGrid::new(data, hsv.width(), hsv.height(), PixelFormat::Mono)?;
    let mask = BinaryMask::from_grid_unchecked(grid);
    trace_event!("hsv_threshold", foreground = mask.count(FOREGROUND));
    Ok(mask)
}

/// Marks pixels whose channel-0 intensity is strictly above `threshold`.
pub fn apply_grayscale_thresholding(grid: &PixelGrid, threshold: u8) -> HumatchResult<BinaryMask> {
    let mut data = Vec::with_capacity(grid.width() * grid.height());
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            data.push(if grid.primary(row, col) > threshold {
                FOREGROUND
            } else {
                BACKGROUND
            });
        }
    }
    let out = PixelGrid::new(data, grid.width(), grid.height(), PixelFormat::Mono)?;
    Ok(BinaryMask::from_grid_unchecked(out))
}
