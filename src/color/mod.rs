//! Per-pixel color-space conversions for BGR grids.
//!
//! HSV output uses the half-scale hue convention: hue in degrees is halved
//! and truncated so it fits a byte (0..=179), while saturation and value are
//! scaled to 0..=255 and truncated.

use crate::image::{PixelFormat, PixelGrid};
use crate::trace::trace_span;
use crate::util::math::{unit, wrap_hue_deg};
use crate::util::HumatchResult;

/// Luma weights applied to the blue, green and red samples.
const GRAY_WEIGHTS_BGR: [f64; 3] = [0.0722, 0.7152, 0.2126];

/// Converts one BGR pixel to half-scale HSV.
pub fn bgr_to_hsv(bgr: [u8; 3]) -> [u8; 3] {
    let blue = unit(bgr[0]);
    let green = unit(bgr[1]);
    let red = unit(bgr[2]);

    let c_max = red.max(green).max(blue);
    let c_min = red.min(green).min(blue);
    let delta = c_max - c_min;

    let hue = if delta == 0.0 {
        0.0
    } else if c_max == red {
        60.0 * (((green - blue) / delta) % 6.0)
    } else if c_max == green {
        60.0 * ((blue - red) / delta + 2.0)
    } else {
        60.0 * ((red - green) / delta + 4.0)
    };
    let hue = wrap_hue_deg(hue);

    let saturation = if c_max == 0.0 { 0.0 } else { delta / c_max };

    [
        (hue / 2.0) as u8,
        (saturation * 255.0) as u8,
        (c_max * 255.0) as u8,
    ]
}

/// Converts a BGR grid to half-scale HSV.
pub fn convert_to_hsv(grid: &PixelGrid) -> HumatchResult<PixelGrid> {
    grid.require_format(PixelFormat::Tricolor)?;
    let _span = trace_span!("convert_to_hsv", width = grid.width(), height = grid.height())
        .entered();

    let mut data = Vec::with_capacity(grid.data().len());
    for bgr in grid.data().chunks_exact(3) {
        data.extend_from_slice(&bgr_to_hsv([bgr[0], bgr[1], bgr[2]]));
    }
    PixelGrid::new(data, grid.width(), grid.height(), PixelFormat::Tricolor)
}

/// Converts a BGR grid to single-channel luma, truncating the weighted sum.
pub fn convert_to_grayscale(grid: &PixelGrid) -> HumatchResult<PixelGrid> {
    grid.require_format(PixelFormat::Tricolor)?;

    let data = grid
        .data()
        .chunks_exact(3)
        .map(|bgr| {
            let intensity = GRAY_WEIGHTS_BGR[0] * f64::from(bgr[0])
                + GRAY_WEIGHTS_BGR[1] * f64::from(bgr[1])
                + GRAY_WEIGHTS_BGR[2] * f64::from(bgr[2]);
            intensity as u8
        })
        .collect();
    PixelGrid::new(data, grid.width(), grid.height(), PixelFormat::Mono)
}
