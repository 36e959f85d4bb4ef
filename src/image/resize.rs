//! Nearest-neighbour downscaling for either pixel format.
//!
//! The output size is `trunc(w * p / 100) x trunc(h * p / 100)` for a scale
//! of `p` percent. Output pixel `(x, y)` copies input pixel
//! `(trunc(x * w / ow), trunc(y * h / oh))`, so no new sample values are
//! introduced and binary masks stay binary.

use crate::image::PixelGrid;
use crate::util::{HumatchError, HumatchResult};

/// Rescales `grid` to `percent` of its size by nearest-neighbour sampling.
pub fn downscale_nearest(grid: &PixelGrid, percent: f64) -> HumatchResult<PixelGrid> {
    if !percent.is_finite() || percent <= 0.0 {
        return Err(HumatchError::InvalidParameter(
            "scale percent must be finite and positive",
        ));
    }

    let width = grid.width();
    let height = grid.height();
    let out_width = (width as f64 * percent / 100.0) as usize;
    let out_height = (height as f64 * percent / 100.0) as usize;
    if out_width == 0 || out_height == 0 {
        return Err(HumatchError::InvalidDimensions {
            width: out_width,
            height: out_height,
        });
    }

    let x_scale = width as f64 / out_width as f64;
    let y_scale = height as f64 / out_height as f64;
    let channels = grid.channels();
    let mut data = Vec::with_capacity(out_width * out_height * channels);
    for y in 0..out_height {
        let src_row = ((y as f64 * y_scale) as usize).min(height - 1);
        for x in 0..out_width {
            let src_col = ((x as f64 * x_scale) as usize).min(width - 1);
            data.extend_from_slice(grid.pixel(src_row, src_col));
        }
    }

    PixelGrid::new(data, out_width, out_height, grid.format())
}

#[cfg(test)]
mod tests {
    use super::downscale_nearest;
    use crate::image::{PixelFormat, PixelGrid};
    use crate::util::HumatchError;

    #[test]
    fn halving_picks_even_samples() {
        let grid = PixelGrid::mono_from_fn(4, 4, |row, col| (row * 4 + col) as u8).unwrap();
        let small = downscale_nearest(&grid, 50.0).unwrap();
        assert_eq!(small.width(), 2);
        assert_eq!(small.height(), 2);
        assert_eq!(small.data(), &[0, 2, 8, 10]);
    }

    #[test]
    fn full_scale_is_identity() {
        let grid =
            PixelGrid::tricolor_from_fn(5, 3, |row, col| [row as u8, col as u8, 9]).unwrap();
        let same = downscale_nearest(&grid, 100.0).unwrap();
        assert_eq!(same, grid);
    }

    #[test]
    fn vanishing_output_is_rejected() {
        let grid = PixelGrid::filled(3, 3, PixelFormat::Mono, 0).unwrap();
        let err = downscale_nearest(&grid, 10.0).err().unwrap();
        assert_eq!(
            err,
            HumatchError::InvalidDimensions {
                width: 0,
                height: 0,
            }
        );
        assert!(downscale_nearest(&grid, -5.0).is_err());
    }
}
