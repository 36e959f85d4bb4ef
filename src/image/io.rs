//! Convenience helpers for decoding and encoding grids via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Three-channel grids use
//! BGR sample order, so RGB buffers are swizzled on the way in and out.

use crate::image::{PixelFormat, PixelGrid};
use crate::util::{HumatchError, HumatchResult};
use std::path::Path;

/// Creates a BGR grid from an RGB image buffer.
pub fn grid_from_rgb_image(img: &image::RgbImage) -> HumatchResult<PixelGrid> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let mut data = Vec::with_capacity(width * height * 3);
    for px in img.pixels() {
        let [r, g, b] = px.0;
        data.extend_from_slice(&[b, g, r]);
    }
    PixelGrid::new(data, width, height, PixelFormat::Tricolor)
}

/// Creates a single-channel grid from a grayscale image buffer.
pub fn grid_from_gray_image(img: &image::GrayImage) -> HumatchResult<PixelGrid> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelGrid::new(img.as_raw().clone(), width, height, PixelFormat::Mono)
}

/// Loads an image from disk as a BGR grid.
pub fn load_bgr_image<P: AsRef<Path>>(path: P) -> HumatchResult<PixelGrid> {
    let img = image::open(path).map_err(|err| HumatchError::ImageIo {
        reason: err.to_string(),
    })?;
    grid_from_rgb_image(&img.to_rgb8())
}

/// Converts a grid into a `DynamicImage` (gray for mono, RGB for BGR grids).
pub fn grid_to_dynamic_image(grid: &PixelGrid) -> HumatchResult<image::DynamicImage> {
    let width = u32::try_from(grid.width())
        .map_err(|_| HumatchError::InvalidParameter("grid width exceeds u32"))?;
    let height = u32::try_from(grid.height())
        .map_err(|_| HumatchError::InvalidParameter("grid height exceeds u32"))?;
    let encode_err = || HumatchError::ImageIo {
        reason: "sample buffer does not match image dimensions".to_string(),
    };

    match grid.format() {
        PixelFormat::Mono => {
            let img = image::GrayImage::from_raw(width, height, grid.data().to_vec())
                .ok_or_else(encode_err)?;
            Ok(image::DynamicImage::ImageLuma8(img))
        }
        PixelFormat::Tricolor => {
            let mut rgb = Vec::with_capacity(grid.data().len());
            for bgr in grid.data().chunks_exact(3) {
                rgb.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
            }
            let img = image::RgbImage::from_raw(width, height, rgb).ok_or_else(encode_err)?;
            Ok(image::DynamicImage::ImageRgb8(img))
        }
    }
}

/// Encodes a grid to disk; the format is chosen from the file extension.
pub fn save_grid<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> HumatchResult<()> {
    let img = grid_to_dynamic_image(grid)?;
    img.save(path).map_err(|err| HumatchError::ImageIo {
        reason: err.to_string(),
    })
}
