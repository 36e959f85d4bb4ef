//! Owned pixel grids and binary masks.
//!
//! `PixelGrid` is a dense, row-major, channel-interleaved buffer of `u8`
//! samples with explicit `(width, height, format)` metadata. Every transform
//! in this crate reads one grid and produces a new one; the only in-place
//! operations are `set`, `set_pixel` and the renderer. Sample accessors are
//! indexed by `(row, col, channel)` and check their coordinates with
//! `debug_assert!` only.

use crate::util::{HumatchError, HumatchResult};
use std::fmt;

#[cfg(feature = "image-io")]
pub mod io;
pub mod mask;
pub mod resize;

pub use mask::BinaryMask;

/// Channel layout of a pixel grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One sample per pixel (grayscale or binary mask).
    Mono,
    /// Three interleaved samples per pixel (BGR or HSV).
    Tricolor,
}

impl PixelFormat {
    /// Number of samples stored per pixel.
    pub const fn channels(self) -> usize {
        match self {
            PixelFormat::Mono => 1,
            PixelFormat::Tricolor => 3,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Mono => f.write_str("mono"),
            PixelFormat::Tricolor => f.write_str("tricolor"),
        }
    }
}

/// Owned contiguous 8-bit image with one or three channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    data: Vec<u8>,
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl PixelGrid {
    /// Wraps an existing sample buffer.
    ///
    /// The buffer must hold exactly `width * height * channels` samples.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> HumatchResult<Self> {
        let expected = sample_count(width, height, format)?;
        if data.len() != expected {
            return Err(HumatchError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Creates a grid with every sample set to `value`.
    pub fn filled(
        width: usize,
        height: usize,
        format: PixelFormat,
        value: u8,
    ) -> HumatchResult<Self> {
        let len = sample_count(width, height, format)?;
        Ok(Self {
            data: vec![value; len],
            width,
            height,
            format,
        })
    }

    /// Creates a single-channel grid from a per-pixel function of `(row, col)`.
    pub fn mono_from_fn<F>(width: usize, height: usize, mut f: F) -> HumatchResult<Self>
    where
        F: FnMut(usize, usize) -> u8,
    {
        let len = sample_count(width, height, PixelFormat::Mono)?;
        let mut data = Vec::with_capacity(len);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self::new(data, width, height, PixelFormat::Mono)
    }

    /// Creates a three-channel grid from a per-pixel function of `(row, col)`.
    pub fn tricolor_from_fn<F>(width: usize, height: usize, mut f: F) -> HumatchResult<Self>
    where
        F: FnMut(usize, usize) -> [u8; 3],
    {
        let len = sample_count(width, height, PixelFormat::Tricolor)?;
        let mut data = Vec::with_capacity(len);
        for row in 0..height {
            for col in 0..width {
                data.extend_from_slice(&f(row, col));
            }
        }
        Self::new(data, width, height, PixelFormat::Tricolor)
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the channel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the number of samples per pixel.
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Returns the raw interleaved samples.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the grid and returns the sample buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) outside {}x{} grid",
            self.width,
            self.height
        );
        (row * self.width + col) * self.format.channels()
    }

    /// Returns the sample at `(row, col, channel)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> u8 {
        debug_assert!(channel < self.format.channels());
        self.data[self.offset(row, col) + channel]
    }

    /// Returns channel 0 of the pixel at `(row, col)` for either format.
    #[inline]
    pub fn primary(&self, row: usize, col: usize) -> u8 {
        self.data[self.offset(row, col)]
    }

    /// Writes the sample at `(row, col, channel)` in place.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        debug_assert!(channel < self.format.channels());
        let idx = self.offset(row, col) + channel;
        self.data[idx] = value;
    }

    /// Returns all samples of the pixel at `(row, col)`.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> &[u8] {
        let start = self.offset(row, col);
        &self.data[start..start + self.format.channels()]
    }

    /// Overwrites all samples of the pixel at `(row, col)` in place.
    #[inline]
    pub fn set_pixel(&mut self, row: usize, col: usize, samples: &[u8]) {
        debug_assert_eq!(samples.len(), self.format.channels());
        let start = self.offset(row, col);
        let channels = self.format.channels();
        self.data[start..start + channels].copy_from_slice(samples);
    }

    /// Returns `true` if `(row, col)` touches the top, bottom, left or right edge.
    #[inline]
    pub fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 == self.height || col + 1 == self.width
    }

    /// Fails with `FormatMismatch` unless the grid has the `expected` layout.
    pub fn require_format(&self, expected: PixelFormat) -> HumatchResult<()> {
        if self.format != expected {
            return Err(HumatchError::FormatMismatch {
                expected,
                got: self.format,
            });
        }
        Ok(())
    }

    /// Copies the `width x height` rectangle whose top-left corner is `(x, y)`.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> HumatchResult<Self> {
        let out_of_bounds = HumatchError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        if width == 0 || height == 0 {
            return Err(HumatchError::InvalidDimensions { width, height });
        }
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let channels = self.format.channels();
        let row_len = width * channels;
        let mut data = Vec::with_capacity(row_len * height);
        for row in y..end_y {
            let start = self.offset(row, x);
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Self::new(data, width, height, self.format)
    }
}

fn sample_count(width: usize, height: usize, format: PixelFormat) -> HumatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(HumatchError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(format.channels()))
        .ok_or(HumatchError::InvalidDimensions { width, height })
}
