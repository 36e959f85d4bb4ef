//! Binary foreground/background masks.

use crate::image::{PixelFormat, PixelGrid};
use crate::util::{HumatchError, HumatchResult};

/// Sample value marking a foreground pixel.
pub const FOREGROUND: u8 = 255;
/// Sample value marking a background pixel.
pub const BACKGROUND: u8 = 0;

/// Returns the other binary value, or `None` if `value` is not binary.
pub(crate) fn opposite(value: u8) -> Option<u8> {
    match value {
        FOREGROUND => Some(BACKGROUND),
        BACKGROUND => Some(FOREGROUND),
        _ => None,
    }
}

/// Single-channel grid restricted to the values `0` and `255`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    grid: PixelGrid,
}

impl BinaryMask {
    /// Validates an arbitrary grid as a binary mask.
    pub fn from_grid(grid: PixelGrid) -> HumatchResult<Self> {
        grid.require_format(PixelFormat::Mono)?;
        if let Some(idx) = grid
            .data()
            .iter()
            .position(|&v| v != FOREGROUND && v != BACKGROUND)
        {
            return Err(HumatchError::NonBinaryMask {
                value: grid.data()[idx],
                row: idx / grid.width(),
                col: idx % grid.width(),
            });
        }
        Ok(Self { grid })
    }

    /// Builds a mask from a predicate over `(row, col)`; `true` is foreground.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> HumatchResult<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let grid = PixelGrid::mono_from_fn(width, height, |row, col| {
            if f(row, col) {
                FOREGROUND
            } else {
                BACKGROUND
            }
        })?;
        Ok(Self { grid })
    }

    /// Creates an all-background mask.
    pub fn background(width: usize, height: usize) -> HumatchResult<Self> {
        let grid = PixelGrid::filled(width, height, PixelFormat::Mono, BACKGROUND)?;
        Ok(Self { grid })
    }

    /// Wraps a grid the caller has already restricted to binary values.
    pub(crate) fn from_grid_unchecked(grid: PixelGrid) -> Self {
        debug_assert_eq!(grid.format(), PixelFormat::Mono);
        debug_assert!(grid
            .data()
            .iter()
            .all(|&v| v == FOREGROUND || v == BACKGROUND));
        Self { grid }
    }

    /// Returns the mask width.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Returns the mask height.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Returns the sample at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.grid.primary(row, col)
    }

    /// Returns `true` if `(row, col)` is foreground.
    #[inline]
    pub fn is_foreground(&self, row: usize, col: usize) -> bool {
        self.grid.primary(row, col) == FOREGROUND
    }

    /// Marks `(row, col)` as foreground or background.
    pub fn set(&mut self, row: usize, col: usize, foreground: bool) {
        let value = if foreground { FOREGROUND } else { BACKGROUND };
        self.grid.set(row, col, 0, value);
    }

    /// Counts samples equal to `value`.
    pub fn count(&self, value: u8) -> usize {
        self.grid.data().iter().filter(|&&v| v == value).count()
    }

    /// Borrows the underlying grid.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Consumes the mask and returns the underlying grid.
    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }
}

impl AsRef<PixelGrid> for BinaryMask {
    fn as_ref(&self) -> &PixelGrid {
        &self.grid
    }
}
