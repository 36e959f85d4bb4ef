//! Axis-aligned candidate rectangles.

use crate::util::{HumatchError, HumatchResult};

/// Inclusive pixel rectangle `(x1, y1)`–`(x2, y2)` with `x1 <= x2`, `y1 <= y2`.
///
/// `x` runs along columns and `y` along rows of the grid the box came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Leftmost column.
    pub x1: usize,
    /// Topmost row.
    pub y1: usize,
    /// Rightmost column (inclusive).
    pub x2: usize,
    /// Bottom row (inclusive).
    pub y2: usize,
}

impl BoundingBox {
    /// Creates a box, rejecting inverted corners.
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> HumatchResult<Self> {
        if x1 > x2 || y1 > y2 {
            return Err(HumatchError::InvalidParameter(
                "bounding box corners are inverted",
            ));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Horizontal extent `x2 - x1` (zero for a one-column box).
    pub fn span_x(&self) -> usize {
        self.x2 - self.x1
    }

    /// Vertical extent `y2 - y1` (zero for a one-row box).
    pub fn span_y(&self) -> usize {
        self.y2 - self.y1
    }

    /// Returns `true` if both corners lie inside a `width x height` grid.
    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.x2 < width && self.y2 < height
    }

    /// Maps a box found on a grid downscaled to `percent` back to the
    /// input resolution, truncating each coordinate.
    pub fn rescale_from_percent(&self, percent: f64) -> HumatchResult<Self> {
        if !percent.is_finite() || percent <= 0.0 {
            return Err(HumatchError::InvalidParameter(
                "scale percent must be finite and positive",
            ));
        }
        let factor = percent / 100.0;
        let map = |c: usize| (c as f64 / factor) as usize;
        Ok(Self {
            x1: map(self.x1),
            y1: map(self.y1),
            x2: map(self.x2),
            y2: map(self.y2),
        })
    }
}
