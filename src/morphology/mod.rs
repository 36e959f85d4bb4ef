//! Binary erosion and dilation with a square structuring element.
//!
//! Only pixels at least `radius` away from every edge are scanned as
//! centres; the outer ring is never eroded and never seeds a dilation. Both
//! passes read the unmodified input and write into a separate copy, so a
//! pass never observes its own output.

use crate::image::mask::{opposite, FOREGROUND};
use crate::image::BinaryMask;
use crate::trace::trace_span;
use crate::util::{HumatchError, HumatchResult};

/// Square structuring element with odd side length of at least 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructuringElement {
    size: usize,
}

impl StructuringElement {
    /// Creates a square element of side `size`.
    pub fn square(size: usize) -> HumatchResult<Self> {
        if size < 3 || size % 2 == 0 {
            return Err(HumatchError::InvalidStructuringElement { size });
        }
        Ok(Self { size })
    }

    /// Side length in pixels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the centre to the element edge.
    pub fn radius(&self) -> usize {
        (self.size - 1) / 2
    }
}

/// Centre range `radius..len - radius` along one axis (empty when too short).
fn interior(len: usize, radius: usize) -> std::ops::Range<usize> {
    radius..len.saturating_sub(radius)
}

fn binary_value(pixel_value: u8) -> HumatchResult<u8> {
    opposite(pixel_value).ok_or(HumatchError::InvalidParameter(
        "morphology pixel value must be 0 or 255",
    ))
}

/// Grows regions of `pixel_value` by stamping the full element around each
/// interior pixel that holds it.
pub fn apply_dilation(
    mask: &BinaryMask,
    mask_size: usize,
    pixel_value: u8,
) -> HumatchResult<BinaryMask> {
    let element = StructuringElement::square(mask_size)?;
    binary_value(pixel_value)?;
    let _span = trace_span!("apply_dilation", size = mask_size, value = pixel_value).entered();

    let radius = element.radius();
    let mut out = mask.clone();
    for row in interior(mask.height(), radius) {
        for col in interior(mask.width(), radius) {
            if mask.get(row, col) != pixel_value {
                continue;
            }
            for y in row - radius..=row + radius {
                for x in col - radius..=col + radius {
                    out.set(y, x, pixel_value == FOREGROUND);
                }
            }
        }
    }
    Ok(out)
}

/// Flips each interior `pixel_value` pixel whose neighbourhood contains the
/// opposite binary value.
pub fn apply_erosion(
    mask: &BinaryMask,
    mask_size: usize,
    pixel_value: u8,
) -> HumatchResult<BinaryMask> {
    let element = StructuringElement::square(mask_size)?;
    let opposite_value = binary_value(pixel_value)?;
    let _span = trace_span!("apply_erosion", size = mask_size, value = pixel_value).entered();

    let radius = element.radius();
    let mut out = mask.clone();
    for row in interior(mask.height(), radius) {
        for col in interior(mask.width(), radius) {
            if mask.get(row, col) != pixel_value {
                continue;
            }
            let erode = (row - radius..=row + radius)
                .any(|y| (col - radius..=col + radius).any(|x| mask.get(y, x) == opposite_value));
            if erode {
                out.set(row, col, opposite_value == FOREGROUND);
            }
        }
    }
    Ok(out)
}
