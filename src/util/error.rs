//! Error types for humatch.

use crate::image::PixelFormat;
use thiserror::Error;

/// Result alias for humatch operations.
pub type HumatchResult<T> = std::result::Result<T, HumatchError>;

/// Errors that can occur when running humatch algorithms.
///
/// Every variant is a contract violation by the caller: there is no recovery
/// path other than retrying with corrected inputs. Degenerate regions are not
/// errors; the classifier simply rejects them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HumatchError {
    /// Width or height is zero, or the sample count overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The sample buffer length does not match the grid shape.
    #[error("buffer size mismatch: expected {expected} samples, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },
    /// The grid has the wrong channel layout for the requested operation.
    #[error("pixel format mismatch: expected {expected}, got {got}")]
    FormatMismatch {
        expected: PixelFormat,
        got: PixelFormat,
    },
    /// A grid offered as a binary mask holds a value outside `{0, 255}`.
    #[error("non-binary mask value {value} at row {row}, col {col}")]
    NonBinaryMask { value: u8, row: usize, col: usize },
    /// Structuring element size is even or smaller than 3.
    #[error("invalid structuring element size {size}: must be odd and >= 3")]
    InvalidStructuringElement { size: usize },
    /// A parameter is outside its allowed domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
    /// A rectangle does not fit inside the grid.
    #[error(
        "roi out of bounds: x={x}, y={y}, width={width}, height={height} for image {img_width}x{img_height}"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Image decoding or encoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
