//! Geometric moments, Hu-style invariants and simple area measures.
//!
//! Moments weight pixels with the inverted polarity of the mask convention:
//! a channel-0 sample of 255 (foreground) contributes 0 and every other
//! value contributes 1, so a region is described by its background-valued
//! pixels. For three-channel grids only channel 0 participates.
//!
//! A region without any weighted pixel has `m00 = 0`; centroids, central
//! moments and invariants then come out as NaN or infinity. That is not an
//! error: downstream range tests reject non-finite values.

mod area;
mod hu;
mod raw;

pub use area::{get_area, get_perimeter};
pub use hu::{CentralMoments, HuInvariants, ShapeDescriptor};
pub use raw::{moment_weight, raw_moment, RawMoments};
