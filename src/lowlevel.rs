//! Low-level building blocks for custom detection pipelines.
//!
//! These items expose per-pixel conversions, component labeling, moment
//! accumulators and per-region classification steps beyond the high-level
//! `Detector` API. Most users should prefer the top-level `Detector` and
//! stage functions.

pub use crate::classify::{extract_region, RegionMeasurement};
pub use crate::color::bgr_to_hsv;
pub use crate::image::mask::{BACKGROUND, FOREGROUND};
pub use crate::image::resize::downscale_nearest;
pub use crate::moments::{moment_weight, raw_moment, CentralMoments, RawMoments};
pub use crate::morphology::StructuringElement;
pub use crate::region::{label_components, Component, ComponentLabeling};
pub use crate::render::{draw_rectangle, Bgr};
