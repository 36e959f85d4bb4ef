//! Humatch is a CPU-first classical shape detector built on binary masks and
//! Hu-style moment invariants.
//!
//! The pipeline converts a BGR image to HSV, thresholds it into a binary
//! mask, cleans the mask with square erosion and dilation, proposes regions
//! from 8-connected components, and confirms each region against a template
//! of acceptance ranges. Per-region analysis can run in parallel via the
//! `rayon` feature; `image-io` adds file loading and saving.

pub mod classify;
pub mod color;
pub mod detect;
pub mod image;
pub mod lowlevel;
pub mod moments;
pub mod morphology;
pub mod region;
pub mod render;
pub mod threshold;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use classify::{analyse_rois, AcceptanceRange, RegionClassifier, RegionVerdict, ShapeTemplate};
pub use color::{convert_to_grayscale, convert_to_hsv};
pub use detect::{Detection, Detector, DetectorConfig};
pub use crate::image::{BinaryMask, PixelFormat, PixelGrid};
pub use moments::{get_area, get_perimeter, HuInvariants, ShapeDescriptor};
pub use morphology::{apply_dilation, apply_erosion};
pub use region::{find_rois, remove_clusters, BoundingBox, RoiLimits};
pub use render::{overlay_detections, show_rois};
pub use threshold::{apply_grayscale_thresholding, apply_hsv_thresholding, HsvBounds};
pub use util::{HumatchError, HumatchResult};
