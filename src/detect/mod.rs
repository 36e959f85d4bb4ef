//! Fixed detection pipeline over a BGR image.
//!
//! Stages: optional nearest-neighbour downscale, BGR to HSV, HSV range
//! threshold, erosion then dilation, component ROIs, template
//! classification. Confirmed boxes are reported both in the working
//! (downscaled) space and mapped back to the input resolution.

use crate::classify::{RegionClassifier, ShapeTemplate};
use crate::color::convert_to_hsv;
use crate::image::mask::opposite;
use crate::image::resize::downscale_nearest;
use crate::image::{BinaryMask, PixelFormat, PixelGrid};
use crate::morphology::{apply_dilation, apply_erosion, StructuringElement};
use crate::region::{find_rois, BoundingBox, RoiLimits};
use crate::threshold::{apply_hsv_thresholding, HsvBounds};
use crate::trace::{trace_event, trace_span};
use crate::util::{HumatchError, HumatchResult};

/// Configuration for the detection pipeline.
#[derive(Clone, Debug)]
pub struct DetectorConfig {
    /// Working resolution as a percentage of the input (100 = no scaling).
    pub scale_percent: f64,
    /// HSV range selecting foreground pixels.
    pub hsv: HsvBounds,
    /// Side of the square structuring element.
    pub morphology_size: usize,
    /// Mask value eroded and then dilated (0 or 255).
    pub morphology_value: u8,
    /// Minimum horizontal extent of a candidate.
    pub min_width: usize,
    /// Minimum vertical extent of a candidate.
    pub min_height: usize,
    /// Maximum horizontal extent; half the working width when `None`.
    pub max_width: Option<usize>,
    /// Maximum vertical extent; half the working height when `None`.
    pub max_height: Option<usize>,
    /// Acceptance ranges for the classifier.
    pub template: ShapeTemplate,
    /// Classify regions in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scale_percent: 100.0,
            hsv: HsvBounds::default(),
            morphology_size: 3,
            morphology_value: 0,
            min_width: 75,
            min_height: 50,
            max_width: None,
            max_height: None,
            template: ShapeTemplate::default(),
            parallel: false,
        }
    }
}

impl DetectorConfig {
    /// Checks every parameter before any pixel is touched.
    pub fn validate(&self) -> HumatchResult<()> {
        if !self.scale_percent.is_finite() || self.scale_percent <= 0.0 {
            return Err(HumatchError::InvalidParameter(
                "scale_percent must be finite and positive",
            ));
        }
        StructuringElement::square(self.morphology_size)?;
        if opposite(self.morphology_value).is_none() {
            return Err(HumatchError::InvalidParameter(
                "morphology_value must be 0 or 255",
            ));
        }
        self.hsv.validate()?;
        self.template.validate()?;
        if let Some(max_width) = self.max_width {
            if max_width < self.min_width {
                return Err(HumatchError::InvalidParameter(
                    "max_width must not be below min_width",
                ));
            }
        }
        if let Some(max_height) = self.max_height {
            if max_height < self.min_height {
                return Err(HumatchError::InvalidParameter(
                    "max_height must not be below min_height",
                ));
            }
        }
        Ok(())
    }

    /// Resolves the ROI size window for a working grid.
    pub fn roi_limits(&self, width: usize, height: usize) -> RoiLimits {
        RoiLimits::new(
            self.min_width,
            self.min_height,
            self.max_width.unwrap_or(width / 2),
            self.max_height.unwrap_or(height / 2),
        )
    }

    fn is_unscaled(&self) -> bool {
        self.scale_percent == 100.0
    }
}

/// Intermediate and final products of one detection run.
#[derive(Clone, Debug)]
pub struct Detection {
    /// Cleaned binary mask at working resolution.
    pub mask: BinaryMask,
    /// Size-filtered candidate boxes at working resolution.
    pub candidates: Vec<BoundingBox>,
    /// Confirmed boxes at working resolution.
    pub confirmed: Vec<BoundingBox>,
    /// Confirmed boxes mapped back to the input resolution.
    pub confirmed_original: Vec<BoundingBox>,
}

/// Runs the detection pipeline with a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct Detector {
    cfg: DetectorConfig,
}

impl Detector {
    /// Creates a detector with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: DetectorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    /// Builds the cleaned foreground mask for a working-resolution BGR grid.
    pub fn segment(&self, working: &PixelGrid) -> HumatchResult<BinaryMask> {
        let hsv = convert_to_hsv(working)?;
        let mask = apply_hsv_thresholding(&hsv, &self.cfg.hsv)?;
        let eroded = apply_erosion(&mask, self.cfg.morphology_size, self.cfg.morphology_value)?;
        apply_dilation(&eroded, self.cfg.morphology_size, self.cfg.morphology_value)
    }

    /// Detects template-shaped regions in a BGR image.
    pub fn detect(&self, image: &PixelGrid) -> HumatchResult<Detection> {
        self.cfg.validate()?;
        image.require_format(PixelFormat::Tricolor)?;
        let _span = trace_span!("detect", width = image.width(), height = image.height()).entered();

        let scaled;
        let working = if self.cfg.is_unscaled() {
            image
        } else {
            scaled = downscale_nearest(image, self.cfg.scale_percent)?;
            &scaled
        };

        let mask = self.segment(working)?;
        let limits = self.cfg.roi_limits(working.width(), working.height());
        let candidates = find_rois(&mask, &limits);

        let classifier = RegionClassifier::new(self.cfg.template).with_parallel(self.cfg.parallel);
        let confirmed = classifier.analyse_rois(&mask, &candidates)?;
        let confirmed_original = confirmed
            .iter()
            .map(|bbox| bbox.rescale_from_percent(self.cfg.scale_percent))
            .collect::<HumatchResult<Vec<_>>>()?;

        trace_event!(
            "detect",
            candidates = candidates.len(),
            confirmed = confirmed.len()
        );
        Ok(Detection {
            mask,
            candidates,
            confirmed,
            confirmed_original,
        })
    }
}
