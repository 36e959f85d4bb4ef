//! Shape acceptance test over candidate regions.
//!
//! Each candidate box is cropped out of the mask, cleaned of background
//! clusters that touch the crop border, and measured: two Hu-style
//! invariants (`M6`, `M7`) and the ratio of foreground to background area.
//! A `ShapeTemplate` holds one strict open interval per measurement; a
//! region is confirmed only when all three fall inside.

use crate::image::mask::{BACKGROUND, FOREGROUND};
use crate::image::{BinaryMask, PixelGrid};
use crate::moments::{get_area, ShapeDescriptor};
use crate::region::{remove_clusters, BoundingBox};
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::{HumatchError, HumatchResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Strict open interval `(low, high)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcceptanceRange {
    /// Exclusive lower bound.
    pub low: f64,
    /// Exclusive upper bound.
    pub high: f64,
}

impl AcceptanceRange {
    /// Creates a range, rejecting non-finite or inverted bounds.
    pub fn new(low: f64, high: f64) -> HumatchResult<Self> {
        let range = Self { low, high };
        range.validate()?;
        Ok(range)
    }

    /// Range `(center - deviation, center + deviation)`.
    pub fn around(center: f64, deviation: f64) -> HumatchResult<Self> {
        Self::new(center - deviation, center + deviation)
    }

    /// Fails if either bound is non-finite or `low >= high`.
    pub fn validate(&self) -> HumatchResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(HumatchError::InvalidParameter(
                "acceptance range bounds must be finite",
            ));
        }
        if self.low >= self.high {
            return Err(HumatchError::InvalidParameter(
                "acceptance range low bound must be below high bound",
            ));
        }
        Ok(())
    }

    /// Midpoint of the interval.
    pub fn center(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Strict membership; NaN is never contained.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value > self.low && value < self.high
    }
}

/// Calibrated centre of the `M6` range.
pub const DEFAULT_M6_CENTER: f64 = 0.000384396;
/// Half-width of the `M6` range.
pub const DEFAULT_M6_DEVIATION: f64 = 0.001;
/// Calibrated centre of the `M7` range.
pub const DEFAULT_M7_CENTER: f64 = 0.022796325;
/// Half-width of the `M7` range.
pub const DEFAULT_M7_DEVIATION: f64 = 0.003;
/// Bounds of the foreground/background area ratio.
pub const DEFAULT_AREA_RATIO: (f64, f64) = (3.0, 5.0);

/// Acceptance ranges describing one shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeTemplate {
    /// Range for invariant `M6`.
    pub m6: AcceptanceRange,
    /// Range for invariant `M7`.
    pub m7: AcceptanceRange,
    /// Range for the foreground/background area ratio.
    pub area_ratio: AcceptanceRange,
}

impl Default for ShapeTemplate {
    fn default() -> Self {
        Self {
            m6: AcceptanceRange {
                low: DEFAULT_M6_CENTER - DEFAULT_M6_DEVIATION,
                high: DEFAULT_M6_CENTER + DEFAULT_M6_DEVIATION,
            },
            m7: AcceptanceRange {
                low: DEFAULT_M7_CENTER - DEFAULT_M7_DEVIATION,
                high: DEFAULT_M7_CENTER + DEFAULT_M7_DEVIATION,
            },
            area_ratio: AcceptanceRange {
                low: DEFAULT_AREA_RATIO.0,
                high: DEFAULT_AREA_RATIO.1,
            },
        }
    }
}

impl ShapeTemplate {
    /// Validates all three ranges.
    pub fn validate(&self) -> HumatchResult<()> {
        self.m6.validate()?;
        self.m7.validate()?;
        self.area_ratio.validate()
    }

    /// Applies the three range tests in order `M6`, `M7`, area ratio.
    pub fn accepts(&self, measurement: &RegionMeasurement) -> bool {
        self.m6.contains(measurement.m6)
            && self.m7.contains(measurement.m7)
            && self.area_ratio.contains(measurement.area_ratio)
    }
}

/// Quantities the template is tested against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionMeasurement {
    /// Invariant `M6` of the cleaned region.
    pub m6: f64,
    /// Invariant `M7` of the cleaned region.
    pub m7: f64,
    /// Foreground (255) pixel count.
    pub area_white: usize,
    /// Background (0) pixel count.
    pub area_black: usize,
    /// `area_white / area_black`, or 0 when there is no background pixel.
    pub area_ratio: f64,
}

impl RegionMeasurement {
    /// Measures an already cleaned region.
    pub fn from_region(region: &PixelGrid) -> Self {
        let descriptor = ShapeDescriptor::from_grid(region);
        let area_white = get_area(region, FOREGROUND);
        let area_black = get_area(region, BACKGROUND);
        let area_ratio = if area_black == 0 {
            0.0
        } else {
            area_white as f64 / area_black as f64
        };
        Self {
            m6: descriptor.hu.m6(),
            m7: descriptor.hu.m7(),
            area_white,
            area_black,
            area_ratio,
        }
    }
}

/// Outcome for one candidate box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegionVerdict {
    /// All three measurements fall inside the template.
    Accepted(RegionMeasurement),
    /// At least one measurement falls outside the template.
    Rejected(RegionMeasurement),
    /// The crop has zero width or height and cannot be measured.
    Degenerate,
}

impl RegionVerdict {
    /// Returns `true` for `Accepted`.
    pub fn is_accepted(&self) -> bool {
        matches!(self, RegionVerdict::Accepted(_))
    }
}

/// Crops `bbox` out of `mask` and removes background clusters touching the crop border.
///
/// The crop spans `[x1, x2) x [y1, y2)`: the inclusive maximum row and
/// column of the box are left out. Returns `None` for zero-sized crops.
pub fn extract_region(mask: &BinaryMask, bbox: &BoundingBox) -> HumatchResult<Option<PixelGrid>> {
    if !bbox.fits(mask.width(), mask.height()) {
        return Err(HumatchError::RoiOutOfBounds {
            x: bbox.x1,
            y: bbox.y1,
            width: bbox.span_x() + 1,
            height: bbox.span_y() + 1,
            img_width: mask.width(),
            img_height: mask.height(),
        });
    }
    let width = bbox.span_x();
    let height = bbox.span_y();
    if width == 0 || height == 0 {
        return Ok(None);
    }
    let crop = mask.grid().crop(bbox.x1, bbox.y1, width, height)?;
    remove_clusters(&crop, BACKGROUND, FOREGROUND).map(Some)
}

/// Template-driven region classifier.
#[derive(Clone, Debug, Default)]
pub struct RegionClassifier {
    template: ShapeTemplate,
    parallel: bool,
}

impl RegionClassifier {
    /// Creates a sequential classifier for `template`.
    pub fn new(template: ShapeTemplate) -> Self {
        Self {
            template,
            parallel: false,
        }
    }

    /// Analyses regions on the rayon pool when the `rayon` feature is enabled.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns `true` if per-region analysis may run in parallel.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the template in use.
    pub fn template(&self) -> &ShapeTemplate {
        &self.template
    }

    /// Crops, cleans, measures and tests one candidate box.
    pub fn evaluate(&self, mask: &BinaryMask, bbox: &BoundingBox) -> HumatchResult<RegionVerdict> {
        let Some(region) = extract_region(mask, bbox)? else {
            return Ok(RegionVerdict::Degenerate);
        };
        let measurement = RegionMeasurement::from_region(&region);
        trace_debug!(
            "region_measured",
            x1 = bbox.x1,
            y1 = bbox.y1,
            m6 = measurement.m6,
            m7 = measurement.m7,
            area_ratio = measurement.area_ratio
        );
        if self.template.accepts(&measurement) {
            Ok(RegionVerdict::Accepted(measurement))
        } else {
            Ok(RegionVerdict::Rejected(measurement))
        }
    }

    /// Evaluates every box, preserving input order.
    pub fn evaluate_all(
        &self,
        mask: &BinaryMask,
        boxes: &[BoundingBox],
    ) -> HumatchResult<Vec<RegionVerdict>> {
        #[cfg(feature = "rayon")]
        if self.parallel {
            return boxes
                .par_iter()
                .map(|bbox| self.evaluate(mask, bbox))
                .collect();
        }

        boxes.iter().map(|bbox| self.evaluate(mask, bbox)).collect()
    }

    /// Returns the subset of `boxes` whose regions match the template.
    pub fn analyse_rois(
        &self,
        mask: &BinaryMask,
        boxes: &[BoundingBox],
    ) -> HumatchResult<Vec<BoundingBox>> {
        let _span = trace_span!("analyse_rois", candidates = boxes.len()).entered();

        let verdicts = self.evaluate_all(mask, boxes)?;
        let degenerate = verdicts
            .iter()
            .filter(|v| matches!(v, RegionVerdict::Degenerate))
            .count();
        let confirmed: Vec<BoundingBox> = boxes
            .iter()
            .zip(verdicts.iter())
            .filter(|(_, verdict)| verdict.is_accepted())
            .map(|(bbox, _)| *bbox)
            .collect();

        trace_event!(
            "analyse_rois",
            confirmed = confirmed.len(),
            degenerate = degenerate
        );
        Ok(confirmed)
    }
}

/// Sequentially filters `boxes` with `template`.
pub fn analyse_rois(
    mask: &BinaryMask,
    boxes: &[BoundingBox],
    template: &ShapeTemplate,
) -> HumatchResult<Vec<BoundingBox>> {
    RegionClassifier::new(*template).analyse_rois(mask, boxes)
}

#[cfg(test)]
mod tests {
    use super::{
        extract_region, AcceptanceRange, RegionClassifier, RegionMeasurement, RegionVerdict,
        ShapeTemplate,
    };
    use crate::image::BinaryMask;
    use crate::region::BoundingBox;

    fn midpoint_measurement(template: &ShapeTemplate) -> RegionMeasurement {
        RegionMeasurement {
            m6: template.m6.center(),
            m7: template.m7.center(),
            area_white: 400,
            area_black: 100,
            area_ratio: template.area_ratio.center(),
        }
    }

    #[test]
    fn default_template_carries_calibrated_constants() {
        let template = ShapeTemplate::default();
        assert!((template.m6.center() - 0.000384396).abs() < 1e-12);
        assert!((template.m7.center() - 0.022796325).abs() < 1e-12);
        assert_eq!(template.area_ratio.center(), 4.0);
        assert!(template.validate().is_ok());
    }

    #[test]
    fn midpoints_are_accepted_and_each_perturbation_rejected() {
        let template = ShapeTemplate::default();
        let mid = midpoint_measurement(&template);
        assert!(template.accepts(&mid));

        let eps = 1e-9;
        let m6_out = RegionMeasurement {
            m6: template.m6.high + eps,
            ..mid
        };
        let m7_out = RegionMeasurement {
            m7: template.m7.low - eps,
            ..mid
        };
        let ratio_out = RegionMeasurement {
            area_ratio: template.area_ratio.high,
            ..mid
        };
        assert!(!template.accepts(&m6_out));
        assert!(!template.accepts(&m7_out));
        assert!(!template.accepts(&ratio_out));
    }

    #[test]
    fn nan_measurements_are_rejected() {
        let template = ShapeTemplate::default();
        let nan = RegionMeasurement {
            m6: f64::NAN,
            ..midpoint_measurement(&template)
        };
        assert!(!template.accepts(&nan));
    }

    #[test]
    fn range_validation_rejects_inverted_and_nan_bounds() {
        assert!(AcceptanceRange::new(1.0, 1.0).is_err());
        assert!(AcceptanceRange::new(2.0, 1.0).is_err());
        assert!(AcceptanceRange::new(f64::NAN, 1.0).is_err());
        assert!(AcceptanceRange::around(4.0, 1.0).unwrap().contains(4.5));
    }

    #[test]
    fn all_foreground_region_has_zero_area_ratio() {
        let mask = BinaryMask::from_fn(8, 8, |_, _| true).unwrap();
        let region = extract_region(&mask, &BoundingBox::new(1, 1, 6, 6).unwrap())
            .unwrap()
            .unwrap();
        let measurement = RegionMeasurement::from_region(&region);
        assert_eq!(measurement.area_black, 0);
        assert_eq!(measurement.area_ratio, 0.0);
    }

    #[test]
    fn zero_width_box_is_degenerate() {
        let mask = BinaryMask::from_fn(8, 8, |_, col| col == 3).unwrap();
        let classifier = RegionClassifier::default();
        let verdict = classifier
            .evaluate(&mask, &BoundingBox::new(3, 0, 3, 7).unwrap())
            .unwrap();
        assert_eq!(verdict, RegionVerdict::Degenerate);
    }

    #[test]
    fn out_of_bounds_box_is_an_error() {
        let mask = BinaryMask::background(4, 4).unwrap();
        let classifier = RegionClassifier::default();
        assert!(classifier
            .evaluate(&mask, &BoundingBox::new(0, 0, 4, 2).unwrap())
            .is_err());
    }

    #[test]
    fn crop_excludes_inclusive_max_row_and_column() {
        let mask = BinaryMask::from_fn(6, 6, |_, _| true).unwrap();
        let region = extract_region(&mask, &BoundingBox::new(1, 2, 4, 5).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!((region.width(), region.height()), (3, 3));
    }
}
