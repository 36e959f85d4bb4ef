//! Foreground component labeling and ROI proposal.

use crate::image::BinaryMask;
use crate::region::{neighbours_8, BoundingBox};
use crate::trace::{trace_event, trace_span};
use crate::util::{HumatchError, HumatchResult};

/// Size window applied to component extents before shape analysis.
///
/// Extents are `x2 - x1` and `y2 - y1`, so a single pixel has extent zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoiLimits {
    /// Minimum horizontal extent (inclusive).
    pub min_width: usize,
    /// Minimum vertical extent (inclusive).
    pub min_height: usize,
    /// Maximum horizontal extent (inclusive).
    pub max_width: usize,
    /// Maximum vertical extent (inclusive).
    pub max_height: usize,
}

impl RoiLimits {
    /// Creates limits from minimum and maximum extents.
    pub fn new(min_width: usize, min_height: usize, max_width: usize, max_height: usize) -> Self {
        Self {
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }

    /// Limits that accept every component of a `width x height` grid.
    pub fn unbounded(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Fails if a minimum exceeds its maximum.
    pub fn validate(&self) -> HumatchResult<()> {
        if self.min_width > self.max_width || self.min_height > self.max_height {
            return Err(HumatchError::InvalidParameter(
                "roi minimum extent exceeds maximum extent",
            ));
        }
        Ok(())
    }

    /// Returns `true` if the box extents fall inside the window.
    pub fn accepts(&self, bbox: &BoundingBox) -> bool {
        let w = bbox.span_x();
        let h = bbox.span_y();
        w >= self.min_width && h >= self.min_height && w <= self.max_width && h <= self.max_height
    }
}

/// One 8-connected foreground component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Component {
    /// Positive label id, assigned in row-major discovery order.
    pub label: u32,
    /// Tight bounding box of the component.
    pub bbox: BoundingBox,
    /// Number of pixels in the component.
    pub pixel_count: usize,
}

/// Label grid plus per-component summaries from one labeling pass.
#[derive(Clone, Debug)]
pub struct ComponentLabeling {
    labels: Vec<u32>,
    width: usize,
    height: usize,
    components: Vec<Component>,
}

impl ComponentLabeling {
    /// Label at `(row, col)`; `0` means background.
    pub fn label_at(&self, row: usize, col: usize) -> u32 {
        debug_assert!(row < self.height && col < self.width);
        self.labels[row * self.width + col]
    }

    /// Raw row-major label grid.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Components in discovery order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Fills the component containing `seed` with `label`, returning its box and size.
fn fill_component(
    mask: &BinaryMask,
    labels: &mut [u32],
    seed: (usize, usize),
    label: u32,
    stack: &mut Vec<(usize, usize)>,
) -> (BoundingBox, usize) {
    let width = mask.width();
    let height = mask.height();
    let (seed_row, seed_col) = seed;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (seed_col, seed_row, seed_col, seed_row);
    let mut count = 0usize;

    labels[seed_row * width + seed_col] = label;
    stack.push(seed);
    while let Some((row, col)) = stack.pop() {
        count += 1;
        min_x = min_x.min(col);
        min_y = min_y.min(row);
        max_x = max_x.max(col);
        max_y = max_y.max(row);

        for (r, c) in neighbours_8(row, col, width, height) {
            let idx = r * width + c;
            if labels[idx] == 0 && mask.is_foreground(r, c) {
                labels[idx] = label;
                stack.push((r, c));
            }
        }
    }

    let bbox = BoundingBox {
        x1: min_x,
        y1: min_y,
        x2: max_x,
        y2: max_y,
    };
    (bbox, count)
}

/// Labels every 8-connected foreground component of `mask`.
pub fn label_components(mask: &BinaryMask) -> ComponentLabeling {
    let width = mask.width();
    let height = mask.height();
    let mut labels = vec![0u32; width * height];
    let mut components = Vec::new();
    let mut stack = Vec::new();
    let mut next_label = 1u32;

    for row in 0..height {
        for col in 0..width {
            if labels[row * width + col] != 0 || !mask.is_foreground(row, col) {
                continue;
            }
            let (bbox, pixel_count) =
                fill_component(mask, &mut labels, (row, col), next_label, &mut stack);
            components.push(Component {
                label: next_label,
                bbox,
                pixel_count,
            });
            next_label += 1;
        }
    }

    ComponentLabeling {
        labels,
        width,
        height,
        components,
    }
}

/// Proposes one box per foreground component whose extents fit `limits`.
///
/// Boxes are returned in row-major discovery order of each component's first
/// pixel.
pub fn find_rois(mask: &BinaryMask, limits: &RoiLimits) -> Vec<BoundingBox> {
    let _span = trace_span!("find_rois", width = mask.width(), height = mask.height()).entered();

    let labeling = label_components(mask);
    let rois: Vec<BoundingBox> = labeling
        .components()
        .iter()
        .map(|component| component.bbox)
        .filter(|bbox| limits.accepts(bbox))
        .collect();

    trace_event!(
        "find_rois",
        components = labeling.components().len(),
        rois = rois.len()
    );
    rois
}
