//! Python bindings for the humatch shape detector.
//!
//! This module exposes the high-level humatch API to Python via PyO3.

use numpy::{
    PyArray1, PyArrayMethods, PyReadonlyArray2, PyReadonlyArray3, PyUntypedArrayMethods,
};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use humatch::{
    AcceptanceRange, BinaryMask, BoundingBox as RustBoundingBox, Detection as RustDetection,
    Detector, DetectorConfig as RustDetectorConfig, HsvBounds, HumatchError, PixelFormat,
    PixelGrid, RoiLimits, ShapeDescriptor, ShapeTemplate,
};

/// Convert a HumatchError to a Python exception.
fn to_py_err(err: HumatchError) -> PyErr {
    PyRuntimeError::new_err(err.to_string())
}

fn range_from_pair(pair: (f64, f64)) -> PyResult<AcceptanceRange> {
    AcceptanceRange::new(pair.0, pair.1).map_err(to_py_err)
}

/// Inclusive pixel rectangle.
#[pyclass]
#[derive(Clone)]
pub struct BoundingBox {
    /// Leftmost column.
    #[pyo3(get)]
    pub x1: usize,
    /// Topmost row.
    #[pyo3(get)]
    pub y1: usize,
    /// Rightmost column (inclusive).
    #[pyo3(get)]
    pub x2: usize,
    /// Bottom row (inclusive).
    #[pyo3(get)]
    pub y2: usize,
}

#[pymethods]
impl BoundingBox {
    /// Width and height as `(x2 - x1, y2 - y1)`.
    fn extent(&self) -> (usize, usize) {
        (self.x2 - self.x1, self.y2 - self.y1)
    }

    fn __repr__(&self) -> String {
        format!(
            "BoundingBox(x1={}, y1={}, x2={}, y2={})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

impl From<RustBoundingBox> for BoundingBox {
    fn from(b: RustBoundingBox) -> Self {
        Self {
            x1: b.x1,
            y1: b.y1,
            x2: b.x2,
            y2: b.y2,
        }
    }
}

fn boxes_to_py(boxes: Vec<RustBoundingBox>) -> Vec<BoundingBox> {
    boxes.into_iter().map(BoundingBox::from).collect()
}

/// Configuration for the detection pipeline.
#[pyclass]
#[derive(Clone)]
pub struct DetectorConfig {
    inner: RustDetectorConfig,
}

#[pymethods]
impl DetectorConfig {
    /// Create a new DetectorConfig.
    ///
    /// Args:
    ///     scale_percent: Working resolution in percent of the input (default: 100.0)
    ///     hsv_lower: Lower (H, S, V) bounds, half-scale hue (default: (10, 0, 0))
    ///     hsv_upper: Upper (H, S, V) bounds (default: (150, 255, 255))
    ///     morphology_size: Odd structuring element side (default: 3)
    ///     morphology_value: Mask value eroded then dilated, 0 or 255 (default: 0)
    ///     min_width: Minimum candidate extent along x (default: 75)
    ///     min_height: Minimum candidate extent along y (default: 50)
    ///     max_width: Maximum extent along x; half the working width if None
    ///     max_height: Maximum extent along y; half the working height if None
    ///     m6: (low, high) range for M6; calibrated default if None
    ///     m7: (low, high) range for M7; calibrated default if None
    ///     area_ratio: (low, high) foreground/background ratio (default: (3.0, 5.0))
    ///     parallel: Classify regions in parallel (default: False)
    #[new]
    #[pyo3(signature = (
        scale_percent = 100.0,
        hsv_lower = (10, 0, 0),
        hsv_upper = (150, 255, 255),
        morphology_size = 3,
        morphology_value = 0,
        min_width = 75,
        min_height = 50,
        max_width = None,
        max_height = None,
        m6 = None,
        m7 = None,
        area_ratio = None,
        parallel = false
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        scale_percent: f64,
        hsv_lower: (u8, u8, u8),
        hsv_upper: (u8, u8, u8),
        morphology_size: usize,
        morphology_value: u8,
        min_width: usize,
        min_height: usize,
        max_width: Option<usize>,
        max_height: Option<usize>,
        m6: Option<(f64, f64)>,
        m7: Option<(f64, f64)>,
        area_ratio: Option<(f64, f64)>,
        parallel: bool,
    ) -> PyResult<Self> {
        let defaults = ShapeTemplate::default();
        let template = ShapeTemplate {
            m6: m6.map(range_from_pair).transpose()?.unwrap_or(defaults.m6),
            m7: m7.map(range_from_pair).transpose()?.unwrap_or(defaults.m7),
            area_ratio: area_ratio
                .map(range_from_pair)
                .transpose()?
                .unwrap_or(defaults.area_ratio),
        };
        let inner = RustDetectorConfig {
            scale_percent,
            hsv: HsvBounds::new(
                [hsv_lower.0, hsv_lower.1, hsv_lower.2],
                [hsv_upper.0, hsv_upper.1, hsv_upper.2],
            ),
            morphology_size,
            morphology_value,
            min_width,
            min_height,
            max_width,
            max_height,
            template,
            parallel,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Validate the configuration.
    fn validate(&self) -> PyResult<()> {
        self.inner.validate().map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!(
            "DetectorConfig(scale_percent={}, morphology_size={}, min_width={}, min_height={}, parallel={})",
            self.inner.scale_percent,
            self.inner.morphology_size,
            self.inner.min_width,
            self.inner.min_height,
            self.inner.parallel
        )
    }
}

/// Result of one detection run.
#[pyclass]
pub struct Detection {
    mask: BinaryMask,
    /// Candidate boxes at working resolution.
    #[pyo3(get)]
    candidates: Vec<BoundingBox>,
    /// Confirmed boxes at working resolution.
    #[pyo3(get)]
    confirmed: Vec<BoundingBox>,
    /// Confirmed boxes at input resolution.
    #[pyo3(get)]
    confirmed_original: Vec<BoundingBox>,
}

impl From<RustDetection> for Detection {
    fn from(d: RustDetection) -> Self {
        Self {
            mask: d.mask,
            candidates: boxes_to_py(d.candidates),
            confirmed: boxes_to_py(d.confirmed),
            confirmed_original: boxes_to_py(d.confirmed_original),
        }
    }
}

#[pymethods]
impl Detection {
    /// Cleaned binary mask as a 2D uint8 numpy array (height x width).
    #[getter]
    fn mask<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        let height = self.mask.height();
        let width = self.mask.width();
        let flat = PyArray1::from_vec(py, self.mask.grid().data().to_vec());
        Ok(flat.reshape([height, width])?.into_any())
    }

    fn __repr__(&self) -> String {
        format!(
            "Detection(candidates={}, confirmed={})",
            self.candidates.len(),
            self.confirmed.len()
        )
    }
}

fn grid_from_bgr(image: &PyReadonlyArray3<'_, u8>) -> PyResult<PixelGrid> {
    let shape = image.shape();
    if shape[2] != 3 {
        return Err(PyValueError::new_err(
            "image must have shape (height, width, 3)",
        ));
    }
    let data: Vec<u8> = image.as_slice()?.to_vec();
    PixelGrid::new(data, shape[1], shape[0], PixelFormat::Tricolor).map_err(to_py_err)
}

fn mask_from_array(mask: &PyReadonlyArray2<'_, u8>) -> PyResult<BinaryMask> {
    let shape = mask.shape();
    let data: Vec<u8> = mask.as_slice()?.to_vec();
    let grid = PixelGrid::new(data, shape[1], shape[0], PixelFormat::Mono).map_err(to_py_err)?;
    BinaryMask::from_grid(grid).map_err(to_py_err)
}

/// Run the detection pipeline on a BGR image.
///
/// Args:
///     image: 3D uint8 numpy array (height x width x 3), BGR channel order
///     config: DetectorConfig (default: DetectorConfig())
///
/// Returns:
///     Detection with the cleaned mask, candidates and confirmed boxes
#[pyfunction]
#[pyo3(signature = (image, config = None))]
fn detect(image: PyReadonlyArray3<'_, u8>, config: Option<DetectorConfig>) -> PyResult<Detection> {
    let grid = grid_from_bgr(&image)?;
    let cfg = config.map(|c| c.inner).unwrap_or_default();
    let detector = Detector::new().with_config(cfg);
    let detection = detector.detect(&grid).map_err(to_py_err)?;
    Ok(detection.into())
}

/// Load an image file and run the detection pipeline on it.
///
/// Args:
///     path: Path to an RGB or grayscale image file
///     config: DetectorConfig (default: DetectorConfig())
#[pyfunction]
#[pyo3(signature = (path, config = None))]
fn detect_file(path: &str, config: Option<DetectorConfig>) -> PyResult<Detection> {
    let grid = humatch::io::load_bgr_image(path).map_err(to_py_err)?;
    let cfg = config.map(|c| c.inner).unwrap_or_default();
    let detection = Detector::new()
        .with_config(cfg)
        .detect(&grid)
        .map_err(to_py_err)?;
    Ok(detection.into())
}

/// Propose one box per 8-connected foreground component of a binary mask.
///
/// Args:
///     mask: 2D uint8 numpy array holding only 0 and 255
///     min_width: Minimum extent along x (default: 0)
///     min_height: Minimum extent along y (default: 0)
///     max_width: Maximum extent along x (default: mask width)
///     max_height: Maximum extent along y (default: mask height)
#[pyfunction]
#[pyo3(signature = (mask, min_width = 0, min_height = 0, max_width = None, max_height = None))]
fn find_rois(
    mask: PyReadonlyArray2<'_, u8>,
    min_width: usize,
    min_height: usize,
    max_width: Option<usize>,
    max_height: Option<usize>,
) -> PyResult<Vec<BoundingBox>> {
    let mask = mask_from_array(&mask)?;
    let limits = RoiLimits::new(
        min_width,
        min_height,
        max_width.unwrap_or(mask.width()),
        max_height.unwrap_or(mask.height()),
    );
    limits.validate().map_err(to_py_err)?;
    Ok(boxes_to_py(humatch::find_rois(&mask, &limits)))
}

/// Compute the ten invariants M1..M10 of a region.
///
/// Pixels equal to 255 carry no weight; every other value weighs 1.
///
/// Args:
///     region: 2D uint8 numpy array
///
/// Returns:
///     List of ten floats, M1 first
#[pyfunction]
fn hu_moments(region: PyReadonlyArray2<'_, u8>) -> PyResult<Vec<f64>> {
    let shape = region.shape();
    let data: Vec<u8> = region.as_slice()?.to_vec();
    let grid = PixelGrid::new(data, shape[1], shape[0], PixelFormat::Mono).map_err(to_py_err)?;
    Ok(ShapeDescriptor::from_grid(&grid).hu.as_array().to_vec())
}

/// Python module for the humatch shape detector.
#[pymodule]
fn _humatch(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<BoundingBox>()?;
    m.add_class::<DetectorConfig>()?;
    m.add_class::<Detection>()?;
    m.add_function(wrap_pyfunction!(detect, m)?)?;
    m.add_function(wrap_pyfunction!(detect_file, m)?)?;
    m.add_function(wrap_pyfunction!(find_rois, m)?)?;
    m.add_function(wrap_pyfunction!(hu_moments, m)?)?;

    // Add version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
