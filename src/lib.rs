//! Tile Lasso
//!
//! Freehand area selection for 2D tile grids, implemented in Rust with
//! Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Pipeline
//! A drag is recorded point by point, closed into a ring, simplified with
//! Douglas-Peucker and rasterized with a scanline fill:
//! - **Input**: integer `(x, y)` grid coordinates from the host's pointer events
//! - **Output**: the `(x, y, floor)` cells enclosed by the ring on one floor
//!
//! Everything runs synchronously on the calling thread and is a pure
//! function of the recorded points and the configuration. Degenerate input
//! (fewer than 3 points, collinear paths, an open path) yields empty results
//! rather than errors.
//!
//! ## Boundary Convention
//! Rows are half-open per edge (`y_min..y_max`) and columns are closed per
//! span (`ceil(x_left)..=floor(x_right)`). `contains_point` uses the same
//! rule, so it agrees with the fill on every cell.

pub mod config;
pub mod error;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::LassoConfig;
pub use error::{LassoError, Result};
pub use selection::{
    BoundingBox, LassoMode, LassoSelection, LassoState, Point, RasterStats, TilePosition,
};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::Array2;
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::LassoConfig;
    use crate::error::LassoError;
    use crate::selection::{apply_cells, LassoMode, LassoSelection, Point, TilePosition};

    impl From<LassoError> for PyErr {
        fn from(err: LassoError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    /// Cells as an (N, 3) int32 array of `[x, y, floor]` rows.
    fn cells_to_array(cells: &[TilePosition]) -> Array2<i32> {
        Array2::from_shape_fn((cells.len(), 3), |(i, j)| match j {
            0 => cells[i].x,
            1 => cells[i].y,
            _ => cells[i].floor,
        })
    }

    fn to_points(points: &[(i32, i32)]) -> Vec<Point> {
        points.iter().map(|&p| Point::from(p)).collect()
    }

    fn from_points(points: &[Point]) -> Vec<(i32, i32)> {
        points.iter().map(|p| (p.x, p.y)).collect()
    }

    // ========================================================================
    // Lasso Selection
    // ========================================================================

    /// Interactive lasso selection.
    ///
    /// Feed drag positions with `add_point`, finish with `close_path`, then
    /// query `cells_in_polygon(floor)` or `contains_point(x, y)`.
    #[pyclass(name = "LassoSelection")]
    pub struct PyLassoSelection {
        inner: LassoSelection,
    }

    #[pymethods]
    impl PyLassoSelection {
        #[new]
        #[pyo3(signature = (min_point_distance=0.5, simplify_tolerance=0.5, preview_interval=20))]
        fn new(
            min_point_distance: f64,
            simplify_tolerance: f64,
            preview_interval: usize,
        ) -> PyResult<Self> {
            let config = LassoConfig {
                min_point_distance,
                simplify_tolerance,
                preview_interval,
            };
            Ok(Self {
                inner: LassoSelection::with_config(config)?,
            })
        }

        fn clear(&mut self) {
            self.inner.clear();
        }

        /// Record a point; returns False when it was filtered out.
        fn add_point(&mut self, x: i32, y: i32) -> bool {
            self.inner.add_point(x, y)
        }

        fn close_path(&mut self) {
            self.inner.close_path();
        }

        #[getter]
        fn is_active(&self) -> bool {
            self.inner.is_active()
        }

        #[setter]
        fn set_is_active(&mut self, active: bool) {
            self.inner.set_active(active);
        }

        #[getter]
        fn is_closed(&self) -> bool {
            self.inner.is_closed()
        }

        fn set_min_point_distance(&mut self, distance: f64) -> PyResult<()> {
            Ok(self.inner.set_min_point_distance(distance)?)
        }

        fn set_simplify_tolerance(&mut self, tolerance: f64) -> PyResult<()> {
            Ok(self.inner.set_simplify_tolerance(tolerance)?)
        }

        fn path(&self) -> Vec<(i32, i32)> {
            from_points(self.inner.path())
        }

        fn simplified_path(&self) -> Vec<(i32, i32)> {
            from_points(self.inner.simplified_path())
        }

        /// `(min_x, min_y, max_x, max_y)` or None before the first point.
        fn bounding_box(&self) -> Option<(i32, i32, i32, i32)> {
            self.inner.bounding_box().bounds()
        }

        fn area(&self) -> f64 {
            self.inner.area()
        }

        fn contains_point(&self, x: i32, y: i32) -> bool {
            self.inner.contains_point(x, y)
        }

        /// Enclosed cells as an (N, 3) int32 array of `[x, y, floor]`.
        fn cells_in_polygon<'py>(&self, py: Python<'py>, floor: i32) -> Bound<'py, PyArray2<i32>> {
            cells_to_array(&self.inner.cells_in_polygon(floor)).into_pyarray(py)
        }
    }

    // ========================================================================
    // One-shot helpers
    // ========================================================================

    /// Cells enclosed by a polygon given as `[(x, y), ...]`.
    ///
    /// # Arguments
    /// * `points` - Lasso path in drawing order (closed automatically)
    /// * `floor` - Floor written into every output row
    /// * `tolerance` - Douglas-Peucker tolerance in tiles
    #[pyfunction]
    #[pyo3(signature = (points, floor=0, tolerance=0.5))]
    pub fn lasso_cells<'py>(
        py: Python<'py>,
        points: Vec<(i32, i32)>,
        floor: i32,
        tolerance: f64,
    ) -> PyResult<Bound<'py, PyArray2<i32>>> {
        let config = LassoConfig::default().with_simplify_tolerance(tolerance);
        let lasso = LassoSelection::from_points(to_points(&points), config)?;
        Ok(cells_to_array(&lasso.cells_in_polygon(floor)).into_pyarray(py))
    }

    /// Apply a lasso to a selection mask (255 = selected).
    ///
    /// # Arguments
    /// * `mask` - (height, width) uint8 selection mask
    /// * `origin_x`, `origin_y` - Grid cell at `mask[0, 0]`
    /// * `points` - Lasso path in grid coordinates
    /// * `mode` - "replace", "add" or "subtract"
    ///
    /// # Returns
    /// New mask with the lasso applied
    #[pyfunction]
    #[pyo3(signature = (mask, origin_x, origin_y, points, mode="replace", tolerance=0.5))]
    pub fn apply_lasso_mask<'py>(
        py: Python<'py>,
        mask: PyReadonlyArray2<'py, u8>,
        origin_x: i32,
        origin_y: i32,
        points: Vec<(i32, i32)>,
        mode: &str,
        tolerance: f64,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let mode: LassoMode = mode.parse()?;
        let config = LassoConfig::default().with_simplify_tolerance(tolerance);
        let lasso = LassoSelection::from_points(to_points(&points), config)?;

        let mut result = mask.as_array().to_owned();
        apply_cells(
            &mut result,
            Point::new(origin_x, origin_y),
            &lasso.cells_in_polygon(0),
            mode,
        );
        Ok(result.into_pyarray(py))
    }

    /// Tile Lasso Rust extension module
    #[pymodule]
    pub fn tile_lasso(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<PyLassoSelection>()?;
        m.add_function(wrap_pyfunction!(lasso_cells, m)?)?;
        m.add_function(wrap_pyfunction!(apply_lasso_mask, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::tile_lasso;
