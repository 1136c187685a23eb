//! Freehand lasso selection over a tile grid.
//!
//! A [`LassoSelection`] records the points of a drag, closes them into a
//! ring, simplifies the ring once and then answers two questions about it:
//! which cells of a floor it encloses, and whether a given cell is inside.
//!
//! ```text
//! Empty --add_point--> Drawing --close_path--> Closed
//!   ^                                            |
//!   +------------------- clear ------------------+
//! ```

use super::geometry::{signed_area_doubled, BoundingBox, Point, TilePosition};
use super::point_in_polygon::{point_in_polygon, points_in_polygon};
use super::scanline::{cell_capacity_hint, scanline_fill, RasterStats};
use super::simplify::douglas_peucker;
use crate::config::LassoConfig;
use crate::error::{check_distance, LassoError, Result};

/// Where a selection is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LassoState {
    /// No points recorded
    Empty,
    /// Points are being recorded; the path is open
    Drawing,
    /// The path is a closed, simplified ring
    Closed,
}

/// One lasso selection session.
#[derive(Debug, Clone)]
pub struct LassoSelection {
    path: Vec<Point>,
    simplified_path: Vec<Point>,
    bounding_box: BoundingBox,
    active: bool,
    closed: bool,
    config: LassoConfig,
    min_point_distance_sq: f64,
}

impl Default for LassoSelection {
    fn default() -> Self {
        let config = LassoConfig::default();
        Self {
            path: Vec::new(),
            simplified_path: Vec::new(),
            bounding_box: BoundingBox::new(),
            active: false,
            closed: false,
            min_point_distance_sq: config.min_point_distance_squared(),
            config,
        }
    }
}

impl LassoSelection {
    /// Create an empty selection with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty selection with custom parameters.
    pub fn with_config(config: LassoConfig) -> Result<Self> {
        let mut lasso = Self::new();
        lasso.set_config(config)?;
        Ok(lasso)
    }

    /// Record `points` and close the path in one step.
    ///
    /// Spacing filtering and the fewer-than-3-points rule apply exactly as
    /// they do for an interactive drag.
    pub fn from_points<I>(points: I, config: LassoConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut lasso = Self::with_config(config)?;
        for p in points {
            lasso.add_point(p.x, p.y);
        }
        lasso.close_path();
        Ok(lasso)
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn config(&self) -> &LassoConfig {
        &self.config
    }

    /// Replace all parameters. Applies to points recorded from now on and
    /// to the next `close_path`.
    pub fn set_config(&mut self, config: LassoConfig) -> Result<()> {
        config.validate()?;
        self.min_point_distance_sq = config.min_point_distance_squared();
        self.config = config;
        Ok(())
    }

    pub fn set_min_point_distance(&mut self, distance: f64) -> Result<()> {
        let distance = check_distance("min_point_distance", distance)?;
        self.config.min_point_distance = distance;
        self.min_point_distance_sq = distance * distance;
        Ok(())
    }

    pub fn set_simplify_tolerance(&mut self, tolerance: f64) -> Result<()> {
        self.config.simplify_tolerance = check_distance("simplify_tolerance", tolerance)?;
        Ok(())
    }

    pub fn set_preview_interval(&mut self, interval: usize) -> Result<()> {
        if interval == 0 {
            return Err(LassoError::ZeroPreviewInterval);
        }
        self.config.preview_interval = interval;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Path management
    // ------------------------------------------------------------------

    /// Drop every point and return to the empty state.
    pub fn clear(&mut self) {
        self.path.clear();
        self.simplified_path.clear();
        self.bounding_box.reset();
        self.active = false;
        self.closed = false;
    }

    /// Record a point of the drag.
    ///
    /// Points closer than the minimum point distance to the previous
    /// recorded point are dropped, as is anything added after the path was
    /// closed. Returns `true` when the point was recorded.
    pub fn add_point(&mut self, x: i32, y: i32) -> bool {
        if self.closed {
            return false;
        }

        let point = Point::new(x, y);
        if let Some(last) = self.path.last() {
            if last.distance_squared_to(&point) < self.min_point_distance_sq {
                return false;
            }
        }

        self.path.push(point);
        self.bounding_box.expand(x, y);
        self.active = true;
        self.refresh_preview();
        true
    }

    /// Cheap stand-in for the simplified path while drawing.
    ///
    /// Copies the raw path for the first two points and then every
    /// `preview_interval` points. Only `close_path` produces the real
    /// simplification.
    fn refresh_preview(&mut self) {
        let len = self.path.len();
        if len <= 2 || len % self.config.preview_interval == 0 {
            self.simplified_path.clone_from(&self.path);
        }
    }

    /// Close the drawn path into a ring and simplify it.
    ///
    /// A path of fewer than 3 points cannot enclose anything and is
    /// discarded, as if `clear` had been called. Closing an already closed
    /// selection does nothing.
    pub fn close_path(&mut self) {
        if self.closed {
            return;
        }
        if self.path.len() < 3 {
            self.clear();
            return;
        }

        let first = self.path[0];
        if self.path.last() != Some(&first) {
            self.path.push(first);
        }

        self.active = false;
        self.closed = true;
        self.simplify_path();
    }

    /// Full simplification pass over the raw path.
    fn simplify_path(&mut self) {
        self.simplified_path = douglas_peucker(&self.path, self.config.simplify_tolerance);
    }

    // ------------------------------------------------------------------
    // State and path access
    // ------------------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Let the host mark the selection as being drawn (or not).
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn state(&self) -> LassoState {
        if self.closed {
            LassoState::Closed
        } else if self.active || !self.path.is_empty() {
            LassoState::Drawing
        } else {
            LassoState::Empty
        }
    }

    /// Every recorded point, in drawing order.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Simplified path: authoritative once closed, a preview before that.
    pub fn simplified_path(&self) -> &[Point] {
        &self.simplified_path
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// The ring used for rasterization and point tests: the simplified path
    /// when there is one, the raw path otherwise.
    pub fn polygon(&self) -> &[Point] {
        if self.simplified_path.is_empty() {
            &self.path
        } else {
            &self.simplified_path
        }
    }

    /// Enclosed area of the polygon in square grid units.
    pub fn area(&self) -> f64 {
        signed_area_doubled(self.polygon()).unsigned_abs() as f64 / 2.0
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Cells enclosed by the closed lasso on `floor`.
    ///
    /// Empty unless the selection is closed. Cells come out row by row,
    /// left to right, each exactly once.
    pub fn cells_in_polygon(&self, floor: i32) -> Vec<TilePosition> {
        self.rasterize_with_stats(floor).0
    }

    /// Like [`cells_in_polygon`](Self::cells_in_polygon), also returning
    /// counters for the scanline pass.
    pub fn rasterize_with_stats(&self, floor: i32) -> (Vec<TilePosition>, RasterStats) {
        if !self.closed || self.path.len() < 3 {
            return (Vec::new(), RasterStats::default());
        }

        let mut cells = Vec::with_capacity(cell_capacity_hint(&self.bounding_box));
        let stats = scanline_fill(self.polygon(), &self.bounding_box, floor, &mut cells);
        (cells, stats)
    }

    /// Ray-casting test of a single cell against the current polygon.
    ///
    /// Works while drawing too (against the open path with an implied
    /// closing edge). Agrees with `cells_in_polygon` on every cell.
    /// Mid-drag queries test the live preview, which can lag the raw path
    /// by up to `preview_interval - 1` points.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        point_in_polygon(x, y, self.polygon())
    }

    /// [`contains_point`](Self::contains_point) for many cells at once,
    /// evaluated in parallel.
    pub fn contains_points(&self, points: &[Point]) -> Vec<bool> {
        points_in_polygon(points, self.polygon())
    }
}
