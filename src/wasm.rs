//! WebAssembly exports for the lasso engine.
//!
//! These types and functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Flat Buffers
//!
//! Geometry crosses the boundary as flat `Int32Array`s:
//! - **Paths**: `[x0, y0, x1, y1, ...]`
//! - **Cells**: `[x0, y0, floor0, x1, y1, floor1, ...]`
//! - **Bounds**: `[min_x, min_y, max_x, max_y]`, or empty before the first point

use wasm_bindgen::prelude::*;

use crate::selection::{cells_to_mask, LassoSelection, Point, TilePosition};

fn flatten_points(points: &[Point]) -> Vec<i32> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

fn flatten_cells(cells: &[TilePosition]) -> Vec<i32> {
    cells.iter().flat_map(|c| [c.x, c.y, c.floor]).collect()
}

// ============================================================================
// Lasso Selection
// ============================================================================

/// Interactive lasso selection for a browser host.
#[wasm_bindgen]
pub struct WasmLasso {
    inner: LassoSelection,
}

#[wasm_bindgen]
impl WasmLasso {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmLasso {
        WasmLasso {
            inner: LassoSelection::new(),
        }
    }

    pub fn set_min_point_distance(&mut self, distance: f64) -> Result<(), JsError> {
        self.inner.set_min_point_distance(distance)?;
        Ok(())
    }

    pub fn set_simplify_tolerance(&mut self, tolerance: f64) -> Result<(), JsError> {
        self.inner.set_simplify_tolerance(tolerance)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Record a pointer position; returns false when it was filtered out.
    pub fn add_point(&mut self, x: i32, y: i32) -> bool {
        self.inner.add_point(x, y)
    }

    pub fn close_path(&mut self) {
        self.inner.close_path();
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Raw path as `[x0, y0, x1, y1, ...]`.
    pub fn path(&self) -> Vec<i32> {
        flatten_points(self.inner.path())
    }

    /// Simplified path (live preview while drawing) as `[x0, y0, ...]`.
    pub fn simplified_path(&self) -> Vec<i32> {
        flatten_points(self.inner.simplified_path())
    }

    /// `[min_x, min_y, max_x, max_y]`, empty before the first point.
    pub fn bounding_box(&self) -> Vec<i32> {
        match self.inner.bounding_box().bounds() {
            Some((min_x, min_y, max_x, max_y)) => vec![min_x, min_y, max_x, max_y],
            None => Vec::new(),
        }
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.inner.contains_point(x, y)
    }

    /// Enclosed cells as `[x0, y0, floor0, ...]`.
    pub fn cells_in_polygon(&self, floor: i32) -> Vec<i32> {
        flatten_cells(&self.inner.cells_in_polygon(floor))
    }

    /// Selection mask over the bounding box (255 = selected), row-major.
    ///
    /// Width and height are `max_x - min_x + 1` and `max_y - min_y + 1`
    /// from `bounding_box()`.
    pub fn mask(&self) -> Vec<u8> {
        let cells = self.inner.cells_in_polygon(0);
        cells_to_mask(&cells, self.inner.bounding_box())
            .into_raw_vec_and_offset()
            .0
    }
}

impl Default for WasmLasso {
    fn default() -> Self {
        Self::new()
    }
}
