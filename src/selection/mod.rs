//! Freehand lasso selection for tile grids.
//!
//! The lasso pipeline, leaf-first:
//! - **Path recording**: drag points with jitter filtering and running bounds (`lasso.rs`)
//! - **Douglas-Peucker**: simplification of the closed ring (`simplify.rs`)
//! - **Scanline fill**: edge table + active edge table rasterization (`scanline.rs`)
//! - **Ray casting**: single-cell membership tests (`point_in_polygon.rs`)
//! - **Masks**: combining results with a host selection (`mask.rs`)
//!
//! The engine produces data only (points and enclosed cells); how the host
//! draws the path or applies the cells is up to the host.

pub mod geometry;
pub mod lasso;
pub mod mask;
pub mod point_in_polygon;
pub mod scanline;
pub mod simplify;

pub use geometry::{BoundingBox, Point, TilePosition};
pub use lasso::{LassoSelection, LassoState};
pub use mask::{apply_cells, cells_to_mask, combine_masks, LassoMode};
pub use point_in_polygon::{point_in_polygon, points_in_polygon};
pub use scanline::{fill_polygon, RasterStats};
pub use simplify::douglas_peucker;
