//! Combining lasso results with a host selection mask.
//!
//! Masks follow the usual selection convention: 255 = selected,
//! 0 = not selected. A mask covers a rectangular window of the grid whose
//! top-left cell is `origin`; row `r`, column `c` is cell
//! `(origin.x + c, origin.y + r)`.

use std::str::FromStr;

use ndarray::{Array2, ArrayView2, Zip};

use super::geometry::{BoundingBox, Point, TilePosition};
use crate::error::{LassoError, Result};

pub const SELECTED: u8 = 255;
pub const UNSELECTED: u8 = 0;

/// How a new lasso result combines with the existing selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LassoMode {
    /// Replace the current selection
    #[default]
    Replace,
    /// Add to the current selection
    Add,
    /// Remove from the current selection
    Subtract,
}

impl FromStr for LassoMode {
    type Err = LassoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "add" => Ok(Self::Add),
            "subtract" => Ok(Self::Subtract),
            _ => Err(LassoError::UnknownMode(s.to_string())),
        }
    }
}

#[inline]
fn mask_index(origin: Point, shape: (usize, usize), x: i32, y: i32) -> Option<(usize, usize)> {
    let col = x as i64 - origin.x as i64;
    let row = y as i64 - origin.y as i64;
    let (rows, cols) = shape;
    (row >= 0 && col >= 0 && (row as usize) < rows && (col as usize) < cols)
        .then_some((row as usize, col as usize))
}

/// Render cells into a mask covering `bbox`.
///
/// The mask origin is `(bbox.min_x, bbox.min_y)`. Cells outside the box are
/// ignored; an empty box gives a `0 x 0` mask.
pub fn cells_to_mask(cells: &[TilePosition], bbox: &BoundingBox) -> Array2<u8> {
    let Some((min_x, min_y, _, _)) = bbox.bounds() else {
        return Array2::zeros((0, 0));
    };
    let shape = (bbox.height() as usize + 1, bbox.width() as usize + 1);
    let mut mask = Array2::<u8>::zeros(shape);
    let origin = Point::new(min_x, min_y);

    for cell in cells {
        if let Some(idx) = mask_index(origin, shape, cell.x, cell.y) {
            mask[idx] = SELECTED;
        }
    }
    mask
}

/// Apply lasso cells to a host mask.
///
/// # Arguments
/// * `mask` - Host selection mask, modified in place
/// * `origin` - Grid cell at `mask[[0, 0]]`
/// * `cells` - Cells enclosed by the lasso (floor is ignored)
/// * `mode` - Replace clears the mask first; Add selects; Subtract deselects
///
/// # Returns
/// Number of cells that fell inside the mask.
pub fn apply_cells(
    mask: &mut Array2<u8>,
    origin: Point,
    cells: &[TilePosition],
    mode: LassoMode,
) -> usize {
    let value = match mode {
        LassoMode::Replace => {
            mask.fill(UNSELECTED);
            SELECTED
        }
        LassoMode::Add => SELECTED,
        LassoMode::Subtract => UNSELECTED,
    };

    let shape = mask.dim();
    let mut touched = 0;
    for cell in cells {
        if let Some(idx) = mask_index(origin, shape, cell.x, cell.y) {
            mask[idx] = value;
            touched += 1;
        }
    }
    touched
}

/// Combine `src` into `dst` cell by cell.
///
/// Both masks must cover the same window. Any non-zero `src` value counts
/// as selected.
pub fn combine_masks(dst: &mut Array2<u8>, src: ArrayView2<u8>, mode: LassoMode) -> Result<()> {
    if dst.dim() != src.dim() {
        return Err(LassoError::MaskShape {
            expected: dst.dim(),
            actual: src.dim(),
        });
    }

    Zip::from(dst).and(&src).for_each(|d, &s| {
        let selected = s > 0;
        *d = match mode {
            LassoMode::Replace => if selected { SELECTED } else { UNSELECTED },
            LassoMode::Add => if selected { SELECTED } else { *d },
            LassoMode::Subtract => if selected { UNSELECTED } else { *d },
        };
    });
    Ok(())
}
