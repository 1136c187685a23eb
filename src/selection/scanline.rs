//! Scanline polygon fill with an Active Edge Table (AET).
//!
//! Enumerates the grid cells enclosed by a lasso polygon, one row at a time:
//! - **Edge table**: every non-horizontal edge, bucketed by its lower y
//! - **Active edges**: the edges crossing the current row, kept sorted by x
//! - **Even-odd pairing**: cells between crossings `2i` and `2i + 1` are filled
//!
//! ## Boundary convention
//!
//! An edge covers the rows `y_min..y_max` (half-open), so a vertex shared by
//! two edges is counted once and the polygon's top row `max_y` is never
//! filled. On each row the cells `ceil(x_left)..=floor(x_right)` are filled,
//! inclusive of crossings that land exactly on a cell. Spans that touch on
//! a shared crossing emit that cell once. Polygons whose vertices are all
//! collinear enclose nothing and produce no cells.
//!
//! Crossing positions are exact rationals. Each edge keeps the numerator of
//! `x * dy` and adds `dx` per row, so incremental stepping never drifts and
//! every consumer of [`Crossing`] (fill, point classification) sees the same
//! values.

use std::cmp::Ordering;

use super::geometry::{is_collinear, BoundingBox, Point, TilePosition};

/// Exact x position of an edge on a scanline: `num / den` with `den > 0`.
#[derive(Clone, Copy, Debug)]
pub struct Crossing {
    num: i128,
    den: i128,
}

impl Crossing {
    #[inline]
    fn new(num: i128, den: i128) -> Self {
        debug_assert!(den > 0);
        Self { num, den }
    }

    /// Largest integer not greater than the crossing.
    #[inline]
    pub fn floor(&self) -> i64 {
        self.num.div_euclid(self.den) as i64
    }

    /// Smallest integer not less than the crossing.
    #[inline]
    pub fn ceil(&self) -> i64 {
        -((-self.num).div_euclid(self.den)) as i64
    }

    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Compare the crossing with an integer x coordinate.
    #[inline]
    pub fn cmp_x(&self, x: i64) -> Ordering {
        self.num.cmp(&(x as i128 * self.den))
    }
}

impl PartialEq for Crossing {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Crossing {}

impl PartialOrd for Crossing {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Crossing {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}

/// Where the segment `p1..p2` crosses row `y`, if it does.
///
/// A segment crosses the rows `min(y1, y2)..max(y1, y2)`; horizontal
/// segments never cross. This is the same half-open rule the edge table
/// uses.
#[inline]
pub fn crossing_at(p1: Point, p2: Point, y: i32) -> Option<Crossing> {
    if (p1.y <= y) == (p2.y <= y) {
        return None;
    }
    let (lower, upper) = if p1.y < p2.y { (p1, p2) } else { (p2, p1) };
    let dy = upper.y as i128 - lower.y as i128;
    let dx = upper.x as i128 - lower.x as i128;
    let rows = y as i128 - lower.y as i128;
    Some(Crossing::new(lower.x as i128 * dy + rows * dx, dy))
}

/// Iterate the edges of a polygon ring, including the closing edge.
///
/// A ring that already repeats its first point ends in a zero-length
/// closing edge, which is horizontal and contributes nothing.
pub(crate) fn ring_edges(polygon: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = polygon.len();
    (0..n).map(move |i| (polygon[i], polygon[(i + 1) % n]))
}

/// A non-horizontal polygon edge while it is in the edge table or AET.
#[derive(Clone, Copy, Debug)]
struct Edge {
    /// Row at which the edge stops being active
    y_max: i32,
    /// Current x intersection
    x: Crossing,
    /// Numerator step per row; `dx / dy` is the inverse slope
    dx: i128,
}

impl Edge {
    /// Build an edge from a segment, `None` for horizontal segments.
    fn from_segment(p1: Point, p2: Point) -> Option<(i32, Edge)> {
        if p1.y == p2.y {
            return None;
        }
        let (lower, upper) = if p1.y < p2.y { (p1, p2) } else { (p2, p1) };
        let dy = upper.y as i128 - lower.y as i128;
        let edge = Edge {
            y_max: upper.y,
            x: Crossing::new(lower.x as i128 * dy, dy),
            dx: upper.x as i128 - lower.x as i128,
        };
        Some((lower.y, edge))
    }

    /// Inverse slope `dx / dy`.
    #[cfg(test)]
    fn inv_slope(&self) -> f64 {
        self.dx as f64 / self.x.den as f64
    }

    #[inline]
    fn advance(&mut self) {
        self.x.num += self.dx;
    }
}

/// Counters from one rasterization pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Scanlines visited
    pub rows: usize,
    /// Non-horizontal edges in the edge table
    pub edges: usize,
    /// Largest number of simultaneously active edges
    pub max_active: usize,
    /// Cells emitted
    pub cells: usize,
}

/// Upper bound on the cells reserved up front for a sweep over `bbox`.
const MAX_RESERVED_CELLS: u64 = 1 << 20;

/// Initial capacity for the cells of a sweep over `bbox`.
///
/// Most lassos cover around half of their bounding box; thin slivers cover
/// far less, so the reservation is capped.
pub(crate) fn cell_capacity_hint(bbox: &BoundingBox) -> usize {
    (bbox.cell_count() / 2).min(MAX_RESERVED_CELLS) as usize
}

/// Build the edge table: one bucket per row of `min_y..=max_y`, holding the
/// edges whose lower endpoint is on that row.
///
/// Edges that start below `min_y` but are still active there go into the
/// first bucket, advanced to the `min_y` crossing.
fn build_edge_table(polygon: &[Point], min_y: i32, height: usize) -> (Vec<Vec<Edge>>, usize) {
    let mut table: Vec<Vec<Edge>> = vec![Vec::new(); height];
    let mut count = 0;

    for (p1, p2) in ring_edges(polygon) {
        let Some((y_min, mut edge)) = Edge::from_segment(p1, p2) else {
            continue;
        };
        let bucket = y_min as i64 - min_y as i64;
        if bucket < 0 {
            if edge.y_max <= min_y {
                continue;
            }
            edge.x.num += (-bucket) as i128 * edge.dx;
            table[0].push(edge);
            count += 1;
        } else if (bucket as usize) < height {
            table[bucket as usize].push(edge);
            count += 1;
        }
    }

    (table, count)
}

/// Fill a polygon ring into `cells`, sweeping the rows of `bbox`.
///
/// # Arguments
/// * `polygon` - Polygon vertices; the closing edge is implied
/// * `bbox` - Rows to sweep; rows of the polygon outside it are clipped
/// * `floor` - Floor assigned to every produced cell
/// * `cells` - Output buffer; cells are appended row by row, left to right
///
/// # Returns
/// Counters for the pass. Polygons with fewer than 3 points, collinear
/// polygons and invalid bounds produce nothing.
pub fn scanline_fill(
    polygon: &[Point],
    bbox: &BoundingBox,
    floor: i32,
    cells: &mut Vec<TilePosition>,
) -> RasterStats {
    let mut stats = RasterStats::default();

    if polygon.len() < 3 || is_collinear(polygon) {
        return stats;
    }
    let Some((_, min_y, _, max_y)) = bbox.bounds() else {
        return stats;
    };

    let height = (max_y as i64 - min_y as i64 + 1) as usize;
    let (edge_table, edge_count) = build_edge_table(polygon, min_y, height);
    stats.edges = edge_count;

    let mut active: Vec<Edge> = Vec::with_capacity(polygon.len());
    let start_len = cells.len();

    for (row, bucket) in edge_table.iter().enumerate() {
        let y = (min_y as i64 + row as i64) as i32;
        stats.rows += 1;

        active.extend_from_slice(bucket);
        active.retain(|e| e.y_max != y);

        if active.is_empty() {
            continue;
        }
        stats.max_active = stats.max_active.max(active.len());

        active.sort_unstable_by(|a, b| a.x.cmp(&b.x));

        let mut next_free = i64::MIN;
        for pair in active.chunks_exact(2) {
            let x_start = pair[0].x.ceil().max(next_free);
            let x_end = pair[1].x.floor();
            for x in x_start..=x_end {
                cells.push(TilePosition::new(x as i32, y, floor));
            }
            next_free = next_free.max(x_end + 1);
        }

        for edge in active.iter_mut() {
            edge.advance();
        }
    }

    stats.cells = cells.len() - start_len;
    stats
}

/// Cells enclosed by a polygon ring on `floor`.
///
/// Convenience wrapper around [`scanline_fill`] that sizes the sweep from
/// the polygon's own bounds.
pub fn fill_polygon(polygon: &[Point], floor: i32) -> Vec<TilePosition> {
    let bbox = BoundingBox::from_points(polygon);
    let mut cells = Vec::with_capacity(cell_capacity_hint(&bbox));
    scanline_fill(polygon, &bbox, floor, &mut cells);
    cells
}
