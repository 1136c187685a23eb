//! Grid geometry shared by the lasso stages.

/// A point of the lasso path in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    /// Squared distance, used for spacing checks without a square root.
    #[inline]
    pub fn distance_squared_to(&self, other: &Point) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx * dx + dy * dy
    }

    /// Distance from this point to the segment `line_start..line_end`.
    ///
    /// The projection is clamped to the segment, so inside the segment's span
    /// this is the perpendicular distance and beyond either end it is the
    /// distance to that endpoint. A zero-length segment falls back to plain
    /// point distance.
    pub fn distance_to_segment(&self, line_start: &Point, line_end: &Point) -> f64 {
        let dx = line_end.x as f64 - line_start.x as f64;
        let dy = line_end.y as f64 - line_start.y as f64;
        let length_sq = dx * dx + dy * dy;

        if length_sq == 0.0 {
            return self.distance_to(line_start);
        }

        let px = self.x as f64 - line_start.x as f64;
        let py = self.y as f64 - line_start.y as f64;
        let t = (px * dx + py * dy) / length_sq;

        if t <= 0.0 {
            self.distance_to(line_start)
        } else if t >= 1.0 {
            self.distance_to(line_end)
        } else {
            // Cross product over segment length
            (px * dy - py * dx).abs() / length_sq.sqrt()
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A grid cell on a given floor, as produced by the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePosition {
    pub x: i32,
    pub y: i32,
    pub floor: i32,
}

impl TilePosition {
    #[inline]
    pub fn new(x: i32, y: i32, floor: i32) -> Self {
        Self { x, y, floor }
    }
}

/// Running bounds of every recorded point.
///
/// Empty until the first point is added; an empty box reports zero size and
/// contains nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
    has_points: bool,
}

impl BoundingBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds of a point sequence, or an empty box for an empty slice.
    pub fn from_points(points: &[Point]) -> Self {
        let mut bbox = Self::new();
        for p in points {
            bbox.expand(p.x, p.y);
        }
        bbox
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn expand(&mut self, x: i32, y: i32) {
        if !self.has_points {
            self.min_x = x;
            self.max_x = x;
            self.min_y = y;
            self.max_y = y;
            self.has_points = true;
        } else {
            self.min_x = self.min_x.min(x);
            self.max_x = self.max_x.max(x);
            self.min_y = self.min_y.min(y);
            self.max_y = self.max_y.max(y);
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.has_points && x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.has_points && self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    pub fn width(&self) -> i64 {
        if self.has_points {
            self.max_x as i64 - self.min_x as i64
        } else {
            0
        }
    }

    pub fn height(&self) -> i64 {
        if self.has_points {
            self.max_y as i64 - self.min_y as i64
        } else {
            0
        }
    }

    /// Number of cells covered by the box (inclusive on both ends).
    pub fn cell_count(&self) -> u64 {
        if !self.is_valid() {
            return 0;
        }
        (self.width() as u64 + 1) * (self.height() as u64 + 1)
    }

    /// Bounds as `(min_x, min_y, max_x, max_y)`, `None` while empty.
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        self.is_valid()
            .then_some((self.min_x, self.min_y, self.max_x, self.max_y))
    }
}

/// Twice the signed area of a polygon (shoelace formula).
///
/// The closing edge is implied; a ring whose last point repeats the first
/// contributes a zero-length closing term.
pub fn signed_area_doubled(points: &[Point]) -> i64 {
    let n = points.len();
    if n < 3 {
        return 0;
    }

    let mut area = 0i64;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    area
}

/// True when all points lie on one straight line.
///
/// Paths with fewer than two distinct points count as collinear. Such a
/// polygon has no interior, whatever its vertex count.
pub fn is_collinear(points: &[Point]) -> bool {
    let Some(&origin) = points.first() else {
        return true;
    };
    let Some(&other) = points.iter().find(|p| **p != origin) else {
        return true;
    };

    let dx = other.x as i64 - origin.x as i64;
    let dy = other.y as i64 - origin.y as i64;
    points.iter().all(|p| {
        let px = p.x as i64 - origin.x as i64;
        let py = p.y as i64 - origin.y as i64;
        dx as i128 * py as i128 == dy as i128 * px as i128
    })
}
