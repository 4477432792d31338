//! Geometric primitives for sheet construction.
//!
//! This module provides the plane types every view is built from, together
//! with the few polygon predicates the wall pipeline relies on.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in drawing units (meters)
//! - [`Bounds`] - An axis-aligned box defined by minimum and maximum coordinates
//! - [`segments_intersect`], [`is_simple_polygon`], [`point_in_polygon`] - polygon tests
//!
//! # Coordinate System
//!
//! Sheets follow the CAD convention used by DXF:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! - **Origin**: Bottom-left corner of the sheet at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases upward
//!
//! The SVG backend flips the Y axis on output; nothing else needs to care.

/// Tolerance used by the polygon predicates.
pub const EPSILON: f64 = 1e-9;

/// A 2D point in drawing coordinate space.
///
/// Points use `f64` coordinates so that derived wall metadata keeps six
/// significant decimals through every translation.
///
/// # Examples
///
/// ```
/// # use wallsheet_core::geometry::Point;
/// let p1 = Point::new(1.0, 2.0);
/// let p2 = Point::new(0.5, 0.5);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 1.5);
/// assert_eq!(sum.y(), 2.5);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 0.75);
/// assert_eq!(mid.y(), 1.25);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the Euclidean length of the point seen as a vector
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        other.sub_point(self).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Point, t: f64) -> Self {
        self.add_point(other.sub_point(self).scale(t))
    }

    /// Returns the unit vector with the same direction, or `None` for a zero vector.
    pub fn normalize(self) -> Option<Self> {
        let length = self.hypot();
        if length <= EPSILON {
            return None;
        }
        Some(self.scale(1.0 / length))
    }

    /// Returns a point at `distance` from this one in the direction of `angle` (radians).
    pub fn polar_offset(self, distance: f64, angle: f64) -> Self {
        Self {
            x: self.x + distance * angle.cos(),
            y: self.y + distance * angle.sin(),
        }
    }

    /// Returns `true` when both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Compares two points within an absolute tolerance.
    pub fn approx_eq(self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// An axis-aligned bounding box with minimum and maximum coordinates
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds from two opposite corners in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates the smallest bounds containing all `points`, or `None` if empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wallsheet_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([
    ///     Point::new(1.0, 4.0),
    ///     Point::new(-2.0, 0.5),
    ///     Point::new(3.0, 2.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(bounds.min_x(), -2.0);
    /// assert_eq!(bounds.max_y(), 4.0);
    /// assert_eq!(bounds.width(), 5.0);
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_corners(first, first), |acc, p| {
            acc.include(p)
        }))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the bottom-left corner
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the top-right corner
    pub fn max_point(self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Grows the bounds so that it contains `point`.
    pub fn include(self, point: Point) -> Self {
        Self {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
        }
    }

    /// Merges two bounds to create a larger bounds that contains both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Returns `true` when the horizontal ranges of both bounds share any point.
    pub fn overlaps_horizontally(&self, other: &Self) -> bool {
        self.min_x <= other.max_x && other.min_x <= self.max_x
    }

    /// Returns `true` when the vertical ranges of both bounds share any point.
    pub fn overlaps_vertically(&self, other: &Self) -> bool {
        self.min_y <= other.max_y && other.min_y <= self.max_y
    }

    /// Returns `true` when `point` lies inside or on the boundary.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

/// Signed area of the parallelogram spanned by `b - a` and `c - a`.
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

/// Returns `true` when the closed segments `p1-p2` and `q1-q2` share any point.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > EPSILON && d2 < -EPSILON) || (d1 < -EPSILON && d2 > EPSILON))
        && ((d3 > EPSILON && d4 < -EPSILON) || (d3 < -EPSILON && d4 > EPSILON))
    {
        return true;
    }

    (d1.abs() <= EPSILON && on_segment(q1, q2, p1))
        || (d2.abs() <= EPSILON && on_segment(q1, q2, p2))
        || (d3.abs() <= EPSILON && on_segment(p1, p2, q1))
        || (d4.abs() <= EPSILON && on_segment(p1, p2, q2))
}

/// Strips the closing vertex of a polygon given as a closed ring.
fn open_ring(ring: &[Point]) -> &[Point] {
    match ring {
        [first, .., last] if first.approx_eq(*last, EPSILON) => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Returns the lengths of every edge of a polygon ring (closing edge included).
pub fn edge_lengths(ring: &[Point]) -> Vec<f64> {
    let open = open_ring(ring);
    (0..open.len())
        .map(|i| open[i].distance(open[(i + 1) % open.len()]))
        .collect()
}

/// Returns `true` when the ring has no self-intersections.
///
/// Adjacent edges may only share their common vertex and non-adjacent edges
/// may not touch at all. The ring may be passed either open or closed.
pub fn is_simple_polygon(ring: &[Point]) -> bool {
    let open = open_ring(ring);
    let n = open.len();
    if n < 3 {
        return false;
    }

    let edge = |i: usize| (open[i], open[(i + 1) % n]);

    for i in 0..n {
        let (a1, a2) = edge(i);
        if a1.approx_eq(a2, EPSILON) {
            return false;
        }
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            let (b1, b2) = edge(j);
            if adjacent {
                // Adjacent edges must not fold back onto each other.
                let shared = if j == i + 1 { a2 } else { a1 };
                let other_a = if j == i + 1 { a1 } else { a2 };
                let other_b = if j == i + 1 { b2 } else { b1 };
                if orientation(shared, other_a, other_b).abs() <= EPSILON {
                    let da = other_a.sub_point(shared);
                    let db = other_b.sub_point(shared);
                    if da.x * db.x + da.y * db.y > 0.0 {
                        return false;
                    }
                }
                continue;
            }
            if segments_intersect(a1, a2, b1, b2) {
                return false;
            }
        }
    }

    true
}

/// Returns `true` when `point` lies strictly inside the polygon ring.
///
/// Points on the boundary are reported as outside.
pub fn point_in_polygon(point: Point, ring: &[Point]) -> bool {
    let open = open_ring(ring);
    let n = open.len();
    if n < 3 {
        return false;
    }

    for i in 0..n {
        let (a, b) = (open[i], open[(i + 1) % n]);
        if orientation(a, b, point).abs() <= EPSILON && on_segment(a, b, point) {
            return false;
        }
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (open[i], open[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Merged bounds should contain every point that built either side.
    fn check_bounds_contain_their_points(points: Vec<Point>) -> Result<(), TestCaseError> {
        let bounds = Bounds::from_points(points.iter().copied()).unwrap();
        for p in points {
            prop_assert!(bounds.contains(p));
        }
        Ok(())
    }

    /// Segment intersection must not depend on argument order.
    fn check_intersection_is_symmetric(
        p1: Point,
        p2: Point,
        q1: Point,
        q2: Point,
    ) -> Result<(), TestCaseError> {
        prop_assert_eq!(
            segments_intersect(p1, p2, q1, q2),
            segments_intersect(q1, q2, p1, p2)
        );
        Ok(())
    }

    /// Distance is symmetric.
    fn check_distance_is_symmetric(a: Point, b: Point) -> Result<(), TestCaseError> {
        prop_assert!(approx_eq!(f64, a.distance(b), b.distance(a)));
        Ok(())
    }

    proptest! {
        #[test]
        fn bounds_contain_their_points(points in prop::collection::vec(point_strategy(), 1..20)) {
            check_bounds_contain_their_points(points)?;
        }

        #[test]
        fn intersection_is_symmetric(
            p1 in point_strategy(),
            p2 in point_strategy(),
            q1 in point_strategy(),
            q2 in point_strategy(),
        ) {
            check_intersection_is_symmetric(p1, p2, q1, q2)?;
        }

        #[test]
        fn distance_is_symmetric(a in point_strategy(), b in point_strategy()) {
            check_distance_is_symmetric(a, b)?;
        }
    }
}
