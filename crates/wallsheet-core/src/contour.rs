//! Reinforcement contours.
//!
//! A contour is the line along which bars are laid: the concrete outline
//! pulled inwards by the coverage. The stem and the footing each get one.
//!
//! The adjustment is not a general polygon offset. Each contour vertex is
//! taken from a profile vertex and shifted by `±c` per axis, following a
//! fixed table keyed by vertex role.

use std::fmt;

use log::debug;

use crate::{
    error::GeometryError,
    geometry::{self, Point},
    wall::VertexRole,
};

/// Default concrete coverage in meters.
pub const DEFAULT_COVERAGE: f64 = 0.05;

/// Number of profile vertices the contour table references.
const REQUIRED_VERTICES: usize = 8;

/// Part of the wall a contour belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContourRegion {
    Stem,
    Footing,
}

impl fmt::Display for ContourRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stem => write!(f, "stem"),
            Self::Footing => write!(f, "footing"),
        }
    }
}

/// A closed polyline inset from the wall outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    region: ContourRegion,
    coverage: f64,
    points: Vec<Point>,
}

impl Contour {
    pub fn region(&self) -> ContourRegion {
        self.region
    }

    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    /// Points in order; the last equals the first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of distinct vertices (closing point excluded).
    pub fn vertex_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Returns the `index`-th point.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    /// Segments between consecutive points.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// The two contours of a wall.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalContours {
    pub stem: Contour,
    pub footing: Contour,
}

/// Per-vertex offset signs: `(role, sign_x, sign_y)`.
type Adjustment = (VertexRole, f64, f64);

/// The stem's first two points sit on the footing base line (`P2.y`) rather
/// than on a profile vertex, so their y source is overridden.
const STEM_TABLE: [(Adjustment, Option<VertexRole>); 5] = [
    ((VertexRole::StemBaseLeft, 1.0, 1.0), Some(VertexRole::BaseRight)),
    ((VertexRole::StemBaseRight, -1.0, 1.0), Some(VertexRole::BaseRight)),
    ((VertexRole::CrownRight, -1.0, -1.0), None),
    ((VertexRole::CrownLeft, 1.0, -1.0), None),
    ((VertexRole::StemBaseLeft, 1.0, -1.0), None),
];

const FOOTING_TABLE: [Adjustment; 4] = [
    (VertexRole::BaseLeft, 1.0, 1.0),
    (VertexRole::BaseRight, -1.0, 1.0),
    (VertexRole::FootingRight, -1.0, -1.0),
    (VertexRole::FootingLeft, 1.0, -1.0),
];

fn close(mut points: Vec<Point>) -> Vec<Point> {
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

/// Computes the stem and footing contours for a wall polygon.
///
/// `vertices` is the profile in template order (see
/// [`crate::wall::WallProfile::points`]); the closing vertex is optional.
///
/// # Errors
///
/// - [`GeometryError::TooFewVertices`] for fewer than 8 vertices
/// - [`GeometryError::NonPositiveCoverage`] for `coverage <= 0`
/// - [`GeometryError::CoverageTooLarge`] when `coverage` reaches half of the
///   shortest non-degenerate profile edge
pub fn compute_internal_contour(
    vertices: &[Point],
    coverage: f64,
) -> Result<InternalContours, GeometryError> {
    if vertices.len() < REQUIRED_VERTICES {
        return Err(GeometryError::TooFewVertices {
            required: REQUIRED_VERTICES,
            actual: vertices.len(),
        });
    }
    if !coverage.is_finite() {
        return Err(GeometryError::NonFinite {
            quantity: "coverage",
        });
    }
    if coverage <= 0.0 {
        return Err(GeometryError::NonPositiveCoverage { coverage });
    }

    let min_edge = geometry::edge_lengths(vertices)
        .into_iter()
        .filter(|length| *length > geometry::EPSILON)
        .fold(f64::INFINITY, f64::min);
    let limit = min_edge / 2.0;
    if coverage >= limit {
        return Err(GeometryError::CoverageTooLarge { coverage, limit });
    }

    let at = |role: VertexRole| vertices[role.index()];
    let c = coverage;

    let stem = STEM_TABLE
        .iter()
        .map(|&((role, sx, sy), y_source)| {
            let base = at(role);
            let y = y_source.map_or(base.y(), |source| at(source).y());
            Point::new(base.x() + sx * c, y + sy * c)
        })
        .collect();

    let footing = FOOTING_TABLE
        .iter()
        .map(|&(role, sx, sy)| {
            let base = at(role);
            Point::new(base.x() + sx * c, base.y() + sy * c)
        })
        .collect();

    debug!(coverage, limit; "Computed internal contours");

    Ok(InternalContours {
        stem: Contour {
            region: ContourRegion::Stem,
            coverage,
            points: close(stem),
        },
        footing: Contour {
            region: ContourRegion::Footing,
            coverage,
            points: close(footing),
        },
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::wall::{WallParameters, compute_wall_profile};

    fn default_points() -> Vec<Point> {
        compute_wall_profile(&WallParameters::default())
            .unwrap()
            .points()
    }

    #[test]
    fn test_contour_shapes() {
        let contours = compute_internal_contour(&default_points(), DEFAULT_COVERAGE).unwrap();

        assert_eq!(contours.stem.vertex_count(), 5);
        assert_eq!(contours.stem.points().len(), 6);
        assert_eq!(contours.footing.vertex_count(), 4);
        assert_eq!(contours.footing.points().len(), 5);
        assert_eq!(contours.stem.points()[0], contours.stem.points()[5]);
        assert_eq!(contours.stem.region(), ContourRegion::Stem);
    }

    #[test]
    fn test_footing_contour_values() {
        let contours = compute_internal_contour(&default_points(), 0.05).unwrap();
        let footing = contours.footing.points();

        assert_approx_eq!(f64, footing[0].x(), 0.05, epsilon = 1e-9);
        assert_approx_eq!(f64, footing[0].y(), 0.05, epsilon = 1e-9);
        assert_approx_eq!(f64, footing[1].x(), 0.69, epsilon = 1e-9);
        assert_approx_eq!(f64, footing[2].y(), 0.875, epsilon = 1e-9);
        assert_approx_eq!(f64, footing[3].x(), 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_stem_contour_values() {
        let points = default_points();
        let contours = compute_internal_contour(&points, 0.05).unwrap();
        let stem = contours.stem.points();

        // First two points sit just above the footing base
        assert_approx_eq!(f64, stem[0].y(), 0.05, epsilon = 1e-9);
        assert_approx_eq!(f64, stem[1].y(), 0.05, epsilon = 1e-9);
        assert_approx_eq!(f64, stem[1].x(), points[3].x() - 0.05, epsilon = 1e-9);
        assert_approx_eq!(f64, stem[2].y(), 7.35, epsilon = 1e-9);
        assert_approx_eq!(f64, stem[3].x(), points[5].x() + 0.05, epsilon = 1e-9);
        assert_approx_eq!(f64, stem[4].y(), points[6].y() - 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_too_few_vertices() {
        let points = default_points();
        assert_eq!(
            compute_internal_contour(&points[..5], 0.05),
            Err(GeometryError::TooFewVertices {
                required: 8,
                actual: 5
            })
        );
    }

    #[test]
    fn test_non_positive_coverage() {
        assert!(matches!(
            compute_internal_contour(&default_points(), 0.0),
            Err(GeometryError::NonPositiveCoverage { .. })
        ));
        assert!(matches!(
            compute_internal_contour(&default_points(), -0.1),
            Err(GeometryError::NonPositiveCoverage { .. })
        ));
    }

    #[test]
    fn test_coverage_too_large() {
        // The shortest default edge is the 0.2467 toe step
        let err = compute_internal_contour(&default_points(), 0.2).unwrap_err();
        let GeometryError::CoverageTooLarge { limit, .. } = err else {
            panic!("unexpected error {err:?}");
        };
        assert!(limit < 0.2 && limit > 0.12);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        geometry::point_in_polygon,
        wall::{WallParameters, WallProfile, compute_wall_profile},
    };

    /// Profiles whose stem stands on the footing.
    fn profile_strategy() -> impl Strategy<Value = WallProfile> {
        (
            2.0f64..15.0,
            0.0f64..3.0,
            0.4f64..1.0,
            2.0f64..20.0,
            3.0f64..15.0,
            0.1f64..0.6,
        )
            .prop_map(|(a, b, base_ratio, toe_divisor, footing_divisor, stem_width)| {
                compute_wall_profile(&WallParameters {
                    a,
                    b,
                    base_ratio,
                    toe_divisor,
                    footing_divisor,
                    stem_width,
                })
                .unwrap()
            })
            .prop_filter("stem must stand on the footing", |profile| {
                profile.stem_on_footing() && profile.heel() > 1e-3
            })
    }

    /// Contours built with a valid coverage lie strictly inside the wall.
    fn check_contours_inside(profile: WallProfile, fraction: f64) -> Result<(), TestCaseError> {
        let coverage = fraction * profile.min_edge_length() / 2.0;
        let ring = profile.points();
        let contours = profile.internal_contours(coverage).unwrap();

        for contour in [&contours.stem, &contours.footing] {
            for point in &contour.points()[..contour.vertex_count()] {
                prop_assert!(
                    point_in_polygon(*point, &ring),
                    "{} point {:?} outside {:?} (c = {})",
                    contour.region(),
                    point,
                    ring,
                    coverage
                );
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn contours_inside(profile in profile_strategy(), fraction in 0.01f64..0.99) {
            check_contours_inside(profile, fraction)?;
        }
    }
}
