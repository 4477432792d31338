//! Cantilever retaining-wall profile.
//!
//! The wall is always the same 9-point template: a footing rectangle with a
//! stem rising from it. Only the dimensions change with the design
//! parameters.
//!
//! ```text
//!                 P6 ── P5
//!                /      │
//!               /       │   stem
//!              /        │
//!   P8 ────── P7        P4 ── P3
//!   │                          │   footing
//!   P1/P9 ──────────────────── P2
//! ```
//!
//! All coordinates are local: the base of the footing sits on `y = 0` and its
//! left edge on `x = 0`. Views translate the profile onto the sheet.

use log::debug;

use crate::{
    contour::{self, InternalContours},
    error::{GeometryError, ensure_finite},
    geometry::{self, Bounds, Point},
};

/// Tallest wall accepted, in meters.
///
/// Views, meshes and dimension chains scale with the height; anything taller
/// is far outside cantilever practice and is rejected up front.
pub const MAX_TOTAL_HEIGHT: f64 = 30.0;

/// Design parameters of the wall.
///
/// Field names follow the structural worksheet the values come from: `a` is
/// the retained height above the soil, `b` the embedment below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallParameters {
    pub a: f64,
    pub b: f64,
    pub base_ratio: f64,
    pub toe_divisor: f64,
    pub footing_divisor: f64,
    pub stem_width: f64,
}

impl Default for WallParameters {
    fn default() -> Self {
        Self {
            a: 6.4,
            b: 1.0,
            base_ratio: 0.1,
            toe_divisor: 10.0,
            footing_divisor: 8.0,
            stem_width: 0.3,
        }
    }
}

impl WallParameters {
    /// Total wall height `A + B`.
    pub fn total_height(&self) -> f64 {
        self.a + self.b
    }
}

/// Position of a vertex within the wall template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexRole {
    BaseLeft,
    BaseRight,
    FootingRight,
    StemBaseRight,
    CrownRight,
    CrownLeft,
    StemBaseLeft,
    FootingLeft,
    Close,
}

impl VertexRole {
    /// Every role in polygon order.
    pub const ALL: [VertexRole; 9] = [
        Self::BaseLeft,
        Self::BaseRight,
        Self::FootingRight,
        Self::StemBaseRight,
        Self::CrownRight,
        Self::CrownLeft,
        Self::StemBaseLeft,
        Self::FootingLeft,
        Self::Close,
    ];

    /// Zero-based index in the polygon.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Drawing label, `P1` to `P9`.
    pub fn label(self) -> String {
        format!("P{}", self.index() + 1)
    }

    /// Human readable description.
    pub fn description(self) -> &'static str {
        match self {
            Self::BaseLeft => "base left",
            Self::BaseRight => "base right",
            Self::FootingRight => "footing top right",
            Self::StemBaseRight => "stem base right",
            Self::CrownRight => "crown right",
            Self::CrownLeft => "crown left",
            Self::StemBaseLeft => "stem base left",
            Self::FootingLeft => "footing top left",
            Self::Close => "closing vertex",
        }
    }
}

/// A profile vertex together with its template role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    point: Point,
    role: VertexRole,
}

impl Vertex {
    pub fn point(&self) -> Point {
        self.point
    }

    pub fn role(&self) -> VertexRole {
        self.role
    }

    pub fn label(&self) -> String {
        self.role.label()
    }
}

/// The closed wall polygon and its derived dimensions.
///
/// Built by [`compute_wall_profile`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WallProfile {
    parameters: WallParameters,
    vertices: [Vertex; 9],
    base_total: f64,
    footing_height: f64,
    stem_position: f64,
    bounds: Bounds,
}

impl WallProfile {
    /// Parameters the profile was derived from.
    pub fn parameters(&self) -> &WallParameters {
        &self.parameters
    }

    /// All 9 vertices, closing vertex included.
    pub fn vertices(&self) -> &[Vertex; 9] {
        &self.vertices
    }

    /// Vertex positions in polygon order, closing vertex included.
    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().map(Vertex::point).collect()
    }

    /// Position of the vertex with the given role.
    pub fn point(&self, role: VertexRole) -> Point {
        self.vertices[role.index()].point
    }

    /// Width of the footing.
    pub fn base_total(&self) -> f64 {
        self.base_total
    }

    pub fn footing_height(&self) -> f64 {
        self.footing_height
    }

    /// Height of the stem above the footing.
    pub fn stem_height(&self) -> f64 {
        self.total_height() - self.footing_height
    }

    /// Overall height of the polygon.
    pub fn total_height(&self) -> f64 {
        self.bounds.height()
    }

    pub fn stem_width(&self) -> f64 {
        self.parameters.stem_width
    }

    /// X coordinate of the stem's back face.
    pub fn stem_position(&self) -> f64 {
        self.stem_position
    }

    /// Front projection of the footing, left of the stem.
    pub fn toe(&self) -> f64 {
        self.base_total / 3.0
    }

    /// Footing projection behind the stem.
    ///
    /// Negative when the stem overhangs the footing.
    pub fn heel(&self) -> f64 {
        self.base_total - self.stem_position
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn min_x(&self) -> f64 {
        self.bounds.min_x()
    }

    pub fn max_x(&self) -> f64 {
        self.bounds.max_x()
    }

    pub fn min_y(&self) -> f64 {
        self.bounds.min_y()
    }

    pub fn max_y(&self) -> f64 {
        self.bounds.max_y()
    }

    /// Returns `true` when the stem stands entirely on the footing.
    pub fn stem_on_footing(&self) -> bool {
        self.stem_position <= self.base_total
    }

    /// Length of the shortest non-degenerate edge.
    pub fn min_edge_length(&self) -> f64 {
        geometry::edge_lengths(&self.points())
            .into_iter()
            .filter(|length| *length > geometry::EPSILON)
            .fold(f64::INFINITY, f64::min)
    }

    /// Returns `true` when the polygon has no self-intersections.
    pub fn is_simple(&self) -> bool {
        geometry::is_simple_polygon(&self.points())
    }

    /// Reinforcement contours offset inwards by `coverage`.
    pub fn internal_contours(&self, coverage: f64) -> Result<InternalContours, GeometryError> {
        contour::compute_internal_contour(&self.points(), coverage)
    }
}

/// Derives the wall polygon from its design parameters.
///
/// # Errors
///
/// - [`GeometryError::NonFinite`] if any input or derived value is not finite
/// - [`GeometryError::ZeroDivisor`] if either divisor is zero
/// - [`GeometryError::NonPositiveParameter`] if a divisor, the base ratio or
///   the stem width is negative, or the base ratio or stem width is zero
/// - [`GeometryError::NonPositiveHeight`] if `A + B` is not positive
/// - [`GeometryError::HeightTooLarge`] if `A + B` exceeds [`MAX_TOTAL_HEIGHT`]
/// - [`GeometryError::NotSimple`] if the resulting polygon intersects itself
///
/// # Examples
///
/// ```
/// # use wallsheet_core::wall::{WallParameters, compute_wall_profile};
/// let profile = compute_wall_profile(&WallParameters::default()).unwrap();
/// assert!((profile.total_height() - 7.4).abs() < 1e-6);
/// assert!((profile.base_total() - 0.74).abs() < 1e-6);
/// assert_eq!(profile.vertices().len(), 9);
/// ```
pub fn compute_wall_profile(params: &WallParameters) -> Result<WallProfile, GeometryError> {
    let inputs = [
        ("A", params.a),
        ("B", params.b),
        ("base_ratio", params.base_ratio),
        ("toe_divisor", params.toe_divisor),
        ("footing_divisor", params.footing_divisor),
        ("stem_width", params.stem_width),
    ];
    for (quantity, value) in inputs {
        ensure_finite(quantity, value)?;
    }
    if params.toe_divisor == 0.0 {
        return Err(GeometryError::ZeroDivisor {
            field: "toe_divisor",
        });
    }
    if params.footing_divisor == 0.0 {
        return Err(GeometryError::ZeroDivisor {
            field: "footing_divisor",
        });
    }
    let positive = [
        ("toe_divisor", params.toe_divisor),
        ("footing_divisor", params.footing_divisor),
        ("base_ratio", params.base_ratio),
        ("stem_width", params.stem_width),
    ];
    for (field, value) in positive {
        if value <= 0.0 {
            return Err(GeometryError::NonPositiveParameter { field, value });
        }
    }

    let height = ensure_finite("H", params.total_height())?;
    if height <= 0.0 {
        return Err(GeometryError::NonPositiveHeight { height });
    }
    if height > MAX_TOTAL_HEIGHT {
        return Err(GeometryError::HeightTooLarge {
            height,
            limit: MAX_TOTAL_HEIGHT,
        });
    }

    let base_total = ensure_finite("base_total", params.base_ratio * height)?;
    let footing = ensure_finite("footing_height", height / params.footing_divisor)?;
    let stem_position = ensure_finite(
        "stem_position",
        params.base_ratio * height / 3.0 + height / params.toe_divisor,
    )?;

    let points = [
        Point::new(0.0, 0.0),
        Point::new(base_total, 0.0),
        Point::new(base_total, footing),
        Point::new(stem_position, footing),
        Point::new(stem_position, height),
        Point::new(stem_position - params.stem_width, height),
        Point::new(base_total / 3.0, footing),
        Point::new(0.0, footing),
        Point::new(0.0, 0.0),
    ];
    if !geometry::is_simple_polygon(&points) {
        return Err(GeometryError::NotSimple);
    }

    let vertices = std::array::from_fn(|i| Vertex {
        point: points[i],
        role: VertexRole::ALL[i],
    });
    let bounds = Bounds::from_points(points).ok_or(GeometryError::TooFewVertices {
        required: 9,
        actual: 0,
    })?;

    debug!(
        height,
        base_total,
        footing,
        stem_position;
        "Computed wall profile"
    );

    Ok(WallProfile {
        parameters: *params,
        vertices,
        base_total,
        footing_height: footing,
        stem_position,
        bounds,
    })
}

/// A pseudo-3D extrusion of the wall profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    original: Vec<Point>,
    projected: Vec<Point>,
    edges: Vec<(Point, Point)>,
}

impl Projection {
    /// The profile vertices.
    pub fn original(&self) -> &[Point] {
        &self.original
    }

    /// The profile vertices moved along the depth direction.
    pub fn projected(&self) -> &[Point] {
        &self.projected
    }

    /// Segments joining each original vertex to its projection.
    pub fn edges(&self) -> &[(Point, Point)] {
        &self.edges
    }
}

/// Extrudes the profile at a fixed 45° by `magnitude` in both axes.
pub fn compute_3d_projection(profile: &WallProfile, magnitude: f64) -> Projection {
    let shift = Point::new(magnitude, magnitude);
    let original = profile.points();
    let projected: Vec<Point> = original.iter().map(|p| p.add_point(shift)).collect();
    let edges = original
        .iter()
        .copied()
        .zip(projected.iter().copied())
        .collect();

    Projection {
        original,
        projected,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_worked_example() {
        let profile = compute_wall_profile(&WallParameters::default()).unwrap();

        assert_approx_eq!(f64, profile.total_height(), 7.4, epsilon = 1e-6);
        assert_approx_eq!(f64, profile.base_total(), 0.74, epsilon = 1e-6);
        assert_approx_eq!(f64, profile.footing_height(), 0.925, epsilon = 1e-6);
        assert_approx_eq!(f64, profile.stem_position(), 0.986667, epsilon = 1e-6);
        assert_approx_eq!(f64, profile.stem_height(), 6.475, epsilon = 1e-6);
        assert_approx_eq!(f64, profile.toe(), 0.246667, epsilon = 1e-6);
        // The stem overhangs the footing with these values
        assert!(profile.heel() < 0.0);
        assert!(!profile.stem_on_footing());
    }

    #[test]
    fn test_vertex_layout() {
        let profile = compute_wall_profile(&WallParameters::default()).unwrap();
        let vertices = profile.vertices();

        assert_eq!(vertices[0].point(), vertices[8].point());
        assert_eq!(vertices[0].label(), "P1");
        assert_eq!(vertices[8].label(), "P9");
        assert_eq!(vertices[5].role(), VertexRole::CrownLeft);

        let crown_left = profile.point(VertexRole::CrownLeft);
        let crown_right = profile.point(VertexRole::CrownRight);
        assert_approx_eq!(f64, crown_right.x() - crown_left.x(), 0.3, epsilon = 1e-9);
        assert_approx_eq!(f64, crown_left.y(), 7.4, epsilon = 1e-9);
    }

    #[test]
    fn test_extrema_follow_vertices() {
        let profile = compute_wall_profile(&WallParameters::default()).unwrap();

        assert_approx_eq!(f64, profile.min_y(), 0.0);
        assert_approx_eq!(f64, profile.min_x(), 0.0);
        assert_approx_eq!(f64, profile.max_x(), profile.stem_position());
        assert_approx_eq!(f64, profile.max_y(), 7.4, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_divisors_rejected() {
        let params = WallParameters {
            toe_divisor: 0.0,
            ..WallParameters::default()
        };
        assert_eq!(
            compute_wall_profile(&params),
            Err(GeometryError::ZeroDivisor {
                field: "toe_divisor"
            })
        );

        let params = WallParameters {
            footing_divisor: 0.0,
            ..WallParameters::default()
        };
        assert_eq!(
            compute_wall_profile(&params),
            Err(GeometryError::ZeroDivisor {
                field: "footing_divisor"
            })
        );
    }

    #[test]
    fn test_non_positive_height_rejected() {
        let params = WallParameters {
            a: -1.0,
            b: 1.0,
            ..WallParameters::default()
        };
        assert!(matches!(
            compute_wall_profile(&params),
            Err(GeometryError::NonPositiveHeight { .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let params = WallParameters {
            base_ratio: f64::NAN,
            ..WallParameters::default()
        };
        assert_eq!(
            compute_wall_profile(&params),
            Err(GeometryError::NonFinite {
                quantity: "base_ratio"
            })
        );
    }

    #[test]
    fn test_non_positive_parameters_rejected() {
        let cases = [
            ("base_ratio", -0.1),
            ("base_ratio", 0.0),
            ("stem_width", -0.5),
            ("stem_width", 0.0),
            ("toe_divisor", -10.0),
            ("footing_divisor", -8.0),
        ];
        for (field, value) in cases {
            let mut params = WallParameters::default();
            match field {
                "base_ratio" => params.base_ratio = value,
                "stem_width" => params.stem_width = value,
                "toe_divisor" => params.toe_divisor = value,
                _ => params.footing_divisor = value,
            }
            assert_eq!(
                compute_wall_profile(&params),
                Err(GeometryError::NonPositiveParameter { field, value }),
                "{field} = {value}"
            );
        }
    }

    #[test]
    fn test_excessive_height_rejected() {
        let params = WallParameters {
            a: 1e9,
            ..WallParameters::default()
        };
        assert!(matches!(
            compute_wall_profile(&params),
            Err(GeometryError::HeightTooLarge { limit, .. }) if limit == MAX_TOTAL_HEIGHT
        ));

        let params = WallParameters {
            a: MAX_TOTAL_HEIGHT - 1.0,
            b: 1.0,
            ..WallParameters::default()
        };
        assert!(compute_wall_profile(&params).is_ok());
    }

    #[test]
    fn test_degenerate_stem_rejected() {
        // A stem thinner than the vertex tolerance collapses the crown edge
        let params = WallParameters {
            stem_width: 1e-12,
            ..WallParameters::default()
        };
        assert_eq!(compute_wall_profile(&params), Err(GeometryError::NotSimple));
    }

    #[test]
    fn test_projection_shifts_every_vertex() {
        let profile = compute_wall_profile(&WallParameters::default()).unwrap();
        let projection = compute_3d_projection(&profile, 2.0);

        assert_eq!(projection.original().len(), 9);
        assert_eq!(projection.projected().len(), 9);
        assert_eq!(projection.edges().len(), 9);
        for (from, to) in projection.edges() {
            assert_approx_eq!(f64, to.x() - from.x(), 2.0);
            assert_approx_eq!(f64, to.y() - from.y(), 2.0);
        }
    }
}
