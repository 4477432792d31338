//! Reinforcement steel layout.
//!
//! Two families of steel are placed:
//!
//! - **Bars** seen in section, sampled at a fixed spacing along one edge of
//!   each reinforcement contour ([`sample_bars_along_edge`],
//!   [`layout_wall_bars`]).
//! - **Meshes** on the flat faces of the wall, drawn as a rectangular grid
//!   ([`generate_mesh_grid`]).

use std::{fmt, str::FromStr};

use log::{debug, trace};
use serde::Deserialize;

use crate::{
    color::AciColor,
    contour::InternalContours,
    error::GeometryError,
    geometry::{Bounds, EPSILON, Point},
    wall::WallProfile,
};

/// Distance trimmed from both ends of an edge before bars are placed.
pub const BAR_EDGE_INSET: f64 = 0.1;

/// Most bars in one row, or lines in one mesh direction.
pub const MAX_ELEMENTS: usize = 10_000;

/// Number of evenly spaced stations covering `span`, `floor(span/step) + 1`.
fn station_count(what: &'static str, span: f64, step: f64) -> Result<usize, GeometryError> {
    let too_many = GeometryError::TooManyElements {
        what,
        limit: MAX_ELEMENTS,
    };
    let steps = (span / step).floor().max(0.0);
    if !steps.is_finite() || steps >= MAX_ELEMENTS as f64 {
        return Err(too_many);
    }
    (steps as usize).checked_add(1).ok_or(too_many)
}

/// Nominal bar diameters, in inches.
///
/// Deserialized from strings such as `"5/8"`; a trailing inch mark is
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum BarDiameter {
    ThreeEighths,
    Half,
    FiveEighths,
    ThreeQuarters,
    One,
}

impl BarDiameter {
    /// Radius of the dot that marks a bar in section view.
    pub fn display_radius(self) -> f64 {
        match self {
            Self::ThreeEighths | Self::Half => 0.01,
            _ => 0.02,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThreeEighths => "3/8",
            Self::Half => "1/2",
            Self::FiveEighths => "5/8",
            Self::ThreeQuarters => "3/4",
            Self::One => "1",
        }
    }
}

impl fmt::Display for BarDiameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarDiameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('"') {
            "3/8" => Ok(Self::ThreeEighths),
            "1/2" => Ok(Self::Half),
            "5/8" => Ok(Self::FiveEighths),
            "3/4" => Ok(Self::ThreeQuarters),
            "1" => Ok(Self::One),
            _ => Err(format!(
                "invalid bar diameter `{s}`, valid values: 3/8, 1/2, 5/8, 3/4, 1"
            )),
        }
    }
}

impl TryFrom<String> for BarDiameter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Contour edge a bar row is laid along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BarZone {
    FootingTop,
    FootingBottom,
    StemLeft,
    StemRight,
}

impl BarZone {
    /// All zones in layout order.
    pub const ALL: [BarZone; 4] = [
        Self::FootingTop,
        Self::FootingBottom,
        Self::StemLeft,
        Self::StemRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::FootingTop => "footing_top",
            Self::FootingBottom => "footing_bottom",
            Self::StemLeft => "stem_left",
            Self::StemRight => "stem_right",
        }
    }

    /// Shift applied to bar dots so they read clearly against the contour line.
    pub fn display_nudge(self) -> Point {
        match self {
            Self::FootingTop => Point::new(0.0, -0.05),
            Self::FootingBottom => Point::new(0.0, 0.04),
            Self::StemLeft => Point::new(0.05, 0.0),
            Self::StemRight => Point::new(-0.05, 0.0),
        }
    }

    /// Edge of the contours this zone samples, as `(from, to)`.
    fn edge(self, contours: &InternalContours) -> (Point, Point) {
        let footing = &contours.footing;
        let stem = &contours.stem;
        match self {
            Self::FootingTop => (footing.point(2), footing.point(3)),
            Self::FootingBottom => (footing.point(0), footing.point(1)),
            Self::StemLeft => (stem.point(0), stem.point(3)),
            Self::StemRight => (stem.point(2), stem.point(1)),
        }
    }
}

impl fmt::Display for BarZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reinforcement bar seen in cross-section.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    position: Point,
    diameter: BarDiameter,
    zone: BarZone,
    label: String,
}

impl Bar {
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> f64 {
        self.position.y()
    }

    pub fn diameter(&self) -> BarDiameter {
        self.diameter
    }

    pub fn zone(&self) -> BarZone {
        self.zone
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Where the bar dot is drawn.
    pub fn display_position(&self) -> Point {
        self.position.add_point(self.zone.display_nudge())
    }
}

/// Places bars evenly along the edge `p0 → p1`.
///
/// Both ends are trimmed by [`BAR_EDGE_INSET`]; the first and last bars land
/// exactly on the trimmed end points. A zero-length edge has no bars.
///
/// # Errors
///
/// Returns [`GeometryError::NonPositiveSpacing`] if `spacing` is not a
/// positive finite number, and [`GeometryError::TooManyElements`] if the row
/// would hold more than [`MAX_ELEMENTS`] bars.
///
/// # Examples
///
/// ```
/// # use wallsheet_core::geometry::Point;
/// # use wallsheet_core::steel::{BarDiameter, BarZone, sample_bars_along_edge};
/// let bars = sample_bars_along_edge(
///     Point::new(0.0, 0.0),
///     Point::new(1.2, 0.0),
///     0.3,
///     BarDiameter::Half,
///     BarZone::FootingBottom,
/// )
/// .unwrap();
///
/// // 1.0 usable after trimming -> floor(1.0 / 0.3) + 1
/// assert_eq!(bars.len(), 4);
/// assert_eq!(bars[0].label(), "footing_bottom_1");
/// ```
pub fn sample_bars_along_edge(
    p0: Point,
    p1: Point,
    spacing: f64,
    diameter: BarDiameter,
    zone: BarZone,
) -> Result<Vec<Bar>, GeometryError> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(GeometryError::NonPositiveSpacing { spacing });
    }

    let Some(direction) = p1.sub_point(p0).normalize() else {
        return Ok(Vec::new());
    };

    let start = p0.add_point(direction.scale(BAR_EDGE_INSET));
    let end = p1.sub_point(direction.scale(BAR_EDGE_INSET));
    let useful = start.distance(end);
    let count = station_count("bar row", useful, spacing)?;
    let divisor = count.saturating_sub(1).max(1) as f64;

    trace!(zone:% = zone, useful, count; "Sampling bars along edge");

    Ok((0..count)
        .map(|i| Bar {
            position: start.lerp(end, i as f64 / divisor),
            diameter,
            zone,
            label: format!("{zone}_{}", i + 1),
        })
        .collect())
}

/// Spacing and diameter of one bar row.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ZoneSpec {
    pub spacing: f64,
    pub diameter: BarDiameter,
}

impl ZoneSpec {
    pub fn new(spacing: f64, diameter: BarDiameter) -> Self {
        Self { spacing, diameter }
    }
}

/// Bar rows for each zone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReinforcementConfig {
    pub footing_top: ZoneSpec,
    pub footing_bottom: ZoneSpec,
    pub stem_left: ZoneSpec,
    pub stem_right: ZoneSpec,
}

impl Default for ReinforcementConfig {
    fn default() -> Self {
        Self {
            footing_top: ZoneSpec::new(0.17, BarDiameter::ThreeEighths),
            footing_bottom: ZoneSpec::new(0.20, BarDiameter::Half),
            stem_left: ZoneSpec::new(0.20, BarDiameter::Half),
            stem_right: ZoneSpec::new(0.20, BarDiameter::ThreeEighths),
        }
    }
}

impl ReinforcementConfig {
    /// Returns the row specification for `zone`.
    pub fn zone(&self, zone: BarZone) -> ZoneSpec {
        match zone {
            BarZone::FootingTop => self.footing_top,
            BarZone::FootingBottom => self.footing_bottom,
            BarZone::StemLeft => self.stem_left,
            BarZone::StemRight => self.stem_right,
        }
    }
}

/// All bars of a wall section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallBars {
    bars: Vec<Bar>,
}

impl WallBars {
    pub fn all(&self) -> &[Bar] {
        &self.bars
    }

    /// Bars of one zone, in sampling order.
    pub fn zone(&self, zone: BarZone) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(move |bar| bar.zone == zone)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Samples all four bar rows of a wall section.
pub fn layout_wall_bars(
    contours: &InternalContours,
    config: &ReinforcementConfig,
) -> Result<WallBars, GeometryError> {
    let mut bars = Vec::new();
    for zone in BarZone::ALL {
        let spec = config.zone(zone);
        let (from, to) = zone.edge(contours);
        let row = sample_bars_along_edge(from, to, spec.spacing, spec.diameter, zone)?;
        debug!(zone:% = zone, count = row.len(); "Laid out bar row");
        bars.extend(row);
    }
    Ok(WallBars { bars })
}

/// Flat wall faces that receive a reinforcement mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFace {
    Interior,
    Exterior,
    Bottom,
    Top,
}

/// Local origin of every mesh region.
const MESH_ORIGIN: Point = Point::new(1.0, 2.0);

/// Width of every mesh region.
pub const MESH_WIDTH: f64 = 4.0;

impl MeshFace {
    pub const ALL: [MeshFace; 4] = [Self::Interior, Self::Exterior, Self::Bottom, Self::Top];

    /// Face title as printed on the sheet.
    pub fn title(self) -> &'static str {
        match self {
            Self::Interior => "STEEL ON INTERIOR FACE, AXIS A-A",
            Self::Exterior => "STEEL ON EXTERIOR FACE, AXIS A-A",
            Self::Bottom => "FOOTING BOTTOM REINFORCEMENT",
            Self::Top => "FOOTING TOP REINFORCEMENT",
        }
    }

    /// Suffix used for layer names.
    pub fn layer_suffix(self) -> &'static str {
        match self {
            Self::Interior => "INTERIOR",
            Self::Exterior => "EXTERIOR",
            Self::Bottom => "BOTTOM",
            Self::Top => "TOP",
        }
    }

    /// Steel drawn on this face by default.
    pub fn default_diameter(self) -> BarDiameter {
        match self {
            Self::Interior | Self::Exterior => BarDiameter::ThreeEighths,
            Self::Bottom | Self::Top => BarDiameter::Half,
        }
    }

    /// Color of the vertical mesh lines.
    pub fn vertical_color(self) -> AciColor {
        match self {
            Self::Interior | Self::Exterior => AciColor::Green,
            Self::Bottom | Self::Top => AciColor::Cyan,
        }
    }

    /// Region covered by the mesh, in local view coordinates.
    ///
    /// Stem faces span the stem height; footing faces span the footing width.
    pub fn region_for(self, profile: &WallProfile) -> Bounds {
        let height = match self {
            Self::Interior | Self::Exterior => profile.total_height() - profile.footing_height(),
            Self::Bottom | Self::Top => profile.base_total(),
        };
        Bounds::from_corners(
            MESH_ORIGIN,
            MESH_ORIGIN.add_point(Point::new(MESH_WIDTH, height)),
        )
    }
}

/// Role of a mesh segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshLineKind {
    Vertical,
    Horizontal,
    Frame,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshLine {
    pub kind: MeshLineKind,
    pub start: Point,
    pub end: Point,
}

/// The grid of one mesh face.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGrid {
    face: MeshFace,
    region: Bounds,
    pitch: f64,
    lines: Vec<MeshLine>,
}

impl MeshGrid {
    pub fn face(&self) -> MeshFace {
        self.face
    }

    pub fn region(&self) -> Bounds {
        self.region
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn lines(&self) -> &[MeshLine] {
        &self.lines
    }

    /// Lines of the given kind.
    pub fn lines_of(&self, kind: MeshLineKind) -> impl Iterator<Item = &MeshLine> {
        self.lines.iter().filter(move |line| line.kind == kind)
    }
}

/// Positions `min + i·pitch` clamped to `max`, for `i` in `0..=floor(span/pitch)+1`.
fn grid_positions(
    min: f64,
    max: f64,
    pitch: f64,
) -> Result<impl Iterator<Item = f64>, GeometryError> {
    let steps = station_count("mesh grid", max - min, pitch)?;
    Ok((0..=steps).map(move |i| (min + i as f64 * pitch).min(max)))
}

/// Builds the mesh grid covering `region`.
///
/// The grid has `floor(width/pitch)+2` vertical lines and
/// `floor(height/pitch)+2` horizontal lines. Positions past the far edge are
/// clamped onto it, so both boundaries always carry a line. Four frame
/// segments outline the region.
///
/// # Errors
///
/// Returns [`GeometryError::NonPositivePitch`] if `pitch` is not a positive
/// finite number, and [`GeometryError::TooManyElements`] if either direction
/// would need more than [`MAX_ELEMENTS`] lines.
pub fn generate_mesh_grid(
    region: Bounds,
    pitch: f64,
    face: MeshFace,
) -> Result<MeshGrid, GeometryError> {
    if !pitch.is_finite() || pitch <= EPSILON {
        return Err(GeometryError::NonPositivePitch { pitch });
    }

    let (x_min, x_max) = (region.min_x(), region.max_x());
    let (y_min, y_max) = (region.min_y(), region.max_y());

    let mut lines: Vec<MeshLine> = grid_positions(x_min, x_max, pitch)?
        .map(|x| MeshLine {
            kind: MeshLineKind::Vertical,
            start: Point::new(x, y_min),
            end: Point::new(x, y_max),
        })
        .collect();

    lines.extend(grid_positions(y_min, y_max, pitch)?.map(|y| MeshLine {
        kind: MeshLineKind::Horizontal,
        start: Point::new(x_min, y),
        end: Point::new(x_max, y),
    }));

    let corners = [
        Point::new(x_min, y_min),
        Point::new(x_max, y_min),
        Point::new(x_max, y_max),
        Point::new(x_min, y_max),
    ];
    lines.extend((0..4).map(|i| MeshLine {
        kind: MeshLineKind::Frame,
        start: corners[i],
        end: corners[(i + 1) % 4],
    }));

    debug!(face:? = face, pitch, lines = lines.len(); "Generated mesh grid");

    Ok(MeshGrid {
        face,
        region,
        pitch,
        lines,
    })
}
