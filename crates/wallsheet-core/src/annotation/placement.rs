//! Where annotations go on each view.
//!
//! Every function here is a fixed rule table over the wall geometry: the
//! order of the returned annotations is deterministic and the offsets are
//! chosen so that labels of neighbouring features do not collide.

use log::{debug, trace};

use super::{
    dimension::{Axis, Dimension, draw_dimension},
    leader::{Leader, LeaderDirection, MultiLeader, WeldSymbol, draw_leader},
    title::InfoBlock,
};
use crate::{
    contour::InternalContours,
    geometry::Point,
    schedule::{BarCallout, ReinforcementSchedule},
    steel::{Bar, BarDiameter, BarZone, MeshFace, MeshGrid, ReinforcementConfig, WallBars},
    wall::{VertexRole, WallProfile},
};

/// Segments shorter than this get no dimension.
const MIN_DIMENSIONED: f64 = 0.1;
const OUTER_OFFSET: f64 = 0.8;
const INNER_OFFSET: f64 = 0.3;
/// Height of each step dimension between the soil line and the crown.
const SOIL_STEP: f64 = 1.0;

/// The wall views of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallViewKind {
    Reinforcement,
    Drainage,
    Projection,
}

impl WallViewKind {
    pub const ALL: [WallViewKind; 3] = [Self::Reinforcement, Self::Drainage, Self::Projection];

    /// View number shown in the title block.
    pub fn number(self) -> u32 {
        match self {
            Self::Reinforcement => 1,
            Self::Drainage => 2,
            Self::Projection => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Reinforcement => "WALL TYPE I REINFORCEMENT, SECTION 1-1",
            Self::Drainage => "WALL TYPE I DRAINAGE, SECTION 1-1",
            Self::Projection => "RETAINING WALL 3D VIEW",
        }
    }
}

/// Label of a dimension of `length` for the given view.
fn length_label(length: f64, kind: WallViewKind) -> String {
    match kind {
        WallViewKind::Reinforcement => format!("{length:.2}m"),
        _ => format!("{length:.2}"),
    }
}

/// Dimensions of a wall view, in drawing order.
///
/// `soil_level` is the height of the front soil line; it is only used by the
/// drainage view and defaults to the embedment `B`.
///
/// | # | Reinforcement          | Drainage                          |
/// |---|------------------------|-----------------------------------|
/// | 1 | total base, −0.8       | total base, −0.8                  |
/// | 2 | toe, −0.3              | toe, −0.3                         |
/// | 3 | heel, −0.3             | heel, −0.3                        |
/// | 4 | stem base, −0.3        | stem base, −0.3                   |
/// | 5 | crown width, +0.3      | total height, +0.8                |
/// | 6 | total height, +0.8     | footing height, −0.3 (left side)  |
/// | 7 | stem height, +0.3      | footing top to soil, −0.3         |
/// | 8 | footing height, +0.3   | soil to crown in 1.0 steps, −0.3  |
///
/// Rows marked with a −0.3/+0.3 offset on a short segment are skipped when the
/// segment is not longer than 0.1. The projection view has no dimensions.
pub fn place_wall_dimensions(
    profile: &WallProfile,
    soil_level: Option<f64>,
    kind: WallViewKind,
) -> Vec<Dimension> {
    if kind == WallViewKind::Projection {
        return Vec::new();
    }

    let (min_x, max_x) = (profile.min_x(), profile.max_x());
    let (min_y, max_y) = (profile.min_y(), profile.max_y());
    let footing_top = min_y + profile.footing_height();
    let label = |length: f64| length_label(length, kind);

    let stem_base_left = profile.point(VertexRole::StemBaseLeft).x();
    let stem_base_right = profile.point(VertexRole::StemBaseRight).x();
    let crown_left = profile.point(VertexRole::CrownLeft).x();
    let crown_right = profile.point(VertexRole::CrownRight).x();

    let mut dims = vec![draw_dimension(
        Axis::Horizontal,
        min_x,
        max_x,
        min_y,
        -OUTER_OFFSET,
        label(max_x - min_x),
    )];

    let segments = [
        (min_x, stem_base_left),
        (crown_right, max_x),
        (stem_base_left, stem_base_right),
    ];
    for (from, to) in segments {
        let length = to - from;
        if length > MIN_DIMENSIONED {
            dims.push(draw_dimension(
                Axis::Horizontal,
                from,
                to,
                min_y,
                -INNER_OFFSET,
                label(length),
            ));
        }
    }

    let total_height = draw_dimension(
        Axis::Vertical,
        min_y,
        max_y,
        max_x,
        OUTER_OFFSET,
        label(max_y - min_y),
    );
    let footing_height = profile.footing_height();

    match kind {
        WallViewKind::Reinforcement => {
            dims.push(draw_dimension(
                Axis::Horizontal,
                crown_left,
                crown_right,
                max_y,
                INNER_OFFSET,
                label(crown_right - crown_left),
            ));
            dims.push(total_height);
            dims.push(draw_dimension(
                Axis::Vertical,
                footing_top,
                max_y,
                max_x,
                INNER_OFFSET,
                label(max_y - footing_top),
            ));
            if footing_height > MIN_DIMENSIONED {
                dims.push(draw_dimension(
                    Axis::Vertical,
                    min_y,
                    footing_top,
                    max_x,
                    INNER_OFFSET,
                    label(footing_height),
                ));
            }
        }
        WallViewKind::Drainage => {
            dims.push(total_height);
            if footing_height > MIN_DIMENSIONED {
                dims.push(draw_dimension(
                    Axis::Vertical,
                    min_y,
                    footing_top,
                    min_x,
                    -INNER_OFFSET,
                    label(footing_height),
                ));
            }

            let soil = min_y + soil_level.unwrap_or(profile.parameters().b);
            let below_soil = soil - footing_top;
            if below_soil > MIN_DIMENSIONED {
                dims.push(draw_dimension(
                    Axis::Vertical,
                    footing_top,
                    soil,
                    min_x,
                    -INNER_OFFSET,
                    label(below_soil),
                ));
            }

            let upper = (max_y - soil).max(0.0);
            let steps = (upper / SOIL_STEP).floor() as usize;
            for i in 0..steps {
                let from = soil + i as f64 * SOIL_STEP;
                dims.push(draw_dimension(
                    Axis::Vertical,
                    from,
                    from + SOIL_STEP,
                    min_x,
                    -INNER_OFFSET,
                    label(SOIL_STEP),
                ));
            }
            let remainder = upper - steps as f64 * SOIL_STEP;
            if remainder > MIN_DIMENSIONED {
                dims.push(draw_dimension(
                    Axis::Vertical,
                    soil + steps as f64 * SOIL_STEP,
                    max_y,
                    min_x,
                    -INNER_OFFSET,
                    label(remainder),
                ));
            }
        }
        WallViewKind::Projection => {}
    }

    debug!(view:? = kind, count = dims.len(); "Placed wall dimensions");
    dims
}

/// Callout text of a bar row, e.g. `1∅3/8"@17cm`.
pub fn bar_callout_text(quantity: u32, diameter: &str, spacing: f64) -> String {
    let cm = (spacing * 100.0).round() as i64;
    format!("{quantity}∅{diameter}\"@{cm}cm")
}

/// Bar a zone's leader points at.
fn reference_bar<'a>(zone: BarZone, bars: &[&'a Bar]) -> Option<&'a Bar> {
    match zone {
        BarZone::FootingTop | BarZone::FootingBottom | BarZone::StemLeft => bars.first().copied(),
        BarZone::StemRight => bars.last().copied(),
    }
}

/// Displacement from the reference bar to the leader's text end.
fn leader_offset(zone: BarZone) -> Point {
    match zone {
        BarZone::FootingTop => Point::new(-1.5, 0.5),
        BarZone::FootingBottom => Point::new(-2.0, 0.5),
        BarZone::StemLeft => Point::new(-1.0, 3.0),
        BarZone::StemRight => Point::new(1.0, 0.3),
    }
}

/// One leader per bar zone, in zone order.
///
/// The quoted spacing is measured between the first two bars of the zone.
/// Zones with a single bar quote the nominal spacing: the schedule's when
/// it has one, otherwise the configured one. Quantity and diameter come from
/// the schedule, falling back to one bar of the laid-out diameter.
pub fn place_steel_leaders(
    bars: &WallBars,
    schedule: &ReinforcementSchedule,
    config: &ReinforcementConfig,
) -> Vec<Leader> {
    let mut leaders = Vec::with_capacity(BarZone::ALL.len());

    for zone in BarZone::ALL {
        let row: Vec<&Bar> = bars.zone(zone).collect();
        let Some(reference) = reference_bar(zone, &row) else {
            trace!(zone:% = zone; "No bars in zone, skipping leader");
            continue;
        };

        let (quantity, diameter, nominal) = match schedule.lookup(zone.into()) {
            BarCallout::Scheduled {
                quantity,
                diameter,
                spacing,
            } => (
                quantity,
                diameter,
                spacing.unwrap_or(config.zone(zone).spacing),
            ),
            BarCallout::Unscheduled => (1, reference.diameter(), config.zone(zone).spacing),
        };

        let spacing = match row.as_slice() {
            [first, second, ..] => first.position().distance(second.position()),
            _ => nominal,
        };

        let anchor = reference.display_position();
        let text = bar_callout_text(quantity, diameter.as_str(), spacing);
        trace!(zone:% = zone, spacing, text:% = text; "Placing steel leader");
        leaders.push(draw_leader(anchor, anchor.add_point(leader_offset(zone)), text));
    }

    leaders
}

/// Contour multi-leaders and the weld mark of the reinforcement view.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourCallouts {
    pub leaders: Vec<MultiLeader>,
    pub weld: WeldSymbol,
}

fn contour_text(length: f64) -> String {
    format!("1∅{}\" L={length:.2}m", BarDiameter::ThreeEighths)
}

/// Four leaders naming the length of each contour side, plus the weld symbol
/// below the footing.
pub fn place_contour_leaders(contours: &InternalContours) -> ContourCallouts {
    let footing = &contours.footing;
    let stem = &contours.stem;

    let top = footing.point(2).midpoint(footing.point(3));
    let bottom = footing.point(0).midpoint(footing.point(1));
    let left = stem.point(0).midpoint(stem.point(3));
    let right = stem.point(1).midpoint(stem.point(2));

    let leaders = vec![
        MultiLeader::new(
            top,
            top.add_point(Point::new(0.5, 0.6)),
            LeaderDirection::Top,
            contour_text((footing.point(2).x() - footing.point(3).x()).abs()),
        ),
        MultiLeader::new(
            bottom,
            bottom.add_point(Point::new(-3.0, 1.0)),
            LeaderDirection::Bottom,
            contour_text((footing.point(1).x() - footing.point(0).x()).abs()),
        ),
        MultiLeader::new(
            left,
            left.add_point(Point::new(-1.2, 0.0)),
            LeaderDirection::Left,
            contour_text((stem.point(3).y() - stem.point(0).y()).abs()),
        ),
        MultiLeader::new(
            right,
            right.add_point(Point::new(1.2, 0.0)),
            LeaderDirection::Right,
            contour_text((stem.point(2).y() - stem.point(1).y()).abs()),
        ),
    ];

    ContourCallouts {
        leaders,
        weld: WeldSymbol::new(bottom.add_point(Point::new(1.5, -0.3)), "WELDED"),
    }
}

/// Dimensions and info block of a mesh face.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAnnotations {
    pub dimensions: Vec<Dimension>,
    pub info: InfoBlock,
}

/// View number of a mesh face on the sheet.
fn mesh_view_number(face: MeshFace) -> u32 {
    match face {
        MeshFace::Interior => 4,
        MeshFace::Exterior => 5,
        MeshFace::Bottom => 6,
        MeshFace::Top => 7,
    }
}

/// Width, height and steel specification of a mesh grid.
///
/// The specification is a dimension over the first grid cell above the
/// region, labelled with the face's steel, e.g. `1∅3/8"@20cm`.
pub fn mesh_annotations(grid: &MeshGrid, diameter: BarDiameter) -> MeshAnnotations {
    let region = grid.region();
    let (x_min, x_max) = (region.min_x(), region.max_x());
    let (y_min, y_max) = (region.min_y(), region.max_y());

    let dimensions = vec![
        draw_dimension(
            Axis::Horizontal,
            x_min,
            x_max,
            y_min,
            -0.1,
            format!("{:.2}m", region.width()),
        ),
        draw_dimension(
            Axis::Vertical,
            y_min,
            y_max,
            x_max,
            0.1,
            format!("{:.2}m", region.height()),
        ),
        draw_dimension(
            Axis::Horizontal,
            x_min,
            x_min + grid.pitch(),
            y_max,
            INNER_OFFSET,
            bar_callout_text(1, diameter.as_str(), grid.pitch()),
        ),
    ];

    let face = grid.face();
    MeshAnnotations {
        dimensions,
        info: InfoBlock::new(mesh_view_number(face), face.title(), Point::default()),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        contour::DEFAULT_COVERAGE,
        steel::{generate_mesh_grid, layout_wall_bars},
        wall::{WallParameters, compute_wall_profile},
    };

    fn default_profile() -> WallProfile {
        compute_wall_profile(&WallParameters::default()).unwrap()
    }

    #[test]
    fn test_reinforcement_dimensions() {
        let profile = default_profile();
        let dims = place_wall_dimensions(&profile, None, WallViewKind::Reinforcement);

        // base, toe, stem base, crown, height, stem height, footing; heel < 0
        assert_eq!(dims.len(), 7);
        assert_eq!(dims[0].label(), "0.74m");
        assert_approx_eq!(f64, dims[0].offset(), -0.8);
        assert_eq!(dims[1].label(), "0.25m");
        assert_eq!(dims[2].axis(), Axis::Horizontal);
        assert_approx_eq!(f64, dims[2].start(), profile.toe(), epsilon = 1e-9);

        let crown = &dims[3];
        assert_approx_eq!(f64, crown.baseline(), 7.4, epsilon = 1e-9);
        assert_eq!(crown.label(), "0.30m");

        assert_eq!(dims[4].label(), "7.40m");
        assert_eq!(dims[4].axis(), Axis::Vertical);
        assert_approx_eq!(f64, dims[5].span(), profile.stem_height(), epsilon = 1e-9);
        assert_approx_eq!(f64, dims[6].span(), 0.925, epsilon = 1e-9);
    }

    #[test]
    fn test_heel_dimension_when_present() {
        let profile = compute_wall_profile(&WallParameters {
            base_ratio: 0.6,
            ..WallParameters::default()
        })
        .unwrap();
        assert!(profile.heel() > 0.1);

        let dims = place_wall_dimensions(&profile, None, WallViewKind::Reinforcement);
        assert_eq!(dims.len(), 8);
        assert_approx_eq!(f64, dims[2].start(), profile.stem_position(), epsilon = 1e-9);
        assert_approx_eq!(f64, dims[2].end(), profile.base_total(), epsilon = 1e-9);
    }

    #[test]
    fn test_drainage_soil_steps() {
        let profile = compute_wall_profile(&WallParameters {
            a: 3.4,
            b: 1.0,
            ..WallParameters::default()
        })
        .unwrap();
        let dims = place_wall_dimensions(&profile, None, WallViewKind::Drainage);

        let steps: Vec<_> = dims
            .iter()
            .filter(|dim| dim.axis() == Axis::Vertical && dim.start() >= 1.0 - 1e-9)
            .collect();
        assert_eq!(steps.len(), 4);
        for step in &steps[..3] {
            assert_approx_eq!(f64, step.span(), 1.0, epsilon = 1e-9);
            assert_eq!(step.label(), "1.00");
        }
        assert_approx_eq!(f64, steps[3].span(), 0.4, epsilon = 1e-9);
        assert_eq!(steps[3].label(), "0.40");
        assert!(dims.iter().all(|dim| !dim.label().ends_with('m')));
    }

    #[test]
    fn test_drainage_footing_on_left() {
        let profile = default_profile();
        let dims = place_wall_dimensions(&profile, Some(1.0), WallViewKind::Drainage);
        let footing = dims
            .iter()
            .find(|dim| dim.axis() == Axis::Vertical && (dim.span() - 0.925).abs() < 1e-9)
            .unwrap();
        assert_approx_eq!(f64, footing.baseline(), 0.0);
        assert_approx_eq!(f64, footing.offset(), -0.3);
    }

    #[test]
    fn test_projection_has_no_dimensions() {
        let profile = default_profile();
        assert!(place_wall_dimensions(&profile, None, WallViewKind::Projection).is_empty());
    }

    #[test]
    fn test_steel_leaders_unscheduled() {
        let profile = default_profile();
        let contours = profile.internal_contours(DEFAULT_COVERAGE).unwrap();
        let config = ReinforcementConfig::default();
        let bars = layout_wall_bars(&contours, &config).unwrap();

        let leaders = place_steel_leaders(&bars, &ReinforcementSchedule::empty(), &config);
        assert_eq!(leaders.len(), 4);

        let stem_left = bars.zone(BarZone::StemLeft).next().unwrap();
        let leader = &leaders[2];
        assert_eq!(leader.anchor(), stem_left.display_position());
        assert!(
            leader
                .target()
                .approx_eq(stem_left.display_position().add_point(Point::new(-1.0, 3.0)), 1e-12)
        );
        assert!(leader.text().starts_with("1∅1/2\"@"));

        let stem_right = bars.zone(BarZone::StemRight).last().unwrap();
        assert_eq!(leaders[3].anchor(), stem_right.display_position());
    }

    #[test]
    fn test_steel_leaders_use_schedule() {
        let profile = default_profile();
        let contours = profile.internal_contours(DEFAULT_COVERAGE).unwrap();
        let config = ReinforcementConfig::default();
        let bars = layout_wall_bars(&contours, &config).unwrap();
        let schedule: ReinforcementSchedule = serde_json::from_str(
            r#"[{"tipo": "zapata", "aceros": [
                {"tipoAcero": "superior", "diametro": "5/8", "cantidad": 2, "espaciamiento": 0.15}
            ]}]"#,
        )
        .unwrap();

        let leaders = place_steel_leaders(&bars, &schedule, &config);
        assert!(leaders[0].text().starts_with("2∅5/8\"@"));
        assert!(leaders[1].text().starts_with("1∅1/2\"@"));
    }

    #[test]
    fn test_bar_callout_text() {
        assert_eq!(bar_callout_text(1, "3/8", 0.17), "1∅3/8\"@17cm");
        assert_eq!(bar_callout_text(2, "1/2", 0.2), "2∅1/2\"@20cm");
    }

    #[test]
    fn test_contour_leaders() {
        let profile = default_profile();
        let contours = profile.internal_contours(DEFAULT_COVERAGE).unwrap();
        let callouts = place_contour_leaders(&contours);

        let directions: Vec<_> = callouts.leaders.iter().map(MultiLeader::direction).collect();
        assert_eq!(
            directions,
            [
                LeaderDirection::Top,
                LeaderDirection::Bottom,
                LeaderDirection::Left,
                LeaderDirection::Right
            ]
        );
        // Footing contour is 0.74 - 2 * 0.05 wide
        assert_eq!(callouts.leaders[0].text(), "1∅3/8\" L=0.64m");
        assert_eq!(callouts.weld.note(), "WELDED");
        assert_approx_eq!(f64, callouts.weld.origin().y(), 0.05 - 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_mesh_annotations() {
        let profile = default_profile();
        let region = MeshFace::Exterior.region_for(&profile);
        let grid = generate_mesh_grid(region, 0.2, MeshFace::Exterior).unwrap();
        let annotations = mesh_annotations(&grid, BarDiameter::ThreeEighths);

        assert_eq!(annotations.dimensions.len(), 3);
        assert_eq!(annotations.dimensions[0].label(), "4.00m");
        assert_eq!(annotations.dimensions[2].label(), "1∅3/8\"@20cm");
        assert_approx_eq!(f64, annotations.dimensions[2].span(), 0.2, epsilon = 1e-12);
        assert_eq!(annotations.info.number(), 5);
        assert_eq!(annotations.info.title(), MeshFace::Exterior.title());
    }
}
