//! Reinforcement section: outline, contours, bars and their callouts.

use log::debug;

use wallsheet_core::{
    annotation::{WallViewKind, place_contour_leaders, place_steel_leaders, place_wall_dimensions},
    color::AciColor,
    contour::InternalContours,
    draw::{LayerDefinition, LayeredPrimitives, LineStyle, Primitive},
    schedule::ReinforcementSchedule,
    steel::{ReinforcementConfig, WallBars},
    wall::WallProfile,
};

use super::{declare_wall_annotation_layers, draw_outline, draw_title, layers, polyline};

const OUTLINE: &str = "WALL_REINFORCEMENT";
const CONTOURS: &str = "CONTOURS";
const BARS: &str = "BARS";
const STEEL_LEADERS: &str = "STEEL_LEADERS";
const CONTOUR_LEADERS: &str = "CONTOUR_LEADERS";

fn declare_layers(output: &mut LayeredPrimitives) {
    let layers = [
        (OUTLINE, AciColor::Blue),
        (CONTOURS, AciColor::Magenta),
        (BARS, AciColor::Yellow),
        (STEEL_LEADERS, AciColor::White),
        (CONTOUR_LEADERS, AciColor::Cyan),
    ];
    for (name, color) in layers {
        output.declare(LayerDefinition::new(name, color, LineStyle::Continuous));
    }
    declare_wall_annotation_layers(output);
}

/// Builds the reinforcement view of section 1-1.
pub fn reinforcement_view(
    profile: &WallProfile,
    contours: &InternalContours,
    bars: &WallBars,
    schedule: &ReinforcementSchedule,
    config: &ReinforcementConfig,
) -> LayeredPrimitives {
    let mut output = LayeredPrimitives::new();
    declare_layers(&mut output);

    draw_outline(profile, OUTLINE, &mut output);

    output.extend(CONTOURS, polyline(contours.stem.points()));
    output.extend(CONTOURS, polyline(contours.footing.points()));

    output.extend(
        BARS,
        bars.all()
            .iter()
            .map(|bar| Primitive::circle(bar.display_position(), bar.diameter().display_radius())),
    );

    for leader in place_steel_leaders(bars, schedule, config) {
        leader.render(STEEL_LEADERS, &mut output);
    }

    let callouts = place_contour_leaders(contours);
    for leader in &callouts.leaders {
        leader.render(CONTOUR_LEADERS, &mut output);
    }
    callouts.weld.render(CONTOUR_LEADERS, &mut output);

    for dimension in place_wall_dimensions(profile, None, WallViewKind::Reinforcement) {
        dimension.render(layers::DIMENSIONS, &mut output);
    }

    draw_title(WallViewKind::Reinforcement, &mut output);

    debug!(primitives = output.len(), bars = bars.len(); "Composed reinforcement view");
    output
}
