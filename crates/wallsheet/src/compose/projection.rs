use log::debug;

use wallsheet_core::{
    annotation::WallViewKind,
    color::AciColor,
    draw::{LayerDefinition, LayeredPrimitives, LineStyle, Primitive},
    wall::{WallProfile, compute_3d_projection},
};

use super::{declare_wall_annotation_layers, draw_title, polyline};

const PROJECTION: &str = "WALL_3D";

/// Builds the pseudo-3D view: front face, depth edges and back face.
pub fn projection_view(profile: &WallProfile, depth: f64) -> LayeredPrimitives {
    let mut output = LayeredPrimitives::new();
    output.declare(LayerDefinition::new(
        PROJECTION,
        AciColor::White,
        LineStyle::Continuous,
    ));
    declare_wall_annotation_layers(&mut output);

    let projection = compute_3d_projection(profile, depth);
    output.extend(PROJECTION, polyline(projection.original()));
    output.extend(
        PROJECTION,
        projection
            .edges()
            .iter()
            .map(|(from, to)| Primitive::line(*from, *to)),
    );
    output.extend(PROJECTION, polyline(projection.projected()));

    draw_title(WallViewKind::Projection, &mut output);

    debug!(primitives = output.len(), depth; "Composed projection view");
    output
}
