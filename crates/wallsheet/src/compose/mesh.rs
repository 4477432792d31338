//! Mesh face view: grid, frame, dimensions and info block.

use log::debug;

use wallsheet_core::{
    annotation::mesh_annotations,
    color::AciColor,
    draw::{LayerDefinition, LayeredPrimitives, LineStyle, Primitive},
    steel::{BarDiameter, MeshGrid, MeshLineKind},
};

const MESH_FRAME: &str = "MESH_FRAME";
const MESH_HORIZONTAL: &str = "MESH_HORIZONTAL";
const MESH_DIMENSIONS: &str = "MESH_DIMENSIONS";
const MESH_INFO: &str = "MESH_INFO";

fn vertical_layer(grid: &MeshGrid) -> String {
    format!("MESH_VERTICAL_{}", grid.face().layer_suffix())
}

/// Builds the view of one mesh face, drawing `diameter` in its callout.
pub fn mesh_view(grid: &MeshGrid, diameter: BarDiameter) -> LayeredPrimitives {
    let face = grid.face();
    let vertical = vertical_layer(grid);

    let mut output = LayeredPrimitives::new();
    output.declare(LayerDefinition::new(
        vertical.as_str(),
        face.vertical_color(),
        LineStyle::Continuous,
    ));
    let shared = [
        (MESH_HORIZONTAL, AciColor::Magenta),
        (MESH_FRAME, AciColor::White),
        (MESH_DIMENSIONS, AciColor::White),
        (MESH_INFO, AciColor::Yellow),
    ];
    for (name, color) in shared {
        output.declare(LayerDefinition::new(name, color, LineStyle::Continuous));
    }

    for line in grid.lines() {
        let layer = match line.kind {
            MeshLineKind::Vertical => vertical.as_str(),
            MeshLineKind::Horizontal => MESH_HORIZONTAL,
            MeshLineKind::Frame => MESH_FRAME,
        };
        output.add(layer, Primitive::line(line.start, line.end));
    }

    let annotations = mesh_annotations(grid, diameter);
    for dimension in &annotations.dimensions {
        dimension.render(MESH_DIMENSIONS, &mut output);
    }
    annotations.info.render(MESH_INFO, &mut output);

    debug!(face:? = face, primitives = output.len(); "Composed mesh view");
    output
}
