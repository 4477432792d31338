//! Sheet layout.
//!
//! [`layout_views`] builds every view in its local coordinates and assigns it
//! a sheet offset. Wall views form the upper row and mesh faces the lower
//! row, both starting at the same x anchor:
//!
//! ```text
//! +--------------------------------------------------------------+
//! |  +--------------------------------------------------------+  |
//! |  |   [1] reinforcement   [2] drainage     [3] 3D          |  |
//! |  |                                                        |  |
//! |  |   [4] interior   [5] exterior   [6] bottom   [7] top   |  |
//! |  +--------------------------------------------------------+  |
//! +--------------------------------------------------------------+
//! ```
//!
//! The offset is applied exactly once, by [`View::into_translated`].

use log::{debug, info};

use wallsheet_core::{
    annotation::WallViewKind,
    draw::LayeredPrimitives,
    geometry::{Bounds, Point},
    steel::{MeshFace, generate_mesh_grid, layout_wall_bars},
    wall::WallProfile,
};

use crate::{
    compose,
    config::AppConfig,
    error::WallSheetError,
    export::{BackendError, DrawingBackend, emit_primitives},
    request::SheetRequest,
};

/// What a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Wall(WallViewKind),
    Mesh(MeshFace),
}

/// One view of the sheet, in local coordinates, with its sheet offset.
#[derive(Debug, Clone)]
pub struct View {
    kind: ViewKind,
    offset: Point,
    output: LayeredPrimitives,
}

impl View {
    pub fn new(kind: ViewKind, offset: Point, output: LayeredPrimitives) -> Self {
        Self {
            kind,
            offset,
            output,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// The view's primitives in local coordinates.
    pub fn local(&self) -> &LayeredPrimitives {
        &self.output
    }

    /// Bounds of the view on the sheet.
    pub fn bounds(&self) -> Option<Bounds> {
        self.output
            .bounds()
            .map(|bounds| bounds.translate(self.offset))
    }

    /// Consumes the view, returning its primitives in sheet coordinates.
    pub fn into_translated(self) -> LayeredPrimitives {
        self.output.translate(self.offset)
    }
}

/// A laid-out sheet: frame plus positioned views.
#[derive(Debug, Clone)]
pub struct Sheet {
    origin: Point,
    width: f64,
    height: f64,
    frame: LayeredPrimitives,
    views: Vec<View>,
}

impl Sheet {
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn frame(&self) -> &LayeredPrimitives {
        &self.frame
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Looks up a view by kind.
    pub fn view(&self, kind: ViewKind) -> Option<&View> {
        self.views.iter().find(|view| view.kind == kind)
    }

    /// Flattens the sheet into one collection in sheet coordinates.
    pub fn into_primitives(self) -> LayeredPrimitives {
        let mut output = self.frame;
        for view in self.views {
            output.merge(view.into_translated());
        }
        output
    }

    /// Streams the whole sheet into `backend`.
    ///
    /// Every layer is added before the first primitive is drawn.
    ///
    /// # Errors
    ///
    /// Propagates the first [`BackendError`].
    pub fn emit(self, backend: &mut impl DrawingBackend) -> Result<(), BackendError> {
        let output = self.into_primitives();
        debug!(
            layers = output.layers().count(),
            primitives = output.len();
            "Emitting sheet"
        );
        emit_primitives(&output, backend)
    }
}

/// Lays out every view of the sheet for `profile`.
///
/// # Errors
///
/// Returns [`WallSheetError::Geometry`] when the contours, bar rows or mesh
/// grids cannot be derived from the profile and configuration.
pub fn layout_views(
    profile: &WallProfile,
    request: &SheetRequest,
    config: &AppConfig,
) -> Result<Sheet, WallSheetError> {
    let layout = config.layout();
    let origin = request.origin();
    let a = profile.parameters().a;
    let width = layout.base_width() + a;
    let height = layout.base_height() + a;
    let margin = layout.margin();

    let contours = profile.internal_contours(config.geometry().coverage())?;
    let bars = layout_wall_bars(&contours, config.reinforcement())?;

    let anchor_x = origin.x() + margin + layout.first_view_inset();
    let wall_y = origin.y() + margin + layout.wall_row_lift() + height / 2.0;
    let mesh_y = origin.y() + layout.mesh_row_lift();

    let mut views = Vec::with_capacity(WallViewKind::ALL.len() + MeshFace::ALL.len());

    for (i, kind) in WallViewKind::ALL.into_iter().enumerate() {
        let output = match kind {
            WallViewKind::Reinforcement => compose::reinforcement_view(
                profile,
                &contours,
                &bars,
                request.schedule(),
                config.reinforcement(),
            ),
            WallViewKind::Drainage => compose::drainage_view(profile),
            WallViewKind::Projection => {
                compose::projection_view(profile, config.geometry().projection_depth())
            }
        };
        let offset = Point::new(anchor_x + i as f64 * layout.wall_pitch(), wall_y);
        debug!(view:? = kind, offset:?; "Placed wall view");
        views.push(View::new(ViewKind::Wall(kind), offset, output));
    }

    for (i, face) in MeshFace::ALL.into_iter().enumerate() {
        let grid = generate_mesh_grid(face.region_for(profile), config.mesh().pitch(), face)?;
        let output = compose::mesh_view(&grid, face.default_diameter());
        let offset = Point::new(anchor_x + i as f64 * layout.mesh_pitch(), mesh_y);
        debug!(face:? = face, offset:?; "Placed mesh view");
        views.push(View::new(ViewKind::Mesh(face), offset, output));
    }

    info!(width, height, views = views.len(); "Sheet laid out");

    Ok(Sheet {
        origin,
        width,
        height,
        frame: compose::sheet_frame(origin, width, height, margin),
        views,
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use wallsheet_core::wall::{WallParameters, compute_wall_profile};

    use super::*;

    fn default_sheet() -> Sheet {
        let profile = compute_wall_profile(&WallParameters::default()).unwrap();
        let request = SheetRequest::from_parameters(WallParameters::default());
        layout_views(&profile, &request, &AppConfig::default()).unwrap()
    }

    fn row_bounds(sheet: &Sheet, wall_row: bool) -> Vec<Bounds> {
        sheet
            .views()
            .iter()
            .filter(|view| matches!(view.kind(), ViewKind::Wall(_)) == wall_row)
            .map(|view| view.bounds().unwrap())
            .collect()
    }

    #[test]
    fn test_sheet_size() {
        let sheet = default_sheet();
        assert_approx_eq!(f64, sheet.width(), 51.4);
        assert_approx_eq!(f64, sheet.height(), 36.4);
        assert_eq!(sheet.views().len(), 7);
    }

    #[test]
    fn test_views_in_a_row_do_not_overlap() {
        let sheet = default_sheet();
        for row in [row_bounds(&sheet, true), row_bounds(&sheet, false)] {
            for (i, a) in row.iter().enumerate() {
                for b in &row[i + 1..] {
                    assert!(!a.overlaps_horizontally(b), "{a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_rows_do_not_overlap() {
        let sheet = default_sheet();
        let walls = row_bounds(&sheet, true)
            .into_iter()
            .reduce(|acc, b| acc.merge(&b))
            .unwrap();
        let meshes = row_bounds(&sheet, false)
            .into_iter()
            .reduce(|acc, b| acc.merge(&b))
            .unwrap();
        assert!(meshes.max_y() < walls.min_y());
    }

    #[test]
    fn test_offset_applied_once() {
        let sheet = default_sheet();
        let view = sheet
            .view(ViewKind::Wall(WallViewKind::Projection))
            .unwrap()
            .clone();
        let local = view.local().bounds().unwrap();
        let offset = view.offset();

        let translated = view.into_translated().bounds().unwrap();
        assert_approx_eq!(f64, translated.min_x(), local.min_x() + offset.x());
        assert_approx_eq!(f64, translated.min_y(), local.min_y() + offset.y());
    }

    #[test]
    fn test_views_inside_inner_border() {
        let sheet = default_sheet();
        let margin = AppConfig::default().layout().margin();
        let width = sheet.width();
        let height = sheet.height();
        for view in sheet.views() {
            let bounds = view.bounds().unwrap();
            assert!(bounds.min_x() > margin);
            assert!(bounds.min_y() > margin);
            assert!(bounds.max_x() < width - margin);
            assert!(bounds.max_y() < height - margin);
        }
    }

    #[test]
    fn test_emit_declares_every_layer() {
        let sheet = default_sheet();
        let output = sheet.into_primitives();
        for (layer, _) in output.items() {
            assert!(output.layer(layer).is_some(), "undeclared layer {layer}");
        }
    }
}
