//! Dimension lines, leaders and title blocks.
//!
//! Annotations are computed from the same [`WallProfile`](crate::wall::WallProfile),
//! contours and bars the views draw, in the view's local coordinates. Each
//! annotation type turns itself into draw [`Primitive`](crate::draw::Primitive)s
//! on request; nothing here knows about sheets or backends.
//!
//! Collisions between labels are avoided with fixed per-zone offsets rather
//! than a placement solver.

mod dimension;
mod leader;
mod placement;
mod title;

pub use dimension::{Axis, Dimension, draw_dimension};
pub use leader::{Leader, LeaderDirection, MultiLeader, WeldSymbol, draw_leader};
pub use placement::{
    ContourCallouts, MeshAnnotations, WallViewKind, bar_callout_text, mesh_annotations,
    place_contour_leaders, place_steel_leaders, place_wall_dimensions,
};
pub use title::{InfoBlock, SCALE_LABEL, TitleBlock, title_block};
