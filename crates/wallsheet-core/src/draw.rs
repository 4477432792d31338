//! Drawing vocabulary shared by every view.
//!
//! Views produce [`LayeredPrimitives`]: primitives tagged with a layer name,
//! plus the [`LayerDefinition`]s those names refer to. Backends consume them.

mod layer;
mod primitive;
mod stroke;

pub use layer::{LayerDefinition, LayeredPrimitives};
pub use primitive::{GLYPH_WIDTH_FACTOR, Primitive, TextLabel};
pub use stroke::LineStyle;
