//! Drawable Components for Plot Rendering
//!
//! All drawable components implement the [`Drawable`] trait, which renders
//! them into a [`LayeredOutput`] at a position and reports their size.
//! Renderers collect these outputs and emit them in z-order.

mod area;
mod layer;
mod lines;
mod marker;
mod stroke;
mod text;

pub use area::{Area, AreaDefinition};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use lines::Lines;
pub use marker::{Marker, MarkerDefinition};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// Something that can be placed on the canvas.
pub trait Drawable: std::fmt::Debug {
    /// Renders the drawable with its origin at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of the drawable's footprint.
    fn size(&self) -> Size;
}
