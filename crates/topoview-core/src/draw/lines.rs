//! Batches of straight line segments drawn with a shared stroke.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Point, Size},
};

/// A line collection: every segment shares one stroke and one layer.
///
/// The position passed to [`Drawable::render_to_layers`] is an offset added
/// to every endpoint.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    stroke: &'a StrokeDefinition,
    segments: &'a [(Point, Point)],
    layer: RenderLayer,
}

impl<'a> Lines<'a> {
    /// Creates a line collection on the [`RenderLayer::Edge`] layer.
    pub fn new(stroke: &'a StrokeDefinition, segments: &'a [(Point, Point)]) -> Self {
        Self {
            stroke,
            segments,
            layer: RenderLayer::Edge,
        }
    }

    /// Moves the lines to another render layer.
    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }
}

impl Drawable for Lines<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        for (start, end) in self.segments {
            let start = start.add_point(position);
            let end = end.add_point(position);

            let line = svg_element::Line::new()
                .set("x1", start.x())
                .set("y1", start.y())
                .set("x2", end.x())
                .set("y2", end.y());
            let line = apply_stroke!(line, self.stroke);

            output.add_to_layer(self.layer, Box::new(line));
        }

        output
    }

    fn size(&self) -> Size {
        Bounds::from_points(self.segments.iter().flat_map(|(start, end)| [*start, *end]))
            .map(|bounds| bounds.to_size())
            .unwrap_or_default()
    }
}
