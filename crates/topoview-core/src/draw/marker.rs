//! Circular scatter markers for node positions.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// Visual style of a scatter marker.
#[derive(Debug, Clone)]
pub struct MarkerDefinition {
    radius: f32,
    fill: Color,
    stroke: StrokeDefinition,
}

impl MarkerDefinition {
    /// Creates a marker definition with the given radius, fill and edge stroke.
    pub fn new(radius: f32, fill: Color, stroke: StrokeDefinition) -> Self {
        Self {
            radius,
            fill,
            stroke,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

/// A single marker, centered on its position.
#[derive(Debug, Clone)]
pub struct Marker<'a> {
    definition: &'a MarkerDefinition,
    layer: RenderLayer,
}

impl<'a> Marker<'a> {
    /// Creates a marker on the [`RenderLayer::Node`] layer.
    pub fn new(definition: &'a MarkerDefinition) -> Self {
        Self {
            definition,
            layer: RenderLayer::Node,
        }
    }

    /// Moves the marker to another render layer.
    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }
}

impl Drawable for Marker<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let circle = svg_element::Circle::new()
            .set("cx", position.x())
            .set("cy", position.y())
            .set("r", self.definition.radius)
            .set("fill", self.definition.fill.to_string())
            .set("fill-opacity", self.definition.fill.alpha());
        let circle = apply_stroke!(circle, &self.definition.stroke);

        output.add_to_layer(self.layer, Box::new(circle));
        output
    }

    fn size(&self) -> Size {
        let diameter = self.definition.radius * 2.0 + self.definition.stroke.width();
        Size::new(diameter, diameter)
    }
}
