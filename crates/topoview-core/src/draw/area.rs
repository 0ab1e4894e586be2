//! Filled polygon areas.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Polygon, Size},
};

/// Fill and border style of a polygon area.
#[derive(Debug, Clone)]
pub struct AreaDefinition {
    fill: Color,
    stroke: StrokeDefinition,
}

impl AreaDefinition {
    /// Creates an area definition. The fill alpha becomes the SVG fill opacity.
    pub fn new(fill: Color, stroke: StrokeDefinition) -> Self {
        Self { fill, stroke }
    }
}

/// A polygon drawn with an [`AreaDefinition`].
///
/// The position passed to [`Drawable::render_to_layers`] is an offset added
/// to every vertex, so a ring built around the origin can be placed anywhere.
#[derive(Debug, Clone)]
pub struct Area<'a> {
    definition: &'a AreaDefinition,
    polygon: &'a Polygon,
    layer: RenderLayer,
}

impl<'a> Area<'a> {
    /// Creates an area on the [`RenderLayer::Element`] layer.
    pub fn new(definition: &'a AreaDefinition, polygon: &'a Polygon) -> Self {
        Self {
            definition,
            polygon,
            layer: RenderLayer::Element,
        }
    }

    /// Moves the area to another render layer.
    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }
}

impl Drawable for Area<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.polygon.vertices().is_empty() {
            return output;
        }

        let points = self
            .polygon
            .vertices()
            .iter()
            .map(|vertex| {
                let placed = vertex.add_point(position);
                format!("{},{}", placed.x(), placed.y())
            })
            .collect::<Vec<_>>()
            .join(" ");

        let shape = svg_element::Polygon::new()
            .set("points", points)
            .set("fill", self.definition.fill.to_string())
            .set("fill-opacity", self.definition.fill.alpha())
            .set("stroke-linejoin", "round");
        let shape = apply_stroke!(shape, &self.definition.stroke);

        output.add_to_layer(self.layer, Box::new(shape));
        output
    }

    fn size(&self) -> Size {
        self.polygon
            .bounds()
            .map(|bounds| bounds.to_size())
            .unwrap_or_default()
    }
}
