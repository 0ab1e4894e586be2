//! Text rendering definitions for labels, titles and legend entries.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A renderable text element combining content with a [`TextDefinition`]
//!
//! Text is rendered as a single SVG `<text>` element, vertically centered on
//! its position and horizontally aligned by its [`TextAnchor`]. Sizes are
//! estimated from the font size and character count; the viewer does the
//! real shaping.
//!
//! ```
//! # use topoview_core::draw::{TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_size(16);
//!
//! let title = Text::new(&style, "Schema topology");
//! assert!(title.calculate_size().width() > 0.0);
//! ```

use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Average glyph advance relative to the font size for sans-serif faces.
const AVERAGE_ADVANCE: f32 = 0.6;
const BOLD_ADVANCE: f32 = 0.66;
const LINE_HEIGHT: f32 = 1.2;

/// Horizontal alignment of text relative to its position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the SVG text-anchor value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Defines the visual style for text elements.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
/// | Bold | `false` |
/// | Color | `None` (SVG default, typically black) |
/// | Anchor | [`TextAnchor::Middle`] |
/// | Rotation | `0` degrees |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    bold: bool,
    color: Option<Color>,
    anchor: TextAnchor,
    rotation: f32,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Renders the text in a bold weight.
    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    /// Sets the text fill color. `None` leaves the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the horizontal alignment.
    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    /// Sets a clockwise rotation in degrees around the text position.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 12,
            bold: false,
            color: None,
            anchor: TextAnchor::default(),
            rotation: 0.0,
        }
    }
}

/// A renderable text element.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    layer: RenderLayer,
}

impl<'a> Text<'a> {
    /// Creates a new text element on the [`RenderLayer::Label`] layer.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            layer: RenderLayer::Label,
        }
    }

    /// Moves the text to another render layer.
    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Estimates the unrotated size of the rendered text.
    pub fn calculate_size(&self) -> Size {
        let advance = if self.definition.bold {
            BOLD_ADVANCE
        } else {
            AVERAGE_ADVANCE
        };
        let font_size = f32::from(self.definition.font_size);
        let chars = self.content.chars().count() as f32;

        Size::new(chars * font_size * advance, font_size * LINE_HEIGHT)
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.definition.anchor.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family.as_str())
            .set("font-size", self.definition.font_size);

        if self.definition.bold {
            rendered_text = rendered_text.set("font-weight", "bold");
        }

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        if self.definition.rotation != 0.0 {
            rendered_text = rendered_text.set(
                "transform",
                format!(
                    "rotate({} {} {})",
                    self.definition.rotation,
                    position.x(),
                    position.y()
                ),
            );
        }

        rendered_text = rendered_text.add(SvgText::new(self.content));

        output.add_to_layer(self.layer, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_calculate_size_empty() {
        let definition = TextDefinition::new();
        let size = Text::new(&definition, "").calculate_size();
        assert_eq!(size.width(), 0.0);
        assert!(size.height() > 0.0);
    }

    #[test]
    fn test_text_calculate_size_grows_with_content_and_weight() {
        let mut definition = TextDefinition::new();
        let short = Text::new(&definition, "A").calculate_size();
        let long = Text::new(&definition, "Element").calculate_size();
        assert!(long.width() > short.width());

        definition.set_bold(true);
        let bold = Text::new(&definition, "Element").calculate_size();
        assert!(bold.width() > long.width());
    }

    #[test]
    fn test_text_render_defaults_to_label_layer() {
        let definition = TextDefinition::new();
        let output = Text::new(&definition, "A").render_to_layers(Point::new(1.0, 2.0));
        assert_eq!(output.count_in_layer(RenderLayer::Label), 1);
    }

    #[test]
    fn test_text_render_attributes() {
        let mut definition = TextDefinition::new();
        definition.set_bold(true);
        definition.set_color(Some(Color::new("#004466").unwrap()));
        definition.set_rotation(-90.0);
        definition.set_anchor(TextAnchor::Start);

        let text = Text::new(&definition, "Y coordinate").with_layer(RenderLayer::Annotation);
        let output = text.render_to_layers(Point::new(10.0, 20.0));
        assert_eq!(output.count_in_layer(RenderLayer::Annotation), 1);

        let rendered = output.render()[0].to_string();
        assert!(rendered.contains(r#"font-weight="bold""#));
        assert!(rendered.contains(r#"text-anchor="start""#));
        assert!(rendered.contains("rotate(-90 10 20)"));
        assert!(rendered.contains("Y coordinate"));
    }
}
