//! SVG export backend.
//!
//! [`SvgBuilder`] turns the configured style into concrete drawing
//! definitions once, and the resulting [`Svg`] exporter renders a [`Scene`]
//! into a single SVG document written to any [`Write`] sink.
//!
//! # Canvas layout
//!
//! ```text
//! ┌──────────────────────── canvas ─────────────────────────┐
//! │                        title                            │
//! │ y  ┌──────────── plot frame ────────────┐ ┌─ legend ─┐  │
//! │ l  │ grid, edges, elements, nodes       │ │          │  │
//! │ a  │                                    │ └──────────┘  │
//! │ b  └────────────────────────────────────┘               │
//! │                      x label                            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The plot frame keeps equal scale on both axes and is centered in the space
//! left by the bands around it.

mod legend;
mod plot;

use std::io::Write;

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use topoview_core::{
    color::Color,
    draw::{
        Area, AreaDefinition, Drawable, LayeredOutput, Lines, Marker, MarkerDefinition,
        RenderLayer, StrokeDefinition, Text, TextAnchor, TextDefinition,
    },
    geometry::{Bounds, Insets, Point, Size},
};

use crate::{
    config::{CanvasConfig, StyleConfig},
    export,
    scene::Scene,
};

use legend::{Legend, LegendEntry, LegendGlyph};
use plot::PlotFrame;

const TITLE_BAND: f32 = 56.0;
const BOTTOM_BAND: f32 = 72.0;
const LEFT_BAND: f32 = 84.0;
/// Share of the canvas width reserved for the legend column.
const LEGEND_FRACTION: f32 = 0.15;
const MARKER_RADIUS: f32 = 5.0;

/// Concrete drawing definitions resolved from a [`StyleConfig`].
#[derive(Debug, Clone)]
struct Theme {
    background: Color,
    major_grid: StrokeDefinition,
    minor_grid: StrokeDefinition,
    contour: StrokeDefinition,
    element: AreaDefinition,
    marker: MarkerDefinition,
    frame: StrokeDefinition,
    legend_box: AreaDefinition,

    label_text: TextDefinition,
    title_text: TextDefinition,
    x_axis_text: TextDefinition,
    y_axis_text: TextDefinition,
    x_tick_text: TextDefinition,
    y_tick_text: TextDefinition,
    legend_title_text: TextDefinition,
    legend_entry_text: TextDefinition,

    title: String,
    x_label: String,
    y_label: String,
    legend_title: String,
    element_legend: String,
    contour_legend: String,
    node_legend: String,
}

fn text_definition(size: u16, anchor: TextAnchor) -> TextDefinition {
    let mut definition = TextDefinition::new();
    definition.set_font_size(size);
    definition.set_anchor(anchor);
    definition
}

impl Theme {
    fn from_style(style: &StyleConfig) -> Result<Self, String> {
        let black = Color::default();
        let gray = Color::new("gray")?;

        let mut label_text = text_definition(10, TextAnchor::Middle);
        label_text.set_bold(true);
        label_text.set_color(Some(style.label_color()?));

        let mut y_axis_text = text_definition(12, TextAnchor::Middle);
        y_axis_text.set_rotation(-90.0);

        let mut legend_title_text = text_definition(11, TextAnchor::Middle);
        legend_title_text.set_bold(true);

        Ok(Self {
            background: style.background_color()?,
            major_grid: StrokeDefinition::new(Color::new("#b0b0b0")?, 0.6),
            minor_grid: StrokeDefinition::dotted(Color::new("#d0d0d0")?, 0.4),
            contour: StrokeDefinition::new(style.contour_color()?, 1.0),
            element: AreaDefinition::new(
                style.element_fill()?.with_alpha(0.7),
                StrokeDefinition::new(style.element_border()?, 1.5),
            ),
            marker: MarkerDefinition::new(
                MARKER_RADIUS,
                style.node_color()?,
                StrokeDefinition::new(black, 0.5),
            ),
            frame: StrokeDefinition::new(black, 0.8),
            legend_box: AreaDefinition::new(Color::new("white")?, StrokeDefinition::new(gray, 0.8)),

            label_text,
            title_text: text_definition(16, TextAnchor::Middle),
            x_axis_text: text_definition(12, TextAnchor::Middle),
            y_axis_text,
            x_tick_text: text_definition(10, TextAnchor::Middle),
            y_tick_text: text_definition(10, TextAnchor::End),
            legend_title_text,
            legend_entry_text: text_definition(10, TextAnchor::Start),

            title: style.title().to_string(),
            x_label: style.x_label().to_string(),
            y_label: style.y_label().to_string(),
            legend_title: style.legend_title().to_string(),
            element_legend: style.element_legend().to_string(),
            contour_legend: style.contour_legend().to_string(),
            node_legend: style.node_legend().to_string(),
        })
    }
}

/// Builder for [`Svg`] exporters.
///
/// ```
/// # use topoview::export::svg::SvgBuilder;
/// let mut buffer = Vec::new();
/// let exporter = SvgBuilder::new(&mut buffer).build();
/// assert!(exporter.is_ok());
/// ```
pub struct SvgBuilder<'a, W: Write> {
    sink: W,
    canvas: Option<&'a CanvasConfig>,
    style: Option<&'a StyleConfig>,
}

impl<'a, W: Write> SvgBuilder<'a, W> {
    /// Starts a builder that will write to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            canvas: None,
            style: None,
        }
    }

    /// Sets the canvas size. Defaults to [`CanvasConfig::default`].
    pub fn with_canvas(mut self, canvas: &'a CanvasConfig) -> Self {
        self.canvas = Some(canvas);
        self
    }

    /// Sets the style. Defaults to [`StyleConfig::default`].
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Resolves the style and builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid or
    /// the canvas has no area.
    pub fn build(self) -> Result<Svg<W>, export::Error> {
        let default_canvas = CanvasConfig::default();
        let canvas = self.canvas.unwrap_or(&default_canvas);
        if !(canvas.width() > 0.0 && canvas.height() > 0.0) {
            return Err(export::Error::Render(format!(
                "Canvas must have a positive size, got {}x{}",
                canvas.width(),
                canvas.height()
            )));
        }

        let theme = match self.style {
            Some(style) => Theme::from_style(style),
            None => Theme::from_style(&StyleConfig::default()),
        }
        .map_err(export::Error::Render)?;

        Ok(Svg {
            sink: self.sink,
            canvas: Size::new(canvas.width(), canvas.height()),
            theme,
        })
    }
}

/// SVG exporter for prepared scenes.
pub struct Svg<W: Write> {
    sink: W,
    canvas: Size,
    theme: Theme,
}

impl<W: Write> Svg<W> {
    /// Renders a scene into an SVG document.
    pub fn render_scene(&self, scene: &Scene) -> Document {
        let canvas_bounds = Bounds::new_from_top_left(Point::default(), self.canvas);
        let plot_area = canvas_bounds.shrink(Insets::new(
            TITLE_BAND,
            self.canvas.width() * LEGEND_FRACTION,
            BOTTOM_BAND,
            LEFT_BAND,
        ));
        let plot = PlotFrame::fit(scene.view_bounds(), plot_area);
        debug!(
            scale = plot.scale(),
            frame_width = plot.frame().width(),
            frame_height = plot.frame().height();
            "Plot frame fitted"
        );

        let mut output = LayeredOutput::new();
        output.merge(self.render_background(canvas_bounds));
        output.merge(self.render_grid(scene, &plot));
        output.merge(self.render_contours(scene, &plot));
        output.merge(self.render_elements(scene, &plot));
        output.merge(self.render_nodes(scene, &plot));
        output.merge(self.render_axes(scene, &plot));
        output.merge(self.render_title(canvas_bounds));
        output.merge(self.render_legend(&plot));

        let mut doc = Document::new()
            .set("width", self.canvas.width())
            .set("height", self.canvas.height())
            .set(
                "viewBox",
                (0.0, 0.0, self.canvas.width(), self.canvas.height()),
            );

        for node in output.render() {
            doc = doc.add(node);
        }

        doc
    }

    fn render_background(&self, canvas_bounds: Bounds) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let background = svg_element::Rectangle::new()
            .set("x", canvas_bounds.min_x())
            .set("y", canvas_bounds.min_y())
            .set("width", canvas_bounds.width())
            .set("height", canvas_bounds.height())
            .set("fill", self.theme.background.to_string())
            .set("fill-opacity", self.theme.background.alpha());
        output.add_to_layer(RenderLayer::Background, Box::new(background));
        output
    }

    fn render_contours(&self, scene: &Scene, plot: &PlotFrame) -> LayeredOutput {
        let segments: Vec<(Point, Point)> = scene
            .contour_segments()
            .iter()
            .map(|(start, end)| (plot.to_canvas(*start), plot.to_canvas(*end)))
            .collect();

        Lines::new(&self.theme.contour, &segments).render_to_layers(Point::default())
    }

    fn render_elements(&self, scene: &Scene, plot: &PlotFrame) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        for element in scene.elements() {
            let polygon = plot.polygon_to_canvas(element.polygon());
            output.merge(Area::new(&self.theme.element, &polygon).render_to_layers(Point::default()));

            let label = element.id().to_string();
            output.merge(
                Text::new(&self.theme.label_text, &label)
                    .render_to_layers(plot.to_canvas(element.label_position())),
            );
        }

        output
    }

    fn render_nodes(&self, scene: &Scene, plot: &PlotFrame) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let marker = Marker::new(&self.theme.marker);

        for node in scene.nodes() {
            output.merge(marker.render_to_layers(plot.to_canvas(*node)));
        }

        output
    }

    fn render_title(&self, canvas_bounds: Bounds) -> LayeredOutput {
        let position = Point::new(canvas_bounds.center().x(), TITLE_BAND / 2.0);
        Text::new(&self.theme.title_text, &self.theme.title)
            .with_layer(RenderLayer::Annotation)
            .render_to_layers(position)
    }

    fn render_legend(&self, plot: &PlotFrame) -> LayeredOutput {
        let theme = &self.theme;
        let legend = Legend::new(
            &theme.legend_title,
            &theme.legend_title_text,
            &theme.legend_entry_text,
            &theme.legend_box,
            vec![
                LegendEntry::new(LegendGlyph::Area(&theme.element), &theme.element_legend),
                LegendEntry::new(LegendGlyph::Line(&theme.contour), &theme.contour_legend),
                LegendEntry::new(LegendGlyph::Marker(&theme.marker), &theme.node_legend),
            ],
        );

        let frame = plot.frame();
        let position = Point::new(frame.max_x() + frame.width() * 0.02, frame.min_y());
        legend.render_to_layers(position)
    }

    /// Writes an SVG document to the sink.
    fn write_document(&mut self, doc: Document) -> Result<(), export::Error> {
        if let Err(err) = write!(self.sink, "{doc}") {
            error!(err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        self.sink.flush().map_err(export::Error::Io)
    }
}

impl<W: Write> export::Exporter for Svg<W> {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), export::Error> {
        let doc = self.render_scene(scene);
        debug!("SVG document rendered");

        self.write_document(doc)?;
        info!(
            elements = scene.elements().len(),
            nodes = scene.nodes().len();
            "SVG written"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        export::Exporter,
        schema::{self, Edge, EdgeKind, Node, Schema},
    };

    fn render(scene: &Scene) -> String {
        let mut buffer = Vec::new();
        SvgBuilder::new(&mut buffer)
            .build()
            .unwrap()
            .export_scene(scene)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn triangle_scene() -> Scene {
        let schema = schema::parse(
            r#"{"nodes":[{"id":1,"x":0,"y":0,"element_id":"A"},{"id":2,"x":1,"y":0,"element_id":"A"},{"id":3,"x":1,"y":1,"element_id":"A"}], "edges":[]}"#,
        )
        .unwrap();
        Scene::from_schema(&schema).unwrap()
    }

    #[test]
    fn test_triangle_document() {
        let svg = render(&triangle_scene());

        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        // One element polygon plus the legend swatch and legend box
        assert_eq!(svg.matches("<polygon").count(), 3);
        // Three nodes plus the legend marker
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.replace('\n', "").contains(">A</text>"));
        assert!(svg.contains("Schema topology"));
        assert!(svg.contains("Contour edge"));
    }

    #[test]
    fn test_layer_order() {
        let schema = Schema::new(
            vec![
                Node::new(1, 0.0, 0.0, "A"),
                Node::new(2, 10.0, 0.0, "A"),
                Node::new(3, 10.0, 10.0, "A"),
            ],
            vec![Edge::new(1, 2, EdgeKind::Contour)],
        )
        .unwrap();
        let svg = render(&Scene::from_schema(&schema).unwrap());

        let order: Vec<usize> = ["grid", "edge", "element", "node", "label", "annotation"]
            .iter()
            .map(|layer| {
                svg.find(&format!(r#"data-layer="{layer}""#))
                    .unwrap_or_else(|| panic!("missing layer {layer}"))
            })
            .collect();

        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_two_node_element_has_no_polygon() {
        let schema = Schema::new(
            vec![Node::new(1, 0.0, 0.0, "pair"), Node::new(2, 3.0, 4.0, "pair")],
            Vec::new(),
        )
        .unwrap();
        let svg = render(&Scene::from_schema(&schema).unwrap());

        // Only the legend box and legend swatch
        assert_eq!(svg.matches("<polygon").count(), 2);
        assert!(!svg.contains(r#"data-layer="element""#));
    }

    #[test]
    fn test_invalid_style_color_fails_build() {
        let style: StyleConfig = serde_json::from_str(r#"{"node_color": "blurple"}"#).unwrap();
        let result = SvgBuilder::new(Vec::new()).with_style(&style).build();
        assert!(matches!(result, Err(export::Error::Render(_))));
    }

    #[test]
    fn test_zero_canvas_fails_build() {
        let canvas = CanvasConfig::new(0.0, 900.0);
        let result = SvgBuilder::new(Vec::new()).with_canvas(&canvas).build();
        assert!(matches!(result, Err(export::Error::Render(_))));
    }

    #[test]
    fn test_canvas_size_in_document() {
        let canvas = CanvasConfig::new(800.0, 600.0);
        let svg = SvgBuilder::new(Vec::new())
            .with_canvas(&canvas)
            .build()
            .unwrap()
            .render_scene(&triangle_scene())
            .to_string();

        assert!(svg.contains(r#"width="800""#));
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
    }
}
