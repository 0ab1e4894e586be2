//! The legend box to the right of the plot.

use topoview_core::{
    draw::{
        Area, AreaDefinition, Drawable, LayeredOutput, Lines, Marker, MarkerDefinition,
        RenderLayer, StrokeDefinition, Text, TextDefinition,
    },
    geometry::{Point, Polygon, Size},
};

const PADDING: f32 = 10.0;
const ROW_HEIGHT: f32 = 22.0;
const GLYPH_WIDTH: f32 = 24.0;
const GLYPH_HEIGHT: f32 = 12.0;
const GLYPH_GAP: f32 = 8.0;

/// How a legend row shows the thing it names.
#[derive(Debug, Clone, Copy)]
pub(super) enum LegendGlyph<'a> {
    Area(&'a AreaDefinition),
    Line(&'a StrokeDefinition),
    Marker(&'a MarkerDefinition),
}

#[derive(Debug, Clone, Copy)]
pub(super) struct LegendEntry<'a> {
    glyph: LegendGlyph<'a>,
    label: &'a str,
}

impl<'a> LegendEntry<'a> {
    pub fn new(glyph: LegendGlyph<'a>, label: &'a str) -> Self {
        Self { glyph, label }
    }
}

/// A boxed legend. The render position is its top-left corner.
#[derive(Debug, Clone)]
pub(super) struct Legend<'a> {
    title: &'a str,
    title_text: &'a TextDefinition,
    entry_text: &'a TextDefinition,
    frame: &'a AreaDefinition,
    entries: Vec<LegendEntry<'a>>,
}

impl<'a> Legend<'a> {
    pub fn new(
        title: &'a str,
        title_text: &'a TextDefinition,
        entry_text: &'a TextDefinition,
        frame: &'a AreaDefinition,
        entries: Vec<LegendEntry<'a>>,
    ) -> Self {
        Self {
            title,
            title_text,
            entry_text,
            frame,
            entries,
        }
    }

    fn render_glyph(glyph: LegendGlyph<'_>, center: Point) -> LayeredOutput {
        let half_width = GLYPH_WIDTH / 2.0;
        let half_height = GLYPH_HEIGHT / 2.0;

        match glyph {
            LegendGlyph::Area(definition) => {
                let swatch = Polygon::new(vec![
                    Point::new(center.x() - half_width, center.y() - half_height),
                    Point::new(center.x() + half_width, center.y() - half_height),
                    Point::new(center.x() + half_width, center.y() + half_height),
                    Point::new(center.x() - half_width, center.y() + half_height),
                ]);
                Area::new(definition, &swatch)
                    .with_layer(RenderLayer::Annotation)
                    .render_to_layers(Point::default())
            }
            LegendGlyph::Line(stroke) => {
                let segment = [(
                    Point::new(center.x() - half_width, center.y()),
                    Point::new(center.x() + half_width, center.y()),
                )];
                Lines::new(stroke, &segment)
                    .with_layer(RenderLayer::Annotation)
                    .render_to_layers(Point::default())
            }
            LegendGlyph::Marker(definition) => Marker::new(definition)
                .with_layer(RenderLayer::Annotation)
                .render_to_layers(center),
        }
    }
}

impl Drawable for Legend<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let size = self.size();

        let frame = Polygon::new(vec![
            position,
            Point::new(position.x() + size.width(), position.y()),
            Point::new(position.x() + size.width(), position.y() + size.height()),
            Point::new(position.x(), position.y() + size.height()),
        ]);
        output.merge(
            Area::new(self.frame, &frame)
                .with_layer(RenderLayer::Annotation)
                .render_to_layers(Point::default()),
        );

        let title = Text::new(self.title_text, self.title).with_layer(RenderLayer::Annotation);
        let title_height = title.size().height();
        output.merge(title.render_to_layers(Point::new(
            position.x() + size.width() / 2.0,
            position.y() + PADDING + title_height / 2.0,
        )));

        let rows_top = position.y() + PADDING + title_height + PADDING / 2.0;
        for (index, entry) in self.entries.iter().enumerate() {
            let row_center = rows_top + ROW_HEIGHT * (index as f32 + 0.5);
            let glyph_center = Point::new(position.x() + PADDING + GLYPH_WIDTH / 2.0, row_center);
            output.merge(Self::render_glyph(entry.glyph, glyph_center));

            let label_position = Point::new(
                position.x() + PADDING + GLYPH_WIDTH + GLYPH_GAP,
                row_center,
            );
            output.merge(
                Text::new(self.entry_text, entry.label)
                    .with_layer(RenderLayer::Annotation)
                    .render_to_layers(label_position),
            );
        }

        output
    }

    fn size(&self) -> Size {
        let title = Text::new(self.title_text, self.title).size();
        let widest_label = self
            .entries
            .iter()
            .map(|entry| Text::new(self.entry_text, entry.label).size().width())
            .fold(0.0, f32::max);

        let rows_width = GLYPH_WIDTH + GLYPH_GAP + widest_label;
        let width = title.width().max(rows_width) + 2.0 * PADDING;
        let height =
            PADDING + title.height() + PADDING / 2.0 + ROW_HEIGHT * self.entries.len() as f32 + PADDING;

        Size::new(width, height)
    }
}
