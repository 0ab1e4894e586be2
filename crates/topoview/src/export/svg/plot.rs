//! Mapping from schema coordinates to the canvas, plus the grid and axes.

use std::io::Write;

use svg::node::element as svg_element;

use topoview_core::{
    apply_stroke,
    draw::{Drawable, LayeredOutput, Lines, RenderLayer, Text},
    geometry::{Bounds, Point, Polygon, Size},
};

use super::Svg;
use crate::scene::Scene;

const TICK_LENGTH: f32 = 5.0;
const TICK_LABEL_GAP: f32 = 4.0;
const AXIS_LABEL_OFFSET: f32 = 40.0;

/// The rectangle on the canvas that shows the view bounds.
///
/// Both axes share one scale so shapes keep their proportions. The y axis
/// points up in schema coordinates and down on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PlotFrame {
    view: Bounds,
    frame: Bounds,
    scale: f32,
}

impl PlotFrame {
    /// Fits `view` into `area`, centered, with equal scale on both axes.
    pub fn fit(view: Bounds, area: Bounds) -> Self {
        let scale_x = area.width() / view.width();
        let scale_y = area.height() / view.height();
        let scale = scale_x.min(scale_y);

        let frame = Bounds::new_from_center(
            area.center(),
            Size::new(view.width() * scale, view.height() * scale),
        );

        Self { view, frame, scale }
    }

    /// Canvas pixels per schema unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The plot rectangle on the canvas.
    pub fn frame(&self) -> Bounds {
        self.frame
    }

    pub fn to_canvas(&self, point: Point) -> Point {
        Point::new(self.x_to_canvas(point.x()), self.y_to_canvas(point.y()))
    }

    pub fn polygon_to_canvas(&self, polygon: &Polygon) -> Polygon {
        Polygon::new(
            polygon
                .vertices()
                .iter()
                .map(|vertex| self.to_canvas(*vertex))
                .collect(),
        )
    }

    fn x_to_canvas(&self, x: f32) -> f32 {
        self.frame.min_x() + (x - self.view.min_x()) * self.scale
    }

    fn y_to_canvas(&self, y: f32) -> f32 {
        self.frame.max_y() - (y - self.view.min_y()) * self.scale
    }
}

/// Tick label text. Whole numbers are printed without decimals.
fn tick_label(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl<W: Write> Svg<W> {
    /// Minor then major grid lines across the plot frame.
    pub(super) fn render_grid(&self, scene: &Scene, plot: &PlotFrame) -> LayeredOutput {
        let grid = scene.grid();
        let view = scene.view_bounds();
        let frame = plot.frame();

        let vertical = |x: f32| {
            let x = plot.x_to_canvas(x);
            (Point::new(x, frame.min_y()), Point::new(x, frame.max_y()))
        };
        let horizontal = |y: f32| {
            let y = plot.y_to_canvas(y);
            (Point::new(frame.min_x(), y), Point::new(frame.max_x(), y))
        };

        let minor: Vec<(Point, Point)> = grid
            .minor_positions(view.min_x(), view.max_x())
            .into_iter()
            .map(vertical)
            .chain(
                grid.minor_positions(view.min_y(), view.max_y())
                    .into_iter()
                    .map(horizontal),
            )
            .collect();
        let major: Vec<(Point, Point)> = grid
            .major_positions(view.min_x(), view.max_x())
            .into_iter()
            .map(vertical)
            .chain(
                grid.major_positions(view.min_y(), view.max_y())
                    .into_iter()
                    .map(horizontal),
            )
            .collect();

        let mut output = LayeredOutput::new();
        output.merge(
            Lines::new(&self.theme.minor_grid, &minor)
                .with_layer(RenderLayer::Grid)
                .render_to_layers(Point::default()),
        );
        output.merge(
            Lines::new(&self.theme.major_grid, &major)
                .with_layer(RenderLayer::Grid)
                .render_to_layers(Point::default()),
        );
        output
    }

    /// Plot frame, tick marks with labels at major grid positions, and axis titles.
    pub(super) fn render_axes(&self, scene: &Scene, plot: &PlotFrame) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let frame = plot.frame();
        let view = scene.view_bounds();
        let grid = scene.grid();

        let border = svg_element::Rectangle::new()
            .set("x", frame.min_x())
            .set("y", frame.min_y())
            .set("width", frame.width())
            .set("height", frame.height())
            .set("fill", "none");
        let border = apply_stroke!(border, &self.theme.frame);
        output.add_to_layer(RenderLayer::Annotation, Box::new(border));

        let mut ticks = Vec::new();
        for x in grid.major_positions(view.min_x(), view.max_x()) {
            let canvas_x = plot.x_to_canvas(x);
            ticks.push((
                Point::new(canvas_x, frame.max_y()),
                Point::new(canvas_x, frame.max_y() + TICK_LENGTH),
            ));

            let label = tick_label(x);
            let position = Point::new(
                canvas_x,
                frame.max_y() + TICK_LENGTH + TICK_LABEL_GAP + 6.0,
            );
            output.merge(
                Text::new(&self.theme.x_tick_text, &label)
                    .with_layer(RenderLayer::Annotation)
                    .render_to_layers(position),
            );
        }
        for y in grid.major_positions(view.min_y(), view.max_y()) {
            let canvas_y = plot.y_to_canvas(y);
            ticks.push((
                Point::new(frame.min_x() - TICK_LENGTH, canvas_y),
                Point::new(frame.min_x(), canvas_y),
            ));

            let label = tick_label(y);
            let position = Point::new(frame.min_x() - TICK_LENGTH - TICK_LABEL_GAP, canvas_y);
            output.merge(
                Text::new(&self.theme.y_tick_text, &label)
                    .with_layer(RenderLayer::Annotation)
                    .render_to_layers(position),
            );
        }
        output.merge(
            Lines::new(&self.theme.frame, &ticks)
                .with_layer(RenderLayer::Annotation)
                .render_to_layers(Point::default()),
        );

        let x_label_position = Point::new(frame.center().x(), frame.max_y() + AXIS_LABEL_OFFSET);
        output.merge(
            Text::new(&self.theme.x_axis_text, &self.theme.x_label)
                .with_layer(RenderLayer::Annotation)
                .render_to_layers(x_label_position),
        );

        let y_label_position = Point::new(frame.min_x() - AXIS_LABEL_OFFSET - 16.0, frame.center().y());
        output.merge(
            Text::new(&self.theme.y_axis_text, &self.theme.y_label)
                .with_layer(RenderLayer::Annotation)
                .render_to_layers(y_label_position),
        );

        output
    }
}
