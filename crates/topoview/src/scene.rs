//! Geometry preparation.
//!
//! Turns a [`Schema`] into a [`Scene`]: everything the renderer needs, in
//! schema coordinates. This is where the bounding box and padding are
//! computed, nodes are grouped into element polygons, contour edges are
//! resolved to segments, and the grid spacing is chosen.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use topoview_core::geometry::{Bounds, Point, Polygon, Size};

use crate::{
    TopoviewError,
    grid::GridSpec,
    schema::{Key, Node, Schema},
};

/// Fraction of the coordinate range added on each side of the plot.
pub const PADDING_RATIO: f32 = 0.1;

/// Lower bound for the padding, so point-like schemas still get a view.
pub const MIN_PADDING: f32 = 5.0;

/// Padding on one axis for a coordinate range.
///
/// ```
/// # use topoview::scene::padding_for_range;
/// assert_eq!(padding_for_range(0.0), 5.0);
/// assert_eq!(padding_for_range(100.0), 10.0);
/// ```
pub fn padding_for_range(range: f32) -> f32 {
    (range * PADDING_RATIO).max(MIN_PADDING)
}

/// An element drawn as a polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementShape {
    id: Key,
    polygon: Polygon,
    label_position: Point,
}

impl ElementShape {
    pub fn id(&self) -> &Key {
        &self.id
    }

    /// The polygon, with vertices ordered by node identifier.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Where the element label goes; always inside the polygon.
    pub fn label_position(&self) -> Point {
        self.label_position
    }
}

/// A schema prepared for rendering, in schema coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    data_bounds: Bounds,
    padding: Size,
    grid: GridSpec,
    contour_segments: Vec<(Point, Point)>,
    elements: Vec<ElementShape>,
    nodes: Vec<Point>,
}

impl Scene {
    /// Prepares a schema for rendering.
    ///
    /// # Errors
    ///
    /// Returns [`TopoviewError::NoNodes`] if the schema has no nodes.
    pub fn from_schema(schema: &Schema) -> Result<Self, TopoviewError> {
        let nodes: Vec<Point> = schema
            .nodes()
            .iter()
            .map(|node| Point::new(node.x(), node.y()))
            .collect();

        let data_bounds =
            Bounds::from_points(nodes.iter().copied()).ok_or(TopoviewError::NoNodes)?;
        let x_range = data_bounds.width();
        let y_range = data_bounds.height();

        let padding = Size::new(padding_for_range(x_range), padding_for_range(y_range));
        let grid = GridSpec::for_ranges(x_range, y_range);
        debug!(
            x_range,
            y_range,
            grid_step = grid.major_step();
            "Bounds computed"
        );

        // Later duplicates win, like inserting into a map in input order
        let positions: HashMap<&Key, Point> = schema
            .nodes()
            .iter()
            .map(|node| (node.id(), Point::new(node.x(), node.y())))
            .collect();

        let contour_segments = contour_segments(schema, &positions);
        let elements = element_shapes(schema.nodes());

        debug!(
            nodes = nodes.len(),
            elements = elements.len(),
            contour_segments = contour_segments.len();
            "Scene prepared"
        );

        Ok(Self {
            data_bounds,
            padding,
            grid,
            contour_segments,
            elements,
            nodes,
        })
    }

    /// Min/max over all node coordinates.
    pub fn data_bounds(&self) -> Bounds {
        self.data_bounds
    }

    /// Padding added on each side, per axis.
    pub fn padding(&self) -> Size {
        self.padding
    }

    /// The visible area: data bounds grown by the padding.
    pub fn view_bounds(&self) -> Bounds {
        self.data_bounds
            .expand(self.padding.width(), self.padding.height())
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Contour edges whose endpoints both exist.
    pub fn contour_segments(&self) -> &[(Point, Point)] {
        &self.contour_segments
    }

    /// Elements with more than two nodes, in order of first appearance.
    pub fn elements(&self) -> &[ElementShape] {
        &self.elements
    }

    /// Every node position, in input order.
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }
}

fn contour_segments(schema: &Schema, positions: &HashMap<&Key, Point>) -> Vec<(Point, Point)> {
    let mut skipped = 0usize;

    let segments: Vec<(Point, Point)> = schema
        .edges()
        .iter()
        .filter(|edge| edge.is_contour())
        .filter_map(|edge| {
            let segment = positions
                .get(edge.source())
                .zip(positions.get(edge.target()))
                .map(|(start, end)| (*start, *end));
            if segment.is_none() {
                skipped += 1;
                trace!(source:% = edge.source(), target:% = edge.target(); "Skipping contour edge with unknown endpoint");
            }
            segment
        })
        .collect();

    if skipped > 0 {
        debug!(skipped; "Contour edges reference unknown nodes");
    }

    segments
}

fn element_shapes(nodes: &[Node]) -> Vec<ElementShape> {
    let mut groups: IndexMap<&Key, Vec<&Node>> = IndexMap::new();
    for node in nodes {
        groups.entry(node.element_id()).or_default().push(node);
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 2)
        .filter_map(|(id, mut members)| {
            members.sort_by(|a, b| a.id().cmp(b.id()));

            let polygon = Polygon::new(
                members
                    .iter()
                    .map(|node| Point::new(node.x(), node.y()))
                    .collect(),
            );
            let label_position = polygon.representative_point()?;

            Some(ElementShape {
                id: id.clone(),
                polygon,
                label_position,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::schema::{Edge, EdgeKind};

    fn triangle_schema() -> Schema {
        Schema::new(
            vec![
                Node::new(1, 0.0, 0.0, "A"),
                Node::new(2, 1.0, 0.0, "A"),
                Node::new(3, 1.0, 1.0, "A"),
            ],
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_scene() {
        let scene = Scene::from_schema(&triangle_schema()).unwrap();

        assert_eq!(scene.nodes().len(), 3);
        assert_eq!(scene.elements().len(), 1);
        assert_eq!(scene.elements()[0].id(), &Key::from("A"));
        assert_eq!(scene.elements()[0].polygon().vertices().len(), 3);
        assert!(scene.contour_segments().is_empty());

        assert_eq!(scene.padding(), Size::new(5.0, 5.0));
        assert_eq!(scene.view_bounds().min_x(), -5.0);
        assert_eq!(scene.view_bounds().max_y(), 6.0);
        assert_eq!(scene.grid().major_step(), 1.0);
    }

    #[test]
    fn test_label_inside_polygon() {
        let scene = Scene::from_schema(&triangle_schema()).unwrap();
        let element = &scene.elements()[0];
        assert!(element.polygon().contains(element.label_position()));
    }

    #[test]
    fn test_small_elements_have_no_polygon() {
        let schema = Schema::new(
            vec![
                Node::new(1, 0.0, 0.0, "pair"),
                Node::new(2, 1.0, 0.0, "pair"),
                Node::new(3, 5.0, 5.0, "single"),
            ],
            Vec::new(),
        )
        .unwrap();

        let scene = Scene::from_schema(&schema).unwrap();
        assert!(scene.elements().is_empty());
        assert_eq!(scene.nodes().len(), 3);
    }

    #[test]
    fn test_vertices_sorted_by_identifier() {
        let schema = Schema::new(
            vec![
                Node::new(3, 0.0, 1.0, "E"),
                Node::new(1, 0.0, 0.0, "E"),
                Node::new(2, 1.0, 0.0, "E"),
            ],
            Vec::new(),
        )
        .unwrap();

        let scene = Scene::from_schema(&schema).unwrap();
        assert_eq!(
            scene.elements()[0].polygon().vertices(),
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 1.0)
            ]
        );
    }

    #[test]
    fn test_elements_keep_first_appearance_order() {
        let schema = Schema::new(
            vec![
                Node::new(1, 0.0, 0.0, "Z"),
                Node::new(10, 5.0, 0.0, "B"),
                Node::new(2, 1.0, 0.0, "Z"),
                Node::new(11, 6.0, 0.0, "B"),
                Node::new(3, 1.0, 1.0, "Z"),
                Node::new(12, 6.0, 1.0, "B"),
            ],
            Vec::new(),
        )
        .unwrap();

        let scene = Scene::from_schema(&schema).unwrap();
        let ids: Vec<String> = scene.elements().iter().map(|e| e.id().to_string()).collect();
        assert_eq!(ids, vec!["Z", "B"]);
    }

    #[test]
    fn test_contour_edges_skip_unknown_nodes() {
        let schema = Schema::new(
            vec![
                Node::new(1, 0.0, 0.0, "A"),
                Node::new(2, 4.0, 0.0, "A"),
            ],
            vec![
                Edge::new(1, 2, EdgeKind::Contour),
                Edge::new(1, 99, EdgeKind::Contour),
                Edge::new("ghost", 2, EdgeKind::Contour),
                Edge::new(2, 1, EdgeKind::Other("inner".to_string())),
            ],
        )
        .unwrap();

        let scene = Scene::from_schema(&schema).unwrap();
        assert_eq!(
            scene.contour_segments(),
            &[(Point::new(0.0, 0.0), Point::new(4.0, 0.0))]
        );
    }

    #[test]
    fn test_degenerate_line_uses_unit_grid() {
        let schema = Schema::new(
            vec![Node::new(1, 0.0, 0.0, "A"), Node::new(2, 300.0, 0.0, "A")],
            Vec::new(),
        )
        .unwrap();

        let scene = Scene::from_schema(&schema).unwrap();
        assert_eq!(scene.grid(), GridSpec::unit());
        assert_eq!(scene.padding(), Size::new(30.0, 5.0));
    }

    fn node_list() -> impl Strategy<Value = Vec<Node>> {
        prop::collection::vec((-500i32..500, -500i32..500, 0u8..4), 1..30).prop_map(|coords| {
            coords
                .into_iter()
                .enumerate()
                .map(|(i, (x, y, element))| {
                    Node::new(i as i64, x as f32 / 2.0, y as f32 / 2.0, i64::from(element))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_bounds_contain_all_nodes(nodes in node_list()) {
            let schema = Schema::new(nodes, Vec::new()).unwrap();
            let scene = Scene::from_schema(&schema).unwrap();
            let bounds = scene.data_bounds();

            for node in schema.nodes() {
                prop_assert!(bounds.min_x() <= node.x() && node.x() <= bounds.max_x());
                prop_assert!(bounds.min_y() <= node.y() && node.y() <= bounds.max_y());
            }
        }

        #[test]
        fn prop_padding_at_least_minimum(nodes in node_list()) {
            let schema = Schema::new(nodes, Vec::new()).unwrap();
            let scene = Scene::from_schema(&schema).unwrap();

            prop_assert!(scene.padding().width() >= MIN_PADDING);
            prop_assert!(scene.padding().height() >= MIN_PADDING);
        }

        #[test]
        fn prop_only_large_elements_become_polygons(nodes in node_list()) {
            let schema = Schema::new(nodes, Vec::new()).unwrap();
            let scene = Scene::from_schema(&schema).unwrap();

            for element in scene.elements() {
                let members = schema
                    .nodes()
                    .iter()
                    .filter(|node| node.element_id() == element.id())
                    .count();
                prop_assert!(members > 2);
                prop_assert_eq!(element.polygon().vertices().len(), members);
            }
        }
    }
}
