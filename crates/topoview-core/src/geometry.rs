//! Geometric primitives for schema plotting.
//!
//! This module provides the geometric types used by Topoview both in schema
//! (data) space and in canvas (SVG) space.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//! - [`Polygon`] - A closed vertex ring with point containment and label placement
//!
//! # Coordinate Systems
//!
//! Schema coordinates grow upward along Y, like a mathematical plot. Canvas
//! coordinates follow SVG, with the origin in the top-left corner and Y
//! growing downward. These types do not care which one they hold; the
//! mapping between the two lives in the renderer.

use log::trace;

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use topoview_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Computes the smallest bounds containing every point.
    ///
    /// Returns `None` when the iterator is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use topoview_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([
    ///     Point::new(0.0, 3.0),
    ///     Point::new(-2.0, 1.0),
    ///     Point::new(4.0, -1.0),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(bounds.min_x(), -2.0);
    /// assert_eq!(bounds.max_x(), 4.0);
    /// assert_eq!(bounds.min_y(), -1.0);
    /// assert_eq!(bounds.max_y(), 3.0);
    /// assert!(Bounds::from_points(std::iter::empty()).is_none());
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let seed = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };

        Some(points.fold(seed, |acc, point| Self {
            min_x: acc.min_x.min(point.x),
            min_y: acc.min_y.min(point.y),
            max_x: acc.max_x.max(point.x),
            max_y: acc.max_y.max(point.y),
        }))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns `true` if the point lies inside or on the edge of the bounds.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Grows the bounds by `dx` on the left and right and `dy` on the top and bottom.
    ///
    /// # Examples
    ///
    /// ```
    /// # use topoview_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 4.0));
    /// let grown = bounds.expand(5.0, 2.0);
    /// assert_eq!(grown.min_x(), -5.0);
    /// assert_eq!(grown.max_y(), 6.0);
    /// assert_eq!(grown.width(), 20.0);
    /// ```
    pub fn expand(self, dx: f32, dy: f32) -> Self {
        Self {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Shrinks the bounds by the given insets.
    pub fn shrink(self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x + insets.left,
            min_y: self.min_y + insets.top,
            max_x: self.max_x - insets.right,
            max_y: self.max_y - insets.bottom,
        }
    }
}

/// Padding or margin values for the four sides of a rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets, in CSS order (top, right, bottom, left)
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// A closed polygon given by its vertex ring.
///
/// The ring is implicitly closed: the last vertex connects back to the first.
/// Vertices are kept in the order given, so the polygon may be concave or
/// even self-intersecting. Containment uses the even-odd rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from its vertex ring
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Returns the vertices in ring order
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Returns the bounding box of the vertices, or `None` for an empty polygon
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.vertices.iter().copied())
    }

    /// Iterates the ring edges as `(start, end)` pairs, including the closing edge.
    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Tests whether `point` lies inside the polygon (crossing number, even-odd rule).
    ///
    /// # Examples
    ///
    /// ```
    /// # use topoview_core::geometry::{Point, Polygon};
    /// let triangle = Polygon::new(vec![
    ///     Point::new(0.0, 0.0),
    ///     Point::new(4.0, 0.0),
    ///     Point::new(0.0, 4.0),
    /// ]);
    /// assert!(triangle.contains(Point::new(1.0, 1.0)));
    /// assert!(!triangle.contains(Point::new(3.0, 3.0)));
    /// ```
    pub fn contains(&self, point: Point) -> bool {
        self.edges()
            .filter_map(|(start, end)| edge_crossing_x(start, end, point.y))
            .filter(|&x| point.x < x)
            .count()
            % 2
            == 1
    }

    /// Returns a point guaranteed to lie inside the polygon.
    ///
    /// A horizontal scanline is intersected with the ring. The crossings are
    /// paired into inside intervals and the midpoint of the widest one is
    /// returned, which keeps the point inside concave shapes where a centroid
    /// would fall out.
    ///
    /// The scanline never passes through a vertex: it sits halfway between
    /// two neighbouring vertex heights, picking the gap nearest the middle of
    /// the bounding box.
    ///
    /// Degenerate rings (all vertices collinear) have no interior; the center
    /// of their bounding box is returned, which lies on the shape. Returns
    /// `None` only for an empty polygon.
    ///
    /// # Examples
    ///
    /// ```
    /// # use topoview_core::geometry::{Point, Polygon};
    /// // A "U" shape whose centroid falls in the notch
    /// let u_shape = Polygon::new(vec![
    ///     Point::new(0.0, 0.0),
    ///     Point::new(6.0, 0.0),
    ///     Point::new(6.0, 6.0),
    ///     Point::new(4.0, 6.0),
    ///     Point::new(4.0, 2.0),
    ///     Point::new(2.0, 2.0),
    ///     Point::new(2.0, 6.0),
    ///     Point::new(0.0, 6.0),
    /// ]);
    ///
    /// let point = u_shape.representative_point().unwrap();
    /// assert!(u_shape.contains(point));
    /// ```
    pub fn representative_point(&self) -> Option<Point> {
        let bounds = self.bounds()?;
        let scan_y = scanline_y(&self.vertices, bounds.center().y);

        let mut crossings: Vec<f32> = self
            .edges()
            .filter_map(|(start, end)| edge_crossing_x(start, end, scan_y))
            .collect();
        crossings.sort_by(f32::total_cmp);

        let widest = crossings
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .filter(|(left, right)| right > left)
            .max_by(|a, b| (a.1 - a.0).total_cmp(&(b.1 - b.0)));

        Some(match widest {
            Some((left, right)) => Point::new((left + right) / 2.0, scan_y),
            None => {
                trace!(vertices = self.vertices.len(); "Degenerate polygon, using bounds center");
                bounds.center()
            }
        })
    }
}

/// Height halfway between the two neighbouring distinct vertex heights
/// closest to `center_y`, preferring the wider gap on ties.
///
/// Falls back to `center_y` when all vertices share one height.
fn scanline_y(vertices: &[Point], center_y: f32) -> f32 {
    let mut levels: Vec<f32> = vertices.iter().map(|vertex| vertex.y).collect();
    levels.sort_by(f32::total_cmp);
    levels.dedup();

    let distance = |(low, high): (f32, f32)| {
        if center_y < low {
            low - center_y
        } else if center_y > high {
            center_y - high
        } else {
            0.0
        }
    };

    levels
        .windows(2)
        .map(|gap| (gap[0], gap[1]))
        .min_by(|a, b| {
            distance(*a)
                .total_cmp(&distance(*b))
                .then_with(|| (b.1 - b.0).total_cmp(&(a.1 - a.0)))
        })
        .map_or(center_y, |(low, high)| (low + high) / 2.0)
}

/// X coordinate where the edge `start -> end` crosses the horizontal line at `y`.
///
/// Uses the half-open rule (an edge counts when exactly one endpoint is strictly
/// above `y`) so shared vertices are never counted twice and horizontal edges
/// never count.
fn edge_crossing_x(start: Point, end: Point, y: f32) -> Option<f32> {
    if (start.y > y) == (end.y > y) {
        return None;
    }
    Some((end.x - start.x) * (y - start.y) / (end.y - start.y) + start.x)
}
