//! Schema input model and loader.
//!
//! A schema is a JSON document of the form
//!
//! ```json
//! {
//!   "nodes": [{"id": 1, "x": 0.0, "y": 0.0, "element_id": "A"}],
//!   "edges": [{"source": 1, "target": 2, "type": "contour"}]
//! }
//! ```
//!
//! Node and element identifiers may be integers or strings (see [`Key`]).
//! Unknown fields are ignored and a missing `edges` list is treated as empty.
//! A schema always holds at least one node.

use std::{fmt, fs, io, path::Path};

use log::{debug, info};
use serde::{Deserialize, Deserializer, de};

use crate::TopoviewError;

/// An identifier for nodes and elements, as written in the input.
///
/// Keys are totally ordered: integers sort before strings, integers compare
/// numerically and strings lexicographically. Element polygons take their
/// vertices in this order.
///
/// ```
/// # use topoview::schema::Key;
/// let mut keys = vec![Key::from("b"), Key::from(10), Key::from("a"), Key::from(2)];
/// keys.sort();
/// assert_eq!(keys, vec![Key::from(2), Key::from(10), Key::from("a"), Key::from("b")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Largest coordinate magnitude a node may have.
///
/// Plotting works in single precision, so the data range plus its padding
/// has to stay finite there.
pub const MAX_COORDINATE: f64 = 1e30;

/// A positioned node belonging to one element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    id: Key,
    #[serde(deserialize_with = "coordinate")]
    x: f32,
    #[serde(deserialize_with = "coordinate")]
    y: f32,
    element_id: Key,
}

/// Reads a JSON number as a plot coordinate, rejecting values the canvas
/// mapping cannot represent.
fn coordinate<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value.abs() > MAX_COORDINATE {
        return Err(de::Error::custom(format!(
            "coordinate {value} is out of range, the limit is ±{MAX_COORDINATE:e}"
        )));
    }
    Ok(value as f32)
}

impl Node {
    pub fn new(id: impl Into<Key>, x: f32, y: f32, element_id: impl Into<Key>) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            element_id: element_id.into(),
        }
    }

    pub fn id(&self) -> &Key {
        &self.id
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn element_id(&self) -> &Key {
        &self.element_id
    }
}

/// The type tag of an edge. Only contour edges are drawn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EdgeKind {
    Contour,
    Other(String),
}

impl From<String> for EdgeKind {
    fn from(tag: String) -> Self {
        if tag == "contour" {
            Self::Contour
        } else {
            Self::Other(tag)
        }
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Edge {
    source: Key,
    target: Key,
    #[serde(rename = "type")]
    kind: EdgeKind,
}

impl Edge {
    pub fn new(source: impl Into<Key>, target: impl Into<Key>, kind: EdgeKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }

    pub fn source(&self) -> &Key {
        &self.source
    }

    pub fn target(&self) -> &Key {
        &self.target
    }

    pub fn kind(&self) -> &EdgeKind {
        &self.kind
    }

    pub fn is_contour(&self) -> bool {
        self.kind == EdgeKind::Contour
    }
}

/// Document shape as it appears on disk, before validation.
#[derive(Debug, Deserialize)]
struct RawSchema {
    #[serde(default)]
    nodes: Option<Vec<Node>>,
    #[serde(default)]
    edges: Option<Vec<Edge>>,
}

/// A validated schema with at least one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Schema {
    /// Builds a schema from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`TopoviewError::NoNodes`] if `nodes` is empty.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, TopoviewError> {
        if nodes.is_empty() {
            return Err(TopoviewError::NoNodes);
        }
        Ok(Self { nodes, edges })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Parse a schema from JSON text.
///
/// # Errors
///
/// - [`TopoviewError::InvalidJson`] if the text is not well-formed JSON.
/// - [`TopoviewError::InvalidSchema`] if a node or edge misses a field or
///   has a value of the wrong type.
/// - [`TopoviewError::NoNodes`] if `nodes` is absent, `null` or empty.
pub fn parse(source: &str) -> Result<Schema, TopoviewError> {
    let raw: RawSchema = serde_json::from_str(source)
        .map_err(|err| TopoviewError::new_json_error(err, source))?;

    let nodes = raw.nodes.unwrap_or_default();
    let edges = raw.edges.unwrap_or_default();
    debug!(nodes = nodes.len(), edges = edges.len(); "Schema decoded");

    Schema::new(nodes, edges)
}

/// Read and parse a schema file.
///
/// # Errors
///
/// Returns [`TopoviewError::NotFound`] if the file does not exist,
/// [`TopoviewError::Io`] for other read failures, and any error of [`parse`].
pub fn load(path: impl AsRef<Path>) -> Result<Schema, TopoviewError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading schema");

    let source = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => TopoviewError::NotFound {
            path: path.to_path_buf(),
        },
        _ => TopoviewError::Io(err),
    })?;

    parse(&source)
}
