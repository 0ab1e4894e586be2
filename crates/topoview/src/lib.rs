//! Topoview - plot 2D schema topologies from JSON.
//!
//! A schema is a set of positioned nodes grouped into elements, plus edges
//! between nodes. Topoview draws each element with three or more nodes as a
//! filled polygon, the contour edges as lines and every node as a marker,
//! over an adaptive grid with axes and a legend, and writes the result as SVG.

pub mod config;
pub mod export;
pub mod grid;
pub mod scene;
pub mod schema;

mod error;

pub use topoview_core::{color, draw, geometry};

pub use error::TopoviewError;

use std::path::Path;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use scene::Scene;
use schema::Schema;

/// Loads schemas and renders them to SVG.
///
/// # Examples
///
/// ```rust
/// use topoview::{SchemaPlotter, config::AppConfig};
///
/// let source = r#"{
///     "nodes": [
///         {"id": 1, "x": 0, "y": 0, "element_id": "A"},
///         {"id": 2, "x": 1, "y": 0, "element_id": "A"},
///         {"id": 3, "x": 1, "y": 1, "element_id": "A"}
///     ],
///     "edges": []
/// }"#;
///
/// let plotter = SchemaPlotter::new(AppConfig::default());
/// let schema = plotter.parse(source).expect("Failed to parse");
/// let svg = plotter.render_svg(&schema).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct SchemaPlotter {
    config: AppConfig,
}

impl SchemaPlotter {
    /// Create a new plotter with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Canvas and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse schema JSON text.
    ///
    /// # Errors
    ///
    /// Returns `TopoviewError` for malformed JSON, schema shape errors, or a
    /// schema without nodes.
    pub fn parse(&self, source: &str) -> Result<Schema, TopoviewError> {
        let schema = schema::parse(source)?;
        debug!(nodes = schema.nodes().len(), edges = schema.edges().len(); "Schema parsed");
        Ok(schema)
    }

    /// Read and parse a schema file.
    ///
    /// # Errors
    ///
    /// Returns [`TopoviewError::NotFound`] if the file does not exist, and
    /// the errors of [`SchemaPlotter::parse`] otherwise.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Schema, TopoviewError> {
        schema::load(path)
    }

    /// Compute bounds, grid, element polygons and contour segments.
    ///
    /// # Errors
    ///
    /// Returns [`TopoviewError::NoNodes`] if the schema has no nodes.
    pub fn prepare(&self, schema: &Schema) -> Result<Scene, TopoviewError> {
        info!(nodes = schema.nodes().len(); "Preparing scene");
        let scene = Scene::from_schema(schema)?;
        trace!(scene:?; "Prepared scene");
        Ok(scene)
    }

    /// Render a schema to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`TopoviewError::Config`] if a configured color or the canvas
    /// size is invalid, and [`TopoviewError::Export`] if rendering fails.
    pub fn render_svg(&self, schema: &Schema) -> Result<String, TopoviewError> {
        let scene = self.prepare(schema)?;

        let mut buffer = Vec::new();
        {
            let mut exporter = export::svg::SvgBuilder::new(&mut buffer)
                .with_canvas(self.config.canvas())
                .with_style(self.config.style())
                .build()
                .map_err(|err| match err {
                    export::Error::Render(message) => TopoviewError::Config(message),
                    other => other.into(),
                })?;

            exporter.export_scene(&scene)?;
        }

        let svg = String::from_utf8(buffer)
            .map_err(|err| export::Error::Render(format!("SVG is not valid UTF-8: {err}")))?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
