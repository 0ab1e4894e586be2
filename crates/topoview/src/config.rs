//! Configuration types for Topoview rendering.
//!
//! All types implement [`serde::Deserialize`] and default every field, so a
//! configuration file only needs to name what it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining canvas and style settings.
//! - [`CanvasConfig`] - Size of the rendered SVG.
//! - [`StyleConfig`] - Colors and texts of the plot.
//!
//! # Example
//!
//! ```
//! # use topoview::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.canvas().width(), 1600.0);
//! assert_eq!(config.style().title(), "Schema topology");
//! assert!(config.style().node_color().is_ok());
//! ```

use serde::Deserialize;

use topoview_core::color::Color;

/// Top-level application configuration combining canvas and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(canvas: CanvasConfig, style: StyleConfig) -> Self {
        Self { canvas, style }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Size of the output canvas in pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    width: f32,
    height: f32,
}

impl CanvasConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 900.0,
        }
    }
}

/// Visual styling of the plot.
///
/// Colors are CSS color strings and are parsed when the renderer is built.
/// Unset fields fall back to the defaults listed on each accessor.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    element_fill: Option<String>,
    #[serde(default)]
    element_border: Option<String>,
    #[serde(default)]
    contour_color: Option<String>,
    #[serde(default)]
    node_color: Option<String>,
    #[serde(default)]
    label_color: Option<String>,

    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    x_label: Option<String>,
    #[serde(default)]
    y_label: Option<String>,
    #[serde(default)]
    legend_title: Option<String>,
    #[serde(default)]
    element_legend: Option<String>,
    #[serde(default)]
    contour_legend: Option<String>,
    #[serde(default)]
    node_legend: Option<String>,
}

fn parse_color(value: Option<&String>, default: &str, field: &str) -> Result<Color, String> {
    Color::new(value.map_or(default, String::as_str))
        .map_err(|err| format!("Invalid {field} in config: {err}"))
}

impl StyleConfig {
    /// Canvas background, default `white`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Color, String> {
        parse_color(self.background_color.as_ref(), "white", "background_color")
    }

    /// Element polygon fill, default `#cceeff`.
    pub fn element_fill(&self) -> Result<Color, String> {
        parse_color(self.element_fill.as_ref(), "#cceeff", "element_fill")
    }

    /// Element polygon border, default `#333333`.
    pub fn element_border(&self) -> Result<Color, String> {
        parse_color(self.element_border.as_ref(), "#333333", "element_border")
    }

    /// Contour edge color, default `#aaaaaa`.
    pub fn contour_color(&self) -> Result<Color, String> {
        parse_color(self.contour_color.as_ref(), "#aaaaaa", "contour_color")
    }

    /// Node marker fill, default `#005b96`.
    pub fn node_color(&self) -> Result<Color, String> {
        parse_color(self.node_color.as_ref(), "#005b96", "node_color")
    }

    /// Element label color, default `#004466`.
    pub fn label_color(&self) -> Result<Color, String> {
        parse_color(self.label_color.as_ref(), "#004466", "label_color")
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Schema topology")
    }

    pub fn x_label(&self) -> &str {
        self.x_label.as_deref().unwrap_or("X coordinate")
    }

    pub fn y_label(&self) -> &str {
        self.y_label.as_deref().unwrap_or("Y coordinate")
    }

    pub fn legend_title(&self) -> &str {
        self.legend_title.as_deref().unwrap_or("Legend")
    }

    pub fn element_legend(&self) -> &str {
        self.element_legend.as_deref().unwrap_or("Element")
    }

    pub fn contour_legend(&self) -> &str {
        self.contour_legend.as_deref().unwrap_or("Contour edge")
    }

    pub fn node_legend(&self) -> &str {
        self.node_legend.as_deref().unwrap_or("Node")
    }
}
