//! Color handling for Topoview plots
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, so that every plot style value can be written as a
//! CSS color string.
//!
//! Colors are written to SVG as opaque `#rrggbb` values. The alpha component
//! travels separately through the `fill-opacity` and `stroke-opacity`
//! attributes, see [`Color::alpha`].

use std::str::FromStr;

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use topoview_core::color::Color;
    ///
    /// let marker = Color::new("#005b96").unwrap();
    /// let border = Color::new("black").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use topoview_core::color::Color;
    ///
    /// let fill = Color::new("#cceeff").unwrap().with_alpha(0.7);
    /// assert!((fill.alpha() - 0.7).abs() < 1e-6);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

/// Writes the color as opaque sRGB hex, without its alpha component.
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        write!(f, "#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#cceeff").is_ok());
        assert!(Color::new("gray").is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
        assert!(invalid.unwrap_err().contains("not-a-color"));
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "#000000");
        assert_eq!(color.alpha(), 1.0);
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("#cceeff").unwrap();
        let transparent = color.with_alpha(0.7);
        assert!((transparent.alpha() - 0.7).abs() < 0.001);
    }

    #[test]
    fn test_color_display_drops_alpha() {
        let fill = Color::new("#cceeff").unwrap().with_alpha(0.7);
        assert_eq!(fill.to_string(), "#cceeff");

        let translucent = Color::new("rgba(0, 91, 150, 0.5)").unwrap();
        assert_eq!(translucent.to_string(), "#005b96");
        assert!((translucent.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_into_svg_value() {
        let color = Color::new("white").unwrap();
        let value: svg::node::Value = (&color).into();
        assert_eq!(value.to_string(), color.to_string());
    }
}
