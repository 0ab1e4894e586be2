//! Export functionality for Topoview plots.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a prepared [`Scene`] into an output format. It is the final stage
//! in the pipeline.
//!
//! ```text
//! JSON text
//!     ↓ schema::parse
//! Schema
//!     ↓ Scene::from_schema
//! Scene (schema coordinates)
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! Export operations return [`Error`], which converts into
//! [`TopoviewError::Export`](crate::TopoviewError::Export) at the crate boundary.

/// SVG export backend.
pub mod svg;

use crate::scene::Scene;

/// Abstraction for plot export backends.
pub trait Exporter {
    /// Exports a prepared scene to the backend's output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_scene(&mut self, scene: &Scene) -> Result<(), Error>;
}

/// Errors that can occur during plot export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
