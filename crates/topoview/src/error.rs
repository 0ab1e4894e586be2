//! Error types for Topoview operations.
//!
//! This module provides the main error type [`TopoviewError`] which wraps
//! the error conditions that can occur while loading and plotting a schema.

use std::{io, path::PathBuf};

use serde_json::error::Category;
use thiserror::Error;

/// The main error type for Topoview operations.
///
/// # Source-carrying Variants
///
/// `InvalidJson` and `InvalidSchema` keep the source text next to the
/// `serde_json` error, whose line and column point into it. This is enough
/// for rich error reporting with a labeled snippet.
#[derive(Debug, Error)]
pub enum TopoviewError {
    #[error("Schema file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON: {err}")]
    InvalidJson { err: serde_json::Error, src: String },

    #[error("Invalid schema: {err}")]
    InvalidSchema { err: serde_json::Error, src: String },

    #[error("No nodes data: the schema has no nodes")]
    NoNodes,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for TopoviewError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TopoviewError {
    /// Create a JSON error with the associated source text.
    ///
    /// Syntax and end-of-input failures become `InvalidJson`; well-formed
    /// JSON that does not match the schema shape becomes `InvalidSchema`.
    pub fn new_json_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        let src = src.into();
        match err.classify() {
            Category::Data => Self::InvalidSchema { err, src },
            Category::Io | Category::Syntax | Category::Eof => Self::InvalidJson { err, src },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = TopoviewError::NotFound {
            path: PathBuf::from("NAME.json"),
        };
        let message = err.to_string();
        assert!(message.contains("not found"));
        assert!(message.contains("NAME.json"));
    }

    #[test]
    fn test_new_json_error_classifies_syntax() {
        let src = r#"{"nodes": [}"#;
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        assert!(matches!(
            TopoviewError::new_json_error(err, src),
            TopoviewError::InvalidJson { .. }
        ));
    }

    #[test]
    fn test_new_json_error_classifies_data() {
        let src = r#"{"x": "one"}"#;

        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Probe {
            x: f32,
        }

        let err = serde_json::from_str::<Probe>(src).unwrap_err();
        assert!(matches!(
            TopoviewError::new_json_error(err, src),
            TopoviewError::InvalidSchema { .. }
        ));
    }
}
