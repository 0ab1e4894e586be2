//! Topoview Core Types and Definitions
//!
//! This crate provides the foundational types used to plot schema topology.
//! It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes, bounds and polygons ([`geometry`] module)
//! - **Draw**: Layered SVG drawing primitives ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
