//! CLI logic for the Topoview schema plotter.
//!
//! This module contains the core CLI logic: configuration lookup, schema
//! loading, rendering and writing the SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use topoview::{SchemaPlotter, TopoviewError};

/// Output path that selects standard output.
pub const STDOUT_OUTPUT: &str = "-";

/// Run the Topoview CLI application
///
/// This function loads the schema named by `args.input`, renders it and
/// writes the SVG to `args.output`. Nothing is written unless rendering
/// succeeds.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TopoviewError` for:
/// - A missing input file
/// - Configuration loading errors
/// - Malformed JSON or schema shape errors
/// - A schema without nodes
/// - Rendering and output errors
pub fn run(args: &Args) -> Result<(), TopoviewError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing schema"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let plotter = SchemaPlotter::new(app_config);
    let schema = plotter.load(&args.input)?;
    let svg = plotter.render_svg(&schema)?;

    if args.output == STDOUT_OUTPUT {
        let mut stdout = io::stdout().lock();
        stdout.write_all(svg.as_bytes())?;
        stdout.flush()?;
        info!("SVG written to stdout");
    } else {
        fs::write(&args.output, svg)?;
        info!(output_file = args.output; "SVG exported successfully");
    }

    Ok(())
}
