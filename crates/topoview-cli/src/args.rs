//! Command-line argument definitions for the Topoview CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Topoview schema plotter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input schema JSON file
    #[arg(default_value = "schema.json", help = "Path to the input schema file")]
    pub input: String,

    /// Path to the output SVG file, or `-` for stdout
    #[arg(short, long, default_value = "schema.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["topoview"]);
        assert_eq!(args.input, "schema.json");
        assert_eq!(args.output, "schema.svg");
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_explicit_values() {
        let args = Args::parse_from([
            "topoview",
            "plant.json",
            "-o",
            "-",
            "--config",
            "style.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.input, "plant.json");
        assert_eq!(args.output, "-");
        assert_eq!(args.config.as_deref(), Some("style.toml"));
        assert_eq!(args.log_level, "debug");
    }
}
