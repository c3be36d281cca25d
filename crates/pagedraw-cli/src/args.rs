//! Command-line argument definitions for the pagedraw CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, which diagram kinds are rendered and logging verbosity.

use clap::Parser;

use pagedraw::semantic::DiagramKind;

/// Command-line arguments for the pagedraw tool
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input HTML page, or diagram source with `--diagram`
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file [default: out.html, or out.svg with `--diagram`]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Diagram kinds to render, in pass order (overrides `page.kinds`)
    #[arg(long, value_delimiter = ',')]
    pub kinds: Option<Vec<DiagramKind>>,

    /// Keep rendering after a diagram fails; failures still exit non-zero
    #[arg(long)]
    pub keep_going: bool,

    /// Treat the input as a single diagram of this kind and write SVG
    #[arg(long)]
    pub diagram: Option<DiagramKind>,
}

impl Args {
    /// Creates arguments for rendering `input` with every other option at its default.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
            config: None,
            log_level: "info".to_string(),
            kinds: None,
            keep_going: false,
            diagram: None,
        }
    }

    /// The output path, falling back to a default that matches the output format.
    pub fn output_path(&self) -> &str {
        match (&self.output, self.diagram) {
            (Some(output), _) => output,
            (None, Some(_)) => "out.svg",
            (None, None) => "out.html",
        }
    }
}
