//! CLI logic for the pagedraw tool.
//!
//! The tool renders every diagram placeholder of an HTML page, or with
//! `--diagram` a single diagram source, and writes the result to a file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};
use thiserror::Error;

use pagedraw::{FailurePolicy, HtmlPage, PageRenderer, PagedrawError, config::PageConfig};

/// Errors returned by [`run`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Pagedraw(#[from] PagedrawError),

    /// Diagrams that failed under `--keep-going`. The page was still written.
    #[error("{} diagram(s) failed to render", .0.len())]
    Diagrams(Vec<PagedrawError>),
}

impl Error {
    /// The individual errors to report.
    pub fn errors(&self) -> &[PagedrawError] {
        match self {
            Error::Pagedraw(err) => std::slice::from_ref(err),
            Error::Diagrams(errors) => errors,
        }
    }
}

/// Run the pagedraw CLI application
///
/// # Errors
///
/// Returns [`Error::Pagedraw`] for I/O, configuration and page errors, and
/// for the first failing diagram unless `--keep-going` (or
/// `page.on_error = "continue"`) is in effect. With it, every failure is
/// returned as [`Error::Diagrams`].
///
/// A page is written whenever it was read, so diagrams rendered before an
/// aborting failure are kept in the output.
pub fn run(args: &Args) -> Result<(), Error> {
    let output = args.output_path();
    info!(
        input_path = args.input,
        output_path = output;
        "Processing input"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.kinds.is_some() || args.keep_going {
        let page = app_config.page();
        let kinds = args
            .kinds
            .clone()
            .unwrap_or_else(|| page.kinds().to_vec());
        let on_error = if args.keep_going {
            FailurePolicy::Continue
        } else {
            page.on_error()
        };
        app_config = app_config.with_page(PageConfig::new(kinds, on_error));
    }

    let source = fs::read_to_string(&args.input).map_err(PagedrawError::from)?;

    if let Some(kind) = args.diagram {
        let svg = pagedraw::render_diagram(kind, &source, &app_config)?;
        fs::write(output, svg).map_err(PagedrawError::from)?;
        info!(kind:% = kind, output_file = output; "SVG exported successfully");
        return Ok(());
    }

    let mut page = HtmlPage::new(source);
    let result = PageRenderer::new(app_config).render_page(&mut page);
    fs::write(output, page.html()).map_err(PagedrawError::from)?;
    let report = result?;
    info!(
        output_file = output,
        rendered = report.rendered_count();
        "Page written"
    );

    let failures = report.into_failures();
    if !failures.is_empty() {
        warn!(failed = failures.len(); "Some diagrams were left empty");
        return Err(Error::Diagrams(failures));
    }
    Ok(())
}
