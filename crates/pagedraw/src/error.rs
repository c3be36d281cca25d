//! Error types for pagedraw operations.
//!
//! This module provides the main error type [`PagedrawError`] which wraps
//! the error conditions of parsing, laying out and exporting a diagram, and
//! of rewriting the page that holds it.

use std::io;

use thiserror::Error;

use pagedraw_parser::ParseError;

use crate::render::RenderTarget;

/// The main error type for pagedraw operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the diagram source next to the diagnostics so
/// callers can point at the offending lines.
#[derive(Debug, Error)]
pub enum PagedrawError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Page error: {0}")]
    Page(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A single diagram element failed to render.
    #[error("failed to render {target}: {source}")]
    Element {
        target: RenderTarget,
        source: Box<PagedrawError>,
    },
}

impl From<crate::export::Error> for PagedrawError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl From<lol_html::errors::RewritingError> for PagedrawError {
    fn from(error: lol_html::errors::RewritingError) -> Self {
        Self::Page(error.to_string())
    }
}

impl PagedrawError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Innermost error, looking through `Element` wrappers.
    pub fn root_cause(&self) -> &PagedrawError {
        match self {
            Self::Element { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
