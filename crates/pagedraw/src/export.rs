//! Export of laid-out diagrams.
//!
//! This module provides the [`Exporter`] trait, the last stage of the
//! rendering pipeline:
//!
//! ```text
//! Diagram source
//!     ↓ parse
//! Semantic model
//!     ↓ layout
//! Positioned boxes, lines and labels
//!     ↓ export (this module)
//! SVG markup
//! ```
//!
//! [`svg::Svg`] is the only backend. Output stays in memory so that it can
//! be inlined into a page.
//!
//! Export operations return [`Error`], which converts into
//! [`PagedrawError::Export`](crate::PagedrawError::Export) at the crate boundary.

pub mod svg;

use thiserror::Error;

/// Converts a layout of type `L` into markup.
pub trait Exporter<L> {
    /// Exports `layout` to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be drawn.
    fn export(&mut self, layout: &L) -> Result<String, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    #[error("Render error: {0}")]
    Render(String),
}
