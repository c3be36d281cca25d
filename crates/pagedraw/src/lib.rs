//! Pagedraw - renders diagram placeholders in HTML pages to inline SVG.
//!
//! A page marks diagrams with placeholder elements whose text is the
//! diagram source:
//!
//! - `<sequence>` - sequence diagrams (`A->B: message`)
//! - `<flowchart>` - flowcharts (`st=>start: Start`, `st->e`)
//! - `<graph>` - Graphviz DOT graphs
//!
//! [`PageRenderer`] replaces the content of every placeholder with the
//! rendered `<svg>` element. [`render_diagram`] renders a single source.
//!
//! # Examples
//!
//! ```rust
//! use pagedraw::{config::AppConfig, render_diagram, semantic::DiagramKind};
//!
//! let svg = render_diagram(DiagramKind::Sequence, "A->B: hello", &AppConfig::default())
//!     .expect("Failed to render");
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod config;
pub mod page;
pub mod render;

mod error;
mod export;
mod layout;

pub use pagedraw_core::{color, draw, geometry, identifier, semantic};

pub use config::FailurePolicy;
pub use error::PagedrawError;
pub use page::{Document, HtmlPage, Outcome, PageRenderer, PageReport};
pub use render::{DiagramRenderer, RenderTarget};

use log::info;

use config::AppConfig;
use semantic::DiagramKind;

/// Renders one diagram source of `kind` to a standalone SVG string.
///
/// # Errors
///
/// Returns [`PagedrawError::Parse`] or [`PagedrawError::Graph`] for malformed
/// sources, and [`PagedrawError::Config`] for invalid configured colors.
pub fn render_diagram(
    kind: DiagramKind,
    source: &str,
    config: &AppConfig,
) -> Result<String, PagedrawError> {
    info!(kind:% = kind; "Rendering single diagram");
    render::renderer_for(kind, config).render(source, &RenderTarget::new(kind, 0))
}
