//! Page-level rendering.
//!
//! A page is any [`Document`] holding diagram placeholder elements such as
//! `<sequence>`, `<flowchart>` or `<graph>`. [`PageRenderer`] runs one pass
//! per enabled diagram kind, replacing the text of every placeholder with
//! the rendered SVG, and returns a [`PageReport`] with one entry per element.
//!
//! # Example
//!
//! ```
//! use pagedraw::{HtmlPage, PageRenderer, config::AppConfig};
//!
//! let mut page = HtmlPage::new("<p>Login</p><sequence>Browser->Server: GET /</sequence>");
//! let report = PageRenderer::new(AppConfig::default())
//!     .render_page(&mut page)
//!     .unwrap();
//!
//! assert_eq!(report.rendered_count(), 1);
//! assert!(page.html().contains("<sequence><svg"));
//! ```

mod document;
mod renderer;
mod report;

pub use document::{Document, HtmlPage, Placeholder};
pub use renderer::PageRenderer;
pub use report::{ElementReport, Outcome, PageReport};
