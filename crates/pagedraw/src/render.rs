//! Diagram renderers.
//!
//! Every supported diagram kind is handled by one implementation of
//! [`DiagramRenderer`]: it takes the raw source text of a placeholder and
//! returns an SVG fragment ready to be inlined into the page.
//!
//! - [`SequenceRenderer`] - sequence diagrams
//! - [`FlowchartRenderer`] - flowcharts
//! - [`GraphRenderer`] - Graphviz DOT graphs

mod flowchart;
mod graph;
mod sequence;

use std::fmt;

use pagedraw_core::semantic::DiagramKind;

pub use flowchart::FlowchartRenderer;
pub use graph::GraphRenderer;
pub use sequence::SequenceRenderer;

use crate::{PagedrawError, config::AppConfig};

/// Identity of the placeholder element a diagram is rendered for.
///
/// Renderers derive document-unique SVG ids from it so that several
/// diagrams can be inlined into one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTarget {
    kind: DiagramKind,
    index: usize,
}

impl RenderTarget {
    pub fn new(kind: DiagramKind, index: usize) -> Self {
        Self { kind, index }
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    /// Position of the element among the elements of its kind, in document order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Prefix for SVG ids, e.g. `pd-sequence-2`.
    pub fn id_prefix(&self) -> String {
        format!("pd-{}-{}", self.kind, self.index)
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> element #{}", self.kind, self.index + 1)
    }
}

/// Turns the source text of one diagram into SVG markup.
pub trait DiagramRenderer {
    /// The diagram kind, and so the placeholder tag, this renderer handles.
    fn kind(&self) -> DiagramKind;

    /// Renders `source` to a standalone `<svg>` fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is malformed or cannot be laid out.
    fn render(&self, source: &str, target: &RenderTarget) -> Result<String, PagedrawError>;
}

/// Creates the renderer for one diagram kind.
pub fn renderer_for(kind: DiagramKind, config: &AppConfig) -> Box<dyn DiagramRenderer> {
    match kind {
        DiagramKind::Sequence => Box::new(SequenceRenderer::new(config)),
        DiagramKind::Flowchart => Box::new(FlowchartRenderer::new(config)),
        DiagramKind::Graph => Box::new(GraphRenderer::new()),
    }
}

/// Creates the renderers for the kinds enabled in `config`, in pass order.
pub fn renderers_for(config: &AppConfig) -> Vec<Box<dyn DiagramRenderer>> {
    config
        .page()
        .kinds()
        .iter()
        .map(|kind| renderer_for(*kind, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FailurePolicy, PageConfig};

    #[test]
    fn test_render_target_prefix_and_display() {
        let target = RenderTarget::new(DiagramKind::Flowchart, 2);
        assert_eq!(target.id_prefix(), "pd-flowchart-2");
        assert_eq!(target.to_string(), "<flowchart> element #3");
    }

    #[test]
    fn test_renderers_follow_configured_order() {
        let config = AppConfig::default().with_page(PageConfig::new(
            vec![DiagramKind::Graph, DiagramKind::Sequence],
            FailurePolicy::Abort,
        ));
        let kinds: Vec<_> = renderers_for(&config).iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, [DiagramKind::Graph, DiagramKind::Sequence]);
    }
}
