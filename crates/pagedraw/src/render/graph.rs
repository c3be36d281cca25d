use ::layout::{
    backends::svg::SVGWriter,
    gv::{DotParser, GraphBuilder},
};
use log::{debug, info};

use pagedraw_core::semantic::DiagramKind;

use super::{DiagramRenderer, RenderTarget};
use crate::PagedrawError;

/// Renders Graphviz DOT graphs with the `layout` crate.
///
/// Only SVG output is produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphRenderer;

impl GraphRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DiagramRenderer for GraphRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Graph
    }

    fn render(&self, source: &str, target: &RenderTarget) -> Result<String, PagedrawError> {
        info!(element:% = target; "Rendering DOT graph");

        let mut parser = DotParser::new(source);
        let graph = parser.process().map_err(PagedrawError::Graph)?;

        let mut builder = GraphBuilder::new();
        builder.visit_graph(&graph);
        let mut visual = builder.get();
        if visual.num_nodes() == 0 {
            // The layout engine cannot place an empty graph.
            debug!(element:% = target; "DOT graph has no nodes");
            return Ok(empty_svg());
        }

        let mut writer = SVGWriter::new();
        visual.do_it(false, false, false, &mut writer);
        let output = writer.finalize();

        let start = output
            .find("<svg")
            .ok_or_else(|| PagedrawError::Graph("renderer produced no <svg> element".to_string()))?;
        let markup = scope_ids(&output[start..], &target.id_prefix());

        debug!(element:% = target, bytes = markup.len(); "DOT graph rendered");
        Ok(markup)
    }
}

/// A zero-sized `<svg>` element.
fn empty_svg() -> String {
    svg::Document::new()
        .set("width", 0)
        .set("height", 0)
        .to_string()
}

/// Prefixes every id in `svg`, and every reference to one, with `prefix`.
fn scope_ids(svg: &str, prefix: &str) -> String {
    svg.replace(" id=\"", &format!(" id=\"{prefix}-"))
        .replace("url(#", &format!("url(#{prefix}-"))
        .replace("href=\"#", &format!("href=\"#{prefix}-"))
}
