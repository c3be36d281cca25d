use log::{debug, info, trace};

use pagedraw_core::semantic::DiagramKind;

use super::{DiagramRenderer, RenderTarget};
use crate::{
    PagedrawError,
    config::AppConfig,
    export::{Exporter, svg::SvgBuilder},
    layout::flowchart,
};

/// Renders flowcharts.
#[derive(Debug, Clone)]
pub struct FlowchartRenderer {
    config: AppConfig,
}

impl FlowchartRenderer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl DiagramRenderer for FlowchartRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Flowchart
    }

    fn render(&self, source: &str, target: &RenderTarget) -> Result<String, PagedrawError> {
        info!(element:% = target; "Rendering flowchart");

        let chart = pagedraw_parser::parse_flowchart(source)
            .map_err(|err| PagedrawError::new_parse_error(err, source))?;
        trace!(chart:?; "Parsed flowchart");

        let layout = flowchart::layout_flowchart(
            &chart,
            self.config.flowchart(),
            &self.config.style().text_definition(),
        )?;

        let mut svg = SvgBuilder::new(target.id_prefix())
            .with_style(self.config.style())
            .with_flowchart(self.config.flowchart())
            .build()?;
        let markup = svg.export(&layout)?;

        debug!(element:% = target, bytes = markup.len(); "Flowchart rendered");
        Ok(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> Result<String, PagedrawError> {
        FlowchartRenderer::new(&AppConfig::default())
            .render(source, &RenderTarget::new(DiagramKind::Flowchart, 0))
    }

    #[test]
    fn test_render_valid_source() {
        let markup = render("st=>start: Start\ne=>end: End\nst->e").unwrap();
        assert!(markup.starts_with("<svg"));
        assert!(markup.matches("<rect").count() >= 2);
    }

    #[test]
    fn test_undefined_node_is_parse_error() {
        let err = render("st=>start: Start\nst->missing").unwrap_err();
        assert!(matches!(err, PagedrawError::Parse { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
