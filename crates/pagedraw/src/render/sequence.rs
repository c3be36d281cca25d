use log::{debug, info, trace};

use pagedraw_core::semantic::DiagramKind;

use super::{DiagramRenderer, RenderTarget};
use crate::{
    PagedrawError,
    config::AppConfig,
    export::{Exporter, svg::SvgBuilder},
    layout::sequence,
};

/// Renders sequence diagrams.
#[derive(Debug, Clone)]
pub struct SequenceRenderer {
    config: AppConfig,
}

impl SequenceRenderer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl DiagramRenderer for SequenceRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Sequence
    }

    fn render(&self, source: &str, target: &RenderTarget) -> Result<String, PagedrawError> {
        info!(element:% = target; "Rendering sequence diagram");

        let diagram = pagedraw_parser::parse_sequence(source)
            .map_err(|err| PagedrawError::new_parse_error(err, source))?;
        trace!(diagram:?; "Parsed sequence diagram");

        let layout = sequence::layout_sequence(
            &diagram,
            self.config.sequence(),
            &self.config.style().text_definition(),
        );

        let mut svg = SvgBuilder::new(target.id_prefix())
            .with_style(self.config.style())
            .build()?;
        let markup = svg.export(&layout)?;

        debug!(element:% = target, bytes = markup.len(); "Sequence diagram rendered");
        Ok(markup)
    }
}
