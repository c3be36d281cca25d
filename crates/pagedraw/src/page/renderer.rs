use std::fmt;

use log::{debug, info, warn};

use super::{Document, Outcome, PageReport, Placeholder};
use crate::{
    PagedrawError,
    config::{AppConfig, FailurePolicy},
    render::{DiagramRenderer, RenderTarget, renderers_for},
};

/// Renders every diagram placeholder of a page.
///
/// One pass runs per renderer, in the order of `page.kinds` in the
/// configuration. Each element of the pass is read, cleared, rendered and
/// written back before the next one is touched.
pub struct PageRenderer {
    config: AppConfig,
    renderers: Vec<Box<dyn DiagramRenderer>>,
}

impl PageRenderer {
    /// Creates a page renderer with the built-in renderers for the kinds
    /// enabled in `config`.
    pub fn new(config: AppConfig) -> Self {
        let renderers = renderers_for(&config);
        Self { config, renderers }
    }

    /// Replaces the renderer of the same kind, or adds a pass for it at the end.
    pub fn with_renderer(mut self, renderer: Box<dyn DiagramRenderer>) -> Self {
        let existing = self
            .renderers
            .iter()
            .position(|current| current.kind() == renderer.kind());
        match existing {
            Some(index) => self.renderers[index] = renderer,
            None => self.renderers.push(renderer),
        }
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Renders all placeholders of `document` in place.
    ///
    /// Running this twice on the same document is not a no-op: the second
    /// run reads the text of the rendered SVG as diagram source, which
    /// normally fails to parse.
    ///
    /// # Errors
    ///
    /// Document errors are always returned. A diagram that fails to render
    /// is returned as [`PagedrawError::Element`] under
    /// [`FailurePolicy::Abort`]; under [`FailurePolicy::Continue`] it is
    /// recorded in the report instead. Either way the failing element is
    /// left empty.
    pub fn render_page<D>(&self, document: &mut D) -> Result<PageReport, PagedrawError>
    where
        D: Document + ?Sized,
    {
        info!(passes = self.renderers.len(); "Rendering page");

        let mut report = PageReport::new();
        for renderer in &self.renderers {
            self.render_pass(renderer.as_ref(), document, &mut report)?;
        }

        info!(
            rendered = report.rendered_count(),
            failed = report.len() - report.rendered_count();
            "Page rendered",
        );
        Ok(report)
    }

    fn render_pass<D>(
        &self,
        renderer: &dyn DiagramRenderer,
        document: &mut D,
        report: &mut PageReport,
    ) -> Result<(), PagedrawError>
    where
        D: Document + ?Sized,
    {
        let kind = renderer.kind();
        let placeholders = document.find_all(kind)?;
        info!(kind:% = kind, elements = placeholders.len(); "Starting pass");

        for placeholder in &placeholders {
            let target = RenderTarget::new(kind, placeholder.index());
            match self.render_element(renderer, document, placeholder, &target)? {
                Ok(bytes) => report.push(target, Outcome::Rendered { bytes }),
                Err(err) => match self.config.page().on_error() {
                    FailurePolicy::Abort => {
                        return Err(PagedrawError::Element {
                            target,
                            source: Box::new(err),
                        });
                    }
                    FailurePolicy::Continue => {
                        warn!(element:% = target, error:% = &err; "Diagram left empty");
                        report.push(target, Outcome::Failed(err));
                    }
                },
            }
        }
        Ok(())
    }

    /// Clears the element, then fills it with the rendered diagram.
    ///
    /// The outer result carries document errors, the inner one the
    /// renderer's verdict on the source.
    fn render_element<D>(
        &self,
        renderer: &dyn DiagramRenderer,
        document: &mut D,
        placeholder: &Placeholder,
        target: &RenderTarget,
    ) -> Result<Result<usize, PagedrawError>, PagedrawError>
    where
        D: Document + ?Sized,
    {
        document.set_inner_markup(placeholder, "")?;

        let markup = match renderer.render(placeholder.source(), target) {
            Ok(markup) => markup,
            Err(err) => return Ok(Err(err)),
        };
        document.set_inner_markup(placeholder, &markup)?;

        debug!(element:% = target, bytes = markup.len(); "Element rendered");
        Ok(Ok(markup.len()))
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self.renderers.iter().map(|r| r.kind()).collect();
        f.debug_struct("PageRenderer")
            .field("config", &self.config)
            .field("kinds", &kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pagedraw_core::semantic::DiagramKind;

    use super::*;
    use crate::{config::PageConfig, page::HtmlPage};

    struct Echo;

    impl DiagramRenderer for Echo {
        fn kind(&self) -> DiagramKind {
            DiagramKind::Graph
        }

        fn render(&self, source: &str, target: &RenderTarget) -> Result<String, PagedrawError> {
            Ok(format!("<i>{}:{source}</i>", target.index()))
        }
    }

    #[test]
    fn test_with_renderer_replaces_same_kind() {
        let renderer = PageRenderer::default().with_renderer(Box::new(Echo));
        let mut page = HtmlPage::new("<graph>x</graph><graph>y</graph>");

        let report = renderer.render_page(&mut page).unwrap();
        assert_eq!(report.rendered_count(), 2);
        assert_eq!(page.html(), "<graph><i>0:x</i></graph><graph><i>1:y</i></graph>");
    }

    #[test]
    fn test_with_renderer_adds_missing_kind() {
        let config = AppConfig::default().with_page(PageConfig::new(
            vec![DiagramKind::Sequence],
            FailurePolicy::Abort,
        ));
        let renderer = PageRenderer::new(config).with_renderer(Box::new(Echo));

        assert!(format!("{renderer:?}").contains("[Sequence, Graph]"));
    }
}
