//! Access to the placeholder elements of a page.

use std::cell::{Cell, RefCell};

use log::trace;
use lol_html::{RewriteStrSettings, element, html_content::ContentType, rewrite_str, text};

use pagedraw_core::semantic::DiagramKind;

use crate::PagedrawError;

/// A diagram placeholder element found in a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    kind: DiagramKind,
    index: usize,
    source: String,
}

impl Placeholder {
    pub fn new(kind: DiagramKind, index: usize, source: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    /// Position among the elements of the same kind, in document order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Decoded text content of the element.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A page whose placeholder elements can be queried and rewritten.
///
/// Mutations are visible to every later call, as in a DOM.
pub trait Document {
    /// Returns every element whose tag is `kind.tag_name()`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`PagedrawError::Page`] if the page cannot be read.
    fn find_all(&self, kind: DiagramKind) -> Result<Vec<Placeholder>, PagedrawError>;

    /// Replaces the content of `placeholder` with raw HTML `markup`.
    ///
    /// # Errors
    ///
    /// Returns [`PagedrawError::Page`] if the element no longer exists or the
    /// page cannot be rewritten.
    fn set_inner_markup(
        &mut self,
        placeholder: &Placeholder,
        markup: &str,
    ) -> Result<(), PagedrawError>;
}

/// An HTML page held in memory.
///
/// Elements are located with streaming `lol_html` rewrites over the whole
/// page; the text of a placeholder, including the text of nested elements,
/// is concatenated and entity-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlPage {
    html: String,
}

impl HtmlPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

impl Document for HtmlPage {
    fn find_all(&self, kind: DiagramKind) -> Result<Vec<Placeholder>, PagedrawError> {
        let tag = kind.tag_name();
        let sources = RefCell::new(Vec::<String>::new());

        rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!(tag, |_el| {
                        sources.borrow_mut().push(String::new());
                        Ok(())
                    }),
                    text!(tag, |chunk| {
                        if let Some(source) = sources.borrow_mut().last_mut() {
                            source.push_str(chunk.as_str());
                        }
                        Ok(())
                    }),
                ],
                ..RewriteStrSettings::new()
            },
        )?;

        let placeholders: Vec<Placeholder> = sources
            .into_inner()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Placeholder::new(kind, index, htmlize::unescape(&raw)))
            .collect();
        trace!(kind:% = kind, count = placeholders.len(); "Placeholders found");
        Ok(placeholders)
    }

    fn set_inner_markup(
        &mut self,
        placeholder: &Placeholder,
        markup: &str,
    ) -> Result<(), PagedrawError> {
        let tag = placeholder.kind().tag_name();
        let seen = Cell::new(0usize);
        let replaced = Cell::new(false);

        let html = rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: vec![element!(tag, |el| {
                    let index = seen.get();
                    seen.set(index + 1);
                    if index == placeholder.index() {
                        el.set_inner_content(markup, ContentType::Html);
                        replaced.set(true);
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        )?;

        if !replaced.get() {
            return Err(PagedrawError::Page(format!(
                "no <{tag}> element #{} in the page",
                placeholder.index() + 1
            )));
        }
        self.html = html;
        Ok(())
    }
}
