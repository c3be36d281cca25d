//! Per-element results of a page run.

use crate::{PagedrawError, render::RenderTarget};

/// What happened to one placeholder element.
#[derive(Debug)]
pub enum Outcome {
    /// The element now holds `bytes` bytes of rendered markup.
    Rendered { bytes: usize },
    /// Rendering failed and the element was left empty.
    Failed(PagedrawError),
}

#[derive(Debug)]
pub struct ElementReport {
    pub target: RenderTarget,
    pub outcome: Outcome,
}

impl ElementReport {
    pub fn is_rendered(&self) -> bool {
        matches!(self.outcome, Outcome::Rendered { .. })
    }
}

/// Results of a page run, in processing order.
#[derive(Debug, Default)]
pub struct PageReport {
    elements: Vec<ElementReport>,
}

impl PageReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, target: RenderTarget, outcome: Outcome) {
        self.elements.push(ElementReport { target, outcome });
    }

    pub fn elements(&self) -> &[ElementReport] {
        &self.elements
    }

    pub fn rendered_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_rendered()).count()
    }

    /// Elements that failed to render, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&RenderTarget, &PagedrawError)> {
        self.elements.iter().filter_map(|e| match &e.outcome {
            Outcome::Failed(err) => Some((&e.target, err)),
            Outcome::Rendered { .. } => None,
        })
    }

    /// Consumes the report, returning each failure wrapped as
    /// [`PagedrawError::Element`].
    pub fn into_failures(self) -> Vec<PagedrawError> {
        self.elements
            .into_iter()
            .filter_map(|e| match e.outcome {
                Outcome::Failed(err) => Some(PagedrawError::Element {
                    target: e.target,
                    source: Box::new(err),
                }),
                Outcome::Rendered { .. } => None,
            })
            .collect()
    }

    /// Returns `true` if no element failed.
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
