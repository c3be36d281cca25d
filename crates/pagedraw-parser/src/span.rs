//! Byte ranges into a diagram source.

use std::ops::Range;

/// A half-open byte range `start..end` in the parsed source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Span of `part` within `line`, where `line` starts at `self.start()`.
    ///
    /// `part` must be a subslice of `line`.
    pub(crate) fn subslice(self, line: &str, part: &str) -> Span {
        let offset = (part.as_ptr() as usize).saturating_sub(line.as_ptr() as usize);
        let start = self.start + offset.min(line.len());
        Span::new(start..start + part.len())
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}
