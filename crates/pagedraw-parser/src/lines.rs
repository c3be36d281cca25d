//! Line splitting shared by the line-oriented grammars.

use crate::span::Span;

/// A non-blank source line with surrounding whitespace removed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceLine<'a> {
    pub text: &'a str,
    pub span: Span,
}

impl<'a> SourceLine<'a> {
    /// Span of `part`, which must be a subslice of this line's text.
    pub fn span_of(&self, part: &str) -> Span {
        self.span.subslice(self.text, part)
    }

    /// Span from byte `offset` of this line to its end.
    pub fn span_from(&self, offset: usize) -> Span {
        let start = self.span.start() + offset.min(self.text.len());
        Span::new(start..self.span.end())
    }
}

/// Iterates over the non-blank lines of `source`.
pub(crate) fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    source.split_inclusive('\n').filter_map(move |raw| {
        let start = offset;
        offset += raw.len();

        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        let leading = raw.len() - raw.trim_start().len();
        let span = Span::new(start + leading..start + leading + text.len());
        Some(SourceLine { text, span })
    })
}

/// Replaces the two-character escape `\n` with a line break.
pub(crate) fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lines_skip_blank_and_track_offsets() {
        let source = "a\n\n  bb  \r\nc";
        let lines: Vec<_> = source_lines(source).collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "bb");
        assert_eq!(&source[std::ops::Range::from(lines[1].span)], "bb");
        assert_eq!(lines[2].span, Span::new(11..12));
    }

    #[test]
    fn test_unescape_newlines() {
        assert_eq!(unescape_newlines("one\\ntwo"), "one\ntwo");
    }
}
