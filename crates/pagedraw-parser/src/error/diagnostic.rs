//! The core diagnostic type.
//!
//! A [`Diagnostic`] represents a single error with an optional error code,
//! multiple labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{ErrorCode, Label},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// ```text
/// error[E200]: undefined node `cond`
///  --> 4:5
///   |
/// 4 | st->cond->e
///   |     ^^^^ not defined
///   |
///   = help: define it with `cond=>condition: ...`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use pagedraw_parser::error::{Diagnostic, ErrorCode};
    /// # use pagedraw_parser::Span;
    ///
    /// let diag = Diagnostic::error("undefined node `cond`")
    ///     .with_code(ErrorCode::E200)
    ///     .with_label(Span::new(4..8), "not defined")
    ///     .with_help("define it with `cond=>condition: ...`");
    /// assert_eq!(diag.to_string(), "error[E200]: undefined node `cond`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E100]: message" or "error: message"
        f.write_str("error")?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("test error");
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::error("participant declared twice");
        assert_eq!(diag.to_string(), "error: participant declared twice");
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("node `op` is defined multiple times")
            .with_code(ErrorCode::E300)
            .with_label(Span::new(100..102), "duplicate definition")
            .with_secondary_label(Span::new(50..52), "first defined here")
            .with_help("remove the duplicate or use a different name");

        assert_eq!(diag.code(), Some(ErrorCode::E300));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(
            diag.help(),
            Some("remove the duplicate or use a different name")
        );
    }
}
