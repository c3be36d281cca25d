//! Error and diagnostic system for the pagedraw parsers.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Diagnostic collector for accumulating multiple errors
//!
//! Every problem found in a diagram source becomes a [`Diagnostic`]. The
//! parsers keep going after the first problem and report all of them
//! together, wrapped in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use pagedraw_parser::error::{Diagnostic, ErrorCode};
//! # use pagedraw_parser::Span;
//!
//! let diag = Diagnostic::error("node `op1` is defined multiple times")
//!     .with_code(ErrorCode::E300)
//!     .with_label(Span::new(40..43), "duplicate definition")
//!     .with_secondary_label(Span::new(10..13), "first defined here")
//!     .with_help("remove the duplicate or use a different name");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
