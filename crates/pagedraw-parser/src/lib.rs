//! # Pagedraw Parser
//!
//! Parsers for the two text diagram grammars pagedraw renders itself:
//!
//! - [`parse_sequence`] for sequence diagrams (`A->B: message`)
//! - [`parse_flowchart`] for flowcharts (`st=>start: Start`, `st->e`)
//!
//! Both are line oriented and never try to repair a malformed source.
//! Every problem found is reported as a [`error::Diagnostic`] inside the
//! returned [`ParseError`].
//!
//! ## Usage
//!
//! ```
//! # use pagedraw_parser::{parse_sequence, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let diagram = parse_sequence("Alice->Bob: Hello\nBob-->Alice: Hi")?;
//!     assert_eq!(diagram.actors().len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
mod flowchart;
mod lines;
mod sequence;
mod span;

pub use error::ParseError;
pub use flowchart::parse_flowchart;
pub use sequence::parse_sequence;
pub use span::Span;
