//! Semantic diagram model types.
//!
//! These are the parsed, resolved representations of diagram sources,
//! independent of any layout or rendering concern.
//!
//! # Pipeline Position
//!
//! ```text
//! Diagram source (element text content)
//!     ↓ parser
//! Semantic Model (these types)
//!     ↓ layout
//! Positioned elements
//!     ↓ export
//! SVG fragment
//! ```
//!
//! # Organization
//!
//! - [`sequence`] - [`SequenceDiagram`] with actors, signals and notes
//! - [`flowchart`] - [`Flowchart`] with typed nodes and branch edges

pub mod flowchart;
pub mod sequence;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use flowchart::*;
pub use sequence::*;

/// The kinds of diagram a page can contain.
///
/// Each kind is bound to the HTML tag name of its placeholder elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Sequence,
    Flowchart,
    Graph,
}

impl DiagramKind {
    /// Every kind, in default pass order.
    pub const ALL: [DiagramKind; 3] = [Self::Sequence, Self::Flowchart, Self::Graph];

    /// Tag name of the placeholder elements holding this kind of diagram.
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Flowchart => "flowchart",
            Self::Graph => "graph",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

impl FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequence" => Ok(Self::Sequence),
            "flowchart" => Ok(Self::Flowchart),
            "graph" => Ok(Self::Graph),
            _ => Err(format!(
                "unknown diagram kind `{s}`, valid values: sequence, flowchart, graph"
            )),
        }
    }
}
