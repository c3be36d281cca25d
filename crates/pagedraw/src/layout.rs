//! Layout engines.
//!
//! A layout engine turns a semantic diagram model into positioned boxes,
//! lines and labels. The SVG exporter draws a layout without making any
//! placement decision of its own.

pub mod flowchart;
pub mod sequence;

use pagedraw_core::{
    draw::{Text, TextDefinition},
    geometry::{Point, Size},
};

/// A text label centered on a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub center: Point,
    pub size: Size,
}

impl Label {
    pub fn new(text: impl Into<String>, center: Point, size: Size) -> Self {
        Self {
            text: text.into(),
            center,
            size,
        }
    }
}

/// Measures `content` with the given text style.
fn measure(definition: &TextDefinition, content: &str) -> Size {
    Text::new(definition, content).calculate_size()
}
