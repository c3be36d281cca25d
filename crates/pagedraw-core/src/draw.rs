//! Drawable Components for Diagram Rendering
//!
//! This module provides the SVG building blocks used by the sequence and
//! flowchart exporters. Drawables implement the [`Drawable`] trait and render
//! into a [`LayeredOutput`], which keeps z-ordering independent of the order
//! in which elements are emitted.

mod arrow;
mod layer;
mod shape;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowHead, MarkerSet};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use shape::{Shape, ShapeDefinition, ShapeKind};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{Text, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for drawable diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable centered on `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
