//! Node and box shapes.
//!
//! A [`Shape`] is a [`ShapeKind`] outline of a given size, filled and
//! stroked according to a [`ShapeDefinition`]. Shapes are positioned by
//! their center, like every other [`Drawable`].

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// Horizontal inset of the slanted sides of a parallelogram.
const SLANT: f32 = 12.0;
/// Distance of the inner bars of a subroutine box from its sides.
const SUBROUTINE_BAR: f32 = 8.0;

/// Outline variants used by sequence and flowchart diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Plain rectangle (actors, operations, notes)
    Rectangle,
    /// Rectangle with fully rounded ends (flowchart start/end)
    Rounded,
    /// Slanted box (flowchart input/output)
    Parallelogram,
    /// Rectangle with an inner vertical bar on each side (flowchart subroutine)
    Subroutine,
    /// Rhombus (flowchart condition)
    Diamond,
    /// Rectangle with a double top border (flowchart parallel)
    Barred,
}

/// Fill and stroke of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDefinition {
    fill: Option<Color>,
    stroke: StrokeDefinition,
}

impl ShapeDefinition {
    pub fn new(fill: Option<Color>, stroke: StrokeDefinition) -> Self {
        Self { fill, stroke }
    }

    /// Returns a copy of this definition with another fill color.
    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

impl Default for ShapeDefinition {
    fn default() -> Self {
        Self {
            fill: Color::new("white").ok(),
            stroke: StrokeDefinition::default(),
        }
    }
}

/// A sized shape ready to be drawn.
#[derive(Debug, Clone)]
pub struct Shape<'a> {
    kind: ShapeKind,
    definition: &'a ShapeDefinition,
    size: Size,
    class: Option<String>,
}

impl<'a> Shape<'a> {
    pub fn new(kind: ShapeKind, definition: &'a ShapeDefinition, size: Size) -> Self {
        Self {
            kind,
            definition,
            size,
            class: None,
        }
    }

    /// Sets the CSS class attached to the outline element.
    pub fn set_class(&mut self, class: impl Into<String>) {
        self.class = Some(class.into());
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Extra width a label needs around it for this outline.
    ///
    /// Diamonds and parallelograms lose usable space at their corners.
    pub fn label_allowance(kind: ShapeKind) -> Size {
        match kind {
            ShapeKind::Diamond => Size::new(40.0, 30.0),
            ShapeKind::Parallelogram => Size::new(SLANT * 2.0, 0.0),
            ShapeKind::Subroutine => Size::new(SUBROUTINE_BAR * 2.0, 0.0),
            ShapeKind::Rounded => Size::new(16.0, 0.0),
            ShapeKind::Rectangle | ShapeKind::Barred => Size::default(),
        }
    }

    fn outline(&self, position: Point) -> super::SvgNode {
        let bounds = position.to_bounds(self.size);
        let (x, y) = (bounds.min_x(), bounds.min_y());
        let (w, h) = (self.size.width(), self.size.height());

        let node: super::SvgNode = match self.kind {
            ShapeKind::Rectangle | ShapeKind::Subroutine | ShapeKind::Barred => {
                Box::new(self.paint(rectangle(x, y, w, h)))
            }
            ShapeKind::Rounded => {
                Box::new(self.paint(rectangle(x, y, w, h).set("rx", h / 2.0).set("ry", h / 2.0)))
            }
            ShapeKind::Parallelogram => {
                let slant = SLANT.min(w / 4.0);
                let points = polygon_points(&[
                    (x + slant, y),
                    (x + w, y),
                    (x + w - slant, y + h),
                    (x, y + h),
                ]);
                Box::new(self.paint(svg_element::Polygon::new().set("points", points)))
            }
            ShapeKind::Diamond => {
                let center = bounds.center();
                let points = polygon_points(&[
                    (center.x(), y),
                    (x + w, center.y()),
                    (center.x(), y + h),
                    (x, center.y()),
                ]);
                Box::new(self.paint(svg_element::Polygon::new().set("points", points)))
            }
        };
        node
    }

    fn paint<E>(&self, element: E) -> E
    where
        E: svg::Node + Paintable,
    {
        let mut element = element.set_attr(
            "fill",
            self.definition
                .fill()
                .map_or_else(|| "none".to_string(), |c| c.to_string()),
        );
        if let Some(class) = &self.class {
            element = element.set_attr("class", class.clone());
        }
        element.stroke(self.definition.stroke())
    }

    fn decorations(&self, position: Point) -> Vec<super::SvgNode> {
        let bounds = position.to_bounds(self.size);
        let stroke = self.definition.stroke();
        match self.kind {
            ShapeKind::Subroutine => [
                bounds.min_x() + SUBROUTINE_BAR,
                bounds.max_x() - SUBROUTINE_BAR,
            ]
            .into_iter()
            .map(|x| {
                let line = svg_element::Line::new()
                    .set("x1", x)
                    .set("y1", bounds.min_y())
                    .set("x2", x)
                    .set("y2", bounds.max_y());
                Box::new(apply_stroke!(line, stroke)) as super::SvgNode
            })
            .collect(),
            ShapeKind::Barred => {
                let y = bounds.min_y() + 4.0;
                let line = svg_element::Line::new()
                    .set("x1", bounds.min_x())
                    .set("y1", y)
                    .set("x2", bounds.max_x())
                    .set("y2", y);
                vec![Box::new(apply_stroke!(line, stroke)) as super::SvgNode]
            }
            _ => Vec::new(),
        }
    }
}

impl Drawable for Shape<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Content, self.outline(position));
        for decoration in self.decorations(position) {
            output.add_to_layer(RenderLayer::Content, decoration);
        }
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

/// Shared attribute setters for the outline element types.
trait Paintable: Sized {
    fn set_attr(self, name: &str, value: String) -> Self;
    fn stroke(self, stroke: &StrokeDefinition) -> Self;
}

macro_rules! impl_paintable {
    ($($ty:ty),*) => {
        $(
            impl Paintable for $ty {
                fn set_attr(self, name: &str, value: String) -> Self {
                    self.set(name, value)
                }

                fn stroke(self, stroke: &StrokeDefinition) -> Self {
                    apply_stroke!(self, stroke)
                }
            }
        )*
    };
}

impl_paintable!(svg_element::Rectangle, svg_element::Polygon);

fn rectangle(x: f32, y: f32, width: f32, height: f32) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", width)
        .set("height", height)
}

fn polygon_points(points: &[(f32, f32)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ")
}
