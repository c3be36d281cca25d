//! Arrows and their SVG marker definitions.
//!
//! An [`Arrow`] is a polyline with an optional [`ArrowHead`] at its end.
//! Heads are drawn with SVG `<marker>` elements collected by a
//! [`MarkerSet`]. Marker ids carry a caller-provided prefix so several
//! diagrams can live in one HTML page without their ids colliding.

use std::fmt;

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{StrokeDefinition, SvgNode},
    geometry::Point,
};

/// The end decoration of an arrow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowHead {
    /// No head
    None,
    /// Solid triangle
    #[default]
    Filled,
    /// Unfilled chevron
    Open,
}

impl ArrowHead {
    fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Filled => "filled",
            Self::Open => "open",
        }
    }
}

impl fmt::Display for ArrowHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A drawable arrow through a list of points.
#[derive(Debug, Clone)]
pub struct Arrow<'a> {
    points: Vec<Point>,
    stroke: &'a StrokeDefinition,
    head: ArrowHead,
}

impl<'a> Arrow<'a> {
    pub fn new(points: Vec<Point>, stroke: &'a StrokeDefinition, head: ArrowHead) -> Self {
        Self {
            points,
            stroke,
            head,
        }
    }

    /// Straight arrow between two points.
    pub fn straight(
        source: Point,
        destination: Point,
        stroke: &'a StrokeDefinition,
        head: ArrowHead,
    ) -> Self {
        Self::new(vec![source, destination], stroke, head)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn head(&self) -> ArrowHead {
        self.head
    }

    /// Path data for the polyline, e.g. `M 0 0 L 10 0 L 10 10`.
    pub fn path_data(&self) -> String {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let command = if i == 0 { "M" } else { "L" };
                format!("{command} {} {}", p.x(), p.y())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Collects the markers used by the arrows of one diagram.
#[derive(Debug)]
pub struct MarkerSet {
    prefix: String,
    markers: Vec<(ArrowHead, Color)>,
}

impl MarkerSet {
    /// Creates an empty set whose marker ids start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            markers: Vec::new(),
        }
    }

    /// Renders an arrow, registering the marker its head needs.
    ///
    /// Two-point arrows become `<line>` elements, longer ones `<path>`.
    pub fn draw_arrow(&mut self, arrow: &Arrow) -> SvgNode {
        let marker = self.register(arrow.head, arrow.stroke.color());

        if let [start, end] = arrow.points.as_slice() {
            let mut line = svg_element::Line::new()
                .set("x1", start.x())
                .set("y1", start.y())
                .set("x2", end.x())
                .set("y2", end.y());
            line = apply_stroke!(line, arrow.stroke);
            if let Some(id) = marker {
                line = line.set("marker-end", format!("url(#{id})"));
            }
            return Box::new(line);
        }

        let mut path = svg_element::Path::new()
            .set("d", arrow.path_data())
            .set("fill", "none");
        path = apply_stroke!(path, arrow.stroke);
        if let Some(id) = marker {
            path = path.set("marker-end", format!("url(#{id})"));
        }
        Box::new(path)
    }

    /// Returns `true` if no arrow needed a marker.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Generates the `<defs>` block holding every registered marker.
    pub fn definitions(&self) -> svg_element::Definitions {
        self.markers
            .iter()
            .enumerate()
            .fold(svg_element::Definitions::new(), |defs, (i, (head, color))| {
                defs.add(self.marker(i, *head, *color))
            })
    }

    fn register(&mut self, head: ArrowHead, color: Color) -> Option<String> {
        if head == ArrowHead::None {
            return None;
        }
        let index = match self
            .markers
            .iter()
            .position(|(h, c)| *h == head && *c == color)
        {
            Some(index) => index,
            None => {
                self.markers.push((head, color));
                self.markers.len() - 1
            }
        };
        Some(self.marker_id(index, head))
    }

    fn marker_id(&self, index: usize, head: ArrowHead) -> String {
        if index == 0 {
            format!("{}-arrow-{head}", self.prefix)
        } else {
            format!("{}-arrow-{head}-{index}", self.prefix)
        }
    }

    fn marker(&self, index: usize, head: ArrowHead, color: Color) -> svg_element::Marker {
        let shape = match head {
            ArrowHead::Open => svg_element::Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10")
                .set("fill", "none")
                .set("stroke", color.to_string())
                .set("stroke-width", 1.5),
            _ => svg_element::Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
        };

        svg_element::Marker::new()
            .set("id", self.marker_id(index, head))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 8)
            .set("markerHeight", 8)
            .set("orient", "auto")
            .add(shape)
    }
}
