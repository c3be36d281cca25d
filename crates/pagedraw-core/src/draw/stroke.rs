//! Stroke and line-style definitions.
//!
//! - [`StrokeDefinition`]: color, width and dash style of a line or border
//! - [`StrokeStyle`]: solid or patterned lines
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to any SVG element
//!
//! ```
//! use pagedraw_core::draw::{StrokeDefinition, StrokeStyle};
//! use pagedraw_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0)
//!     .with_style(StrokeStyle::Dashed);
//! let line = svg_element::Line::new().set("x1", 0).set("x2", 10);
//! let line = pagedraw_core::apply_stroke!(line, &stroke);
//! assert!(line.to_string().contains("stroke-dasharray"));
//! ```

use std::str::FromStr;

use crate::color::Color;

/// Line pattern of a stroke.
///
/// - `Solid`: No dasharray attribute
/// - `Dashed`: "6,4"
/// - `Dotted`: "2,3"
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(format!(
                "invalid stroke style `{s}`, valid values: solid, dashed, dotted"
            )),
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
            Self::Dotted => Some("2,3"),
        }
    }
}

/// A stroke definition for rendering lines and borders.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Returns a copy of this stroke with a different style.
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Applies every attribute of a [`StrokeDefinition`] to an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("dashed".parse::<StrokeStyle>(), Ok(StrokeStyle::Dashed));
        assert_eq!("dotted".parse::<StrokeStyle>(), Ok(StrokeStyle::Dotted));
        assert!("wavy".parse::<StrokeStyle>().is_err());
    }

    #[test]
    fn test_apply_stroke_solid_has_no_dasharray() {
        let stroke = StrokeDefinition::default();
        let rect = crate::apply_stroke!(svg_element::Rectangle::new(), &stroke);
        let rendered = rect.to_string();
        assert!(rendered.contains("stroke=\"black\""));
        assert!(!rendered.contains("stroke-dasharray"));
    }
}
