//! Text rendering definitions for diagram labels.
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A measurable, renderable text element
//!
//! Text is measured with `cosmic-text` so that boxes around labels fit the
//! real glyph advances, and is rendered as an SVG `<text>` with one `<tspan>`
//! per line.
//!
//! ```
//! # use pagedraw_core::draw::{TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_size(14);
//!
//! let text = Text::new(&style, "Hello, Diagram!");
//! assert!(text.calculate_size().width() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Insets, Point, Size},
};

/// Defines the visual style for text elements in diagrams.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `14` |
/// | Text color | `None` (SVG default, black) |
/// | Padding | Zero on all sides |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    padding: Insets,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family (e.g., "Arial", "monospace").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the fill color of the text, `None` for the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Returns a copy of this definition with different padding.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 14,
            color: None,
            padding: Insets::default(),
        }
    }
}

/// A renderable text element combining content with styling.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Calculate the total size required to display this text, including padding.
    pub fn calculate_size(&self) -> Size {
        self.calculate_size_without_padding()
            .add_padding(self.definition.padding())
    }

    fn calculate_size_without_padding(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let lines: Vec<&str> = self.content.lines().collect();
        if lines.is_empty() {
            return output;
        }

        let text_size = self.calculate_size_without_padding();
        let line_height = text_size.height() / lines.len() as f32;
        let y_offset = -(text_size.height() + line_height) / 2.0;

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y() + y_offset)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Measures text with a shared `FontSystem`, which is expensive to create.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Calculate the size of `text` in pixels.
    ///
    /// Falls back to an average-advance estimate when no font produced glyphs,
    /// which happens on hosts without any installed fonts.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        // Points to pixels at standard DPI
        let font_size_px = text_def.font_size() as f32 * 1.33;
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        let line_count = text.lines().count().max(1);
        if max_width <= 0.0 {
            let longest = text
                .lines()
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0);
            max_width = longest as f32 * font_size_px * 0.55;
        }
        if total_height <= 0.0 {
            total_height = line_count as f32 * line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_size(), 14);
        assert_eq!(def.font_family(), "Arial");
        assert!(def.color().is_none());
        assert_approx_eq!(f32, def.padding().horizontal_sum(), 0.0);
    }

    #[test]
    fn test_text_calculate_size_empty() {
        let def = TextDefinition::new();
        let size = Text::new(&def, "").calculate_size();
        assert!(size.is_zero());
    }

    #[test]
    fn test_text_calculate_size_multiline_is_taller() {
        let def = TextDefinition::new();
        let single = Text::new(&def, "Line 1").calculate_size();
        let multi = Text::new(&def, "Line 1\nLine 2\nLine 3").calculate_size();
        assert!(single.width() > 0.0);
        assert!(multi.height() > single.height());
    }

    #[test]
    fn test_text_calculate_size_includes_padding() {
        let plain = TextDefinition::new();
        let padded = TextDefinition::new().with_padding(Insets::uniform(20.0));

        let plain_size = Text::new(&plain, "Test").calculate_size();
        let padded_size = Text::new(&padded, "Test").calculate_size();

        assert_approx_eq!(f32, padded_size.width() - plain_size.width(), 40.0, epsilon = 0.01);
        assert_approx_eq!(f32, padded_size.height() - plain_size.height(), 40.0, epsilon = 0.01);
    }

    #[test]
    fn test_text_render_one_tspan_per_line() {
        let def = TextDefinition::new();
        let output = Text::new(&def, "first\nsecond").render_to_layers(Point::new(10.0, 10.0));
        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered.matches("<tspan").count(), 2);
        assert!(rendered.contains("first"));
        assert!(rendered.contains("second"));
    }

    #[test]
    fn test_text_render_escapes_markup() {
        let def = TextDefinition::new();
        let output = Text::new(&def, "a < b").render_to_layers(Point::default());
        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(!rendered.contains("a < b"));
    }
}
