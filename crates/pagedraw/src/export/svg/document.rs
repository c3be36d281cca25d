//! Assembly of the final `<svg>` document.

use svg::node::element as svg_element;

use pagedraw_core::{
    draw::{LayeredOutput, RenderLayer},
    geometry::Size,
};

use super::Svg;

impl Svg {
    /// Wraps the rendered layers in an `<svg>` element of `size`.
    ///
    /// Marker definitions come first so that every `url(#...)` reference
    /// resolves to an earlier element.
    pub(super) fn render_document(&self, size: Size, mut output: LayeredOutput) -> svg::Document {
        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height());

        if !self.markers.is_empty() {
            doc = doc.add(self.markers.definitions());
        }

        if let Some(color) = self.background {
            let background = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", size.width())
                .set("height", size.height())
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(background));
        }

        output
            .render()
            .into_iter()
            .fold(doc, |doc, group| doc.add(group))
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::StyleConfig, export::svg::SvgBuilder};

    use super::*;

    #[test]
    fn test_document_size_and_background() {
        let style: StyleConfig = toml::from_str(r#"background_color = "white""#).unwrap();
        let svg = SvgBuilder::new("p").with_style(&style).build().unwrap();

        let doc = svg
            .render_document(Size::new(120.0, 80.0), LayeredOutput::new())
            .to_string();
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains("viewBox=\"0 0 120 80\""));
        assert!(doc.contains("data-layer=\"background\""));
        assert!(!doc.contains("<defs"));
    }
}
