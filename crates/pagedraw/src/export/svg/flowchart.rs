//! SVG rendering for flowcharts.

use svg::node::element as svg_element;

use pagedraw_core::draw::{
    Arrow, ArrowHead, Drawable as _, LayeredOutput, RenderLayer, Shape, Text,
};

use super::Svg;
use crate::{
    export::{Error, Exporter},
    layout::flowchart::{Layout, PlacedNode, RoutedEdge},
};

impl Exporter<Layout> for Svg {
    fn export(&mut self, layout: &Layout) -> Result<String, Error> {
        let mut output = LayeredOutput::new();

        for node in &layout.nodes {
            output.merge(self.render_node(node));
        }
        for edge in &layout.edges {
            output.merge(self.render_edge(edge)?);
        }

        Ok(self.render_document(layout.size, output).to_string())
    }
}

impl Svg {
    /// Renders a node's outline and text.
    ///
    /// Linked nodes are wrapped in a single `<a>` element, so the outline
    /// and the text are emitted together on the content layer.
    fn render_node(&self, node: &PlacedNode) -> LayeredOutput {
        let definition = self.shape_for_flowstate(node.flowstate.as_deref());
        let mut shape = Shape::new(node.shape, &definition, node.bounds.to_size());
        if let Some(flowstate) = &node.flowstate {
            shape.set_class(format!("flowstate-{flowstate}"));
        }

        let center = node.bounds.center();
        let mut output = shape.render_to_layers(center);
        output.merge(Text::new(&self.text, &node.label.text).render_to_layers(center));

        let Some(link) = &node.link else {
            return output;
        };

        let mut anchor = svg_element::Anchor::new().set("href", link.url.as_str());
        if let Some(target) = &link.target {
            anchor = anchor.set("target", target.as_str());
        }
        let anchor = output
            .render()
            .into_iter()
            .fold(anchor, |anchor, group| anchor.add(group));

        let mut linked = LayeredOutput::new();
        linked.add_to_layer(RenderLayer::Content, Box::new(anchor));
        linked
    }

    fn render_edge(&mut self, edge: &RoutedEdge) -> Result<LayeredOutput, Error> {
        if edge.points.len() < 2 {
            return Err(Error::Render(format!(
                "edge #{} has no route to draw",
                edge.index + 1
            )));
        }

        let stroke = self.line.clone();
        let arrow = Arrow::new(edge.points.clone(), &stroke, ArrowHead::Filled);

        let mut output = LayeredOutput::new();
        let line = self.markers.draw_arrow(&arrow);
        if edge.back {
            let group = svg_element::Group::new().set("class", "back-edge").add(line);
            output.add_to_layer(RenderLayer::Arrow, Box::new(group));
        } else {
            output.add_to_layer(RenderLayer::Arrow, line);
        }
        if let Some(label) = &edge.label {
            output.merge(Text::new(&self.text, &label.text).render_to_layers(label.center));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use pagedraw_core::{
        draw::TextDefinition,
        geometry::{Point, Size},
    };

    use super::*;
    use crate::{config::FlowchartConfig, export::svg::SvgBuilder, layout::flowchart};

    fn export_with(source: &str, config: &FlowchartConfig) -> String {
        let chart = pagedraw_parser::parse_flowchart(source).unwrap();
        let layout =
            flowchart::layout_flowchart(&chart, config, &TextDefinition::default()).unwrap();
        let mut svg = SvgBuilder::new("pd-flowchart-1")
            .with_flowchart(config)
            .build()
            .unwrap();
        svg.export(&layout).unwrap()
    }

    fn export(source: &str) -> String {
        export_with(source, &FlowchartConfig::default())
    }

    #[test]
    fn test_start_end_shapes_and_edge() {
        let out = export("st=>start: Start\ne=>end: End\nst->e");

        assert_eq!(out.matches("<rect").count(), 2);
        assert!(out.contains("url(#pd-flowchart-1-arrow-filled)"));
        assert!(out.contains(">Start<"));
    }

    #[test]
    fn test_condition_labels() {
        let out = export(
            "c=>condition: Ready?\na=>operation: Go\nb=>operation: Wait\nc(yes)->a\nc(no)->b",
        );

        assert!(out.contains("<polygon"));
        assert!(out.contains(">yes<"));
        assert!(out.contains(">no<"));
    }

    #[test]
    fn test_link_and_flowstate() {
        let config: FlowchartConfig = toml::from_str("[flowstate]\npast = \"#cccccc\"").unwrap();
        let out = export_with(
            "op=>operation: Docs|past:>https://example.com[blank]\ne=>end: End\nop->e",
            &config,
        );

        assert!(out.contains("<a "));
        assert!(out.contains("href=\"https://example.com\""));
        assert!(out.contains("target=\"blank\""));
        assert!(out.contains("class=\"flowstate-past\""));
        let fill = pagedraw_core::color::Color::new("#cccccc").unwrap();
        assert!(out.contains(&format!("fill=\"{fill}\"")));
    }

    #[test]
    fn test_loop_edge_has_back_edge_class() {
        let out = export(
            "op=>operation: Retry\ncond=>condition: Done?\ne=>end: End\n\
             op->cond\ncond(yes)->e\ncond(no)->op",
        );

        assert_eq!(out.matches("class=\"back-edge\"").count(), 1);
    }

    #[test]
    fn test_straight_chain_has_no_back_edge() {
        let out = export("st=>start: Start\ne=>end: End\nst->e");

        assert!(!out.contains("back-edge"));
    }

    #[test]
    fn test_edge_without_route_fails() {
        let layout = Layout {
            nodes: Vec::new(),
            edges: vec![RoutedEdge {
                index: 0,
                points: vec![Point::default()],
                back: false,
                label: None,
            }],
            size: Size::new(10.0, 10.0),
        };
        let mut svg = SvgBuilder::new("p").build().unwrap();

        assert!(matches!(svg.export(&layout), Err(Error::Render(_))));
    }
}
