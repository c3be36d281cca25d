//! SVG rendering for sequence diagrams.

use svg::node::element as svg_element;

use pagedraw_core::{
    apply_stroke,
    draw::{
        Arrow, ArrowHead, Drawable as _, LayeredOutput, RenderLayer, Shape, ShapeKind,
        StrokeDefinition, StrokeStyle, Text,
    },
    geometry::{Point, Size},
    semantic::{ArrowType, LineType},
};

use super::Svg;
use crate::{
    export::{Error, Exporter},
    layout::{
        Label,
        sequence::{Actor, Layout, NoteRow, Row, SelfSignalRow, SignalRow},
    },
};

impl Exporter<Layout> for Svg {
    fn export(&mut self, layout: &Layout) -> Result<String, Error> {
        let mut output = LayeredOutput::new();

        if let Some(title) = &layout.title {
            output.merge(self.render_label(title));
        }

        let (lifeline_top, lifeline_bottom) = layout.lifeline_span();
        for actor in &layout.actors {
            output.merge(self.render_actor(actor, layout.top_y, layout.actor_height));
            output.merge(self.render_actor(actor, layout.bottom_y, layout.actor_height));
            output.merge(self.render_lifeline(actor.center_x, lifeline_top, lifeline_bottom));
        }

        for row in &layout.rows {
            let row_output = match row {
                Row::Signal(signal) => self.render_signal(signal),
                Row::SelfSignal(signal) => self.render_self_signal(signal),
                Row::Note(note) => self.render_note(note),
            };
            output.merge(row_output);
        }

        Ok(self.render_document(layout.size, output).to_string())
    }
}

impl Svg {
    fn render_label(&self, label: &Label) -> LayeredOutput {
        Text::new(&self.text, &label.text).render_to_layers(label.center)
    }

    fn render_actor(&self, actor: &Actor, top: f32, height: f32) -> LayeredOutput {
        let center = Point::new(actor.center_x, top + height / 2.0);
        let shape = Shape::new(
            ShapeKind::Rectangle,
            &self.shape,
            Size::new(actor.size.width(), height),
        );

        let mut output = shape.render_to_layers(center);
        output.merge(Text::new(&self.text, &actor.name).render_to_layers(center));
        output
    }

    fn render_lifeline(&self, x: f32, top: f32, bottom: f32) -> LayeredOutput {
        let line = svg_element::Line::new()
            .set("x1", x)
            .set("y1", top)
            .set("x2", x)
            .set("y2", bottom);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Lifeline, Box::new(apply_stroke!(line, &self.line)));
        output
    }

    fn render_signal(&mut self, signal: &SignalRow) -> LayeredOutput {
        let stroke = self.signal_stroke(signal.line);
        let arrow = Arrow::straight(
            Point::new(signal.from_x, signal.y),
            Point::new(signal.to_x, signal.y),
            &stroke,
            arrow_head(signal.arrow),
        );

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Arrow, self.markers.draw_arrow(&arrow));
        output.merge(self.render_label(&signal.label));
        output
    }

    /// Draws a loop leaving the lifeline to the right and coming back below.
    fn render_self_signal(&mut self, signal: &SelfSignalRow) -> LayeredOutput {
        let stroke = self.signal_stroke(signal.line);
        let right = signal.x + signal.width;
        let arrow = Arrow::new(
            vec![
                Point::new(signal.x, signal.top),
                Point::new(right, signal.top),
                Point::new(right, signal.bottom),
                Point::new(signal.x, signal.bottom),
            ],
            &stroke,
            arrow_head(signal.arrow),
        );

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Arrow, self.markers.draw_arrow(&arrow));
        output.merge(self.render_label(&signal.label));
        output
    }

    fn render_note(&self, note: &NoteRow) -> LayeredOutput {
        let mut rect = svg_element::Rectangle::new()
            .set("x", note.bounds.min_x())
            .set("y", note.bounds.min_y())
            .set("width", note.bounds.width())
            .set("height", note.bounds.height());
        if let Some(fill) = self.shape.fill() {
            rect = rect.set("fill", fill.to_string());
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Note, Box::new(apply_stroke!(rect, &self.line)));
        output.merge(self.render_label(&note.label));
        output
    }

    fn signal_stroke(&self, line: LineType) -> StrokeDefinition {
        match line {
            LineType::Solid => self.line.clone(),
            LineType::Dashed => self.line.clone().with_style(StrokeStyle::Dashed),
        }
    }
}

fn arrow_head(arrow: ArrowType) -> ArrowHead {
    match arrow {
        ArrowType::Filled => ArrowHead::Filled,
        ArrowType::Open => ArrowHead::Open,
        ArrowType::None => ArrowHead::None,
    }
}

#[cfg(test)]
mod tests {
    use pagedraw_core::draw::TextDefinition;

    use super::*;
    use crate::{config::SequenceConfig, export::svg::SvgBuilder, layout::sequence};

    fn export(source: &str) -> String {
        let diagram = pagedraw_parser::parse_sequence(source).unwrap();
        let layout = sequence::layout_sequence(
            &diagram,
            &SequenceConfig::default(),
            &TextDefinition::default(),
        );
        let mut svg = SvgBuilder::new("pd-sequence-0").build().unwrap();
        svg.export(&layout).unwrap()
    }

    #[test]
    fn test_signal_is_a_line_with_marker() {
        let out = export("A->B: hello");

        assert!(out.starts_with("<svg"));
        assert!(out.contains("<line"));
        assert!(out.contains("url(#pd-sequence-0-arrow-filled)"));
        assert!(out.contains("id=\"pd-sequence-0-arrow-filled\""));
        assert!(out.contains(">hello<"));
        // Two boxes per actor
        assert_eq!(out.matches("<rect").count(), 4);
    }

    #[test]
    fn test_dashed_open_and_self_signal() {
        let out = export("A-->>B: reply\nA->A: think");

        assert!(out.contains("stroke-dasharray=\"6,4\""));
        assert!(out.contains("pd-sequence-0-arrow-open"));
        assert!(out.contains("<path"));
    }

    #[test]
    fn test_notes_and_title() {
        let out = export("title: Overview\nnote over A: idle");

        assert!(out.contains("data-layer=\"note\""));
        assert!(out.contains(">Overview<"));
        assert!(!out.contains("<defs"));
    }

    #[test]
    fn test_markup_in_messages_is_escaped() {
        let out = export("A->B: <b>bold</b>");
        assert!(!out.contains("<b>"));
    }
}
