//! Sequence diagram layout.
//!
//! Actors are placed left to right in declaration order. The distance
//! between two actors grows until every message and note between them fits,
//! then events are stacked top to bottom in source order.

use std::collections::HashMap;

use log::{debug, trace};

use pagedraw_core::{
    draw::TextDefinition,
    geometry::{Bounds, Insets, Point, Size},
    semantic::{ArrowType, Event, LineType, NotePlacement, SequenceDiagram},
};

use super::{Label, measure};
use crate::config::SequenceConfig;

/// Outer margin around the whole diagram.
const MARGIN: f32 = 10.0;
/// Gap between a lifeline and a note placed beside it.
const NOTE_GAP: f32 = 8.0;
/// How far a note over actors extends past their lifelines.
const NOTE_OVERHANG: f32 = 15.0;
/// Horizontal room kept on both sides of a signal's text.
const SIGNAL_MARGIN: f32 = 10.0;
/// Width and minimum height of a self-signal loop.
const SELF_SIGNAL_WIDTH: f32 = 20.0;
const SELF_SIGNAL_HEIGHT: f32 = 20.0;
/// Gap between a signal's text and its line.
const TEXT_GAP: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub center_x: f32,
    pub size: Size,
}

#[derive(Debug, Clone)]
pub struct SignalRow {
    pub from_x: f32,
    pub to_x: f32,
    pub y: f32,
    pub line: LineType,
    pub arrow: ArrowType,
    pub label: Label,
}

/// A signal from an actor to itself, drawn as a loop on the right of its lifeline.
#[derive(Debug, Clone)]
pub struct SelfSignalRow {
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
    /// Horizontal reach of the loop from the lifeline.
    pub width: f32,
    pub line: LineType,
    pub arrow: ArrowType,
    pub label: Label,
}

#[derive(Debug, Clone)]
pub struct NoteRow {
    pub bounds: Bounds,
    pub label: Label,
}

#[derive(Debug, Clone)]
pub enum Row {
    Signal(SignalRow),
    SelfSignal(SelfSignalRow),
    Note(NoteRow),
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub title: Option<Label>,
    pub actors: Vec<Actor>,
    pub actor_height: f32,
    /// Top edge of the upper actor boxes.
    pub top_y: f32,
    /// Top edge of the lower actor boxes.
    pub bottom_y: f32,
    pub rows: Vec<Row>,
    pub size: Size,
}

impl Layout {
    /// Vertical extent of the lifelines.
    pub fn lifeline_span(&self) -> (f32, f32) {
        (self.top_y + self.actor_height, self.bottom_y)
    }
}

/// Minimum center distances between actor slots.
///
/// Slot 0 is the left edge of the diagram, slot `n + 1` its right edge and
/// slot `i + 1` the actor with index `i`.
#[derive(Debug, Default)]
struct Distances {
    min: HashMap<(usize, usize), f32>,
}

impl Distances {
    fn ensure(&mut self, a: usize, b: usize, distance: f32) {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        if a == b {
            return;
        }
        let entry = self.min.entry((a, b)).or_insert(0.0);
        *entry = entry.max(distance);
    }

    /// Resolves the constraints into slot positions, leftmost at zero.
    fn positions(&self, slots: usize) -> Vec<f32> {
        let mut constraints: Vec<_> = self.min.iter().collect();
        constraints.sort_by_key(|((a, b), _)| (*b, *a));

        let mut positions = vec![0.0_f32; slots];
        for ((a, b), distance) in constraints {
            positions[*b] = positions[*b].max(positions[*a] + distance);
        }
        positions
    }
}

/// Calculate the layout of a sequence diagram.
pub fn layout_sequence(
    diagram: &SequenceDiagram,
    config: &SequenceConfig,
    text: &TextDefinition,
) -> Layout {
    let actor_text = text.clone().with_padding(Insets::new(8.0, 12.0, 8.0, 12.0));
    let note_text = text.clone().with_padding(Insets::uniform(6.0));
    let spacing = config.actor_spacing();

    let actor_sizes: Vec<Size> = diagram
        .actors()
        .iter()
        .map(|actor| measure(&actor_text, actor.name()))
        .collect();
    let actor_height = actor_sizes.iter().map(|s| s.height()).fold(0.0, f32::max);

    let n = actor_sizes.len();
    let slot = |actor: usize| actor + 1;
    let half = |slot: usize| {
        if slot == 0 || slot > n {
            0.0
        } else {
            actor_sizes[slot - 1].width() / 2.0
        }
    };
    // Space to keep beside a slot's box before something else may start.
    let clearance = |slot: usize| {
        if slot == 0 || slot > n {
            0.0
        } else {
            half(slot) + spacing / 2.0
        }
    };

    let mut distances = Distances::default();
    for k in 0..=n {
        let gap = if k == 0 || k == n { 0.0 } else { spacing };
        distances.ensure(k, k + 1, half(k) + half(k + 1) + gap);
    }

    let title_size = diagram
        .title()
        .map(|title| measure(&note_text, title))
        .unwrap_or_default();
    distances.ensure(0, n + 1, title_size.width());

    for event in diagram.events() {
        match event {
            Event::Signal(signal) => {
                let size = measure(text, &signal.message);
                if signal.is_self_signal() {
                    let k = slot(signal.from);
                    distances.ensure(
                        k,
                        k + 1,
                        clearance(k + 1) + SELF_SIGNAL_WIDTH + size.width() + SIGNAL_MARGIN,
                    );
                } else {
                    distances.ensure(
                        slot(signal.from),
                        slot(signal.to),
                        size.width() + 2.0 * SIGNAL_MARGIN,
                    );
                }
            }
            Event::Note(note) => {
                let size = measure(&note_text, &note.message);
                let k = slot(note.actors.0);
                match (note.placement, note.actors.1) {
                    (NotePlacement::LeftOf, _) => {
                        distances.ensure(k - 1, k, clearance(k - 1) + size.width() + NOTE_GAP)
                    }
                    (NotePlacement::RightOf, _) => {
                        distances.ensure(k, k + 1, clearance(k + 1) + size.width() + NOTE_GAP)
                    }
                    (NotePlacement::Over, Some(other)) if other != note.actors.0 => {
                        let (a, b) = (k.min(slot(other)), k.max(slot(other)));
                        distances.ensure(a, b, size.width() - 2.0 * NOTE_OVERHANG);
                        distances.ensure(a - 1, a, clearance(a - 1) + NOTE_OVERHANG);
                        distances.ensure(b, b + 1, clearance(b + 1) + NOTE_OVERHANG);
                    }
                    (NotePlacement::Over, _) => {
                        let reach = (size.width() / 2.0).max(NOTE_OVERHANG);
                        distances.ensure(k - 1, k, clearance(k - 1) + reach);
                        distances.ensure(k, k + 1, clearance(k + 1) + reach);
                    }
                }
            }
        }
    }

    let positions: Vec<f32> = distances
        .positions(n + 2)
        .into_iter()
        .map(|x| x + MARGIN)
        .collect();
    let center_of = |actor: usize| positions[slot(actor)];
    let content_width = positions[n + 1] - MARGIN;
    trace!(positions:?; "Sequence slot positions");

    let mut y = MARGIN;
    let title = diagram.title().map(|title| {
        let center = Point::new(MARGIN + content_width / 2.0, y + title_size.height() / 2.0);
        y += title_size.height() + config.signal_spacing();
        Label::new(title, center, title_size)
    });

    let top_y = y;
    y += actor_height + config.signal_spacing();

    let mut rows = Vec::with_capacity(diagram.events().len());
    for event in diagram.events() {
        match event {
            Event::Signal(signal) if signal.is_self_signal() => {
                let size = measure(text, &signal.message);
                let x = center_of(signal.from);
                let height = size.height().max(SELF_SIGNAL_HEIGHT);
                let center = Point::new(
                    x + SELF_SIGNAL_WIDTH + SIGNAL_MARGIN / 2.0 + size.width() / 2.0,
                    y + height / 2.0,
                );
                rows.push(Row::SelfSignal(SelfSignalRow {
                    x,
                    top: y,
                    bottom: y + height,
                    width: SELF_SIGNAL_WIDTH,
                    line: signal.line,
                    arrow: signal.arrow,
                    label: Label::new(signal.message.clone(), center, size),
                }));
                y += height + config.signal_spacing();
            }
            Event::Signal(signal) => {
                let size = measure(text, &signal.message);
                let (from_x, to_x) = (center_of(signal.from), center_of(signal.to));
                let line_y = y + size.height() + TEXT_GAP;
                let center = Point::new((from_x + to_x) / 2.0, y + size.height() / 2.0);
                rows.push(Row::Signal(SignalRow {
                    from_x,
                    to_x,
                    y: line_y,
                    line: signal.line,
                    arrow: signal.arrow,
                    label: Label::new(signal.message.clone(), center, size),
                }));
                y = line_y + config.signal_spacing();
            }
            Event::Note(note) => {
                let size = measure(&note_text, &note.message);
                let x = center_of(note.actors.0);
                let bounds = match (note.placement, note.actors.1) {
                    (NotePlacement::LeftOf, _) => Bounds::new_from_top_left(
                        Point::new(x - NOTE_GAP - size.width(), y),
                        size,
                    ),
                    (NotePlacement::RightOf, _) => {
                        Bounds::new_from_top_left(Point::new(x + NOTE_GAP, y), size)
                    }
                    (NotePlacement::Over, other) => {
                        let other_x = other.map_or(x, center_of);
                        let (left, right) = (x.min(other_x), x.max(other_x));
                        let width = size
                            .width()
                            .max(right - left + 2.0 * NOTE_OVERHANG);
                        Bounds::new_from_top_left(
                            Point::new((left + right - width) / 2.0, y),
                            Size::new(width, size.height()),
                        )
                    }
                };
                rows.push(Row::Note(NoteRow {
                    bounds,
                    label: Label::new(note.message.clone(), bounds.center(), size),
                }));
                y += size.height() + config.signal_spacing();
            }
        }
    }

    let bottom_y = y;
    let actors = diagram
        .actors()
        .iter()
        .zip(&actor_sizes)
        .enumerate()
        .map(|(index, (actor, size))| Actor {
            name: actor.name().to_string(),
            center_x: center_of(index),
            size: Size::new(size.width(), actor_height),
        })
        .collect();

    let size = Size::new(content_width + 2.0 * MARGIN, bottom_y + actor_height + MARGIN);
    debug!(width = size.width(), height = size.height(); "Sequence layout calculated");

    Layout {
        title,
        actors,
        actor_height,
        top_y,
        bottom_y,
        rows,
        size,
    }
}

#[cfg(test)]
mod tests {
    use pagedraw_core::{identifier::Id, semantic::Signal};

    use super::*;

    fn diagram(source: &str) -> SequenceDiagram {
        pagedraw_parser::parse_sequence(source).unwrap()
    }

    fn layout(source: &str) -> Layout {
        layout_sequence(
            &diagram(source),
            &SequenceConfig::default(),
            &TextDefinition::default(),
        )
    }

    #[test]
    fn test_distances_resolve_in_order() {
        let mut distances = Distances::default();
        distances.ensure(0, 1, 10.0);
        distances.ensure(1, 2, 10.0);
        distances.ensure(0, 2, 50.0);
        distances.ensure(2, 1, 5.0);

        assert_eq!(distances.positions(3), [0.0, 10.0, 50.0]);
    }

    #[test]
    fn test_actors_left_to_right_without_overlap() {
        let layout = layout("A->B: one\nB->C: two");

        assert_eq!(layout.actors.len(), 3);
        for pair in layout.actors.windows(2) {
            let left_edge = pair[0].center_x + pair[0].size.width() / 2.0;
            let right_edge = pair[1].center_x - pair[1].size.width() / 2.0;
            assert!(right_edge >= left_edge);
        }
    }

    #[test]
    fn test_long_message_widens_gap() {
        let short = layout("A->B: x");
        let long = layout("A->B: a much longer message that needs room");

        let gap = |l: &Layout| l.actors[1].center_x - l.actors[0].center_x;
        assert!(gap(&long) > gap(&short));
        let Row::Signal(signal) = &long.rows[0] else {
            panic!("expected signal row");
        };
        assert!(gap(&long) >= signal.label.size.width());
    }

    #[test]
    fn test_rows_stack_downwards() {
        let layout = layout("A->B: one\nnote over A,B: shared\nB->A: back\nA->A: self");
        assert_eq!(layout.rows.len(), 4);

        let tops: Vec<f32> = layout
            .rows
            .iter()
            .map(|row| match row {
                Row::Signal(s) => s.y,
                Row::SelfSignal(s) => s.top,
                Row::Note(n) => n.bounds.min_y(),
            })
            .collect();
        assert!(tops.windows(2).all(|w| w[0] < w[1]));
        let (_, lifeline_end) = layout.lifeline_span();
        assert!(lifeline_end > *tops.last().unwrap());
    }

    #[test]
    fn test_content_stays_inside_canvas() {
        let layout = layout("title: A title longer than everything\nnote left of A: left\nA->B: m\nnote right of B: right");

        for row in &layout.rows {
            if let Row::Note(note) = row {
                assert!(note.bounds.min_x() >= 0.0);
                assert!(note.bounds.max_x() <= layout.size.width());
            }
        }
        let title = layout.title.as_ref().unwrap();
        assert!(title.center.x() - title.size.width() / 2.0 >= 0.0);
    }

    #[test]
    fn test_empty_actor_list() {
        let mut diagram = SequenceDiagram::new();
        diagram.set_title("Only a title");
        let layout = layout_sequence(
            &diagram,
            &SequenceConfig::default(),
            &TextDefinition::default(),
        );
        assert!(layout.actors.is_empty());
        assert!(layout.size.width() > 0.0);

        // Model built by hand, not parsed
        let mut diagram = SequenceDiagram::new();
        let a = diagram.ensure_actor(Id::new("a"), "a");
        diagram.push_event(Event::Signal(Signal {
            from: a,
            to: a,
            line: LineType::Dashed,
            arrow: ArrowType::Open,
            message: String::new(),
        }));
        let layout = layout_sequence(
            &diagram,
            &SequenceConfig::default(),
            &TextDefinition::default(),
        );
        assert!(matches!(layout.rows[0], Row::SelfSignal(_)));
    }
}
