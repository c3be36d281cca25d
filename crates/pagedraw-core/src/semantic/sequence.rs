//! Sequence diagram model.

use crate::identifier::Id;

/// A participant drawn as a box with a lifeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    id: Id,
    name: String,
}

impl Actor {
    /// Creates an actor referenced by `id` and displayed as `name`.
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Stroke of a signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineType {
    #[default]
    Solid,
    Dashed,
}

/// Head of a signal arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowType {
    #[default]
    Filled,
    Open,
    None,
}

/// A message sent from one actor to another (or itself).
///
/// Actors are referenced by their index in [`SequenceDiagram::actors`].
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub from: usize,
    pub to: usize,
    pub line: LineType,
    pub arrow: ArrowType,
    pub message: String,
}

impl Signal {
    pub fn is_self_signal(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotePlacement {
    LeftOf,
    RightOf,
    Over,
}

/// A note attached to one actor, or spanning two with [`NotePlacement::Over`].
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub placement: NotePlacement,
    pub actors: (usize, Option<usize>),
    pub message: String,
}

/// One row of a sequence diagram, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Signal(Signal),
    Note(Note),
}

/// A parsed sequence diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceDiagram {
    title: Option<String>,
    actors: Vec<Actor>,
    events: Vec<Event>,
}

impl SequenceDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the index of the actor with `id`, if declared.
    pub fn actor_index(&self, id: Id) -> Option<usize> {
        self.actors.iter().position(|actor| actor.id() == id)
    }

    /// Returns the index of the actor with `id`, declaring it first if needed.
    ///
    /// Actors keep the order in which they were first mentioned.
    pub fn ensure_actor(&mut self, id: Id, name: &str) -> usize {
        if let Some(index) = self.actor_index(id) {
            return index;
        }
        self.actors.push(Actor::new(id, name));
        self.actors.len() - 1
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty() && self.events.is_empty() && self.title.is_none()
    }
}
