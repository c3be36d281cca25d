//! Parser for the sequence diagram grammar.
//!
//! The grammar is line oriented; every non-blank line is one statement:
//!
//! ```text
//! title: Login flow
//! participant Browser as B
//! note left of B: idle
//! note over B,Server: TLS
//! B->Server: GET /login
//! Server-->>B: 200 OK
//! ```
//!
//! Lines starting with `#` are comments. Keywords are case-insensitive.

use log::{debug, trace};
use winnow::{
    ModalResult, Parser,
    ascii::{Caseless, space0, space1},
    combinator::{alt, empty, opt, preceded},
    token::{literal, rest, take_while},
};

use pagedraw_core::{
    identifier::Id,
    semantic::{ArrowType, Event, LineType, Note, NotePlacement, SequenceDiagram, Signal},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    lines::{SourceLine, source_lines, unescape_newlines},
};

/// One parsed line, borrowing from the source.
#[derive(Debug, PartialEq)]
enum Statement<'s> {
    Title(&'s str),
    Participant(&'s str),
    Note {
        placement: NotePlacement,
        first: &'s str,
        second: Option<&'s str>,
        message: Option<&'s str>,
    },
    Signal {
        from: &'s str,
        line: LineType,
        arrow: ArrowType,
        to: &'s str,
        message: Option<&'s str>,
    },
}

/// Parse a sequence diagram source.
///
/// All problems in the source are reported together in the returned
/// [`ParseError`].
pub fn parse_sequence(source: &str) -> Result<SequenceDiagram, ParseError> {
    let mut diagram = SequenceDiagram::new();
    let mut collector = DiagnosticCollector::new();
    let mut statements = 0usize;

    for line in source_lines(source) {
        if line.text.starts_with('#') {
            continue;
        }
        statements += 1;

        match statement.parse(line.text) {
            Ok(stmt) => {
                trace!(statement:? = &stmt; "Parsed sequence statement");
                apply(&mut diagram, &line, stmt, &mut collector);
            }
            Err(err) => collector.emit(
                Diagnostic::error(format!("cannot parse line `{}`", line.text))
                    .with_code(ErrorCode::E100)
                    .with_label(line.span_from(err.offset()), "unexpected input")
                    .with_help(
                        "expected `title: ...`, `participant A`, `note over A: ...` \
                         or a signal such as `A->B: message`",
                    ),
            ),
        }
    }

    if statements == 0 {
        collector.emit(
            Diagnostic::error("sequence diagram is empty")
                .with_code(ErrorCode::E101)
                .with_help("add at least one signal, e.g. `A->B: hello`"),
        );
    }

    collector.finish()?;
    debug!(
        actors = diagram.actors().len(),
        events = diagram.events().len();
        "Sequence diagram parsed",
    );
    Ok(diagram)
}

fn apply(
    diagram: &mut SequenceDiagram,
    line: &SourceLine,
    stmt: Statement,
    collector: &mut DiagnosticCollector,
) {
    match stmt {
        Statement::Title(title) => diagram.set_title(unescape_newlines(title.trim())),
        Statement::Participant(declaration) => {
            let (name, alias) = split_alias(declaration);
            diagram.ensure_actor(Id::new(alias), &unescape_newlines(name));
        }
        Statement::Note {
            placement,
            first,
            second,
            message,
        } => {
            let Some(message) = message else {
                collector.emit(missing_message(line, "note"));
                return;
            };
            if second.is_some() && placement != NotePlacement::Over {
                collector.emit(
                    Diagnostic::error("only `note over` can span two actors")
                        .with_code(ErrorCode::E100)
                        .with_label(line.span, "note placed beside two actors")
                        .with_help("use `note over A,B: ...`"),
                );
                return;
            }
            let first = actor(diagram, first);
            let second = second.map(|name| actor(diagram, name));
            diagram.push_event(Event::Note(Note {
                placement,
                actors: (first, second),
                message: unescape_newlines(message.trim()),
            }));
        }
        Statement::Signal {
            from,
            line: line_type,
            arrow,
            to,
            message,
        } => {
            let Some(message) = message else {
                collector.emit(missing_message(line, "signal"));
                return;
            };
            let from = actor(diagram, from);
            let to = actor(diagram, to);
            diagram.push_event(Event::Signal(Signal {
                from,
                to,
                line: line_type,
                arrow,
                message: unescape_newlines(message.trim()),
            }));
        }
    }
}

/// Index of the actor referenced by `name`, created on first mention.
fn actor(diagram: &mut SequenceDiagram, name: &str) -> usize {
    let name = name.trim();
    diagram.ensure_actor(Id::new(name), &unescape_newlines(name))
}

/// Splits `Name as Alias` at the last case-insensitive ` as `.
///
/// Returns `(display name, reference key)`.
fn split_alias(declaration: &str) -> (&str, &str) {
    let declaration = declaration.trim();
    let lower = declaration.to_ascii_lowercase();
    match lower.rfind(" as ") {
        Some(pos) => {
            let name = declaration[..pos].trim();
            let alias = declaration[pos + 4..].trim();
            if name.is_empty() || alias.is_empty() {
                (declaration, declaration)
            } else {
                (name, alias)
            }
        }
        None => (declaration, declaration),
    }
}

fn missing_message(line: &SourceLine, what: &str) -> Diagnostic {
    Diagnostic::error(format!("{what} has no message text"))
        .with_code(ErrorCode::E102)
        .with_label(line.span, format!("{what} without `: text`"))
        .with_help(format!("add the text after a colon, e.g. `{}: text`", line.text))
}

fn statement<'s>(input: &mut &'s str) -> ModalResult<Statement<'s>> {
    alt((title, participant, note, signal)).parse_next(input)
}

fn title<'s>(input: &mut &'s str) -> ModalResult<Statement<'s>> {
    preceded((literal(Caseless("title")), space0, ':'), rest)
        .map(Statement::Title)
        .parse_next(input)
}

fn participant<'s>(input: &mut &'s str) -> ModalResult<Statement<'s>> {
    preceded(
        (literal(Caseless("participant")), space1),
        rest.verify(|s: &str| !s.trim().is_empty()),
    )
    .map(Statement::Participant)
    .parse_next(input)
}

fn note<'s>(input: &mut &'s str) -> ModalResult<Statement<'s>> {
    (literal(Caseless("note")), space1).parse_next(input)?;
    let placement = alt((
        (literal(Caseless("left")), space1, literal(Caseless("of"))).value(NotePlacement::LeftOf),
        (literal(Caseless("right")), space1, literal(Caseless("of")))
            .value(NotePlacement::RightOf),
        literal(Caseless("over")).value(NotePlacement::Over),
    ))
    .parse_next(input)?;
    space1.parse_next(input)?;
    let first = actor_name.parse_next(input)?;
    let second = opt(preceded(',', actor_name)).parse_next(input)?;
    let message = opt(preceded(':', rest)).parse_next(input)?;

    Ok(Statement::Note {
        placement,
        first,
        second,
        message,
    })
}

fn signal<'s>(input: &mut &'s str) -> ModalResult<Statement<'s>> {
    let from = actor_name.parse_next(input)?;
    let line = alt(("--".value(LineType::Dashed), "-".value(LineType::Solid))).parse_next(input)?;
    let arrow = alt((
        ">>".value(ArrowType::Open),
        ">".value(ArrowType::Filled),
        empty.value(ArrowType::None),
    ))
    .parse_next(input)?;
    let to = actor_name.parse_next(input)?;
    let message = opt(preceded(':', rest)).parse_next(input)?;

    Ok(Statement::Signal {
        from,
        line,
        arrow,
        to,
        message,
    })
}

/// Actor names exclude the characters that delimit statements.
fn actor_name<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| {
        !matches!(c, '-' | '>' | ':' | ',' | '"' | '\r' | '\n')
    })
    .verify(|name: &str| !name.trim().is_empty())
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> SequenceDiagram {
        parse_sequence(source).expect("source should parse")
    }

    fn first_code(source: &str) -> ErrorCode {
        let err = parse_sequence(source).expect_err("source should fail");
        err.diagnostics()[0].code().expect("diagnostic has a code")
    }

    #[test]
    fn test_simple_signal() {
        let diagram = parse_ok("A->B: hello");

        assert_eq!(diagram.actors().len(), 2);
        assert_eq!(diagram.actors()[0].name(), "A");
        let Event::Signal(signal) = &diagram.events()[0] else {
            panic!("expected a signal");
        };
        assert_eq!((signal.from, signal.to), (0, 1));
        assert_eq!(signal.line, LineType::Solid);
        assert_eq!(signal.arrow, ArrowType::Filled);
        assert_eq!(signal.message, "hello");
    }

    #[test]
    fn test_line_and_arrow_types() {
        let diagram = parse_ok("A-->>B: open dashed\nA-B: plain\nB-->A: dashed");
        let kinds: Vec<_> = diagram
            .events()
            .iter()
            .map(|event| match event {
                Event::Signal(s) => (s.line, s.arrow),
                Event::Note(_) => panic!("unexpected note"),
            })
            .collect();

        assert_eq!(
            kinds,
            [
                (LineType::Dashed, ArrowType::Open),
                (LineType::Solid, ArrowType::None),
                (LineType::Dashed, ArrowType::Filled),
            ]
        );
    }

    #[test]
    fn test_participants_fix_order_and_alias() {
        let diagram = parse_ok("participant Web Server as S\nparticipant C\nC->S: req");

        assert_eq!(diagram.actors()[0].id(), "S");
        assert_eq!(diagram.actors()[0].name(), "Web Server");
        assert_eq!(diagram.actors()[1].name(), "C");
        assert_eq!(diagram.actors().len(), 2);
    }

    #[test]
    fn test_title_comments_and_case_insensitive_keywords() {
        let diagram = parse_ok("# comment\nTITLE: Here\\nThere\nNOTE Right Of A: hi");

        assert_eq!(diagram.title(), Some("Here\nThere"));
        let Event::Note(note) = &diagram.events()[0] else {
            panic!("expected a note");
        };
        assert_eq!(note.placement, NotePlacement::RightOf);
        assert_eq!(note.actors, (0, None));
    }

    #[test]
    fn test_note_over_two_actors() {
        let diagram = parse_ok("A->B: x\nnote over A,B: shared");
        let Event::Note(note) = &diagram.events()[1] else {
            panic!("expected a note");
        };
        assert_eq!(note.actors, (0, Some(1)));
    }

    #[test]
    fn test_self_signal_reuses_actor() {
        let diagram = parse_ok("A->A: think");
        assert_eq!(diagram.actors().len(), 1);
    }

    #[test]
    fn test_errors() {
        assert_eq!(first_code("A=>B: nope"), ErrorCode::E100);
        assert_eq!(first_code("A->B"), ErrorCode::E102);
        assert_eq!(first_code("   \n# only a comment\n"), ErrorCode::E101);
        assert_eq!(first_code("note left of A,B: x"), ErrorCode::E100);
    }

    #[test]
    fn test_all_errors_are_collected() {
        let err = parse_sequence("A->B\n???\nA->B: fine\nC->D").unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
    }

    #[test]
    fn test_error_span_points_into_source() {
        let source = "A->B: ok\nA~B";
        let err = parse_sequence(source).unwrap_err();
        let span = err.diagnostics()[0].labels()[0].span();
        assert!(span.start() >= 9);
        assert_eq!(span.end(), source.len());
    }
}
