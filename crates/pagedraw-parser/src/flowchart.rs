//! Parser for the flowchart grammar.
//!
//! A flowchart source has node definitions followed by edge chains:
//!
//! ```text
//! st=>start: Start:>http://example.com[blank]
//! op=>operation: Do it|past
//! cond=>condition: OK?
//! e=>end: End
//!
//! st->op->cond
//! cond(yes)->e
//! cond(no, right)->op
//! ```
//!
//! Parsing happens in two steps: every line is parsed on its own, then
//! the definitions and chains are resolved against each other. Problems
//! from both steps are collected and reported together.

use std::collections::HashMap;

use log::{debug, trace};
use winnow::{
    ModalResult, Parser,
    ascii::space0,
    combinator::{delimited, opt, preceded, separated, terminated},
    token::{rest, take_till, take_while},
};

use pagedraw_core::{
    identifier::Id,
    semantic::{Branch, Direction, Edge, Flowchart, Link, Node, NodeKind},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    lines::{SourceLine, source_lines, unescape_newlines},
    span::Span,
};

/// `name=>type: text`, before resolution.
#[derive(Debug)]
struct Definition<'s> {
    name: &'s str,
    kind: &'s str,
    body: Option<&'s str>,
}

/// One `name(options)` element of an edge chain.
#[derive(Debug)]
struct NodeRef<'s> {
    name: &'s str,
    options: Option<&'s str>,
}

#[derive(Debug)]
enum Statement<'s> {
    Definition(Definition<'s>),
    Chain(Vec<NodeRef<'s>>),
}

/// Outlet options parsed from a `(options)` suffix.
#[derive(Debug, Default, Clone, Copy)]
struct Outlet {
    branch: Option<Branch>,
    direction: Option<Direction>,
}

/// Parse a flowchart source.
pub fn parse_flowchart(source: &str) -> Result<Flowchart, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut flowchart = Flowchart::new();
    let mut spans: HashMap<Id, Span> = HashMap::new();
    let mut chains: Vec<(SourceLine, Vec<NodeRef>)> = Vec::new();

    for line in source_lines(source) {
        if line.text.contains("@>") {
            collector.emit(
                Diagnostic::error("edge line styles are not supported")
                    .with_code(ErrorCode::E301)
                    .with_label(line.span, "line style syntax")
                    .with_help("remove the `@>` style block; edges always use the default style"),
            );
            continue;
        }

        match statement.parse(line.text) {
            Ok(Statement::Definition(def)) => {
                trace!(definition:? = &def; "Parsed flowchart definition");
                define(&mut flowchart, &mut spans, &line, def, &mut collector);
            }
            Ok(Statement::Chain(refs)) => chains.push((line, refs)),
            Err(err) => collector.emit(
                Diagnostic::error(format!("cannot parse line `{}`", line.text))
                    .with_code(ErrorCode::E100)
                    .with_label(line.span_from(err.offset()), "unexpected input")
                    .with_help("expected a definition `name=>type: text` or edges `a->b`"),
            ),
        }
    }

    for (line, refs) in &chains {
        connect(&mut flowchart, line, refs, &mut collector);
    }

    if flowchart.is_empty() && !collector.has_errors() {
        collector.emit(
            Diagnostic::error("flowchart is empty")
                .with_code(ErrorCode::E101)
                .with_help("define at least one node, e.g. `st=>start: Start`"),
        );
    }

    collector.finish()?;
    debug!(
        nodes = flowchart.nodes().len(),
        edges = flowchart.edges().len();
        "Flowchart parsed",
    );
    Ok(flowchart)
}

fn define(
    flowchart: &mut Flowchart,
    spans: &mut HashMap<Id, Span>,
    line: &SourceLine,
    def: Definition,
    collector: &mut DiagnosticCollector,
) {
    let name_span = line.span_of(def.name);
    let id = Id::new(def.name);

    let kind = match def.kind.parse::<NodeKind>() {
        Ok(kind) => kind,
        Err(_) => {
            collector.emit(
                Diagnostic::error(format!("unknown node type `{}`", def.kind))
                    .with_code(ErrorCode::E203)
                    .with_label(line.span_of(def.kind), "unknown type")
                    .with_help(
                        "valid types: start, end, operation, inputoutput, subroutine, \
                         condition, parallel",
                    ),
            );
            return;
        }
    };

    if let Some(first) = spans.get(&id) {
        collector.emit(
            Diagnostic::error(format!("node `{}` is defined multiple times", def.name))
                .with_code(ErrorCode::E300)
                .with_label(name_span, "duplicate definition")
                .with_secondary_label(*first, "first defined here")
                .with_help("remove the duplicate or use a different name"),
        );
        return;
    }

    let (text, flowstate, link) = split_body(def.body.unwrap_or_default());
    let text = if text.is_empty() {
        def.name.to_string()
    } else {
        unescape_newlines(text)
    };

    spans.insert(id, name_span);
    flowchart.add_node(Node {
        id,
        kind,
        text,
        flowstate: flowstate.map(str::to_string),
        link,
    });
}

/// Splits `text|flowstate:>url[target]` into its parts.
fn split_body(body: &str) -> (&str, Option<&str>, Option<Link>) {
    // `e=>end:>url` has a link but no text
    if let Some(link) = body.strip_prefix('>') {
        return ("", None, parse_link(link.trim()));
    }
    let (before_link, link) = match body.split_once(":>") {
        Some((before, link)) => (before, parse_link(link.trim())),
        None => (body, None),
    };
    let (text, flowstate) = match before_link.rsplit_once('|') {
        Some((text, state)) if !state.trim().is_empty() => (text.trim(), Some(state.trim())),
        _ => (before_link.trim(), None),
    };
    (text, flowstate, link)
}

fn parse_link(link: &str) -> Option<Link> {
    if link.is_empty() {
        return None;
    }
    if let Some((url, target)) = link
        .strip_suffix(']')
        .and_then(|stripped| stripped.rsplit_once('['))
    {
        return Some(Link {
            url: url.trim().to_string(),
            target: Some(target.trim().to_string()).filter(|t| !t.is_empty()),
        });
    }
    Some(Link {
        url: link.to_string(),
        target: None,
    })
}

fn connect(
    flowchart: &mut Flowchart,
    line: &SourceLine,
    refs: &[NodeRef],
    collector: &mut DiagnosticCollector,
) {
    let mut resolved = Vec::with_capacity(refs.len());
    for node_ref in refs {
        let id = Id::new(node_ref.name);
        match flowchart.node_index(id) {
            Some(index) => resolved.push(Some(index)),
            None => {
                collector.emit(
                    Diagnostic::error(format!("undefined node `{}`", node_ref.name))
                        .with_code(ErrorCode::E200)
                        .with_label(line.span_of(node_ref.name), "not defined")
                        .with_help(format!(
                            "define it with `{}=>operation: ...`",
                            node_ref.name
                        )),
                );
                resolved.push(None);
            }
        }
    }

    for (pair, nodes) in refs.windows(2).zip(resolved.windows(2)) {
        let &[Some(from), Some(to)] = nodes else {
            continue;
        };
        let source = &pair[0];
        let Some(outlet) = outlet(line, source, collector) else {
            continue;
        };

        let kind = flowchart.nodes()[from].kind;
        if !branch_allowed(kind, outlet.branch, line, source, collector) {
            continue;
        }

        flowchart.add_edge(Edge {
            from,
            to,
            branch: outlet.branch,
            direction: outlet.direction,
        });
    }
}

/// Parses the `(options)` of a chain element.
fn outlet(
    line: &SourceLine,
    node_ref: &NodeRef,
    collector: &mut DiagnosticCollector,
) -> Option<Outlet> {
    let mut outlet = Outlet::default();
    let Some(options) = node_ref.options else {
        return Some(outlet);
    };

    for item in options.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        match item {
            "yes" => outlet.branch = Some(Branch::Yes),
            "no" => outlet.branch = Some(Branch::No),
            "path1" => outlet.branch = Some(Branch::Path(1)),
            "path2" => outlet.branch = Some(Branch::Path(2)),
            "path3" => outlet.branch = Some(Branch::Path(3)),
            _ => match item.parse::<Direction>() {
                Ok(direction) => outlet.direction = Some(direction),
                Err(_) => {
                    collector.emit(
                        Diagnostic::error(format!("unknown edge option `{item}`"))
                            .with_code(ErrorCode::E100)
                            .with_label(line.span_of(item), "unknown option")
                            .with_help(
                                "valid options: yes, no, path1, path2, path3, \
                                 top, bottom, left, right",
                            ),
                    );
                    return None;
                }
            },
        }
    }
    Some(outlet)
}

fn branch_allowed(
    kind: NodeKind,
    branch: Option<Branch>,
    line: &SourceLine,
    node_ref: &NodeRef,
    collector: &mut DiagnosticCollector,
) -> bool {
    let name = node_ref.name;
    let span = line.span_of(name);
    match (kind, branch) {
        (NodeKind::Condition, Some(Branch::Yes | Branch::No)) => true,
        (NodeKind::Condition, _) => {
            collector.emit(
                Diagnostic::error(format!(
                    "edge from condition `{name}` needs a `yes` or `no` branch"
                ))
                .with_code(ErrorCode::E202)
                .with_label(span, "condition without branch")
                .with_help(format!("write `{name}(yes)->...` or `{name}(no)->...`")),
            );
            false
        }
        (NodeKind::Parallel, None | Some(Branch::Path(_))) => true,
        (_, None) => true,
        (_, Some(branch)) => {
            let expected = match branch {
                Branch::Yes | Branch::No => "condition",
                Branch::Path(_) => "parallel",
            };
            collector.emit(
                Diagnostic::error(format!("branch used on `{name}`, which is a {kind} node"))
                .with_code(ErrorCode::E201)
                .with_label(span, format!("not a {expected} node"))
                .with_help(format!("only {expected} nodes take this branch option")),
            );
            false
        }
    }
}

fn statement<'s>(input: &mut &'s str) -> ModalResult<Statement<'s>> {
    if input.contains("=>") {
        definition.map(Statement::Definition).parse_next(input)
    } else {
        separated(2.., node_ref, (space0, "->", space0))
            .map(Statement::Chain)
            .parse_next(input)
    }
}

fn definition<'s>(input: &mut &'s str) -> ModalResult<Definition<'s>> {
    let name = terminated(node_name, (space0, "=>", space0)).parse_next(input)?;
    let kind = take_while(1.., |c: char| c.is_ascii_alphanumeric()).parse_next(input)?;
    let body = opt(preceded((space0, ':'), rest)).parse_next(input)?;
    Ok(Definition { name, kind, body })
}

fn node_ref<'s>(input: &mut &'s str) -> ModalResult<NodeRef<'s>> {
    let name = node_name.parse_next(input)?;
    let options = opt(preceded(space0, delimited('(', take_till(0.., ')'), ')'))).parse_next(input)?;
    Ok(NodeRef { name, options })
}

fn node_name<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '.').parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = "st=>start: Start\ne=>end: End\nst->e";

    fn codes(source: &str) -> Vec<ErrorCode> {
        parse_flowchart(source)
            .expect_err("source should fail")
            .diagnostics()
            .iter()
            .filter_map(|d| d.code())
            .collect()
    }

    #[test]
    fn test_basic_flowchart() {
        let chart = parse_flowchart(BASIC).unwrap();

        assert_eq!(chart.nodes().len(), 2);
        assert_eq!(chart.nodes()[0].kind, NodeKind::Start);
        assert_eq!(chart.nodes()[1].text, "End");
        assert_eq!(chart.edges().len(), 1);
        assert_eq!((chart.edges()[0].from, chart.edges()[0].to), (0, 1));
    }

    #[test]
    fn test_condition_branches_and_chain() {
        let chart = parse_flowchart(
            "st=>start: Go\nop=>operation: Work\ncond=>condition: Done?\ne=>end\n\
             st->op->cond\ncond(yes)->e\ncond(no, left)->op",
        )
        .unwrap();

        assert_eq!(chart.edges().len(), 4);
        let no = &chart.edges()[3];
        assert_eq!(no.branch, Some(Branch::No));
        assert_eq!(no.direction, Some(Direction::Left));
        assert_eq!(chart.nodes()[3].text, "e");
    }

    #[test]
    fn test_flowstate_and_link() {
        let chart = parse_flowchart(
            "st=>start: Start|past:>http://example.com[blank]\ne=>end: End:>/done\nst->e",
        )
        .unwrap();

        let st = &chart.nodes()[0];
        assert_eq!(st.text, "Start");
        assert_eq!(st.flowstate.as_deref(), Some("past"));
        let link = st.link.as_ref().unwrap();
        assert_eq!(link.url, "http://example.com");
        assert_eq!(link.target.as_deref(), Some("blank"));
        assert_eq!(chart.nodes()[1].link.as_ref().unwrap().url, "/done");
    }

    #[test]
    fn test_parallel_paths() {
        let chart = parse_flowchart(
            "p=>parallel: Fork\na=>operation: A\nb=>operation: B\np(path1, bottom)->a\np(path2)->b",
        )
        .unwrap();
        assert_eq!(chart.edges()[1].branch, Some(Branch::Path(2)));
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(codes("st=>start: S\nst->missing"), [ErrorCode::E200]);
        assert_eq!(codes("st=>start: S\ne=>end: E\nst(yes)->e"), [ErrorCode::E201]);
        assert_eq!(codes("c=>condition: ?\ne=>end: E\nc->e"), [ErrorCode::E202]);
        assert_eq!(codes("x=>decision: ?"), [ErrorCode::E203]);
        assert_eq!(codes("a=>end: 1\na=>end: 2"), [ErrorCode::E300]);
        assert_eq!(codes("st=>start: S\nst@>e({\"stroke\":\"red\"})"), [ErrorCode::E301]);
        assert_eq!(codes(""), [ErrorCode::E101]);
        assert_eq!(codes("st=>start: S\n->->"), [ErrorCode::E100]);
    }

    #[test]
    fn test_multiple_errors_collected() {
        let err = parse_flowchart("a=>start: A\na->b\na->c\nq=>what: ?").unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
    }

    #[test]
    fn test_duplicate_points_at_first_definition() {
        let source = "op=>operation: One\nop=>operation: Two";
        let err = parse_flowchart(source).unwrap_err();
        let labels = err.diagnostics()[0].labels();
        assert_eq!(labels[1].span(), Span::new(0..2));
        assert_eq!(&source[std::ops::Range::from(labels[0].span())], "op");
    }
}
