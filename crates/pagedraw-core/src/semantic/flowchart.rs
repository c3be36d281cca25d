//! Flowchart model.
//!
//! A [`Flowchart`] holds typed nodes and the directed edges between them.
//! Condition nodes branch with `yes`/`no` edges, parallel nodes with
//! numbered paths.

use std::{fmt, str::FromStr};

use crate::identifier::Id;

/// Node types of the flowchart grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Start,
    End,
    Operation,
    InputOutput,
    Subroutine,
    Condition,
    Parallel,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Operation => "operation",
            Self::InputOutput => "inputoutput",
            Self::Subroutine => "subroutine",
            Self::Condition => "condition",
            Self::Parallel => "parallel",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            "operation" => Ok(Self::Operation),
            "inputoutput" => Ok(Self::InputOutput),
            "subroutine" => Ok(Self::Subroutine),
            "condition" => Ok(Self::Condition),
            "parallel" => Ok(Self::Parallel),
            _ => Err(format!("unknown node type `{s}`")),
        }
    }
}

/// Hyperlink attached to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: Id,
    pub kind: NodeKind,
    pub text: String,
    pub flowstate: Option<String>,
    pub link: Option<Link>,
}

/// Which outlet of a branching node an edge leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Yes,
    No,
    /// Numbered outlet of a parallel node, 1 to 3
    Path(u8),
}

/// Preferred side of the source node an edge leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(format!("unknown direction `{s}`")),
        }
    }
}

/// Edge between two nodes, referenced by index into [`Flowchart::nodes`].
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub branch: Option<Branch>,
    pub direction: Option<Direction>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flowchart {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Flowchart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_index(&self, id: Id) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Adds a node, returning its index.
    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Edges leaving the node at `index`, in definition order.
    pub fn outgoing(&self, index: usize) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.from == index)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, kind: NodeKind) -> Node {
        Node {
            id: Id::new(name),
            kind,
            text: name.to_string(),
            flowstate: None,
            link: None,
        }
    }

    #[test]
    fn test_node_kind_round_trips_through_str() {
        for kind in [NodeKind::Start, NodeKind::InputOutput, NodeKind::Parallel] {
            assert_eq!(kind.as_str().parse::<NodeKind>(), Ok(kind));
        }
        assert!("decision".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_outgoing_edges() {
        let mut chart = Flowchart::new();
        let st = chart.add_node(node("st", NodeKind::Start));
        let cond = chart.add_node(node("cond", NodeKind::Condition));
        let e = chart.add_node(node("e", NodeKind::End));
        chart.add_edge(Edge { from: st, to: cond, branch: None, direction: None });
        chart.add_edge(Edge { from: cond, to: e, branch: Some(Branch::Yes), direction: None });
        chart.add_edge(Edge { from: cond, to: st, branch: Some(Branch::No), direction: None });

        assert_eq!(chart.outgoing(cond).count(), 2);
        assert_eq!(chart.node_index(Id::new("e")), Some(2));
    }
}
