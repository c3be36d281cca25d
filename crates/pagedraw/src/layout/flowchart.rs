//! Flowchart layout.
//!
//! Nodes are ranked top to bottom by their longest path from a root. Edges
//! closing a loop are found with a depth-first search and left out of the
//! ranking, then routed back up along channels on the right of the chart.

use std::collections::HashSet;

use log::{debug, trace};
use petgraph::{
    Direction::Incoming,
    algo::toposort,
    graph::{DiGraph, NodeIndex},
    visit::{DfsEvent, depth_first_search},
};

use pagedraw_core::{
    draw::{Shape, ShapeKind, TextDefinition},
    geometry::{Bounds, Insets, Point, Size},
    semantic::{Branch, Direction, Flowchart, Link, NodeKind},
};

use super::{Label, measure};
use crate::{PagedrawError, config::FlowchartConfig};

const MARGIN: f32 = 20.0;
/// Length of the first segment of an edge leaving a node sideways.
const RUN: f32 = 15.0;
/// Distance of the first back-edge channel from the rightmost node.
const CHANNEL_OFFSET: f32 = 20.0;
const CHANNEL_SPACING: f32 = 10.0;
/// Gap between a branch label and its edge.
const LABEL_GAP: f32 = 4.0;

/// Outline used for each node type.
pub fn shape_kind(kind: NodeKind) -> ShapeKind {
    match kind {
        NodeKind::Start | NodeKind::End => ShapeKind::Rounded,
        NodeKind::Operation => ShapeKind::Rectangle,
        NodeKind::InputOutput => ShapeKind::Parallelogram,
        NodeKind::Subroutine => ShapeKind::Subroutine,
        NodeKind::Condition => ShapeKind::Diamond,
        NodeKind::Parallel => ShapeKind::Barred,
    }
}

/// A node placed on the canvas.
///
/// [`Layout::nodes`] is parallel to [`Flowchart::nodes`].
#[derive(Debug, Clone)]
pub struct PlacedNode {
    pub shape: ShapeKind,
    pub bounds: Bounds,
    pub label: Label,
    pub flowstate: Option<String>,
    pub link: Option<Link>,
}

/// An edge routed as an orthogonal polyline.
#[derive(Debug, Clone)]
pub struct RoutedEdge {
    /// Index into [`Flowchart::edges`].
    pub index: usize,
    pub points: Vec<Point>,
    /// `true` for edges that close a loop.
    pub back: bool,
    pub label: Option<Label>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<RoutedEdge>,
    pub size: Size,
}

/// Calculate the layout of a flowchart.
///
/// # Errors
///
/// Returns [`PagedrawError::Layout`] if the ranking graph still contains a
/// cycle after back edges were removed.
pub fn layout_flowchart(
    chart: &Flowchart,
    config: &FlowchartConfig,
    text: &TextDefinition,
) -> Result<Layout, PagedrawError> {
    let back_edges = find_back_edges(chart);
    let ranks = rank_nodes(chart, &back_edges)?;
    let node_text = text.clone().with_padding(Insets::new(8.0, 12.0, 8.0, 12.0));

    let sizes: Vec<Size> = chart
        .nodes()
        .iter()
        .map(|node| {
            let allowance = Shape::label_allowance(shape_kind(node.kind));
            let text_size = measure(&node_text, &node.text);
            Size::new(
                text_size.width() + allowance.width(),
                text_size.height() + allowance.height(),
            )
        })
        .collect();

    let rank_count = ranks.iter().max().map_or(0, |max| max + 1);
    // Nodes of each rank, in definition order
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
    for (index, rank) in ranks.iter().enumerate() {
        rows[*rank].push(index);
    }

    let row_width = |row: &[usize]| {
        let widths: f32 = row.iter().map(|i| sizes[*i].width()).sum();
        widths + config.node_spacing() * row.len().saturating_sub(1) as f32
    };
    let content_width = rows
        .iter()
        .map(|row| row_width(row.as_slice()))
        .fold(0.0, f32::max);
    let left = MARGIN + RUN;

    let mut bounds = vec![Bounds::default(); sizes.len()];
    let mut y = MARGIN + RUN;
    for row in &rows {
        let height = row.iter().map(|i| sizes[*i].height()).fold(0.0, f32::max);
        let mut x = left + (content_width - row_width(row.as_slice())) / 2.0;
        for index in row {
            let size = sizes[*index];
            let center = Point::new(x + size.width() / 2.0, y + height / 2.0);
            bounds[*index] = Bounds::new_from_center(center, size);
            x += size.width() + config.node_spacing();
        }
        y += height + config.rank_spacing();
    }

    let nodes: Vec<PlacedNode> = chart
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| PlacedNode {
            shape: shape_kind(node.kind),
            bounds: bounds[index],
            label: Label::new(node.text.clone(), bounds[index].center(), sizes[index]),
            flowstate: node.flowstate.clone(),
            link: node.link.clone(),
        })
        .collect();

    let rightmost = bounds.iter().map(|b| b.max_x()).fold(left, f32::max);
    let mut channels = 0usize;
    let mut edges = Vec::with_capacity(chart.edges().len());
    for (index, edge) in chart.edges().iter().enumerate() {
        let (from, to) = (bounds[edge.from], bounds[edge.to]);
        let back = back_edges.contains(&index);

        let (points, side) = if back {
            let channel = rightmost + CHANNEL_OFFSET + CHANNEL_SPACING * channels as f32;
            channels += 1;
            (route_back(from, to, edge.from == edge.to, channel), Direction::Right)
        } else {
            let side = exit_side(
                chart.nodes()[edge.from].kind,
                edge.branch,
                edge.direction,
            );
            (route_forward(from, to, side), side)
        };

        let label = branch_text(edge.branch, config).map(|content| {
            let size = measure(text, content);
            Label::new(content, label_center(points[0], side, size), size)
        });

        trace!(edge = index, back = back, points:? = &points; "Routed flowchart edge");
        edges.push(RoutedEdge {
            index,
            points,
            back,
            label,
        });
    }

    let mut max_x = rightmost;
    let mut max_y = bounds.iter().map(|b| b.max_y()).fold(0.0, f32::max);
    for edge in &edges {
        for point in &edge.points {
            max_x = max_x.max(point.x());
            max_y = max_y.max(point.y());
        }
        if let Some(label) = &edge.label {
            max_x = max_x.max(label.center.x() + label.size.width() / 2.0);
            max_y = max_y.max(label.center.y() + label.size.height() / 2.0);
        }
    }

    let size = Size::new(max_x + MARGIN, max_y + MARGIN);
    debug!(
        nodes = nodes.len(),
        ranks = rank_count,
        back_edges = channels,
        width = size.width(),
        height = size.height();
        "Flowchart layout calculated",
    );

    Ok(Layout { nodes, edges, size })
}

fn graph_of(chart: &Flowchart, skip: &HashSet<usize>) -> DiGraph<usize, usize> {
    let mut graph = DiGraph::with_capacity(chart.nodes().len(), chart.edges().len());
    for index in 0..chart.nodes().len() {
        graph.add_node(index);
    }
    for (index, edge) in chart.edges().iter().enumerate() {
        if !skip.contains(&index) {
            graph.add_edge(NodeIndex::new(edge.from), NodeIndex::new(edge.to), index);
        }
    }
    graph
}

/// Indices of the edges that point back to an ancestor in a depth-first
/// walk started from the roots.
fn find_back_edges(chart: &Flowchart) -> HashSet<usize> {
    let graph = graph_of(chart, &HashSet::new());
    let roots = graph
        .node_indices()
        .filter(|n| graph.neighbors_directed(*n, Incoming).next().is_none());

    let mut back_pairs = HashSet::new();
    depth_first_search(&graph, roots.chain(graph.node_indices()), |event| {
        if let DfsEvent::BackEdge(u, v) = event {
            back_pairs.insert((u.index(), v.index()));
        }
    });

    chart
        .edges()
        .iter()
        .enumerate()
        .filter(|(_, edge)| back_pairs.contains(&(edge.from, edge.to)))
        .map(|(index, _)| index)
        .collect()
}

/// Longest-path rank of every node over the graph without back edges.
fn rank_nodes(
    chart: &Flowchart,
    back_edges: &HashSet<usize>,
) -> Result<Vec<usize>, PagedrawError> {
    let dag = graph_of(chart, back_edges);
    let order = toposort(&dag, None).map_err(|cycle| {
        let node = &chart.nodes()[dag[cycle.node_id()]];
        PagedrawError::Layout(format!("cycle through node `{}`", node.id))
    })?;

    let mut ranks = vec![0usize; chart.nodes().len()];
    for node in order {
        let rank = ranks[node.index()];
        for next in dag.neighbors(node) {
            ranks[next.index()] = ranks[next.index()].max(rank + 1);
        }
    }
    Ok(ranks)
}

/// Side of the source node an edge leaves from.
fn exit_side(kind: NodeKind, branch: Option<Branch>, direction: Option<Direction>) -> Direction {
    if let Some(direction) = direction {
        return direction;
    }
    match (kind, branch) {
        (NodeKind::Condition, Some(Branch::No)) => Direction::Right,
        (NodeKind::Parallel, Some(Branch::Path(2))) => Direction::Right,
        (NodeKind::Parallel, Some(Branch::Path(3))) => Direction::Left,
        _ => Direction::Bottom,
    }
}

fn branch_text(branch: Option<Branch>, config: &FlowchartConfig) -> Option<&str> {
    match branch {
        Some(Branch::Yes) => Some(config.yes_text()),
        Some(Branch::No) => Some(config.no_text()),
        _ => None,
    }
}

/// Routes an edge to a node on a lower rank, ending at the top of the target.
fn route_forward(from: Bounds, to: Bounds, side: Direction) -> Vec<Point> {
    let center = from.center();
    let end = Point::new(to.center().x(), to.min_y());
    let mid_y = (from.max_y() + to.min_y()) / 2.0;

    match side {
        Direction::Bottom => {
            let start = Point::new(center.x(), from.max_y());
            if (start.x() - end.x()).abs() < 0.5 {
                vec![start, Point::new(start.x(), end.y())]
            } else {
                vec![
                    start,
                    Point::new(start.x(), mid_y),
                    Point::new(end.x(), mid_y),
                    end,
                ]
            }
        }
        Direction::Right | Direction::Left => {
            let (x, outward) = if side == Direction::Right {
                (from.max_x(), RUN)
            } else {
                (from.min_x(), -RUN)
            };
            let start = Point::new(x, center.y());
            let clear = (end.x() - start.x()) * outward.signum() >= RUN;
            if clear {
                vec![start, Point::new(end.x(), start.y()), end]
            } else {
                let out = x + outward;
                vec![
                    start,
                    Point::new(out, start.y()),
                    Point::new(out, mid_y),
                    Point::new(end.x(), mid_y),
                    end,
                ]
            }
        }
        Direction::Top => {
            let start = Point::new(center.x(), from.min_y());
            let above = from.min_y() - RUN;
            let out = from.min_x() - RUN;
            vec![
                start,
                Point::new(start.x(), above),
                Point::new(out, above),
                Point::new(out, mid_y),
                Point::new(end.x(), mid_y),
                end,
            ]
        }
    }
}

/// Routes a loop-closing edge from the right side of its source up or
/// down a channel to the right side of its target.
fn route_back(from: Bounds, to: Bounds, self_loop: bool, channel: f32) -> Vec<Point> {
    let (start_y, end_y) = if self_loop {
        let quarter = from.height() / 4.0;
        (from.center().y() + quarter, from.center().y() - quarter)
    } else {
        (from.center().y(), to.center().y())
    };
    vec![
        Point::new(from.max_x(), start_y),
        Point::new(channel, start_y),
        Point::new(channel, end_y),
        Point::new(to.max_x(), end_y),
    ]
}

/// Places a branch label beside the first segment of its edge.
fn label_center(start: Point, side: Direction, size: Size) -> Point {
    let (half_w, half_h) = (size.width() / 2.0, size.height() / 2.0);
    match side {
        Direction::Bottom => Point::new(start.x() + LABEL_GAP + half_w, start.y() + half_h),
        Direction::Top => Point::new(start.x() + LABEL_GAP + half_w, start.y() - half_h),
        Direction::Right => Point::new(start.x() + half_w, start.y() - LABEL_GAP - half_h),
        Direction::Left => Point::new(start.x() - half_w, start.y() - LABEL_GAP - half_h),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    fn layout(source: &str) -> (Flowchart, Layout) {
        let chart = pagedraw_parser::parse_flowchart(source).unwrap();
        let layout = layout_flowchart(
            &chart,
            &FlowchartConfig::default(),
            &TextDefinition::default(),
        )
        .unwrap();
        (chart, layout)
    }

    fn ranks(source: &str) -> Vec<usize> {
        let chart = pagedraw_parser::parse_flowchart(source).unwrap();
        rank_nodes(&chart, &find_back_edges(&chart)).unwrap()
    }

    fn same_row(a: &PlacedNode, b: &PlacedNode) -> bool {
        approx_eq!(f32, a.bounds.center().y(), b.bounds.center().y(), epsilon = 0.01)
    }

    fn is_orthogonal(points: &[Point]) -> bool {
        points.windows(2).all(|pair| {
            approx_eq!(f32, pair[0].x(), pair[1].x(), epsilon = 0.01)
                || approx_eq!(f32, pair[0].y(), pair[1].y(), epsilon = 0.01)
        })
    }

    #[test]
    fn test_shape_per_node_type() {
        assert_eq!(shape_kind(NodeKind::Start), ShapeKind::Rounded);
        assert_eq!(shape_kind(NodeKind::Condition), ShapeKind::Diamond);
        assert_eq!(shape_kind(NodeKind::InputOutput), ShapeKind::Parallelogram);
    }

    #[test]
    fn test_linear_chain_ranks_downwards() {
        let source = "st=>start: Start\nop=>operation: Work\ne=>end: End\nst->op->e";
        let (_, layout) = layout(source);

        assert_eq!(ranks(source), [0, 1, 2]);
        assert!(layout.nodes[0].bounds.max_y() < layout.nodes[1].bounds.min_y());
        for edge in &layout.edges {
            assert!(!edge.back);
            assert_eq!(edge.points.len(), 2);
        }
        assert!(approx_eq!(
            f32,
            layout.nodes[0].bounds.center().x(),
            layout.nodes[2].bounds.center().x(),
            epsilon = 0.01
        ));
    }

    #[test]
    fn test_longest_path_rank() {
        let source = "a=>start: a\nb=>operation: b\nc=>operation: c\nd=>end: d\na->b->c->d\na->d";
        assert_eq!(ranks(source), [0, 1, 2, 3]);

        let (_, layout) = layout(source);
        assert!(layout.nodes[2].bounds.max_y() < layout.nodes[3].bounds.min_y());
    }

    #[test]
    fn test_condition_branches() {
        let (chart, layout) = layout(
            "st=>start: Start\ncond=>condition: Ok?\ny=>operation: Yes path\nn=>operation: No path\n\
             st->cond\ncond(yes)->y\ncond(no)->n",
        );

        let yes = &layout.edges[1];
        let no = &layout.edges[2];
        assert_eq!(yes.label.as_ref().unwrap().text, "yes");
        assert_eq!(no.label.as_ref().unwrap().text, "no");

        let cond = layout.nodes[chart.edges()[2].from].bounds;
        // yes leaves the bottom, no the right side
        assert!(approx_eq!(f32, yes.points[0].y(), cond.max_y(), epsilon = 0.01));
        assert!(approx_eq!(f32, no.points[0].x(), cond.max_x(), epsilon = 0.01));
        assert!(is_orthogonal(&yes.points));
        assert!(is_orthogonal(&no.points));
    }

    #[test]
    fn test_loop_uses_back_channel() {
        let source = "st=>start: Start\nop=>operation: Retry\ncond=>condition: Done?\ne=>end: End\n\
                      st->op->cond\ncond(yes)->e\ncond(no)->op";
        let (_, layout) = layout(source);

        let back: Vec<_> = layout.edges.iter().filter(|e| e.back).collect();
        assert_eq!(back.len(), 1);
        let rightmost = layout
            .nodes
            .iter()
            .map(|n| n.bounds.max_x())
            .fold(0.0, f32::max);
        assert!(back[0].points[1].x() > rightmost);
        assert!(back[0].points[1].x() < layout.size.width());
        assert!(is_orthogonal(&back[0].points));
        // The loop does not push the target below its source
        assert_eq!(ranks(source)[1], 1);
    }

    #[test]
    fn test_self_loop() {
        let chart = {
            let mut chart = pagedraw_parser::parse_flowchart("op=>operation: Spin\nop(right)->op")
                .unwrap();
            chart.add_edge(chart.edges()[0].clone());
            chart
        };
        let layout = layout_flowchart(
            &chart,
            &FlowchartConfig::default(),
            &TextDefinition::default(),
        )
        .unwrap();

        assert!(layout.edges.iter().all(|e| e.back));
        assert!(layout.edges[1].points[1].x() > layout.edges[0].points[1].x());
    }

    #[test]
    fn test_rows_centered_and_inside_canvas() {
        let (_, layout) = layout(
            "p=>parallel: Fork\na=>operation: A\nb=>operation: B\nc=>operation: C\n\
             p(path1)->a\np(path2)->b\np(path3)->c",
        );

        for node in &layout.nodes {
            assert!(node.bounds.min_x() >= 0.0);
            assert!(node.bounds.max_x() <= layout.size.width());
            assert!(node.bounds.max_y() <= layout.size.height());
        }
        let row: Vec<_> = layout.nodes[1..].iter().collect();
        assert!(row.iter().all(|n| same_row(n, row[0])));
        assert!(!same_row(&layout.nodes[0], row[0]));
        assert!(row[0].bounds.max_x() < row[1].bounds.min_x());
        for edge in &layout.edges {
            for point in &edge.points {
                assert!(point.x() >= 0.0 && point.y() >= 0.0);
            }
        }
    }
}
