//! Parser for the directed-graph diagram description language.
//!
//! Model responses describe flowcharts one statement per line: nodes as
//! `ID[Label]` or `ID{Label}`, edges as `A --> B` or `A -->|label| B`,
//! with chains (`A --> B --> C`) splitting into per-step fragments.
//! Malformed fragments are skipped silently; an empty graph is a valid
//! result, distinct from a parse failure.

use std::collections::HashSet;

/// Hard upper bound on input lines; longer inputs abort the parse.
pub const MAX_DIAGRAM_LINES: usize = 512;

/// Horizontal spacing between fragments on one line.
const COLUMN_STEP: i32 = 200;
/// Vertical spacing between node-bearing lines.
const ROW_STEP: i32 = 100;

/// Why a diagram description could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramError {
    /// The input exceeded [`MAX_DIAGRAM_LINES`].
    TooLarge {
        /// Number of lines in the rejected input.
        lines: usize,
    },
}

impl std::fmt::Display for DiagramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLarge { lines } => {
                write!(f, "diagram description has {lines} lines, limit is {MAX_DIAGRAM_LINES}")
            }
        }
    }
}

impl std::error::Error for DiagramError {}

/// How a node should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Entry node, label "start" in any case.
    Start,
    /// Exit node, label "end" in any case.
    End,
    /// Plain step, square brackets.
    Process,
    /// Branch point, curly brackets.
    Decision,
}

impl NodeKind {
    /// The lowercase display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Process => "process",
            Self::Decision => "decision",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One parsed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    /// The single-letter identifier.
    pub id: String,
    /// Render classification.
    pub kind: NodeKind,
    /// Label text from between the brackets.
    pub label: String,
    /// Reference horizontal position; renderers may recompute.
    pub x: i32,
    /// Reference vertical position; renderers may recompute.
    pub y: i32,
}

/// One parsed edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    /// `source-target` pair id.
    pub id: String,
    /// Identifier of the source node.
    pub source: String,
    /// Identifier of the target node.
    pub target: String,
    /// Edge label, empty when none was written.
    pub label: String,
}

/// A parsed diagram.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowGraph {
    /// Nodes in first-definition order.
    pub nodes: Vec<FlowNode>,
    /// Edges in source order.
    pub edges: Vec<FlowEdge>,
}

/// Parses a diagram description into nodes and edges.
///
/// Blank lines and the `graph` declaration line are skipped. Each remaining
/// line splits on `-->` into fragments; a fragment contributes a node when
/// it contains a single-uppercase-letter identifier directly followed by a
/// bracketed label. The first definition of an identifier wins; later
/// redefinitions are ignored. A fragment with a node emits one edge to the
/// following fragment's identifier when one exists, labeled by that
/// fragment's `|...|` token if present.
///
/// # Errors
///
/// Returns [`DiagramError::TooLarge`] when the input exceeds
/// [`MAX_DIAGRAM_LINES`]. Callers should render an explicit error state
/// rather than an empty diagram in that case.
pub fn parse_diagram(text: &str) -> Result<FlowGraph, DiagramError> {
    let line_count = text.lines().count();
    if line_count > MAX_DIAGRAM_LINES {
        return Err(DiagramError::TooLarge { lines: line_count });
    }

    let mut graph = FlowGraph::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut y_offset = 0;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("graph") {
            continue;
        }

        let fragments: Vec<&str> = line.split("-->").collect();
        let mut line_has_nodes = false;

        for (index, fragment) in fragments.iter().enumerate() {
            let Some((id, label, decision)) = match_node(fragment) else {
                continue;
            };
            line_has_nodes = true;

            if seen.insert(id.clone()) {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let x = COLUMN_STEP * index as i32;
                graph.nodes.push(FlowNode {
                    id: id.clone(),
                    kind: classify(&label, decision),
                    label,
                    x,
                    y: y_offset,
                });
            }

            if let Some(next) = fragments.get(index + 1) {
                if let Some(target) = edge_target(next) {
                    graph.edges.push(FlowEdge {
                        id: format!("{id}-{target}"),
                        source: id,
                        target,
                        label: edge_label(next),
                    });
                }
            }
        }

        if line_has_nodes {
            y_offset += ROW_STEP;
        }
    }

    Ok(graph)
}

/// Finds the first `X[Label]` or `X{Label}` pattern in a fragment.
///
/// Returns the identifier, the label, and whether the brackets were curly.
/// A candidate whose closing bracket never appears is skipped and the scan
/// continues, so one unterminated pattern does not hide a later valid one.
fn match_node(fragment: &str) -> Option<(String, String, bool)> {
    for (at, ch) in fragment.char_indices() {
        if !ch.is_ascii_uppercase() {
            continue;
        }
        let rest = &fragment[at + 1..];
        if let Some(tail) = rest.strip_prefix('[') {
            if let Some(close) = tail.find(']') {
                return Some((ch.to_string(), tail[..close].to_string(), false));
            }
        } else if let Some(tail) = rest.strip_prefix('{') {
            if let Some(close) = tail.find('}') {
                return Some((ch.to_string(), tail[..close].to_string(), true));
            }
        }
    }
    None
}

/// Label text equality to start/end beats bracket shape.
fn classify(label: &str, decision: bool) -> NodeKind {
    let lowered = label.to_lowercase();
    if lowered == "start" {
        NodeKind::Start
    } else if lowered == "end" {
        NodeKind::End
    } else if decision {
        NodeKind::Decision
    } else {
        NodeKind::Process
    }
}

/// The identifier a fragment contributes as an edge target.
///
/// The `|...|` token is skipped first so an uppercase letter inside an edge
/// label (`|Yes|`) is never mistaken for the target.
fn edge_target(fragment: &str) -> Option<String> {
    let (before, after) = split_around_label(fragment);
    before.chars().chain(after.chars()).find(char::is_ascii_uppercase).map(|c| c.to_string())
}

/// The text inside a fragment's first complete `|...|` token.
fn edge_label(fragment: &str) -> String {
    let Some(open) = fragment.find('|') else {
        return String::new();
    };
    let rest = &fragment[open + 1..];
    match rest.find('|') {
        Some(close) => rest[..close].to_string(),
        None => String::new(),
    }
}

/// Splits a fragment into the text before and after its `|...|` token.
///
/// Without a complete token the whole fragment is "before".
fn split_around_label(fragment: &str) -> (&str, &str) {
    if let Some(open) = fragment.find('|') {
        let rest = &fragment[open + 1..];
        if let Some(close) = rest.find('|') {
            return (&fragment[..open], &rest[close + 1..]);
        }
    }
    (fragment, "")
}
