//! Error types for diagram edits, compilation and document loading.
//!
//! Every variant carries a stable `code()` string so front-ends can map
//! failures without parsing messages.

use crate::model::{EdgeId, NodeId};
use thiserror::Error;

/// Contract failures of the diagram mutation API. The diagram is unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("invalid {kind} id {id}")]
    InvalidId { kind: &'static str, id: u32 },
    #[error("edge endpoints cannot be the same node ({0})")]
    SelfLoop(NodeId),
    #[error("an edge cannot be reordered against itself ({0})")]
    SameEdge(EdgeId),
    #[error("position ({x}, {y}) is non-finite or out of range")]
    OutOfBounds { x: f32, y: f32 },
}

impl EditError {
    pub fn code(&self) -> &'static str {
        match self {
            EditError::InvalidId { .. } => "invalid_id",
            EditError::SelfLoop(_) => "self_loop",
            EditError::SameEdge(_) => "same_edge",
            EditError::OutOfBounds { .. } => "out_of_bounds",
        }
    }

    pub(crate) fn node(id: NodeId) -> Self {
        EditError::InvalidId { kind: "node", id }
    }

    pub(crate) fn edge(id: EdgeId) -> Self {
        EditError::InvalidId { kind: "edge", id }
    }
}

/// Defects that a correctly maintained diagram can never produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantError {
    #[error("edges {first} and {second} cross at a node position (t1 = {t1}, t2 = {t2})")]
    CrossingAtEndpoint {
        first: EdgeId,
        second: EdgeId,
        t1: f64,
        t2: f64,
    },
    #[error("direction node {direction} could not be placed after base node {base}")]
    DirectionNotAligned { base: NodeId, direction: NodeId },
    #[error("edge {edge} does not join consecutive nodes of its component")]
    BrokenCycle { edge: EdgeId },
    #[error("crossing {crossing} has no arc on side {side}")]
    MissingHalfCrossing { crossing: usize, side: u8 },
    #[error("node {0} is referenced but does not exist")]
    DanglingNode(NodeId),
    #[error("node {node} still has degree {degree} after removing its edges")]
    DegreeMismatch { node: NodeId, degree: u32 },
    #[error("arc label {label} occurs {count} times, expected 2")]
    UnpairedLabel { label: u32, count: usize },
}

impl InvariantError {
    pub fn code(&self) -> &'static str {
        match self {
            InvariantError::CrossingAtEndpoint { .. } => "crossing_at_endpoint",
            InvariantError::DirectionNotAligned { .. } => "direction_not_aligned",
            InvariantError::BrokenCycle { .. } => "broken_cycle",
            InvariantError::MissingHalfCrossing { .. } => "missing_half_crossing",
            InvariantError::DanglingNode(_) => "dangling_node",
            InvariantError::DegreeMismatch { .. } => "degree_mismatch",
            InvariantError::UnpairedLabel { .. } => "unpaired_label",
        }
    }
}

/// Why a compile request was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("{} node(s) do not have degree 2", .nodes.len())]
    BadDegree { nodes: Vec<NodeId> },
    #[error("at least 3 nodes are needed to compute a PD code (found {count})")]
    TooFewNodes { count: usize },
    #[error("the component of node {representative} has no base node")]
    MissingBase { representative: NodeId },
    #[error("the component of node {representative} has too many base nodes")]
    DuplicateBase {
        representative: NodeId,
        marked: Vec<NodeId>,
    },
    #[error("the component of node {representative} has no direction node")]
    MissingDirection { representative: NodeId },
    #[error("the component of node {representative} has too many direction nodes")]
    DuplicateDirection {
        representative: NodeId,
        marked: Vec<NodeId>,
    },
    #[error("base node {base} and direction node {direction} share a component but are not adjacent")]
    NotAdjacent { base: NodeId, direction: NodeId },
    #[error("internal error: {0}")]
    Internal(#[from] InvariantError),
}

impl CompileError {
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::BadDegree { .. } => "bad_degree",
            CompileError::TooFewNodes { .. } => "too_few_nodes",
            CompileError::MissingBase { .. } => "missing_base",
            CompileError::DuplicateBase { .. } => "duplicate_base",
            CompileError::MissingDirection { .. } => "missing_direction",
            CompileError::DuplicateDirection { .. } => "duplicate_direction",
            CompileError::NotAdjacent { .. } => "not_adjacent",
            CompileError::Internal(e) => e.code(),
        }
    }

    /// True for failures the user can fix by editing the drawing.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, CompileError::Internal(_))
    }

    /// Nodes a front-end should highlight for this failure.
    pub fn flagged_nodes(&self) -> Vec<NodeId> {
        match self {
            CompileError::BadDegree { nodes } => nodes.clone(),
            CompileError::MissingBase { representative }
            | CompileError::DuplicateBase { representative, .. }
            | CompileError::MissingDirection { representative }
            | CompileError::DuplicateDirection { representative, .. } => vec![*representative],
            CompileError::NotAdjacent { base, direction } => vec![*base, *direction],
            CompileError::TooFewNodes { .. } | CompileError::Internal(_) => Vec::new(),
        }
    }
}

/// JSON document load failures. The diagram is left as it was.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported document version {0}")]
    Version(u32),
    #[error("document exceeds the {what} limit")]
    Limit { what: &'static str },
    #[error("{kind} {id} references a missing or duplicate {target}")]
    InvalidRef {
        kind: &'static str,
        id: u32,
        target: &'static str,
    },
    #[error("node {0} has a non-finite or out-of-range coordinate")]
    NonFinite(NodeId),
}

impl DocumentError {
    pub fn code(&self) -> &'static str {
        match self {
            DocumentError::Parse(_) => "parse",
            DocumentError::Version(_) => "version",
            DocumentError::Limit { .. } => "limit",
            DocumentError::InvalidRef { .. } => "invalid_ref",
            DocumentError::NonFinite(_) => "non_finite",
        }
    }
}
