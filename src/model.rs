use serde::{Deserialize, Serialize};

/// Arena index of a node. Freed slots are reused by later insertions.
pub type NodeId = u32;
/// Arena index of an edge. Freed slots are reused by later insertions.
pub type EdgeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

/// Undirected edge; `a < b` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Edge { a, b }
        } else {
            Edge { a: b, b: a }
        }
    }

    pub fn touches(&self, n: NodeId) -> bool {
        self.a == n || self.b == n
    }

    pub fn shares_endpoint(&self, other: &Edge) -> bool {
        self.touches(other.a) || self.touches(other.b)
    }
}

/// Unordered edge pair key of the crossing-order set, smaller id first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgePair(pub EdgeId, pub EdgeId);

impl EdgePair {
    pub fn new(a: EdgeId, b: EdgeId) -> Self {
        if a <= b {
            EdgePair(a, b)
        } else {
            EdgePair(b, a)
        }
    }

    pub fn contains(&self, e: EdgeId) -> bool {
        self.0 == e || self.1 == e
    }
}

/// Which of the two crossing strands passes underneath.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    #[serde(rename = "above")]
    Above,
    #[serde(rename = "below")]
    Below,
}

impl Layer {
    pub fn from_under(under: bool) -> Self {
        if under {
            Layer::Below
        } else {
            Layer::Above
        }
    }
}
