//! Rebuilds each component as a chain of quadratic curve pieces that break
//! at crossings, for vector export.
//!
//! A piece is three anchors (start, control, end), each a point interpolated
//! along a pair of nodes. Ends sitting at an under crossing are marked for
//! shrinking so the drawn strand shows a gap there.

use serde::Serialize;

use super::crossings::HalfCrossing;
use crate::error::InvariantError;
use crate::geometry::math::lerp;
use crate::geometry::tolerance::EPS_LEN;
use crate::model::{Layer, NodeId};
use crate::Diagram;

/// The point at `t` along `from -> to`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Anchor {
    pub from: NodeId,
    pub to: NodeId,
    pub t: f64,
}

impl Anchor {
    fn new(from: NodeId, to: NodeId, t: f64) -> Self {
        Anchor { from, to, t }
    }

    pub fn resolve(&self, g: &Diagram) -> Result<(f64, f64), InvariantError> {
        self.resolve_shrunk(g, 0.0)
    }

    /// Resolves the anchor moved by `shift` diagram units along the edge,
    /// clamped to the edge.
    pub fn resolve_shrunk(&self, g: &Diagram, shift: f64) -> Result<(f64, f64), InvariantError> {
        let (x1, y1) = g.pos(self.from)?;
        let (x2, y2) = g.pos(self.to)?;
        let len = (x2 - x1).hypot(y2 - y1);
        let t = if len > EPS_LEN { self.t + shift / len } else { self.t };
        Ok(lerp(x1, y1, x2, y2, t))
    }
}

/// Which ends of a piece are pulled back from an under crossing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ShrinkTag {
    pub start: bool,
    pub end: bool,
}

impl ShrinkTag {
    const NONE: ShrinkTag = ShrinkTag { start: false, end: false };

    fn at(start: Layer, end: Layer) -> Self {
        ShrinkTag { start: start == Layer::Below, end: end == Layer::Below }
    }

    /// Two-letter form: lower case marks a shrunk end (`l` start, `r` end).
    pub fn as_str(&self) -> &'static str {
        match (self.start, self.end) {
            (false, false) => "LR",
            (true, false) => "lR",
            (false, true) => "Lr",
            (true, true) => "lr",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurvePiece {
    pub start: Anchor,
    pub control: Anchor,
    pub end: Anchor,
    pub shrink: ShrinkTag,
}

impl CurvePiece {
    /// Resolved `(start, control, end)` points. Shrunk ends move `pad` units
    /// away from their crossing.
    pub fn points(&self, g: &Diagram, pad: f64) -> Result<[(f64, f64); 3], InvariantError> {
        let start_shift = if self.shrink.start { pad } else { 0.0 };
        let end_shift = if self.shrink.end { -pad } else { 0.0 };
        Ok([
            self.start.resolve_shrunk(g, start_shift)?,
            self.control.resolve(g)?,
            self.end.resolve_shrunk(g, end_shift)?,
        ])
    }
}

struct Cycle<'a> {
    nodes: &'a [NodeId],
}

impl Cycle<'_> {
    fn at(&self, i: usize) -> NodeId {
        self.nodes[i % self.nodes.len()]
    }

    fn next(&self, i: usize) -> NodeId {
        self.at(i + 1)
    }

    fn prev(&self, i: usize) -> NodeId {
        self.at(i + self.nodes.len() - 1)
    }

    // One piece per node: from the middle of the incoming edge, bending at
    // the node, to the middle of the outgoing edge.
    fn corner(&self, i: usize) -> CurvePiece {
        CurvePiece {
            start: Anchor::new(self.prev(i), self.at(i), 0.5),
            control: Anchor::new(self.at(i), self.next(i), 0.0),
            end: Anchor::new(self.at(i), self.next(i), 0.5),
            shrink: ShrinkTag::NONE,
        }
    }

    fn between(&self, begin: &HalfCrossing, end: &HalfCrossing) -> Vec<CurvePiece> {
        let (n1, n2) = (begin.index, end.index);
        let shrink = ShrinkTag::at(begin.layer, end.layer);
        if n1 == n2 && begin.t < end.t {
            return vec![CurvePiece {
                start: Anchor::new(self.at(n1), self.next(n1), begin.t),
                control: Anchor::new(self.at(n1), self.next(n1), (begin.t + end.t) / 2.0),
                end: Anchor::new(self.at(n2), self.next(n2), end.t),
                shrink,
            }];
        }

        // Node indices passed on the way, ending with n2.
        let len = self.nodes.len();
        let mut passed = Vec::new();
        let mut i = n1;
        loop {
            i = (i + 1) % len;
            passed.push(i);
            if i == n2 {
                break;
            }
        }

        let first = passed[0];
        if passed.len() == 1 {
            return vec![CurvePiece {
                start: Anchor::new(self.at(n1), self.at(first), begin.t),
                control: Anchor::new(self.at(n1), self.at(first), 1.0),
                end: Anchor::new(self.at(n2), self.next(n2), end.t),
                shrink,
            }];
        }

        let mut pieces = Vec::with_capacity(passed.len());
        pieces.push(CurvePiece {
            start: Anchor::new(self.at(n1), self.at(first), begin.t),
            control: Anchor::new(self.at(n1), self.at(first), 1.0),
            end: Anchor::new(self.at(first), self.next(first), 0.5),
            shrink: ShrinkTag { start: shrink.start, end: false },
        });
        for w in passed.windows(3) {
            let (last, now, next) = (w[0], w[1], w[2]);
            pieces.push(CurvePiece {
                start: Anchor::new(self.at(last), self.at(now), 0.5),
                control: Anchor::new(self.at(now), self.at(next), 0.0),
                end: Anchor::new(self.at(now), self.at(next), 0.5),
                shrink: ShrinkTag::NONE,
            });
        }
        pieces.push(CurvePiece {
            start: Anchor::new(self.prev(n2), self.at(n2), 0.5),
            control: Anchor::new(self.at(n2), self.at(n2), 0.0),
            end: Anchor::new(self.at(n2), self.next(n2), end.t),
            shrink: ShrinkTag { start: false, end: shrink.end },
        });
        pieces
    }
}

/// Curve pieces of every component, in component order. A component without
/// crossings yields one piece per node.
pub fn export_arcs(components: &[Vec<NodeId>], parts: &[Vec<HalfCrossing>]) -> Vec<CurvePiece> {
    let mut pieces = Vec::new();
    for (c, nodes) in components.iter().enumerate() {
        if nodes.is_empty() {
            continue;
        }
        let cycle = Cycle { nodes };
        let halves = parts.get(c).map_or(&[][..], |p| p.as_slice());
        if halves.is_empty() {
            pieces.extend((0..nodes.len()).map(|i| cycle.corner(i)));
            continue;
        }
        for j in 0..halves.len() {
            let begin = &halves[(j + halves.len() - 1) % halves.len()];
            pieces.extend(cycle.between(begin, &halves[j]));
        }
    }
    pieces
}
