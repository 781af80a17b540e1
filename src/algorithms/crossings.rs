//! Crossing detection and arc segmentation.
//!
//! Every pair of edges without a common endpoint is intersected. Each hit
//! becomes a crossing with two half-crossings, one on each strand's
//! component. Sorting the half-crossings along a component cuts its cycle
//! into arcs: arc `k` ends at the `k`-th half-crossing.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::error::InvariantError;
use crate::geometry::intersect::intersect_segments;
use crate::model::{EdgeId, Layer, NodeId};
use crate::Diagram;

/// One strand of a crossing, located on its canonicalized component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strand {
    pub edge: EdgeId,
    pub component: usize,
    /// Position of the edge's leading node in the component order.
    pub index: usize,
    /// Parameter of the crossing along the edge, leading node at 0.
    pub t: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    pub x: f64,
    pub y: f64,
    /// The lower-id edge.
    pub first: Strand,
    pub second: Strand,
    /// Whether `first` passes under `second`.
    pub first_under: bool,
}

impl Crossing {
    pub fn strand(&self, side: u8) -> &Strand {
        if side == 0 {
            &self.first
        } else {
            &self.second
        }
    }
}

/// A crossing as seen from one of its components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfCrossing {
    pub index: usize,
    pub t: f64,
    pub crossing: usize,
    /// 0 for the crossing's `first` strand, 1 for `second`.
    pub side: u8,
    pub layer: Layer,
}

impl HalfCrossing {
    fn order(&self, other: &Self) -> Ordering {
        self.index
            .cmp(&other.index)
            .then(self.t.total_cmp(&other.t))
            .then(self.crossing.cmp(&other.crossing))
            .then(self.side.cmp(&other.side))
            .then(self.layer.cmp(&other.layer))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Segmentation {
    pub crossings: Vec<Crossing>,
    /// Sorted half-crossings of each component.
    pub parts: Vec<Vec<HalfCrossing>>,
    /// `(crossing, side)` -> `(component, arc)` of the arc ending there.
    pub arc_of: HashMap<(usize, u8), (usize, usize)>,
}

impl Segmentation {
    /// Number of arcs on a component; zero when it has no crossings.
    pub fn arc_count(&self, component: usize) -> usize {
        self.parts.get(component).map_or(0, Vec::len)
    }

    pub(crate) fn arc_ending_at(&self, crossing: usize, side: u8) -> Result<(usize, usize), InvariantError> {
        self.arc_of
            .get(&(crossing, side))
            .copied()
            .ok_or(InvariantError::MissingHalfCrossing { crossing, side })
    }
}

/// `(component, index)` of every node in the canonical order.
pub(crate) fn node_positions(node_slots: usize, blocks: &[Vec<NodeId>]) -> Vec<Option<(usize, usize)>> {
    let mut at = vec![None; node_slots];
    for (c, block) in blocks.iter().enumerate() {
        for (i, &n) in block.iter().enumerate() {
            at[n as usize] = Some((c, i));
        }
    }
    at
}

// Orders an edge's endpoints along its cycle: (leading, trailing) node plus
// the component and index of the leading one.
fn orient(
    at: &[Option<(usize, usize)>],
    blocks: &[Vec<NodeId>],
    edge: EdgeId,
    a: NodeId,
    b: NodeId,
) -> Result<(NodeId, NodeId, usize, usize), InvariantError> {
    let broken = InvariantError::BrokenCycle { edge };
    let (ca, ia) = at.get(a as usize).copied().flatten().ok_or(broken.clone())?;
    let (cb, ib) = at.get(b as usize).copied().flatten().ok_or(broken.clone())?;
    if ca != cb {
        return Err(broken);
    }
    let len = blocks[ca].len();
    if (ia + 1) % len == ib {
        Ok((a, b, ca, ia))
    } else if (ib + 1) % len == ia {
        Ok((b, a, cb, ib))
    } else {
        Err(broken)
    }
}

/// Finds all crossings between non-adjacent edges and cuts every component
/// into arcs.
pub fn segment(g: &Diagram, blocks: &[Vec<NodeId>]) -> Result<Segmentation, InvariantError> {
    let at = node_positions(g.nodes.len(), blocks);
    let mut oriented = Vec::new();
    for (id, e) in g.edge_entries() {
        let (from, to, component, index) = orient(&at, blocks, id, e.a, e.b)?;
        let p_from = g.get_node(from).ok_or(InvariantError::DanglingNode(from))?;
        let p_to = g.get_node(to).ok_or(InvariantError::DanglingNode(to))?;
        oriented.push((id, e, p_from, p_to, component, index));
    }

    let mut crossings = Vec::new();
    for (i, &(id1, e1, p11, p12, c1, n1)) in oriented.iter().enumerate() {
        for &(id2, e2, p21, p22, c2, n2) in &oriented[i + 1..] {
            if e1.shares_endpoint(&e2) {
                continue;
            }
            let hit = intersect_segments(
                p11.0, p11.1, p12.0, p12.1,
                p21.0, p21.1, p22.0, p22.1,
            );
            let Some((x, y, t1, t2)) = hit.hit() else {
                continue;
            };
            if !(t1 > 0.0 && t1 < 1.0 && t2 > 0.0 && t2 < 1.0) {
                return Err(InvariantError::CrossingAtEndpoint { first: id1, second: id2, t1, t2 });
            }
            crossings.push(Crossing {
                x,
                y,
                first: Strand { edge: id1, component: c1, index: n1, t: t1 },
                second: Strand { edge: id2, component: c2, index: n2, t: t2 },
                first_under: g.resolve_under(id1, id2),
            });
        }
    }
    debug!(crossings = crossings.len(), "crossings found");

    let mut parts: Vec<Vec<HalfCrossing>> = vec![Vec::new(); blocks.len()];
    for (cid, c) in crossings.iter().enumerate() {
        for (side, under) in [(0u8, c.first_under), (1u8, !c.first_under)] {
            let s = c.strand(side);
            parts[s.component].push(HalfCrossing {
                index: s.index,
                t: s.t,
                crossing: cid,
                side,
                layer: Layer::from_under(under),
            });
        }
    }

    let mut arc_of = HashMap::new();
    for (component, halves) in parts.iter_mut().enumerate() {
        halves.sort_by(|a, b| a.order(b));
        debug!(component, arcs = halves.len(), "component segmented");
        for (arc, h) in halves.iter().enumerate() {
            arc_of.insert((h.crossing, h.side), (component, arc));
        }
    }
    Ok(Segmentation { crossings, parts, arc_of })
}
