//! PD-code assembly and canonical arc numbering.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use super::arcs::{export_arcs, CurvePiece};
use super::crossings::Segmentation;
use super::labels::label_positions;
use crate::config::DiagramConfig;
use crate::error::InvariantError;
use crate::geometry::math::is_left_turn;
use crate::model::{NodeId, Vec2};
use crate::Diagram;

/// Display data of one crossing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PdEntry {
    /// Arc labels in clockwise order, incoming under-strand first.
    pub arcs: [u32; 4],
    /// Directions shown for `arcs[0]` and `arcs[1]`; the other two are their
    /// negations.
    pub dirs: [Vec2; 2],
    pub pos: Vec2,
}

impl PdEntry {
    /// The PD-code tuple: anticlockwise, incoming under-strand first.
    pub fn anticlockwise(&self) -> [u32; 4] {
        let [a, b, c, d] = self.arcs;
        [a, d, c, b]
    }
}

/// Result of a successful compile.
#[derive(Clone, Debug, PartialEq)]
pub struct Compilation {
    /// Sorted anticlockwise tuples.
    pub pd_code: Vec<[u32; 4]>,
    /// One entry per crossing, in discovery order.
    pub entries: Vec<PdEntry>,
    /// Canonical node order of each component.
    pub components: Vec<Vec<NodeId>>,
    pub segmentation: Segmentation,
    /// Diagram version this was computed from.
    pub geom_version: u64,
}

impl Compilation {
    pub fn arcs_per_component(&self) -> Vec<usize> {
        (0..self.components.len())
            .map(|c| self.segmentation.arc_count(c))
            .collect()
    }

    pub fn crossing_count(&self) -> usize {
        self.entries.len()
    }

    /// Drawable pieces of every component, split at crossings.
    pub fn curve_pieces(&self) -> Vec<CurvePiece> {
        export_arcs(&self.components, &self.segmentation.parts)
    }

    pub fn label_positions(&self, config: &DiagramConfig, merge: bool) -> Result<Vec<(u32, Vec2)>, InvariantError> {
        label_positions(&self.entries, config, merge)
    }

    /// Keeps display positions in step with `Diagram::translate`.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        for e in &mut self.entries {
            e.pos.x += dx;
            e.pos.y += dy;
        }
        for c in &mut self.segmentation.crossings {
            c.x += dx as f64;
            c.y += dy as f64;
        }
    }

    /// Whether the diagram has been edited since this was computed.
    pub fn is_stale(&self, g: &Diagram) -> bool {
        self.geom_version != g.geom_version()
    }

    pub fn pd_code_string(&self) -> String {
        let tuples: Vec<String> = self
            .pd_code
            .iter()
            .map(|t| format!("[{}, {}, {}, {}]", t[0], t[1], t[2], t[3]))
            .collect();
        format!("[{}]", tuples.join(", "))
    }
}

fn to_vec2(v: (f64, f64)) -> Vec2 {
    Vec2::new(v.0 as f32, v.1 as f32)
}

pub fn assemble(g: &Diagram, components: Vec<Vec<NodeId>>, seg: Segmentation) -> Result<Compilation, InvariantError> {
    let mut raw: Vec<([(usize, usize); 4], [(f64, f64); 2], (f64, f64))> = Vec::new();
    for (cid, c) in seg.crossings.iter().enumerate() {
        let mut under = (c.first, seg.arc_ending_at(cid, 0)?);
        let mut over = (c.second, seg.arc_ending_at(cid, 1)?);
        if !c.first_under {
            std::mem::swap(&mut under, &mut over);
        }
        let (u_strand, (bu, au)) = under;
        let (o_strand, (bo, ao)) = over;
        let u_next = (bu, (au + 1) % seg.arc_count(bu));
        let o_next = (bo, (ao + 1) % seg.arc_count(bo));

        let pu = g.pos(components[u_strand.component][u_strand.index])?;
        let po = g.pos(components[o_strand.component][o_strand.index])?;
        let vu = (pu.0 - c.x, pu.1 - c.y);
        let vo = (po.0 - c.x, po.1 - c.y);

        if is_left_turn(vu, vo) {
            raw.push(([(bu, au), (bo, ao), u_next, o_next], [vu, vo], (c.x, c.y)));
        } else {
            raw.push(([(bu, au), o_next, u_next, (bo, ao)], [vu, (-vo.0, -vo.1)], (c.x, c.y)));
        }
    }

    let used: BTreeSet<(usize, usize)> = raw.iter().flat_map(|(x, _, _)| x.iter().copied()).collect();
    let label: BTreeMap<(usize, usize), u32> = used
        .into_iter()
        .enumerate()
        .map(|(i, arc)| (arc, i as u32 + 1))
        .collect();
    debug!(arcs = label.len(), "arcs numbered");

    let entries: Vec<PdEntry> = raw
        .into_iter()
        .map(|(x, dirs, pos)| PdEntry {
            arcs: x.map(|arc| label[&arc]),
            dirs: dirs.map(to_vec2),
            pos: to_vec2(pos),
        })
        .collect();
    let mut pd_code: Vec<[u32; 4]> = entries.iter().map(PdEntry::anticlockwise).collect();
    pd_code.sort_unstable();

    Ok(Compilation {
        pd_code,
        entries,
        components,
        segmentation: seg,
        geom_version: g.geom_version(),
    })
}
