//! Placement of arc numbers around each crossing.

use std::collections::BTreeMap;

use crate::algorithms::pd_code::PdEntry;
use crate::config::DiagramConfig;
use crate::error::InvariantError;
use crate::geometry::tolerance::norm2;
use crate::model::Vec2;

/// Positions of the arc numbers of every crossing. Each number sits
/// `label_offset` away from its crossing along the arc's direction.
///
/// With `merge`, each number must occur exactly twice (once per arc end);
/// two occurrences closer than `2.5` text sizes collapse to their midpoint.
pub fn label_positions(entries: &[PdEntry], config: &DiagramConfig, merge: bool) -> Result<Vec<(u32, Vec2)>, InvariantError> {
    let reach = config.label_offset() as f64;
    let nudge = -(config.small_text_size as f64) / 2.0;
    let mut placed: Vec<(u32, (f64, f64))> = Vec::with_capacity(entries.len() * 4);
    for e in entries {
        let (d0, _) = norm2(e.dirs[0].x as f64, e.dirs[0].y as f64);
        let (d1, _) = norm2(e.dirs[1].x as f64, e.dirs[1].y as f64);
        let dirs = [d0, d1, (-d0.0, -d0.1), (-d1.0, -d1.1)];
        for (label, d) in e.arcs.iter().zip(dirs) {
            let x = e.pos.x as f64 + d.0 * reach + nudge;
            let y = e.pos.y as f64 + d.1 * reach + nudge;
            placed.push((*label, (x, y)));
        }
    }

    if !merge {
        return Ok(placed.into_iter().map(|(l, p)| (l, Vec2::new(p.0 as f32, p.1 as f32))).collect());
    }

    // Group by label, keeping first-seen order.
    let mut order: Vec<u32> = Vec::new();
    let mut by_label: BTreeMap<u32, Vec<(f64, f64)>> = BTreeMap::new();
    for (label, p) in placed {
        let ps = by_label.entry(label).or_default();
        if ps.is_empty() {
            order.push(label);
        }
        ps.push(p);
    }
    let groups: Vec<(u32, Vec<(f64, f64)>)> = order
        .into_iter()
        .map(|label| (label, by_label.remove(&label).unwrap_or_default()))
        .collect();

    let close = 2.5 * config.small_text_size as f64;
    let mut out = Vec::with_capacity(groups.len() * 2);
    for (label, ps) in groups {
        let [p1, p2] = ps[..] else {
            return Err(InvariantError::UnpairedLabel { label, count: ps.len() });
        };
        if (p1.0 - p2.0).hypot(p1.1 - p2.1) <= close {
            out.push((label, Vec2::new(((p1.0 + p2.0) / 2.0) as f32, ((p1.1 + p2.1) / 2.0) as f32)));
        } else {
            out.push((label, Vec2::new(p1.0 as f32, p1.1 as f32)));
            out.push((label, Vec2::new(p2.0 as f32, p2.1 as f32)));
        }
    }
    Ok(out)
}
