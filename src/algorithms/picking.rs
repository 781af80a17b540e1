use crate::geometry::math::point_to_segment_distance;
use crate::model::{EdgeId, NodeId};

use crate::Diagram;

/// Edges within `max_dist` of the point, nearest first. Ties keep edge id
/// order.
pub(crate) fn nearest_edges_impl(g: &Diagram, x: f32, y: f32, max_dist: f32) -> Vec<(EdgeId, f32)> {
    let mut hits: Vec<(EdgeId, f32)> = Vec::new();
    for (id, e) in g.edge_entries() {
        let (Some(a), Some(b)) = (g.get_node(e.a), g.get_node(e.b)) else { continue };
        let (d, _) = point_to_segment_distance(
            x as f64, y as f64,
            a.0 as f64, a.1 as f64,
            b.0 as f64, b.1 as f64,
        );
        if d <= max_dist as f64 {
            hits.push((id, d as f32));
        }
    }
    hits.sort_by(|p, q| p.1.total_cmp(&q.1));
    hits
}

/// The closest node within `radius` of the point.
pub(crate) fn node_at_impl(g: &Diagram, x: f32, y: f32, radius: f32) -> Option<NodeId> {
    let r2 = radius * radius;
    let mut best: Option<(NodeId, f32)> = None; // (id, dist2)
    for id in g.node_ids() {
        let Some((nx, ny)) = g.get_node(id) else { continue };
        let d2 = (nx - x).powi(2) + (ny - y).powi(2);
        if d2 <= r2 && best.map_or(true, |(_, bd2)| d2 < bd2) {
            best = Some((id, d2));
        }
    }
    best.map(|(id, _)| id)
}
