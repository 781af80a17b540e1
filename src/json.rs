use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DocumentError;
use crate::geometry::limits;
use crate::model::{Edge, EdgePair, Node, NodeId};
use crate::Diagram;

const VERSION: u32 = 1;

pub fn to_json_impl(g: &Diagram) -> Value {
    #[derive(Serialize)]
    struct NodeSer {
        id: u32,
        x: f32,
        y: f32,
    }
    #[derive(Serialize)]
    struct EdgeSer {
        id: u32,
        a: u32,
        b: u32,
    }
    #[derive(Serialize)]
    struct Doc {
        version: u32,
        nodes: Vec<NodeSer>,
        edges: Vec<EdgeSer>,
        crossing_order: Vec<[u32; 2]>,
        base: Vec<u32>,
        direction: Vec<u32>,
    }
    let mut nodes = Vec::new();
    for (i, n) in g.nodes.iter().enumerate() {
        if let Some(n) = n {
            nodes.push(NodeSer { id: i as u32, x: n.x, y: n.y });
        }
    }
    let edges = g
        .edge_entries()
        .map(|(id, e)| EdgeSer { id, a: e.a, b: e.b })
        .collect();
    let doc = Doc {
        version: VERSION,
        nodes,
        edges,
        crossing_order: g.crossing_order.iter().map(|p| [p.0, p.1]).collect(),
        base: g.base.iter().copied().collect(),
        direction: g.direction.iter().copied().collect(),
    };
    serde_json::to_value(doc).unwrap_or(Value::Null)
}

/// Loads a document into a fresh diagram and swaps it in only when every
/// check passes. The current config is kept.
pub fn from_json_impl(g: &mut Diagram, v: Value) -> Result<(), DocumentError> {
    #[derive(Deserialize)]
    struct NodeDe {
        id: u32,
        x: f32,
        y: f32,
    }
    #[derive(Deserialize)]
    struct EdgeDe {
        id: u32,
        a: u32,
        b: u32,
    }
    #[derive(Deserialize)]
    struct DocDe {
        version: Option<u32>,
        nodes: Vec<NodeDe>,
        edges: Vec<EdgeDe>,
        #[serde(default)]
        crossing_order: Vec<[u32; 2]>,
        #[serde(default)]
        base: Vec<u32>,
        #[serde(default)]
        direction: Vec<u32>,
    }
    let doc: DocDe = serde_json::from_value(v)?;
    let version = doc.version.unwrap_or(VERSION);
    if version != VERSION {
        return Err(DocumentError::Version(version));
    }
    // Caps: sizes
    if doc.nodes.len() > limits::MAX_NODES {
        return Err(DocumentError::Limit { what: "node" });
    }
    if doc.edges.len() > limits::MAX_EDGES {
        return Err(DocumentError::Limit { what: "edge" });
    }
    if doc.crossing_order.len() > limits::MAX_CROSSING_ORDER_PAIRS {
        return Err(DocumentError::Limit { what: "crossing order" });
    }

    let mut out = Diagram::with_config(g.config.clone());
    for n in &doc.nodes {
        if n.id as usize >= limits::MAX_NODES {
            return Err(DocumentError::Limit { what: "node id" });
        }
        if !limits::in_coord_bounds(n.x) || !limits::in_coord_bounds(n.y) {
            return Err(DocumentError::NonFinite(n.id));
        }
        let slot = n.id as usize;
        if slot >= out.nodes.len() {
            out.nodes.resize(slot + 1, None);
            out.degree.resize(slot + 1, 0);
        }
        if out.nodes[slot].is_some() {
            return Err(DocumentError::InvalidRef { kind: "node", id: n.id, target: "id" });
        }
        out.nodes[slot] = Some(Node { x: n.x, y: n.y });
    }

    let mut seen = BTreeSet::new();
    for e in &doc.edges {
        if e.id as usize >= limits::MAX_EDGES {
            return Err(DocumentError::Limit { what: "edge id" });
        }
        if e.a == e.b || !out.has_node(e.a) || !out.has_node(e.b) {
            return Err(DocumentError::InvalidRef { kind: "edge", id: e.id, target: "node" });
        }
        let edge = Edge::new(e.a, e.b);
        let slot = e.id as usize;
        if slot >= out.edges.len() {
            out.edges.resize(slot + 1, None);
        }
        if out.edges[slot].is_some() || !seen.insert(edge) {
            return Err(DocumentError::InvalidRef { kind: "edge", id: e.id, target: "edge" });
        }
        out.edges[slot] = Some(edge);
        // Degrees are derived from the edges, never read from the document.
        out.degree[edge.a as usize] += 1;
        out.degree[edge.b as usize] += 1;
    }

    for &[a, b] in &doc.crossing_order {
        if a == b || out.edge(a).is_none() || out.edge(b).is_none() {
            return Err(DocumentError::InvalidRef { kind: "crossing_order", id: a, target: "edge" });
        }
        out.crossing_order.insert(EdgePair::new(a, b));
    }

    for &id in &doc.base {
        if !out.has_node(id) {
            return Err(DocumentError::InvalidRef { kind: "base", id, target: "node" });
        }
        out.base.insert(id);
    }
    for &id in &doc.direction {
        if !out.has_node(id) || out.base.contains(&id) {
            return Err(DocumentError::InvalidRef { kind: "direction", id, target: "node" });
        }
        out.direction.insert(id);
    }

    out.geom_ver = g.geom_ver.wrapping_add(1);
    *g = out;
    Ok(())
}
