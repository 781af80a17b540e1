pub mod config;
pub mod error;
pub mod model;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod arcs;
    pub mod components;
    pub mod crossings;
    pub mod labels;
    pub mod pd_code;
    pub mod picking;
}
mod json;
pub mod svg;

pub use algorithms::arcs::{Anchor, CurvePiece, ShrinkTag};
pub use algorithms::components::{Components, Markers};
pub use algorithms::crossings::{Crossing, HalfCrossing, Segmentation, Strand};
pub use algorithms::pd_code::{Compilation, PdEntry};
pub use config::{DiagramConfig, SvgStyle};
pub use error::{CompileError, DocumentError, EditError, InvariantError};
pub use model::{Edge, EdgeId, EdgePair, Layer, Node, NodeId, Vec2};

use geometry::limits::in_coord_bounds;
use std::collections::BTreeSet;
use tracing::{debug, error, warn};

/// A hand-drawn knot or link diagram: degree-2 nodes joined by straight
/// edges, plus the annotations that turn it into a PD code.
///
/// The diagram is the single owner of its state; every edit is a method call
/// and `compile` only reads it.
#[derive(Clone, Debug)]
pub struct Diagram {
    pub(crate) nodes: Vec<Option<Node>>, // id is index
    pub(crate) edges: Vec<Option<Edge>>, // id is index
    pub(crate) degree: Vec<u32>,         // parallel to nodes
    pub(crate) crossing_order: BTreeSet<EdgePair>,
    pub(crate) base: BTreeSet<NodeId>,
    pub(crate) direction: BTreeSet<NodeId>,
    pub(crate) config: DiagramConfig,
    pub(crate) geom_ver: u64,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

fn first_free<T>(slots: &[Option<T>]) -> usize {
    slots.iter().position(|s| s.is_none()).unwrap_or(slots.len())
}

impl Diagram {
    pub fn new() -> Self {
        Self::with_config(DiagramConfig::default())
    }

    pub fn with_config(config: DiagramConfig) -> Self {
        Diagram {
            nodes: Vec::new(),
            edges: Vec::new(),
            degree: Vec::new(),
            crossing_order: BTreeSet::new(),
            base: BTreeSet::new(),
            direction: BTreeSet::new(),
            config,
            geom_ver: 1,
        }
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DiagramConfig) {
        self.config = config;
    }

    /// Monotonic version; increments on every edit.
    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }

    // Nodes
    /// Adds a node at (x, y). Coordinates must be finite and within
    /// `limits::COORD_MIN..=COORD_MAX`.
    pub fn add_node(&mut self, x: f32, y: f32) -> Result<NodeId, EditError> {
        if !in_coord_bounds(x) || !in_coord_bounds(y) {
            return Err(EditError::OutOfBounds { x, y });
        }
        let id = first_free(&self.nodes);
        if id == self.nodes.len() {
            self.nodes.push(Some(Node { x, y }));
            self.degree.push(0);
        } else {
            self.nodes[id] = Some(Node { x, y });
            self.degree[id] = 0;
        }
        self.bump();
        Ok(id as NodeId)
    }

    pub fn get_node(&self, id: NodeId) -> Option<(f32, f32)> {
        self.nodes
            .get(id as usize)
            .and_then(|n| *n)
            .map(|n| (n.x, n.y))
    }

    pub(crate) fn pos(&self, id: NodeId) -> Result<(f64, f64), InvariantError> {
        self.get_node(id)
            .map(|(x, y)| (x as f64, y as f64))
            .ok_or(InvariantError::DanglingNode(id))
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| i as NodeId)
    }

    pub fn node_count(&self) -> u32 {
        self.nodes.iter().filter(|n| n.is_some()).count() as u32
    }

    /// Moves a node unless that would bring it within `2R + 1` of another
    /// node. Returns whether the node moved.
    pub fn move_node(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        if !in_coord_bounds(x) || !in_coord_bounds(y) || !self.has_node(id) {
            return false;
        }
        let spacing = self.config.min_node_spacing();
        let conflict = self.nodes.iter().enumerate().any(|(i, n)| match n {
            Some(n) if i as NodeId != id => (n.x - x).hypot(n.y - y) <= spacing,
            _ => false,
        });
        if conflict {
            return false;
        }
        if let Some(Some(n)) = self.nodes.get_mut(id as usize) {
            n.x = x;
            n.y = y;
        }
        self.bump();
        true
    }

    /// Removes a node together with its incident edges and markers.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if !self.has_node(id) {
            return false;
        }
        let incident: Vec<EdgeId> = self
            .edge_ids()
            .filter(|&e| self.edge(e).is_some_and(|(a, b)| a == id || b == id))
            .collect();
        for eid in incident {
            self.remove_edge(eid);
        }
        self.base.remove(&id);
        self.direction.remove(&id);
        let degree = self.degree[id as usize];
        if degree != 0 {
            let e = InvariantError::DegreeMismatch { node: id, degree };
            error!(code = e.code(), "{e}");
        }
        debug_assert_eq!(degree, 0, "node {id} kept edges after removal");
        self.nodes[id as usize] = None;
        self.degree[id as usize] = 0;
        self.bump();
        true
    }

    // Edges
    /// Connects two nodes. An existing edge between the same pair is
    /// returned unchanged.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<EdgeId, EditError> {
        if !self.has_node(a) {
            return Err(EditError::node(a));
        }
        if !self.has_node(b) {
            return Err(EditError::node(b));
        }
        if a == b {
            return Err(EditError::SelfLoop(a));
        }
        let edge = Edge::new(a, b);
        if let Some(existing) = self.edges.iter().position(|e| *e == Some(edge)) {
            debug!(edge = existing, "edge already exists");
            return Ok(existing as EdgeId);
        }
        let id = first_free(&self.edges);
        if id == self.edges.len() {
            self.edges.push(Some(edge));
        } else {
            self.edges[id] = Some(edge);
        }
        self.degree[edge.a as usize] += 1;
        self.degree[edge.b as usize] += 1;
        self.bump();
        Ok(id as EdgeId)
    }

    /// Removes an edge and every crossing-order pair mentioning it.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let Some(edge) = self.edges.get_mut(id as usize).and_then(|slot| slot.take()) else {
            return false;
        };
        self.degree[edge.a as usize] -= 1;
        self.degree[edge.b as usize] -= 1;
        self.crossing_order.retain(|p| !p.contains(id));
        self.bump();
        true
    }

    pub fn edge(&self, id: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edges
            .get(id as usize)
            .and_then(|e| *e)
            .map(|e| (e.a, e.b))
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| i as EdgeId)
    }

    pub(crate) fn edge_entries(&self) -> impl Iterator<Item = (EdgeId, Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.map(|e| (i as EdgeId, e)))
    }

    pub fn edge_count(&self) -> u32 {
        self.edges.iter().filter(|e| e.is_some()).count() as u32
    }

    pub fn degree(&self, id: NodeId) -> Option<u32> {
        if self.has_node(id) {
            self.degree.get(id as usize).copied()
        } else {
            None
        }
    }

    /// Inserts a node at (x, y) in the middle of an edge.
    pub fn split_edge(&mut self, id: EdgeId, x: f32, y: f32) -> Result<NodeId, EditError> {
        let (a, b) = self.edge(id).ok_or(EditError::edge(id))?;
        let mid = self.add_node(x, y)?;
        self.remove_edge(id);
        self.add_edge(a, mid)?;
        self.add_edge(mid, b)?;
        Ok(mid)
    }

    // Crossing order
    /// Flips the over/under resolution between two edges. Returns whether
    /// the pair is now inverted.
    pub fn toggle_crossing_order(&mut self, a: EdgeId, b: EdgeId) -> Result<bool, EditError> {
        if a == b {
            return Err(EditError::SameEdge(a));
        }
        if self.edge(a).is_none() {
            return Err(EditError::edge(a));
        }
        if self.edge(b).is_none() {
            return Err(EditError::edge(b));
        }
        let pair = EdgePair::new(a, b);
        let inverted = if self.crossing_order.remove(&pair) {
            false
        } else {
            self.crossing_order.insert(pair)
        };
        self.bump();
        Ok(inverted)
    }

    pub fn is_inverted(&self, a: EdgeId, b: EdgeId) -> bool {
        self.crossing_order.contains(&EdgePair::new(a, b))
    }

    pub fn crossing_order(&self) -> impl Iterator<Item = EdgePair> + '_ {
        self.crossing_order.iter().copied()
    }

    /// Whether `a` passes under `b`. By default the lower edge id is the
    /// under strand; an inverted pair flips that.
    pub fn resolve_under(&self, a: EdgeId, b: EdgeId) -> bool {
        (a < b) != self.is_inverted(a, b)
    }

    // Markers
    /// Toggles the base mark of a node, clearing its direction mark. Returns
    /// whether the node is now a base node.
    pub fn set_base(&mut self, id: NodeId) -> Result<bool, EditError> {
        if !self.has_node(id) {
            return Err(EditError::node(id));
        }
        let marked = toggle_marker(&mut self.base, &mut self.direction, id);
        self.bump();
        Ok(marked)
    }

    /// Toggles the direction mark of a node, clearing its base mark.
    pub fn set_direction(&mut self, id: NodeId) -> Result<bool, EditError> {
        if !self.has_node(id) {
            return Err(EditError::node(id));
        }
        let marked = toggle_marker(&mut self.direction, &mut self.base, id);
        self.bump();
        Ok(marked)
    }

    pub fn is_base(&self, id: NodeId) -> bool {
        self.base.contains(&id)
    }

    pub fn is_direction(&self, id: NodeId) -> bool {
        self.direction.contains(&id)
    }

    pub fn base_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.base.iter().copied()
    }

    pub fn direction_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.direction.iter().copied()
    }

    // Whole-diagram edits
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.degree.clear();
        self.crossing_order.clear();
        self.base.clear();
        self.direction.clear();
        self.bump();
    }

    /// Shifts every node; topology and crossings are unchanged. Refused,
    /// returning false, when any node would leave the coordinate bounds.
    pub fn translate(&mut self, dx: f32, dy: f32) -> bool {
        let fits = self
            .nodes
            .iter()
            .flatten()
            .all(|n| in_coord_bounds(n.x + dx) && in_coord_bounds(n.y + dy));
        if !fits || !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        for n in self.nodes.iter_mut().flatten() {
            n.x += dx;
            n.y += dy;
        }
        self.bump();
        true
    }

    /// Bounding box `(minx, miny, maxx, maxy)` of all nodes.
    pub fn view_box(&self) -> Option<(f32, f32, f32, f32)> {
        self.nodes.iter().flatten().fold(None, |acc, n| match acc {
            None => Some((n.x, n.y, n.x, n.y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(n.x), y0.min(n.y), x1.max(n.x), y1.max(n.y))),
        })
    }

    // Picking
    pub fn nearest_edges(&self, x: f32, y: f32, max_dist: f32) -> Vec<(EdgeId, f32)> {
        algorithms::picking::nearest_edges_impl(self, x, y, max_dist)
    }

    pub fn node_at(&self, x: f32, y: f32) -> Option<NodeId> {
        algorithms::picking::node_at_impl(self, x, y, self.config.node_radius)
    }

    // Compilation
    /// Nodes whose degree is not exactly 2.
    pub fn degree_check(&self) -> Vec<NodeId> {
        algorithms::components::degree_check(self)
    }

    pub fn connected_components(&self) -> Components {
        algorithms::components::connected_components(self)
    }

    pub fn validate(&self, components: &Components) -> Result<Vec<Markers>, CompileError> {
        algorithms::components::validate(self, components)
    }

    /// Compiles the diagram into its PD code.
    pub fn compile(&self) -> Result<Compilation, CompileError> {
        self.compile_inner().map_err(|e| {
            match &e {
                CompileError::Internal(inner) => error!(code = e.code(), "{inner}"),
                _ => warn!(code = e.code(), "{e}"),
            }
            e
        })
    }

    fn compile_inner(&self) -> Result<Compilation, CompileError> {
        let faulty = self.degree_check();
        if !faulty.is_empty() {
            return Err(CompileError::BadDegree { nodes: faulty });
        }
        let components = self.connected_components();
        let markers = self.validate(&components)?;
        let blocks = components
            .blocks
            .iter()
            .zip(&markers)
            .map(|(block, m)| algorithms::components::canonicalize(block, m.base, m.direction))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(components = blocks.len(), "components canonicalized");
        let segmentation = algorithms::crossings::segment(self, &blocks)?;
        let compilation = algorithms::pd_code::assemble(self, blocks, segmentation)?;
        Ok(compilation)
    }

    // JSON
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }

    /// Replaces the diagram with a document. On error the diagram is unchanged.
    pub fn from_json_value(&mut self, v: serde_json::Value) -> Result<(), DocumentError> {
        json::from_json_impl(self, v)
    }

    pub fn from_json_str(&mut self, s: &str) -> Result<(), DocumentError> {
        let v: serde_json::Value = serde_json::from_str(s)?;
        self.from_json_value(v)
    }
}

fn toggle_marker(set: &mut BTreeSet<NodeId>, other: &mut BTreeSet<NodeId>, id: NodeId) -> bool {
    if set.remove(&id) {
        false
    } else {
        set.insert(id);
        other.remove(&id);
        true
    }
}
