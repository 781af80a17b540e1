//! Connected components of the diagram and their traversal order.
//!
//! Once every node has degree 2 each component is a simple cycle. The base
//! and direction markers pick where that cycle starts and which way it runs.

use crate::error::{CompileError, InvariantError};
use crate::model::NodeId;
use crate::Diagram;

/// Adjacency lists plus the node sets of every component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Components {
    /// Neighbours of each node, indexed by node id (empty for free slots).
    pub adjacency: Vec<Vec<NodeId>>,
    /// Nodes of each component in discovery order.
    pub blocks: Vec<Vec<NodeId>>,
}

impl Components {
    pub fn neighbours(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(id as usize).map_or(&[], |v| v.as_slice())
    }

    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbours(a).contains(&b)
    }
}

/// The base and direction node of one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Markers {
    pub base: NodeId,
    pub direction: NodeId,
}

pub fn degree_check(g: &Diagram) -> Vec<NodeId> {
    g.node_ids()
        .filter(|&id| g.degree(id) != Some(2))
        .collect()
}

pub fn adjacency(g: &Diagram) -> Vec<Vec<NodeId>> {
    let mut adj = vec![Vec::new(); g.nodes.len()];
    for (_, e) in g.edge_entries() {
        adj[e.a as usize].push(e.b);
        adj[e.b as usize].push(e.a);
    }
    adj
}

/// Depth-first search from every unvisited node, in node id order.
pub fn connected_components(g: &Diagram) -> Components {
    let adjacency = adjacency(g);
    let mut visited = vec![false; g.nodes.len()];
    let mut blocks = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    for root in g.node_ids() {
        if visited[root as usize] {
            continue;
        }
        let mut block = Vec::new();
        stack.push(root);
        while let Some(n) = stack.pop() {
            if visited[n as usize] {
                continue;
            }
            visited[n as usize] = true;
            block.push(n);
            // Reversed so the first neighbour is explored first.
            for &next in adjacency[n as usize].iter().rev() {
                if !visited[next as usize] {
                    stack.push(next);
                }
            }
        }
        blocks.push(block);
    }
    Components { adjacency, blocks }
}

/// Checks that every component carries exactly one base and one direction
/// node and that the two are adjacent.
pub fn validate(g: &Diagram, components: &Components) -> Result<Vec<Markers>, CompileError> {
    let count = g.node_count() as usize;
    if count <= 2 {
        return Err(CompileError::TooFewNodes { count });
    }
    let mut markers = Vec::with_capacity(components.blocks.len());
    for block in &components.blocks {
        let Some(&representative) = block.first() else {
            continue;
        };
        let bases: Vec<NodeId> = block.iter().copied().filter(|&n| g.is_base(n)).collect();
        let directions: Vec<NodeId> = block.iter().copied().filter(|&n| g.is_direction(n)).collect();
        match bases.len() {
            0 => return Err(CompileError::MissingBase { representative }),
            1 => {}
            _ => return Err(CompileError::DuplicateBase { representative, marked: bases }),
        }
        match directions.len() {
            0 => return Err(CompileError::MissingDirection { representative }),
            1 => {}
            _ => {
                return Err(CompileError::DuplicateDirection { representative, marked: directions })
            }
        }
        let (base, direction) = (bases[0], directions[0]);
        if !components.are_adjacent(base, direction) {
            return Err(CompileError::NotAdjacent { base, direction });
        }
        markers.push(Markers { base, direction });
    }
    Ok(markers)
}

/// Rotates a cycle so it starts at `base` and continues through `direction`.
pub fn canonicalize(block: &[NodeId], base: NodeId, direction: NodeId) -> Result<Vec<NodeId>, InvariantError> {
    let misaligned = InvariantError::DirectionNotAligned { base, direction };
    let start = block.iter().position(|&n| n == base).ok_or(misaligned.clone())?;
    let mut order = block.to_vec();
    order.rotate_left(start);
    if order.get(1) != Some(&direction) {
        // Walk the other way round: base stays first, the rest reverses.
        order[1..].reverse();
    }
    if order.get(1) != Some(&direction) {
        return Err(misaligned);
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon(g: &mut Diagram, pts: &[(f32, f32)]) -> Vec<NodeId> {
        let ids: Vec<NodeId> = pts.iter().map(|&(x, y)| g.add_node(x, y).unwrap()).collect();
        for i in 0..ids.len() {
            g.add_edge(ids[i], ids[(i + 1) % ids.len()]).unwrap();
        }
        ids
    }

    #[test]
    fn dfs_follows_the_cycle() {
        let mut g = Diagram::new();
        let ids = polygon(&mut g, &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
        let c = connected_components(&g);
        assert_eq!(c.blocks, vec![ids.clone()]);
        assert!(c.are_adjacent(ids[0], ids[3]));
        assert!(!c.are_adjacent(ids[0], ids[2]));
    }

    #[test]
    fn components_partition_nodes() {
        let mut g = Diagram::new();
        let a = polygon(&mut g, &[(0.0, 0.0), (50.0, 0.0), (25.0, 40.0)]);
        let b = polygon(&mut g, &[(200.0, 0.0), (250.0, 0.0), (225.0, 40.0)]);
        let lone = g.add_node(500.0, 500.0).unwrap();
        let c = connected_components(&g);
        assert_eq!(c.blocks, vec![a, b, vec![lone]]);
    }

    #[test]
    fn canonicalize_rotates_and_reverses() {
        let block = vec![4, 7, 1, 9, 3];
        assert_eq!(canonicalize(&block, 1, 9).unwrap(), vec![1, 9, 3, 4, 7]);
        assert_eq!(canonicalize(&block, 1, 7).unwrap(), vec![1, 7, 4, 3, 9]);
        assert_eq!(canonicalize(&block, 4, 3).unwrap(), vec![4, 3, 9, 1, 7]);
        assert_eq!(
            canonicalize(&block, 4, 1),
            Err(InvariantError::DirectionNotAligned { base: 4, direction: 1 })
        );
    }

    #[test]
    fn validate_reports_marker_problems() {
        let mut g = Diagram::new();
        let ids = polygon(&mut g, &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
        let c = connected_components(&g);
        assert_eq!(validate(&g, &c), Err(CompileError::MissingBase { representative: ids[0] }));

        g.set_base(ids[0]).unwrap();
        assert_eq!(validate(&g, &c), Err(CompileError::MissingDirection { representative: ids[0] }));

        g.set_direction(ids[2]).unwrap();
        assert_eq!(validate(&g, &c), Err(CompileError::NotAdjacent { base: ids[0], direction: ids[2] }));

        g.set_direction(ids[1]).unwrap();
        assert_eq!(
            validate(&g, &c),
            Err(CompileError::DuplicateDirection { representative: ids[0], marked: vec![ids[1], ids[2]] })
        );

        g.set_direction(ids[2]).unwrap();
        assert_eq!(validate(&g, &c), Ok(vec![Markers { base: ids[0], direction: ids[1] }]));

        g.set_base(ids[3]).unwrap();
        assert_eq!(
            validate(&g, &c),
            Err(CompileError::DuplicateBase { representative: ids[0], marked: vec![ids[0], ids[3]] })
        );
    }

    #[test]
    fn validate_needs_three_nodes() {
        let mut g = Diagram::new();
        g.add_node(0.0, 0.0).unwrap();
        g.add_node(100.0, 0.0).unwrap();
        let c = connected_components(&g);
        assert_eq!(validate(&g, &c), Err(CompileError::TooFewNodes { count: 2 }));
    }
}
