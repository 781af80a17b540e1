use knotpd::Diagram;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Debug)]
enum Op {
    AddNode { x: i16, y: i16 },
    MoveNode { idx: u16, dx: i8, dy: i8 },
    RemoveNode { idx: u16 },
    AddEdge { a: u16, b: u16 },
    RemoveEdge { idx: u16 },
    SplitEdge { idx: u16 },
    Toggle { a: u16, b: u16 },
    SetBase { idx: u16 },
    SetDirection { idx: u16 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::AddNode { x, y }),
        (any::<u16>(), any::<i8>(), any::<i8>()).prop_map(|(idx, dx, dy)| Op::MoveNode { idx, dx, dy }),
        any::<u16>().prop_map(|idx| Op::RemoveNode { idx }),
        (any::<u16>(), any::<u16>()).prop_map(|(a, b)| Op::AddEdge { a, b }),
        any::<u16>().prop_map(|idx| Op::RemoveEdge { idx }),
        any::<u16>().prop_map(|idx| Op::SplitEdge { idx }),
        (any::<u16>(), any::<u16>()).prop_map(|(a, b)| Op::Toggle { a, b }),
        any::<u16>().prop_map(|idx| Op::SetBase { idx }),
        any::<u16>().prop_map(|idx| Op::SetDirection { idx }),
    ]
}

fn pick(ids: &[u32], idx: u16) -> Option<u32> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[idx as usize % ids.len()])
    }
}

fn apply_op(g: &mut Diagram, op: Op) {
    let nodes: Vec<u32> = g.node_ids().collect();
    let edges: Vec<u32> = g.edge_ids().collect();
    match op {
        Op::AddNode { x, y } => {
            g.add_node(x as f32 * 0.5, y as f32 * 0.5).unwrap();
        }
        Op::MoveNode { idx, dx, dy } => {
            let Some(n) = pick(&nodes, idx) else { return };
            if let Some((x, y)) = g.get_node(n) {
                let _ = g.move_node(n, x + dx as f32, y + dy as f32);
            }
        }
        Op::RemoveNode { idx } => {
            if let Some(n) = pick(&nodes, idx) {
                g.remove_node(n);
            }
        }
        Op::AddEdge { a, b } => {
            if let (Some(a), Some(b)) = (pick(&nodes, a), pick(&nodes, b)) {
                let _ = g.add_edge(a, b);
            }
        }
        Op::RemoveEdge { idx } => {
            if let Some(e) = pick(&edges, idx) {
                g.remove_edge(e);
            }
        }
        Op::SplitEdge { idx } => {
            let Some(e) = pick(&edges, idx) else { return };
            if let Some((a, b)) = g.edge(e) {
                let (ax, ay) = g.get_node(a).unwrap();
                let (bx, by) = g.get_node(b).unwrap();
                g.split_edge(e, (ax + bx) / 2.0, (ay + by) / 2.0).unwrap();
            }
        }
        Op::Toggle { a, b } => {
            if let (Some(a), Some(b)) = (pick(&edges, a), pick(&edges, b)) {
                let _ = g.toggle_crossing_order(a, b);
            }
        }
        Op::SetBase { idx } => {
            if let Some(n) = pick(&nodes, idx) {
                g.set_base(n).unwrap();
            }
        }
        Op::SetDirection { idx } => {
            if let Some(n) = pick(&nodes, idx) {
                g.set_direction(n).unwrap();
            }
        }
    }
}

fn assert_invariants(g: &Diagram) {
    let mut incident: HashMap<u32, u32> = HashMap::new();
    let mut pairs = BTreeSet::new();
    for e in g.edge_ids() {
        let (a, b) = g.edge(e).unwrap();
        assert!(g.has_node(a) && g.has_node(b), "edge {e} has a dangling endpoint");
        assert!(a < b, "edge {e} is not normalized");
        assert!(pairs.insert((a, b)), "edge {e} duplicates another edge");
        *incident.entry(a).or_default() += 1;
        *incident.entry(b).or_default() += 1;
    }
    for n in g.node_ids() {
        assert_eq!(g.degree(n), Some(incident.get(&n).copied().unwrap_or(0)), "degree of node {n}");
    }
    for p in g.crossing_order() {
        assert!(p.0 < p.1);
        assert!(g.edge(p.0).is_some() && g.edge(p.1).is_some(), "stale pair {p:?}");
    }
    for n in g.base_nodes() {
        assert!(g.has_node(n));
        assert!(!g.is_direction(n));
    }
    for n in g.direction_nodes() {
        assert!(g.has_node(n));
    }
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 5..40)
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn star(n: usize, k: usize) -> Diagram {
    let mut g = Diagram::new();
    let r = 30.0 * n as f32;
    let ids: Vec<u32> = (0..n)
        .map(|i| {
            let a = i as f32 * std::f32::consts::TAU / n as f32;
            g.add_node(r * a.cos(), r * a.sin()).unwrap()
        })
        .collect();
    for i in 0..n {
        g.add_edge(ids[i], ids[(i + k) % n]).unwrap();
    }
    g.set_base(ids[0]).unwrap();
    g.set_direction(ids[k]).unwrap();
    g
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 2_000, .. ProptestConfig::default() })]
    #[test]
    fn diagram_edit_invariants(seq in sequence_strategy()) {
        let mut g = Diagram::new();
        for op in seq {
            apply_op(&mut g, op);
        }
        assert_invariants(&g);
    }

    #[test]
    fn double_toggle_restores(seq in sequence_strategy(), a in any::<u16>(), b in any::<u16>()) {
        let mut g = Diagram::new();
        for op in seq {
            apply_op(&mut g, op);
        }
        let edges: Vec<u32> = g.edge_ids().collect();
        let (Some(a), Some(b)) = (pick(&edges, a), pick(&edges, b)) else { return Ok(()) };
        prop_assume!(a != b);
        let before = g.resolve_under(a, b);
        prop_assert_eq!(g.resolve_under(b, a), !before);
        g.toggle_crossing_order(a, b).unwrap();
        prop_assert_eq!(g.resolve_under(a, b), !before);
        g.toggle_crossing_order(b, a).unwrap();
        prop_assert_eq!(g.resolve_under(a, b), before);
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn star_compiles_deterministically(n in 5usize..40, k in 2usize..8) {
        prop_assume!(k < n / 2 && gcd(n, k) == 1);
        let g = star(n, k);
        let first = g.compile().unwrap();
        let second = g.compile().unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.crossing_count(), n * (k - 1));
        let mut seen: HashMap<u32, usize> = HashMap::new();
        for t in &first.pd_code {
            for &l in t {
                *seen.entry(l).or_default() += 1;
            }
        }
        prop_assert_eq!(seen.len(), 2 * n * (k - 1));
        prop_assert!(seen.values().all(|&c| c == 2));
        let mut sorted = first.pd_code.clone();
        sorted.sort();
        prop_assert_eq!(sorted, first.pd_code);
    }
}
