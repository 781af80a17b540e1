use knotpd::{Diagram, DiagramConfig, DocumentError, EditError};
use serde_json::json;

fn trefoil_doc() -> serde_json::Value {
    json!({
        "version": 1,
        "nodes": [
            {"id": 0, "x": 257.0, "y": 172.0},
            {"id": 1, "x": 274.0, "y": 281.0},
            {"id": 2, "x": 147.0, "y": 165.0},
            {"id": 3, "x": 233.0, "y": 96.0},
            {"id": 4, "x": 196.0, "y": 263.0},
            {"id": 5, "x": 93.0, "y": 223.0}
        ],
        "edges": [
            {"id": 0, "a": 0, "b": 1},
            {"id": 1, "a": 1, "b": 2},
            {"id": 2, "a": 2, "b": 3},
            {"id": 3, "a": 3, "b": 4},
            {"id": 4, "a": 4, "b": 5},
            {"id": 5, "a": 5, "b": 0}
        ],
        "crossing_order": [[3, 1]],
        "base": [0],
        "direction": [1]
    })
}

#[test]
fn loaded_document_compiles() {
    let mut g = Diagram::new();
    g.from_json_value(trefoil_doc()).unwrap();
    assert!(g.is_inverted(1, 3));
    let c = g.compile().unwrap();
    assert_eq!(c.pd_code, vec![[2, 6, 3, 5], [3, 6, 4, 1], [4, 2, 5, 1]]);
}

#[test]
fn save_then_load_keeps_diagram() {
    let mut g = Diagram::new();
    g.from_json_value(trefoil_doc()).unwrap();
    let saved = g.to_json_value();
    let mut h = Diagram::new();
    h.from_json_str(&saved.to_string()).unwrap();
    assert_eq!(h.to_json_value(), saved);
    assert_eq!(h.compile().unwrap().pd_code, g.compile().unwrap().pd_code);
}

#[test]
fn refused_edits_keep_document_loadable() {
    let mut g = Diagram::new();
    g.from_json_value(trefoil_doc()).unwrap();
    assert_eq!(g.add_node(f32::NAN, 0.0).unwrap_err().code(), "out_of_bounds");
    assert!(matches!(g.add_node(0.0, 2.0e7), Err(EditError::OutOfBounds { .. })));
    assert!(g.split_edge(0, f32::INFINITY, 0.0).is_err());
    assert_eq!(g.edge(0), Some((0, 1)));

    let far = g.add_node(9.0e6, 0.0).unwrap();
    assert!(!g.translate(5.0e6, 0.0));
    assert!(!g.move_node(far, 1.0e8, 0.0));
    assert_eq!(g.get_node(far), Some((9.0e6, 0.0)));
    assert_eq!(g.node_count(), 7);

    let saved = g.to_json_value();
    let mut h = Diagram::new();
    h.from_json_str(&saved.to_string()).unwrap();
    assert_eq!(h.to_json_value(), saved);
}

#[test]
fn load_keeps_config() {
    let cfg = DiagramConfig { node_radius: 20.0, ..DiagramConfig::default() };
    let mut g = Diagram::with_config(cfg.clone());
    g.from_json_value(trefoil_doc()).unwrap();
    assert_eq!(g.config(), &cfg);
}

#[test]
fn rejects_bad_references() {
    let mut g = Diagram::new();
    let mut doc = trefoil_doc();
    doc["edges"][2]["b"] = json!(9);
    let err = g.from_json_value(doc).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidRef { kind: "edge", id: 2, .. }));

    let mut doc = trefoil_doc();
    doc["edges"][2]["b"] = json!(2);
    assert_eq!(g.from_json_value(doc).unwrap_err().code(), "invalid_ref");

    let mut doc = trefoil_doc();
    doc["edges"][5] = json!({"id": 6, "a": 1, "b": 0});
    assert_eq!(g.from_json_value(doc).unwrap_err().code(), "invalid_ref");

    let mut doc = trefoil_doc();
    doc["crossing_order"] = json!([[1, 8]]);
    assert_eq!(g.from_json_value(doc).unwrap_err().code(), "invalid_ref");

    let mut doc = trefoil_doc();
    doc["direction"] = json!([0]);
    assert_eq!(g.from_json_value(doc).unwrap_err().code(), "invalid_ref");

    assert_eq!(g.node_count(), 0);
}

#[test]
fn rejects_out_of_range_coordinates() {
    let mut g = Diagram::new();
    let mut doc = trefoil_doc();
    doc["nodes"][4]["x"] = json!(1.0e30);
    assert!(matches!(g.from_json_value(doc), Err(DocumentError::NonFinite(4))));
}

#[test]
fn rejects_other_versions_and_garbage() {
    let mut g = Diagram::new();
    let mut doc = trefoil_doc();
    doc["version"] = json!(2);
    assert!(matches!(g.from_json_value(doc), Err(DocumentError::Version(2))));
    assert_eq!(g.from_json_str("{\"nodes\": 3}").unwrap_err().code(), "parse");
    assert_eq!(g.from_json_str("not json").unwrap_err().code(), "parse");
}

#[test]
fn json_caps_exceeded_nodes() {
    let mut g = Diagram::new();
    let too_many = 200_001usize;
    let nodes: Vec<_> = (0..too_many)
        .map(|i| json!({"id": i, "x": 0.0, "y": 0.0}))
        .collect();
    let v = json!({"version": 1, "nodes": nodes, "edges": []});
    assert!(matches!(g.from_json_value(v), Err(DocumentError::Limit { what: "node" })));
}

#[test]
fn config_from_json() {
    let cfg = DiagramConfig::from_json_str(r#"{"node_radius": 10, "svg": {"number_color": "blue"}}"#).unwrap();
    assert_eq!(cfg.node_radius, 10.0);
    assert_eq!(cfg.line_width, 8.0);
    assert_eq!(cfg.svg.number_color, "blue");
    assert_eq!(cfg.svg.stroke_width, 3);
    assert_eq!(cfg.min_node_spacing(), 21.0);
}
