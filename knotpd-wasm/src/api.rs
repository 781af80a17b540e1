use crate::Diagram;
use knotpd::svg::{render, SvgOptions};
use knotpd::{Compilation, CompileError, DiagramConfig};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop::{arr_f32, arr_u32, new_obj, set_kv, to_js};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// {pd_code, entries, arcs}: sorted tuples, per-crossing display data and the
// arc count of every component.
fn compilation_value(c: &Compilation) -> JsValue {
    let obj = new_obj();
    set_kv(&obj, "pd_code", &to_js(&c.pd_code));
    set_kv(&obj, "entries", &to_js(&c.entries));
    let arcs: Vec<u32> = c.arcs_per_component().into_iter().map(|n| n as u32).collect();
    set_kv(&obj, "arcs", &arr_u32(&arcs).into());
    obj.into()
}

#[wasm_bindgen]
impl Diagram {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Diagram {
        crate::Diagram::rs_new()
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }

    // Nodes/Edges basic
    pub fn add_node(&mut self, x: f32, y: f32) -> Option<u32> {
        self.inner.add_node(x, y).ok()
    }
    pub fn add_node_res(&mut self, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        match self.inner.add_node(x, y) {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::edit(&e),
        }
    }
    pub fn move_node(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.inner.move_node(id, x, y)
    }
    pub fn move_node_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if !self.inner.has_node(id) {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.inner.move_node(id, x, y)))
    }
    pub fn get_node(&self, id: u32) -> JsValue {
        match self.inner.get_node(id) {
            Some((x, y)) => to_js(&[x, y]),
            None => JsValue::NULL,
        }
    }
    pub fn get_node_res(&self, id: u32) -> JsValue {
        match self.inner.get_node(id) {
            Some((x, y)) => error::ok(to_js(&[x, y])),
            None => error::invalid_id("node", id),
        }
    }
    pub fn remove_node(&mut self, id: u32) -> bool {
        self.inner.remove_node(id)
    }
    pub fn remove_node_res(&mut self, id: u32) -> JsValue {
        if !self.inner.has_node(id) {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.inner.remove_node(id)))
    }
    pub fn node_count(&self) -> u32 {
        self.inner.node_count()
    }
    pub fn add_edge(&mut self, a: u32, b: u32) -> Option<u32> {
        self.inner.add_edge(a, b).ok()
    }
    pub fn add_edge_res(&mut self, a: u32, b: u32) -> JsValue {
        match self.inner.add_edge(a, b) {
            Ok(eid) => error::ok(JsValue::from_f64(eid as f64)),
            Err(e) => error::edit(&e),
        }
    }
    pub fn remove_edge(&mut self, id: u32) -> bool {
        self.inner.remove_edge(id)
    }
    pub fn remove_edge_res(&mut self, id: u32) -> JsValue {
        if self.inner.edge(id).is_none() {
            return error::invalid_id("edge", id);
        }
        error::ok(JsValue::from_bool(self.inner.remove_edge(id)))
    }
    pub fn split_edge(&mut self, id: u32, x: f32, y: f32) -> Option<u32> {
        self.inner.split_edge(id, x, y).ok()
    }
    pub fn split_edge_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        match self.inner.split_edge(id, x, y) {
            Ok(n) => error::ok(JsValue::from_f64(n as f64)),
            Err(e) => error::edit(&e),
        }
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.edge_count()
    }

    // Crossing order and markers
    pub fn toggle_crossing_order(&mut self, a: u32, b: u32) -> Option<bool> {
        self.inner.toggle_crossing_order(a, b).ok()
    }
    pub fn toggle_crossing_order_res(&mut self, a: u32, b: u32) -> JsValue {
        match self.inner.toggle_crossing_order(a, b) {
            Ok(inverted) => error::ok(JsValue::from_bool(inverted)),
            Err(e) => error::edit(&e),
        }
    }
    pub fn is_inverted(&self, a: u32, b: u32) -> bool {
        self.inner.is_inverted(a, b)
    }
    pub fn set_base_res(&mut self, id: u32) -> JsValue {
        match self.inner.set_base(id) {
            Ok(marked) => error::ok(JsValue::from_bool(marked)),
            Err(e) => error::edit(&e),
        }
    }
    pub fn set_direction_res(&mut self, id: u32) -> JsValue {
        match self.inner.set_direction(id) {
            Ok(marked) => error::ok(JsValue::from_bool(marked)),
            Err(e) => error::edit(&e),
        }
    }

    // Typed arrays getters
    pub fn get_node_data(&self) -> JsValue {
        let mut ids = Vec::new();
        let mut pos = Vec::new();
        for id in self.inner.node_ids() {
            if let Some((x, y)) = self.inner.get_node(id) {
                ids.push(id);
                pos.push(x);
                pos.push(y);
            }
        }
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "positions", &arr_f32(&pos).into());
        obj.into()
    }
    pub fn get_edge_data(&self) -> JsValue {
        let mut ids = Vec::new();
        let mut endpoints = Vec::new();
        for id in self.inner.edge_ids() {
            if let Some((a, b)) = self.inner.edge(id) {
                ids.push(id);
                endpoints.push(a);
                endpoints.push(b);
            }
        }
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "endpoints", &arr_u32(&endpoints).into());
        obj.into()
    }
    pub fn get_markers(&self) -> JsValue {
        let base: Vec<u32> = self.inner.base_nodes().collect();
        let direction: Vec<u32> = self.inner.direction_nodes().collect();
        let obj = new_obj();
        set_kv(&obj, "base", &arr_u32(&base).into());
        set_kv(&obj, "direction", &arr_u32(&direction).into());
        obj.into()
    }

    // Picking
    pub fn node_at(&self, x: f32, y: f32) -> Option<u32> {
        self.inner.node_at(x, y)
    }
    /// Edges near the point, nearest first: `{ids, distances}`.
    pub fn nearest_edges(&self, x: f32, y: f32) -> JsValue {
        let tol = self.inner.config().pick_tolerance();
        let hits = self.inner.nearest_edges(x, y, tol);
        let ids: Vec<u32> = hits.iter().map(|h| h.0).collect();
        let dist: Vec<f32> = hits.iter().map(|h| h.1).collect();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "distances", &arr_f32(&dist).into());
        obj.into()
    }

    // Whole diagram
    pub fn translate(&mut self, dx: f32, dy: f32) -> bool {
        self.inner.translate(dx, dy)
    }
    pub fn view_box(&self) -> JsValue {
        match self.inner.view_box() {
            Some((x0, y0, x1, y1)) => to_js(&[x0, y0, x1, y1]),
            None => JsValue::NULL,
        }
    }
    pub fn clear(&mut self) {
        self.inner.clear();
    }
    pub fn set_config_res(&mut self, json: &str) -> JsValue {
        match DiagramConfig::from_json_str(json) {
            Ok(cfg) => {
                self.inner.set_config(cfg);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::err("parse", e.to_string(), None),
        }
    }

    // Compile and export
    pub fn compile(&self) -> JsValue {
        match self.inner.compile() {
            Ok(c) => compilation_value(&c),
            Err(_) => JsValue::NULL,
        }
    }
    pub fn compile_res(&self) -> JsValue {
        match self.inner.compile() {
            Ok(c) => error::ok(compilation_value(&c)),
            Err(e) => error::compile(&e),
        }
    }
    pub fn to_svg(&self, numbers: bool, arrows: bool) -> Option<String> {
        match self.to_svg_inner(numbers, arrows) {
            Ok(s) => Some(s),
            Err(_) => None,
        }
    }
    pub fn to_svg_res(&self, numbers: bool, arrows: bool) -> JsValue {
        match self.to_svg_inner(numbers, arrows) {
            Ok(s) => error::ok(JsValue::from_str(&s)),
            Err(e) => e,
        }
    }

    // JSON
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_json_value())
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => self.inner.from_json_value(val).is_ok(),
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match self.inner.from_json_value(val) {
                Ok(()) => error::ok(JsValue::TRUE),
                Err(e) => error::document(&e),
            },
            Err(e) => error::err("parse", format!("{}", e), None),
        }
    }
}

impl Diagram {
    fn to_svg_inner(&self, numbers: bool, arrows: bool) -> Result<String, JsValue> {
        let c = self.inner.compile().map_err(|e| error::compile(&e))?;
        let options = SvgOptions { numbers, arrows };
        render(&self.inner, &c, &options, self.inner.config())
            .map_err(|e| error::compile(&CompileError::from(e)))
    }
}
