use wasm_bindgen::prelude::*;
use knotpd::{CompileError, DocumentError, EditError};
use crate::interop::{new_obj, set_kv, arr_u32};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

pub fn edit(e: &EditError) -> JsValue {
    match e {
        EditError::InvalidId { kind, id } => invalid_id(kind, *id),
        EditError::SelfLoop(n) => {
            let d = new_obj(); set_kv(&d, "node", &JsValue::from_f64(*n as f64));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        EditError::SameEdge(id) => {
            let d = new_obj(); set_kv(&d, "edge", &JsValue::from_f64(*id as f64));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        EditError::OutOfBounds { x, y } => {
            let d = new_obj();
            set_kv(&d, "x", &JsValue::from_f64(*x as f64));
            set_kv(&d, "y", &JsValue::from_f64(*y as f64));
            err(e.code(), e.to_string(), Some(d.into()))
        }
    }
}

// `data.nodes` lists the nodes a front-end should highlight.
pub fn compile(e: &CompileError) -> JsValue {
    let d = new_obj();
    set_kv(&d, "nodes", &arr_u32(&e.flagged_nodes()).into());
    set_kv(&d, "internal", &JsValue::from_bool(!e.is_user_error()));
    err(e.code(), e.to_string(), Some(d.into()))
}

pub fn document(e: &DocumentError) -> JsValue {
    err(e.code(), e.to_string(), None)
}
