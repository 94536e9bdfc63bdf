//! Browser smoke tests, run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use radial_tree_wasm::RadialTreeWasm;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn path5() -> RadialTreeWasm {
    RadialTreeWasm::from_edge_list("5\n0 1\n1 2\n2 3\n3 4\n").ok().unwrap()
}

#[wasm_bindgen_test]
fn test_positions_are_interleaved() {
    let viewer = path5();
    let positions = viewer.positions().to_vec();
    assert_eq!(positions.len(), 10);
    assert_eq!(&positions[4..6], &[400.0, 300.0]);
    assert_eq!(viewer.target_positions().to_vec(), positions);
}

#[wasm_bindgen_test]
fn test_invalid_edge_list_is_js_error() {
    assert!(RadialTreeWasm::from_edge_list("3\n0 1\n1 0\n").is_err());
    assert!(RadialTreeWasm::from_edges(3, &[0, 1, 1]).is_err());

    let mut viewer = path5();
    assert!(viewer.load_edge_list("2\n0 0\n").is_err());
    assert_eq!(viewer.vertex_count(), 5);
}

#[wasm_bindgen_test]
fn test_snapshot_and_wedges_serialize() {
    let viewer = path5();
    let wedges = viewer.framework_wedges().ok().unwrap();
    assert!(js_sys::Array::is_array(&wedges));
    assert_eq!(js_sys::Array::from(&wedges).length(), 4);

    let snapshot = viewer.layout_snapshot().ok().unwrap();
    let delta = js_sys::Reflect::get(&snapshot, &JsValue::from_str("delta")).unwrap();
    assert_eq!(delta.as_f64(), Some(50.0));
}

#[wasm_bindgen_test]
fn test_partial_config() {
    let config = js_sys::JSON::parse(r#"{"layout":{"delta":20}}"#).unwrap();
    let viewer = RadialTreeWasm::with_config("3\n0 1\n1 2\n", config).ok().unwrap();
    assert_eq!(viewer.delta(), 20.0);

    let defaults = RadialTreeWasm::with_config("1", JsValue::UNDEFINED).ok().unwrap();
    assert_eq!(defaults.delta(), 50.0);
}
