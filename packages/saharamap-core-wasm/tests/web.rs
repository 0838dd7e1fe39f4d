// Boundary tests for the exported functions. Run with `wasm-pack test --node`.
#![cfg(target_arch = "wasm32")]

use saharamap_core_wasm::{
    build_inverse_mask, compute_bounds, expand_bounds, install_region, is_in_region,
    needs_reprojection, query_point, to_geographic, toggle_basemap,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

const SQUARE: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": { "NAME": "Square" },
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]]]
        }
    }]
}"#;

#[wasm_bindgen_test]
fn pure_exports() {
    assert!(needs_reprojection(2_000_000.0, 0.0));
    assert!(!needs_reprojection(15.0, 20.0));

    let p = to_geographic(20037508.34, 0.0);
    assert!((p[0] - 180.0).abs() < 1e-6);

    assert!(is_in_region(2.0, 2.0, SQUARE).unwrap());
    assert!(!is_in_region(10.0, 10.0, SQUARE).unwrap());

    let mask: serde_json::Value = serde_json::from_str(&build_inverse_mask(SQUARE).unwrap()).unwrap();
    assert_eq!(
        mask["features"][0]["geometry"]["coordinates"].as_array().unwrap().len(),
        2
    );
}

#[wasm_bindgen_test]
fn bounds_round_trip_through_js_objects() {
    let bounds = compute_bounds(SQUARE).unwrap();
    let expanded = expand_bounds(bounds, 9.0).unwrap();
    let value: serde_json::Value = serde_wasm_bindgen::from_value(expanded).unwrap();
    assert_eq!(value["west"], -9.0);
    assert_eq!(value["north"], 13.0);
}

#[wasm_bindgen_test]
fn rejects_bad_geojson() {
    assert!(is_in_region(0.0, 0.0, "not json").is_err());
    assert!(expand_bounds(JsValue::NULL, 1.0).is_err());
}

#[wasm_bindgen_test]
fn session_install_query_and_toggle() {
    let ops = install_region(SQUARE).unwrap();
    assert!(js_sys::Array::is_array(&ops));

    let answer: serde_json::Value = serde_wasm_bindgen::from_value(query_point(1.0, 1.0).unwrap()).unwrap();
    assert_eq!(answer["inside"], true);
    assert_eq!(answer["info"][0]["value"], "Square");

    let toggled: serde_json::Value = serde_wasm_bindgen::from_value(toggle_basemap().unwrap()).unwrap();
    assert_eq!(toggled[0]["op"], "removeLayer");
}
