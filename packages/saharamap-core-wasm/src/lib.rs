use serde::Serialize;
use wasm_bindgen::prelude::*;

// Create a console module for logging
pub mod console;
// Errors crossing the wasm boundary
pub mod error;
// GeoJSON document model
pub mod geojson;
// Ring orientation
pub mod winding;
// Spherical-Mercator to geographic conversion
pub mod reproject;
// Inverse world mask
pub mod mask;
// Point-in-region queries
pub mod containment;
// Region bounds and margins
pub mod bounds;
// Raster overlay georeferencing
pub mod raster_overlay;
// Info panel rows
pub mod feature_info;
// Map configuration
pub mod config;
// Basemap switcher and initial style
pub mod basemap;
// Shell operation plans
pub mod layer_state;
// Normalized region + mask bundle
pub mod region;
// Per-view session state
pub mod session;
// Async document loaders
mod loader;

use config::MapConfig;
use geojson::{FeatureCollection, Position};
use session::SessionState;

pub use loader::{load_raster_overlay, load_region};

// Enable better panic messages in console during development
#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

#[wasm_bindgen]
extern "C" {
    // JavaScript helper resolving to { ok, status, statusText, text }
    #[wasm_bindgen(js_namespace = wasmJsHelpers, js_name = fetchText, catch)]
    pub fn fetch_text(url: &str) -> Result<js_sys::Promise, JsValue>;
}

#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => ($crate::console::log(&format!($($t)*)))
}

#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => ($crate::console::warn(&format!($($t)*)))
}

#[macro_export]
macro_rules! console_error {
    ($($t:tt)*) => ($crate::console::error(&format!($($t)*)))
}

use std::sync::Once;
static INIT: Once = Once::new();

#[wasm_bindgen(start)]
pub fn start() {
    INIT.call_once(|| {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        console_log!("Sahara map core initialized");
    });
}

// Plain JS objects rather than Maps, so the shell can hand results straight
// to maplibre.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

fn parse_collection(geojson_str: &str) -> Result<FeatureCollection, JsValue> {
    FeatureCollection::from_json_str(geojson_str).map_err(|e| {
        console_warn!("Rejected GeoJSON input: {}", e);
        JsValue::from(e)
    })
}

/// Replace the session configuration. `undefined` restores the defaults.
#[wasm_bindgen]
pub fn configure(config: JsValue) -> Result<(), JsValue> {
    let config = MapConfig::from_js(config)?;
    SessionState::with_mut(|state| state.configure(config));
    Ok(())
}

/// Style, center and zoom limits for constructing the map.
#[wasm_bindgen]
pub fn initial_view() -> Result<JsValue, JsValue> {
    let view = SessionState::with(|state| basemap::initial_view(&state.config));
    to_js(&view)
}

#[wasm_bindgen]
pub fn needs_reprojection(x: f64, y: f64) -> bool {
    reproject::needs_reprojection(Position::new(x, y))
}

/// `[lng, lat]` for a spherical-Mercator coordinate in meters.
#[wasm_bindgen]
pub fn to_geographic(x: f64, y: f64) -> Vec<f64> {
    let p = reproject::to_geographic(Position::new(x, y));
    vec![p.x(), p.y()]
}

/// Reproject every coordinate regardless of the detected projection.
#[wasm_bindgen]
pub fn reproject_geojson(geojson_str: &str) -> Result<String, JsValue> {
    let collection = parse_collection(geojson_str)?;
    Ok(reproject::reproject(&collection).to_json_string()?)
}

/// Reproject only when the sampled coordinate is out of degree range.
#[wasm_bindgen]
pub fn normalize_geojson(geojson_str: &str) -> Result<String, JsValue> {
    let collection = parse_collection(geojson_str)?;
    Ok(reproject::normalize(&collection).to_json_string()?)
}

/// Inverse mask of a geographic region as a one-feature collection.
#[wasm_bindgen]
pub fn build_inverse_mask(geojson_str: &str) -> Result<String, JsValue> {
    let collection = parse_collection(geojson_str)?;
    Ok(mask::build_inverse_mask_collection(&collection).to_json_string()?)
}

#[wasm_bindgen]
pub fn is_in_region(lng: f64, lat: f64, geojson_str: &str) -> Result<bool, JsValue> {
    let collection = parse_collection(geojson_str)?;
    Ok(containment::is_in_region(Position::new(lng, lat), &collection))
}

/// `{ west, south, east, north }`, or `null` when the collection is empty.
#[wasm_bindgen]
pub fn compute_bounds(geojson_str: &str) -> Result<JsValue, JsValue> {
    let collection = parse_collection(geojson_str)?;
    to_js(&bounds::compute_bounds(&collection))
}

#[wasm_bindgen]
pub fn expand_bounds(bounds_js: JsValue, margin: f64) -> Result<JsValue, JsValue> {
    let bounds: bounds::Bounds = serde_wasm_bindgen::from_value(bounds_js)?;
    to_js(&bounds::expand(bounds, margin))
}

/// Install an already-fetched region document. Returns the shell operations.
#[wasm_bindgen]
pub fn install_region(geojson_str: &str) -> Result<JsValue, JsValue> {
    match SessionState::with_mut(|state| state.install_region(geojson_str)) {
        Ok(ops) => to_js(&ops),
        Err(e) => {
            console_error!("Error loading region data: {}", e);
            Err(e.into())
        }
    }
}

/// Install an already-fetched raster descriptor.
#[wasm_bindgen]
pub fn install_raster(descriptor_str: &str) -> Result<JsValue, JsValue> {
    let ops = SessionState::with_mut(|state| state.install_raster(descriptor_str))?;
    to_js(&ops)
}

/// Click query against the installed region: `{ inside, info }`.
#[wasm_bindgen]
pub fn query_point(lng: f64, lat: f64) -> Result<JsValue, JsValue> {
    let answer = SessionState::with(|state| state.query_point(Position::new(lng, lat)));
    to_js(&answer)
}

#[wasm_bindgen]
pub fn toggle_basemap() -> Result<JsValue, JsValue> {
    let ops = SessionState::with_mut(|state| state.toggle_basemap());
    to_js(&ops)
}

/// `"satellite"` or `"osm"`, for the switcher icon.
#[wasm_bindgen]
pub fn current_basemap() -> String {
    SessionState::with(|state| match state.basemap.current {
        basemap::Basemap::Satellite => "satellite".to_string(),
        basemap::Basemap::Street => "osm".to_string(),
    })
}
