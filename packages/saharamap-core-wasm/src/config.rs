// Map configuration passed in from the JavaScript shell.
//
// Every field has a default so the shell can pass `undefined`, `{}` or a
// partial object. Keys are camelCase on the JS side.
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::bounds::DEFAULT_MARGIN_DEGREES;
use crate::error::MapError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Padding {
    // Extra room on the left for the info widgets
    fn default() -> Self {
        Padding {
            top: 50.0,
            bottom: 50.0,
            left: 360.0,
            right: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub region_url: String,
    pub raster_bounds_url: String,
    pub raster_image_url: String,

    pub margin_degrees: f64,
    pub mask_color: String,
    pub mask_opacity: f64,
    pub raster_opacity: f64,

    pub fit_padding: Padding,
    pub fit_duration_ms: u32,
    pub fit_max_zoom: f64,

    pub center: [f64; 2],
    pub zoom: f64,
    pub max_zoom: f64,

    pub mask_source_id: String,
    pub mask_layer_id: String,
    pub region_source_id: String,
    pub raster_source_id: String,
    pub raster_layer_id: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            region_url: "Sahara desert.geojson".to_string(),
            raster_bounds_url: "data/alos_palsar_kufra_basin_bounds.json".to_string(),
            raster_image_url: "data/alos_palsar_kufra_basin.png".to_string(),
            margin_degrees: DEFAULT_MARGIN_DEGREES,
            mask_color: "#6b7280".to_string(),
            mask_opacity: 0.75,
            raster_opacity: 0.7,
            fit_padding: Padding::default(),
            fit_duration_ms: 2000,
            fit_max_zoom: 5.0,
            // Centered on Africa, shifted right for the widgets
            center: [15.0, 20.0],
            zoom: 1.5,
            max_zoom: 16.4,
            mask_source_id: "world-mask-source".to_string(),
            mask_layer_id: "world-mask".to_string(),
            region_source_id: "sahara-source".to_string(),
            raster_source_id: "alos-palsar".to_string(),
            raster_layer_id: "alos-palsar-layer".to_string(),
        }
    }
}

impl MapConfig {
    pub fn from_js(value: JsValue) -> Result<Self, MapError> {
        if value.is_undefined() || value.is_null() {
            return Ok(MapConfig::default());
        }
        let config: MapConfig = serde_wasm_bindgen::from_value(value)
            .map_err(|e| MapError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(payload: &str) -> Result<Self, MapError> {
        let config: MapConfig =
            serde_json::from_str(payload).map_err(|e| MapError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if !self.margin_degrees.is_finite() || self.margin_degrees < 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "marginDegrees must be a non-negative number, got {}",
                self.margin_degrees
            )));
        }
        for (name, opacity) in [
            ("maskOpacity", self.mask_opacity),
            ("rasterOpacity", self.raster_opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(MapError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {opacity}"
                )));
            }
        }
        if !(self.max_zoom > 0.0) || !(self.fit_max_zoom > 0.0) {
            return Err(MapError::InvalidConfig(
                "zoom limits must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
