use std::fmt;
use wasm_bindgen::JsValue;

/// Errors surfaced by the map core. Every variant crosses the wasm boundary
/// as a plain string via `From<MapError> for JsValue`.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// Malformed JSON or a document that is not the expected GeoJSON shape
    Parse(String),
    /// A feature carries a geometry other than Polygon/MultiPolygon
    UnsupportedGeometry { index: usize, kind: String },
    /// The region collection holds no coordinates to mask or bound
    EmptyRegion,
    /// The raster overlay descriptor lacks its four corners
    RasterDescriptor(String),
    /// A fetch through the JS helper failed or returned a non-success status
    Fetch { url: String, status: Option<u16>, reason: String },
    /// Rejected configuration value
    InvalidConfig(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Parse(msg) => write!(f, "failed to parse GeoJSON: {msg}"),
            MapError::UnsupportedGeometry { index, kind } => write!(
                f,
                "unsupported geometry type {kind} at feature {index} (expected Polygon or MultiPolygon)"
            ),
            MapError::EmptyRegion => write!(f, "region collection contains no coordinates"),
            MapError::RasterDescriptor(msg) => write!(f, "invalid raster descriptor: {msg}"),
            MapError::Fetch {
                url,
                status: Some(status),
                reason,
            } => write!(f, "fetch of {url} failed with status {status}: {reason}"),
            MapError::Fetch {
                url,
                status: None,
                reason,
            } => write!(f, "fetch of {url} failed: {reason}"),
            MapError::InvalidConfig(msg) => write!(f, "invalid map configuration: {msg}"),
        }
    }
}

impl std::error::Error for MapError {}

impl From<MapError> for JsValue {
    fn from(err: MapError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
