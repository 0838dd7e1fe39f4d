// Georeferencing for the optional raster image overlay.
//
// The descriptor is a GeoJSON Feature (or bare geometry) whose first ring
// lists the image corners as top-left, top-right, bottom-right, bottom-left.
// A closing fifth position, if present, is ignored.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MapError;
use crate::geojson::Position;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterCorners {
    pub top_left: Position,
    pub top_right: Position,
    pub bottom_right: Position,
    pub bottom_left: Position,
}

impl RasterCorners {
    /// Corner list in the order an image source expects.
    pub fn to_image_coordinates(&self) -> [[f64; 2]; 4] {
        [
            self.top_left.into(),
            self.top_right.into(),
            self.bottom_right.into(),
            self.bottom_left.into(),
        ]
    }
}

pub fn parse_raster_descriptor(payload: &str) -> Result<RasterCorners, MapError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| MapError::RasterDescriptor(format!("JSON parse error: {e}")))?;

    let geometry = value.get("geometry").unwrap_or(&value);
    let first_ring = geometry
        .get("coordinates")
        .and_then(|c| c.get(0))
        .cloned()
        .ok_or_else(|| MapError::RasterDescriptor("missing coordinates[0]".to_string()))?;

    let ring: Vec<Position> = serde_json::from_value(first_ring)
        .map_err(|e| MapError::RasterDescriptor(e.to_string()))?;

    match ring.as_slice() {
        [top_left, top_right, bottom_right, bottom_left, ..] => Ok(RasterCorners {
            top_left: *top_left,
            top_right: *top_right,
            bottom_right: *bottom_right,
            bottom_left: *bottom_left,
        }),
        _ => Err(MapError::RasterDescriptor(format!(
            "expected four corner coordinates, found {}",
            ring.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_corners_in_order() {
        let payload = r#"{
            "type": "Feature",
            "properties": { "source": "ALOS PALSAR" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [21.0, 26.0], [25.0, 26.0], [25.0, 22.0], [21.0, 22.0], [21.0, 26.0]
                ]]
            }
        }"#;

        let corners = parse_raster_descriptor(payload).expect("corners");
        assert_eq!(corners.top_left, Position::new(21.0, 26.0));
        assert_eq!(corners.bottom_right, Position::new(25.0, 22.0));
        assert_eq!(
            corners.to_image_coordinates(),
            [[21.0, 26.0], [25.0, 26.0], [25.0, 22.0], [21.0, 22.0]]
        );
    }

    #[test]
    fn accepts_bare_geometry() {
        let payload = r#"{"type": "Polygon", "coordinates": [[[0, 1], [1, 1], [1, 0], [0, 0]]]}"#;
        let corners = parse_raster_descriptor(payload).expect("corners");
        assert_eq!(corners.bottom_left, Position::new(0.0, 0.0));
    }

    #[test]
    fn rejects_missing_corners() {
        let short = r#"{"geometry": {"coordinates": [[[0, 1], [1, 1], [1, 0]]]}}"#;
        assert!(matches!(
            parse_raster_descriptor(short),
            Err(MapError::RasterDescriptor(_))
        ));
        assert!(parse_raster_descriptor(r#"{"geometry": {}}"#).is_err());
        assert!(parse_raster_descriptor("<html>404</html>").is_err());
    }
}
