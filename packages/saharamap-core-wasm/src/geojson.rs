// GeoJSON document model for the region and mask collections.
//
// Only Polygon and MultiPolygon geometries are part of the region file
// contract. Foreign members on features and collections are carried through
// untouched so a document survives a parse/serialize round trip.
use geo_types::Coord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MapError;

/// A single `[x, y]` coordinate pair: longitude/latitude in degrees, or
/// spherical-Mercator meters before reprojection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Position(pub Coord<f64>);

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position(Coord { x, y })
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }
}

// A trailing altitude is accepted and dropped; downstream only uses x/y.
impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [x, y, ..] => Ok(Position::new(*x, *y)),
            _ => Err(format!(
                "position needs at least two numbers, got {}",
                values.len()
            )),
        }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.0.x, p.0.y]
    }
}

impl From<Coord<f64>> for Position {
    fn from(c: Coord<f64>) -> Self {
        Position(c)
    }
}

/// Closed sequence of positions (first == last).
pub type Ring = Vec<Position>;
/// `rings[0]` is the outer boundary, the rest are holes.
pub type Polygon = Vec<Ring>;
pub type MultiPolygon = Vec<Polygon>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    pub const SUPPORTED_TYPES: [&'static str; 2] = ["Polygon", "MultiPolygon"];

    /// Constituent polygons in document order. A Polygon yields itself.
    pub fn polygons(&self) -> std::slice::Iter<'_, Polygon> {
        match self {
            Geometry::Polygon(polygon) => std::slice::from_ref(polygon).iter(),
            Geometry::MultiPolygon(polygons) => polygons.iter(),
        }
    }

    /// Rebuild the geometry with every position passed through `f`,
    /// keeping the Polygon/MultiPolygon shape.
    pub fn map_positions<F>(&self, f: F) -> Geometry
    where
        F: Fn(Position) -> Position,
    {
        let map_polygon = |polygon: &Polygon| -> Polygon {
            polygon
                .iter()
                .map(|ring| ring.iter().map(|p| f(*p)).collect())
                .collect()
        };

        match self {
            Geometry::Polygon(polygon) => Geometry::Polygon(map_polygon(polygon)),
            Geometry::MultiPolygon(polygons) => {
                Geometry::MultiPolygon(polygons.iter().map(map_polygon).collect())
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum FeatureCollectionTag {
    #[default]
    FeatureCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    tag: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub foreign_members: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Map<String, Value>) -> Self {
        Feature {
            tag: FeatureTag::Feature,
            id: None,
            geometry,
            properties: Some(properties),
            foreign_members: Map::new(),
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|props| props.get(key))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    tag: FeatureCollectionTag,
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub foreign_members: Map<String, Value>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection {
            tag: FeatureCollectionTag::FeatureCollection,
            features,
            foreign_members: Map::new(),
        }
    }

    pub fn from_json_str(payload: &str) -> Result<Self, MapError> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| MapError::Parse(format!("JSON parse error: {e}")))?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self, MapError> {
        let features = value
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| MapError::Parse("expected GeoJSON FeatureCollection".to_string()))?;

        // Surface the geometry type by feature index rather than a generic
        // "unknown variant" from serde.
        for (index, feature) in features.iter().enumerate() {
            let kind = feature
                .get("geometry")
                .and_then(|g| g.get("type"))
                .and_then(Value::as_str)
                .unwrap_or("null");
            if !Geometry::SUPPORTED_TYPES.contains(&kind) {
                return Err(MapError::UnsupportedGeometry {
                    index,
                    kind: kind.to_string(),
                });
            }
        }

        serde_json::from_value(value).map_err(|e| MapError::Parse(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, MapError> {
        serde_json::to_string(self).map_err(|e| MapError::Parse(e.to_string()))
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> + '_ {
        self.features.iter().flat_map(|f| f.geometry.polygons())
    }

    /// Every position of every ring, holes included.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.polygons()
            .flat_map(|polygon| polygon.iter())
            .flat_map(|ring| ring.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let doc = json!({
            "type": "FeatureCollection",
            "name": "sahara",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "NAME": "Sahara" },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": null,
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[10.0, 10.0], [11.0, 10.0], [11.0, 11.0], [10.0, 10.0]]],
                            [[[20.0, 20.0], [21.0, 20.0], [21.0, 21.0], [20.0, 20.0]]]
                        ]
                    }
                }
            ]
        });

        let collection = FeatureCollection::from_json_value(doc).expect("valid collection");
        assert_eq!(collection.features.len(), 2);
        assert_eq!(collection.features[0].geometry.type_name(), "Polygon");
        assert_eq!(collection.features[1].geometry.polygons().count(), 2);
        assert_eq!(collection.polygons().count(), 3);
        assert_eq!(collection.positions().count(), 12);
        assert_eq!(collection.foreign_members.get("name"), Some(&json!("sahara")));
        assert!(collection.features[1].properties.is_none());
    }

    #[test]
    fn round_trips_document_shape() {
        let doc = json!({
            "type": "FeatureCollection",
            "crs": { "type": "name", "properties": { "name": "EPSG:3857" } },
            "features": [{
                "type": "Feature",
                "id": 7,
                "properties": { "REGION": "Africa" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[1.5, 2.5], [3.0, 2.5], [3.0, 4.0], [1.5, 2.5]]]
                }
            }]
        });

        let collection = FeatureCollection::from_json_value(doc.clone()).expect("valid collection");
        let back = serde_json::to_value(&collection).expect("serializable");
        assert_eq!(back, doc);
    }

    #[test]
    fn drops_altitude_from_positions() {
        let p: Position = serde_json::from_value(json!([5.0, 6.0, 120.0])).expect("position");
        assert_eq!(p, Position::new(5.0, 6.0));
        assert_eq!(serde_json::to_value(p).expect("serializable"), json!([5.0, 6.0]));
    }

    #[test]
    fn rejects_short_positions() {
        let result: Result<Position, _> = serde_json::from_value(json!([5.0]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unsupported_geometry_by_index() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Polygon", "coordinates": [] }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
                }
            ]
        });

        match FeatureCollection::from_json_value(doc) {
            Err(MapError::UnsupportedGeometry { index, kind }) => {
                assert_eq!(index, 1);
                assert_eq!(kind, "Point");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_collections() {
        let result = FeatureCollection::from_json_str(r#"{"type": "Feature"}"#);
        assert!(matches!(result, Err(MapError::Parse(_))));
        assert!(FeatureCollection::from_json_str("not json").is_err());
    }

    #[test]
    fn map_positions_keeps_structure() {
        let geometry = Geometry::MultiPolygon(vec![
            vec![vec![Position::new(1.0, 1.0), Position::new(2.0, 2.0)]],
            vec![],
        ]);
        let doubled = geometry.map_positions(|p| Position::new(p.x() * 2.0, p.y() * 2.0));
        assert_eq!(
            doubled,
            Geometry::MultiPolygon(vec![
                vec![vec![Position::new(2.0, 2.0), Position::new(4.0, 4.0)]],
                vec![],
            ])
        );
    }
}
