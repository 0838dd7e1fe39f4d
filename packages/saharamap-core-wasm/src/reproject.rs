// Spherical-Mercator (EPSG:3857) to geographic degrees.
//
// Projection detection is a heuristic over a single sampled coordinate: the
// whole collection is reprojected or none of it. A sample sitting exactly on
// the degree range limits takes whichever branch the threshold check gives.
use std::f64::consts::PI;

use crate::geojson::{FeatureCollection, Position};

// Half the equatorial circumference used by the web tiling convention
// (meters). Not the WGS84 ellipsoid value.
pub const MERCATOR_HALF_CIRCUMFERENCE: f64 = 20037508.34;

/// The coordinate the projection decision is based on: first position of
/// the first ring of the first polygon of the first feature.
pub fn sample_position(collection: &FeatureCollection) -> Option<Position> {
    collection
        .features
        .first()?
        .geometry
        .polygons()
        .next()?
        .first()?
        .first()
        .copied()
}

/// True when the sample lies outside the geographic degree range and must
/// therefore be in projected meters.
pub fn needs_reprojection(sample: Position) -> bool {
    sample.x().abs() > 180.0 || sample.y().abs() > 90.0
}

pub fn to_geographic(p: Position) -> Position {
    let lng = (p.x() / MERCATOR_HALF_CIRCUMFERENCE) * 180.0;
    let lat = (p.y() / MERCATOR_HALF_CIRCUMFERENCE) * 180.0;
    let lat = (lat * PI / 180.0).exp().atan() * 360.0 / PI - 90.0;
    Position::new(lng, lat)
}

/// Unconditionally reproject every coordinate. Properties, ids and foreign
/// members are copied unchanged.
pub fn reproject(collection: &FeatureCollection) -> FeatureCollection {
    let mut out = collection.clone();
    for feature in &mut out.features {
        feature.geometry = feature.geometry.map_positions(to_geographic);
    }
    out
}

/// Reproject only when the sampled coordinate says the data is projected.
/// Safe to apply repeatedly.
pub fn normalize(collection: &FeatureCollection) -> FeatureCollection {
    match sample_position(collection) {
        Some(sample) if needs_reprojection(sample) => reproject(collection),
        _ => collection.clone(),
    }
}
