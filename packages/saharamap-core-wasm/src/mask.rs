// Inverse mask: one polygon covering the world with the region cut out.
//
// Only outer rings of the region become holes. Holes inside the region's own
// polygons are dropped since the mask only has to expose the footprint.
use serde_json::Map;

use crate::geojson::{Feature, FeatureCollection, Geometry, Position, Ring};
use crate::winding::{enforce_clockwise, enforce_counter_clockwise};

pub const WORLD_CORNERS: [(f64, f64); 5] = [
    (-180.0, -90.0),
    (-180.0, 90.0),
    (180.0, 90.0),
    (180.0, -90.0),
    (-180.0, -90.0),
];

/// World rectangle, counter-clockwise.
pub fn world_ring() -> Ring {
    // The corner literal walks the rectangle clockwise in lon/lat space
    enforce_counter_clockwise(
        WORLD_CORNERS
            .iter()
            .map(|&(x, y)| Position::new(x, y))
            .collect(),
    )
}

/// Outer ring of every polygon, in feature then polygon order. Polygons
/// without rings contribute nothing.
pub fn outer_rings(collection: &FeatureCollection) -> Vec<&Ring> {
    collection
        .polygons()
        .filter_map(|polygon| polygon.first())
        .collect()
}

pub fn build_inverse_mask(collection: &FeatureCollection) -> Feature {
    let holes = outer_rings(collection)
        .into_iter()
        .map(|ring| enforce_clockwise(ring.clone()));

    let rings: Vec<Ring> = std::iter::once(world_ring()).chain(holes).collect();

    Feature::new(Geometry::Polygon(rings), Map::new())
}

/// The mask feature wrapped as a one-feature collection, ready for a
/// GeoJSON source.
pub fn build_inverse_mask_collection(collection: &FeatureCollection) -> FeatureCollection {
    FeatureCollection::new(vec![build_inverse_mask(collection)])
}
