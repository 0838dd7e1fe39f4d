// Point-in-region queries for click feedback.
//
// Containment is approximate on purpose: only outer rings are tested, so a
// point inside a hole of a region polygon still counts as inside. Points
// lying exactly on an edge may be classified either way; the ray-casting
// test gives no guarantee there.
use crate::geojson::{Feature, FeatureCollection, Position};

/// Ray casting with a horizontal ray towards +x. Each edge (wrapping last to
/// first) toggles the result when the point's y lies strictly between the
/// edge's y-extents and the crossing is to the right of the point.
pub fn point_in_ring(point: Position, ring: &[Position]) -> bool {
    let (x, y) = (point.x(), point.y());
    let mut inside = false;

    let n = ring.len();
    if n == 0 {
        return false;
    }

    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (ring[i].x(), ring[i].y());
        let (xj, yj) = (ring[j].x(), ring[j].y());

        let intersect = ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi);
        if intersect {
            inside = !inside;
        }
        j = i;
    }

    inside
}

fn feature_contains(feature: &Feature, point: Position) -> bool {
    feature
        .geometry
        .polygons()
        .filter_map(|polygon| polygon.first())
        .any(|outer| point_in_ring(point, outer))
}

pub fn is_in_region(point: Position, collection: &FeatureCollection) -> bool {
    feature_at(point, collection).is_some()
}

/// First feature whose outer ring(s) contain the point.
pub fn feature_at(point: Position, collection: &FeatureCollection) -> Option<&Feature> {
    collection
        .features
        .iter()
        .find(|feature| feature_contains(feature, point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Contains;
    use geo_types::{Coord, LineString, Polygon};
    use serde_json::json;

    fn ring(coords: &[(f64, f64)]) -> Vec<Position> {
        coords.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    fn square() -> Vec<Position> {
        ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)])
    }

    fn region() -> FeatureCollection {
        FeatureCollection::from_json_value(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "NAME": "West" },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [
                            [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                            [[4, 4], [6, 4], [6, 6], [4, 6], [4, 4]]
                        ]
                    }
                },
                {
                    "type": "Feature",
                    "properties": { "NAME": "East" },
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[20, 0], [25, 0], [25, 5], [20, 0]]],
                            [[[30, 30], [35, 30], [35, 35], [30, 35], [30, 30]]]
                        ]
                    }
                }
            ]
        }))
        .expect("valid region")
    }

    #[test]
    fn square_centroid_inside_far_point_outside() {
        assert!(point_in_ring(Position::new(2.0, 2.0), &square()));
        assert!(!point_in_ring(Position::new(10.0, 10.0), &square()));
    }

    #[test]
    fn orientation_does_not_matter() {
        let reversed: Vec<Position> = square().into_iter().rev().collect();
        assert!(point_in_ring(Position::new(1.0, 3.0), &reversed));
        assert!(!point_in_ring(Position::new(-1.0, 3.0), &reversed));
    }

    #[test]
    fn empty_and_degenerate_rings_contain_nothing() {
        assert!(!point_in_ring(Position::new(0.0, 0.0), &[]));
        assert!(!point_in_ring(Position::new(0.0, 0.0), &ring(&[(0.0, 0.0)])));
        let flat = ring(&[(0.0, 1.0), (5.0, 1.0), (0.0, 1.0)]);
        assert!(!point_in_ring(Position::new(2.0, 1.0), &flat));
    }

    #[test]
    fn agrees_with_geo_for_interior_points() {
        let concave = ring(&[
            (0.0, 0.0),
            (8.0, 0.0),
            (8.0, 8.0),
            (4.0, 3.0),
            (0.0, 8.0),
            (0.0, 0.0),
        ]);
        let oracle = Polygon::new(
            LineString::new(concave.iter().map(|p| p.0).collect()),
            vec![],
        );

        for (x, y) in [(1.0, 1.0), (4.0, 5.0), (7.0, 6.0), (1.5, 6.5), (9.0, 1.0), (4.0, 2.0)] {
            let expected = oracle.contains(&Coord { x, y });
            assert_eq!(point_in_ring(Position::new(x, y), &concave), expected, "({x}, {y})");
        }
    }

    #[test]
    fn region_uses_outer_rings_only() {
        let region = region();
        assert!(is_in_region(Position::new(1.0, 1.0), &region));
        // Inside the hole of the first polygon, still reported inside
        assert!(is_in_region(Position::new(5.0, 5.0), &region));
        // Second polygon of the MultiPolygon
        assert!(is_in_region(Position::new(32.0, 32.0), &region));
        assert!(!is_in_region(Position::new(15.0, 15.0), &region));
        assert!(!is_in_region(Position::new(1.0, 1.0), &FeatureCollection::new(vec![])));
    }

    #[test]
    fn feature_at_returns_containing_feature() {
        let region = region();
        let hit = feature_at(Position::new(33.0, 31.0), &region).expect("hit");
        assert_eq!(hit.property("NAME"), Some(&json!("East")));
        assert!(feature_at(Position::new(-5.0, -5.0), &region).is_none());
    }
}
