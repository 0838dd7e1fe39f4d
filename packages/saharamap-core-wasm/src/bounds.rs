// Enclosing rectangle of a region, used for max bounds and view fitting.
//
// No antimeridian handling and no clamping: expanded bounds may exceed the
// valid degree range and the map shell clamps if it needs to.
use serde::{Deserialize, Serialize};

use crate::geojson::{FeatureCollection, Position};

// Roughly 1000 km of slack around the region
pub const DEFAULT_MARGIN_DEGREES: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Bounds {
            west,
            south,
            east,
            north,
        }
    }

    /// Zero-size bounds at a single point.
    pub fn from_position(p: Position) -> Self {
        Bounds::new(p.x(), p.y(), p.x(), p.y())
    }

    pub fn extend(&mut self, p: Position) {
        self.west = self.west.min(p.x());
        self.south = self.south.min(p.y());
        self.east = self.east.max(p.x());
        self.north = self.north.max(p.y());
    }

    pub fn expand(&self, margin: f64) -> Bounds {
        Bounds::new(
            self.west - margin,
            self.south - margin,
            self.east + margin,
            self.north + margin,
        )
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x() >= self.west && p.x() <= self.east && p.y() >= self.south && p.y() <= self.north
    }

    /// `[[west, south], [east, north]]`, the shell's LngLatBounds form.
    pub fn to_lng_lat_pairs(&self) -> [[f64; 2]; 2] {
        [[self.west, self.south], [self.east, self.north]]
    }
}

/// Fold over every coordinate of every ring, holes included. `None` when the
/// collection has no coordinates at all.
pub fn compute_bounds(collection: &FeatureCollection) -> Option<Bounds> {
    collection.positions().fold(None, |acc, p| match acc {
        None => Some(Bounds::from_position(p)),
        Some(mut bounds) => {
            bounds.extend(p);
            Some(bounds)
        }
    })
}

pub fn expand(bounds: Bounds, margin: f64) -> Bounds {
    bounds.expand(margin)
}
