// Everything derived from one region load, built in a single pass so the
// shell either gets the full mask + region pair or nothing.
use crate::bounds::{compute_bounds, Bounds};
use crate::console_log;
use crate::error::MapError;
use crate::geojson::FeatureCollection;
use crate::mask::build_inverse_mask_collection;
use crate::reproject::{needs_reprojection, normalize, sample_position};

#[derive(Debug, Clone, PartialEq)]
pub struct RegionView {
    /// Region in geographic degrees
    pub region: FeatureCollection,
    /// World polygon with the region's outer rings as holes
    pub mask: FeatureCollection,
    /// Tight bounds of the region, used to fit the view
    pub bounds: Bounds,
    /// `bounds` widened by the configured margin, used to restrict panning
    pub max_bounds: Bounds,
}

impl RegionView {
    pub fn from_region(raw: &FeatureCollection, margin: f64) -> Result<Self, MapError> {
        let projected = sample_position(raw).map(needs_reprojection).unwrap_or(false);
        if projected {
            console_log!("Region coordinates look projected, converting from spherical Mercator");
        }

        let region = normalize(raw);
        let bounds = compute_bounds(&region).ok_or(MapError::EmptyRegion)?;
        let mask = build_inverse_mask_collection(&region);

        console_log!(
            "Region ready: {} features, bounds [{:.3}, {:.3}, {:.3}, {:.3}]",
            region.features.len(),
            bounds.west,
            bounds.south,
            bounds.east,
            bounds.north
        );

        Ok(RegionView {
            region,
            mask,
            bounds,
            max_bounds: bounds.expand(margin),
        })
    }
}
