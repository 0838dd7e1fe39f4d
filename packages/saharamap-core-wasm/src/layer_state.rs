// Source/layer state transitions for the map shell.
//
// The core never touches the map. Each plan function takes the set of
// sources and layers currently installed, returns the operations the shell
// must run (in order, all or nothing) and the set that results from running
// them.
use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::basemap::Basemap;
use crate::config::{MapConfig, Padding};
use crate::geojson::FeatureCollection;
use crate::raster_overlay::RasterCorners;
use crate::region::RegionView;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceSpec {
    Geojson {
        data: FeatureCollection,
    },
    Raster {
        tiles: Vec<String>,
        #[serde(rename = "tileSize")]
        tile_size: u32,
        attribution: String,
    },
    Image {
        url: String,
        coordinates: [[f64; 2]; 4],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Fill,
    Raster,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub source: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub paint: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
}

impl LayerSpec {
    fn with_paint(id: &str, kind: LayerKind, source: &str, paint: Value) -> Self {
        LayerSpec {
            id: id.to_string(),
            kind,
            source: source.to_string(),
            paint: match paint {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            minzoom: None,
            maxzoom: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ShellOp {
    AddSource {
        id: String,
        source: SourceSpec,
    },
    RemoveSource {
        id: String,
    },
    AddLayer {
        layer: LayerSpec,
        #[serde(rename = "beforeId", skip_serializing_if = "Option::is_none")]
        before: Option<String>,
    },
    RemoveLayer {
        id: String,
    },
    SetMaxBounds {
        bounds: [[f64; 2]; 2],
    },
    FitBounds {
        bounds: [[f64; 2]; 2],
        padding: Padding,
        duration: u32,
        #[serde(rename = "maxZoom")]
        max_zoom: f64,
    },
}

/// Source and layer ids currently on the map. Layers keep their stacking
/// order, bottom first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstalledLayers {
    pub sources: BTreeSet<String>,
    pub layers: Vec<String>,
}

impl InstalledLayers {
    pub fn has_source(&self, id: &str) -> bool {
        self.sources.contains(id)
    }

    pub fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|l| l == id)
    }

    /// The state the shell ends up in after running `ops`.
    pub fn apply(&mut self, ops: &[ShellOp]) {
        for op in ops {
            match op {
                ShellOp::AddSource { id, .. } => {
                    self.sources.insert(id.clone());
                }
                ShellOp::RemoveSource { id } => {
                    self.sources.remove(id);
                }
                ShellOp::AddLayer { layer, before } => {
                    let position = before
                        .as_deref()
                        .and_then(|b| self.layers.iter().position(|l| l == b))
                        .unwrap_or(self.layers.len());
                    self.layers.insert(position, layer.id.clone());
                }
                ShellOp::RemoveLayer { id } => {
                    self.layers.retain(|l| l != id);
                }
                ShellOp::SetMaxBounds { .. } | ShellOp::FitBounds { .. } => {}
            }
        }
    }
}

fn finish(previous: &InstalledLayers, ops: Vec<ShellOp>) -> (Vec<ShellOp>, InstalledLayers) {
    let mut next = previous.clone();
    next.apply(&ops);
    (ops, next)
}

/// Replace any previous mask/region installation with `view`. Layers are
/// removed before the sources they reference.
pub fn plan_region_install(
    previous: &InstalledLayers,
    view: &RegionView,
    config: &MapConfig,
) -> (Vec<ShellOp>, InstalledLayers) {
    let mut ops = Vec::new();

    if previous.has_layer(&config.mask_layer_id) {
        ops.push(ShellOp::RemoveLayer {
            id: config.mask_layer_id.clone(),
        });
    }
    for id in [&config.region_source_id, &config.mask_source_id] {
        if previous.has_source(id) {
            ops.push(ShellOp::RemoveSource { id: id.clone() });
        }
    }

    ops.push(ShellOp::AddSource {
        id: config.mask_source_id.clone(),
        source: SourceSpec::Geojson {
            data: view.mask.clone(),
        },
    });
    ops.push(ShellOp::AddLayer {
        layer: LayerSpec::with_paint(
            &config.mask_layer_id,
            LayerKind::Fill,
            &config.mask_source_id,
            json!({
                "fill-color": config.mask_color,
                "fill-opacity": config.mask_opacity,
            }),
        ),
        before: None,
    });
    // Region source carries no layer; it backs click queries
    ops.push(ShellOp::AddSource {
        id: config.region_source_id.clone(),
        source: SourceSpec::Geojson {
            data: view.region.clone(),
        },
    });
    ops.push(ShellOp::SetMaxBounds {
        bounds: view.max_bounds.to_lng_lat_pairs(),
    });
    ops.push(ShellOp::FitBounds {
        bounds: view.bounds.to_lng_lat_pairs(),
        padding: config.fit_padding,
        duration: config.fit_duration_ms,
        max_zoom: config.fit_max_zoom,
    });

    finish(previous, ops)
}

/// Install the raster image overlay just below the mask layer.
pub fn plan_raster_install(
    previous: &InstalledLayers,
    corners: &RasterCorners,
    config: &MapConfig,
) -> (Vec<ShellOp>, InstalledLayers) {
    let mut ops = Vec::new();

    if previous.has_layer(&config.raster_layer_id) {
        ops.push(ShellOp::RemoveLayer {
            id: config.raster_layer_id.clone(),
        });
    }
    if previous.has_source(&config.raster_source_id) {
        ops.push(ShellOp::RemoveSource {
            id: config.raster_source_id.clone(),
        });
    }

    ops.push(ShellOp::AddSource {
        id: config.raster_source_id.clone(),
        source: SourceSpec::Image {
            url: config.raster_image_url.clone(),
            coordinates: corners.to_image_coordinates(),
        },
    });
    ops.push(ShellOp::AddLayer {
        layer: LayerSpec::with_paint(
            &config.raster_layer_id,
            LayerKind::Raster,
            &config.raster_source_id,
            json!({ "raster-opacity": config.raster_opacity }),
        ),
        before: previous
            .has_layer(&config.mask_layer_id)
            .then(|| config.mask_layer_id.clone()),
    });

    finish(previous, ops)
}

/// Swap the base layer for `target`, keeping it under the mask.
pub fn plan_basemap_switch(
    previous: &InstalledLayers,
    target: Basemap,
    config: &MapConfig,
) -> (Vec<ShellOp>, InstalledLayers) {
    let mut ops: Vec<ShellOp> = Basemap::ALL
        .iter()
        .filter(|b| previous.has_layer(b.layer_id()))
        .map(|b| ShellOp::RemoveLayer {
            id: b.layer_id().to_string(),
        })
        .collect();

    if !previous.has_source(target.source_id()) {
        ops.push(ShellOp::AddSource {
            id: target.source_id().to_string(),
            source: target.source_spec(),
        });
    }

    // Nothing else on the map yet: the base layer goes to the bottom
    let before = if previous.has_layer(&config.mask_layer_id) {
        Some(config.mask_layer_id.clone())
    } else {
        previous
            .layers
            .iter()
            .find(|l| Basemap::ALL.iter().all(|b| b.layer_id() != l.as_str()))
            .cloned()
    };

    ops.push(ShellOp::AddLayer {
        layer: target.layer_spec(),
        before,
    });

    finish(previous, ops)
}
