// Switchable raster basemaps and the initial map style.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::layer_state::{InstalledLayers, LayerKind, LayerSpec, ShellOp, SourceSpec};

const TILE_SIZE: u32 = 256;
const MIN_ZOOM: f64 = 0.0;
const MAX_ZOOM: f64 = 19.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basemap {
    #[default]
    Satellite,
    #[serde(rename = "osm")]
    Street,
}

impl Basemap {
    pub const ALL: [Basemap; 2] = [Basemap::Satellite, Basemap::Street];

    pub fn source_id(&self) -> &'static str {
        match self {
            Basemap::Satellite => "satellite-tiles",
            Basemap::Street => "osm-tiles",
        }
    }

    pub fn layer_id(&self) -> &'static str {
        match self {
            Basemap::Satellite => "satellite-layer",
            Basemap::Street => "osm-tiles-layer",
        }
    }

    pub fn tile_url(&self) -> &'static str {
        match self {
            Basemap::Satellite => "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
            Basemap::Street => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            Basemap::Satellite => "© Esri",
            Basemap::Street => "© OpenStreetMap contributors",
        }
    }

    pub fn toggled(&self) -> Basemap {
        match self {
            Basemap::Satellite => Basemap::Street,
            Basemap::Street => Basemap::Satellite,
        }
    }

    pub fn source_spec(&self) -> SourceSpec {
        SourceSpec::Raster {
            tiles: vec![self.tile_url().to_string()],
            tile_size: TILE_SIZE,
            attribution: self.attribution().to_string(),
        }
    }

    pub fn layer_spec(&self) -> LayerSpec {
        LayerSpec {
            id: self.layer_id().to_string(),
            kind: LayerKind::Raster,
            source: self.source_id().to_string(),
            paint: Default::default(),
            minzoom: Some(MIN_ZOOM),
            maxzoom: Some(MAX_ZOOM),
        }
    }
}

/// Tracks which basemap the switcher button currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasemapSwitcher {
    pub current: Basemap,
}

impl BasemapSwitcher {
    pub fn toggle(&mut self) -> Basemap {
        self.current = self.current.toggled();
        self.current
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapStyle {
    pub version: u8,
    pub sources: BTreeMap<String, SourceSpec>,
    pub layers: Vec<LayerSpec>,
}

/// Style plus view options for constructing the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialView {
    pub style: MapStyle,
    pub center: [f64; 2],
    pub zoom: f64,
    pub max_zoom: f64,
    pub antialias: bool,
}

/// Both basemap sources registered, satellite shown.
pub fn initial_style() -> MapStyle {
    MapStyle {
        version: 8,
        sources: Basemap::ALL
            .iter()
            .map(|b| (b.source_id().to_string(), b.source_spec()))
            .collect(),
        layers: vec![Basemap::default().layer_spec()],
    }
}

pub fn initial_view(config: &MapConfig) -> InitialView {
    InitialView {
        style: initial_style(),
        center: config.center,
        zoom: config.zoom,
        max_zoom: config.max_zoom,
        antialias: true,
    }
}

/// What is on the map right after it is constructed from `initial_style`.
pub fn initial_installed() -> InstalledLayers {
    let style = initial_style();
    let mut installed = InstalledLayers::default();
    let ops: Vec<ShellOp> = style
        .sources
        .into_iter()
        .map(|(id, source)| ShellOp::AddSource { id, source })
        .chain(style.layers.into_iter().map(|layer| ShellOp::AddLayer {
            layer,
            before: None,
        }))
        .collect();
    installed.apply(&ops);
    installed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn switcher_alternates() {
        let mut switcher = BasemapSwitcher::default();
        assert_eq!(switcher.current, Basemap::Satellite);
        assert_eq!(switcher.toggle(), Basemap::Street);
        assert_eq!(switcher.toggle(), Basemap::Satellite);
    }

    #[test]
    fn initial_style_registers_both_sources() {
        let value = serde_json::to_value(initial_style()).expect("serializable");
        assert_eq!(value["version"], 8);
        assert_eq!(value["sources"]["osm-tiles"]["type"], "raster");
        assert_eq!(value["sources"]["osm-tiles"]["tileSize"], 256);
        assert_eq!(value["sources"]["satellite-tiles"]["attribution"], "© Esri");
        assert_eq!(
            value["layers"],
            json!([{
                "id": "satellite-layer",
                "type": "raster",
                "source": "satellite-tiles",
                "minzoom": 0.0,
                "maxzoom": 19.0
            }])
        );
    }

    #[test]
    fn initial_view_uses_config() {
        let view = serde_json::to_value(initial_view(&MapConfig::default())).expect("serializable");
        assert_eq!(view["center"], json!([15.0, 20.0]));
        assert_eq!(view["maxZoom"], 16.4);
    }

    #[test]
    fn installed_after_construction() {
        let installed = initial_installed();
        assert!(installed.has_source("osm-tiles"));
        assert!(installed.has_source("satellite-tiles"));
        assert_eq!(installed.layers, vec!["satellite-layer"]);
    }

    #[test]
    fn basemap_names_match_switcher_values() {
        assert_eq!(serde_json::to_value(Basemap::Street).expect("serializable"), "osm");
        assert_eq!(serde_json::to_value(Basemap::Satellite).expect("serializable"), "satellite");
    }
}
