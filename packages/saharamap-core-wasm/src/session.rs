use lazy_static::lazy_static;
use parking_lot::ReentrantMutex;
use serde::Serialize;
use std::cell::RefCell;

use crate::basemap::{initial_installed, BasemapSwitcher};
use crate::console_log;
use crate::containment::feature_at;
use crate::error::MapError;
use crate::feature_info::{feature_info, InfoEntry};
use crate::geojson::{FeatureCollection, Position};
use crate::layer_state::{
    plan_basemap_switch, plan_raster_install, plan_region_install, InstalledLayers, ShellOp,
};
use crate::raster_overlay::parse_raster_descriptor;
use crate::region::RegionView;
use crate::config::MapConfig;

// Answer to a map click
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointQuery {
    pub inside: bool,
    pub info: Vec<InfoEntry>,
}

// State for one map view: what is loaded and what the shell has installed.
// A region reload replaces the region view and installed set together.
pub struct SessionState {
    pub config: MapConfig,
    pub installed: InstalledLayers,
    pub region: Option<RegionView>,
    pub basemap: BasemapSwitcher,
}

lazy_static! {
    static ref SESSION: ReentrantMutex<RefCell<SessionState>> =
        ReentrantMutex::new(RefCell::new(SessionState::new(MapConfig::default())));
}

impl SessionState {
    pub fn new(config: MapConfig) -> Self {
        SessionState {
            config,
            installed: initial_installed(),
            region: None,
            basemap: BasemapSwitcher::default(),
        }
    }

    pub fn with_mut<F, R>(f: F) -> R
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let guard = SESSION.lock();
        let mut borrow = guard.borrow_mut();
        f(&mut borrow)
    }

    pub fn with<F, R>(f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        let guard = SESSION.lock();
        let borrow = guard.borrow();
        f(&borrow)
    }

    pub fn configure(&mut self, config: MapConfig) {
        self.config = config;
    }

    // Parse, normalize, mask and plan. Nothing is committed unless every
    // step succeeds.
    pub fn install_region(&mut self, payload: &str) -> Result<Vec<ShellOp>, MapError> {
        let raw = FeatureCollection::from_json_str(payload)?;
        let view = RegionView::from_region(&raw, self.config.margin_degrees)?;
        let (ops, installed) = plan_region_install(&self.installed, &view, &self.config);

        self.region = Some(view);
        self.installed = installed;
        Ok(ops)
    }

    pub fn install_raster(&mut self, payload: &str) -> Result<Vec<ShellOp>, MapError> {
        let corners = parse_raster_descriptor(payload)?;
        let (ops, installed) = plan_raster_install(&self.installed, &corners, &self.config);
        self.installed = installed;
        Ok(ops)
    }

    pub fn toggle_basemap(&mut self) -> Vec<ShellOp> {
        let target = self.basemap.toggle();
        let (ops, installed) = plan_basemap_switch(&self.installed, target, &self.config);
        console_log!("Switching basemap to {:?}", target);
        self.installed = installed;
        ops
    }

    pub fn query_point(&self, point: Position) -> PointQuery {
        // Bounds cover every ring, so a point outside them cannot hit.
        let hit = self
            .region
            .as_ref()
            .filter(|view| view.bounds.contains(point))
            .and_then(|view| feature_at(point, &view.region));

        PointQuery {
            inside: hit.is_some(),
            info: hit.map(feature_info).unwrap_or_default(),
        }
    }
}
