// Async loaders for the two external documents.
//
// Fetching goes through the page's `wasmJsHelpers.fetchText(url)` helper,
// which resolves to `{ ok, status, statusText, text }`. The region load is
// fatal to the masking feature when it fails; the raster overlay is optional
// and a failure only means no overlay.
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::MapError;
use crate::session::SessionState;
use crate::{console_error, console_log, fetch_text, to_js};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchResponse {
    ok: bool,
    status: u16,
    #[serde(default)]
    status_text: String,
    #[serde(default)]
    text: Option<String>,
}

fn js_reason(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

async fn fetch_document(url: &str) -> Result<String, MapError> {
    let fetch_failed = |status: Option<u16>, reason: String| MapError::Fetch {
        url: url.to_string(),
        status,
        reason,
    };

    let promise = fetch_text(url).map_err(|e| fetch_failed(None, js_reason(&e)))?;
    let js_result = JsFuture::from(promise)
        .await
        .map_err(|e| fetch_failed(None, js_reason(&e)))?;

    let response: FetchResponse = serde_wasm_bindgen::from_value(js_result)
        .map_err(|e| fetch_failed(None, format!("unexpected helper response: {e}")))?;

    if !response.ok {
        return Err(fetch_failed(Some(response.status), response.status_text));
    }
    response
        .text
        .ok_or_else(|| fetch_failed(Some(response.status), "empty body".to_string()))
}

/// Fetch the region document (the configured URL unless one is given),
/// install it and return the shell operations. Errors are logged and
/// returned so the shell can notify the user.
#[wasm_bindgen]
pub async fn load_region(url: Option<String>) -> Result<JsValue, JsValue> {
    let url = url.unwrap_or_else(|| SessionState::with(|state| state.config.region_url.clone()));
    console_log!("Loading region from {}", url);

    let result = match fetch_document(&url).await {
        Ok(text) => SessionState::with_mut(|state| state.install_region(&text)),
        Err(e) => Err(e),
    };

    match result {
        Ok(ops) => to_js(&ops),
        Err(e) => {
            console_error!("Error loading region data: {}", e);
            Err(e.into())
        }
    }
}

/// Fetch the raster overlay descriptor and return the operations that add
/// the overlay. Resolves to an empty list when the descriptor is missing or
/// unreadable.
#[wasm_bindgen]
pub async fn load_raster_overlay() -> Result<JsValue, JsValue> {
    let url = SessionState::with(|state| state.config.raster_bounds_url.clone());

    let installed = match fetch_document(&url).await {
        Ok(text) => SessionState::with_mut(|state| state.install_raster(&text)),
        Err(e) => Err(e),
    };

    let ops = match installed {
        Ok(ops) => {
            console_log!("Raster overlay loaded from {}", url);
            ops
        }
        Err(e) => {
            console_log!("Raster overlay not available, skipping: {}", e);
            Vec::new()
        }
    };

    to_js(&ops)
}
